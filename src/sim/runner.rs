//! Endless-runner simulation
//!
//! One fixed-timestep tick runs the full pipeline: spawn → move → collide →
//! prune. Mutations discovered mid-scan (score deltas, car pickup, damage) are
//! deferred to the end of the scan so each entity resolves at most once per
//! tick.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::entity::Entity;
use super::player::Player;
use super::spawner::Spawner;
use crate::consts::*;

/// Impulse gating flavor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunnerVariant {
    /// Impulse accepted only on the ground (dino-runner style)
    #[default]
    Jump,
    /// Impulse accepted unconditionally (flappy style), hawks spawn
    Flap,
}

/// Session lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Waiting on the start screen
    Ready,
    /// Active gameplay
    Playing,
    /// Session ended; state is frozen
    GameOver,
}

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct RunnerInput {
    /// Jump/flap (click/tap/space)
    pub impulse: bool,
    /// Explicit start/restart request (start or restart button)
    pub start: bool,
}

/// Complete runner game state (deterministic given seed + input script)
#[derive(Debug, Clone)]
pub struct RunnerState {
    pub seed: u64,
    pub variant: RunnerVariant,
    pub phase: GamePhase,
    /// Tick counter for the current session
    pub frame: u64,
    /// Raw score; may only be displayed after clamping
    pub score: i64,
    pub lives: i32,
    pub player: Player,
    /// Live entities, spawn order (ids strictly increase)
    pub entities: Vec<Entity>,
    pub spawner: Spawner,
    /// Ticks of screen-darken cue remaining after a hit
    pub hit_flash_ticks: u32,
    rng: Pcg32,
}

impl RunnerState {
    pub fn new(seed: u64, variant: RunnerVariant) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let spawner = Spawner::new(variant, &mut rng);
        Self {
            seed,
            variant,
            phase: GamePhase::Ready,
            frame: 0,
            score: 0,
            lives: INITIAL_LIVES,
            player: Player::default(),
            entities: Vec::new(),
            spawner,
            hit_flash_ticks: 0,
            rng,
        }
    }

    /// Reset all session state and begin play. No-op while already playing.
    pub fn start(&mut self) {
        if self.phase == GamePhase::Playing {
            return;
        }
        self.phase = GamePhase::Playing;
        self.frame = 0;
        self.score = 0;
        self.lives = INITIAL_LIVES;
        self.player = Player::default();
        self.entities.clear();
        self.spawner = Spawner::new(self.variant, &mut self.rng);
        self.hit_flash_ticks = 0;
        log::info!("runner session started ({:?})", self.variant);
    }

    /// Freeze the session. Idempotent; the first call wins.
    fn end(&mut self) {
        if self.phase == GamePhase::GameOver {
            return;
        }
        self.phase = GamePhase::GameOver;
        log::info!("runner session over, final score {}", self.display_score());
    }

    /// Score as shown on the HUD, clamped at zero
    pub fn display_score(&self) -> i64 {
        self.score.max(0)
    }

    /// Lives as shown on the HUD, clamped at zero
    pub fn display_lives(&self) -> u32 {
        self.lives.max(0) as u32
    }
}

/// Advance the runner by one fixed timestep
pub fn runner_tick(state: &mut RunnerState, input: &RunnerInput) {
    if input.start {
        state.start();
    }
    // On the start screen the activate action doubles as "start"
    if state.phase == GamePhase::Ready && input.impulse {
        state.start();
    }
    if state.phase != GamePhase::Playing {
        return;
    }

    state.frame += 1;
    if state.hit_flash_ticks > 0 {
        state.hit_flash_ticks -= 1;
    }

    if input.impulse {
        state.player.impulse(state.variant);
    }
    state.player.step(state.variant);

    // Spawn everything due this tick
    state
        .spawner
        .poll(state.frame, state.variant, &mut state.rng, &mut state.entities);

    // Move, resolve collisions, prune - one pass, effects deferred
    let hitbox = state.player.hitbox();
    let in_car = state.player.in_car();
    let invincible = state.player.invincible();

    let mut score_delta: i64 = 0;
    let mut got_car = false;
    let mut damage: Option<i32> = None;

    state.entities.retain_mut(|e| {
        e.advance(GAME_SPEED);
        let eb = e.hitbox();

        if eb.overlaps(&hitbox) {
            if e.kind.is_collectible() {
                score_delta += e.kind.score_value();
                return false;
            }
            if e.kind.is_powerup() {
                got_car = true;
                return false;
            }
            // Damaging overlap
            if in_car {
                // The car plows through, small bonus
                score_delta += 2;
                return false;
            }
            if !invincible && damage.is_none() {
                damage = Some(e.kind.damage());
            }
            // While invincible (or after the first hit this tick) the pig
            // passes through; the entity stays live
        } else if e.kind.is_obstacle() && !e.passed && eb.max.x < hitbox.min.x {
            // Trailing edge cleared the pig without contact: pass-through point
            e.passed = true;
            score_delta += 1;
        }

        !e.off_screen()
    });

    state.score += score_delta;

    if got_car && !state.player.in_car() {
        state.player.enter_car();
        log::info!("car mode engaged");
    }

    if let Some(d) = damage {
        state.lives -= d;
        state.hit_flash_ticks = HIT_FLASH_TICKS;
        if state.lives <= 0 {
            state.end();
        } else {
            state.player.take_hit();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::EntityKind;
    use glam::Vec2;
    use proptest::prelude::*;

    fn playing(seed: u64, variant: RunnerVariant) -> RunnerState {
        let mut state = RunnerState::new(seed, variant);
        state.start();
        state
    }

    /// An entity overlapping the pig's resting hitbox even after one advance
    fn at_pig(kind: EntityKind) -> Entity {
        Entity::new(999, kind, Vec2::new(PIG_X - 5.0, GROUND_Y - kind.size().y))
    }

    #[test]
    fn test_collectible_adds_value_and_is_removed() {
        let mut state = playing(1, RunnerVariant::Jump);
        state.entities.push(at_pig(EntityKind::Apple));

        runner_tick(&mut state, &RunnerInput::default());
        assert_eq!(state.score, 5);
        assert!(state.entities.iter().all(|e| e.kind != EntityKind::Apple));
    }

    #[test]
    fn test_pass_through_score_awarded_once() {
        let mut state = playing(2, RunnerVariant::Jump);
        // Obstacle fully behind the pig's leading edge after one advance
        let kind = EntityKind::Cactus;
        state.entities.push(Entity::new(
            50,
            kind,
            Vec2::new(PIG_X - PIG_WIDTH / 2.0 - kind.size().x - 5.0, GROUND_Y - kind.size().y),
        ));

        runner_tick(&mut state, &RunnerInput::default());
        assert_eq!(state.score, 1);
        assert!(state.entities.iter().any(|e| e.id == 50 && e.passed));

        runner_tick(&mut state, &RunnerInput::default());
        assert_eq!(state.score, 1, "pass-through point must be awarded once");
    }

    #[test]
    fn test_obstacle_hit_costs_life_and_grants_window() {
        let mut state = playing(3, RunnerVariant::Jump);
        state.entities.push(at_pig(EntityKind::Cactus));

        runner_tick(&mut state, &RunnerInput::default());
        assert_eq!(state.lives, INITIAL_LIVES - 1);
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(state.player.invincible());
        assert_eq!(state.hit_flash_ticks, HIT_FLASH_TICKS);

        // Still overlapping next tick, but the window gates damage
        runner_tick(&mut state, &RunnerInput::default());
        assert_eq!(state.lives, INITIAL_LIVES - 1);
    }

    #[test]
    fn test_hawk_deals_double_damage() {
        let mut state = playing(4, RunnerVariant::Flap);
        let mut hawk = at_pig(EntityKind::Hawk);
        hawk.pos.y = state.player.y - PIG_HEIGHT; // overlap the airborne band
        state.entities.push(hawk);

        runner_tick(&mut state, &RunnerInput::default());
        assert_eq!(state.lives, INITIAL_LIVES - 2);
    }

    #[test]
    fn test_car_key_activates_vehicle_mode() {
        let mut state = playing(5, RunnerVariant::Jump);
        state.entities.push(at_pig(EntityKind::CarKey));

        runner_tick(&mut state, &RunnerInput::default());
        assert!(state.player.in_car());
        assert!(state.entities.iter().all(|e| e.kind != EntityKind::CarKey));
    }

    #[test]
    fn test_car_key_recollection_is_noop_beyond_removal() {
        let mut state = playing(6, RunnerVariant::Jump);
        state.player.enter_car();
        state.player.car_ticks = 77;
        state.entities.push(at_pig(EntityKind::CarKey));

        runner_tick(&mut state, &RunnerInput::default());
        // step() decrements once; the timer must not be refreshed
        assert_eq!(state.player.car_ticks, 76);
        assert!(state.entities.iter().all(|e| e.kind != EntityKind::CarKey));
    }

    #[test]
    fn test_car_destroys_obstacle_for_bonus() {
        let mut state = playing(7, RunnerVariant::Jump);
        state.player.enter_car();
        state.entities.push(at_pig(EntityKind::Cactus));

        runner_tick(&mut state, &RunnerInput::default());
        assert_eq!(state.score, 2);
        assert_eq!(state.lives, INITIAL_LIVES);
        assert!(state.entities.iter().all(|e| e.kind != EntityKind::Cactus));
    }

    #[test]
    fn test_game_over_transition_happens_once() {
        let mut state = playing(8, RunnerVariant::Jump);
        state.lives = 1;
        state.entities.push(at_pig(EntityKind::Cactus));

        runner_tick(&mut state, &RunnerInput::default());
        assert_eq!(state.phase, GamePhase::GameOver);
        let frozen_frame = state.frame;
        let frozen_score = state.score;

        // Ticking a finished session mutates nothing
        runner_tick(&mut state, &RunnerInput { impulse: true, start: false });
        assert_eq!(state.frame, frozen_frame);
        assert_eq!(state.score, frozen_score);
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_start_is_idempotent_while_playing() {
        let mut state = playing(9, RunnerVariant::Jump);
        state.score = 42;
        state.start();
        assert_eq!(state.score, 42, "start() while playing must not reset");
    }

    #[test]
    fn test_impulse_starts_from_ready() {
        let mut state = RunnerState::new(10, RunnerVariant::Jump);
        assert_eq!(state.phase, GamePhase::Ready);
        runner_tick(&mut state, &RunnerInput { impulse: true, start: false });
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_restart_after_game_over() {
        let mut state = playing(11, RunnerVariant::Jump);
        state.lives = 1;
        state.entities.push(at_pig(EntityKind::Rock));
        runner_tick(&mut state, &RunnerInput::default());
        assert_eq!(state.phase, GamePhase::GameOver);

        runner_tick(&mut state, &RunnerInput { impulse: false, start: true });
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.lives, INITIAL_LIVES);
        assert_eq!(state.score, 0);
        assert!(state.entities.is_empty());
    }

    #[test]
    fn test_determinism() {
        let mut state1 = playing(99_999, RunnerVariant::Flap);
        let mut state2 = playing(99_999, RunnerVariant::Flap);

        for i in 0..2_000u64 {
            let input = RunnerInput {
                impulse: i % 37 == 0,
                start: false,
            };
            runner_tick(&mut state1, &input);
            runner_tick(&mut state2, &input);
        }

        assert_eq!(state1.frame, state2.frame);
        assert_eq!(state1.score, state2.score);
        assert_eq!(state1.lives, state2.lives);
        assert_eq!(state1.entities.len(), state2.entities.len());
        assert_eq!(state1.player.y, state2.player.y);
    }

    #[test]
    fn test_entities_pruned_off_trailing_edge() {
        let mut state = playing(12, RunnerVariant::Jump);
        let kind = EntityKind::Rock;
        state
            .entities
            .push(Entity::new(7, kind, Vec2::new(-kind.size().x + 1.0, GROUND_Y - kind.size().y)));

        runner_tick(&mut state, &RunnerInput::default());
        assert!(state.entities.iter().all(|e| e.id != 7));
    }

    proptest! {
        #[test]
        fn prop_display_counters_never_negative(score in -100i64..100, lives in -5i32..5) {
            let mut state = RunnerState::new(0, RunnerVariant::Jump);
            state.score = score;
            state.lives = lives;
            prop_assert!(state.display_score() >= 0);
            prop_assert!(state.display_lives() <= 5);
        }
    }
}
