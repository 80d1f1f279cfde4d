//! Whack-a-pig simulation
//!
//! The peep cycle lives entirely in state fields: one pending peep expiry and
//! one next-peep frame. Game over is an early-return on the tick, so no
//! scheduled event can mutate a finished session.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::runner::GamePhase;
use crate::consts::*;
use crate::Aabb;

/// Penalty flavor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WhackVariant {
    /// Clicking an empty hole does nothing
    #[default]
    Classic,
    /// Empty clicks cost score, wolves hit harder
    Hardcore,
}

impl WhackVariant {
    pub fn wolf_damage(self) -> i32 {
        match self {
            WhackVariant::Classic => 1,
            WhackVariant::Hardcore => 2,
        }
    }

    /// Score cost for clicking an unoccupied hole
    pub fn miss_penalty(self) -> i64 {
        match self {
            WhackVariant::Classic => 0,
            WhackVariant::Hardcore => 1,
        }
    }
}

/// What currently occupies a hole
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Occupant {
    #[default]
    Empty,
    Pig,
    Wolf,
}

impl Occupant {
    pub fn glyph(self) -> &'static str {
        match self {
            Occupant::Empty => "",
            Occupant::Pig => "🐷",
            Occupant::Wolf => "🐺",
        }
    }
}

/// One fixed-position slot in the grid
#[derive(Debug, Clone, Copy, Default)]
pub struct Hole {
    pub occupant: Occupant,
    /// Occupant visible and clickable
    pub up: bool,
    /// Hit animation window after a successful whack
    pub hit_ticks: u32,
}

/// Complete whack game state (deterministic given seed + click script)
#[derive(Debug, Clone)]
pub struct WhackState {
    pub seed: u64,
    pub variant: WhackVariant,
    pub phase: GamePhase,
    pub frame: u64,
    /// Raw score; Hardcore misses may drive it negative, display clamps
    pub score: i64,
    pub health: i32,
    pub holes: Vec<Hole>,
    /// Last peeped hole, excluded from the next draw
    last_hole: Option<usize>,
    /// Frame at which the next peep fires (when nothing is up)
    next_peep_frame: u64,
    /// Pending occupant drop: (hole index, expiry frame)
    peep_expiry: Option<(usize, u64)>,
    rng: Pcg32,
}

impl WhackState {
    pub fn new(seed: u64, variant: WhackVariant) -> Self {
        Self {
            seed,
            variant,
            phase: GamePhase::Ready,
            frame: 0,
            score: 0,
            health: INITIAL_HEALTH,
            holes: vec![Hole::default(); NUM_HOLES],
            last_hole: None,
            next_peep_frame: 0,
            peep_expiry: None,
            rng: Pcg32::seed_from_u64(seed),
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
        self.health = INITIAL_HEALTH;
        self.holes = vec![Hole::default(); NUM_HOLES];
        self.last_hole = None;
        self.next_peep_frame = 0;
        self.peep_expiry = None;
        log::info!("whack session started ({:?})", self.variant);
    }

    /// Freeze the session and drop every occupant. Idempotent.
    fn end(&mut self) {
        if self.phase == GamePhase::GameOver {
            return;
        }
        self.phase = GamePhase::GameOver;
        self.peep_expiry = None;
        for hole in &mut self.holes {
            hole.up = false;
            hole.occupant = Occupant::Empty;
            hole.hit_ticks = 0;
        }
        log::info!("whack session over, final score {}", self.display_score());
    }

    /// Seconds left on the countdown
    pub fn time_left(&self) -> u64 {
        WHACK_DURATION_SECS.saturating_sub(self.frame / TICKS_PER_SECOND)
    }

    pub fn display_score(&self) -> i64 {
        self.score.max(0)
    }

    pub fn display_health(&self) -> u32 {
        self.health.max(0) as u32
    }

    /// Pick a hole uniformly, excluding the previous one.
    ///
    /// Exclusion-set sampling: draw from n-1 slots and skip over the last
    /// index. A single-hole grid cannot honor the no-repeat guarantee and
    /// always yields slot 0.
    fn pick_hole(&mut self) -> usize {
        let n = self.holes.len();
        let idx = match self.last_hole {
            Some(last) if n > 1 => {
                let r = self.rng.random_range(0..n - 1);
                if r >= last { r + 1 } else { r }
            }
            _ => self.rng.random_range(0..n.max(1)),
        };
        self.last_hole = Some(idx);
        idx
    }

    /// Resolve a click on hole `idx`
    pub fn click(&mut self, idx: usize) {
        if self.phase != GamePhase::Playing || idx >= self.holes.len() {
            return;
        }

        if !self.holes[idx].up {
            self.score -= self.variant.miss_penalty();
            return;
        }

        let occupant = self.holes[idx].occupant;
        self.holes[idx].up = false;
        self.holes[idx].occupant = Occupant::Empty;
        // The pending expiry stays scheduled; when it fires it finds the hole
        // down and chains straight into the next peep

        match occupant {
            Occupant::Pig => {
                self.score += 1;
                self.holes[idx].hit_ticks = HOLE_HIT_TICKS;
            }
            Occupant::Wolf => {
                self.health -= self.variant.wolf_damage();
                if self.health <= 0 {
                    self.end();
                }
            }
            Occupant::Empty => {}
        }
    }
}

/// Advance the whack game by one fixed timestep
pub fn whack_tick(state: &mut WhackState) {
    if state.phase != GamePhase::Playing {
        return;
    }

    state.frame += 1;

    for hole in &mut state.holes {
        if hole.hit_ticks > 0 {
            hole.hit_ticks -= 1;
        }
    }

    if state.frame >= WHACK_DURATION_SECS * TICKS_PER_SECOND {
        state.end();
        return;
    }

    // Drop an expired occupant and chain the next peep immediately
    if let Some((idx, expiry)) = state.peep_expiry {
        if state.frame >= expiry {
            let hole = &mut state.holes[idx];
            if hole.up {
                hole.up = false;
                hole.occupant = Occupant::Empty;
            }
            state.peep_expiry = None;
            state.next_peep_frame = state.frame;
        }
    }

    if state.peep_expiry.is_none() && state.frame >= state.next_peep_frame {
        let idx = state.pick_hole();
        let occupant = if state.rng.random::<f32>() < PIG_CHANCE {
            Occupant::Pig
        } else {
            Occupant::Wolf
        };
        let visible = state.rng.random_range(PEEP_MIN_TICKS..=PEEP_MAX_TICKS);

        let hole = &mut state.holes[idx];
        hole.occupant = occupant;
        hole.up = true;
        hole.hit_ticks = 0;
        state.peep_expiry = Some((idx, state.frame + visible));
    }
}

/// Screen rectangle of hole `idx` in the 3x4 grid
pub fn hole_rect(idx: usize) -> Aabb {
    const GRID_TOP: f32 = 80.0;
    const PAD: f32 = 8.0;
    let col = (idx % HOLE_COLS) as f32;
    let row = (idx / HOLE_COLS) as f32;
    let cell_w = CANVAS_WIDTH / HOLE_COLS as f32;
    let cell_h = (CANVAS_HEIGHT - GRID_TOP) / HOLE_ROWS as f32;
    Aabb::from_pos_size(
        Vec2::new(col * cell_w + PAD, GRID_TOP + row * cell_h + PAD),
        Vec2::new(cell_w - 2.0 * PAD, cell_h - 2.0 * PAD),
    )
}

/// Map a canvas point to the hole under it
pub fn hole_at(point: Vec2) -> Option<usize> {
    (0..NUM_HOLES).find(|&i| hole_rect(i).contains(point))
}
