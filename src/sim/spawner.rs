//! Randomized entity spawn scheduling
//!
//! Each spawn category keeps a "next spawn frame" drawn from its interval
//! table. When the tick counter reaches it, exactly one entity is created at
//! the leading edge and the next frame is redrawn as `frame + random(min, max)`.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::entity::{Entity, EntityKind};
use super::runner::RunnerVariant;
use crate::consts::*;

/// Spawn interval bounds for one category, in ticks
#[derive(Debug, Clone, Copy)]
pub struct SpawnTable {
    pub min: u64,
    pub max: u64,
    /// Extra delay before the first spawn of a session
    pub start_delay: u64,
}

pub const OBSTACLE_SPAWN: SpawnTable = SpawnTable {
    min: 80,
    max: 150,
    start_delay: 0,
};
pub const APPLE_SPAWN: SpawnTable = SpawnTable {
    min: 100,
    max: 200,
    start_delay: 50,
};
pub const CORN_SPAWN: SpawnTable = SpawnTable {
    min: 120,
    max: 220,
    start_delay: 80,
};
/// Car keys are rare and start late
pub const CAR_KEY_SPAWN: SpawnTable = SpawnTable {
    min: 400,
    max: 800,
    start_delay: 150,
};
/// Hawks only exist in the Flap variant
pub const HAWK_SPAWN: SpawnTable = SpawnTable {
    min: 200,
    max: 350,
    start_delay: 120,
};

/// One category's spawn timer
#[derive(Debug, Clone)]
pub struct Schedule {
    table: SpawnTable,
    next_frame: u64,
}

impl Schedule {
    pub fn new(table: SpawnTable, rng: &mut Pcg32) -> Self {
        let next_frame = table.start_delay + rng.random_range(table.min..=table.max);
        Self { table, next_frame }
    }

    pub fn next_frame(&self) -> u64 {
        self.next_frame
    }

    /// True at most once per redraw: fires when `frame` reaches the scheduled
    /// value, then redraws the next spawn frame
    pub fn poll(&mut self, frame: u64, rng: &mut Pcg32) -> bool {
        if frame < self.next_frame {
            return false;
        }
        self.next_frame = frame + rng.random_range(self.table.min..=self.table.max);
        true
    }
}

/// Weighted obstacle-kind draw: 50% cactus / 30% tree / 20% rock
fn roll_obstacle_kind(rng: &mut Pcg32) -> EntityKind {
    let roll = rng.random_range(0..100u32);
    if roll < 50 {
        EntityKind::Cactus
    } else if roll < 80 {
        EntityKind::Tree
    } else {
        EntityKind::Rock
    }
}

/// All spawn schedules for a runner session, plus entity id allocation
#[derive(Debug, Clone)]
pub struct Spawner {
    next_id: u32,
    obstacle: Schedule,
    apple: Schedule,
    corn: Schedule,
    car_key: Schedule,
    hawk: Option<Schedule>,
}

impl Spawner {
    pub fn new(variant: RunnerVariant, rng: &mut Pcg32) -> Self {
        Self {
            next_id: 1,
            obstacle: Schedule::new(OBSTACLE_SPAWN, rng),
            apple: Schedule::new(APPLE_SPAWN, rng),
            corn: Schedule::new(CORN_SPAWN, rng),
            car_key: Schedule::new(CAR_KEY_SPAWN, rng),
            hawk: match variant {
                RunnerVariant::Flap => Some(Schedule::new(HAWK_SPAWN, rng)),
                RunnerVariant::Jump => None,
            },
        }
    }

    fn alloc_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Spawn every entity due this tick, appending to `out`
    pub fn poll(
        &mut self,
        frame: u64,
        variant: RunnerVariant,
        rng: &mut Pcg32,
        out: &mut Vec<Entity>,
    ) {
        if self.obstacle.poll(frame, rng) {
            let kind = roll_obstacle_kind(rng);
            let y = match variant {
                // Ground obstacles sit on the ground line
                RunnerVariant::Jump => GROUND_Y - kind.size().y,
                // Flap spreads them across the sky
                RunnerVariant::Flap => rng.random_range(40.0..=GROUND_Y - kind.size().y),
            };
            let id = self.alloc_id();
            out.push(Entity::new(id, kind, Vec2::new(CANVAS_WIDTH, y)));
        }

        if self.apple.poll(frame, rng) {
            let kind = EntityKind::Apple;
            let y = collectible_y(kind, variant, PIG_HEIGHT * 2.0, rng);
            let id = self.alloc_id();
            out.push(Entity::new(id, kind, Vec2::new(CANVAS_WIDTH, y)));
        }

        if self.corn.poll(frame, rng) {
            let kind = EntityKind::Corn;
            let y = collectible_y(kind, variant, PIG_HEIGHT, rng);
            let id = self.alloc_id();
            out.push(Entity::new(id, kind, Vec2::new(CANVAS_WIDTH, y)));
        }

        if self.car_key.poll(frame, rng) {
            let kind = EntityKind::CarKey;
            let y = collectible_y(kind, variant, PIG_HEIGHT, rng);
            let id = self.alloc_id();
            out.push(Entity::new(id, kind, Vec2::new(CANVAS_WIDTH, y)));
        }

        if let Some(ref mut hawk) = self.hawk {
            if hawk.poll(frame, rng) {
                let kind = EntityKind::Hawk;
                let y = rng.random_range(40.0..=GROUND_Y - 120.0);
                let id = self.alloc_id();
                out.push(Entity::new(id, kind, Vec2::new(CANVAS_WIDTH, y)));
            }
        }
    }
}

/// Vertical placement for collectibles: on or slightly above the ground in the
/// Jump variant, anywhere in the sky band for Flap
fn collectible_y(kind: EntityKind, variant: RunnerVariant, lift: f32, rng: &mut Pcg32) -> f32 {
    let size = kind.size().y;
    match variant {
        RunnerVariant::Jump => {
            let y = GROUND_Y - size - rng.random_range(0.0..=lift);
            y.max(size)
        }
        RunnerVariant::Flap => rng.random_range(40.0..=GROUND_Y - size),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;

    fn rng(seed: u64) -> Pcg32 {
        Pcg32::seed_from_u64(seed)
    }

    #[test]
    fn test_schedule_fires_once_and_redraws() {
        let mut r = rng(7);
        let table = SpawnTable {
            min: 100,
            max: 200,
            start_delay: 0,
        };
        let mut sched = Schedule::new(table, &mut r);
        let first = sched.next_frame();
        assert!((100..=200).contains(&first));

        // Nothing before the scheduled frame
        assert!(!sched.poll(first - 1, &mut r));

        // Fires when reached (here: overshot to 250), redraw is frame + [min, max]
        assert!(sched.poll(250, &mut r));
        assert!((350..=450).contains(&sched.next_frame()));

        // Does not fire again until the new frame is reached
        assert!(!sched.poll(251, &mut r));
    }

    #[test]
    fn test_poll_appends_exactly_one_obstacle_when_due() {
        let mut r = rng(42);
        let mut spawner = Spawner::new(RunnerVariant::Jump, &mut r);
        let due = spawner.obstacle.next_frame();

        // Force the other categories far into the future
        spawner.apple.next_frame = u64::MAX;
        spawner.corn.next_frame = u64::MAX;
        spawner.car_key.next_frame = u64::MAX;

        let mut out = Vec::new();
        spawner.poll(due, RunnerVariant::Jump, &mut r, &mut out);
        assert_eq!(out.len(), 1);
        assert!(out[0].kind.is_obstacle());
        assert_eq!(out[0].pos.x, CANVAS_WIDTH);
        // Ground obstacles rest on the ground line
        assert_eq!(out[0].pos.y, GROUND_Y - out[0].kind.size().y);
    }

    #[test]
    fn test_no_hawks_in_jump_variant() {
        let mut r = rng(3);
        let mut spawner = Spawner::new(RunnerVariant::Jump, &mut r);
        let mut out = Vec::new();
        for frame in 0..20_000 {
            spawner.poll(frame, RunnerVariant::Jump, &mut r, &mut out);
        }
        assert!(!out.is_empty());
        assert!(out.iter().all(|e| e.kind != EntityKind::Hawk));
    }

    #[test]
    fn test_flap_variant_spawns_hawks() {
        let mut r = rng(3);
        let mut spawner = Spawner::new(RunnerVariant::Flap, &mut r);
        let mut out = Vec::new();
        for frame in 0..20_000 {
            spawner.poll(frame, RunnerVariant::Flap, &mut r, &mut out);
        }
        assert!(out.iter().any(|e| e.kind == EntityKind::Hawk));
    }

    #[test]
    fn test_entity_ids_unique() {
        let mut r = rng(11);
        let mut spawner = Spawner::new(RunnerVariant::Flap, &mut r);
        let mut out = Vec::new();
        for frame in 0..10_000 {
            spawner.poll(frame, RunnerVariant::Flap, &mut r, &mut out);
        }
        let mut ids: Vec<u32> = out.iter().map(|e| e.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), out.len());
    }

    proptest! {
        #[test]
        fn prop_redraw_stays_in_interval(seed in 0u64..1000, frame in 0u64..100_000) {
            let mut r = rng(seed);
            let table = SpawnTable { min: 80, max: 150, start_delay: 0 };
            let mut sched = Schedule::new(table, &mut r);
            sched.next_frame = frame; // force due now
            prop_assert!(sched.poll(frame, &mut r));
            let next = sched.next_frame();
            prop_assert!(next >= frame + table.min && next <= frame + table.max);
        }
    }
}
