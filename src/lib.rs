//! Pig Arcade - pig-themed browser mini-games
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, spawning, collisions, game state)
//! - `renderer`: Canvas 2D rendering (wasm32 only)
//! - `settings`: Visual preference toggles persisted to LocalStorage

pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;
    /// Simulation ticks per wall-clock second
    pub const TICKS_PER_SECOND: u64 = 60;

    /// Play field dimensions (mobile portrait)
    pub const CANVAS_WIDTH: f32 = 320.0;
    pub const CANVAS_HEIGHT: f32 = 480.0;
    pub const GROUND_HEIGHT: f32 = 50.0;
    /// Top of the ground strip; the pig's feet rest here
    pub const GROUND_Y: f32 = CANVAS_HEIGHT - GROUND_HEIGHT;

    /// Horizontal scroll speed for all spawned entities, pixels per tick
    pub const GAME_SPEED: f32 = 3.0;

    /// Pig defaults - fixed x, hitbox sized for the emoji glyph
    pub const PIG_X: f32 = 80.0;
    pub const PIG_WIDTH: f32 = 40.0;
    pub const PIG_HEIGHT: f32 = 30.0;
    /// Gravity per tick (pixels/tick²)
    pub const GRAVITY: f32 = 0.6;
    /// Jump impulse (Jump variant, ground-gated)
    pub const JUMP_IMPULSE: f32 = -12.0;
    /// Flap impulse (Flap variant, accepted airborne)
    pub const FLAP_IMPULSE: f32 = -8.0;

    pub const INITIAL_LIVES: i32 = 3;
    /// Car power-up duration (5 s)
    pub const CAR_DURATION_TICKS: u32 = 300;
    /// Post-hit invincibility window (3 s)
    pub const POST_HIT_INVINCIBILITY_TICKS: u32 = 180;
    /// Brief screen-darken cue after a hit (~100 ms)
    pub const HIT_FLASH_TICKS: u32 = 6;
    /// Blink cadence while post-hit invincible
    pub const BLINK_PERIOD_TICKS: u64 = 10;

    /// Whack grid: 3 columns x 4 rows
    pub const NUM_HOLES: usize = 12;
    pub const HOLE_COLS: usize = 3;
    pub const HOLE_ROWS: usize = 4;
    /// Whack session length
    pub const WHACK_DURATION_SECS: u64 = 30;
    pub const INITIAL_HEALTH: i32 = 5;
    /// Occupant visible window, in ticks (400-900 ms)
    pub const PEEP_MIN_TICKS: u64 = 24;
    pub const PEEP_MAX_TICKS: u64 = 54;
    /// Probability that a peep raises a pig rather than a wolf
    pub const PIG_CHANCE: f32 = 0.8;
    /// Hit animation window after whacking a pig (300 ms)
    pub const HOLE_HIT_TICKS: u32 = 18;
}

/// Axis-aligned bounding box in play-field coordinates (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    #[inline]
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Box from top-left corner and size
    #[inline]
    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self {
            min: pos,
            max: pos + size,
        }
    }

    /// Strict-overlap test; shared edges do not count as a collision
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }

    #[inline]
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }
}
