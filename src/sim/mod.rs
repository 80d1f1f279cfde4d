//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - No rendering or platform dependencies
//!
//! Each tick runs in strict sequence: spawn → move → collide → prune, and a
//! session that has reached `GameOver` never mutates again.

pub mod entity;
pub mod player;
pub mod runner;
pub mod spawner;
pub mod whack;

pub use entity::{Category, Entity, EntityKind};
pub use player::Player;
pub use runner::{runner_tick, GamePhase, RunnerInput, RunnerState, RunnerVariant};
pub use spawner::{Schedule, SpawnTable, Spawner};
pub use whack::{hole_at, hole_rect, whack_tick, Hole, Occupant, WhackState, WhackVariant};
