//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time enters only through the schedule
//! - Seeded RNG only
//! - Stable iteration order (by egg ID)
//! - No rendering or platform dependencies

pub mod collision;
pub mod game;
pub mod schedule;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{Aabb, overlaps, overlaps_horizontal};
pub use game::Game;
pub use schedule::{MAX_FIRES_PER_ADVANCE, MAX_FRAME_MS, PeriodicTrigger, Schedule, TriggerKind};
pub use spawn::Spawner;
pub use state::{Egg, EggId, EggRegistry, GamePhase, RngState, RoundState};
pub use tick::{TickReport, tick};
