//! Egg Catch - A falling-object arcade mini-game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, falling, catch/miss, round state)
//! - `config`: Validated game configuration
//! - `input`: Catcher movement and key mapping
//! - `present`: Presentation sink the simulation reports to

pub mod config;
pub mod input;
pub mod present;
pub mod sim;

pub use config::{CatchTest, ConfigError, GameConfig};
pub use input::{Catcher, Command, Direction};
pub use present::{NullPresenter, Presenter, PresenterEvent, RecordingPresenter};
pub use sim::{Game, GamePhase};

/// Default configuration constants
pub mod consts {
    /// Play area dimensions
    pub const CONTAINER_WIDTH: f32 = 600.0;
    pub const CONTAINER_HEIGHT: f32 = 400.0;

    /// Catcher (basket) defaults
    pub const CATCHER_WIDTH: f32 = 80.0;
    pub const CATCHER_HEIGHT: f32 = 20.0;
    /// Pixels per key press
    pub const CATCHER_STEP: f32 = 15.0;

    /// Egg dimensions
    pub const EGG_WIDTH: f32 = 20.0;
    pub const EGG_HEIGHT: f32 = 25.0;

    /// Misses allowed before the round ends
    pub const MAX_MISSES: u32 = 3;

    /// New egg every 1.5 seconds
    pub const SPAWN_INTERVAL_MS: f64 = 1500.0;
    /// Simulation runs 60 times per second
    pub const TICK_INTERVAL_MS: f64 = 1000.0 / 60.0;

    /// Fall speed range (pixels per tick)
    pub const MIN_FALL_SPEED: f32 = 1.0;
    pub const MAX_FALL_SPEED: f32 = 3.0;
}
