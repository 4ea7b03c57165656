//! Torus Snake - A wrap-around grid snake game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, growth, food, collisions)
//! - `settings`: Construction-time configuration
//! - `view`: Text presentation of simulation snapshots
//! - `error`: Error taxonomy

pub mod error;
pub mod settings;
pub mod sim;
pub mod view;

pub use error::{SettingsError, SimError};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Default grid dimensions (a 640x480 window of 20px cells)
    pub const DEFAULT_GRID_WIDTH: i32 = 32;
    pub const DEFAULT_GRID_HEIGHT: i32 = 24;

    /// Smallest grid edge that still hosts the starting body plus food
    pub const MIN_GRID_DIM: i32 = 5;

    /// Body segments behind the head at session start
    pub const INITIAL_BODY_LENGTH: usize = 3;

    /// Logical simulation ticks per second
    pub const TICK_RATE: u32 = 30;
    /// Presentation frames per second
    pub const FRAME_RATE: u32 = 120;
    /// Maximum ticks per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Rejected random samples before food placement enumerates free cells
    pub const FORAGE_SAMPLE_ATTEMPTS: u32 = 64;
}

/// Wrap a coordinate into `[0, axis_size)`
#[inline]
pub fn wrap(coordinate: i32, axis_size: i32) -> i32 {
    coordinate.rem_euclid(axis_size)
}
