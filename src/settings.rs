//! Game settings
//!
//! Passed to the simulation at construction. Optionally loaded from a JSON file.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{SettingsError, SimError};
use crate::sim::GridSpace;

/// Game settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Grid ===
    /// Grid width in cells
    pub grid_width: i32,
    /// Grid height in cells
    pub grid_height: i32,
    /// Body segments trailing the head at session start
    pub initial_length: usize,

    // === Determinism ===
    /// RNG seed for food placement (random when absent)
    pub seed: Option<u64>,

    // === Pacing ===
    /// Logical ticks per second
    pub tick_rate: u32,
    /// Presentation frames per second
    pub frame_rate: u32,

    // === Demo ===
    /// Stop the demo loop after this many ticks (0 = unlimited)
    pub max_ticks: u64,
    /// Let the autopilot steer
    pub autopilot: bool,
    /// Emit JSON snapshot lines instead of text frames
    pub json: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            grid_width: DEFAULT_GRID_WIDTH,
            grid_height: DEFAULT_GRID_HEIGHT,
            initial_length: INITIAL_BODY_LENGTH,

            seed: None,

            tick_rate: TICK_RATE,
            frame_rate: FRAME_RATE,

            max_ticks: 0,
            autopilot: true,
            json: false,
        }
    }
}

impl Settings {
    /// Settings for a grid of the given size, everything else default
    pub fn with_grid(grid_width: i32, grid_height: i32) -> Self {
        Self {
            grid_width,
            grid_height,
            ..Self::default()
        }
    }

    /// Grid described by these settings
    pub fn grid(&self) -> GridSpace {
        GridSpace::new(self.grid_width, self.grid_height)
    }

    /// Check that a session can start with these settings
    pub fn validate(&self) -> Result<(), SimError> {
        if self.grid_width < MIN_GRID_DIM || self.grid_height < MIN_GRID_DIM {
            return Err(SimError::invalid(format!(
                "grid {}x{} is smaller than the {MIN_GRID_DIM}x{MIN_GRID_DIM} minimum",
                self.grid_width, self.grid_height
            )));
        }
        if self.initial_length == 0 {
            return Err(SimError::invalid("initial_length must be at least 1"));
        }
        // Head plus body laid out in one row must not wrap onto itself
        if self.initial_length + 1 > self.grid_width as usize {
            return Err(SimError::invalid(format!(
                "initial_length {} does not fit in a row of {} cells",
                self.initial_length, self.grid_width
            )));
        }
        if self.tick_rate == 0 || self.frame_rate == 0 {
            return Err(SimError::invalid("tick_rate and frame_rate must be positive"));
        }
        Ok(())
    }

    /// Seconds per logical tick
    pub fn tick_dt(&self) -> f64 {
        1.0 / self.tick_rate as f64
    }

    /// Seconds per presentation frame
    pub fn frame_dt(&self) -> f64 {
        1.0 / self.frame_rate as f64
    }

    /// Load and validate settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings: Settings =
            serde_json::from_str(&json).map_err(|source| SettingsError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        settings.validate()?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load settings, falling back to defaults on any failure
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path) {
            Ok(settings) => settings,
            Err(err) => {
                log::warn!("{err}; using default settings");
                Self::default()
            }
        }
    }
}
