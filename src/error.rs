//! Error types for simulation setup and settings loading

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the simulation core.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SimError {
    /// Settings cannot host a playable session.
    #[error("invalid configuration: {reason}")]
    InvalidConfiguration { reason: String },
    /// Every grid cell is occupied, so no food can be placed.
    #[error("grid saturated: no free cell left for food")]
    GridSaturated,
}

impl SimError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        SimError::InvalidConfiguration {
            reason: reason.into(),
        }
    }
}

/// Errors raised while loading settings from disk.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings from {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse settings from {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    Invalid(#[from] SimError),
}
