//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Discrete ticks only
//! - Seeded RNG only
//! - No rendering, sleeping, or I/O

pub mod autopilot;
pub mod body;
pub mod directive;
pub mod grid;
pub mod state;
pub mod tick;

pub use autopilot::choose_directive;
pub use body::SegmentChain;
pub use directive::Directive;
pub use grid::{GridSpace, Position};
pub use state::{Actor, Forage, GamePhase, GameState};
pub use tick::{TickInput, TickResult, tick};
