//! Discrete simulation tick
//!
//! Core game loop step that advances the simulation deterministically.

use serde::{Deserialize, Serialize};

use super::autopilot;
use super::directive::Directive;
use super::grid::Position;
use super::state::{GamePhase, GameState};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Requested directive change, subject to the reversal rule and latch
    pub directive: Option<Directive>,
    /// Pause toggle
    pub pause: bool,
    /// Idle/demo mode - the autopilot steers
    pub idle_mode: bool,
}

impl TickInput {
    pub fn steer(directive: Directive) -> Self {
        Self {
            directive: Some(directive),
            ..Default::default()
        }
    }
}

/// Immutable snapshot handed to the presentation layer after each tick
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickResult {
    pub alive: bool,
    pub phase: GamePhase,
    pub head: Position,
    pub directive: Directive,
    /// Body cells, nearest-to-head first
    pub body: Vec<Position>,
    pub food: Position,
    pub score: u64,
    pub tick: u64,
}

impl TickResult {
    /// Head plus body length
    pub fn length(&self) -> usize {
        self.body.len() + 1
    }
}

/// Advance the game state by one tick
pub fn tick(state: &mut GameState, input: &TickInput) -> TickResult {
    // Handle pause toggle
    if input.pause {
        match state.phase {
            GamePhase::Playing => {
                state.phase = GamePhase::Paused;
                return state.snapshot();
            }
            GamePhase::Paused => state.phase = GamePhase::Playing,
            _ => {}
        }
    }

    // Don't tick if paused or over
    if state.phase != GamePhase::Playing {
        return state.snapshot();
    }

    let requested = if input.idle_mode && !state.directive_latched() {
        autopilot::choose_directive(state).or(input.directive)
    } else {
        input.directive
    };
    if let Some(directive) = requested {
        state.request_directive(directive);
    }

    // Head moves, body follows into the vacated cell
    let prior_head = state.actor.position;
    state.actor.advance(&state.grid);
    state.body.update(prior_head);

    let head = state.actor.position;
    if head == state.forage.position {
        state.body.grow(&state.grid, state.actor.directive, head);
        state.score += 1;
        match state.relocate_forage() {
            Ok(food) => log::debug!(
                "Ate at ({}, {}), length {}, food now at ({}, {})",
                head.x,
                head.y,
                state.body.len() + 1,
                food.x,
                food.y
            ),
            Err(err) => {
                log::info!("Session over after {} ticks: {err}", state.time_ticks + 1);
                state.phase = GamePhase::Saturated;
            }
        }
    }

    if state.body.contains(head) {
        log::info!(
            "Collision at ({}, {}) after {} ticks, score {}",
            head.x,
            head.y,
            state.time_ticks + 1,
            state.score
        );
        state.phase = GamePhase::Collided;
    }

    state.release_latch();
    state.time_ticks += 1;
    state.snapshot()
}
