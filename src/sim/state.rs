//! Game state and core simulation types
//!
//! Everything a session needs lives in [`GameState`]; the caller owns it and
//! advances it with [`super::tick`].

use std::collections::HashSet;

use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::body::SegmentChain;
use super::directive::Directive;
use super::grid::{GridSpace, Position};
use super::tick::TickResult;
use crate::consts::FORAGE_SAMPLE_ATTEMPTS;
use crate::error::SimError;
use crate::settings::Settings;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Snake is moving
    Playing,
    /// Ticks are ignored until unpaused
    Paused,
    /// Head ran into the body (terminal)
    Collided,
    /// No free cell left for food (terminal)
    Saturated,
}

impl GamePhase {
    /// Session has ended and will not resume without a reset
    pub fn is_terminal(self) -> bool {
        matches!(self, GamePhase::Collided | GamePhase::Saturated)
    }
}

/// The snake's head
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub position: Position,
    pub directive: Directive,
}

impl Actor {
    pub fn new(position: Position, directive: Directive) -> Self {
        Self {
            position,
            directive,
        }
    }

    /// Apply a requested directive unless it reverses the current one.
    /// Returns whether the request passed the reversal check.
    pub fn set_directive(&mut self, requested: Directive) -> bool {
        self.directive = Directive::try_set(self.directive, requested);
        self.directive == requested
    }

    /// Step one cell along the current directive
    pub fn advance(&mut self, grid: &GridSpace) {
        self.position = grid.step(self.position, self.directive.offset());
    }
}

/// The food item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Forage {
    pub position: Position,
}

impl Forage {
    pub fn new(position: Position) -> Self {
        Self { position }
    }

    /// Move to a uniformly random cell outside `forbidden`.
    ///
    /// Samples blindly first; if that keeps hitting occupied cells it picks
    /// from the enumerated free cells instead, so a crowded grid still
    /// terminates. Fails only when nothing is free.
    pub fn relocate<R: Rng + ?Sized>(
        &mut self,
        grid: &GridSpace,
        forbidden: &HashSet<Position>,
        rng: &mut R,
    ) -> Result<Position, SimError> {
        let occupied = forbidden.iter().filter(|&&p| grid.contains(p)).count();
        if occupied >= grid.cell_count() {
            return Err(SimError::GridSaturated);
        }

        for _ in 0..FORAGE_SAMPLE_ATTEMPTS {
            let candidate = Position::new(
                rng.random_range(0..grid.width),
                rng.random_range(0..grid.height),
            );
            if !forbidden.contains(&candidate) {
                self.position = candidate;
                return Ok(candidate);
            }
        }

        let free: Vec<Position> = grid.cells().filter(|p| !forbidden.contains(p)).collect();
        let chosen = *free.choose(rng).ok_or(SimError::GridSaturated)?;
        self.position = chosen;
        Ok(chosen)
    }
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Settings the session was built from
    pub settings: Settings,
    /// Grid derived from settings
    pub grid: GridSpace,
    /// Seed the RNG started from
    pub seed: u64,
    pub actor: Actor,
    pub body: SegmentChain,
    pub forage: Forage,
    pub phase: GamePhase,
    /// Food items eaten this session
    pub score: u64,
    /// Ticks simulated this session
    pub time_ticks: u64,
    /// Set once a directive change has been accepted this tick
    directive_latched: bool,
    rng: Pcg32,
}

impl GameState {
    /// Start a session with the standard layout: head centered, body trailing
    /// to the left, moving right.
    pub fn new(settings: Settings) -> Result<Self, SimError> {
        settings.validate()?;
        let grid = settings.grid();
        let seed = settings.seed.unwrap_or_else(rand::random);
        let (actor, body) = initial_layout(&grid, settings.initial_length)?;

        let mut state = Self {
            settings,
            grid,
            seed,
            actor,
            body,
            forage: Forage::new(Position::new(0, 0)),
            phase: GamePhase::Playing,
            score: 0,
            time_ticks: 0,
            directive_latched: false,
            rng: Pcg32::seed_from_u64(seed),
        };
        state.relocate_forage()?;
        log::info!(
            "New session on {}x{} grid (seed {seed})",
            grid.width,
            grid.height
        );
        Ok(state)
    }

    /// Start a session from an explicit layout (scripted scenarios, replays)
    pub fn with_layout(
        settings: Settings,
        head: Position,
        directive: Directive,
        body: Vec<Position>,
        food: Position,
    ) -> Result<Self, SimError> {
        let mut state = Self::new(settings)?;
        let grid = state.grid;

        let all_in_grid = std::iter::once(head)
            .chain(body.iter().copied())
            .chain(std::iter::once(food))
            .all(|p| grid.contains(p));
        if !all_in_grid {
            return Err(SimError::invalid("layout has cells outside the grid"));
        }
        if body.contains(&head) || body.contains(&food) || head == food {
            return Err(SimError::invalid("layout overlaps food, head, or body"));
        }
        let distinct: HashSet<Position> = body.iter().copied().collect();
        if distinct.len() != body.len() {
            return Err(SimError::invalid("body repeats a cell"));
        }
        // Head and body must form one chain of wrapped single steps
        let connected = std::iter::once(head)
            .chain(body.iter().copied())
            .zip(body.iter().copied())
            .all(|(a, b)| {
                let d = grid.delta(a, b);
                d.x.abs() + d.y.abs() == 1
            });
        if !connected {
            return Err(SimError::invalid("body cells are not adjacent"));
        }

        state.actor = Actor::new(head, directive);
        state.body = SegmentChain::new(body)?;
        state.forage = Forage::new(food);
        Ok(state)
    }

    /// Begin a new session with the standard layout.
    ///
    /// The RNG keeps running, so consecutive sessions get different food.
    pub fn reset(&mut self) {
        // Settings were validated at construction, so the layout always fits
        match initial_layout(&self.grid, self.settings.initial_length) {
            Ok((actor, body)) => {
                self.actor = actor;
                self.body = body;
            }
            Err(err) => {
                debug_assert!(false, "validated settings produced no layout: {err}");
                log::error!("Cannot rebuild starting layout: {err}");
            }
        }
        self.phase = GamePhase::Playing;
        self.score = 0;
        self.time_ticks = 0;
        self.directive_latched = false;
        if self.relocate_forage().is_err() {
            self.phase = GamePhase::Saturated;
        }
        log::info!("Session reset");
    }

    /// Snake has not collided and the grid is not full
    pub fn is_alive(&self) -> bool {
        !self.phase.is_terminal()
    }

    /// Whether a directive change has been accepted since the last tick
    pub fn directive_latched(&self) -> bool {
        self.directive_latched
    }

    /// Request a new directive.
    ///
    /// Only the first request that passes the reversal check between two
    /// ticks is applied; the rest are dropped. Returns whether this request
    /// was applied.
    pub fn request_directive(&mut self, requested: Directive) -> bool {
        if self.directive_latched || self.phase != GamePhase::Playing {
            return false;
        }
        let accepted = self.actor.set_directive(requested);
        self.directive_latched = accepted;
        accepted
    }

    /// Re-arm directive changes for the next tick
    pub(crate) fn release_latch(&mut self) {
        self.directive_latched = false;
    }

    /// Cells taken by head and body
    pub fn occupied(&self) -> HashSet<Position> {
        std::iter::once(self.actor.position)
            .chain(self.body.iter())
            .collect()
    }

    /// Place the food on a free cell
    pub(crate) fn relocate_forage(&mut self) -> Result<Position, SimError> {
        let forbidden = self.occupied();
        self.forage.relocate(&self.grid, &forbidden, &mut self.rng)
    }

    /// Read-only view for rendering
    pub fn snapshot(&self) -> TickResult {
        TickResult {
            alive: self.is_alive(),
            phase: self.phase,
            head: self.actor.position,
            directive: self.actor.directive,
            body: self.body.positions(),
            food: self.forage.position,
            score: self.score,
            tick: self.time_ticks,
        }
    }
}

fn initial_layout(grid: &GridSpace, len: usize) -> Result<(Actor, SegmentChain), SimError> {
    let actor = Actor::new(grid.center(), Directive::Right);
    let body = SegmentChain::trailing(grid, actor.position, actor.directive, len)?;
    Ok((actor, body))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn p(x: i32, y: i32) -> Position {
        Position::new(x, y)
    }

    fn seeded(width: i32, height: i32, seed: u64) -> Settings {
        let mut settings = Settings::with_grid(width, height);
        settings.seed = Some(seed);
        settings
    }

    #[test]
    fn test_initial_layout() {
        let state = GameState::new(seeded(10, 10, 1)).unwrap();
        assert_eq!(state.actor.position, p(5, 5));
        assert_eq!(state.actor.directive, Directive::Right);
        assert_eq!(state.body.positions(), vec![p(4, 5), p(3, 5), p(2, 5)]);
        assert!(!state.occupied().contains(&state.forage.position));
        assert!(state.is_alive());
    }

    #[test]
    fn test_new_rejects_invalid_settings() {
        assert!(GameState::new(Settings::with_grid(3, 3)).is_err());
    }

    #[test]
    fn test_actor_advance_wraps() {
        let grid = GridSpace::new(10, 10);
        let mut actor = Actor::new(p(9, 0), Directive::Right);
        actor.advance(&grid);
        assert_eq!(actor.position, p(0, 0));
        assert!(actor.set_directive(Directive::Up));
        actor.advance(&grid);
        assert_eq!(actor.position, p(0, 9));
    }

    #[test]
    fn test_actor_rejects_reversal() {
        let mut actor = Actor::new(p(5, 5), Directive::Right);
        assert!(!actor.set_directive(Directive::Left));
        assert_eq!(actor.directive, Directive::Right);
    }

    #[test]
    fn test_latch_keeps_first_request() {
        let mut state = GameState::new(seeded(10, 10, 1)).unwrap();
        assert!(state.request_directive(Directive::Up));
        assert!(!state.request_directive(Directive::Left));
        assert_eq!(state.actor.directive, Directive::Up);
        assert!(state.directive_latched());
    }

    #[test]
    fn test_rejected_reversal_does_not_latch() {
        let mut state = GameState::new(seeded(10, 10, 1)).unwrap();
        assert!(!state.request_directive(Directive::Left));
        assert!(!state.directive_latched());
        assert!(state.request_directive(Directive::Down));
        assert_eq!(state.actor.directive, Directive::Down);
    }

    #[test]
    fn test_relocate_saturated_grid() {
        let grid = GridSpace::new(5, 5);
        let forbidden: HashSet<Position> = grid.cells().collect();
        let mut forage = Forage::new(p(0, 0));
        let mut rng = Pcg32::seed_from_u64(3);
        assert_eq!(
            forage.relocate(&grid, &forbidden, &mut rng),
            Err(SimError::GridSaturated)
        );
    }

    #[test]
    fn test_relocate_finds_last_free_cell() {
        let grid = GridSpace::new(5, 5);
        let forbidden: HashSet<Position> = grid.cells().filter(|&c| c != p(3, 2)).collect();
        let mut forage = Forage::new(p(0, 0));
        let mut rng = Pcg32::seed_from_u64(3);
        assert_eq!(forage.relocate(&grid, &forbidden, &mut rng), Ok(p(3, 2)));
        assert_eq!(forage.position, p(3, 2));
    }

    #[test]
    fn test_with_layout_rejects_overlap() {
        let settings = seeded(10, 10, 1);
        let err = GameState::with_layout(
            settings.clone(),
            p(5, 5),
            Directive::Right,
            vec![p(4, 5)],
            p(4, 5),
        );
        assert!(err.is_err());
        let err = GameState::with_layout(
            settings.clone(),
            p(5, 5),
            Directive::Right,
            vec![p(4, 5)],
            p(12, 5),
        );
        assert!(err.is_err());

        // Repeated body cell
        let err = GameState::with_layout(
            settings.clone(),
            p(5, 5),
            Directive::Right,
            vec![p(4, 5), p(4, 5), p(8, 8)],
            p(0, 0),
        );
        assert!(matches!(err, Err(SimError::InvalidConfiguration { .. })));

        // Gap between segments
        let err = GameState::with_layout(
            settings.clone(),
            p(5, 5),
            Directive::Right,
            vec![p(4, 5), p(8, 8)],
            p(0, 0),
        );
        assert!(matches!(err, Err(SimError::InvalidConfiguration { .. })));

        // Body detached from the head
        let err = GameState::with_layout(
            settings.clone(),
            p(5, 5),
            Directive::Right,
            vec![p(3, 5), p(2, 5)],
            p(0, 0),
        );
        assert!(err.is_err());
    }

    #[test]
    fn test_with_layout_accepts_body_across_seam() {
        let state = GameState::with_layout(
            seeded(10, 10, 1),
            p(0, 5),
            Directive::Right,
            vec![p(9, 5), p(8, 5)],
            p(4, 4),
        )
        .unwrap();
        assert_eq!(state.body.positions(), vec![p(9, 5), p(8, 5)]);
    }

    #[test]
    fn test_reset_restores_layout() {
        let mut state = GameState::new(seeded(10, 10, 9)).unwrap();
        state.phase = GamePhase::Collided;
        state.score = 4;
        state.actor.position = p(1, 1);
        state.reset();
        assert!(state.is_alive());
        assert_eq!(state.score, 0);
        assert_eq!(state.actor.position, p(5, 5));
        assert_eq!(state.body.len(), 3);
        assert!(!state.occupied().contains(&state.forage.position));
    }

    proptest! {
        #[test]
        fn prop_food_never_overlaps(
            seed in any::<u64>(),
            blocked in proptest::collection::hash_set((0i32..8, 0i32..6), 0..40),
        ) {
            let grid = GridSpace::new(8, 6);
            let forbidden: HashSet<Position> = blocked.into_iter().map(Position::from).collect();
            let mut forage = Forage::new(p(0, 0));
            let mut rng = Pcg32::seed_from_u64(seed);
            let placed = forage.relocate(&grid, &forbidden, &mut rng).unwrap();
            prop_assert!(!forbidden.contains(&placed));
            prop_assert!(grid.contains(placed));
        }
    }
}
