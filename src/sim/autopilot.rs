//! Idle/demo mode driver
//!
//! Greedy and stateless: heads for the food along the wrapped grid while
//! avoiding cells that would kill the snake on the next tick.

use std::cmp::Reverse;

use super::directive::Directive;
use super::grid::Position;
use super::state::GameState;

/// Pick a directive for the next tick, or `None` when every move is fatal
pub fn choose_directive(state: &GameState) -> Option<Directive> {
    let grid = &state.grid;
    let head = state.actor.position;
    let current = state.actor.directive;
    // The tail cell is vacated on the same tick the head moves
    let tail = state.body.tail();
    let blocked = |cell: Position| cell != tail && state.body.contains(cell);

    Directive::ALL
        .into_iter()
        .filter(|d| !d.is_opposite(current))
        .map(|d| (d, grid.step(head, d.offset())))
        .filter(|&(_, next)| !blocked(next))
        .min_by_key(|&(d, next)| {
            let to_food = grid.delta(next, state.forage.position);
            let distance = to_food.x.abs() + to_food.y.abs();
            let exits = Directive::ALL
                .iter()
                .filter(|e| {
                    let beyond = grid.step(next, e.offset());
                    beyond != head && !blocked(beyond)
                })
                .count();
            // Dead ends last, then closest to food, then roomiest, then straight on
            (exits == 0, distance, Reverse(exits), d != current)
        })
        .map(|(d, _)| d)
}
