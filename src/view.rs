//! Text presentation of simulation snapshots
//!
//! Only reads [`TickResult`]; never touches the simulation state.

use crate::sim::{Directive, GamePhase, GridSpace, TickResult};

const EMPTY_CHAR: char = '.';
const BODY_CHAR: char = '#';
const FOOD_CHAR: char = '*';
const DEAD_HEAD_CHAR: char = 'X';

/// Glyph for the head facing `directive`
pub fn head_char(directive: Directive) -> char {
    match directive {
        Directive::Up => '^',
        Directive::Down => 'v',
        Directive::Left => '<',
        Directive::Right => '>',
    }
}

/// Draw the grid, one text row per grid row
pub fn render_frame(grid: &GridSpace, result: &TickResult) -> String {
    let width = grid.width as usize;
    let mut cells = vec![EMPTY_CHAR; grid.cell_count()];
    let index = |x: i32, y: i32| y as usize * width + x as usize;

    cells[index(result.food.x, result.food.y)] = FOOD_CHAR;
    for pos in &result.body {
        cells[index(pos.x, pos.y)] = BODY_CHAR;
    }
    // Head drawn last so a collision shows where it happened
    cells[index(result.head.x, result.head.y)] = if result.phase == GamePhase::Collided {
        DEAD_HEAD_CHAR
    } else {
        head_char(result.directive)
    };

    let mut out = String::with_capacity(grid.cell_count() + grid.height as usize);
    for row in cells.chunks(width) {
        out.extend(row);
        out.push('\n');
    }
    out
}

/// One-line summary under the grid
pub fn status_line(result: &TickResult) -> String {
    let state = match result.phase {
        GamePhase::Playing => "playing",
        GamePhase::Paused => "paused",
        GamePhase::Collided => "game over",
        GamePhase::Saturated => "grid full - you won!",
    };
    format!(
        "tick {:>5}  score {:>3}  length {:>3}  {}",
        result.tick,
        result.score,
        result.length(),
        state
    )
}
