//! The snake's trailing body
//!
//! Stored as a ring with a cursor on the oldest segment. Each tick the oldest
//! slot is overwritten with the cell the head just left and the cursor steps
//! back, so movement never shifts the whole body.

use super::directive::Directive;
use super::grid::{GridSpace, Position};
use crate::error::SimError;

/// Ring of body cells with a rotating "oldest slot" cursor
#[derive(Debug, Clone)]
pub struct SegmentChain {
    positions: Vec<Position>,
    /// Index of the oldest segment (the tail), overwritten by the next update
    cursor: usize,
}

impl SegmentChain {
    /// Build from cells ordered nearest-to-head first
    pub fn new(positions: Vec<Position>) -> Result<Self, SimError> {
        if positions.is_empty() {
            return Err(SimError::invalid("body needs at least one segment"));
        }
        let cursor = positions.len() - 1;
        Ok(Self { positions, cursor })
    }

    /// Straight body trailing `head` opposite to `heading`
    pub fn trailing(
        grid: &GridSpace,
        head: Position,
        heading: Directive,
        len: usize,
    ) -> Result<Self, SimError> {
        let back = heading.reverse_of().offset();
        let positions = (1..=len as i32)
            .map(|i| grid.step(head, back * i))
            .collect();
        Self::new(positions)
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Always false; a body keeps at least one segment
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Segment nearest to the head
    pub fn front(&self) -> Position {
        self.positions[(self.cursor + 1) % self.len()]
    }

    /// Oldest segment
    pub fn tail(&self) -> Position {
        self.positions[self.cursor]
    }

    /// Follow the head: the vacated head cell becomes the newest segment
    pub fn update(&mut self, new_pos: Position) {
        self.positions[self.cursor] = new_pos;
        self.cursor = if self.cursor == 0 {
            self.len() - 1
        } else {
            self.cursor - 1
        };
    }

    /// Add one segment past the tail, continuing the tail's line.
    ///
    /// A single-segment body has no line to continue, so the new segment is
    /// placed behind the tail opposite to `heading`. If that cell is `head`
    /// or already in the body, the first free neighbour of the tail (in
    /// [`Directive::ALL`] order) is used; with no free neighbour the segment
    /// is stacked on the tail and separates on the next update.
    pub fn grow(&mut self, grid: &GridSpace, heading: Directive, head: Position) {
        let tail = self.tail();
        let outward = if self.len() >= 2 {
            let second_to_last = self.positions[(self.cursor + self.len() - 1) % self.len()];
            grid.delta(second_to_last, tail)
        } else {
            heading.reverse_of().offset()
        };
        let is_free = |cell: Position| cell != head && !self.contains(cell);

        let extrapolated = grid.step(tail, outward);
        let new_tail = if is_free(extrapolated) {
            extrapolated
        } else {
            Directive::ALL
                .into_iter()
                .map(|d| grid.step(tail, d.offset()))
                .find(|&cell| is_free(cell))
                .unwrap_or(tail)
        };

        // Slot right after the cursor becomes the new oldest segment
        self.cursor += 1;
        self.positions.insert(self.cursor, new_tail);
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.positions.contains(&pos)
    }

    /// Cells ordered from nearest-to-head to tail
    pub fn iter(&self) -> impl Iterator<Item = Position> + '_ {
        let len = self.len();
        (1..=len).map(move |i| self.positions[(self.cursor + i) % len])
    }

    /// Owned copy of [`Self::iter`] for rendering
    pub fn positions(&self) -> Vec<Position> {
        self.iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: i32, y: i32) -> Position {
        Position::new(x, y)
    }

    fn chain(cells: &[(i32, i32)]) -> SegmentChain {
        SegmentChain::new(cells.iter().map(|&c| c.into()).collect()).unwrap()
    }

    #[test]
    fn test_empty_body_rejected() {
        assert!(SegmentChain::new(Vec::new()).is_err());
    }

    #[test]
    fn test_trailing_layout() {
        let grid = GridSpace::new(10, 10);
        let body = SegmentChain::trailing(&grid, p(5, 5), Directive::Right, 3).unwrap();
        assert_eq!(body.positions(), vec![p(4, 5), p(3, 5), p(2, 5)]);

        let body = SegmentChain::trailing(&grid, p(1, 0), Directive::Down, 2).unwrap();
        assert_eq!(body.positions(), vec![p(1, 9), p(1, 8)]);
    }

    #[test]
    fn test_update_follows_head() {
        let mut body = chain(&[(4, 5), (3, 5), (2, 5)]);
        body.update(p(5, 5));
        assert_eq!(body.len(), 3);
        assert_eq!(body.front(), p(5, 5));
        assert_eq!(body.tail(), p(3, 5));
        assert_eq!(body.positions(), vec![p(5, 5), p(4, 5), p(3, 5)]);

        body.update(p(6, 5));
        assert_eq!(body.positions(), vec![p(6, 5), p(5, 5), p(4, 5)]);

        // Cursor wraps from 0 back to the end
        body.update(p(7, 5));
        body.update(p(8, 5));
        assert_eq!(body.positions(), vec![p(8, 5), p(7, 5), p(6, 5)]);
    }

    #[test]
    fn test_grow_extrapolates_tail() {
        let grid = GridSpace::new(10, 10);
        let mut body = chain(&[(4, 5), (3, 5), (2, 5)]);
        body.update(p(5, 5));
        body.update(p(6, 5));
        let before = body.positions();

        body.grow(&grid, Directive::Right, p(9, 9));
        assert_eq!(body.len(), 4);
        assert_eq!(body.tail(), p(3, 5));
        assert!(before.iter().all(|&c| body.contains(c)));
        assert_eq!(body.positions(), vec![p(6, 5), p(5, 5), p(4, 5), p(3, 5)]);

        // The grown segment is the next one recycled
        body.update(p(7, 5));
        assert_eq!(body.positions(), vec![p(7, 5), p(6, 5), p(5, 5), p(4, 5)]);
    }

    #[test]
    fn test_grow_around_corner() {
        let grid = GridSpace::new(10, 10);
        // Tail runs vertically below a horizontal neck
        let mut body = chain(&[(4, 5), (3, 5), (3, 6)]);
        body.grow(&grid, Directive::Right, p(9, 9));
        assert_eq!(body.tail(), p(3, 7));
    }

    #[test]
    fn test_grow_across_seam() {
        let grid = GridSpace::new(10, 10);
        let mut body = chain(&[(1, 5), (0, 5)]);
        body.grow(&grid, Directive::Right, p(9, 9));
        assert_eq!(body.tail(), p(9, 5));
        body.grow(&grid, Directive::Right, p(9, 9));
        assert_eq!(body.tail(), p(8, 5));
        assert_eq!(body.positions(), vec![p(1, 5), p(0, 5), p(9, 5), p(8, 5)]);
    }

    #[test]
    fn test_grow_single_segment_uses_heading() {
        let grid = GridSpace::new(10, 10);
        let mut body = chain(&[(4, 5)]);
        body.grow(&grid, Directive::Up, p(9, 9));
        assert_eq!(body.len(), 2);
        assert_eq!(body.positions(), vec![p(4, 5), p(4, 6)]);

        body.update(p(4, 4));
        assert_eq!(body.positions(), vec![p(4, 4), p(4, 5)]);
    }

    #[test]
    fn test_grow_steps_aside_from_head() {
        let grid = GridSpace::new(10, 10);
        // Tail line points straight at the head
        let mut body = chain(&[(1, 3), (0, 3), (0, 2), (1, 2)]);
        body.grow(&grid, Directive::Up, p(2, 2));
        assert_eq!(body.len(), 5);
        assert_eq!(body.tail(), p(1, 1));
        assert!(!body.contains(p(2, 2)));
    }

    #[test]
    fn test_grow_steps_aside_from_body() {
        let grid = GridSpace::new(10, 10);
        // Extrapolated cell (2, 2) is the front of the body
        let mut body = chain(&[(2, 2), (2, 3), (1, 3), (0, 3), (0, 2), (1, 2)]);
        body.grow(&grid, Directive::Up, p(2, 1));
        assert_eq!(body.tail(), p(1, 1));
        let cells: std::collections::HashSet<_> = body.iter().collect();
        assert_eq!(cells.len(), body.len());
    }

    #[test]
    fn test_grow_stacks_when_boxed_in() {
        let grid = GridSpace::new(10, 10);
        // Every neighbour of the tail (1, 1) is head or body
        let mut body = chain(&[(0, 2), (1, 2), (2, 2), (2, 1), (2, 0), (1, 0), (1, 1)]);
        body.grow(&grid, Directive::Left, p(0, 1));
        assert_eq!(body.len(), 8);
        assert_eq!(body.tail(), p(1, 1));

        // The stacked segment is recycled first
        body.update(p(0, 0));
        assert_eq!(body.tail(), p(1, 1));
        assert_eq!(
            body.positions(),
            vec![p(0, 0), p(0, 2), p(1, 2), p(2, 2), p(2, 1), p(2, 0), p(1, 0), p(1, 1)]
        );
    }
}
