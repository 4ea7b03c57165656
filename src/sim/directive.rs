//! Movement directives

use glam::IVec2;
use serde::{Deserialize, Serialize};

/// One of the four axis-aligned unit steps (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Directive {
    Up,
    Down,
    Left,
    Right,
}

impl Directive {
    pub const ALL: [Directive; 4] = [
        Directive::Up,
        Directive::Down,
        Directive::Left,
        Directive::Right,
    ];

    /// Unit displacement
    pub fn offset(self) -> IVec2 {
        match self {
            Directive::Up => IVec2::NEG_Y,
            Directive::Down => IVec2::Y,
            Directive::Left => IVec2::NEG_X,
            Directive::Right => IVec2::X,
        }
    }

    /// The antipodal direction
    pub fn reverse_of(self) -> Self {
        match self {
            Directive::Up => Directive::Down,
            Directive::Down => Directive::Up,
            Directive::Left => Directive::Right,
            Directive::Right => Directive::Left,
        }
    }

    /// True when the two directives cancel out
    pub fn is_opposite(self, other: Directive) -> bool {
        self.offset() + other.offset() == IVec2::ZERO
    }

    /// `requested` unless it would reverse `current`, in which case `current`
    pub fn try_set(current: Directive, requested: Directive) -> Directive {
        if current.is_opposite(requested) {
            current
        } else {
            requested
        }
    }
}
