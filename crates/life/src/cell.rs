//! Cell state for the life grid.

use std::fmt;

/// Discriminant values are the bytes the renderer reads from `cells_ptr` — do not reorder.
#[repr(u8)]
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub enum Cell {
    #[default]
    Dead = 0,
    Alive = 1,
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dead => write!(f, "."),
            Self::Alive => write!(f, "#"),
        }
    }
}

impl From<bool> for Cell {
    fn from(alive: bool) -> Self {
        if alive {
            Self::Alive
        } else {
            Self::Dead
        }
    }
}

impl Cell {
    #[must_use]
    pub fn is_alive(self) -> bool {
        self == Self::Alive
    }

    /// Alive becomes dead and dead becomes alive.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Dead => Self::Alive,
            Self::Alive => Self::Dead,
        }
    }
}
