//! Ship orientation and straight-run placement geometry.

use crate::common::Coord;
use crate::config::BOARD_SIZE;

/// Orientation of a ship on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    /// Extends along increasing `x` from the origin.
    Horizontal,
    /// Extends along increasing `y` from the origin.
    Vertical,
}

/// A straight run of `length` cells starting at (`x`, `y`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShipPlacement {
    length: usize,
    x: usize,
    y: usize,
    orientation: Orientation,
}

impl ShipPlacement {
    pub const fn new(length: usize, x: usize, y: usize, orientation: Orientation) -> Self {
        Self {
            length,
            x,
            y,
            orientation,
        }
    }

    pub fn length(&self) -> usize {
        self.length
    }

    /// Origin of the run (x, y).
    pub fn origin(&self) -> Coord {
        (self.x, self.y)
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Returns `true` if every cell of the run lies on the board.
    pub fn fits(&self) -> bool {
        if self.length == 0 || self.x >= BOARD_SIZE || self.y >= BOARD_SIZE {
            return false;
        }
        match self.orientation {
            Orientation::Horizontal => self.x + self.length <= BOARD_SIZE,
            Orientation::Vertical => self.y + self.length <= BOARD_SIZE,
        }
    }

    /// Cells covered by the run, origin first.
    pub fn cells(&self) -> impl Iterator<Item = Coord> {
        let (x, y, orientation) = (self.x, self.y, self.orientation);
        (0..self.length).map(move |i| match orientation {
            Orientation::Horizontal => (x + i, y),
            Orientation::Vertical => (x, y + i),
        })
    }
}
