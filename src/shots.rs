//! Set of coordinates one attacker has fired at, packed into a `u128`.

use crate::common::{Coord, ShotError};
use crate::config::BOARD_SIZE;

/// Grow-only set of fired coordinates.
///
/// Bit `y * BOARD_SIZE + x` is set once (`x`, `y`) has been fired at. There is
/// no removal operation.
#[derive(Clone, Copy, Default, PartialEq, Eq)]
pub struct ShotSet {
    bits: u128,
}

impl ShotSet {
    pub fn new() -> Self {
        Self { bits: 0 }
    }

    #[inline]
    fn index(x: usize, y: usize) -> Result<u32, ShotError> {
        if x >= BOARD_SIZE || y >= BOARD_SIZE {
            Err(ShotError::OutOfRange { x, y })
        } else {
            Ok((y * BOARD_SIZE + x) as u32)
        }
    }

    /// Returns `true` if (`x`, `y`) has been fired at. Off-board coordinates never are.
    pub fn contains(&self, x: usize, y: usize) -> bool {
        Self::index(x, y)
            .map(|idx| (self.bits >> idx) & 1 == 1)
            .unwrap_or(false)
    }

    /// Record (`x`, `y`); rejects off-board and repeated coordinates untouched.
    pub fn insert(&mut self, x: usize, y: usize) -> Result<(), ShotError> {
        let idx = Self::index(x, y)?;
        if (self.bits >> idx) & 1 == 1 {
            return Err(ShotError::AlreadyShot { x, y });
        }
        self.bits |= 1u128 << idx;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.bits.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    /// Fired coordinates as (x, y), row-major.
    pub fn iter(&self) -> impl Iterator<Item = Coord> + '_ {
        (0..BOARD_SIZE * BOARD_SIZE)
            .filter(move |&idx| (self.bits >> idx) & 1 == 1)
            .map(|idx| (idx % BOARD_SIZE, idx / BOARD_SIZE))
    }
}

impl core::fmt::Debug for ShotSet {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}
