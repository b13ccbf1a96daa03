//! Game board grid and randomized fleet placement.

use crate::common::{Cell, Coord, PlacementError};
use crate::config::{FleetSpec, RuleSet, BOARD_SIZE, PLACEMENT_ATTEMPTS};
use crate::ship::{Orientation, ShipPlacement};
use core::fmt;
use rand::Rng;

type Grid = [[Cell; BOARD_SIZE]; BOARD_SIZE];

/// A 10×10 grid of cells, indexed as `(x, y)` with `y` the row.
#[derive(Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Board {
    cells: Grid,
}

impl Board {
    /// Create an all-water board.
    pub fn new() -> Self {
        Board {
            cells: [[Cell::Water; BOARD_SIZE]; BOARD_SIZE],
        }
    }

    /// Cell at (`x`, `y`), or `None` off the board.
    pub fn cell(&self, x: usize, y: usize) -> Option<Cell> {
        self.cells.get(y).and_then(|row| row.get(x)).copied()
    }

    pub(crate) fn set(&mut self, x: usize, y: usize, cell: Cell) {
        self.cells[y][x] = cell;
    }

    /// Immutable view of the rows, row 0 first.
    pub fn rows(&self) -> &Grid {
        &self.cells
    }

    /// Number of cells currently in state `cell`.
    pub fn count(&self, cell: Cell) -> usize {
        self.cells
            .iter()
            .flat_map(|row| row.iter())
            .filter(|&&c| c == cell)
            .count()
    }

    /// Copy of the board as the opponent may see it: intact ship cells read as water.
    pub fn fogged(&self) -> Board {
        let mut out = *self;
        for row in out.cells.iter_mut() {
            for cell in row.iter_mut() {
                if *cell == Cell::Ship {
                    *cell = Cell::Water;
                }
            }
        }
        out
    }

    /// Validate a run against bounds, occupancy and, if required, spacing.
    pub fn check_placement(
        &self,
        placement: &ShipPlacement,
        adjacency_required: bool,
    ) -> Result<(), PlacementError> {
        if !placement.fits() {
            return Err(PlacementError::OutOfBounds);
        }
        if placement
            .cells()
            .any(|(x, y)| self.cells[y][x] != Cell::Water)
        {
            return Err(PlacementError::Overlaps);
        }
        if adjacency_required
            && placement.cells().any(|(x, y)| {
                neighbours8(x, y).any(|(nx, ny)| self.cells[ny][nx] != Cell::Water)
            })
        {
            return Err(PlacementError::TooClose);
        }
        Ok(())
    }

    /// Returns `true` if the run can be placed.
    pub fn can_place(&self, placement: &ShipPlacement, adjacency_required: bool) -> bool {
        self.check_placement(placement, adjacency_required).is_ok()
    }

    /// Mark every cell of a validated run as ship.
    pub fn place(
        &mut self,
        placement: &ShipPlacement,
        adjacency_required: bool,
    ) -> Result<(), PlacementError> {
        self.check_placement(placement, adjacency_required)?;
        for (x, y) in placement.cells() {
            self.cells[y][x] = Cell::Ship;
        }
        Ok(())
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Board:")?;
        for row in self.cells.iter() {
            for cell in row.iter() {
                let c = match cell {
                    Cell::Water => '.',
                    Cell::Ship => '#',
                    Cell::Hit => 'X',
                    Cell::Miss => 'o',
                };
                write!(f, "{}", c)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// The up to eight on-board neighbours of (`x`, `y`).
pub(crate) fn neighbours8(x: usize, y: usize) -> impl Iterator<Item = Coord> {
    let xs = x.saturating_sub(1)..=(x + 1).min(BOARD_SIZE - 1);
    xs.flat_map(move |nx| {
        (y.saturating_sub(1)..=(y + 1).min(BOARD_SIZE - 1)).map(move |ny| (nx, ny))
    })
    .filter(move |&(nx, ny)| (nx, ny) != (x, y))
}

/// Randomized fleet placement under one rule-set.
#[derive(Debug, Clone, Copy)]
pub struct BoardGenerator<'a> {
    fleet: &'a FleetSpec,
    adjacency_required: bool,
    attempts: u32,
}

impl<'a> BoardGenerator<'a> {
    pub fn new(fleet: &'a FleetSpec, adjacency_required: bool) -> Self {
        Self {
            fleet,
            adjacency_required,
            attempts: PLACEMENT_ATTEMPTS,
        }
    }

    pub fn from_rules(rules: &'a RuleSet) -> Self {
        Self::new(&rules.fleet, rules.adjacency_required).with_attempts(rules.placement_attempts)
    }

    /// Override the per-ship attempt bound.
    pub fn with_attempts(mut self, attempts: u32) -> Self {
        self.attempts = attempts;
        self
    }

    /// Run one generation pass on an empty board.
    ///
    /// Fails as soon as any ship cannot be placed within the attempt bound;
    /// the partial board is dropped.
    pub fn generate<R: Rng>(&self, rng: &mut R) -> Result<Board, PlacementError> {
        let mut board = Board::new();
        for class in self.fleet {
            if class.length == 0 || class.length > BOARD_SIZE {
                return Err(PlacementError::InvalidLength {
                    length: class.length,
                });
            }
            for _ in 0..class.count {
                self.place_one(&mut board, class.length, rng)?;
            }
        }
        Ok(board)
    }

    /// Repeat whole passes, each from an empty board, until one succeeds.
    pub fn generate_with_retries<R: Rng>(
        &self,
        retries: u32,
        rng: &mut R,
    ) -> Result<Board, PlacementError> {
        let mut pass = 1;
        loop {
            match self.generate(rng) {
                Ok(board) => return Ok(board),
                Err(err @ PlacementError::InvalidLength { .. }) => return Err(err),
                Err(err) if pass > retries => return Err(err),
                Err(err) => {
                    log::warn!("board generation pass {} failed: {}; restarting", pass, err);
                    pass += 1;
                }
            }
        }
    }

    fn place_one<R: Rng>(
        &self,
        board: &mut Board,
        length: usize,
        rng: &mut R,
    ) -> Result<(), PlacementError> {
        for _ in 0..self.attempts {
            let orientation = if rng.random() {
                Orientation::Horizontal
            } else {
                Orientation::Vertical
            };
            let max_x = match orientation {
                Orientation::Horizontal => BOARD_SIZE - length,
                Orientation::Vertical => BOARD_SIZE - 1,
            };
            let max_y = match orientation {
                Orientation::Horizontal => BOARD_SIZE - 1,
                Orientation::Vertical => BOARD_SIZE - length,
            };
            let x = rng.random_range(0..=max_x);
            let y = rng.random_range(0..=max_y);
            let placement = ShipPlacement::new(length, x, y, orientation);
            if board.place(&placement, self.adjacency_required).is_ok() {
                return Ok(());
            }
        }
        Err(PlacementError::Exhausted {
            length,
            attempts: self.attempts,
        })
    }
}

/// Single-pass generation, see [`BoardGenerator::generate`].
pub fn generate<R: Rng>(
    fleet: &FleetSpec,
    adjacency_required: bool,
    rng: &mut R,
) -> Result<Board, PlacementError> {
    BoardGenerator::new(fleet, adjacency_required).generate(rng)
}

/// Supplies freshly populated boards to newly started games.
pub trait BoardSource: Send + Sync {
    fn generate(&self) -> Result<Board, PlacementError>;
}

/// A fixed layout handed out to every game.
impl BoardSource for Board {
    fn generate(&self) -> Result<Board, PlacementError> {
        Ok(*self)
    }
}

/// Boards generated from the thread-local random source.
#[cfg(feature = "std")]
#[derive(Debug, Clone, Default)]
pub struct RandomBoards {
    rules: RuleSet,
}

#[cfg(feature = "std")]
impl RandomBoards {
    pub fn new(rules: RuleSet) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }
}

#[cfg(feature = "std")]
impl BoardSource for RandomBoards {
    fn generate(&self) -> Result<Board, PlacementError> {
        BoardGenerator::from_rules(&self.rules)
            .generate_with_retries(self.rules.generation_retries, &mut rand::rng())
    }
}

/// Boards generated from one seeded generator, reproducible for a fixed call order.
#[cfg(feature = "std")]
pub struct SeededBoards {
    rules: RuleSet,
    rng: parking_lot::Mutex<rand::rngs::SmallRng>,
}

#[cfg(feature = "std")]
impl SeededBoards {
    pub fn new(rules: RuleSet, seed: u64) -> Self {
        use rand::SeedableRng;
        Self {
            rules,
            rng: parking_lot::Mutex::new(rand::rngs::SmallRng::seed_from_u64(seed)),
        }
    }
}

#[cfg(feature = "std")]
impl BoardSource for SeededBoards {
    fn generate(&self) -> Result<Board, PlacementError> {
        let mut rng = self.rng.lock();
        BoardGenerator::from_rules(&self.rules)
            .generate_with_retries(self.rules.generation_retries, &mut *rng)
    }
}
