//! Common types for seabattle: cells, identities, shot results and errors.

use core::fmt;

/// State of a single board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Cell {
    /// Open sea, never fired at.
    #[default]
    Water,
    /// Intact ship segment.
    Ship,
    /// Ship segment that has been fired at.
    Hit,
    /// Water that has been fired at.
    Miss,
}

/// Board coordinate `(x, y)`; `x` is the column, `y` the row.
pub type Coord = (usize, usize);

/// Opaque identity of a player, assigned by the surrounding application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerId(pub u64);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque reference to the channel a player talks to us through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct ChannelRef(pub i64);

/// Raw result of a single shot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum ShotOutcome {
    Hit,
    Miss,
}

/// Shot result plus the sunk and win checks evaluated right after it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct ShotReport {
    pub outcome: ShotOutcome,
    /// The ship owning the target cell has every segment hit.
    pub sunk: bool,
    /// The defending board has no intact ship segment left.
    pub win: bool,
}

/// Errors raised while putting ships on a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementError {
    /// Ship length is zero or longer than the board.
    InvalidLength { length: usize },
    /// Ship run leaves the board.
    OutOfBounds,
    /// Ship run covers a cell that is not water.
    Overlaps,
    /// Ship run touches another ship while the adjacency rule is active.
    TooClose,
    /// Randomized placement gave up on a ship after the attempt bound.
    Exhausted { length: usize, attempts: u32 },
}

impl fmt::Display for PlacementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlacementError::InvalidLength { length } => {
                write!(f, "Ship length {} does not fit on the board", length)
            }
            PlacementError::OutOfBounds => write!(f, "Ship placement is out of bounds"),
            PlacementError::Overlaps => write!(f, "Ship placement overlaps with another ship"),
            PlacementError::TooClose => write!(f, "Ship placement touches another ship"),
            PlacementError::Exhausted { length, attempts } => write!(
                f,
                "Unable to place ship of length {} after {} attempts",
                length, attempts
            ),
        }
    }
}

/// Errors returned when resolving a shot against a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShotError {
    /// Coordinate outside `[0, BOARD_SIZE)`.
    OutOfRange { x: usize, y: usize },
    /// The attacker already fired at this coordinate.
    AlreadyShot { x: usize, y: usize },
}

impl fmt::Display for ShotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShotError::OutOfRange { x, y } => write!(f, "Coordinate ({}, {}) is out of range", x, y),
            ShotError::AlreadyShot { x, y } => {
                write!(f, "Coordinate ({}, {}) was already fired at", x, y)
            }
        }
    }
}

/// Errors returned by the per-match state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameError {
    Placement(PlacementError),
    Shot(ShotError),
    /// Caller is not one of the two participants.
    NotInGame,
    /// Caller does not hold the turn.
    WrongTurn,
    /// Joiner is the waiting game's owner.
    SelfJoin,
    /// Match already reached its terminal state.
    Finished,
}

impl From<PlacementError> for GameError {
    fn from(err: PlacementError) -> Self {
        GameError::Placement(err)
    }
}

impl From<ShotError> for GameError {
    fn from(err: ShotError) -> Self {
        GameError::Shot(err)
    }
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::Placement(e) => write!(f, "Board generation failed: {}", e),
            GameError::Shot(e) => write!(f, "{}", e),
            GameError::NotInGame => write!(f, "Player is not part of this game"),
            GameError::WrongTurn => write!(f, "It is not this player's turn"),
            GameError::SelfJoin => write!(f, "Player cannot join their own game"),
            GameError::Finished => write!(f, "Game is already finished"),
        }
    }
}

/// Errors surfaced to collaborators by the session registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryError {
    Placement(PlacementError),
    /// Player already holds a waiting entry or a seat in an active session.
    AlreadyInGame,
    /// Unknown waiting token or session key, or the session has finished.
    NotFound,
    SelfJoin,
    NotInGame,
    WrongTurn,
    OutOfRange { x: usize, y: usize },
    AlreadyShot { x: usize, y: usize },
}

impl From<GameError> for RegistryError {
    fn from(err: GameError) -> Self {
        match err {
            GameError::Placement(e) => RegistryError::Placement(e),
            GameError::Shot(ShotError::OutOfRange { x, y }) => RegistryError::OutOfRange { x, y },
            GameError::Shot(ShotError::AlreadyShot { x, y }) => {
                RegistryError::AlreadyShot { x, y }
            }
            GameError::NotInGame => RegistryError::NotInGame,
            GameError::WrongTurn => RegistryError::WrongTurn,
            GameError::SelfJoin => RegistryError::SelfJoin,
            GameError::Finished => RegistryError::NotFound,
        }
    }
}

impl From<PlacementError> for RegistryError {
    fn from(err: PlacementError) -> Self {
        RegistryError::Placement(err)
    }
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryError::Placement(e) => write!(f, "Board generation failed: {}", e),
            RegistryError::AlreadyInGame => write!(f, "Player is already in another game"),
            RegistryError::NotFound => write!(f, "Game not found or already started"),
            RegistryError::SelfJoin => write!(f, "Player cannot join their own game"),
            RegistryError::NotInGame => write!(f, "Player is not in a game"),
            RegistryError::WrongTurn => write!(f, "It is not this player's turn"),
            RegistryError::OutOfRange { x, y } => {
                write!(f, "Coordinate ({}, {}) is out of range", x, y)
            }
            RegistryError::AlreadyShot { x, y } => {
                write!(f, "Coordinate ({}, {}) was already fired at", x, y)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for PlacementError {}
#[cfg(feature = "std")]
impl std::error::Error for ShotError {}
#[cfg(feature = "std")]
impl std::error::Error for GameError {}
#[cfg(feature = "std")]
impl std::error::Error for RegistryError {}
