use alloc::vec::Vec;

/// Side length of the square board.
pub const BOARD_SIZE: usize = 10;

/// Randomized attempts per ship before a generation pass gives up.
pub const PLACEMENT_ATTEMPTS: u32 = 100;

/// Whole-board restarts tried before a generation failure is reported.
pub const GENERATION_RETRIES: u32 = 20;

/// A run of identical ships in a fleet: `count` ships of `length` cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct ShipClass {
    pub length: usize,
    pub count: usize,
}

impl ShipClass {
    pub const fn new(length: usize, count: usize) -> Self {
        Self { length, count }
    }

    /// Ship cells contributed by this class.
    pub const fn cells(&self) -> usize {
        self.length * self.count
    }
}

/// Ordered fleet composition, one entry per ship class.
pub type FleetSpec = [ShipClass];

/// Classic composition: one 4, two 3s, three 2s and four 1s.
pub const CLASSIC_FLEET: [ShipClass; 4] = [
    ShipClass::new(4, 1),
    ShipClass::new(3, 2),
    ShipClass::new(2, 3),
    ShipClass::new(1, 4),
];

/// Total number of ship segments in the classic composition.
pub const CLASSIC_SHIP_CELLS: usize = 4 + 3 + 3 + 2 + 2 + 2 + 1 + 1 + 1 + 1;

/// Sum of `length × count` over a fleet.
pub fn fleet_cells(fleet: &FleetSpec) -> usize {
    fleet.iter().map(ShipClass::cells).sum()
}

/// Named rule-set variants selectable from configuration or the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize, clap::ValueEnum))]
#[cfg_attr(feature = "std", serde(rename_all = "lowercase"))]
pub enum RuleVariant {
    /// Classic fleet, ships may not touch even diagonally.
    #[default]
    Classic,
    /// Classic fleet, ships only may not overlap.
    Loose,
}

impl RuleVariant {
    pub fn rules(self) -> RuleSet {
        match self {
            RuleVariant::Classic => RuleSet::classic(),
            RuleVariant::Loose => RuleSet::loose(),
        }
    }
}

/// Placement rules a board is generated under.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct RuleSet {
    pub fleet: Vec<ShipClass>,
    pub adjacency_required: bool,
    #[cfg_attr(feature = "std", serde(default = "default_attempts"))]
    pub placement_attempts: u32,
    #[cfg_attr(feature = "std", serde(default = "default_retries"))]
    pub generation_retries: u32,
}

#[cfg(feature = "std")]
fn default_attempts() -> u32 {
    PLACEMENT_ATTEMPTS
}

#[cfg(feature = "std")]
fn default_retries() -> u32 {
    GENERATION_RETRIES
}

impl RuleSet {
    pub fn new(fleet: &FleetSpec, adjacency_required: bool) -> Self {
        Self {
            fleet: fleet.to_vec(),
            adjacency_required,
            placement_attempts: PLACEMENT_ATTEMPTS,
            generation_retries: GENERATION_RETRIES,
        }
    }

    pub fn classic() -> Self {
        Self::new(&CLASSIC_FLEET, true)
    }

    pub fn loose() -> Self {
        Self::new(&CLASSIC_FLEET, false)
    }

    /// Ship cells every board generated under these rules carries.
    pub fn ship_cells(&self) -> usize {
        fleet_cells(&self.fleet)
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::classic()
    }
}
