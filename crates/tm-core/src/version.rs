//! Version identifiers, migration direction, and run targets.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Strongly-typed migration version identifier.
///
/// Unit identifiers are creation timestamps by convention, so the inner value
/// is a `u64`. `Version::ZERO` is the marker value meaning "nothing applied".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Version(u64);

impl Version {
    /// Marker value before any migration has been applied.
    pub const ZERO: Version = Version(0);

    /// Wrap a raw identifier.
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Return the raw identifier.
    pub const fn get(self) -> u64 {
        self.0
    }

    /// True for the "nothing applied" marker.
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }
}

impl From<u64> for Version {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Version {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u64>().map(Version)
    }
}

/// Direction a migration unit is driven in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Apply the unit's forward transformation
    Up,
    /// Reverse the unit's transformation
    Down,
}

impl Direction {
    /// Command-line flag that selects this direction in a unit.
    pub fn flag(self) -> &'static str {
        match self {
            Direction::Up => "-up",
            Direction::Down => "-down",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Up => write!(f, "up"),
            Direction::Down => write!(f, "down"),
        }
    }
}

/// Version a run should stop at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Target {
    /// Go as far as the catalog allows (newest for upgrades, nothing for downgrades)
    #[default]
    Full,
    /// Stop at this version
    Exact(Version),
}

impl Target {
    /// Build a target from an optional CLI value.
    pub fn from_option(version: Option<u64>) -> Self {
        version.map_or(Target::Full, |v| Target::Exact(Version::new(v)))
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Full => write!(f, "full"),
            Target::Exact(v) => write!(f, "{}", v),
        }
    }
}
