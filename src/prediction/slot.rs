// Race-outcome slots and their point values.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The six predicted race outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Slot {
    Pole,
    First,
    Second,
    Third,
    Fourth,
    FastestLap,
}

impl Slot {
    /// All slots in display order.
    pub const ALL: [Slot; 6] = [
        Slot::Pole,
        Slot::First,
        Slot::Second,
        Slot::Third,
        Slot::Fourth,
        Slot::FastestLap,
    ];

    /// Points awarded for an exact match on this slot.
    pub fn points(self) -> u32 {
        match self {
            Slot::Pole => 10,
            Slot::First => 25,
            Slot::Second => 18,
            Slot::Third => 15,
            Slot::Fourth => 12,
            Slot::FastestLap => 8,
        }
    }

    /// The wire key used in stored records ("pole", ..., "fastestLap").
    pub fn key(self) -> &'static str {
        match self {
            Slot::Pole => "pole",
            Slot::First => "first",
            Slot::Second => "second",
            Slot::Third => "third",
            Slot::Fourth => "fourth",
            Slot::FastestLap => "fastestLap",
        }
    }

    /// Parse a wire key back into a slot.
    pub fn from_key(s: &str) -> Option<Self> {
        match s {
            "pole" => Some(Slot::Pole),
            "first" => Some(Slot::First),
            "second" => Some(Slot::Second),
            "third" => Some(Slot::Third),
            "fourth" => Some(Slot::Fourth),
            "fastestLap" => Some(Slot::FastestLap),
            _ => None,
        }
    }

    /// Human-readable label for display.
    pub fn label(self) -> &'static str {
        match self {
            Slot::Pole => "Pole Position",
            Slot::First => "1st Place",
            Slot::Second => "2nd Place",
            Slot::Third => "3rd Place",
            Slot::Fourth => "4th Place",
            Slot::FastestLap => "Fastest Lap",
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Slot::Pole => 0,
            Slot::First => 1,
            Slot::Second => 2,
            Slot::Third => 3,
            Slot::Fourth => 4,
            Slot::FastestLap => 5,
        }
    }

    /// The highest total a single race can score (all six slots correct).
    pub fn max_total() -> u32 {
        Slot::ALL.iter().map(|s| s.points()).sum()
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}
