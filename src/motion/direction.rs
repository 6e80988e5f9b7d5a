//! Travel direction.

use core::fmt;

use serde::Deserialize;

/// Direction of axis travel.
///
/// `Forward` runs from the start switch toward the end switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Away from the start switch (position increases).
    #[default]
    Forward,
    /// Toward the start switch (position decreases).
    Backward,
}

impl Direction {
    /// Direction from the boolean convention used on the DIR line
    /// (`true` = forward).
    #[inline]
    pub fn from_forward(forward: bool) -> Self {
        if forward {
            Direction::Forward
        } else {
            Direction::Backward
        }
    }

    /// Whether this is the forward sense.
    #[inline]
    pub fn is_forward(self) -> bool {
        self == Direction::Forward
    }

    /// The opposite direction.
    #[inline]
    pub fn reversed(self) -> Self {
        match self {
            Direction::Forward => Direction::Backward,
            Direction::Backward => Direction::Forward,
        }
    }
}

impl From<bool> for Direction {
    fn from(forward: bool) -> Self {
        Self::from_forward(forward)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Forward => write!(f, "forward"),
            Direction::Backward => write!(f, "backward"),
        }
    }
}
