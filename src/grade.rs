//! The caller's rating of recall performance (spec §6.3).

use serde::{Deserialize, Serialize};

/// A review grade. Wire values are 1..4, stable across hosts (spec §6.3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Grade {
    Again,
    Hard,
    Good,
    Easy,
}

impl Grade {
    pub const ALL: [Grade; 4] = [Grade::Again, Grade::Hard, Grade::Good, Grade::Easy];

    pub const fn as_u8(self) -> u8 {
        match self {
            Grade::Again => 1,
            Grade::Hard => 2,
            Grade::Good => 3,
            Grade::Easy => 4,
        }
    }

    /// `g` as used throughout the memory-math formulas: 1..4.
    pub(crate) const fn as_f64(self) -> f64 {
        self.as_u8() as f64
    }
}

impl From<Grade> for u8 {
    fn from(g: Grade) -> u8 {
        g.as_u8()
    }
}

impl TryFrom<u8> for Grade {
    type Error = crate::error::Error;

    fn try_from(n: u8) -> Result<Self, Self::Error> {
        match n {
            1 => Ok(Grade::Again),
            2 => Ok(Grade::Hard),
            3 => Ok(Grade::Good),
            4 => Ok(Grade::Easy),
            other => Err(crate::error::Error::InvalidParameter(format!(
                "grade out of range: {other}"
            ))),
        }
    }
}
