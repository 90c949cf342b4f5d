//! Lifecycle position of a card (spec §6.3).

use serde::{Deserialize, Serialize};

/// A card's position in the review lifecycle. Wire values are 0..3,
/// stable across hosts (spec §6.3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum State {
    New,
    Learning,
    Review,
    Relearning,
}

impl State {
    pub const fn as_u8(self) -> u8 {
        match self {
            State::New => 0,
            State::Learning => 1,
            State::Review => 2,
            State::Relearning => 3,
        }
    }
}

impl From<State> for u8 {
    fn from(s: State) -> u8 {
        s.as_u8()
    }
}

impl TryFrom<u8> for State {
    type Error = crate::error::Error;

    fn try_from(n: u8) -> Result<Self, Self::Error> {
        match n {
            0 => Ok(State::New),
            1 => Ok(State::Learning),
            2 => Ok(State::Review),
            3 => Ok(State::Relearning),
            other => Err(crate::error::Error::InvalidParameter(format!(
                "state out of range: {other}"
            ))),
        }
    }
}
