//! The immutable record emitted per scheduling call (spec §3.3).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::grade::Grade;
use crate::state::State;

/// One grade's worth of review history, as it would be handed to a host's
/// audit log. The core never writes this anywhere — emitting the value is
/// the entire contract.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReviewLog {
    pub grade: Grade,
    pub scheduled_days: i64,
    pub elapsed_days: i64,
    pub reviewed_at: DateTime<Utc>,
    /// The card's state *before* this grade's transition was applied.
    pub state: State,
}
