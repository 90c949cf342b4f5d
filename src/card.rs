//! The persistent per-card memory state (spec §3.1, §4.3).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::state::State;

/// Durable memory record for one flashcard.
///
/// A `Card` is never mutated by the Scheduling Engine in place: every
/// `Scheduler::schedule` call works on cloned copies and hands back fresh
/// values for the host to persist (clone-on-write, spec §9).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub due: DateTime<Utc>,
    pub last_review: Option<DateTime<Utc>>,
    pub stability: f64,
    pub difficulty: f64,
    pub elapsed_days: i64,
    pub scheduled_days: i64,
    pub reps: u32,
    pub lapses: u32,
    pub state: State,
    pub step: u32,
    pub retrievability: Option<f64>,
}

impl Card {
    /// A freshly created card (spec §4.3 construction defaults).
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            due: now,
            last_review: None,
            stability: 0.0,
            difficulty: 0.0,
            elapsed_days: 0,
            scheduled_days: 0,
            reps: 0,
            lapses: 0,
            state: State::New,
            step: 0,
            retrievability: None,
        }
    }

    /// Checks the invariants of spec §3.1. Call sites use this as a
    /// `debug_assert!`-style guard; a caller-supplied card that violates
    /// these is a contract violation (spec §7), not a recoverable error.
    pub fn check_invariants(&self) -> Result<()> {
        let violation = |msg: &str| Error::InvalidParameter(msg.to_string());

        if self.state == State::New {
            if self.reps != 0
                || self.lapses != 0
                || self.stability != 0.0
                || self.difficulty != 0.0
                || self.last_review.is_some()
            {
                return Err(violation("NEW card must have zeroed review history"));
            }
        } else {
            if self.last_review.is_none() {
                return Err(violation("non-NEW card must have a last_review"));
            }
            if !(self.stability > 0.0) {
                return Err(violation("non-NEW card must have positive stability"));
            }
            if !(1.0..=10.0).contains(&self.difficulty) {
                return Err(violation("non-NEW card must have difficulty in [1, 10]"));
            }
        }

        if self.stability < 0.0 || !self.stability.is_finite() {
            return Err(violation("stability must be finite and non-negative"));
        }

        Ok(())
    }
}
