//! Immutable scheduler configuration (spec §3.2, §6.1, §6.2).

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};

/// Tuned so that `R(s, s) == 0.9`: `DECAY = -0.5`.
pub const DECAY: f64 = -0.5;

/// `FACTOR = 0.9^(1/DECAY) - 1 = 19/81`.
pub const FACTOR: f64 = 19.0 / 81.0;

/// Canonical default weights (spec §6.2).
pub const DEFAULT_WEIGHTS: [f64; 17] = [
    0.4872, 1.4003, 3.7145, 13.8206, 5.1618, 1.2298, 0.8975, 0.031, 1.6474, 0.1367, 1.0461,
    2.1072, 0.0793, 0.3246, 1.587, 0.2272, 2.8755,
];

const DEFAULT_REQUEST_RETENTION: f64 = 0.90;
const DEFAULT_MAXIMUM_INTERVAL: i64 = 36500;

/// Scheduler configuration. Immutable once built; every `Scheduler` call
/// takes a `&Parameters` and never mutates it.
///
/// `learning_steps`, `relearning_steps`, and `enable_fuzzing` are carried
/// for round-trip fidelity with hosts that persist a full FSRS config, but
/// — per spec §9 Open Question 2 — are not consulted by the scheduling
/// arithmetic. The short-term intervals are hard-coded (1/5/10 minutes on
/// NEW, 5/10 minutes on the finalize step) regardless of their contents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameters {
    pub request_retention: f64,
    pub maximum_interval: i64,
    pub w: [f64; 17],
    pub learning_steps_minutes: Vec<i64>,
    pub relearning_steps_minutes: Vec<i64>,
    pub enable_fuzzing: bool,
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            request_retention: DEFAULT_REQUEST_RETENTION,
            maximum_interval: DEFAULT_MAXIMUM_INTERVAL,
            w: DEFAULT_WEIGHTS,
            learning_steps_minutes: vec![1, 10],
            relearning_steps_minutes: vec![10],
            enable_fuzzing: false,
        }
    }
}

impl Parameters {
    /// Validates and builds a configuration (spec §7 `InvalidParameter`).
    ///
    /// `w` must have exactly 17 entries, `request_retention` must be in
    /// `(0, 1)`, and `maximum_interval` must be at least 1 day.
    pub fn new(w: &[f64], request_retention: f64, maximum_interval: i64) -> Result<Self> {
        let w: [f64; 17] = w.try_into().map_err(|_| {
            Error::InvalidParameter(format!("expected 17 weights, got {}", w.len()))
        })?;

        if !(request_retention > 0.0 && request_retention < 1.0) {
            return Err(Error::InvalidParameter(format!(
                "request_retention must be in (0, 1), got {request_retention}"
            )));
        }
        if maximum_interval < 1 {
            return Err(Error::InvalidParameter(format!(
                "maximum_interval must be >= 1, got {maximum_interval}"
            )));
        }

        debug!(request_retention, maximum_interval, "built FSRS parameters");

        Ok(Self {
            request_retention,
            maximum_interval,
            w,
            ..Default::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_parameters_are_valid() {
        let p = Parameters::default();
        assert_eq!(p.w.len(), 17);
        assert!(p.request_retention > 0.0 && p.request_retention < 1.0);
    }

    #[test]
    fn rejects_wrong_weight_count() {
        let w = vec![1.0; 16];
        assert!(Parameters::new(&w, 0.9, 36500).is_err());
    }

    #[test]
    fn rejects_retention_out_of_range() {
        let w = DEFAULT_WEIGHTS.to_vec();
        assert!(Parameters::new(&w, 0.0, 36500).is_err());
        assert!(Parameters::new(&w, 1.0, 36500).is_err());
    }

    #[test]
    fn rejects_nonpositive_maximum_interval() {
        let w = DEFAULT_WEIGHTS.to_vec();
        assert!(Parameters::new(&w, 0.9, 0).is_err());
    }
}
