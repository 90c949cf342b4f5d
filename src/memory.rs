//! Memory Math (spec §4.1): pure functions over stability, difficulty and
//! retrievability. Every function here depends only on its arguments and
//! the model weights — no clock, no I/O, no shared state.

use crate::grade::Grade;
use crate::parameters::{DECAY, FACTOR};

/// `R(t, s) = (1 + FACTOR * t / s) ^ DECAY`
///
/// Strictly decreasing in `t` for fixed `s > 0`; `R(s, s) == 0.9`.
pub fn forgetting_curve(elapsed_days: f64, stability: f64) -> f64 {
    (1.0 + FACTOR * elapsed_days / stability).powf(DECAY)
}

/// Inverts the forgetting curve for a target retention, clamped to
/// `[1, maximum_interval]` and rounded half-away-from-zero.
///
/// `f64::round` already rounds half-away-from-zero, matching spec §4.1.
pub fn next_interval(stability: f64, request_retention: f64, maximum_interval: i64) -> i64 {
    let raw = (stability / FACTOR) * (request_retention.powf(1.0 / DECAY) - 1.0);
    raw.round().clamp(1.0, maximum_interval as f64) as i64
}

/// `S0(g) = max(w[g-1], 0.1)`
pub fn initial_stability(w: &[f64; 17], grade: Grade) -> f64 {
    w[grade.as_u8() as usize - 1].max(0.1)
}

/// `D0(g) = clamp(w[4] - w[5]*(g-3), 1, 10)`
pub fn initial_difficulty(w: &[f64; 17], grade: Grade) -> f64 {
    clamp_difficulty(w[4] - w[5] * (grade.as_f64() - 3.0))
}

/// Next difficulty with mean reversion toward `D0(GOOD)` (spec §4.1).
pub fn next_difficulty(w: &[f64; 17], difficulty: f64, grade: Grade) -> f64 {
    let d_prime = difficulty - w[6] * (grade.as_f64() - 3.0);
    let reverted = w[7] * w[4] + (1.0 - w[7]) * d_prime;
    clamp_difficulty(reverted)
}

/// Next stability after a successful recall (HARD, GOOD, or EASY).
pub fn next_stability_on_recall(w: &[f64; 17], difficulty: f64, stability: f64, retrievability: f64, grade: Grade) -> f64 {
    let hard_penalty = if grade == Grade::Hard { w[15] } else { 1.0 };
    let easy_bonus = if grade == Grade::Easy { w[16] } else { 1.0 };
    let gain = f64::exp(w[8])
        * (11.0 - difficulty)
        * stability.powf(-w[9])
        * (f64::exp((1.0 - retrievability) * w[10]) - 1.0)
        * hard_penalty
        * easy_bonus;
    stability * (1.0 + gain)
}

/// Next stability after forgetting (AGAIN).
pub fn next_stability_on_forget(w: &[f64; 17], difficulty: f64, stability: f64, retrievability: f64) -> f64 {
    w[11]
        * difficulty.powf(-w[12])
        * ((stability + 1.0).powf(w[13]) - 1.0)
        * f64::exp((1.0 - retrievability) * w[14])
}

fn clamp_difficulty(d: f64) -> f64 {
    d.clamp(1.0, 10.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parameters::DEFAULT_WEIGHTS;

    fn round4(x: f64) -> f64 {
        (x * 10_000.0).round() / 10_000.0
    }

    #[test]
    fn retrievability_at_zero_elapsed_is_one() {
        assert!((forgetting_curve(0.0, 5.0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn retrievability_at_elapsed_equal_to_stability_is_point_nine() {
        assert_eq!(round4(forgetting_curve(10.0, 10.0)), 0.9);
    }

    #[test]
    fn retrievability_strictly_decreasing_in_elapsed() {
        let s = 10.0;
        let mut prev = forgetting_curve(0.0, s);
        for t in 1..50 {
            let r = forgetting_curve(t as f64, s);
            assert!(r < prev);
            prev = r;
        }
    }

    #[test]
    fn interval_respects_cap_and_floor() {
        assert_eq!(next_interval(1000.0, 0.9, 30), 30);
        assert_eq!(next_interval(0.0001, 0.9, 30), 1);
    }

    #[test]
    fn lower_retention_yields_longer_interval() {
        let low = next_interval(20.0, 0.80, 36500);
        let high = next_interval(20.0, 0.95, 36500);
        assert!(low > high);
    }

    #[test]
    fn initial_stability_floor_is_one_tenth() {
        let w = [0.0; 17];
        assert_eq!(initial_stability(&w, Grade::Again), 0.1);
    }

    #[test]
    fn initial_difficulty_matches_reference_weights() {
        assert_eq!(round4(initial_difficulty(&DEFAULT_WEIGHTS, Grade::Good)), 5.1618);
    }

    #[test]
    fn next_difficulty_stays_in_bounds_under_repeated_again() {
        let mut d = initial_difficulty(&DEFAULT_WEIGHTS, Grade::Again);
        for _ in 0..200 {
            d = next_difficulty(&DEFAULT_WEIGHTS, d, Grade::Again);
            assert!((1.0..=10.0).contains(&d));
        }
    }

    #[test]
    fn next_difficulty_stays_in_bounds_under_repeated_easy() {
        let mut d = initial_difficulty(&DEFAULT_WEIGHTS, Grade::Easy);
        for _ in 0..200 {
            d = next_difficulty(&DEFAULT_WEIGHTS, d, Grade::Easy);
            assert!((1.0..=10.0).contains(&d));
        }
    }

    #[test]
    fn recall_stability_increases_with_good() {
        let r = forgetting_curve(10.0, 10.0);
        let s_new = next_stability_on_recall(&DEFAULT_WEIGHTS, 5.0, 10.0, r, Grade::Good);
        assert!(s_new > 10.0);
    }

    #[test]
    fn hard_penalty_is_attenuating_relative_to_good() {
        let r = forgetting_curve(10.0, 10.0);
        let good = next_stability_on_recall(&DEFAULT_WEIGHTS, 5.0, 10.0, r, Grade::Good);
        let hard = next_stability_on_recall(&DEFAULT_WEIGHTS, 5.0, 10.0, r, Grade::Hard);
        assert!(hard < good);
    }

    #[test]
    fn easy_bonus_amplifies_relative_to_good() {
        let r = forgetting_curve(10.0, 10.0);
        let good = next_stability_on_recall(&DEFAULT_WEIGHTS, 5.0, 10.0, r, Grade::Good);
        let easy = next_stability_on_recall(&DEFAULT_WEIGHTS, 5.0, 10.0, r, Grade::Easy);
        assert!(easy > good);
    }

    #[test]
    fn forget_stability_is_finite_and_nonnegative() {
        let r = forgetting_curve(10.0, 10.0);
        let s_new = next_stability_on_forget(&DEFAULT_WEIGHTS, 5.0, 10.0, r);
        assert!(s_new.is_finite());
        assert!(s_new >= 0.0);
    }
}
