//! The Scheduling Engine (spec §4.2): combines Memory Math with per-state
//! transition rules to produce the four candidate next-cards for a review.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::card::Card;
use crate::datetime::{add_days, add_minutes, whole_day_diff};
use crate::grade::Grade;
use crate::memory;
use crate::parameters::Parameters;
use crate::review_log::ReviewLog;
use crate::state::State;

/// A single grade's scheduling result: the candidate card plus the log
/// entry a host would persist alongside it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Outcome {
    pub card: Card,
    pub log: ReviewLog,
}

/// The four candidate outcomes produced by one `Scheduler::schedule` call,
/// one per grade (spec §4.2 "mapping grade -> outcome").
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SchedulingCards {
    pub again: Outcome,
    pub hard: Outcome,
    pub good: Outcome,
    pub easy: Outcome,
}

impl SchedulingCards {
    pub fn get(&self, grade: Grade) -> &Outcome {
        match grade {
            Grade::Again => &self.again,
            Grade::Hard => &self.hard,
            Grade::Good => &self.good,
            Grade::Easy => &self.easy,
        }
    }
}

/// The Scheduling Engine. Stateless beyond its configuration: every call
/// allocates its own working copies, so a `Scheduler` is trivially safe to
/// share across threads (spec §5).
#[derive(Debug, Clone)]
pub struct Scheduler {
    parameters: Parameters,
}

impl Scheduler {
    pub fn new(parameters: Parameters) -> Self {
        Self { parameters }
    }

    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    /// Produces the four candidate next-cards for `card` reviewed at `now`.
    ///
    /// Precondition: `now` is not earlier than `card.last_review`, if any.
    /// Out-of-order calls are a contract violation (spec §4.2, §7); in a
    /// release build the elapsed days are clamped to zero rather than
    /// going negative, matching the defensive clamp a host-facing drill
    /// loop already needs.
    #[tracing::instrument(level = "debug", skip(self, card), fields(state = ?card.state))]
    pub fn schedule(&self, card: &Card, now: DateTime<Utc>) -> SchedulingCards {
        let pre_state = card.state;

        debug_assert!(
            card.check_invariants().is_ok(),
            "schedule() called with a card that violates its own invariants"
        );

        // Stage 1 — prepare the working copy.
        let mut prepared = *card;
        prepared.elapsed_days = match (pre_state, card.last_review) {
            (State::New, _) => 0,
            (_, Some(last_review)) => {
                debug_assert!(
                    now >= last_review,
                    "schedule() called with `now` earlier than card.last_review"
                );
                whole_day_diff(now, last_review).max(0)
            }
            (_, None) => 0,
        };
        prepared.last_review = Some(now);
        prepared.reps = card.reps + 1;

        debug!(elapsed_days = prepared.elapsed_days, "prepared review");

        // Stage 2 — one working copy per grade.
        let mut again = prepared;
        let mut hard = prepared;
        let mut good = prepared;
        let mut easy = prepared;

        // Stage 3 — state transitions.
        let (again_state, hard_state, good_state, easy_state) = match pre_state {
            State::New => (State::Learning, State::Learning, State::Learning, State::Review),
            State::Learning | State::Relearning => (pre_state, pre_state, State::Review, State::Review),
            State::Review => {
                again.lapses = card.lapses + 1;
                (State::Relearning, State::Review, State::Review, State::Review)
            }
        };
        again.state = again_state;
        hard.state = hard_state;
        good.state = good_state;
        easy.state = easy_state;

        // Stage 4 — difficulty/stability.
        let w = &self.parameters.w;
        match pre_state {
            State::New => {
                for (outcome, grade) in [
                    (&mut again, Grade::Again),
                    (&mut hard, Grade::Hard),
                    (&mut good, Grade::Good),
                    (&mut easy, Grade::Easy),
                ] {
                    outcome.difficulty = memory::initial_difficulty(w, grade);
                    outcome.stability = memory::initial_stability(w, grade);
                }
            }
            State::Learning | State::Relearning => {
                // Carried through unchanged from the review that created
                // them; the reference algorithm only recomputes intervals
                // here (spec §4.2 Stage 4).
            }
            State::Review => {
                let r = memory::forgetting_curve(prepared.elapsed_days as f64, card.stability);
                again.retrievability = Some(r);
                hard.retrievability = Some(r);
                good.retrievability = Some(r);
                easy.retrievability = Some(r);

                again.difficulty = memory::next_difficulty(w, card.difficulty, Grade::Again);
                again.stability = memory::next_stability_on_forget(w, card.difficulty, card.stability, r);

                for (outcome, grade) in [(&mut hard, Grade::Hard), (&mut good, Grade::Good), (&mut easy, Grade::Easy)] {
                    outcome.difficulty = memory::next_difficulty(w, card.difficulty, grade);
                    outcome.stability =
                        memory::next_stability_on_recall(w, card.difficulty, card.stability, r, grade);
                }
            }
        }

        // Stage 5 — intervals and due instants.
        match pre_state {
            State::New => {
                again.scheduled_days = 0;
                again.due = add_minutes(now, 1);
                hard.scheduled_days = 0;
                hard.due = add_minutes(now, 5);
                good.scheduled_days = 0;
                good.due = add_minutes(now, 10);

                let easy_i = self.next_interval(easy.stability);
                easy.scheduled_days = easy_i;
                easy.due = add_days(now, easy_i);
            }
            State::Learning | State::Relearning => {
                let hard_i = 0;
                let good_i = self.next_interval(good.stability);
                let easy_i = self.next_interval(easy.stability).max(good_i + 1);
                self.finalize(now, &mut again, &mut hard, &mut good, &mut easy, hard_i, good_i, easy_i);
            }
            State::Review => {
                let hard_i0 = self.next_interval(hard.stability);
                let good_i0 = self.next_interval(good.stability);
                let hard_i = hard_i0.min(good_i0);
                let good_i = good_i0.max(hard_i + 1);
                let easy_i = self.next_interval(easy.stability).max(good_i + 1);
                self.finalize(now, &mut again, &mut hard, &mut good, &mut easy, hard_i, good_i, easy_i);
            }
        }

        // Stage 6 — review logs, tagged with the pre-transition state.
        let make_log = |grade: Grade, scheduled_days: i64| ReviewLog {
            grade,
            scheduled_days,
            elapsed_days: prepared.elapsed_days,
            reviewed_at: now,
            state: pre_state,
        };

        SchedulingCards {
            again: Outcome { card: again, log: make_log(Grade::Again, again.scheduled_days) },
            hard: Outcome { card: hard, log: make_log(Grade::Hard, hard.scheduled_days) },
            good: Outcome { card: good, log: make_log(Grade::Good, good.scheduled_days) },
            easy: Outcome { card: easy, log: make_log(Grade::Easy, easy.scheduled_days) },
        }
    }

    /// Finalize rule common to the LEARNING/RELEARNING/REVIEW cases
    /// (spec §4.2 Stage 5 "Finalize").
    #[allow(clippy::too_many_arguments)]
    fn finalize(
        &self,
        now: DateTime<Utc>,
        again: &mut Card,
        hard: &mut Card,
        good: &mut Card,
        easy: &mut Card,
        hard_i: i64,
        good_i: i64,
        easy_i: i64,
    ) {
        again.scheduled_days = 0;
        again.due = add_minutes(now, 5);

        hard.scheduled_days = hard_i;
        hard.due = if hard_i > 0 { add_days(now, hard_i) } else { add_minutes(now, 10) };

        good.scheduled_days = good_i;
        good.due = add_days(now, good_i);

        easy.scheduled_days = easy_i;
        easy.due = add_days(now, easy_i);
    }

    fn next_interval(&self, stability: f64) -> i64 {
        memory::next_interval(stability, self.parameters.request_retention, self.parameters.maximum_interval)
    }

    /// The host-facing retrievability projection (spec §4.4). Deliberately
    /// asymmetric with the forgetting curve used internally: measured from
    /// `card.due` rather than `card.last_review`, using the simpler
    /// `2^(-t/S)` decay. Preserved as specified — see spec §9 Open
    /// Question 1 and DESIGN.md.
    #[tracing::instrument(level = "debug", skip(self, card))]
    pub fn retrievability_of(&self, card: &Card, now: DateTime<Utc>) -> f64 {
        retrievability_of(card, now)
    }
}

/// Free-function form of [`Scheduler::retrievability_of`]; it does not
/// depend on `Parameters`, so it is also usable without a `Scheduler`.
pub fn retrievability_of(card: &Card, now: DateTime<Utc>) -> f64 {
    if card.state == State::New || card.stability <= 0.0 {
        return 0.0;
    }
    let delta = if now >= card.due {
        whole_day_diff(now, card.due)
    } else {
        -whole_day_diff(card.due, now)
    };
    2f64.powf(-(delta as f64) / card.stability)
}
