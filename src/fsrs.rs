//! FSRS Scheduler
//!
//! Forgetting-curve memory model: power-law retrievability, rating-driven
//! stability/difficulty updates, and due-date computation. Coefficients are
//! an injectable [`FsrsParams`] so alternative published FSRS parameter
//! sets can be swapped in without touching callers.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::sanitize::floor_stability;
use crate::types::{MemoryPhase, MemoryState, Rating};

const DECAY: f64 = -0.5;
const FACTOR: f64 = 19.0 / 81.0;

const MIN_INTERVAL_DAYS: f64 = 1.0;
const MAX_INTERVAL_DAYS: f64 = 36500.0;

/// FSRS-4.5 weight vector plus the retention the scheduler targets.
/// The default set is a published parameterization, not a fitted one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FsrsParams {
    pub w: [f64; 17],
    pub desired_retention: f64,
}

impl Default for FsrsParams {
    fn default() -> Self {
        Self {
            w: [
                0.4, 0.6, 2.4, 5.8, // w0-w3: initial stability per rating
                4.93, 0.94, 0.86, 0.01, 1.49, // w4-w8
                0.14, 0.94, 2.18, 0.05, 0.34, // w9-w13
                1.26, 0.29, 2.61, // w14-w16
            ],
            desired_retention: 0.9,
        }
    }
}

/// Instantaneous recall probability after `elapsed_days` at `stability`
pub fn retrievability(stability: f64, elapsed_days: f64) -> f64 {
    if stability <= 0.0 {
        return 0.0;
    }
    let safe_elapsed = elapsed_days.max(0.0);
    (1.0 + FACTOR * safe_elapsed / stability).powf(DECAY)
}

/// Apply one rated review at `now` and return the updated state.
/// Stability is floored at 0.1 days and `due_at` moves to `now + f(stability)`.
pub fn schedule(
    state: &MemoryState,
    rating: Rating,
    now: DateTime<Utc>,
    params: &FsrsParams,
) -> MemoryState {
    let w = &params.w;
    let rating_val = rating as i32;

    let (new_stability, new_difficulty, new_lapses) = if state.is_new() {
        let lapses = if rating == Rating::Again { 1 } else { 0 };
        (
            initial_stability(w, rating_val),
            initial_difficulty(w, rating_val),
            lapses,
        )
    } else {
        let r = retrievability(state.stability, state.elapsed_days(now));
        let d = next_difficulty(w, state.difficulty, rating_val);
        if rating == Rating::Again {
            let s = next_forget_stability(w, state.difficulty, state.stability, r);
            (s, d, state.lapses + 1)
        } else {
            let s = next_recall_stability(w, state.difficulty, state.stability, r, rating_val);
            (s, d, state.lapses)
        }
    };

    let new_stability = floor_stability(new_stability);
    let new_reps = state.reps + 1;
    let interval = next_interval(new_stability, params.desired_retention);

    MemoryState {
        stability: new_stability,
        difficulty: new_difficulty,
        reps: new_reps,
        lapses: new_lapses,
        phase: next_phase(state.phase, rating, new_reps),
        last_reviewed: Some(now),
        due_at: now + days_to_duration(interval),
    }
}

/// New -> Learning -> Review on successive successes; Again sends a
/// reviewed item to Relearning; a success brings it back.
fn next_phase(current: MemoryPhase, rating: Rating, new_reps: i32) -> MemoryPhase {
    match (current, rating.is_success()) {
        (MemoryPhase::New, _) => MemoryPhase::Learning,
        (MemoryPhase::Learning, true) if new_reps >= 2 => MemoryPhase::Review,
        (MemoryPhase::Learning, _) => MemoryPhase::Learning,
        (MemoryPhase::Review, false) => MemoryPhase::Relearning,
        (MemoryPhase::Review, true) => MemoryPhase::Review,
        (MemoryPhase::Relearning, true) => MemoryPhase::Review,
        (MemoryPhase::Relearning, false) => MemoryPhase::Relearning,
    }
}

fn initial_stability(w: &[f64; 17], rating: i32) -> f64 {
    w[(rating - 1) as usize].max(0.1)
}

fn initial_difficulty(w: &[f64; 17], rating: i32) -> f64 {
    let d = w[4] - (rating - 3) as f64 * w[5];
    d.clamp(1.0, 10.0) / 10.0
}

// Difficulty stays normalized in [0.1, 1.0]; the update is mean-reverting,
// never a discontinuous reset.
fn next_difficulty(w: &[f64; 17], d: f64, rating: i32) -> f64 {
    let d_10 = d * 10.0;
    let delta = -(rating - 3) as f64;
    let d_new = d_10 + w[6] * delta;
    let d_mean = w[7] * (w[4] - 3.0 * w[5]) + (1.0 - w[7]) * d_new;
    (d_mean.clamp(1.0, 10.0)) / 10.0
}

fn next_recall_stability(w: &[f64; 17], d: f64, s: f64, r: f64, rating: i32) -> f64 {
    let d_10 = d * 10.0;
    let hard_penalty = if rating == 2 { w[15] } else { 1.0 };
    let easy_bonus = if rating == 4 { w[16] } else { 1.0 };

    let new_s = s
        * (1.0
            + w[8].exp()
                * (11.0 - d_10)
                * s.powf(-w[9])
                * ((1.0 - r) * w[10]).exp_m1()
                * hard_penalty
                * easy_bonus);
    new_s.max(0.1)
}

fn next_forget_stability(w: &[f64; 17], d: f64, s: f64, r: f64) -> f64 {
    let d_10 = d * 10.0;
    let new_s =
        w[11] * d_10.powf(-w[12]) * ((s + 1.0).powf(w[13]) - 1.0) * (1.0 - r).powf(w[14]).exp();
    // A lapse never raises stability; the floor still applies below 0.1
    new_s.clamp(0.1, s.max(0.1))
}

fn next_interval(stability: f64, desired_retention: f64) -> f64 {
    let safe_retention = desired_retention.clamp(0.0001, 0.9999);
    let interval = stability / FACTOR * (safe_retention.powf(1.0 / DECAY) - 1.0);
    interval.clamp(MIN_INTERVAL_DAYS, MAX_INTERVAL_DAYS)
}

fn days_to_duration(days: f64) -> Duration {
    Duration::seconds((days * 86_400.0) as i64)
}

/// Long-term mastery for scheduling decisions; allows up to 2 lapses
pub fn is_mastered(state: &MemoryState) -> bool {
    state.stability >= 21.0 && state.lapses <= 2
}
