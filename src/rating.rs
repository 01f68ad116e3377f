//! Rating Classifier
//!
//! Converts raw interaction telemetry into a discrete [`Rating`].
//! Rules are evaluated in order, first match wins; latency is judged
//! against a per-item-type baseline with a generic default for unknown
//! types. Hints and retries cap the ceiling rating: a scaffolded correct
//! answer can never come out Easy.

use crate::types::{Rating, ReviewTelemetry};

const BASELINE_FLASHCARD_MS: f64 = 6_000.0;
const BASELINE_CLOZE_MS: f64 = 12_000.0;
const BASELINE_MULTIPLE_CHOICE_MS: f64 = 8_000.0;
const BASELINE_FREE_RECALL_MS: f64 = 20_000.0;
const BASELINE_DEFAULT_MS: f64 = 10_000.0;

// Latency multipliers relative to baseline
const FIRST_ATTEMPT_HARD_FACTOR: f64 = 3.0;
const EASY_FACTOR: f64 = 0.6;
const HARD_FACTOR: f64 = 1.5;

/// Baseline answer duration for an item type (ms); unknown types fall
/// back to the generic default
pub fn baseline_ms(item_type: &str) -> f64 {
    match item_type {
        "flashcard" => BASELINE_FLASHCARD_MS,
        "cloze" => BASELINE_CLOZE_MS,
        "multiple-choice" => BASELINE_MULTIPLE_CHOICE_MS,
        "free-recall" => BASELINE_FREE_RECALL_MS,
        _ => BASELINE_DEFAULT_MS,
    }
}

/// Classify one answer. `current_reps` distinguishes the first-ever
/// attempt, where thinking time during encoding is not penalized.
pub fn classify(telemetry: &ReviewTelemetry, current_reps: i32) -> Rating {
    if !telemetry.is_correct {
        return Rating::Again;
    }
    if telemetry.hints_used > 1 {
        return Rating::Again;
    }
    if telemetry.hints_used == 1 {
        return Rating::Hard;
    }
    if telemetry.attempts > 2 {
        return Rating::Again;
    }
    if telemetry.attempts == 2 {
        return Rating::Hard;
    }

    let baseline = baseline_ms(&telemetry.item_type);
    let spent = telemetry.time_spent_ms as f64;

    if current_reps == 0 {
        // First encoding: lenient, only flag the real outliers
        if spent > FIRST_ATTEMPT_HARD_FACTOR * baseline {
            Rating::Hard
        } else {
            Rating::Good
        }
    } else if spent < EASY_FACTOR * baseline {
        Rating::Easy
    } else if spent > HARD_FACTOR * baseline {
        Rating::Hard
    } else {
        Rating::Good
    }
}
