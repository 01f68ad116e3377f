//! Review Commit Protocol
//!
//! Orchestrates one answer: classify the telemetry, run the scheduler (or
//! the consolidation shortcut), and rescore mastery against the level's
//! stability target. Identity fields pass through untouched.

use chrono::{DateTime, Duration, Utc};
use tracing::debug;

use crate::fsrs::{schedule, FsrsParams};
use crate::rating::classify;
use crate::sanitize::{clamp_mastery, floor_stability, safe_ratio};
use crate::types::{
    ConceptRecord, Rating, ReviewTelemetry, CONSOLIDATION_WINDOW_MINUTES,
};

const CONSOLIDATION_LAPSE_PENALTY: f64 = 0.8;

/// Days of stability required for a mastery score of 100; the bar rises
/// with the concept's difficulty tier.
pub fn stability_target(level: i32) -> f64 {
    match level {
        i32::MIN..=1 => 21.0,
        2..=3 => 60.0,
        _ => 100.0,
    }
}

/// Commit one review outcome and return the updated record.
///
/// Telemetry is optional; without it the rating falls back to the
/// correct/attempts heuristic. A repeat answer within the consolidation
/// window is treated as the same study event: no full curve update, and
/// on Again only a small stability penalty with a next-day due date.
pub fn commit(
    current: Option<&ConceptRecord>,
    is_correct: bool,
    attempts: i32,
    now: DateTime<Utc>,
    telemetry: Option<&ReviewTelemetry>,
    params: &FsrsParams,
) -> ConceptRecord {
    let mut record = match current {
        Some(rec) => rec.clone(),
        None => ConceptRecord::ingest(None, "", "", 1),
    };

    let rating = match telemetry {
        Some(t) => classify(t, record.memory.reps),
        None => Rating::from_correct(is_correct, attempts),
    };

    if in_consolidation_window(&record, now) {
        debug!(
            entity_id = %record.entity_id,
            rating = ?rating,
            "Review inside consolidation window, skipping curve update"
        );
        record.memory.last_reviewed = Some(now);
        if rating == Rating::Again {
            record.memory.stability =
                floor_stability(record.memory.stability * CONSOLIDATION_LAPSE_PENALTY);
            record.memory.due_at = now + Duration::days(1);
        }
    } else {
        record.memory = schedule(&record.memory, rating, now, params);
    }

    record.mastery_score = clamp_mastery(
        100.0 * safe_ratio(record.memory.stability, stability_target(record.level)),
    );
    record
}

fn in_consolidation_window(record: &ConceptRecord, now: DateTime<Utc>) -> bool {
    if record.memory.reps == 0 {
        return false;
    }
    match record.memory.last_reviewed {
        Some(last) => now - last < Duration::minutes(CONSOLIDATION_WINDOW_MINUTES),
        None => false,
    }
}
