//! Page Lifecycle Manager
//!
//! Derives a page's lock/unlock state from its items. A page stays Active
//! inside a one-hour grace buffer around its earliest due instant, which
//! avoids status flicker right at the due time. The Incubating /
//! RetrievalDue / Active layering above this evaluation is the caller's
//! state machine; this module only evaluates snapshots.

use chrono::{DateTime, Datelike, Duration, Utc, Weekday};
use serde::{Deserialize, Serialize};

use crate::types::{Cycle, CycleStatus, Item, PAGE_GRACE_MINUTES, WEEKLY_GATE_REVIEW_COUNT};

/// Result of evaluating a page snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CycleEval {
    pub status: CycleStatus,
    pub next_review: DateTime<Utc>,
}

/// Evaluate a page's items at `now`. Pages with no scheduled items are
/// Active with an epoch next-review; otherwise the page locks once its
/// earliest due instant is more than the grace buffer away.
pub fn evaluate(items: &[Item], now: DateTime<Utc>) -> CycleEval {
    let next_review = items
        .iter()
        .filter_map(|item| item.record.as_ref())
        .map(|rec| rec.memory.due_at)
        .min();

    match next_review {
        None => CycleEval {
            status: CycleStatus::Active,
            next_review: DateTime::<Utc>::UNIX_EPOCH,
        },
        Some(due) => {
            let status = if due <= now + Duration::minutes(PAGE_GRACE_MINUTES) {
                CycleStatus::Active
            } else {
                CycleStatus::Locked
            };
            CycleEval {
                status,
                next_review: due,
            }
        }
    }
}

/// Build the persistable cycle for a page at `now`, carrying the chapter
/// number through for the storage layer
pub fn next_cycle(items: &[Item], now: DateTime<Utc>, chapter: i32) -> Cycle {
    let eval = evaluate(items, now);
    Cycle {
        status: eval.status,
        chapter: chapter.max(1),
        next_review: eval.next_review,
    }
}

/// Weekly unlock gate, kept exactly as observed: a new chapter opens on a
/// weekend or once ten reviews have been logged, whichever comes first.
pub fn weekly_gate(now: DateTime<Utc>, review_count: i32) -> bool {
    is_weekend(now) || review_count >= WEEKLY_GATE_REVIEW_COUNT
}

fn is_weekend(now: DateTime<Utc>) -> bool {
    matches!(now.weekday(), Weekday::Sat | Weekday::Sun)
}
