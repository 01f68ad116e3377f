//! Concept Aggregator
//!
//! Merges one concept's phrasings into a single health snapshot. The
//! aggregate is deliberately conservative: stability is the minimum over
//! all members, so one decayed phrasing is never hidden by an average.

use crate::sanitize::{clamp_mastery, clamp_stability, safe_ratio};
use crate::types::ConceptRecord;

/// Reduce a concept group (root plus variants, same `entity_id`) into one
/// record. Pure and idempotent; an empty variant list returns the root
/// unchanged.
pub fn aggregate(root: &ConceptRecord, variants: &[ConceptRecord]) -> ConceptRecord {
    if variants.is_empty() {
        return root.clone();
    }

    let members = || std::iter::once(root).chain(variants.iter());

    let level = members().map(|m| m.level).max().unwrap_or(root.level);
    let mastery_sum: f64 = members().map(|m| m.mastery_score as f64).sum();
    let count = 1 + variants.len();
    let stability = members()
        .map(|m| m.memory.stability)
        .fold(f64::INFINITY, f64::min);
    let due_at = members().map(|m| m.memory.due_at).min().unwrap_or(root.memory.due_at);

    let mut out = root.clone();
    out.level = level;
    out.mastery_score = clamp_mastery(safe_ratio(mastery_sum, count as f64));
    out.memory.stability = clamp_stability(stability);
    out.memory.due_at = due_at;
    out
}
