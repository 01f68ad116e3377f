//! Adaptive Session Planner
//!
//! Builds a bounded, deduplicated study queue from a concept group in four
//! ordered tiers: critical repair, expansion, maintenance, random
//! interleave. Expansion is only attempted when nothing is critically
//! decayed; a group does not grow on a cracked foundation. The tier-4
//! shuffle runs on a caller-supplied RNG so tests stay deterministic.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::types::{ConceptGroup, ConceptRecord, CRITICAL_STABILITY_DAYS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionStrategy {
    CriticalRepair,
    Expansion,
    Maintenance,
    RandomInterleave,
}

impl SessionStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CriticalRepair => "CRITICAL_REPAIR",
            Self::Expansion => "EXPANSION",
            Self::Maintenance => "MAINTENANCE",
            Self::RandomInterleave => "RANDOM_INTERLEAVE",
        }
    }
}

/// Planned study session: item ids in pedagogical order plus the label
/// and reason shown to the strategy UI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionPlan {
    pub queue: Vec<String>,
    pub strategy: SessionStrategy,
    pub reason: String,
    pub critical_count: usize,
}

/// Build a session queue of at most `limit` items from the group's
/// record-carrying members.
pub fn plan(
    group: &ConceptGroup,
    limit: usize,
    now: DateTime<Utc>,
    rng: &mut impl Rng,
) -> SessionPlan {
    let members: Vec<(&str, &ConceptRecord)> = group
        .members()
        .filter_map(|item| item.record.as_ref().map(|rec| (item.id.as_str(), rec)))
        .collect();

    let mut queue: Vec<(String, i32)> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();

    // Tier 1: reviewed members whose stability has collapsed
    let mut criticals: Vec<(&str, &ConceptRecord)> = members
        .iter()
        .copied()
        .filter(|(_, rec)| is_critical(rec))
        .collect();
    criticals.sort_by_key(|(_, rec)| rec.level);
    let critical_count = criticals.len();
    for (id, rec) in &criticals {
        push_item(&mut queue, &mut seen, limit, id, rec.level);
    }
    let tier1_added = !queue.is_empty();

    // Tier 2: one frontier item, only when repair added nothing
    let mut expanded = false;
    if !tier1_added {
        if let Some(max_level) = members.iter().map(|(_, rec)| rec.level).max() {
            let frontier = members
                .iter()
                .copied()
                .filter(|(_, rec)| rec.level == max_level)
                .min_by_key(|(_, rec)| rec.mastery_score);
            if let Some((id, rec)) = frontier {
                push_item(&mut queue, &mut seen, limit, id, rec.level);
                expanded = !queue.is_empty();
            }
        }
    }

    // Tier 3: overdue members, earliest first
    let mut due: Vec<(&str, &ConceptRecord)> = members
        .iter()
        .copied()
        .filter(|(_, rec)| rec.memory.due_at <= now)
        .collect();
    due.sort_by_key(|(_, rec)| rec.memory.due_at);
    let before_maintenance = queue.len();
    for (id, rec) in &due {
        push_item(&mut queue, &mut seen, limit, id, rec.level);
    }
    let maintained = queue.len() > before_maintenance;

    // Tier 4: whatever is left, interleaved at random
    let mut rest: Vec<(&str, &ConceptRecord)> = members
        .iter()
        .copied()
        .filter(|(id, _)| !seen.contains(*id))
        .collect();
    rest.shuffle(rng);
    for (id, rec) in &rest {
        push_item(&mut queue, &mut seen, limit, id, rec.level);
    }

    // Re-sort by level regardless of selection tier, for pedagogical coherence
    queue.sort_by_key(|(_, level)| *level);

    let (strategy, reason) = if critical_count > 0 {
        (
            SessionStrategy::CriticalRepair,
            format!(
                "{} concept(s) below {:.1} days of stability need repair before anything new",
                critical_count, CRITICAL_STABILITY_DAYS
            ),
        )
    } else if expanded {
        (
            SessionStrategy::Expansion,
            "Foundation is stable; pushing the weakest frontier concept".to_string(),
        )
    } else if maintained {
        (
            SessionStrategy::Maintenance,
            "No critical decay; reviewing what is due".to_string(),
        )
    } else {
        (
            SessionStrategy::RandomInterleave,
            "Nothing critical or due; interleaving for variety".to_string(),
        )
    };

    debug!(
        strategy = strategy.as_str(),
        queue_len = queue.len(),
        critical_count,
        "Session planned"
    );

    SessionPlan {
        queue: queue.into_iter().map(|(id, _)| id).collect(),
        strategy,
        reason,
        critical_count,
    }
}

fn push_item(
    queue: &mut Vec<(String, i32)>,
    seen: &mut HashSet<String>,
    limit: usize,
    id: &str,
    level: i32,
) {
    if queue.len() < limit && seen.insert(id.to_string()) {
        queue.push((id.to_string(), level));
    }
}

fn is_critical(rec: &ConceptRecord) -> bool {
    rec.memory.reps > 0 && rec.memory.stability < CRITICAL_STABILITY_DAYS
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ConceptRecord, Item, MemoryState, DEFAULT_SESSION_LIMIT};
    use chrono::{Duration, TimeZone};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(42)
    }

    fn member(id: &str, level: i32, stability: f64, reps: i32, mastery: i32, due_days: i64) -> Item {
        let mut rec = ConceptRecord::ingest(Some("lang.grammar.tense"), "Tense", "", level);
        rec.mastery_score = mastery;
        rec.memory = MemoryState {
            stability,
            reps,
            due_at: t0() + Duration::days(due_days),
            ..Default::default()
        };
        Item::new(id, Some(rec))
    }

    fn group(root: Item, variants: Vec<Item>) -> ConceptGroup {
        ConceptGroup { root, variants }
    }

    #[test]
    fn test_empty_group_plans_nothing() {
        let g = group(Item::new("root", None), vec![]);
        let plan = plan(&g, DEFAULT_SESSION_LIMIT, t0(), &mut rng());
        assert!(plan.queue.is_empty());
        assert_eq!(plan.critical_count, 0);
        assert_eq!(plan.strategy, SessionStrategy::RandomInterleave);
    }

    #[test]
    fn test_critical_repair_takes_priority() {
        let g = group(
            member("root", 1, 10.0, 5, 80, 5),
            vec![
                member("weak", 2, 0.5, 3, 10, -1),
                member("fresh", 3, 30.0, 8, 95, 9),
            ],
        );
        let plan = plan(&g, DEFAULT_SESSION_LIMIT, t0(), &mut rng());
        assert_eq!(plan.strategy, SessionStrategy::CriticalRepair);
        assert_eq!(plan.critical_count, 1);
        assert!(plan.queue.contains(&"weak".to_string()));
    }

    #[test]
    fn test_unreviewed_members_are_not_critical() {
        // stability 0 but reps 0: never reviewed, not a repair case
        let g = group(member("root", 1, 0.0, 0, 0, 5), vec![]);
        let plan = plan(&g, DEFAULT_SESSION_LIMIT, t0(), &mut rng());
        assert_ne!(plan.strategy, SessionStrategy::CriticalRepair);
        assert_eq!(plan.critical_count, 0);
    }

    #[test]
    fn test_expansion_only_without_criticals() {
        let g = group(
            member("root", 1, 10.0, 5, 80, 5),
            vec![
                member("frontier-weak", 3, 20.0, 4, 30, 6),
                member("frontier-strong", 3, 25.0, 4, 90, 7),
            ],
        );
        let plan = plan(&g, DEFAULT_SESSION_LIMIT, t0(), &mut rng());
        assert_eq!(plan.strategy, SessionStrategy::Expansion);
        // Single lowest-mastery member at the max level leads the selection
        assert!(plan.queue.contains(&"frontier-weak".to_string()));
    }

    #[test]
    fn test_expansion_suppressed_by_criticals() {
        let g = group(
            member("weak", 1, 0.5, 2, 10, -1),
            vec![member("frontier", 3, 20.0, 4, 30, 6)],
        );
        let plan = plan(&g, 1, t0(), &mut rng());
        assert_eq!(plan.strategy, SessionStrategy::CriticalRepair);
        assert_eq!(plan.queue, vec!["weak".to_string()]);
    }

    #[test]
    fn test_maintenance_fills_with_due_items() {
        let g = group(
            member("due-later", 1, 10.0, 5, 80, 0),
            vec![
                member("due-first", 1, 12.0, 5, 80, -3),
                member("not-due", 1, 15.0, 5, 80, 9),
            ],
        );
        // All at the same level, none critical: expansion picks one, then
        // maintenance fills with what is due
        let plan = plan(&g, DEFAULT_SESSION_LIMIT, t0(), &mut rng());
        assert!(plan.queue.contains(&"due-first".to_string()));
        assert!(plan.queue.contains(&"due-later".to_string()));
    }

    #[test]
    fn test_queue_bounded_and_unique() {
        let variants: Vec<Item> = (0..20)
            .map(|i| member(&format!("v{}", i), 1 + (i % 4), 0.5, 2, 10, -1))
            .collect();
        let g = group(member("root", 1, 0.5, 2, 10, -1), variants);
        let plan = plan(&g, DEFAULT_SESSION_LIMIT, t0(), &mut rng());
        assert!(plan.queue.len() <= DEFAULT_SESSION_LIMIT);
        let unique: HashSet<_> = plan.queue.iter().collect();
        assert_eq!(unique.len(), plan.queue.len());
    }

    #[test]
    fn test_final_order_ascending_by_level() {
        let g = group(
            member("l3", 3, 0.5, 2, 10, -1),
            vec![member("l1", 1, 0.5, 2, 10, -1), member("l2", 2, 0.5, 2, 10, -1)],
        );
        let plan = plan(&g, DEFAULT_SESSION_LIMIT, t0(), &mut rng());
        assert_eq!(
            plan.queue,
            vec!["l1".to_string(), "l2".to_string(), "l3".to_string()]
        );
    }

    #[test]
    fn test_deterministic_with_seeded_rng() {
        let variants: Vec<Item> = (0..8)
            .map(|i| member(&format!("v{}", i), 1, 10.0, 5, 80, 3 + i as i64))
            .collect();
        let g = group(member("root", 1, 10.0, 5, 80, 5), variants);
        let a = plan(&g, DEFAULT_SESSION_LIMIT, t0(), &mut rng());
        let b = plan(&g, DEFAULT_SESSION_LIMIT, t0(), &mut rng());
        assert_eq!(a, b);
    }
}
