//! Mission Planner
//!
//! Clusters overdue concepts by their structured key into named
//! remediation campaigns. A cluster only becomes a mission with enough
//! mass (two or more members, or at least one critically decayed one);
//! everything else is emitted individually as an orphan. Every input item
//! lands in exactly one mission or in the orphan list.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::sanitize::safe_ratio;
use crate::types::{Item, Mission, MissionType, CRITICAL_STABILITY_DAYS};

const REPAIR_BASE_PRIORITY: i32 = 10;
const EXPANSION_PRIORITY: i32 = 5;
const SYNTHESIS_PRIORITY: i32 = 1;

/// Average stability above which a cluster is healthy enough to extend
/// rather than repair or consolidate
const EXPANSION_STABILITY_DAYS: f64 = 20.0;

/// Planner output: missions sorted by descending priority, plus the item
/// ids with insufficient cluster mass for a dedicated session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MissionPlan {
    pub missions: Vec<Mission>,
    pub orphans: Vec<String>,
}

/// Cluster `overdue_items` into missions and orphans
pub fn plan(overdue_items: &[Item]) -> MissionPlan {
    // BTreeMap keeps cluster iteration stable for identical inputs
    let mut clusters: BTreeMap<String, Vec<&Item>> = BTreeMap::new();
    let mut orphans: Vec<String> = Vec::new();

    for item in overdue_items {
        match &item.record {
            Some(rec) => clusters
                .entry(rec.key.cluster_key())
                .or_default()
                .push(item),
            // No record means nothing to remediate as a group
            None => orphans.push(item.id.clone()),
        }
    }

    let mut missions: Vec<Mission> = Vec::new();

    for (cluster_key, members) in clusters {
        let critical_count = members
            .iter()
            .filter_map(|item| item.record.as_ref())
            .filter(|rec| rec.memory.stability < CRITICAL_STABILITY_DAYS)
            .count();
        let stability_sum: f64 = members
            .iter()
            .filter_map(|item| item.record.as_ref())
            .map(|rec| rec.memory.stability)
            .sum();
        let avg_stability = safe_ratio(stability_sum, members.len() as f64);

        if members.len() < 2 && critical_count == 0 {
            orphans.extend(members.iter().map(|item| item.id.clone()));
            continue;
        }

        let (mission_type, priority, reason) = if critical_count > 0 {
            (
                MissionType::Repair,
                REPAIR_BASE_PRIORITY + critical_count as i32,
                format!(
                    "{} concept(s) in {} are critically decayed",
                    critical_count, cluster_key
                ),
            )
        } else if avg_stability > EXPANSION_STABILITY_DAYS {
            (
                MissionType::Expansion,
                EXPANSION_PRIORITY,
                format!(
                    "{} is stable (avg {:.1} days); room to go deeper",
                    cluster_key, avg_stability
                ),
            )
        } else {
            (
                MissionType::Synthesis,
                SYNTHESIS_PRIORITY,
                format!(
                    "{} is drifting (avg {:.1} days); tie the pieces together",
                    cluster_key, avg_stability
                ),
            )
        };

        let target_item_ids: BTreeSet<String> =
            members.iter().map(|item| item.id.clone()).collect();

        missions.push(Mission {
            title: format!("{}: {}", mission_type.as_str(), cluster_key),
            mission_type,
            reason,
            target_item_ids,
            priority,
        });
    }

    missions.sort_by(|a, b| b.priority.cmp(&a.priority));

    info!(
        missions = missions.len(),
        orphans = orphans.len(),
        "Mission plan built"
    );

    MissionPlan { missions, orphans }
}
