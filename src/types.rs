//! Common Types and Constants
//!
//! Shared data structures used across all engine modules.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ==================== Constants ====================

/// Post-update stability floor (days); the scheduler never emits less
pub const STABILITY_FLOOR: f64 = 0.1;

/// Stability below which a reviewed concept counts as critically decayed (days)
pub const CRITICAL_STABILITY_DAYS: f64 = 2.0;

/// Repeated reviews inside this window are one study event, not new
/// spaced-repetition events
pub const CONSOLIDATION_WINDOW_MINUTES: i64 = 20;

/// Grace buffer around a page's due instant before it locks
pub const PAGE_GRACE_MINUTES: i64 = 60;

/// Default session queue bound
pub const DEFAULT_SESSION_LIMIT: usize = 5;

/// Review-volume half of the weekly unlock gate
pub const WEEKLY_GATE_REVIEW_COUNT: i32 = 10;

// ==================== Rating ====================

/// Discrete review outcome driving the scheduler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rating {
    Again = 1,
    Hard = 2,
    Good = 3,
    Easy = 4,
}

impl Rating {
    /// Fallback heuristic when no telemetry is available: a clean first-try
    /// correct answer is Good, a correct retry is Hard, a miss is Again.
    pub fn from_correct(is_correct: bool, attempts: i32) -> Self {
        if !is_correct {
            Self::Again
        } else if attempts > 1 {
            Self::Hard
        } else {
            Self::Good
        }
    }

    pub fn is_success(&self) -> bool {
        !matches!(self, Self::Again)
    }
}

// ==================== Memory state ====================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MemoryPhase {
    New,
    Learning,
    Review,
    Relearning,
}

impl Default for MemoryPhase {
    fn default() -> Self {
        Self::New
    }
}

impl MemoryPhase {
    pub fn from_str(s: &str) -> Self {
        match s.to_uppercase().as_str() {
            "LEARNING" => Self::Learning,
            "REVIEW" => Self::Review,
            "RELEARNING" => Self::Relearning,
            _ => Self::New,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New => "NEW",
            Self::Learning => "LEARNING",
            Self::Review => "REVIEW",
            Self::Relearning => "RELEARNING",
        }
    }
}

/// Per-instance forgetting-curve state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryState {
    /// Expected days until retrievability decays to the reference threshold
    pub stability: f64,
    /// Normalized difficulty in [0.05, 1.0]
    pub difficulty: f64,
    pub reps: i32,
    pub lapses: i32,
    pub phase: MemoryPhase,
    pub last_reviewed: Option<DateTime<Utc>>,
    pub due_at: DateTime<Utc>,
}

impl Default for MemoryState {
    fn default() -> Self {
        Self {
            stability: 0.0,
            difficulty: 0.3,
            reps: 0,
            lapses: 0,
            phase: MemoryPhase::New,
            last_reviewed: None,
            due_at: DateTime::<Utc>::UNIX_EPOCH,
        }
    }
}

impl MemoryState {
    pub fn is_new(&self) -> bool {
        self.reps == 0
    }

    /// Days elapsed since the last review, 0 for never-reviewed state
    pub fn elapsed_days(&self, now: DateTime<Utc>) -> f64 {
        match self.last_reviewed {
            Some(last) => ((now - last).num_seconds() as f64 / 86_400.0).max(0.0),
            None => 0.0,
        }
    }
}

// ==================== Concept identity ====================

/// Structured concept identity, parsed once from the dotted `entityId`
/// at ingestion rather than re-split by every consumer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConceptKey {
    pub domain: String,
    pub subtopic: Option<String>,
    pub concept: Option<String>,
}

impl ConceptKey {
    pub fn parse(entity_id: &str) -> Self {
        let mut parts = entity_id.split('.');
        let domain = parts.next().unwrap_or_default().to_string();
        let subtopic = parts.next().map(str::to_string);
        let concept = parts.next().map(str::to_string);
        Self {
            domain,
            subtopic,
            concept,
        }
    }

    /// Cluster label used by the mission planner: `subtopic.concept` when
    /// both segments exist, `subtopic` alone when only it does, otherwise
    /// the generic bucket.
    pub fn cluster_key(&self) -> String {
        match (&self.subtopic, &self.concept) {
            (Some(sub), Some(con)) => format!("{}.{}", sub, con),
            (Some(sub), None) => sub.clone(),
            _ => "General".to_string(),
        }
    }
}

// ==================== Concept record ====================

/// Persisted per-instance concept state: identity fields plus the embedded
/// forgetting-curve state. All phrasings of one concept share `entity_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConceptRecord {
    pub entity_id: String,
    pub key: ConceptKey,
    pub level: i32,
    pub integrated_levels: BTreeSet<i32>,
    pub name: String,
    pub objective: String,
    pub mastery_score: i32,
    #[serde(flatten)]
    pub memory: MemoryState,
}

impl ConceptRecord {
    /// Create a record at first ingestion. A missing or empty `entity_id`
    /// gets a synthesized one so the record is always groupable.
    pub fn ingest(
        entity_id: Option<&str>,
        name: impl Into<String>,
        objective: impl Into<String>,
        level: i32,
    ) -> Self {
        let entity_id = match entity_id {
            Some(id) if !id.trim().is_empty() => id.to_string(),
            _ => uuid::Uuid::new_v4().to_string(),
        };
        let key = ConceptKey::parse(&entity_id);
        Self {
            entity_id,
            key,
            level: level.max(1),
            integrated_levels: BTreeSet::new(),
            name: name.into(),
            objective: objective.into(),
            mastery_score: 0,
            memory: MemoryState::default(),
        }
    }
}

// ==================== Items, groups, pages ====================

/// One phrasing/variant instance; interaction UI state lives outside this core
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: String,
    pub record: Option<ConceptRecord>,
}

impl Item {
    pub fn new(id: impl Into<String>, record: Option<ConceptRecord>) -> Self {
        Self {
            id: id.into(),
            record,
        }
    }
}

/// Root item plus its variants, all sharing one `entity_id` (levels may differ)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConceptGroup {
    pub root: Item,
    pub variants: Vec<Item>,
}

impl ConceptGroup {
    /// Root first, then variants, keeping only members that carry a record
    pub fn members(&self) -> impl Iterator<Item = &Item> {
        std::iter::once(&self.root)
            .chain(self.variants.iter())
            .filter(|item| item.record.is_some())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CycleStatus {
    Active,
    Locked,
}

impl CycleStatus {
    pub fn from_str(s: &str) -> Self {
        match s.to_uppercase().as_str() {
            "LOCKED" => Self::Locked,
            _ => Self::Active,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Locked => "LOCKED",
        }
    }
}

/// A page's lock/unlock state plus its next-review timestamp
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cycle {
    pub status: CycleStatus,
    pub chapter: i32,
    pub next_review: DateTime<Utc>,
}

// ==================== Missions ====================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MissionType {
    Repair,
    Expansion,
    Synthesis,
}

impl MissionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Repair => "REPAIR",
            Self::Expansion => "EXPANSION",
            Self::Synthesis => "SYNTHESIS",
        }
    }
}

/// A named cluster of decaying concepts proposed as one remediation session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mission {
    pub title: String,
    pub mission_type: MissionType,
    pub reason: String,
    pub target_item_ids: BTreeSet<String>,
    pub priority: i32,
}

// ==================== Telemetry ====================

/// Raw interaction telemetry for one answer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewTelemetry {
    pub is_correct: bool,
    pub attempts: i32,
    pub hints_used: i32,
    pub time_spent_ms: i64,
    pub item_type: String,
}
