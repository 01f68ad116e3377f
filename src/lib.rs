//! # recall-engine - memory scheduling and session triage
//!
//! Pure Rust engine for a spaced-repetition learning tool:
//!
//! - **FSRS Scheduler** - forgetting-curve state and rating-driven updates
//! - **Rating Classifier** - interaction telemetry to discrete ratings
//! - **Review Commit** - classification + scheduling + mastery scoring,
//!   with anti-gaming consolidation
//! - **Concept Aggregation** - weakest-link health across phrasings
//! - **Page Lifecycle** - lock/unlock cycles with a grace buffer
//! - **Session Planner** - bounded four-tier adaptive study queues
//! - **Mission Planner** - clustering decayed concepts into campaigns
//!
//! ## Design
//!
//! Every entry point is a pure, synchronous function over immutable
//! snapshots. Time is always an explicit `now: DateTime<Utc>` argument
//! supplied by the caller, never read from a system clock, so the whole
//! engine is deterministic and time-travel testable. The one source of
//! nondeterminism, tier-4 session interleaving, runs on a caller-supplied
//! RNG. Persistence, rendering, and prompt generation live in the calling
//! layers; this crate owns no wire format and holds no state between
//! calls.
//!
//! ## Module structure
//!
//! - [`types`] - shared data model and constants
//! - [`sanitize`] - numerical guards (finiteness, clamping)
//! - [`fsrs`] - FSRS memory model and scheduler
//! - [`rating`] - telemetry classification
//! - [`commit`] - review commit protocol
//! - [`aggregate`] - concept group aggregation
//! - [`lifecycle`] - page cycle evaluation
//! - [`session`] - adaptive session planning
//! - [`mission`] - mission clustering
//!
//! ## Example
//!
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use recall_engine::{commit, FsrsParams};
//!
//! let now = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
//! let params = FsrsParams::default();
//! let record = commit(None, true, 1, now, None, &params);
//! assert!(record.memory.stability > 0.0);
//! ```

pub mod aggregate;
pub mod commit;
pub mod fsrs;
pub mod lifecycle;
pub mod mission;
pub mod rating;
pub mod sanitize;
pub mod session;
pub mod types;

pub use types::*;

pub use aggregate::aggregate;
pub use commit::{commit, stability_target};
pub use fsrs::{is_mastered, retrievability, schedule, FsrsParams};
pub use lifecycle::{evaluate, next_cycle, weekly_gate, CycleEval};
pub use mission::MissionPlan;
pub use rating::{baseline_ms, classify};
pub use session::{SessionPlan, SessionStrategy};
