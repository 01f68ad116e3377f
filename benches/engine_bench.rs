//! Benchmark suite for recall-engine
//!
//! Run with: cargo bench

use chrono::{Duration, TimeZone, Utc};
use criterion::{criterion_group, criterion_main, Criterion};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use recall_engine::{
    schedule, session, ConceptGroup, ConceptRecord, FsrsParams, Item, MemoryPhase, MemoryState,
    Rating,
};

fn bench_schedule(c: &mut Criterion) {
    let params = FsrsParams::default();
    let now = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
    let state = MemoryState {
        stability: 8.0,
        difficulty: 0.3,
        reps: 6,
        lapses: 1,
        phase: MemoryPhase::Review,
        last_reviewed: Some(now - Duration::days(8)),
        due_at: now,
    };
    c.bench_function("fsrs::schedule review/good", |b| {
        b.iter(|| schedule(&state, Rating::Good, now, &params))
    });
}

fn bench_session_plan(c: &mut Criterion) {
    let now = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
    let variants: Vec<Item> = (0..50)
        .map(|i| {
            let mut rec =
                ConceptRecord::ingest(Some("lang.grammar.tense"), "Tense", "", 1 + i % 4);
            rec.memory.stability = (i % 10) as f64;
            rec.memory.reps = i % 6;
            rec.memory.due_at = now + Duration::days(i as i64 - 25);
            Item::new(format!("v{}", i), Some(rec))
        })
        .collect();
    let group = ConceptGroup {
        root: Item::new("root", None),
        variants,
    };
    c.bench_function("session::plan 50 members", |b| {
        b.iter(|| {
            let mut rng = ChaCha8Rng::seed_from_u64(42);
            session::plan(&group, 5, now, &mut rng)
        })
    });
}

criterion_group!(benches, bench_schedule, bench_session_plan);
criterion_main!(benches);
