use chrono::Utc;
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use jjvote::cooldown::{CooldownMarker, CooldownPolicy};
use jjvote::store::{CounterStore, MemoryCounterStore};
use jjvote::{VoteChoice, VoteResult, VoteService};
use std::hint::black_box;
use std::sync::Arc;
use std::time::Duration;

/// Vote path benchmarks over the in-memory store
fn bench_cast_vote(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();

    let mut group = c.benchmark_group("cast_vote");
    group.warm_up_time(Duration::from_millis(100));

    let service = VoteService::new(
        Arc::new(MemoryCounterStore::new()),
        CooldownPolicy::default(),
    );

    group.bench_function("accepted", |b| {
        b.to_async(&rt).iter(|| async {
            let receipt = service
                .cast_vote(black_box(br#"{"choice":"jjajang"}"#), None, Utc::now())
                .await
                .unwrap();
            black_box(receipt);
        })
    });

    // Rate-limited path never touches the store
    let fresh = Utc::now().timestamp_millis().to_string();
    group.bench_function("rate_limited", |b| {
        b.to_async(&rt).iter(|| async {
            let err = service
                .cast_vote(
                    black_box(br#"{"choice":"jjajang"}"#),
                    Some(black_box(fresh.as_str())),
                    Utc::now(),
                )
                .await
                .unwrap_err();
            black_box(err);
        })
    });

    group.finish();
}

/// Concurrent increments against one shared store
fn bench_concurrent_increments(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();

    let mut group = c.benchmark_group("concurrent_increments");
    group.warm_up_time(Duration::from_millis(100));

    for tasks in [10usize, 100, 1000] {
        group.bench_with_input(BenchmarkId::from_parameter(tasks), &tasks, |b, &tasks| {
            b.to_async(&rt).iter(|| async move {
                let store = Arc::new(MemoryCounterStore::new());
                let handles: Vec<_> = (0..tasks)
                    .map(|i| {
                        let store = store.clone();
                        let choice = VoteChoice::ALL[i % 2];
                        tokio::spawn(async move { store.increment(choice).await })
                    })
                    .collect();

                for handle in handles {
                    handle.await.unwrap().unwrap();
                }
                black_box(store.read().await.unwrap());
            })
        });
    }

    group.finish();
}

/// Pure helpers on the hot path
fn bench_helpers(c: &mut Criterion) {
    let mut group = c.benchmark_group("helpers");

    let rt = tokio::runtime::Runtime::new().unwrap();
    let tallies = rt
        .block_on(MemoryCounterStore::with_counts(1_234, 5_678).read())
        .unwrap();
    group.bench_function("aggregate_result", |b| {
        b.iter(|| VoteResult::from_tallies(black_box(&tallies), Utc::now()))
    });

    let policy = CooldownPolicy::default();
    let now = Utc::now().timestamp_millis();
    group.bench_function("cooldown_check", |b| {
        b.iter(|| policy.check(black_box(Some(CooldownMarker(now - 30_000))), black_box(now)))
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_cast_vote,
    bench_concurrent_increments,
    bench_helpers
);
criterion_main!(benches);
