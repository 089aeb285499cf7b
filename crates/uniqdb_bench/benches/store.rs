//! Table store benchmarks.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use serde_json::json;
use uniqdb_store::{Guard, InMemoryStore, Item, KeySchema, TableStore, WriteDirective};

fn user_item(n: u64) -> Item {
    [
        ("id".to_string(), json!(format!("u{n}"))),
        ("email".to_string(), json!(format!("u{n}@example.com"))),
    ]
    .into_iter()
    .collect()
}

fn users_store() -> InMemoryStore {
    let store = InMemoryStore::new();
    store.create_table("users", KeySchema::hash("id")).unwrap();
    store
}

/// Benchmark conditional puts at varying transaction sizes.
fn bench_transact_put(c: &mut Criterion) {
    let mut group = c.benchmark_group("transact_put");

    for batch in [1u64, 3, 5].iter() {
        group.throughput(Throughput::Elements(*batch));
        group.bench_with_input(BenchmarkId::from_parameter(batch), batch, |b, &batch| {
            let store = users_store();
            let mut n = 0u64;

            b.iter(|| {
                let directives: Vec<WriteDirective> = (0..batch)
                    .map(|_| {
                        n += 1;
                        WriteDirective::put("users", user_item(n), Some(Guard::Absent))
                    })
                    .collect();
                store.transact(black_box(directives)).unwrap();
            });
        });
    }

    group.finish();
}

/// Benchmark point reads against a populated table.
fn bench_get(c: &mut Criterion) {
    let mut group = c.benchmark_group("get");

    for size in [100u64, 1000].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            let store = users_store();
            for n in 0..size {
                store
                    .transact(vec![WriteDirective::put("users", user_item(n), None)])
                    .unwrap();
            }
            let key: Item = [("id".to_string(), json!(format!("u{}", size / 2)))]
                .into_iter()
                .collect();

            b.iter(|| {
                let item = store.get("users", black_box(&key)).unwrap();
                black_box(item);
            });
        });
    }

    group.finish();
}

/// Benchmark a rejected transaction (guard failure path).
fn bench_rejected_transact(c: &mut Criterion) {
    let store = users_store();
    store
        .transact(vec![WriteDirective::put("users", user_item(0), None)])
        .unwrap();

    c.bench_function("transact_rejected", |b| {
        b.iter(|| {
            let result = store.transact(vec![WriteDirective::put(
                "users",
                user_item(0),
                Some(Guard::Absent),
            )]);
            black_box(result.is_err());
        });
    });
}

criterion_group!(benches, bench_transact_put, bench_get, bench_rejected_transact);
criterion_main!(benches);
