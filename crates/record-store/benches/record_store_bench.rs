use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use record_store::{InMemoryRecordStore, RecordStore, RecordStoreExt};

fn seeded_store(rt: &tokio::runtime::Runtime, count: usize) -> InMemoryRecordStore {
    let store = InMemoryRecordStore::new();
    rt.block_on(async {
        for i in 0..count {
            let key = format!("order-{i:06}");
            store.put(&key, vec![0u8; 128]).await.unwrap();
        }
    });
    store
}

fn bench_put(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let store = InMemoryRecordStore::new();

    c.bench_function("record_store/put", |b| {
        b.iter(|| {
            rt.block_on(async {
                store.put("order-bench", vec![0u8; 128]).await.unwrap();
            });
        });
    });
}

fn bench_get(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let store = seeded_store(&rt, 1_000);

    c.bench_function("record_store/get", |b| {
        b.iter(|| {
            rt.block_on(async {
                store.get("order-000500").await.unwrap();
            });
        });
    });
}

fn bench_scan_all(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let mut group = c.benchmark_group("record_store/scan_all");

    for count in [100, 1_000, 10_000] {
        let store = seeded_store(&rt, count);
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, _| {
            b.iter(|| {
                rt.block_on(async {
                    store.collect_all().await.unwrap();
                });
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_put, bench_get, bench_scan_all);
criterion_main!(benches);
