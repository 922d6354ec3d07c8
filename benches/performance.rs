//! Performance benchmarks for the grocery tracker.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pantry::{
    compute_monthly_totals, compute_stock, export_csv, parse_csv, Item, ItemDraft, ItemId,
    StoreConfig, Tracker,
};
use tempfile::TempDir;

fn synthetic_items(count: usize) -> Vec<Item> {
    (0..count)
        .map(|i| Item {
            id: ItemId(i as u64 + 1),
            name: format!("item-{i}"),
            cost: (i % 700) as f64 / 100.0,
            quantity: (i % 9) as u32,
            expiry: "2031-01-01".to_string(),
            date_added: format!("2024-{:02}-10", i % 12 + 1),
            serving_size: None,
            calories: None,
            fat: None,
            carbohydrates: None,
            protein: None,
            sodium: None,
        })
        .collect()
}

/// Benchmark the from-scratch recompute that follows every mutation.
fn bench_aggregation(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregation");

    for size in [100, 1_000, 10_000] {
        let items = synthetic_items(size);

        group.bench_with_input(BenchmarkId::new("monthly_totals", size), &items, |b, items| {
            b.iter(|| black_box(compute_monthly_totals(black_box(items))));
        });

        group.bench_with_input(BenchmarkId::new("stock", size), &items, |b, items| {
            b.iter(|| black_box(compute_stock(black_box(items))));
        });
    }

    group.finish();
}

/// Benchmark delimited export/import at varying store sizes.
fn bench_exchange(c: &mut Criterion) {
    let mut group = c.benchmark_group("exchange");

    for size in [100, 1_000, 10_000] {
        let items = synthetic_items(size);
        let text = export_csv(&items).unwrap();

        group.bench_with_input(BenchmarkId::new("export", size), &items, |b, items| {
            b.iter(|| black_box(export_csv(black_box(items)).unwrap()));
        });

        group.bench_with_input(BenchmarkId::new("parse", size), &text, |b, text| {
            b.iter(|| black_box(parse_csv(black_box(text))));
        });
    }

    group.finish();
}

/// Benchmark the whole-slot read-modify-write of a single add.
fn bench_mutation(c: &mut Criterion) {
    let mut group = c.benchmark_group("mutation");
    group.sample_size(20);

    for size in [100, 1_000] {
        group.bench_with_input(BenchmarkId::new("add", size), &size, |b, &size| {
            let dir = TempDir::new().unwrap();
            let mut tracker = Tracker::open(StoreConfig {
                path: dir.path().join("pantry"),
                create_if_missing: true,
            })
            .unwrap();
            tracker
                .import_merge(
                    synthetic_items(size)
                        .into_iter()
                        .map(|item| pantry::RawRecord {
                            id: Some(item.id),
                            name: item.name,
                            cost: item.cost,
                            quantity: item.quantity,
                            expiry: item.expiry,
                            date_added: Some(item.date_added),
                            ..Default::default()
                        })
                        .collect(),
                )
                .unwrap();

            let draft = ItemDraft::new("Milk", "3.50", "2", "2031-01-01");
            b.iter(|| black_box(tracker.add(&draft).unwrap()));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_aggregation, bench_exchange, bench_mutation);
criterion_main!(benches);
