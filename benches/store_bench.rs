//! Store Benchmarks — Validation and Export Hot Paths
//!
//! Benchmarks the functions that run on every form submit and on the
//! admin export action.
//!
//! Run with: cargo bench --bench store_bench

use criterion::{Criterion, black_box, criterion_group, criterion_main};

use silverage_store::domain::reservation::{
    ReservationRecord, ReservationStats,
};
use silverage_store::domain::validate::{is_valid_email, is_valid_phone};
use silverage_store::usecases::export::render_reservations_csv;

/// Benchmark the validation patterns applied to every form submit.
fn bench_validation(c: &mut Criterion) {
    c.bench_function("validate_phone", |b| {
        b.iter(|| is_valid_phone(black_box("13800138000")));
    });

    c.bench_function("validate_email", |b| {
        b.iter(|| is_valid_email(black_box("zhang.wei@city.gov.cn")));
    });
}

fn sample_records(n: usize) -> Vec<ReservationRecord> {
    (0..n)
        .map(|i| {
            ReservationRecord::new(
                format!("Resident {i}"),
                "13800138000".into(),
                "2026-09-15".parse().unwrap(),
                "home-care".into(),
                "weekly visit, morning preferred".into(),
            )
        })
        .collect()
}

/// Benchmark stats aggregation over a full collection.
fn bench_stats_collect(c: &mut Criterion) {
    let records = sample_records(1000);

    c.bench_function("stats_collect_1000", |b| {
        b.iter(|| ReservationStats::collect(black_box(&records)));
    });
}

/// Benchmark CSV rendering of a realistic export.
fn bench_csv_export(c: &mut Criterion) {
    let records = sample_records(1000);
    let stats = ReservationStats::collect(&records);

    c.bench_function("csv_export_1000", |b| {
        b.iter(|| render_reservations_csv(black_box(&records), black_box(&stats)));
    });
}

criterion_group!(benches, bench_validation, bench_stats_collect, bench_csv_export);
criterion_main!(benches);
