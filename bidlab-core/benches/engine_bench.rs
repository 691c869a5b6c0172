//! Criterion benchmarks for BidLab hot paths.
//!
//! Benchmarks:
//! 1. Full slot loop (simulate across 48 slots)
//! 2. Single-slot auction batch
//! 3. Pacing table lookup

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;

use bidlab_core::domain::{
    AdvertiserProfile, PacingBreakpoint, PacingTable, TrafficRecord, TrafficSource, TOTAL_SLOTS,
};
use bidlab_core::engine::{run_slot, simulate};

// ── Helpers ──────────────────────────────────────────────────────────

fn make_traffic(records_per_slot: usize) -> TrafficSource {
    let records: Vec<TrafficRecord> = (0..TOTAL_SLOTS as u32)
        .flat_map(|slot| {
            (0..records_per_slot).map(move |i| TrafficRecord {
                time_slot: slot,
                p_value: 0.001 + (i as f64 * 0.37).sin().abs() * 0.05,
                least_winning_cost: 0.5 + (i as f64 * 0.53).cos().abs() * 5.0,
            })
        })
        .collect();
    TrafficSource::from_records(records).expect("valid slots")
}

fn make_pacing(breakpoints_per_group: usize) -> PacingTable {
    let rows = (0..TOTAL_SLOTS as u32).flat_map(|slot| {
        (0..breakpoints_per_group).map(move |i| {
            (
                slot,
                1,
                PacingBreakpoint {
                    cumulative_cost_threshold: 500.0 * (i + 1) as f64,
                    realized_cpa: 60.0 + 5.0 * i as f64,
                },
            )
        })
    });
    PacingTable::from_rows(rows)
}

fn make_profile() -> AdvertiserProfile {
    AdvertiserProfile {
        advertiser: 101,
        category: 1,
        budget: 10_000.0,
        cpa_constraint: 100.0,
    }
}

// ── Benchmarks ───────────────────────────────────────────────────────

fn bench_simulate(c: &mut Criterion) {
    let mut group = c.benchmark_group("simulate");
    for records_per_slot in [50, 200, 1000] {
        let traffic = make_traffic(records_per_slot);
        let pacing = make_pacing(8);
        let profile = make_profile();

        group.bench_with_input(
            BenchmarkId::from_parameter(records_per_slot),
            &records_per_slot,
            |b, _| {
                b.iter(|| {
                    let mut rng = StdRng::seed_from_u64(42);
                    simulate(
                        black_box(&profile),
                        black_box(&traffic),
                        black_box(&pacing),
                        &mut rng,
                    )
                })
            },
        );
    }
    group.finish();
}

fn bench_run_slot(c: &mut Criterion) {
    let traffic = make_traffic(1000);
    let records = traffic.records_for_slot(0);

    c.bench_function("run_slot_1000", |b| {
        b.iter(|| {
            let mut rng = StdRng::seed_from_u64(42);
            run_slot(black_box(100.0), black_box(records), &mut rng)
        })
    });
}

fn bench_pacing_lookup(c: &mut Criterion) {
    let pacing = make_pacing(64);

    c.bench_function("pacing_lookup", |b| {
        b.iter(|| pacing.lookup(black_box(12), black_box(1), black_box(3000.0)))
    });
}

criterion_group!(benches, bench_simulate, bench_run_slot, bench_pacing_lookup);
criterion_main!(benches);
