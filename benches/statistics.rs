use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use tail_latency::statistics::{percentile, Stats};

/// Skewed synthetic latencies: mostly ~20ns with a sparse microsecond tail.
fn synthetic(n: usize) -> Vec<u64> {
    (0..n as u64)
        .map(|i| {
            let x = i.wrapping_mul(0x9e37_79b9_7f4a_7c15) >> 40;
            if x % 1000 == 0 {
                5_000 + x % 20_000
            } else {
                15 + x % 10
            }
        })
        .collect()
}

fn bench_stats(c: &mut Criterion) {
    let mut group = c.benchmark_group("stats");
    group.sample_size(20);
    for n in [10_000usize, 200_000, 1_000_000] {
        let samples = synthetic(n);
        group.bench_with_input(BenchmarkId::new("compute", n), &samples, |b, s| {
            b.iter(|| black_box(Stats::compute(s)))
        });
        group.bench_with_input(BenchmarkId::new("single_percentile", n), &samples, |b, s| {
            b.iter(|| black_box(percentile(s, 0.999)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_stats);
criterion_main!(benches);
