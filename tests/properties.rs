//! Property tests for the tail-statistics engine.

use proptest::prelude::*;
use tail_latency::statistics::{percentile, percentile_sorted, Stats};

fn arb_samples() -> impl Strategy<Value = Vec<u64>> {
    prop::collection::vec(0u64..10_000_000, 1..2_000)
}

proptest! {
    #[test]
    fn percentiles_are_ordered(samples in arb_samples()) {
        let s = Stats::compute(&samples);
        prop_assert!(s.min <= s.p50);
        prop_assert!(s.p50 <= s.p90);
        prop_assert!(s.p90 <= s.p99);
        prop_assert!(s.p99 <= s.p999);
        prop_assert!(s.p999 <= s.max);
    }

    #[test]
    fn mean_within_extrema(samples in arb_samples()) {
        let s = Stats::compute(&samples);
        prop_assert!(s.min as f64 <= s.avg);
        prop_assert!(s.avg <= s.max as f64);
    }

    #[test]
    fn single_sample_is_every_percentile(v in any::<u64>(), p in 0.0f64..=1.0) {
        prop_assert_eq!(percentile(&[v], p), v);
    }

    #[test]
    fn compute_leaves_input_untouched(samples in arb_samples()) {
        let before = samples.clone();
        let _ = Stats::compute(&samples);
        prop_assert_eq!(samples, before);
    }

    #[test]
    fn percentile_is_an_observed_sample(samples in arb_samples(), p in 0.0f64..=1.0) {
        let v = percentile(&samples, p);
        prop_assert!(samples.contains(&v));
    }

    #[test]
    fn matches_nearest_rank_formula(samples in arb_samples(), p in 0.001f64..0.999) {
        let mut sorted = samples.clone();
        sorted.sort_unstable();
        let rank = (p * (sorted.len() - 1) as f64).floor() as usize;
        prop_assert_eq!(percentile_sorted(&sorted, p), sorted[rank]);
    }

    #[test]
    fn extrema_match_iterators(samples in arb_samples()) {
        let s = Stats::compute(&samples);
        prop_assert_eq!(Some(s.min), samples.iter().copied().min());
        prop_assert_eq!(Some(s.max), samples.iter().copied().max());
    }
}

#[test]
fn reference_five_samples() {
    let samples = [10, 20, 30, 40, 50];
    assert_eq!(percentile(&samples, 0.0), 10);
    assert_eq!(percentile(&samples, 0.50), 30);
    assert_eq!(percentile(&samples, 0.90), 40);
    assert_eq!(percentile(&samples, 0.99), 40);
    assert_eq!(percentile(&samples, 1.0), 50);
}
