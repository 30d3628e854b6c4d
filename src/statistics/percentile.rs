//! Nearest-rank percentiles over integer nanosecond samples.
//!
//! The rank for probability `p` over `n` sorted samples is
//! `floor(p * (n - 1))` (zero-based), and the value at that rank is
//! returned as-is. There is no interpolation between neighbouring ranks,
//! so results always are observed sample values. For `[10, 20, 30, 40, 50]`
//! this gives p50 = 30, p90 = 40, p99 = 40.
//!
//! `p <= 0` returns the first element and `p >= 1` the last, without
//! computing a rank.

/// Compute percentile `p` of pre-sorted (ascending) samples.
///
/// Returns 0 for an empty slice. A NaN probability is treated as 0.
/// The caller must ensure the data is sorted; this is not verified.
pub fn percentile_sorted(sorted: &[u64], p: f64) -> u64 {
    let n = sorted.len();
    if n == 0 {
        return 0;
    }

    if p.is_nan() || p <= 0.0 {
        return sorted[0];
    }
    if p >= 1.0 {
        return sorted[n - 1];
    }

    sorted[rank(n, p)]
}

/// Compute percentile `p` of samples in any order.
///
/// Sorts a copy; `samples` is left untouched. Prefer
/// [`percentile_sorted`] when computing several percentiles of one set.
pub fn percentile(samples: &[u64], p: f64) -> u64 {
    let mut sorted = samples.to_vec();
    sorted.sort_unstable();
    percentile_sorted(&sorted, p)
}

/// Zero-based nearest rank for `0 < p < 1` over `n > 0` samples.
fn rank(n: usize, p: f64) -> usize {
    let h = p * (n - 1) as f64;
    (h.floor() as usize).min(n - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIVE: [u64; 5] = [10, 20, 30, 40, 50];

    #[test]
    fn test_five_sample_ranks() {
        assert_eq!(percentile_sorted(&FIVE, 0.50), 30);
        assert_eq!(percentile_sorted(&FIVE, 0.90), 40);
        assert_eq!(percentile_sorted(&FIVE, 0.99), 40);
        assert_eq!(percentile_sorted(&FIVE, 0.999), 40);
    }

    #[test]
    fn test_boundaries() {
        assert_eq!(percentile_sorted(&FIVE, 0.0), 10);
        assert_eq!(percentile_sorted(&FIVE, -1.0), 10);
        assert_eq!(percentile_sorted(&FIVE, 1.0), 50);
        assert_eq!(percentile_sorted(&FIVE, 7.5), 50);
        assert_eq!(percentile_sorted(&FIVE, f64::NAN), 10);
    }

    #[test]
    fn test_no_interpolation() {
        // R-7 would give 15 here; nearest rank picks an observed value.
        assert_eq!(percentile_sorted(&[10, 20], 0.5), 10);
        assert_eq!(percentile_sorted(&[10, 20], 0.99), 10);
    }

    #[test]
    fn test_single_element() {
        for p in [0.0, 0.25, 0.5, 0.9, 0.999, 1.0] {
            assert_eq!(percentile_sorted(&[42], p), 42);
        }
    }

    #[test]
    fn test_empty_is_zero() {
        assert_eq!(percentile_sorted(&[], 0.5), 0);
        assert_eq!(percentile(&[], 0.99), 0);
    }

    #[test]
    fn test_unsorted_input_copied() {
        let samples = vec![50, 10, 40, 30, 20];
        assert_eq!(percentile(&samples, 0.5), 30);
        assert_eq!(samples, vec![50, 10, 40, 30, 20]);
    }

    #[test]
    fn test_p999_on_thousand_samples() {
        let data: Vec<u64> = (1..=1000).collect();
        // floor(0.999 * 999) = 998 -> value 999
        assert_eq!(percentile_sorted(&data, 0.999), 999);
        // floor(0.99 * 999) = 989 -> value 990
        assert_eq!(percentile_sorted(&data, 0.99), 990);
    }
}
