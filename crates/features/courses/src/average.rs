//! The derived average-cost aggregate.
//!
//! A pure function invoked synchronously by every course write path. There is
//! no hidden post-save hook: create, update, and delete each call
//! [`recompute_average`] through the repository, and a failure propagates into
//! the triggering write's result.

/// Arithmetic mean of the tuitions, rounded up to the nearest multiple of 10.
///
/// Returns `None` for an empty set, which clears the aggregate on the parent.
/// Integer math keeps the ceiling exact: `ceil(mean / 10) * 10 ==
/// ceil(sum / (10 * n)) * 10`.
#[must_use]
pub fn recompute_average(tuitions: &[u32]) -> Option<u64> {
    if tuitions.is_empty() {
        return None;
    }

    let sum: u64 = tuitions.iter().map(|&t| u64::from(t)).sum();
    let n = tuitions.len() as u64;

    Some(sum.div_ceil(10 * n) * 10)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_set_clears_the_aggregate() {
        assert_eq!(recompute_average(&[]), None);
    }

    #[test]
    fn exact_mean_passes_through() {
        assert_eq!(recompute_average(&[10_000, 8_000]), Some(9_000));
        assert_eq!(recompute_average(&[10_000]), Some(10_000));
    }

    #[test]
    fn fractional_means_round_up_to_the_next_ten() {
        // mean = 7166.66… → ceil(716.66…) * 10 = 7170
        assert_eq!(recompute_average(&[6_500, 7_000, 8_000]), Some(7_170));
        // mean = 9999 → ceil(999.9) * 10 = 10000
        assert_eq!(recompute_average(&[9_999]), Some(10_000));
    }

    #[test]
    fn removal_scenario_matches_the_invariant() {
        // Add 10000 and 8000, then remove 8000.
        assert_eq!(recompute_average(&[10_000, 8_000]), Some(9_000));
        assert_eq!(recompute_average(&[10_000]), Some(10_000));
    }

    #[test]
    fn large_sets_do_not_overflow() {
        let tuitions = vec![u32::MAX; 1_000];
        let expected = u64::from(u32::MAX).div_ceil(10) * 10;
        assert_eq!(recompute_average(&tuitions), Some(expected));
    }
}
