//! Property-based tests for the refresh policy.

use labelmarks::services::refresh_policy::is_stale;
use proptest::prelude::*;

const YEAR_3000: i64 = 32_503_680_000_000;

proptest! {
    #[test]
    fn never_refreshed_is_stale_once_ttl_has_elapsed(
        ttl in 1i64..=86_400_000 * 365,
        offset in 1i64..YEAR_3000,
    ) {
        prop_assert!(is_stale(0, ttl + offset, ttl));
    }

    #[test]
    fn boundary_is_exclusive(
        last in 0i64..YEAR_3000,
        ttl in 1i64..=86_400_000 * 30,
    ) {
        prop_assert!(!is_stale(last, last + ttl - 1, ttl));
        prop_assert!(!is_stale(last, last + ttl, ttl));
        prop_assert!(is_stale(last, last + ttl + 1, ttl));
    }

    #[test]
    fn is_total_over_extreme_inputs(
        last in any::<i64>(),
        now in any::<i64>(),
        ttl in any::<i64>(),
    ) {
        // Must not panic on overflow.
        let _ = is_stale(last, now, ttl);
    }
}
