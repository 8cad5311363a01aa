//! Binomial coefficients for counting reactant combinations.
//!
//! `C(n, k)` is the number of ways to draw `k` molecules of one species out of
//! `n` copies. The coefficient is accumulated multiplicatively, one factor per
//! step, and every step divides exactly, so no factorials are ever formed.
//!
//! Exact results are available up to `u64::MAX`: for bimolecular reactions that
//! covers copy numbers up to about 6·10⁹, for trimolecular ones about 4.8·10⁶,
//! and the largest central coefficient that fits is `C(67, 33)`. Beyond that
//! [`choose_f64`] widens to floating point.

use log::debug;

/// Exact binomial coefficient, `None` if the result does not fit in a `u64`.
///
/// Returns `Some(0)` when `k > n`.
pub fn checked_choose(n: u64, k: u64) -> Option<u64> {
    if k > n {
        return Some(0);
    }

    // C(n, k) == C(n, n - k); iterate over the shorter side.
    let k = k.min(n - k);

    // After step j the accumulator holds C(n0, j). Those values grow with j up
    // to k <= n0 / 2, so an overflow at any step means the result overflows.
    let mut ans: u64 = 1;
    let mut n = n;
    for j in 1..=k {
        ans = if n % j == 0 {
            ans.checked_mul(n / j)?
        } else if ans % j == 0 {
            (ans / j).checked_mul(n)?
        } else {
            let wide = u128::from(ans) * u128::from(n) / u128::from(j);
            u64::try_from(wide).ok()?
        };
        n -= 1;
    }

    Some(ans)
}

/// Binomial coefficient, saturating at `u64::MAX`.
#[inline]
pub fn choose(n: u64, k: u64) -> u64 {
    checked_choose(n, k).unwrap_or(u64::MAX)
}

/// Binomial coefficient as a float.
///
/// Exact whenever the coefficient fits in a `u64` (up to the rounding of the
/// final conversion). Larger coefficients are computed as a floating product
/// and may reach infinity.
pub fn choose_f64(n: u64, k: u64) -> f64 {
    if let Some(exact) = checked_choose(n, k) {
        return exact as f64;
    }

    debug!("C({n}, {k}) exceeds u64, widening to f64");

    // checked_choose only fails when k <= n.
    let k = k.min(n - k);
    let mut acc = 1.0f64;
    for i in 0..k {
        acc *= (n - i) as f64 / (i + 1) as f64;
        if acc.is_infinite() {
            break;
        }
    }
    acc
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_known_values() {
        assert_eq!(choose(5, 2), 10);
        assert_eq!(choose(10, 3), 120);
        assert_eq!(choose(0, 0), 1);
        assert_eq!(choose(4, 5), 0);
        assert_eq!(choose(1, 1), 1);
        assert_eq!(choose(52, 5), 2_598_960);
    }

    #[test]
    fn test_k_exceeds_n() {
        assert_eq!(checked_choose(0, 1), Some(0));
        assert_eq!(checked_choose(3, 100), Some(0));
        assert_eq!(choose_f64(2, 3), 0.0);
    }

    #[test]
    fn test_largest_exact_central_coefficient() {
        assert_eq!(checked_choose(67, 33), Some(14_226_520_737_620_288_370));
        assert_eq!(checked_choose(68, 34), None);
        assert_eq!(choose(68, 34), u64::MAX);
    }

    #[test]
    fn test_large_n_small_k() {
        // Copy numbers far above i32 range.
        let n = 3_000_000_000u64;
        assert_eq!(checked_choose(n, 1), Some(n));
        assert_eq!(checked_choose(n, 2), Some(n * (n - 1) / 2));
        assert_eq!(checked_choose(n, n - 1), Some(n));
    }

    #[test]
    fn test_widening_on_overflow() {
        let exact = choose_f64(68, 34);
        let expected = 28_453_041_475_240_576_740.0f64;
        assert!((exact - expected).abs() / expected < 1e-12);

        assert_eq!(choose_f64(u64::MAX, u64::MAX / 2), f64::INFINITY);
    }

    fn pairs_up_to(max: u64) -> impl Strategy<Value = (u64, u64)> {
        (0..=max).prop_flat_map(|n| (Just(n), 0..=n))
    }

    proptest! {
        #[test]
        fn prop_choose_zero_is_one(n in any::<u64>()) {
            prop_assert_eq!(choose(n, 0), 1);
        }

        #[test]
        fn prop_choose_symmetric((n, k) in pairs_up_to(2_000)) {
            prop_assert_eq!(checked_choose(n, k), checked_choose(n, n - k));
        }

        #[test]
        fn prop_choose_k_exceeds_n(n in 0u64..1_000_000, extra in 1u64..1_000) {
            prop_assert_eq!(choose(n, n + extra), 0);
        }

        #[test]
        fn prop_pascal_rule((n, k) in pairs_up_to(62)) {
            prop_assume!(n >= 1 && k >= 1);
            prop_assert_eq!(choose(n, k), choose(n - 1, k - 1) + choose(n - 1, k));
        }

        #[test]
        fn prop_f64_matches_exact((n, k) in pairs_up_to(60)) {
            prop_assert_eq!(choose_f64(n, k), choose(n, k) as f64);
        }
    }
}
