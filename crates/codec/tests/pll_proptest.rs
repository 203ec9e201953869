//! Property-based tests for the PLL divisor math.
//! Verifies invariants hold for ALL inputs, not just fixed examples.
#![allow(clippy::arithmetic_side_effects, clippy::expect_used)]

use codec::pll::{decode, pll_factors, pllk_bytes, plln_bits};

proptest::proptest! {
    /// The solver never panics, whatever the inputs.
    #[test]
    fn never_panics(source in 0u32..=u32::MAX, target in 0u32..=u32::MAX) {
        let _ = pll_factors(source, target);
    }

    /// Deterministic and idempotent: two calls with identical inputs give
    /// identical divisors.
    #[test]
    fn deterministic(source in 1u32..=50_000_000u32, target in 1u32..=50_000_000u32) {
        let first = pll_factors(source, target);
        let second = pll_factors(source, target);
        assert_eq!(first, second);
    }

    /// Every accepted division has N in 6..=12 and a 24-bit fraction.
    #[test]
    fn accepted_divisions_are_in_range(
        source in 1_000_000u32..=30_000_000u32,
        target in 1_000_000u32..=50_000_000u32,
    ) {
        if let Ok(div) = pll_factors(source, target) {
            assert!((6..=12).contains(&div.n), "N = {} out of range", div.n);
            assert!(div.k < (1 << 24), "K = {:#x} exceeds 24 bits", div.k);
        }
    }

    /// Ratios that place the scaled target in 6x..=12x the source must be
    /// accepted without the prescaler.
    #[test]
    fn direct_ratios_succeed(source in 1_000_000u32..=12_288_000u32, n in 6u32..=12u32) {
        // target chosen so 4 x target = n x source exactly
        if (n * source) % 4 == 0 {
            let target = (n * source) / 4;
            let div = pll_factors(source, target).expect("direct ratio must solve");
            assert_eq!(u32::from(div.n), n);
            assert!(!div.pre_divide);
            assert_eq!(div.k, 0);
        }
    }

    /// Register encoding round-trips through decode for every accepted
    /// division.
    #[test]
    fn encoding_round_trips(
        source in 1_000_000u32..=30_000_000u32,
        target in 1_000_000u32..=50_000_000u32,
    ) {
        if let Ok(div) = pll_factors(source, target) {
            let k = pllk_bytes(&div);
            assert_eq!(decode(plln_bits(&div), k[0], k[1], k[2]), div);
        }
    }
}
