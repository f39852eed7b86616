//! Property-based tests for solver invariants.
//!
//! These tests verify properties that should hold for any well-posed problem:
//! - Every method lands within tolerance of a simple root
//! - Bracketing methods never widen the bracket or lose the sign change
//! - Re-solving from a converged root is (almost) free
//! - Same-sign brackets fail before any iteration

use proptest::prelude::*;
use rootfind::callback::Step;
use rootfind::prelude::*;

/// Monotone cubic with a single simple root at `r`.
fn cubic(x: f64, r: &f64) -> f64 {
    let d = x - r;
    d * d * d + d
}

fn cubic_prime(x: f64, r: &f64) -> f64 {
    let d = x - r;
    3.0 * d * d + 1.0
}

fn cubic_prime2(x: f64, r: &f64) -> f64 {
    6.0 * (x - r)
}

fn tight() -> BracketConfig {
    BracketConfig::new(1e-10, 1e-10, 100)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn test_bracket_methods_find_root(
        r in -5.0..5.0f64,
        below in 0.1..10.0f64,
        above in 0.1..10.0f64,
    ) {
        for method in BracketMethod::ALL {
            let out = method.solve_full(cubic, r - below, r + above, &r, &tight());

            prop_assert_eq!(out.error_code, ErrorCode::Converged);
            prop_assert!((out.root - r).abs() < 1e-8, "{}: {} vs {}", method, out.root, r);
        }
    }

    #[test]
    fn test_bracket_invariants(
        r in -5.0..5.0f64,
        below in 0.1..10.0f64,
        above in 0.1..10.0f64,
        reversed in any::<bool>(),
    ) {
        let (a, b) = if reversed {
            (r + above, r - below)
        } else {
            (r - below, r + above)
        };

        for method in BracketMethod::ALL {
            let mut last_width = f64::INFINITY;
            let mut violations = 0;

            method.solve_observed(cubic, a, b, &r, &tight(), &mut |s: &Step| {
                if let Some((lo, hi)) = s.bracket {
                    if lo > hi || hi - lo > last_width || cubic(lo, &r) * cubic(hi, &r) > 0.0 {
                        violations += 1;
                    }
                    last_width = hi - lo;
                }
            });

            prop_assert_eq!(violations, 0, "{}", method);
        }
    }

    #[test]
    fn test_open_methods_find_root(r in -5.0..5.0f64, offset in -1.0..1.0f64) {
        let config = OpenConfig::default();
        let x0 = r + offset;

        let n = newton_full(cubic, cubic_prime, x0, &r, &config);
        let s = secant_full(cubic, x0, None, &r, &config);
        let h = halley_full(cubic, cubic_prime, cubic_prime2, x0, &r, &config);

        for out in [n, s, h] {
            prop_assert_eq!(out.error_code, ErrorCode::Converged);
            prop_assert!((out.root - r).abs() < 1e-6);
        }
    }

    #[test]
    fn test_resolve_from_root(r in -5.0..5.0f64, offset in -1.0..1.0f64) {
        let config = OpenConfig::default();

        let first = newton_full(cubic, cubic_prime, r + offset, &r, &config);
        let again = newton_full(cubic, cubic_prime, first.root, &r, &config);

        prop_assert!(again.converged());
        prop_assert!(again.iterations <= 1);

        let first = halley_full(cubic, cubic_prime, cubic_prime2, r + offset, &r, &config);
        let again = halley_full(cubic, cubic_prime, cubic_prime2, first.root, &r, &config);

        prop_assert!(again.converged());
        prop_assert!(again.iterations <= 1);
    }

    #[test]
    fn test_same_sign_bracket_fails_early(
        r in -5.0..5.0f64,
        gap in 0.1..5.0f64,
        width in 0.1..5.0f64,
    ) {
        let (a, b) = (r + gap, r + gap + width);

        for method in BracketMethod::ALL {
            let out = method.solve_full(cubic, a, b, &r, &BracketConfig::default());

            prop_assert_eq!(out.error_code, ErrorCode::SignError);
            prop_assert_eq!(out.iterations, 0);
            prop_assert_eq!(out.function_calls, 0);
            prop_assert_eq!(out.root, a);
        }
    }

    #[test]
    fn test_counts_are_consistent(
        r in -5.0..5.0f64,
        below in 0.1..10.0f64,
        above in 0.1..10.0f64,
    ) {
        let (a, b) = (r - below, r + above);

        // Two endpoint calls, then one per iteration (two for Ridder)
        let out = bisect_full(cubic, a, b, &r, &tight());
        prop_assert_eq!(out.function_calls, out.iterations + 2);

        let out = ridder_full(cubic, a, b, &r, &tight());
        prop_assert_eq!(out.function_calls, 2 * out.iterations + 2);

        // Brent skips the evaluation on its converging pass
        let out = brentq_full(cubic, a, b, &r, &tight());
        prop_assert!(out.function_calls <= out.iterations + 2);
    }
}
