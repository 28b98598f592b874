//! Property-based tests for univariate polynomial arithmetic

use lyra_math::UnivariatePolynomial;
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::Zero;
use proptest::prelude::*;

/// Strategy for generating small coefficient vectors
fn coeffs_strategy() -> impl Strategy<Value = Vec<i64>> {
    prop::collection::vec(-6i64..6, 0..6)
}

fn rat(n: i64) -> BigRational {
    BigRational::from_integer(BigInt::from(n))
}

proptest! {
    /// Division reconstructs the dividend and leaves a smaller remainder
    #[test]
    fn div_rem_reconstructs(a in coeffs_strategy(), b in coeffs_strategy(), x in -5i64..5) {
        let a = UnivariatePolynomial::from_i64(&a);
        let b = UnivariatePolynomial::from_i64(&b);
        prop_assume!(!b.is_zero());

        let (q, r) = a.div_rem(&b);
        prop_assert!(r.is_zero() || r.degree() < b.degree());

        let x = rat(x);
        let rebuilt = q.eval(&x) * b.eval(&x) + r.eval(&x);
        prop_assert_eq!(rebuilt, a.eval(&x));
    }

    /// Multiplication agrees with evaluation
    #[test]
    fn mul_is_pointwise(a in coeffs_strategy(), b in coeffs_strategy(), x in -5i64..5) {
        let a = UnivariatePolynomial::from_i64(&a);
        let b = UnivariatePolynomial::from_i64(&b);
        let x = rat(x);
        prop_assert_eq!((&a * &b).eval(&x), a.eval(&x) * b.eval(&x));
    }

    /// The gcd is monic and divides both arguments
    #[test]
    fn gcd_divides_both(a in coeffs_strategy(), b in coeffs_strategy(), c in coeffs_strategy()) {
        let c = UnivariatePolynomial::from_i64(&c);
        let a = &UnivariatePolynomial::from_i64(&a) * &c;
        let b = &UnivariatePolynomial::from_i64(&b) * &c;
        prop_assume!(!a.is_zero() && !b.is_zero());

        let g = a.gcd(&b);
        prop_assert!(a.rem(&g).is_zero());
        prop_assert!(b.rem(&g).is_zero());
        prop_assert!(g.degree() >= c.degree());
        prop_assert_eq!(g.leading_coeff(), Some(&rat(1)));
    }

    /// The square-free part keeps every root once
    #[test]
    fn squarefree_drops_repeated_factors(roots in prop::collection::vec(-4i64..4, 1..5)) {
        let mut p = UnivariatePolynomial::constant(rat(1));
        for &r in &roots {
            p = &p * &UnivariatePolynomial::linear_root(rat(r));
        }

        let mut distinct = roots.clone();
        distinct.sort_unstable();
        distinct.dedup();

        let sf = p.squarefree();
        prop_assert_eq!(sf.degree(), distinct.len());
        for &r in &distinct {
            prop_assert!(sf.eval(&rat(r)).is_zero());
        }
    }

    /// Derivative of a product follows the product rule
    #[test]
    fn derivative_product_rule(a in coeffs_strategy(), b in coeffs_strategy(), x in -5i64..5) {
        let a = UnivariatePolynomial::from_i64(&a);
        let b = UnivariatePolynomial::from_i64(&b);
        let x = rat(x);

        let lhs = (&a * &b).derivative().eval(&x);
        let rhs = a.derivative().eval(&x) * b.eval(&x) + a.eval(&x) * b.derivative().eval(&x);
        prop_assert_eq!(lhs, rhs);
    }
}
