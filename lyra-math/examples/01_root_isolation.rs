//! # Root Isolation Example
//!
//! This example isolates the real roots of a few univariate polynomials and
//! compares the resulting algebraic numbers exactly.
//!
//! ## See Also
//! - [`RootIsolator`](lyra_math::RootIsolator)
//! - [`RealAlgebraicNumber`](lyra_math::RealAlgebraicNumber)

use lyra_math::{RealAlgebraicNumber, RootIsolationConfig, RootIsolator, UnivariatePolynomial};
use num_bigint::BigInt;
use num_rational::BigRational;

fn main() {
    println!("=== Lyra Math: Root Isolation ===\n");

    let polys = [
        UnivariatePolynomial::from_i64(&[-2, 0, 1]),
        UnivariatePolynomial::from_i64(&[0, -1, 0, 1]),
        UnivariatePolynomial::from_i64(&[1, 0, 1]),
    ];

    let mut isolator = RootIsolator::new(RootIsolationConfig {
        precision: Some(BigRational::new(BigInt::from(1), BigInt::from(1000))),
        ..Default::default()
    });

    for p in &polys {
        let roots = isolator.isolate(p).into_roots();
        println!("{} has {} real root(s)", p, roots.len());
        for root in &roots {
            println!("  {}  ~ {:.6}", root, root.approximate());
        }
    }

    let sqrt2 = isolator.isolate(&polys[0]).into_roots().remove(1);
    let three_halves = RealAlgebraicNumber::numeric(
        BigRational::new(BigInt::from(3), BigInt::from(2)),
        false,
    );
    println!("\nsqrt(2) < 3/2: {}", sqrt2 < three_halves);
    println!("stats: {:?}", isolator.stats());
}
