//! # Lifting Samples Example
//!
//! This example fills a sample set the way one CAD lifting step does: the
//! roots of a polynomial plus one point between and around them. It then
//! consumes the samples by priority.
//!
//! ## See Also
//! - [`SampleSet`](lyra_nlsat::SampleSet)

use lyra_math::{RealAlgebraicNumber, UnivariatePolynomial, real_roots};
use lyra_nlsat::{SamplePriority, SampleSet, SampleView};

fn main() {
    println!("=== Lyra NLSAT: Lifting Samples ===\n");

    // x^3 - 2x: roots -sqrt(2), 0, sqrt(2)
    let p = UnivariatePolynomial::from_i64(&[0, -2, 0, 1]);
    let mut samples = SampleSet::new();

    for root in real_roots(&p).into_roots() {
        samples.insert(root);
    }
    for n in [-2, -1, 0, 1, 2] {
        let (position, inserted) = samples.insert(RealAlgebraicNumber::from_integer(n, false));
        println!("insert {:>2}: position {}, stored {}", n, position, inserted);
    }

    println!("\n{}", samples);

    let result = samples.simplify();
    println!("simplify promoted {} sample(s)", result.substitutions.len());
    println!(
        "{} numeric, {} interval\n",
        samples.view_len(SampleView::Numeric),
        samples.view_len(SampleView::Interval)
    );

    while !samples.is_empty() {
        let sample = samples.pop_by(SamplePriority::NonRoot);
        println!("lift over {}", sample);
    }
    println!("\nstats: {:?}", samples.stats());
}
