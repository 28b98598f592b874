//! Real Root Isolation for Univariate Polynomials.
//!
//! Isolates the real roots of a polynomial into disjoint open intervals
//! using Sturm sequences and bisection. Each isolated root becomes a
//! [`RealAlgebraicNumber`] flagged as a root sample; roots that a bisection
//! point hits exactly come back in numeric representation.
//!
//! ## References
//!
//! - Sturm: "Mémoire sur la résolution des équations numériques" (1835)
//! - Z3's `math/polynomial/upolynomial.cpp` (`isolate_roots`)

use super::UnivariatePolynomial;
use crate::algebraic_number::RealAlgebraicNumber;
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};
use std::cmp::Ordering;
use tracing::debug;

/// A Sturm sequence `p0 = p, p1 = p', p_{i+1} = -rem(p_{i-1}, p_i)`.
#[derive(Debug, Clone)]
pub struct SturmSequence {
    chain: Vec<UnivariatePolynomial>,
}

impl SturmSequence {
    /// Build the Sturm sequence of a polynomial.
    pub fn new(poly: &UnivariatePolynomial) -> Self {
        let mut chain = vec![poly.clone()];

        let derivative = poly.derivative();
        if derivative.is_zero() {
            return Self { chain };
        }
        chain.push(derivative);

        loop {
            let len = chain.len();
            let remainder = chain[len - 2].rem(&chain[len - 1]);
            if remainder.is_zero() {
                break;
            }
            chain.push(-remainder);
        }

        Self { chain }
    }

    /// Number of sign variations of the sequence at `x`, zeros skipped.
    pub fn sign_variations(&self, x: &BigRational) -> usize {
        let mut variations = 0;
        let mut last = 0i8;

        for poly in &self.chain {
            let sign = poly.sign_at(x);
            if sign == 0 {
                continue;
            }
            if last != 0 && sign != last {
                variations += 1;
            }
            last = sign;
        }

        variations
    }

    /// Number of distinct real roots in the half-open interval `(lower, upper]`.
    pub fn count_roots(&self, lower: &BigRational, upper: &BigRational) -> usize {
        self.sign_variations(lower)
            .saturating_sub(self.sign_variations(upper))
    }

    /// The polynomial the sequence was built from.
    pub fn polynomial(&self) -> &UnivariatePolynomial {
        &self.chain[0]
    }
}

/// Cauchy bound: every real root `r` satisfies `|r| < bound`.
///
/// Returns one for constant polynomials.
pub fn cauchy_bound(poly: &UnivariatePolynomial) -> BigRational {
    let Some(lead) = poly.leading_coeff() else {
        return BigRational::one();
    };

    let max_ratio = poly.coeffs()[..poly.degree()]
        .iter()
        .map(|c| (c / lead).abs())
        .max()
        .unwrap_or_else(BigRational::zero);

    BigRational::one() + max_ratio
}

/// Outcome of a real root computation.
#[derive(Debug, Clone)]
pub enum RealRootsResult {
    /// The polynomial is zero; every point is a root.
    Nullified,
    /// The polynomial has no real roots (in the requested range).
    NoRoots,
    /// Real roots in ascending order.
    Roots(Vec<RealAlgebraicNumber>),
}

impl RealRootsResult {
    /// Check if the polynomial vanished identically.
    pub fn is_nullified(&self) -> bool {
        matches!(self, Self::Nullified)
    }

    /// The isolated roots, empty when nullified or rootless.
    pub fn roots(&self) -> &[RealAlgebraicNumber] {
        match self {
            Self::Roots(roots) => roots,
            _ => &[],
        }
    }

    /// Take ownership of the isolated roots.
    pub fn into_roots(self) -> Vec<RealAlgebraicNumber> {
        match self {
            Self::Roots(roots) => roots,
            _ => Vec::new(),
        }
    }
}

/// Configuration for root isolation.
#[derive(Debug, Clone)]
pub struct RootIsolationConfig {
    /// Refine each isolating interval until its width is at most this value.
    pub precision: Option<BigRational>,
    /// Maximum refinement steps per root when `precision` is set.
    pub max_refinements: usize,
}

impl Default for RootIsolationConfig {
    fn default() -> Self {
        Self {
            precision: None,
            max_refinements: 1000,
        }
    }
}

/// Root isolation statistics.
#[derive(Debug, Clone, Default)]
pub struct IsolationStats {
    /// Polynomials isolated.
    pub isolations: u64,
    /// Bisection steps performed.
    pub bisection_steps: u64,
    /// Roots found exactly at a bisection point.
    pub exact_roots: u64,
    /// Roots returned as isolating intervals.
    pub interval_roots: u64,
}

/// Root isolation engine for univariate polynomials.
#[derive(Debug, Clone, Default)]
pub struct RootIsolator {
    config: RootIsolationConfig,
    stats: IsolationStats,
}

impl RootIsolator {
    /// Create a new root isolator.
    pub fn new(config: RootIsolationConfig) -> Self {
        Self {
            config,
            stats: IsolationStats::default(),
        }
    }

    /// Isolate all real roots of a polynomial.
    pub fn isolate(&mut self, poly: &UnivariatePolynomial) -> RealRootsResult {
        debug!("Real roots of {}", poly);
        self.stats.isolations += 1;

        if poly.is_zero() {
            return RealRootsResult::Nullified;
        }
        if poly.is_constant() {
            return RealRootsResult::NoRoots;
        }

        let squarefree = poly.squarefree();
        let sturm = SturmSequence::new(&squarefree);
        let bound = cauchy_bound(&squarefree);

        let mut roots = Vec::new();
        self.isolate_between(&sturm, -bound.clone(), bound, &mut roots);

        if roots.is_empty() {
            debug!("{} has no real roots", poly);
            return RealRootsResult::NoRoots;
        }
        RealRootsResult::Roots(roots)
    }

    /// Isolate the real roots of a polynomial lying in `[lower, upper]`.
    pub fn isolate_in(
        &mut self,
        poly: &UnivariatePolynomial,
        lower: &BigRational,
        upper: &BigRational,
    ) -> RealRootsResult {
        match self.isolate(poly) {
            RealRootsResult::Roots(roots) => {
                let low = RealAlgebraicNumber::numeric(lower.clone(), false);
                let high = RealAlgebraicNumber::numeric(upper.clone(), false);
                let inside: Vec<_> = roots
                    .into_iter()
                    .filter(|r| r.compare(&low) != Ordering::Less)
                    .filter(|r| r.compare(&high) != Ordering::Greater)
                    .collect();
                if inside.is_empty() {
                    RealRootsResult::NoRoots
                } else {
                    RealRootsResult::Roots(inside)
                }
            }
            other => other,
        }
    }

    /// Isolate roots in the open interval `(lower, upper)`.
    ///
    /// Both endpoints must be non-roots of the sequence's polynomial.
    fn isolate_between(
        &mut self,
        sturm: &SturmSequence,
        lower: BigRational,
        upper: BigRational,
        out: &mut Vec<RealAlgebraicNumber>,
    ) {
        match sturm.count_roots(&lower, &upper) {
            0 => {}
            1 => self.push_interval_root(sturm.polynomial(), lower, upper, out),
            _ => {
                self.stats.bisection_steps += 1;
                let two = BigRational::from_integer(BigInt::from(2));
                let mid = (&lower + &upper) / &two;
                let poly = sturm.polynomial();

                if poly.sign_at(&mid) != 0 {
                    self.isolate_between(sturm, lower, mid.clone(), out);
                    self.isolate_between(sturm, mid, upper, out);
                    return;
                }

                // `mid` is a root: step off it on both sides until the
                // gap to `mid` holds no other root.
                let left = Self::approach(sturm, &mid, &lower, |probe| {
                    sturm.count_roots(probe, &mid) == 1
                });
                let right = Self::approach(sturm, &mid, &upper, |probe| {
                    sturm.count_roots(&mid, probe) == 0
                });

                self.isolate_between(sturm, lower, left, out);
                self.stats.exact_roots += 1;
                out.push(RealAlgebraicNumber::numeric(mid, true));
                self.isolate_between(sturm, right, upper, out);
            }
        }
    }

    /// Move from `far` towards `root` by halving until `accept` holds at a
    /// non-root probe point.
    fn approach(
        sturm: &SturmSequence,
        root: &BigRational,
        far: &BigRational,
        accept: impl Fn(&BigRational) -> bool,
    ) -> BigRational {
        let two = BigRational::from_integer(BigInt::from(2));
        let mut probe = (root + far) / &two;
        loop {
            if sturm.polynomial().sign_at(&probe) != 0 && accept(&probe) {
                return probe;
            }
            probe = (root + &probe) / &two;
        }
    }

    fn push_interval_root(
        &mut self,
        poly: &UnivariatePolynomial,
        lower: BigRational,
        upper: BigRational,
        out: &mut Vec<RealAlgebraicNumber>,
    ) {
        let mut root = match RealAlgebraicNumber::from_interval(poly.clone(), lower, upper, true) {
            Ok(root) => root,
            Err(e) => panic!("Sturm count disagrees with interval check: {}", e),
        };

        if let Some(precision) = &self.config.precision {
            root.refine_to_width(precision, self.config.max_refinements);
        }

        debug!("Found root {}", root);
        if root.is_numeric() {
            self.stats.exact_roots += 1;
        } else {
            self.stats.interval_roots += 1;
        }
        out.push(root);
    }

    /// Get statistics.
    pub fn stats(&self) -> &IsolationStats {
        &self.stats
    }

    /// Reset statistics.
    pub fn reset_stats(&mut self) {
        self.stats = IsolationStats::default();
    }
}

/// Isolate all real roots of a polynomial with the default configuration.
pub fn real_roots(poly: &UnivariatePolynomial) -> RealRootsResult {
    RootIsolator::default().isolate(poly)
}

/// Isolate the real roots of a polynomial lying in `[lower, upper]`.
pub fn real_roots_in(
    poly: &UnivariatePolynomial,
    lower: &BigRational,
    upper: &BigRational,
) -> RealRootsResult {
    RootIsolator::default().isolate_in(poly, lower, upper)
}
