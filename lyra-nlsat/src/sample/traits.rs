//! Capabilities a sample set needs from its samples.
//!
//! The sample set never inspects a number's internals. It only asks for the
//! representation kind, the root flag, refinement, and a value order.

use lyra_math::RealAlgebraicNumber;
use std::cmp::Ordering;

/// A candidate value for one variable during CAD lifting.
pub trait AlgebraicSample {
    /// The value is known exactly (numeric representation, or an interval
    /// that has collapsed to a point).
    fn is_numeric(&self) -> bool;

    /// The stored representation is numeric.
    fn is_numeric_representation(&self) -> bool;

    /// The sample is itself a root of a decomposition polynomial.
    fn is_root(&self) -> bool;

    /// The same value in numeric representation, if it is known exactly.
    /// Keeps the root flag.
    fn to_numeric_representation(&self) -> Option<Self>
    where
        Self: Sized;

    /// One refinement step; a no-op once exact.
    fn refine(&mut self);

    /// Number of refinement steps applied so far.
    fn refinement_count(&self) -> usize;

    /// Total order by value.
    fn compare_value(&self, other: &Self) -> Ordering;
}

/// Strict total order and equality over samples.
pub trait SampleComparator<S> {
    /// `a` is strictly below `b`.
    fn less(&self, a: &S, b: &S) -> bool;

    /// `a` and `b` have the same value.
    fn equal(&self, a: &S, b: &S) -> bool;
}

/// Orders samples by [`AlgebraicSample::compare_value`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValueOrder;

impl<S: AlgebraicSample> SampleComparator<S> for ValueOrder {
    fn less(&self, a: &S, b: &S) -> bool {
        a.compare_value(b) == Ordering::Less
    }

    fn equal(&self, a: &S, b: &S) -> bool {
        a.compare_value(b) == Ordering::Equal
    }
}

impl AlgebraicSample for RealAlgebraicNumber {
    fn is_numeric(&self) -> bool {
        RealAlgebraicNumber::is_numeric(self)
    }

    fn is_numeric_representation(&self) -> bool {
        RealAlgebraicNumber::is_numeric_representation(self)
    }

    fn is_root(&self) -> bool {
        RealAlgebraicNumber::is_root(self)
    }

    fn to_numeric_representation(&self) -> Option<Self> {
        RealAlgebraicNumber::to_numeric_representation(self)
    }

    fn refine(&mut self) {
        RealAlgebraicNumber::refine(self)
    }

    fn refinement_count(&self) -> usize {
        RealAlgebraicNumber::refinement_count(self)
    }

    fn compare_value(&self, other: &Self) -> Ordering {
        self.compare(other)
    }
}
