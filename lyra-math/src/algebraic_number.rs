//! Real Algebraic Numbers.
//!
//! A real algebraic number is held in one of two representations:
//!
//! - **Numeric**: an exact rational value.
//! - **Interval**: a square-free witness polynomial `p(x)` and an open
//!   isolating interval `(a, b)` containing exactly one root of `p`. Each
//!   refinement step bisects the interval; when a bisection point is the
//!   root, the interval collapses to a point and the number becomes exact
//!   while still being stored as an interval.
//!
//! Every number also carries a *root* flag: whether it is itself a root of
//! a polynomial of the decomposition, as opposed to a witness value picked
//! between roots. The flag is fixed at construction.
//!
//! Comparison is exact and pure: overlapping intervals are decided by a GCD
//! test and, for distinct numbers, by bisecting private copies.
//!
//! ## References
//!
//! - "Algorithms in Real Algebraic Geometry" (Basu et al., 2006)
//! - Z3's `math/polynomial/algebraic_numbers.cpp`

use crate::polynomial::UnivariatePolynomial;
use crate::polynomial::root_isolation::SturmSequence;
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::ToPrimitive;
use std::cmp::Ordering;
use std::fmt;
use thiserror::Error;

/// Errors for algebraic number construction.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AlgebraicError {
    /// Invalid interval (lower > upper).
    #[error("invalid interval: lower bound exceeds upper bound")]
    InvalidInterval,
    /// The witness polynomial is zero.
    #[error("witness polynomial is zero")]
    ZeroPolynomial,
    /// No root found in interval.
    #[error("no root of {0} in interval")]
    NoRootInInterval(String),
    /// Multiple roots in interval.
    #[error("{count} roots of {poly} in interval")]
    MultipleRootsInInterval {
        /// Witness polynomial
        poly: String,
        /// Number of distinct roots found
        count: usize,
    },
    /// An interval endpoint is itself a root.
    #[error("interval endpoint {0} is a root of the witness polynomial")]
    RootAtEndpoint(String),
}

/// Result type for algebraic number construction
pub type AlgebraicResult<T> = Result<T, AlgebraicError>;

/// An isolating interval for a real algebraic number.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IsolatingInterval {
    /// Lower bound.
    pub lower: BigRational,
    /// Upper bound.
    pub upper: BigRational,
}

impl IsolatingInterval {
    /// Create a new isolating interval.
    pub fn new(lower: BigRational, upper: BigRational) -> AlgebraicResult<Self> {
        if lower > upper {
            return Err(AlgebraicError::InvalidInterval);
        }

        Ok(Self { lower, upper })
    }

    /// Check if the closed interval contains a value.
    pub fn contains(&self, value: &BigRational) -> bool {
        value >= &self.lower && value <= &self.upper
    }

    /// Get the midpoint of the interval.
    pub fn midpoint(&self) -> BigRational {
        (&self.lower + &self.upper) / BigRational::from_integer(BigInt::from(2))
    }

    /// Get the width of the interval.
    pub fn width(&self) -> BigRational {
        &self.upper - &self.lower
    }

    /// Check if the interval is a point (lower == upper).
    pub fn is_point(&self) -> bool {
        self.lower == self.upper
    }
}

/// Interval representation: witness polynomial plus isolating interval.
#[derive(Debug, Clone)]
struct IntervalRepresentation {
    /// Square-free, monic.
    polynomial: UnivariatePolynomial,
    interval: IsolatingInterval,
    refinements: usize,
}

impl IntervalRepresentation {
    /// One bisection step. No-op on a point interval.
    fn bisect(&mut self) {
        if self.interval.is_point() {
            return;
        }
        self.refinements += 1;

        // A linear witness pins the root directly.
        if self.polynomial.degree() == 1 {
            let coeffs = self.polynomial.coeffs();
            let root = -&coeffs[0] / &coeffs[1];
            self.interval = IsolatingInterval {
                lower: root.clone(),
                upper: root,
            };
            return;
        }

        let mid = self.interval.midpoint();
        let mid_sign = self.polynomial.sign_at(&mid);

        if mid_sign == 0 {
            self.interval = IsolatingInterval {
                lower: mid.clone(),
                upper: mid,
            };
        } else if self.polynomial.sign_at(&self.interval.lower) != mid_sign {
            self.interval.upper = mid;
        } else {
            self.interval.lower = mid;
        }
    }

    fn point(&self) -> Option<&BigRational> {
        self.interval
            .is_point()
            .then_some(&self.interval.lower)
    }

    /// Order of the rational `r` relative to the isolated root.
    ///
    /// The interval must not be a point.
    fn locate(&self, r: &BigRational) -> Ordering {
        if r <= &self.interval.lower {
            return Ordering::Less;
        }
        if r >= &self.interval.upper {
            return Ordering::Greater;
        }

        let r_sign = self.polynomial.sign_at(r);
        if r_sign == 0 {
            return Ordering::Equal;
        }
        // A simple root changes the sign of p exactly once in the interval.
        if self.polynomial.sign_at(&self.interval.lower) != r_sign {
            Ordering::Greater
        } else {
            Ordering::Less
        }
    }

    /// Check whether two non-point representations isolate the same root.
    fn same_root(&self, other: &Self) -> bool {
        let lower = (&self.interval.lower).max(&other.interval.lower);
        let upper = (&self.interval.upper).min(&other.interval.upper);
        if lower >= upper {
            return false;
        }

        let common = self.polynomial.gcd(&other.polynomial);
        if common.is_constant() {
            return false;
        }
        SturmSequence::new(&common).count_roots(lower, upper) > 0
    }
}

#[derive(Debug, Clone)]
enum Representation {
    Numeric(BigRational),
    Interval(IntervalRepresentation),
}

/// A real algebraic number used as a CAD sample.
///
/// Equality and ordering compare values only; the root flag and the
/// representation are ignored.
#[derive(Debug, Clone)]
pub struct RealAlgebraicNumber {
    repr: Representation,
    root: bool,
}

impl RealAlgebraicNumber {
    /// Create a number in numeric representation.
    pub fn numeric(value: BigRational, root: bool) -> Self {
        Self {
            repr: Representation::Numeric(value),
            root,
        }
    }

    /// Create a number from an integer.
    pub fn from_integer(value: i64, root: bool) -> Self {
        Self::numeric(BigRational::from_integer(BigInt::from(value)), root)
    }

    /// Create a number in interval representation.
    ///
    /// The witness is reduced to its monic square-free part. A proper
    /// interval `(lower, upper)` must hold exactly one root strictly inside
    /// and no root at either endpoint; a point interval must be a root.
    pub fn from_interval(
        polynomial: UnivariatePolynomial,
        lower: BigRational,
        upper: BigRational,
        root: bool,
    ) -> AlgebraicResult<Self> {
        if polynomial.is_zero() {
            return Err(AlgebraicError::ZeroPolynomial);
        }
        let interval = IsolatingInterval::new(lower, upper)?;
        let polynomial = polynomial.squarefree();

        if interval.is_point() {
            if polynomial.sign_at(&interval.lower) != 0 {
                return Err(AlgebraicError::NoRootInInterval(polynomial.to_string()));
            }
        } else {
            for endpoint in [&interval.lower, &interval.upper] {
                if polynomial.sign_at(endpoint) == 0 {
                    return Err(AlgebraicError::RootAtEndpoint(endpoint.to_string()));
                }
            }
            match SturmSequence::new(&polynomial).count_roots(&interval.lower, &interval.upper) {
                0 => return Err(AlgebraicError::NoRootInInterval(polynomial.to_string())),
                1 => {}
                count => {
                    return Err(AlgebraicError::MultipleRootsInInterval {
                        poly: polynomial.to_string(),
                        count,
                    });
                }
            }
        }

        Ok(Self {
            repr: Representation::Interval(IntervalRepresentation {
                polynomial,
                interval,
                refinements: 0,
            }),
            root,
        })
    }

    /// Check if the value is known exactly: numeric representation, or an
    /// interval that has collapsed to a point. Never refines.
    pub fn is_numeric(&self) -> bool {
        self.value().is_some()
    }

    /// Check if the stored representation is numeric.
    pub fn is_numeric_representation(&self) -> bool {
        matches!(self.repr, Representation::Numeric(_))
    }

    /// Check if this number is flagged as a root sample.
    pub fn is_root(&self) -> bool {
        self.root
    }

    /// The exact value, if known.
    pub fn value(&self) -> Option<&BigRational> {
        match &self.repr {
            Representation::Numeric(v) => Some(v),
            Representation::Interval(ir) => ir.point(),
        }
    }

    /// The isolating interval of an interval representation.
    pub fn interval(&self) -> Option<&IsolatingInterval> {
        match &self.repr {
            Representation::Numeric(_) => None,
            Representation::Interval(ir) => Some(&ir.interval),
        }
    }

    /// The witness polynomial of an interval representation.
    pub fn polynomial(&self) -> Option<&UnivariatePolynomial> {
        match &self.repr {
            Representation::Numeric(_) => None,
            Representation::Interval(ir) => Some(&ir.polynomial),
        }
    }

    /// Perform one refinement step. Idempotent once the value is exact.
    pub fn refine(&mut self) {
        if let Representation::Interval(ir) = &mut self.repr {
            ir.bisect();
        }
    }

    /// Refine until the interval width is at most `width` or `max_steps`
    /// steps were taken.
    pub fn refine_to_width(&mut self, width: &BigRational, max_steps: usize) {
        if let Representation::Interval(ir) = &mut self.repr {
            let mut steps = 0;
            while ir.interval.width() > *width && steps < max_steps {
                ir.bisect();
                steps += 1;
            }
        }
    }

    /// Number of refinement steps applied. Always zero for numeric numbers.
    pub fn refinement_count(&self) -> usize {
        match &self.repr {
            Representation::Numeric(_) => 0,
            Representation::Interval(ir) => ir.refinements,
        }
    }

    /// Convert to numeric representation if the value is exact.
    pub fn to_numeric_representation(&self) -> Option<Self> {
        self.value().map(|v| Self::numeric(v.clone(), self.root))
    }

    /// Compare by value.
    pub fn compare(&self, other: &Self) -> Ordering {
        match (self.exact_or_interval(), other.exact_or_interval()) {
            (Ok(a), Ok(b)) => a.cmp(b),
            (Ok(a), Err(ir)) => ir.locate(a),
            (Err(ir), Ok(b)) => ir.locate(b).reverse(),
            (Err(a), Err(b)) => Self::compare_intervals(a, b),
        }
    }

    fn exact_or_interval(&self) -> Result<&BigRational, &IntervalRepresentation> {
        match &self.repr {
            Representation::Numeric(v) => Ok(v),
            Representation::Interval(ir) => ir.point().ok_or(ir),
        }
    }

    fn compare_intervals(a: &IntervalRepresentation, b: &IntervalRepresentation) -> Ordering {
        if a.interval.upper <= b.interval.lower {
            return Ordering::Less;
        }
        if b.interval.upper <= a.interval.lower {
            return Ordering::Greater;
        }
        if a.same_root(b) {
            return Ordering::Equal;
        }

        // Distinct roots: bisect copies until the intervals separate.
        let mut a = a.clone();
        let mut b = b.clone();
        loop {
            a.bisect();
            b.bisect();
            match (a.point(), b.point()) {
                (Some(x), Some(y)) => return x.cmp(y),
                (Some(x), None) => return b.locate(x),
                (None, Some(y)) => return a.locate(y).reverse(),
                (None, None) => {}
            }
            if a.interval.upper <= b.interval.lower {
                return Ordering::Less;
            }
            if b.interval.upper <= a.interval.lower {
                return Ordering::Greater;
            }
        }
    }

    /// Floating-point approximation, for diagnostics only.
    pub fn approximate(&self) -> f64 {
        let value = match &self.repr {
            Representation::Numeric(v) => v.clone(),
            Representation::Interval(ir) => ir.interval.midpoint(),
        };
        match (value.numer().to_f64(), value.denom().to_f64()) {
            (Some(n), Some(d)) => n / d,
            _ => f64::NAN,
        }
    }
}

impl PartialEq for RealAlgebraicNumber {
    fn eq(&self, other: &Self) -> bool {
        self.compare(other) == Ordering::Equal
    }
}

impl Eq for RealAlgebraicNumber {}

impl PartialOrd for RealAlgebraicNumber {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for RealAlgebraicNumber {
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare(other)
    }
}

impl From<BigRational> for RealAlgebraicNumber {
    fn from(value: BigRational) -> Self {
        Self::numeric(value, false)
    }
}

impl fmt::Display for RealAlgebraicNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.repr {
            Representation::Numeric(v) => write!(f, "{}", v)?,
            Representation::Interval(ir) => {
                if ir.interval.is_point() {
                    write!(f, "({}, [{}])", ir.polynomial, ir.interval.lower)?;
                } else {
                    write!(
                        f,
                        "({}, ({}, {}))",
                        ir.polynomial, ir.interval.lower, ir.interval.upper
                    )?;
                }
            }
        }
        if self.root {
            write!(f, "R")?;
        }
        Ok(())
    }
}
