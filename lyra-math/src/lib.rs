//! Lyra Math - Exact Arithmetic for Nonlinear Real Arithmetic
//!
//! This crate provides the number layer used by CAD-based reasoning in Lyra:
//! - [`UnivariatePolynomial`]: dense polynomials over `BigRational`
//! - Sturm-sequence real root isolation ([`polynomial::root_isolation`])
//! - [`RealAlgebraicNumber`]: exact real algebraic numbers in numeric or
//!   interval representation, with refinement and exact comparison
//!
//! # Examples
//!
//! ```
//! use lyra_math::polynomial::root_isolation::real_roots;
//! use lyra_math::{RealAlgebraicNumber, UnivariatePolynomial};
//!
//! // Roots of x^2 - 2
//! let p = UnivariatePolynomial::from_i64(&[-2, 0, 1]);
//! let roots = real_roots(&p).into_roots();
//! assert_eq!(roots.len(), 2);
//!
//! let zero = RealAlgebraicNumber::from_integer(0, false);
//! assert!(roots[0] < zero && zero < roots[1]);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod algebraic_number;
pub mod polynomial;

pub use algebraic_number::{AlgebraicError, AlgebraicResult, IsolatingInterval, RealAlgebraicNumber};
pub use polynomial::UnivariatePolynomial;
pub use polynomial::root_isolation::{
    RealRootsResult, RootIsolationConfig, RootIsolator, SturmSequence, real_roots, real_roots_in,
};
