//! Lyra NLSAT - CAD Support for Nonlinear Real Arithmetic
//!
//! This crate provides the sample-set manager used while lifting a
//! cylindrical algebraic decomposition:
//! - [`SampleSet`]: candidate values for one variable, kept sorted and
//!   indexed by insertion order, by representation and by root status
//! - [`AlgebraicSample`] / [`SampleComparator`]: what the set needs from its
//!   numbers, implemented for [`lyra_math::RealAlgebraicNumber`]
//!
//! # Examples
//!
//! ```
//! use lyra_math::{RealAlgebraicNumber, UnivariatePolynomial, real_roots};
//! use lyra_nlsat::SampleSet;
//!
//! let mut samples = SampleSet::new();
//!
//! // Roots of x^2 - 2 plus a witness in between
//! for root in real_roots(&UnivariatePolynomial::from_i64(&[-2, 0, 1])).into_roots() {
//!     samples.insert(root);
//! }
//! samples.insert(RealAlgebraicNumber::from_integer(0, false));
//!
//! assert_eq!(samples.len(), 3);
//! let witness = samples.next_non_root();
//! assert_eq!(samples.get(witness), &RealAlgebraicNumber::from_integer(0, false));
//!
//! let first = samples.pop();
//! assert!(first.is_root());
//! assert_eq!(samples.len(), 2);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod sample;

pub use error::{SampleSetError, SampleSetResult};
pub use sample::{
    AlgebraicSample, SampleComparator, SampleId, SamplePriority, SampleSet, SampleSetConfig,
    SampleSetStats, SampleView, Simplification, ValueOrder,
};
