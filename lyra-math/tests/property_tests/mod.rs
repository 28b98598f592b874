//! Property-based tests for lyra-math
//!
//! This module contains property tests for:
//! - Univariate polynomial arithmetic
//! - Root isolation and exact comparison of algebraic numbers

mod polynomial_properties;
