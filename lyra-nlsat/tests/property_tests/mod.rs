//! Property-based tests for lyra-nlsat
//!
//! These drive random sequences of sample-set operations against a small
//! reference model and check ordering, view consistency and priorities.

mod sample_set_properties;
