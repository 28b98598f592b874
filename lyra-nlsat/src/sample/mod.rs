//! Sample Management for CAD Lifting.
//!
//! During lifting, every variable has a pool of candidate sample values:
//! roots of the projection polynomials and witnesses between them. This
//! module stores that pool and hands out the next candidate under several
//! priorities.

pub mod arena;
pub mod set;
pub mod traits;
pub mod view;

pub use arena::{SampleArena, SampleId};
pub use set::{
    SamplePriority, SampleSet, SampleSetConfig, SampleSetStats, SampleView, Simplification,
};
pub use traits::{AlgebraicSample, SampleComparator, ValueOrder};
pub use view::OrderedView;
