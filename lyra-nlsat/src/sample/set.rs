//! Sample Sets for CAD Lifting.
//!
//! A [`SampleSet`] holds the candidate values for one variable during one CAD
//! lifting step. The same samples are indexed by five views:
//!
//! - **samples**: sorted by value, no two equal values
//! - **queue**: insertion order, regardless of kind
//! - **numeric / interval**: insertion order, split by stored representation
//! - **root / non-root**: insertion order, split by the root flag
//!
//! Lifting inserts samples as they are discovered, repeatedly takes the next
//! one under a [`SamplePriority`], and from time to time calls
//! [`SampleSet::simplify`] to promote interval samples whose interval has
//! collapsed into numeric samples.
//!
//! ## Invariants
//!
//! After every public operation:
//!
//! 1. `samples` is strictly ascending.
//! 2. Every stored sample is exactly once in `queue`, in exactly one kind
//!    bucket and in exactly one root bucket.
//! 3. Nothing else is in any view.
//! 4. A sample's kind bucket matches its representation and its root bucket
//!    matches its root flag.
//!
//! Violations panic. [`SampleSet::check_invariants`] verifies all of them and
//! runs after each mutation in debug builds or when
//! [`SampleSetConfig::check_invariants`] is set.
//!
//! ## References
//!
//! - Kremer: "Cylindrical Algebraic Decomposition for Nonlinear Arithmetic
//!   Problems" (2020), sample handling during lifting
//! - Z3's `nlsat/nlsat_solver.cpp` - sample point selection

use super::arena::{SampleArena, SampleId};
use super::traits::{AlgebraicSample, SampleComparator, ValueOrder};
use super::view::OrderedView;
use crate::error::{SampleSetError, SampleSetResult};
use rustc_hash::FxHashMap;
use std::fmt;
use tracing::{debug, trace};

/// Which sample [`SampleSet::next_by`] and [`SampleSet::pop_by`] pick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SamplePriority {
    /// Oldest sample of any kind.
    Any,
    /// Oldest numeric sample, else oldest interval sample.
    Numeric,
    /// Oldest non-root sample, else oldest root sample.
    NonRoot,
    /// Oldest root sample, else oldest non-root sample.
    Root,
}

impl SamplePriority {
    fn views(self) -> (SampleView, Option<SampleView>) {
        match self {
            Self::Any => (SampleView::Queue, None),
            Self::Numeric => (SampleView::Numeric, Some(SampleView::Interval)),
            Self::NonRoot => (SampleView::NonRoot, Some(SampleView::Root)),
            Self::Root => (SampleView::Root, Some(SampleView::NonRoot)),
        }
    }
}

/// The insertion-ordered views of a sample set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SampleView {
    /// All samples.
    Queue,
    /// Samples in numeric representation.
    Numeric,
    /// Samples in interval representation.
    Interval,
    /// Root samples.
    Root,
    /// Non-root samples.
    NonRoot,
}

impl SampleView {
    /// All views, in display order.
    pub const ALL: [SampleView; 5] = [
        SampleView::Queue,
        SampleView::Numeric,
        SampleView::Interval,
        SampleView::Root,
        SampleView::NonRoot,
    ];

    fn kind(numeric: bool) -> Self {
        if numeric { Self::Numeric } else { Self::Interval }
    }

    fn rootness(root: bool) -> Self {
        if root { Self::Root } else { Self::NonRoot }
    }
}

impl fmt::Display for SampleView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Queue => "queue",
            Self::Numeric => "numeric",
            Self::Interval => "interval",
            Self::Root => "root",
            Self::NonRoot => "non-root",
        };
        write!(f, "{}", name)
    }
}

/// Configuration for a sample set.
#[derive(Debug, Clone)]
pub struct SampleSetConfig {
    /// Verify all invariants after every mutation, also in release builds.
    pub check_invariants: bool,
    /// Give never-refined interval samples one refinement step during
    /// [`SampleSet::simplify`].
    pub refine_unrefined_on_simplify: bool,
}

impl Default for SampleSetConfig {
    fn default() -> Self {
        Self {
            check_invariants: false,
            refine_unrefined_on_simplify: true,
        }
    }
}

/// Statistics for a sample set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SampleSetStats {
    /// Samples stored.
    pub inserted: u64,
    /// Inserts rejected because an equal value was stored.
    pub duplicates: u64,
    /// Samples removed by `remove` or `pop*`.
    pub removed: u64,
    /// Interval samples promoted to numeric samples.
    pub promotions: u64,
    /// Refinement steps performed by `simplify`.
    pub refinements: u64,
    /// Calls to `simplify`.
    pub sweeps: u64,
}

/// Outcome of a [`SampleSet::simplify`] sweep.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Simplification {
    /// Old interval handle mapped to the handle of its numeric replacement.
    pub substitutions: FxHashMap<SampleId, SampleId>,
    /// Whether any sample was promoted.
    pub changed: bool,
}

/// Sample set with synchronized sorted and priority views.
#[derive(Debug, Clone)]
pub struct SampleSet<S, C = ValueOrder> {
    arena: SampleArena<S>,
    samples: Vec<SampleId>,
    queue: OrderedView,
    numeric_queue: OrderedView,
    interval_queue: OrderedView,
    root_queue: OrderedView,
    non_root_queue: OrderedView,
    comparator: C,
    config: SampleSetConfig,
    stats: SampleSetStats,
}

impl<S: AlgebraicSample> SampleSet<S> {
    /// Create an empty sample set ordered by value.
    pub fn new() -> Self {
        Self::with_config(SampleSetConfig::default())
    }

    /// Create an empty sample set with custom configuration.
    pub fn with_config(config: SampleSetConfig) -> Self {
        Self::with_comparator(ValueOrder, config)
    }
}

impl<S: AlgebraicSample> Default for SampleSet<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: AlgebraicSample, C: SampleComparator<S>> SampleSet<S, C> {
    /// Create an empty sample set with a custom comparator.
    pub fn with_comparator(comparator: C, config: SampleSetConfig) -> Self {
        Self {
            arena: SampleArena::new(),
            samples: Vec::new(),
            queue: OrderedView::new(),
            numeric_queue: OrderedView::new(),
            interval_queue: OrderedView::new(),
            root_queue: OrderedView::new(),
            non_root_queue: OrderedView::new(),
            comparator,
            config,
            stats: SampleSetStats::default(),
        }
    }

    /// Number of stored samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Check if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Get configuration.
    pub fn config(&self) -> &SampleSetConfig {
        &self.config
    }

    /// Get statistics.
    pub fn stats(&self) -> &SampleSetStats {
        &self.stats
    }

    /// Reset statistics.
    pub fn reset_stats(&mut self) {
        self.stats = SampleSetStats::default();
    }

    /// Resolve a handle.
    ///
    /// # Panics
    ///
    /// Panics if the sample is no longer in the set.
    pub fn get(&self, id: SampleId) -> &S {
        match self.arena.get(id) {
            Some(sample) => sample,
            None => panic!("stale sample handle {}", id),
        }
    }

    /// Check if a handle refers to a stored sample.
    pub fn holds(&self, id: SampleId) -> bool {
        self.arena.contains(id)
    }

    /// Handle at a sorted position.
    ///
    /// # Panics
    ///
    /// Panics if `position` is out of range.
    pub fn id_at(&self, position: usize) -> SampleId {
        match self.samples.get(position) {
            Some(&id) => id,
            None => panic!(
                "sample position {} out of range for {} samples",
                position,
                self.samples.len()
            ),
        }
    }

    /// Sample at a sorted position.
    pub fn sample_at(&self, position: usize) -> &S {
        self.get(self.id_at(position))
    }

    /// Samples in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = (SampleId, &S)> + '_ {
        self.samples.iter().map(|&id| (id, self.get(id)))
    }

    /// Handles of one insertion-ordered view, oldest first.
    pub fn view_ids(&self, view: SampleView) -> impl Iterator<Item = SampleId> + '_ {
        self.view(view).iter()
    }

    /// Number of handles in one insertion-ordered view.
    pub fn view_len(&self, view: SampleView) -> usize {
        self.view(view).len()
    }

    fn view(&self, view: SampleView) -> &OrderedView {
        match view {
            SampleView::Queue => &self.queue,
            SampleView::Numeric => &self.numeric_queue,
            SampleView::Interval => &self.interval_queue,
            SampleView::Root => &self.root_queue,
            SampleView::NonRoot => &self.non_root_queue,
        }
    }

    fn view_mut(&mut self, view: SampleView) -> &mut OrderedView {
        match view {
            SampleView::Queue => &mut self.queue,
            SampleView::Numeric => &mut self.numeric_queue,
            SampleView::Interval => &mut self.interval_queue,
            SampleView::Root => &mut self.root_queue,
            SampleView::NonRoot => &mut self.non_root_queue,
        }
    }

    /// First sorted position whose sample is not below `sample`.
    fn lower_bound(&self, sample: &S) -> usize {
        self.samples
            .partition_point(|&id| self.comparator.less(self.get(id), sample))
    }

    /// Sorted position of the stored sample equal to `sample`.
    pub fn position_of(&self, sample: &S) -> Option<usize> {
        let position = self.lower_bound(sample);
        self.samples
            .get(position)
            .filter(|&&id| self.comparator.equal(self.get(id), sample))
            .map(|_| position)
    }

    /// Check if a sample with the same value is stored.
    pub fn contains(&self, sample: &S) -> bool {
        self.position_of(sample).is_some()
    }

    /// Insert a sample. Returns its sorted position and whether it was
    /// stored; an equal value already present keeps its place and the new
    /// sample is dropped.
    pub fn insert(&mut self, sample: S) -> (usize, bool) {
        let (_, position, inserted) = self.insert_inner(sample);
        (position, inserted)
    }

    /// Insert a sample and return the handle of the stored equal value
    /// together with whether the new sample was stored.
    pub fn insert_sample(&mut self, sample: S) -> (SampleId, bool) {
        let (id, _, inserted) = self.insert_inner(sample);
        (id, inserted)
    }

    fn insert_inner(&mut self, sample: S) -> (SampleId, usize, bool) {
        let sample = Self::canonicalize(sample);
        let position = self.lower_bound(&sample);

        if let Some(&existing) = self.samples.get(position)
            && self.comparator.equal(self.get(existing), &sample)
        {
            trace!("sample already present as {} at {}", existing, position);
            self.stats.duplicates += 1;
            return (existing, position, false);
        }

        let numeric = sample.is_numeric_representation();
        let root = sample.is_root();
        let id = self.arena.insert(sample);

        self.samples.insert(position, id);
        self.queue.push_back(id);
        self.view_mut(SampleView::kind(numeric)).push_back(id);
        self.view_mut(SampleView::rootness(root)).push_back(id);

        trace!("inserted sample {} at {}", id, position);
        self.stats.inserted += 1;
        self.debug_check();
        (id, position, true)
    }

    /// Store exact values in numeric representation.
    fn canonicalize(sample: S) -> S {
        if sample.is_numeric()
            && !sample.is_numeric_representation()
            && let Some(numeric) = sample.to_numeric_representation()
        {
            return numeric;
        }
        sample
    }

    /// Oldest sample of any kind.
    ///
    /// # Panics
    ///
    /// Panics if the set is empty.
    pub fn next(&self) -> SampleId {
        self.next_by(SamplePriority::Any)
    }

    /// Oldest numeric sample, else oldest interval sample.
    pub fn next_numeric(&self) -> SampleId {
        self.next_by(SamplePriority::Numeric)
    }

    /// Oldest non-root sample, else oldest root sample.
    pub fn next_non_root(&self) -> SampleId {
        self.next_by(SamplePriority::NonRoot)
    }

    /// Oldest root sample, else oldest non-root sample.
    pub fn next_root(&self) -> SampleId {
        self.next_by(SamplePriority::Root)
    }

    /// Next sample under a priority.
    ///
    /// # Panics
    ///
    /// Panics if the set is empty.
    pub fn next_by(&self, priority: SamplePriority) -> SampleId {
        self.pick(priority).0
    }

    /// Next sample under a priority and the view it was taken from.
    fn pick(&self, priority: SamplePriority) -> (SampleId, SampleView) {
        let (primary, fallback) = priority.views();
        if let Some(id) = self.view(primary).front() {
            return (id, primary);
        }
        if let Some(fallback) = fallback
            && let Some(id) = self.view(fallback).front()
        {
            return (id, fallback);
        }
        panic!("next sample requested from an empty sample set");
    }

    /// Remove and return the oldest sample of any kind.
    ///
    /// # Panics
    ///
    /// Panics if the set is empty.
    pub fn pop(&mut self) -> S {
        self.pop_by(SamplePriority::Any)
    }

    /// Remove and return the sample [`Self::next_numeric`] yields.
    pub fn pop_numeric(&mut self) -> S {
        self.pop_by(SamplePriority::Numeric)
    }

    /// Remove and return the sample [`Self::next_non_root`] yields.
    pub fn pop_non_root(&mut self) -> S {
        self.pop_by(SamplePriority::NonRoot)
    }

    /// Remove and return the sample [`Self::next_root`] yields.
    pub fn pop_root(&mut self) -> S {
        self.pop_by(SamplePriority::Root)
    }

    /// Remove and return the next sample under a priority.
    ///
    /// # Panics
    ///
    /// Panics if the set is empty or a view has lost track of the sample.
    pub fn pop_by(&mut self, priority: SamplePriority) -> S {
        let (id, source) = self.pick(priority);

        let position = self.lower_bound(self.get(id));
        if self.samples.get(position) != Some(&id) {
            panic!("sample {} is not at its sorted position {}", id, position);
        }
        self.samples.remove(position);

        if self.view_mut(source).pop_front() != Some(id) {
            panic!("sample {} vanished from the front of the {} view", id, source);
        }
        self.detach(id, Some(source));

        let Some(sample) = self.arena.remove(id) else {
            panic!("sample {} missing from the arena", id);
        };
        trace!("popped sample {} from {}", id, source);
        self.stats.removed += 1;
        self.debug_check();
        sample
    }

    /// Remove the sample at a sorted position. Returns the position of the
    /// following sample, which is `position` itself.
    ///
    /// # Panics
    ///
    /// Panics if `position` is out of range.
    pub fn remove(&mut self, position: usize) -> usize {
        let id = self.id_at(position);
        self.samples.remove(position);
        self.detach(id, None);
        self.arena.remove(id);

        trace!("removed sample {} at {}", id, position);
        self.stats.removed += 1;
        self.debug_check();
        position
    }

    /// Remove `id` from the queue and its two buckets, skipping `done`.
    fn detach(&mut self, id: SampleId, done: Option<SampleView>) {
        let sample = self.get(id);
        let views = [
            SampleView::Queue,
            SampleView::kind(sample.is_numeric_representation()),
            SampleView::rootness(sample.is_root()),
        ];
        for view in views {
            if Some(view) == done {
                continue;
            }
            if !self.view_mut(view).remove(id) {
                panic!("sample {} missing from the {} view", id, view);
            }
        }
    }

    /// Replace the interval sample `from` by the numeric sample `to` of the
    /// same value, keeping its sorted position and its place in the queue
    /// and root bucket. Returns the handle of `to`.
    ///
    /// Fails with [`SampleSetError::NotFound`] and changes nothing if `from`
    /// is not in the interval bucket.
    ///
    /// # Panics
    ///
    /// Panics if `to` is not in numeric representation, has a different root
    /// flag, or a different value.
    pub fn simplify_sample(&mut self, from: SampleId, to: S) -> SampleSetResult<SampleId> {
        if !self.interval_queue.contains(from) {
            return Err(SampleSetError::NotFound(from));
        }

        let old = self.get(from);
        if !to.is_numeric_representation() {
            panic!("promotion target for {} is not numeric", from);
        }
        if old.is_root() != to.is_root() {
            panic!("promotion of {} must keep the root flag", from);
        }
        if !self.comparator.equal(old, &to) {
            panic!("promotion of {} must keep the value", from);
        }
        let position = self.lower_bound(old);
        if self.samples.get(position) != Some(&from) {
            panic!("sample {} is not at its sorted position {}", from, position);
        }

        let root = to.is_root();
        let id = self.arena.insert(to);

        self.samples[position] = id;
        self.numeric_queue.push_back(id);
        if !self.interval_queue.remove(from) {
            panic!("sample {} missing from the interval view", from);
        }
        let rootness = SampleView::rootness(root);
        if !self.view_mut(rootness).replace(from, id) {
            panic!("sample {} missing from the {} view", from, rootness);
        }
        if !self.queue.replace(from, id) {
            panic!("sample {} missing from the queue view", from);
        }
        self.arena.remove(from);

        debug!("promoted sample {} to numeric sample {}", from, id);
        self.stats.promotions += 1;
        self.debug_check();
        Ok(id)
    }

    /// Promote every interval sample whose value is now exact.
    ///
    /// Interval samples that were never refined get exactly one refinement
    /// step first (see [`SampleSetConfig::refine_unrefined_on_simplify`]);
    /// other samples are only checked, never refined further.
    pub fn simplify(&mut self) -> Simplification {
        self.stats.sweeps += 1;
        let candidates: Vec<SampleId> = self.interval_queue.iter().collect();
        let mut result = Simplification::default();

        for from in candidates {
            let Some(sample) = self.arena.get_mut(from) else {
                panic!("stale sample handle {} in the interval view", from);
            };
            if self.config.refine_unrefined_on_simplify && sample.refinement_count() == 0 {
                sample.refine();
                self.stats.refinements += 1;
            }
            if !sample.is_numeric() {
                continue;
            }
            let Some(to) = sample.to_numeric_representation() else {
                continue;
            };

            match self.simplify_sample(from, to) {
                Ok(id) => {
                    result.substitutions.insert(from, id);
                }
                Err(e) => panic!("interval sample lost during simplification: {}", e),
            }
        }

        result.changed = !result.substitutions.is_empty();
        debug!(
            "simplified {} of {} interval samples",
            result.substitutions.len(),
            self.interval_queue.len() + result.substitutions.len()
        );
        result
    }

    /// Exchange the contents of two sets. Configuration and comparator stay.
    pub fn swap(&mut self, other: &mut Self) {
        std::mem::swap(&mut self.arena, &mut other.arena);
        std::mem::swap(&mut self.samples, &mut other.samples);
        std::mem::swap(&mut self.queue, &mut other.queue);
        std::mem::swap(&mut self.numeric_queue, &mut other.numeric_queue);
        std::mem::swap(&mut self.interval_queue, &mut other.interval_queue);
        std::mem::swap(&mut self.root_queue, &mut other.root_queue);
        std::mem::swap(&mut self.non_root_queue, &mut other.non_root_queue);
        std::mem::swap(&mut self.stats, &mut other.stats);
    }

    /// Remove every sample. Outstanding handles become stale.
    pub fn clear(&mut self) {
        self.arena.clear();
        self.samples.clear();
        for view in SampleView::ALL {
            self.view_mut(view).clear();
        }
    }

    fn debug_check(&self) {
        if cfg!(debug_assertions) || self.config.check_invariants {
            self.check_invariants();
        }
    }

    /// Verify all structural invariants.
    ///
    /// # Panics
    ///
    /// Panics on the first violated invariant.
    pub fn check_invariants(&self) {
        let n = self.samples.len();
        if self.arena.len() != n || self.queue.len() != n {
            panic!(
                "view sizes disagree: {} sorted, {} stored, {} queued",
                n,
                self.arena.len(),
                self.queue.len()
            );
        }
        if self.numeric_queue.len() + self.interval_queue.len() != n {
            panic!("kind buckets do not partition the queue");
        }
        if self.root_queue.len() + self.non_root_queue.len() != n {
            panic!("root buckets do not partition the queue");
        }

        for pair in self.samples.windows(2) {
            let (a, b) = (self.get(pair[0]), self.get(pair[1]));
            if !self.comparator.less(a, b) || self.comparator.equal(a, b) {
                panic!("samples {} and {} out of order", pair[0], pair[1]);
            }
        }

        for &id in &self.samples {
            let sample = self.get(id);
            if !self.queue.contains(id) {
                panic!("sample {} missing from the queue view", id);
            }
            let numeric = sample.is_numeric_representation();
            if !self.view(SampleView::kind(numeric)).contains(id)
                || self.view(SampleView::kind(!numeric)).contains(id)
            {
                panic!("sample {} in the wrong kind bucket", id);
            }
            let root = sample.is_root();
            if !self.view(SampleView::rootness(root)).contains(id)
                || self.view(SampleView::rootness(!root)).contains(id)
            {
                panic!("sample {} in the wrong root bucket", id);
            }
        }
    }
}

impl<S: AlgebraicSample, C: SampleComparator<S>> SampleSet<S, C> {
    fn same_sequence(
        &self,
        other: &Self,
        mine: impl Iterator<Item = SampleId>,
        theirs: impl Iterator<Item = SampleId>,
    ) -> bool {
        mine.zip(theirs)
            .all(|(x, y)| self.comparator.equal(self.get(x), other.get(y)))
    }
}

impl<S: AlgebraicSample, C: SampleComparator<S>> PartialEq for SampleSet<S, C> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self.same_sequence(
                other,
                self.samples.iter().copied(),
                other.samples.iter().copied(),
            )
            && SampleView::ALL.iter().all(|&view| {
                self.view_len(view) == other.view_len(view)
                    && self.same_sequence(other, self.view_ids(view), other.view_ids(view))
            })
    }
}

impl<S: AlgebraicSample + fmt::Display, C: SampleComparator<S>> SampleSet<S, C> {
    fn write_sequence(
        &self,
        f: &mut fmt::Formatter<'_>,
        name: &str,
        ids: impl Iterator<Item = SampleId>,
    ) -> fmt::Result {
        write!(f, "{}: [", name)?;
        for (i, id) in ids.enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", self.get(id))?;
        }
        writeln!(f, "]")
    }
}

impl<S: AlgebraicSample + fmt::Display, C: SampleComparator<S>> fmt::Display for SampleSet<S, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_sequence(f, "samples", self.samples.iter().copied())?;
        for view in SampleView::ALL {
            self.write_sequence(f, &view.to_string(), self.view_ids(view))?;
        }
        Ok(())
    }
}
