//! Property-based tests for sample sets
//!
//! Random operation sequences run against a `SampleSet` and a plain vector
//! model side by side. After every step the set must agree with the model on
//! sorted contents, every insertion-ordered view and every priority.

use lyra_math::{RealAlgebraicNumber, UnivariatePolynomial};
use lyra_nlsat::{SamplePriority, SampleSet, SampleSetConfig, SampleView};
use num_bigint::BigInt;
use num_rational::BigRational;
use proptest::prelude::*;
use proptest::test_runner::TestCaseError;
use std::cmp::Ordering;

/// Exact values the generated samples can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Value {
    Int(i64),
    /// `±sqrt(k)` for a non-square `k`
    Sqrt { k: i64, negative: bool },
}

impl Value {
    fn approx(self) -> f64 {
        match self {
            Value::Int(n) => n as f64,
            Value::Sqrt { k, negative } => {
                let r = (k as f64).sqrt();
                if negative { -r } else { r }
            }
        }
    }

    fn number(self) -> RealAlgebraicNumber {
        match self {
            Value::Int(n) => RealAlgebraicNumber::from_integer(n, false),
            Value::Sqrt { k, negative } => sqrt_sample(k, negative, false),
        }
    }
}

#[derive(Debug, Clone)]
enum Op {
    Int(i64, bool),
    Sqrt(i64, bool, bool),
    /// An interval around 2 that collapses on its first refinement
    NearTwo(bool),
    Pop(SamplePriority),
    Remove(usize),
    Simplify,
}

fn rat(n: i64, d: i64) -> BigRational {
    BigRational::new(BigInt::from(n), BigInt::from(d))
}

fn sqrt_sample(k: i64, negative: bool, root: bool) -> RealAlgebraicNumber {
    let p = UnivariatePolynomial::from_i64(&[-k, 0, 1]);
    let (lower, upper) = if negative {
        (rat(-k, 1), rat(-1, 1))
    } else {
        (rat(1, 1), rat(k, 1))
    };
    RealAlgebraicNumber::from_interval(p, lower, upper, root).expect("isolating interval")
}

fn near_two(root: bool) -> RealAlgebraicNumber {
    let p = UnivariatePolynomial::from_i64(&[-4, 0, 1]);
    RealAlgebraicNumber::from_interval(p, rat(1999, 1000), rat(2001, 1000), root)
        .expect("isolating interval")
}

#[derive(Debug, Clone)]
struct Entry {
    value: Value,
    root: bool,
    numeric: bool,
    /// Position in insertion order
    seq: u64,
    /// Position in the current kind bucket; reassigned on promotion
    kind_seq: u64,
}

/// Reference model of a sample set.
#[derive(Debug, Default)]
struct Model {
    entries: Vec<Entry>,
    counter: u64,
}

impl Model {
    fn tick(&mut self) -> u64 {
        self.counter += 1;
        self.counter
    }

    fn insert(&mut self, value: Value, root: bool, numeric: bool) -> bool {
        if self.entries.iter().any(|e| e.value == value) {
            return false;
        }
        let seq = self.tick();
        self.entries.push(Entry {
            value,
            root,
            numeric,
            seq,
            kind_seq: seq,
        });
        true
    }

    fn sorted(&self) -> Vec<Entry> {
        let mut entries = self.entries.clone();
        entries.sort_by(|a, b| a.value.approx().total_cmp(&b.value.approx()));
        entries
    }

    fn view(&self, view: SampleView) -> Vec<Entry> {
        let mut entries: Vec<Entry> = self
            .entries
            .iter()
            .filter(|e| match view {
                SampleView::Queue => true,
                SampleView::Numeric => e.numeric,
                SampleView::Interval => !e.numeric,
                SampleView::Root => e.root,
                SampleView::NonRoot => !e.root,
            })
            .cloned()
            .collect();
        match view {
            SampleView::Numeric | SampleView::Interval => entries.sort_by_key(|e| e.kind_seq),
            _ => entries.sort_by_key(|e| e.seq),
        }
        entries
    }

    fn oldest(
        &self,
        keep: impl Fn(&Entry) -> bool,
        key: impl Fn(&Entry) -> u64,
    ) -> Option<usize> {
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, e)| keep(e))
            .min_by_key(|(_, e)| key(e))
            .map(|(i, _)| i)
    }

    fn next(&self, priority: SamplePriority) -> Option<usize> {
        let seq = |e: &Entry| e.seq;
        let kind_seq = |e: &Entry| e.kind_seq;
        match priority {
            SamplePriority::Any => self.oldest(|_| true, seq),
            SamplePriority::Numeric => self
                .oldest(|e| e.numeric, kind_seq)
                .or_else(|| self.oldest(|e| !e.numeric, kind_seq)),
            SamplePriority::NonRoot => self
                .oldest(|e| !e.root, seq)
                .or_else(|| self.oldest(|e| e.root, seq)),
            SamplePriority::Root => self
                .oldest(|e| e.root, seq)
                .or_else(|| self.oldest(|e| !e.root, seq)),
        }
    }

    /// Interval samples around 2 collapse on their first sweep.
    fn simplify(&mut self) -> usize {
        let mut pending: Vec<usize> = (0..self.entries.len())
            .filter(|&i| !self.entries[i].numeric && self.entries[i].value == Value::Int(2))
            .collect();
        pending.sort_by_key(|&i| self.entries[i].kind_seq);
        for &i in &pending {
            let kind_seq = self.tick();
            self.entries[i].numeric = true;
            self.entries[i].kind_seq = kind_seq;
        }
        pending.len()
    }
}

fn checked_set() -> SampleSet<RealAlgebraicNumber> {
    SampleSet::with_config(SampleSetConfig {
        check_invariants: true,
        ..Default::default()
    })
}

fn matches(sample: &RealAlgebraicNumber, entry: &Entry) -> bool {
    sample.compare(&entry.value.number()) == Ordering::Equal
        && sample.is_root() == entry.root
        && sample.is_numeric_representation() == entry.numeric
}

fn check_against_model(
    set: &SampleSet<RealAlgebraicNumber>,
    model: &Model,
) -> Result<(), TestCaseError> {
    set.check_invariants();
    prop_assert_eq!(set.len(), model.entries.len());

    for (i, entry) in model.sorted().iter().enumerate() {
        prop_assert!(matches(set.sample_at(i), entry), "sorted position {}", i);
    }

    for view in SampleView::ALL {
        let expected = model.view(view);
        prop_assert_eq!(set.view_len(view), expected.len(), "{} view size", view);
        for (id, entry) in set.view_ids(view).zip(&expected) {
            prop_assert!(matches(set.get(id), entry), "{} view entry {}", view, id);
        }
    }
    Ok(())
}

fn priority_strategy() -> impl Strategy<Value = SamplePriority> {
    prop_oneof![
        Just(SamplePriority::Any),
        Just(SamplePriority::Numeric),
        Just(SamplePriority::NonRoot),
        Just(SamplePriority::Root),
    ]
}

fn sqrt_k_strategy() -> impl Strategy<Value = i64> {
    prop::sample::select(vec![2i64, 3, 5, 6, 7])
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (-4i64..=4, any::<bool>()).prop_map(|(n, root)| Op::Int(n, root)),
        3 => (sqrt_k_strategy(), any::<bool>(), any::<bool>())
            .prop_map(|(k, negative, root)| Op::Sqrt(k, negative, root)),
        1 => any::<bool>().prop_map(Op::NearTwo),
        2 => priority_strategy().prop_map(Op::Pop),
        1 => (0usize..16).prop_map(Op::Remove),
        1 => Just(Op::Simplify),
    ]
}

fn apply(
    set: &mut SampleSet<RealAlgebraicNumber>,
    model: &mut Model,
    op: &Op,
) -> Result<(), TestCaseError> {
    match *op {
        Op::Int(n, root) => {
            let (_, inserted) = set.insert(RealAlgebraicNumber::from_integer(n, root));
            prop_assert_eq!(inserted, model.insert(Value::Int(n), root, true));
        }
        Op::Sqrt(k, negative, root) => {
            let (_, inserted) = set.insert(sqrt_sample(k, negative, root));
            prop_assert_eq!(
                inserted,
                model.insert(Value::Sqrt { k, negative }, root, false)
            );
        }
        Op::NearTwo(root) => {
            let (_, inserted) = set.insert(near_two(root));
            prop_assert_eq!(inserted, model.insert(Value::Int(2), root, false));
        }
        Op::Pop(priority) => {
            let Some(index) = model.next(priority) else {
                return Ok(());
            };
            let expected = model.entries.remove(index);
            let popped = set.pop_by(priority);
            prop_assert!(matches(&popped, &expected), "{:?} popped {}", priority, popped);
            prop_assert!(!set.contains(&popped));
        }
        Op::Remove(index) => {
            if model.entries.is_empty() {
                return Ok(());
            }
            let position = index % model.entries.len();
            let target = model.sorted()[position].value;
            model.entries.retain(|e| e.value != target);
            prop_assert_eq!(set.remove(position), position);
            prop_assert!(!set.contains(&target.number()));
        }
        Op::Simplify => {
            let result = set.simplify();
            let promoted = model.simplify();
            prop_assert_eq!(result.substitutions.len(), promoted);
            prop_assert_eq!(result.changed, promoted > 0);
            for (&from, &to) in &result.substitutions {
                prop_assert!(!set.holds(from));
                prop_assert!(set.get(to).is_numeric_representation());
            }
        }
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Every operation keeps the set in step with the model
    #[test]
    fn operations_agree_with_model(ops in prop::collection::vec(op_strategy(), 0..40)) {
        let mut set = checked_set();
        let mut model = Model::default();
        for op in &ops {
            apply(&mut set, &mut model, op)?;
            check_against_model(&set, &model)?;
        }
    }

    /// Inserting values twice stores each distinct value once
    #[test]
    fn insert_deduplicates(values in prop::collection::vec(-6i64..6, 0..20)) {
        let mut set = checked_set();
        for &v in &values {
            set.insert(RealAlgebraicNumber::from_integer(v, false));
        }
        for &v in &values {
            let (position, inserted) = set.insert(RealAlgebraicNumber::from_integer(v, true));
            prop_assert!(!inserted);
            prop_assert_eq!(set.position_of(&RealAlgebraicNumber::from_integer(v, false)), Some(position));
        }

        let mut distinct = values.clone();
        distinct.sort_unstable();
        distinct.dedup();
        prop_assert_eq!(set.len(), distinct.len());
        prop_assert_eq!(set.view_len(SampleView::Root), 0);
        prop_assert_eq!(set.stats().duplicates as usize, values.len() * 2 - distinct.len());
    }

    /// Popping until empty returns every stored value exactly once
    #[test]
    fn pop_drains_every_sample(
        values in prop::collection::vec((-6i64..6, any::<bool>()), 0..20),
        priority in priority_strategy(),
    ) {
        let mut set = checked_set();
        for &(v, root) in &values {
            set.insert(RealAlgebraicNumber::from_integer(v, root));
        }
        let stored = set.len();

        let mut popped = Vec::new();
        while !set.is_empty() {
            popped.push(set.pop_by(priority));
        }
        prop_assert_eq!(popped.len(), stored);
        popped.sort();
        popped.dedup();
        prop_assert_eq!(popped.len(), stored);
        for view in SampleView::ALL {
            prop_assert_eq!(set.view_len(view), 0);
        }
    }

    /// Simplification keeps the sorted values and every root flag
    #[test]
    fn simplify_preserves_values(
        ks in prop::collection::vec((sqrt_k_strategy(), any::<bool>()), 0..6),
        ints in prop::collection::vec(-3i64..3, 0..6),
        with_two in any::<bool>(),
    ) {
        let mut set = checked_set();
        for &(k, negative) in &ks {
            set.insert(sqrt_sample(k, negative, true));
        }
        for &n in &ints {
            set.insert(RealAlgebraicNumber::from_integer(n, false));
        }
        if with_two {
            set.insert(near_two(true));
        }

        let before: Vec<(RealAlgebraicNumber, bool)> =
            set.iter().map(|(_, s)| (s.clone(), s.is_root())).collect();
        set.simplify();
        let after: Vec<(RealAlgebraicNumber, bool)> =
            set.iter().map(|(_, s)| (s.clone(), s.is_root())).collect();

        prop_assert_eq!(before, after);
        prop_assert_eq!(set.view_len(SampleView::Queue), set.len());
    }

    /// Swapping twice restores both sets
    #[test]
    fn swap_twice_is_identity(
        left in prop::collection::vec(-5i64..5, 0..10),
        right in prop::collection::vec(-5i64..5, 0..10),
    ) {
        let mut a = checked_set();
        let mut b = checked_set();
        for &v in &left {
            a.insert(RealAlgebraicNumber::from_integer(v, v % 2 == 0));
        }
        for &v in &right {
            b.insert(RealAlgebraicNumber::from_integer(v, v % 2 != 0));
        }
        let (a0, b0) = (a.clone(), b.clone());

        a.swap(&mut b);
        prop_assert_eq!(&a, &b0);
        prop_assert_eq!(&b, &a0);
        a.swap(&mut b);
        prop_assert_eq!(&a, &a0);
        prop_assert_eq!(&b, &b0);
    }
}
