//! Per-bucket counters

use std::ops::{Add, AddAssign};

use serde::{Deserialize, Serialize};
use strum::{EnumCount, IntoEnumIterator};

use crate::bucket::Bucket;
use crate::trial::Trial;

/// Counts of trials per bucket.
///
/// Counters only ever grow by one per recorded trial, so `total()` is the
/// number of trials recorded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    counts: [u64; Bucket::COUNT],
}

impl Tally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify a trial and count it
    #[inline]
    pub fn record(&mut self, trial: Trial) -> Bucket {
        let bucket = trial.classify();
        self.counts[bucket.index()] += 1;
        bucket
    }

    pub fn count(&self, bucket: Bucket) -> u64 {
        self.counts[bucket.index()]
    }

    /// Number of trials recorded
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Empirical frequency of a bucket, `count / total`.
    ///
    /// An empty tally reports 0.0 for every bucket.
    pub fn frequency(&self, bucket: Bucket) -> f64 {
        match self.total() {
            0 => 0.0,
            n => self.count(bucket) as f64 / n as f64,
        }
    }

    /// `(bucket, count)` in report order
    pub fn iter(&self) -> impl Iterator<Item = (Bucket, u64)> + '_ {
        Bucket::iter().map(|b| (b, self.count(b)))
    }

    /// Fold another tally into this one
    pub fn merge(&mut self, other: &Tally) {
        for (mine, theirs) in self.counts.iter_mut().zip(other.counts.iter()) {
            *mine += theirs;
        }
    }
}

impl AddAssign for Tally {
    fn add_assign(&mut self, rhs: Tally) {
        self.merge(&rhs);
    }
}

impl Add for Tally {
    type Output = Tally;

    fn add(mut self, rhs: Tally) -> Tally {
        self += rhs;
        self
    }
}

impl std::iter::Sum for Tally {
    fn sum<I: Iterator<Item = Tally>>(iter: I) -> Tally {
        iter.fold(Tally::new(), Add::add)
    }
}

impl FromIterator<Trial> for Tally {
    fn from_iter<I: IntoIterator<Item = Trial>>(iter: I) -> Self {
        let mut tally = Tally::new();
        for trial in iter {
            tally.record(trial);
        }
        tally
    }
}

/// Exact bucket probabilities under fair, independent draws.
///
/// Both samplers induce this input distribution, so this is the limit each
/// of them converges to.
pub fn expected_frequencies() -> [(Bucket, f64); Bucket::COUNT] {
    let exhaustive: Tally = Trial::all().collect();
    let mut out = [(Bucket::B000111, 0.0); Bucket::COUNT];
    for (slot, bucket) in out.iter_mut().zip(Bucket::iter()) {
        *slot = (bucket, exhaustive.frequency(bucket));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_empty() {
        let tally = Tally::new();
        assert_eq!(tally.total(), 0);
        for bucket in Bucket::iter() {
            assert_eq!(tally.count(bucket), 0);
            assert_eq!(tally.frequency(bucket), 0.0);
        }
    }

    #[test]
    fn test_record_returns_bucket() {
        let mut tally = Tally::new();
        let trial = Trial::new(1, 0, 0, 1).unwrap();
        assert_eq!(tally.record(trial), Bucket::B100101);
        assert_eq!(tally.count(Bucket::B100101), 1);
        assert_eq!(tally.total(), 1);
    }

    #[test]
    fn test_exhaustive_counts() {
        let tally: Tally = Trial::all().collect();
        assert_eq!(tally.count(Bucket::B000111), 13);
        assert_eq!(tally.count(Bucket::B010110), 4);
        assert_eq!(tally.count(Bucket::B100101), 3);
        assert_eq!(tally.count(Bucket::B100110), 4);
        assert_eq!(tally.total(), 24);
    }

    #[test]
    fn test_expected_frequencies() {
        let expected = expected_frequencies();
        let want = [13.0 / 24.0, 1.0 / 6.0, 1.0 / 8.0, 1.0 / 6.0];
        for ((_, got), want) in expected.iter().zip(want) {
            assert!((got - want).abs() < 1e-12);
        }
        let sum: f64 = expected.iter().map(|(_, p)| p).sum();
        assert!((sum - 1.0).abs() < 1e-12);
    }

    fn arb_tally() -> impl Strategy<Value = Tally> {
        prop::array::uniform4(0u64..1_000_000).prop_map(|counts| Tally { counts })
    }

    fn arb_trial() -> impl Strategy<Value = Trial> {
        (0u8..3, 0u8..2, 0u8..2, 0u8..2)
            .prop_map(|(o, b1, b2, b3)| Trial::new(o, b1, b2, b3).unwrap())
    }

    proptest! {
        #[test]
        fn merge_is_commutative(a in arb_tally(), b in arb_tally()) {
            prop_assert_eq!(a + b, b + a);
        }

        #[test]
        fn merge_is_associative(a in arb_tally(), b in arb_tally(), c in arb_tally()) {
            prop_assert_eq!((a + b) + c, a + (b + c));
        }

        #[test]
        fn merge_conserves_totals(a in arb_tally(), b in arb_tally()) {
            prop_assert_eq!((a + b).total(), a.total() + b.total());
        }

        #[test]
        fn recording_conserves_trials(trials in prop::collection::vec(arb_trial(), 0..500)) {
            let tally: Tally = trials.iter().copied().collect();
            prop_assert_eq!(tally.total(), trials.len() as u64);
        }
    }
}
