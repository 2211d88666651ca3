//! Trials and the outcome classifier

use serde::{Deserialize, Serialize};
use strum::EnumIter;

use crate::bucket::Bucket;
use crate::error::{Result, SimError};

/// Root branch of the decision tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter)]
#[repr(u8)]
pub enum Order {
    Zero = 0,
    One = 1,
    Two = 2,
}

impl TryFrom<u8> for Order {
    type Error = SimError;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            0 => Ok(Order::Zero),
            1 => Ok(Order::One),
            2 => Ok(Order::Two),
            other => Err(SimError::InvalidOrder(other)),
        }
    }
}

/// One draw of the four random inputs.
///
/// `b1`, `b2` and `b3` are the binary draws; `true` stands for 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Trial {
    pub order: Order,
    pub b1: bool,
    pub b2: bool,
    pub b3: bool,
}

fn bit(name: &'static str, value: u8) -> Result<bool> {
    match value {
        0 => Ok(false),
        1 => Ok(true),
        _ => Err(SimError::InvalidBit { name, value }),
    }
}

impl Trial {
    /// Build a trial from raw draws, rejecting values outside their domain.
    pub fn new(order: u8, b1: u8, b2: u8, b3: u8) -> Result<Self> {
        Ok(Self {
            order: Order::try_from(order)?,
            b1: bit("b1", b1)?,
            b2: bit("b2", b2)?,
            b3: bit("b3", b3)?,
        })
    }

    /// Every input combination, 3 * 2 * 2 * 2 of them, each equally likely
    /// under fair draws.
    pub fn all() -> impl Iterator<Item = Trial> {
        use strum::IntoEnumIterator;

        Order::iter().flat_map(|order| {
            (0u8..8).map(move |bits| Trial {
                order,
                b1: bits & 1 != 0,
                b2: bits & 2 != 0,
                b3: bits & 4 != 0,
            })
        })
    }

    /// Classify this trial
    #[inline]
    pub fn classify(self) -> Bucket {
        classify(self.order, self.b1, self.b2, self.b3)
    }
}

/// Map one trial's inputs to its bucket.
///
/// Total over the input domain. `b2` and `b3` are only consulted on some
/// branches.
pub fn classify(order: Order, b1: bool, b2: bool, b3: bool) -> Bucket {
    match order {
        Order::Zero => {
            if !b1 {
                Bucket::B000111
            } else if !b2 {
                Bucket::B010110
            } else {
                Bucket::B000111
            }
        }
        Order::One => {
            if b2 {
                Bucket::B000111
            } else if !b3 {
                Bucket::B100110
            } else {
                Bucket::B100101
            }
        }
        Order::Two => {
            if !b2 {
                if !b1 { Bucket::B010110 } else { Bucket::B100110 }
            } else if !b1 {
                Bucket::B000111
            } else if !b3 {
                Bucket::B100101
            } else {
                Bucket::B000111
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn c(order: u8, b1: u8, b2: u8, b3: u8) -> Bucket {
        Trial::new(order, b1, b2, b3).unwrap().classify()
    }

    #[test]
    fn test_order_zero() {
        for b2 in 0..2 {
            for b3 in 0..2 {
                assert_eq!(c(0, 0, b2, b3), Bucket::B000111);
            }
        }
        for b3 in 0..2 {
            assert_eq!(c(0, 1, 0, b3), Bucket::B010110);
            assert_eq!(c(0, 1, 1, b3), Bucket::B000111);
        }
    }

    #[test]
    fn test_order_one() {
        for b1 in 0..2 {
            assert_eq!(c(1, b1, 0, 0), Bucket::B100110);
            assert_eq!(c(1, b1, 0, 1), Bucket::B100101);
            for b3 in 0..2 {
                assert_eq!(c(1, b1, 1, b3), Bucket::B000111);
            }
        }
    }

    #[test]
    fn test_order_two() {
        for b3 in 0..2 {
            assert_eq!(c(2, 0, 0, b3), Bucket::B010110);
            assert_eq!(c(2, 1, 0, b3), Bucket::B100110);
            assert_eq!(c(2, 0, 1, b3), Bucket::B000111);
        }
        assert_eq!(c(2, 1, 1, 0), Bucket::B100101);
        assert_eq!(c(2, 1, 1, 1), Bucket::B000111);
    }

    #[test]
    fn test_all_covers_domain_once() {
        let trials: Vec<Trial> = Trial::all().collect();
        assert_eq!(trials.len(), 24);
        let unique: HashSet<Trial> = trials.iter().copied().collect();
        assert_eq!(unique.len(), 24);
    }

    #[test]
    fn test_every_bucket_reachable() {
        let reached: HashSet<Bucket> = Trial::all().map(Trial::classify).collect();
        assert_eq!(reached.len(), 4);
    }

    #[test]
    fn test_classify_is_pure() {
        let forward: Vec<Bucket> = Trial::all().map(Trial::classify).collect();
        let trials: Vec<Trial> = Trial::all().collect();
        for (trial, bucket) in trials.iter().rev().zip(forward.iter().rev()) {
            assert_eq!(trial.classify(), *bucket);
        }
    }

    #[test]
    fn test_rejects_out_of_range() {
        assert!(matches!(Trial::new(3, 0, 0, 0), Err(SimError::InvalidOrder(3))));
        assert!(matches!(
            Trial::new(0, 2, 0, 0),
            Err(SimError::InvalidBit { name: "b1", value: 2 })
        ));
        assert!(matches!(
            Trial::new(0, 0, 0, 9),
            Err(SimError::InvalidBit { name: "b3", value: 9 })
        ));
    }
}
