//! Outcome buckets
//!
//! The labels are opaque names of the combinatorial patterns each class
//! stands for; they are not binary numbers.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumCount, EnumIter, EnumString, IntoStaticStr};

/// One of the four classes every trial falls into.
///
/// Declaration order is report order.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumCount,
    EnumString,
    IntoStaticStr,
)]
#[repr(u8)]
pub enum Bucket {
    #[strum(serialize = "000111")]
    #[serde(rename = "000111")]
    B000111 = 0,

    #[strum(serialize = "010110")]
    #[serde(rename = "010110")]
    B010110 = 1,

    #[strum(serialize = "100101")]
    #[serde(rename = "100101")]
    B100101 = 2,

    #[strum(serialize = "100110")]
    #[serde(rename = "100110")]
    B100110 = 3,
}

impl Bucket {
    /// Printable label
    pub fn label(self) -> &'static str {
        self.into()
    }

    /// Slot in a `[_; Bucket::COUNT]` array
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }
}
