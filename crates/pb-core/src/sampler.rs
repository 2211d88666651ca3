//! Trial samplers
//!
//! Two ways of drawing the root branch. They are kept as separate
//! configurations and tested independently.

use pb_rng::TrialRng;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::trial::{Order, Trial};

/// Default trial count of the uniform simulator
pub const UNIFORM_DEFAULT_TRIALS: u64 = 100_000_000_000;

/// Default trial count of the permutation simulator
pub const PERMUTATION_DEFAULT_TRIALS: u64 = 10_000_000;

/// How a trial's `order` (and, for permutations, `b1`) is drawn
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SamplerKind {
    /// `order` uniform in {0,1,2}, three independent fair bits
    #[default]
    Uniform,

    /// Shuffle `[0,1,2]`: `order` is the first slot and `b1` is set when
    /// the second slot holds the larger of the two remaining values
    Permutation,
}

impl SamplerKind {
    /// Trial count used when none is configured
    pub fn default_trials(self) -> u64 {
        match self {
            SamplerKind::Uniform => UNIFORM_DEFAULT_TRIALS,
            SamplerKind::Permutation => PERMUTATION_DEFAULT_TRIALS,
        }
    }

    /// Draw one trial
    #[inline]
    pub fn draw(self, rng: &mut TrialRng) -> Trial {
        match self {
            SamplerKind::Uniform => {
                let order = order_of(rng.rn2(3) as u8);
                let b1 = rng.bit() != 0;
                let b2 = rng.bit() != 0;
                let b3 = rng.bit() != 0;
                Trial { order, b1, b2, b3 }
            }
            SamplerKind::Permutation => {
                let slots = rng.permutation::<3>();
                let b2 = rng.bit() != 0;
                let b3 = rng.bit() != 0;
                Trial {
                    order: order_of(slots[0]),
                    b1: slots[1] > slots[2],
                    b2,
                    b3,
                }
            }
        }
    }
}

/// Values come from `rn2(3)` or a permutation of `0..3`, so only 0, 1, 2 occur.
#[inline]
fn order_of(value: u8) -> Order {
    match value {
        0 => Order::Zero,
        1 => Order::One,
        _ => Order::Two,
    }
}
