//! pb-core: outcome classifier and trial loops
//!
//! Every trial is four random draws (a ternary `order` and three bits) that a
//! fixed decision tree maps to one of four buckets. A run tallies the buckets
//! over many trials and reports their frequencies.

pub mod bucket;
pub mod error;
pub mod logging;
pub mod report;
pub mod sampler;
pub mod sim;
pub mod tally;
pub mod trial;

pub use bucket::Bucket;
pub use error::{Result, SimError};
pub use report::{BucketRow, Report};
pub use sampler::SamplerKind;
pub use sim::{SimConfig, run_parallel, run_sequential, simulate};
pub use tally::{Tally, expected_frequencies};
pub use trial::{Order, Trial, classify};

pub use pb_rng::TrialRng;
