//! Random number generation for outcome simulations
//!
//! Uses a seeded ChaCha RNG so a run can be reproduced from its seed, and
//! ChaCha streams so parallel partitions draw from disjoint substreams of
//! the same seed.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Trial random number generator
///
/// Wraps ChaCha8Rng. Only `(seed, stream)` is serialized; deserializing
/// restarts the stream from its beginning.
#[derive(Debug, Clone)]
pub struct TrialRng {
    rng: ChaCha8Rng,
    seed: u64,
    stream: u64,
}

#[derive(Serialize, Deserialize)]
struct TrialRngRepr {
    seed: u64,
    stream: u64,
}

impl Serialize for TrialRng {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        TrialRngRepr {
            seed: self.seed,
            stream: self.stream,
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for TrialRng {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let repr = TrialRngRepr::deserialize(deserializer)?;
        Ok(TrialRng::with_stream(repr.seed, repr.stream))
    }
}

impl TrialRng {
    /// Create a new RNG with the given seed on stream 0
    pub fn new(seed: u64) -> Self {
        Self::with_stream(seed, 0)
    }

    /// Create a new RNG with the given seed on a specific ChaCha stream.
    ///
    /// Different streams of one seed never overlap, which is what parallel
    /// partitions rely on for independence.
    pub fn with_stream(seed: u64, stream: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        rng.set_stream(stream);
        Self { rng, seed, stream }
    }

    /// Create a new RNG with a random seed
    pub fn from_entropy() -> Self {
        let seed = rand::random();
        Self::new(seed)
    }

    /// Get the seed used to create this RNG
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Get the ChaCha stream this RNG draws from
    pub fn stream(&self) -> u64 {
        self.stream
    }

    /// Returns a uniform value in 0..n
    ///
    /// Returns 0 if n is 0.
    pub fn rn2(&mut self, n: u32) -> u32 {
        if n == 0 {
            return 0;
        }
        self.rng.gen_range(0..n)
    }

    /// Fair binary draw, 0 or 1
    pub fn bit(&mut self) -> u8 {
        self.rn2(2) as u8
    }

    /// Shuffle a slice in place (Fisher-Yates)
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.rn2(i as u32 + 1) as usize;
            items.swap(i, j);
        }
    }

    /// Uniformly random permutation of `0..N`
    pub fn permutation<const N: usize>(&mut self) -> [u8; N] {
        let mut items = [0u8; N];
        for (i, item) in items.iter_mut().enumerate() {
            *item = i as u8;
        }
        self.shuffle(&mut items);
        items
    }
}

impl Default for TrialRng {
    fn default() -> Self {
        Self::from_entropy()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rn2_bounds() {
        let mut rng = TrialRng::new(42);
        for _ in 0..1000 {
            let n = rng.rn2(3);
            assert!(n < 3);
        }
    }

    #[test]
    fn test_bit_is_binary_and_balanced() {
        let mut rng = TrialRng::new(7);
        let ones: u32 = (0..10_000).map(|_| rng.bit() as u32).sum();
        assert!((4_700..=5_300).contains(&ones), "ones = {}", ones);
    }

    #[test]
    fn test_reproducibility() {
        let mut rng1 = TrialRng::new(42);
        let mut rng2 = TrialRng::new(42);

        for _ in 0..100 {
            assert_eq!(rng1.rn2(100), rng2.rn2(100));
        }
    }

    #[test]
    fn test_streams_diverge() {
        let mut a = TrialRng::with_stream(42, 0);
        let mut b = TrialRng::with_stream(42, 1);
        let xs: Vec<u32> = (0..64).map(|_| a.rn2(1_000_000)).collect();
        let ys: Vec<u32> = (0..64).map(|_| b.rn2(1_000_000)).collect();
        assert_ne!(xs, ys);
    }

    #[test]
    fn test_zero_inputs() {
        let mut rng = TrialRng::new(42);
        assert_eq!(rng.rn2(0), 0);
        let mut empty: [u8; 0] = [];
        rng.shuffle(&mut empty);
    }

    #[test]
    fn test_permutation_is_permutation() {
        let mut rng = TrialRng::new(3);
        for _ in 0..500 {
            let mut p = rng.permutation::<3>();
            p.sort_unstable();
            assert_eq!(p, [0, 1, 2]);
        }
    }

    #[test]
    fn test_permutation_first_position_uniform() {
        let mut rng = TrialRng::new(11);
        let mut counts = [0u32; 3];
        for _ in 0..30_000 {
            counts[rng.permutation::<3>()[0] as usize] += 1;
        }
        for c in counts {
            assert!((9_500..=10_500).contains(&c), "counts = {:?}", counts);
        }
    }

    #[test]
    fn test_serde_restarts_stream() {
        let mut rng = TrialRng::with_stream(99, 4);
        let first = rng.rn2(1_000_000);
        let json = serde_json::to_string(&rng).unwrap();
        let mut restored: TrialRng = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.seed(), 99);
        assert_eq!(restored.stream(), 4);
        assert_eq!(restored.rn2(1_000_000), first);
    }
}
