use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of uniform indices, injectable so tests can pin the choice.
pub trait RandomSource: Send {
    /// Uniform index in `0..len`. `len` is never 0.
    fn pick(&mut self, len: usize) -> usize;
}

pub struct StdRandom(StdRng);

impl StdRandom {
    pub fn from_entropy() -> Self {
        Self(StdRng::from_entropy())
    }

    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

impl RandomSource for StdRandom {
    fn pick(&mut self, len: usize) -> usize {
        self.0.gen_range(0..len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pick_stays_in_range() {
        let mut rng = StdRandom::seeded(7);
        for len in 1..20 {
            for _ in 0..50 {
                assert!(rng.pick(len) < len);
            }
        }
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = StdRandom::seeded(42);
        let mut b = StdRandom::seeded(42);
        let xs: Vec<usize> = (0..10).map(|_| a.pick(100)).collect();
        let ys: Vec<usize> = (0..10).map(|_| b.pick(100)).collect();
        assert_eq!(xs, ys);
    }
}
