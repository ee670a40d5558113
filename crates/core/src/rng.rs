use rand::{rngs::StdRng, Rng, SeedableRng};

/// Uniform integer provider used by the sampler.
///
/// `next_index(len)` must return a value in `0..len`. Callers never pass
/// `len == 0`.
pub trait RandomSource {
    fn next_index(&mut self, len: usize) -> usize;
}

#[derive(Debug, Clone)]
pub struct RngState {
    seed: u64,
    rng: StdRng,
}

impl RngState {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            seed,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Seeds from OS entropy, keeping the drawn seed so a session can be replayed.
    pub fn from_entropy() -> Self {
        Self::from_seed(rand::random())
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn next_u64(&mut self) -> u64 {
        self.rng.gen()
    }
}

impl RandomSource for RngState {
    fn next_index(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_index(&mut self, len: usize) -> usize {
        (**self).next_index(len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_sequence() {
        let mut a = RngState::from_seed(42);
        let mut b = RngState::from_seed(42);
        let left: Vec<usize> = (0..32).map(|_| a.next_index(7)).collect();
        let right: Vec<usize> = (0..32).map(|_| b.next_index(7)).collect();
        assert_eq!(left, right);
        assert_eq!(a.seed(), 42);
    }

    #[test]
    fn indices_stay_in_range() {
        let mut rng = RngState::from_seed(7);
        for len in 1..20 {
            for _ in 0..50 {
                assert!(rng.next_index(len) < len);
            }
        }
    }

    #[test]
    fn entropy_seed_is_replayable() {
        let mut first = RngState::from_entropy();
        let mut replay = RngState::from_seed(first.seed());
        assert_eq!(first.next_u64(), replay.next_u64());
    }
}
