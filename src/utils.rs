//! Miscellaneous utilities.
//!
//! Currently a small wrapper around `rand` giving every sampler the same
//! seeding behavior: OS entropy in production, fixed seeds in tests.

use rand::distributions::uniform::SampleUniform;
use rand::distributions::Uniform;
use rand::prelude::*;

/// Uniform integer random-number generator.
///
/// By default this uses a randomly seeded RNG, but callers can construct it
/// from a fixed seed for reproducible behavior.
pub struct UniformRandomGenerator<T>
where
    T: Copy + SampleUniform + PartialOrd,
{
    rng: StdRng,
    dist: Option<Uniform<T>>,
}

impl<T> UniformRandomGenerator<T>
where
    T: Copy + SampleUniform + PartialOrd,
{
    /// Construct with a random seed (suitable for production use).
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
            dist: None,
        }
    }

    /// Construct with a fixed seed.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            dist: None,
        }
    }

    /// Reset the distribution range to `[min, max]`.
    pub fn reset(&mut self, min: T, max: T) {
        self.dist = Some(Uniform::new_inclusive(min, max));
    }

    /// Fill `out` with independent draws from `[min, max]`.
    ///
    /// Draws are made *with replacement*, so repeated values are possible.
    pub fn gen_with_replacement(&mut self, out: &mut [T], min: T, max: T) {
        self.reset(min, max);
        if let Some(dist) = self.dist.as_ref() {
            for dst in out.iter_mut() {
                *dst = self.rng.sample(dist);
            }
        }
    }
}

impl<T> Default for UniformRandomGenerator<T>
where
    T: Copy + SampleUniform + PartialOrd,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::UniformRandomGenerator;

    #[test]
    fn samples_within_bounds() {
        let mut rng = UniformRandomGenerator::<u32>::from_seed(1234);
        let mut buf = [0u32; 64];
        rng.gen_with_replacement(&mut buf, 3, 10);
        assert!(buf.iter().all(|&v| (3..=10).contains(&v)));
    }

    #[test]
    fn repeats_are_allowed() {
        let mut rng = UniformRandomGenerator::<usize>::from_seed(5);
        let mut buf = [usize::MAX; 4];
        rng.gen_with_replacement(&mut buf, 0, 0);
        assert_eq!(buf, [0, 0, 0, 0]);
    }

    #[test]
    fn deterministic_with_same_seed() {
        let mut rng1 = UniformRandomGenerator::<u32>::from_seed(42);
        let mut rng2 = UniformRandomGenerator::<u32>::from_seed(42);

        let mut a = [0u32; 16];
        let mut b = [0u32; 16];
        rng1.gen_with_replacement(&mut a, 0, 1000);
        rng2.gen_with_replacement(&mut b, 0, 1000);
        assert_eq!(a, b);
    }
}
