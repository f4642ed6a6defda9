use rand::Rng;

/// Source of random comic numbers.
pub trait RandomSource: Send + Sync {
    /// Pick a number in `1..=upper`. `upper` is at least 1.
    fn pick(&self, upper: u32) -> u32;
}

/// Thread-local RNG from `rand`.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn pick(&self, upper: u32) -> u32 {
        rand::thread_rng().gen_range(1..=upper.max(1))
    }
}
