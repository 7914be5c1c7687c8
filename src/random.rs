use rand::Rng;

const MULTIPLIER_A: i64 = 1103515245;
const INCREMENT_C: i64 = 12345;
const DEFAULT_SEED: i64 = 3819201;

/// Source of random numbers for the random opponent.
pub trait RandomGenerator: Default {
    fn next(&mut self) -> i32;

    /// Returns a number in `from..to`.
    fn next_range(&mut self, from: i32, to: i32) -> i32;

    /// Picks an element of `items`, or `None` if it is empty.
    fn pick<'a, K>(&mut self, items: &'a [K]) -> Option<&'a K> {
        if items.is_empty() {
            return None;
        }
        items.get(self.next_range(0, items.len() as i32) as usize)
    }
}

/// Thread-local `rand` generator.
#[derive(Debug, Default)]
pub struct StandardRandomGenerator;

impl RandomGenerator for StandardRandomGenerator {
    fn next(&mut self) -> i32 {
        rand::random()
    }

    fn next_range(&mut self, from: i32, to: i32) -> i32 {
        rand::rng().random_range(from..to)
    }
}

/// Linear congruential generator that replays the same sequence for a given seed.
#[derive(Debug)]
pub struct CustomNumberGenerator {
    seed: i64,
}

impl Default for CustomNumberGenerator {
    fn default() -> Self {
        CustomNumberGenerator::new(DEFAULT_SEED)
    }
}

impl RandomGenerator for CustomNumberGenerator {
    fn next(&mut self) -> i32 {
        self.seed = (self.seed * MULTIPLIER_A + INCREMENT_C) % (i32::MAX as i64);
        self.seed as i32
    }

    fn next_range(&mut self, from: i32, to: i32) -> i32 {
        (self.next() % (to - from)).abs() + from
    }
}

impl CustomNumberGenerator {
    /// Creates a generator. The seed is reduced modulo `i32::MAX` so the
    /// multiplication in `next` cannot overflow.
    pub const fn new(seed: i64) -> Self {
        Self {
            seed: seed % (i32::MAX as i64),
        }
    }

    /// Builds a generator from a user-supplied seed.
    pub fn from_seed(seed: u64) -> Self {
        Self::new((seed % i32::MAX as u64) as i64)
    }
}
