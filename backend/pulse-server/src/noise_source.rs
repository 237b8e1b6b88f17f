use pulse_core::{Payload, ValueSource};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Uniform random values in `[low, high)`.
pub struct NoiseSource {
    rng: StdRng,
    low: f64,
    high: f64,
}

impl NoiseSource {
    pub const DEFAULT_LOW: f64 = 0.0;
    pub const DEFAULT_HIGH: f64 = 100.0;

    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng(), Self::DEFAULT_LOW, Self::DEFAULT_HIGH)
    }

    /// Reproducible sequence for tests
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed), Self::DEFAULT_LOW, Self::DEFAULT_HIGH)
    }

    fn with_rng(rng: StdRng, low: f64, high: f64) -> Self {
        Self { rng, low, high }
    }
}

impl Default for NoiseSource {
    fn default() -> Self {
        Self::new()
    }
}

impl ValueSource for NoiseSource {
    fn next_payload(&mut self) -> Payload {
        Payload::Number(self.rng.random_range(self.low..self.high))
    }
}
