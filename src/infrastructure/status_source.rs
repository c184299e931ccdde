use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::domain::order::OrderStatus;
use crate::domain::ports::StatusSource;

/// Draws each status uniformly from [`OrderStatus::ALL`].
#[derive(Debug)]
pub struct RandomStatusSource<R> {
    rng: R,
}

impl<R: Rng> RandomStatusSource<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RandomStatusSource<StdRng> {
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    /// Reproducible sequence for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> StatusSource for RandomStatusSource<R> {
    fn next_status(&mut self) -> OrderStatus {
        let i = self.rng.gen_range(0..OrderStatus::ALL.len());
        OrderStatus::ALL[i]
    }
}
