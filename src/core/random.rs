use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

/// Source of uniform draws used by the classifiers and the privacy synthesis.
///
/// Every draw the synthesizer makes goes through this trait, so a seeded or
/// replayed source makes a whole analysis reproducible.
pub trait RandomSource: Send {
    /// Uniform draw in `[0, 1)`.
    fn next_f64(&mut self) -> f64;

    fn chance(&mut self, probability: f64) -> bool {
        self.next_f64() < probability
    }

    /// Uniform index in `0..len`. Returns 0 for an empty range.
    fn index(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        let idx = (self.next_f64() * len as f64) as usize;
        idx.min(len - 1)
    }

    /// Uniform integer in `[low, high]`.
    fn between(&mut self, low: u32, high: u32) -> u32 {
        if high <= low {
            return low;
        }
        low + self.index((high - low + 1) as usize) as u32
    }
}

/// Adapter from any `rand` generator.
pub struct RngSource<R = StdRng> {
    rng: R,
}

impl RngSource<StdRng> {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_rng(&mut rand::rng()),
        }
    }
}

impl<R: RngCore> RngSource<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: RngCore + Send> RandomSource for RngSource<R> {
    fn next_f64(&mut self) -> f64 {
        self.rng.random::<f64>()
    }
}

/// Replays a recorded list of draws, cycling when exhausted.
#[derive(Debug, Clone)]
pub struct ReplaySource {
    draws: Vec<f64>,
    pos: usize,
}

impl ReplaySource {
    pub fn new(draws: Vec<f64>) -> Self {
        let draws = draws
            .into_iter()
            .map(|d| d.clamp(0.0, 0.999_999))
            .collect();
        Self { draws, pos: 0 }
    }

    /// Every draw returns the same value.
    pub fn constant(value: f64) -> Self {
        Self::new(vec![value])
    }

    pub fn consumed(&self) -> usize {
        self.pos
    }
}

impl RandomSource for ReplaySource {
    fn next_f64(&mut self) -> f64 {
        if self.draws.is_empty() {
            return 0.0;
        }
        let value = self.draws[self.pos % self.draws.len()];
        self.pos += 1;
        value
    }
}
