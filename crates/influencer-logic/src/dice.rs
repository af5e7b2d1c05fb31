//! Injectable randomness.
//!
//! Formulas that roll take `&mut impl RandomSource` rather than reaching for
//! a global generator. The trait has a single primitive, a uniform draw in
//! `[0, 1)`, and every other roll is derived from it, so a scripted source
//! can force any outcome by choosing the unit values it returns.
//!
//! ```
//! use influencer_logic::dice::{RandomSource, ScriptedSource};
//!
//! let mut dice = ScriptedSource::new([0.5, 0.0]);
//! assert_eq!(dice.random_int(0, 1000), 500);
//! assert!(dice.chance(0.01));
//! ```

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of uniform randomness for the simulation.
pub trait RandomSource {
    /// Uniform draw in `[0, 1)`.
    fn next_unit(&mut self) -> f64;

    /// Integer in `[low, high)`, computed as `low + floor(u * (high - low))`.
    ///
    /// Returns `low` when the range is empty.
    fn random_int(&mut self, low: i64, high: i64) -> i64 {
        if high <= low {
            return low;
        }
        let span = high - low;
        let offset = (self.next_unit() * span as f64).floor() as i64;
        low + offset.clamp(0, span - 1)
    }

    /// Real number in `[low, high)`.
    fn random_f64(&mut self, low: f64, high: f64) -> f64 {
        low + self.next_unit() * (high - low)
    }

    /// True with the given probability.
    fn chance(&mut self, probability: f64) -> bool {
        self.next_unit() < probability
    }

    /// Uniform index into a collection of `len` items (0 when empty).
    fn pick(&mut self, len: usize) -> usize {
        self.random_int(0, len as i64) as usize
    }
}

/// Adapter that drives the simulation from any `rand` generator.
#[derive(Debug, Clone)]
pub struct RngSource<R = StdRng> {
    rng: R,
}

impl RngSource<StdRng> {
    /// Reproducible source: the same seed replays the same game.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Source seeded from operating system entropy.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn next_unit(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }
}

/// Replays a fixed list of unit values, cycling when exhausted.
///
/// Values are clamped into `[0, 1)`. An empty script always yields `0.0`.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSource {
    values: Vec<f64>,
    cursor: usize,
}

impl ScriptedSource {
    pub fn new(values: impl IntoIterator<Item = f64>) -> Self {
        Self {
            values: values
                .into_iter()
                .map(|v| v.clamp(0.0, 1.0 - f64::EPSILON))
                .collect(),
            cursor: 0,
        }
    }

    /// Number of draws taken so far.
    pub fn draws(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for ScriptedSource {
    fn next_unit(&mut self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value
    }
}
