//! Seedable randomness for stroke synthesis
//!
//! Every tool owns its own [`StrokeRng`] so that a seeded tool replays the
//! same bristles, hatching, and splodges for the same input.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Uniform and normal sampling over a seedable generator
#[derive(Debug, Clone)]
pub struct StrokeRng {
    rng: StdRng,
    /// Second value produced by the last Box-Muller draw
    spare_normal: Option<f32>,
}

impl StrokeRng {
    /// Deterministic generator for reproducible strokes
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            spare_normal: None,
        }
    }

    /// Generator seeded from OS entropy
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
            spare_normal: None,
        }
    }

    /// Seeded when a seed is given, entropy otherwise
    pub fn from_seed_option(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::with_seed(seed),
            None => Self::from_entropy(),
        }
    }

    /// Uniform sample in [0, 1)
    #[inline]
    pub fn unit(&mut self) -> f32 {
        self.rng.r#gen::<f32>()
    }

    /// Uniform sample in [low, high)
    #[inline]
    pub fn uniform(&mut self, low: f32, high: f32) -> f32 {
        low + (high - low) * self.unit()
    }

    /// Standard normal sample (polar Box-Muller)
    ///
    /// Each accepted pair yields two samples; the second is cached and
    /// returned by the next call.
    pub fn normal(&mut self) -> f32 {
        if let Some(spare) = self.spare_normal.take() {
            return spare;
        }

        loop {
            let u = self.unit() * 2.0 - 1.0;
            let v = self.unit() * 2.0 - 1.0;
            let s = u * u + v * v;
            if s == 0.0 || s >= 1.0 {
                continue;
            }
            let mul = (-2.0 * s.ln() / s).sqrt();
            self.spare_normal = Some(v * mul);
            return u * mul;
        }
    }
}

impl Default for StrokeRng {
    fn default() -> Self {
        Self::from_entropy()
    }
}
