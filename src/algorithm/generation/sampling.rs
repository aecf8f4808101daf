//! Random draws used by the generator
//!
//! Categorical draws invert a cumulative distribution against one uniform
//! draw and Gaussian noise uses the Box-Muller transform, so the number of
//! draws per value is fixed and a seed reproduces the same table.

use std::f64::consts::TAU;

use rand::Rng;

use crate::error::{EdFlowError, Result};

/// Categorical distribution sampled by cumulative-distribution inversion
#[derive(Debug, Clone)]
pub struct Categorical<T> {
    outcomes: Vec<T>,
    cumulative: Vec<f64>,
}

impl<T: Copy> Categorical<T> {
    /// Build a distribution from outcome/weight pairs
    ///
    /// Weights are normalised by their sum; they must be finite, non-negative
    /// and not all zero.
    pub fn new(weights: &[(T, f64)]) -> Result<Self> {
        if weights.is_empty() {
            return Err(EdFlowError::config("categorical distribution has no outcomes"));
        }
        if weights.iter().any(|(_, w)| !w.is_finite() || *w < 0.0) {
            return Err(EdFlowError::config(
                "categorical weights must be finite and non-negative",
            ));
        }
        let total: f64 = weights.iter().map(|(_, w)| w).sum();
        if total <= 0.0 {
            return Err(EdFlowError::config("categorical weights sum to zero"));
        }

        let mut running = 0.0;
        let cumulative = weights
            .iter()
            .map(|(_, w)| {
                running += w / total;
                running
            })
            .collect();

        Ok(Self {
            outcomes: weights.iter().map(|(outcome, _)| *outcome).collect(),
            cumulative,
        })
    }

    /// Outcome for a uniform value in [0, 1)
    #[must_use]
    pub fn invert(&self, u: f64) -> T {
        let idx = self.cumulative.partition_point(|&c| c <= u);
        // Rounding can leave the last cumulative value just below 1.0
        self.outcomes[idx.min(self.outcomes.len() - 1)]
    }

    /// Draw one outcome
    pub fn sample<R: Rng>(&self, rng: &mut R) -> T {
        self.invert(uniform(rng))
    }
}

/// Uniform draw in [0, 1)
pub fn uniform<R: Rng>(rng: &mut R) -> f64 {
    rng.random::<f64>()
}

/// Standard normal draw (Box-Muller, two uniform draws)
pub fn standard_normal<R: Rng>(rng: &mut R) -> f64 {
    // 1 - u maps [0, 1) onto (0, 1], keeping ln finite
    let u1 = 1.0 - uniform(rng);
    let u2 = uniform(rng);
    (-2.0 * u1.ln()).sqrt() * (TAU * u2).cos()
}
