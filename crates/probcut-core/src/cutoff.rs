//! Calibration records relating shallow-search values to deep-search values.

use std::fmt;

use crate::constants::SCORE_INF;
use crate::error::ProbCutError;
use crate::types::{Depth, Score};

/// One calibration point: `deep ≈ a * shallow + b` with residual deviation `sigma`.
///
/// A record is only meaningful when the probe is cheaper than the search it
/// stands in for (`shallow < deep`) and the fit carries noise (`sigma > 0`).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cutoff {
    /// Depth of the probe search.
    pub shallow: Depth,
    /// Depth whose value is being predicted.
    pub deep: Depth,
    /// Slope of the regression.
    pub a: f32,
    /// Intercept of the regression.
    pub b: f32,
    /// Standard deviation of the regression residual.
    pub sigma: f32,
}

impl Cutoff {
    pub const fn new(shallow: Depth, deep: Depth, a: f32, b: f32, sigma: f32) -> Self {
        Cutoff {
            shallow,
            deep,
            a,
            b,
            sigma,
        }
    }

    /// Checks the record invariants.
    ///
    /// The depth range is not checked here, it belongs to the store.
    pub fn validate(&self) -> Result<(), ProbCutError> {
        for (name, value) in [("a", self.a), ("b", self.b), ("sigma", self.sigma)] {
            if !value.is_finite() {
                return Err(ProbCutError::NonFiniteCoefficient { name });
            }
        }
        if self.sigma <= 0.0 {
            return Err(ProbCutError::InvalidSigma(self.sigma));
        }
        if self.a <= 0.0 {
            return Err(ProbCutError::InvalidSlope(self.a));
        }
        if self.shallow >= self.deep {
            return Err(ProbCutError::ShallowNotBelowDeep {
                shallow: self.shallow,
                deep: self.deep,
            });
        }
        Ok(())
    }

    /// Returns true if the record can take part in a cutoff decision.
    #[inline]
    pub fn is_usable(&self) -> bool {
        self.validate().is_ok()
    }

    /// Predicted deep value for a shallow value.
    #[inline]
    pub fn predict(&self, shallow_value: Score) -> f64 {
        self.a as f64 * shallow_value as f64 + self.b as f64
    }

    /// Confidence margin `t * sigma`.
    #[inline]
    pub fn margin(&self, threshold: f64) -> f64 {
        threshold * self.sigma as f64
    }

    /// Smallest shallow value whose prediction clears `beta` by the margin.
    ///
    /// Returns `None` if the bound is not a finite value inside the open window.
    pub fn fail_high_bound(&self, beta: Score, threshold: f64) -> Option<Score> {
        let bound = ((beta as f64 + self.margin(threshold) - self.b as f64) / self.a as f64).ceil();
        to_window_score(bound)
    }

    /// Largest shallow value whose prediction stays under `alpha` by the margin.
    ///
    /// Returns `None` if the bound is not a finite value inside the open window.
    pub fn fail_low_bound(&self, alpha: Score, threshold: f64) -> Option<Score> {
        let bound =
            ((alpha as f64 - self.margin(threshold) - self.b as f64) / self.a as f64).floor();
        to_window_score(bound)
    }
}

/// Converts a probe bound to a score, rejecting anything that cannot be searched.
#[inline]
fn to_window_score(bound: f64) -> Option<Score> {
    let inf = SCORE_INF as f64;
    if bound.is_finite() && bound > -inf && bound < inf {
        Some(bound as Score)
    } else {
        None
    }
}

impl fmt::Display for Cutoff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:>2} <- {:>2}: a={:.4} b={:.4} sigma={:.4}",
            self.deep, self.shallow, self.a, self.b, self.sigma
        )
    }
}
