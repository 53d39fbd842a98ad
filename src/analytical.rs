use crate::errors::{RemnantError, Result};

/// Closed-form kick velocity fits from the perturbation-theory literature,
/// evaluated at a fixed binary configuration `(q, a)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnalyticalFits {
    q: f64,
    a: f64,
}

impl AnalyticalFits {
    /// Fits for a binary with mass ratio `q` (>= 1) and primary spin
    /// `a` (in [-1, 1])
    pub fn new(q: f64, a: f64) -> Result<AnalyticalFits> {
        if !q.is_finite() || q < 1.0 {
            return Err(RemnantError::InvalidValue(format!(
                "mass ratio must be finite and >= 1, got {}",
                q
            )));
        }
        if !a.is_finite() || a.abs() > 1.0 {
            return Err(RemnantError::InvalidValue(format!(
                "dimensionless spin must lie in [-1, 1], got {}",
                a
            )));
        }
        Ok(AnalyticalFits { q, a })
    }

    /// Kick velocity fit of Sundararajan, Khanna & Hughes,
    /// Eq. (5.5) and (5.7) of [arXiv:1003.0485](https://arxiv.org/abs/1003.0485)
    pub fn kick_fit(&self) -> f64 {
        let a = self.a;
        (0.0440 - 0.0099 * a - 0.0114 * a.powi(2) - 0.0312 * a.powi(3)) / self.q.powi(2)
    }

    /// [Self::kick_fit] with the small-mass-ratio correction factor
    /// `sqrt(1 - 4/q)` of Eq. (5.1), valid for q >= 4 only.
    pub fn kick_fit_small_q_corrected(&self) -> Result<f64> {
        if self.q < 4.0 {
            return Err(RemnantError::OutOfDomain(format!(
                "small-mass-ratio correction requires q >= 4, got {}",
                self.q
            )));
        }
        Ok(self.kick_fit() * (1.0 - 4.0 / self.q).sqrt())
    }

    /// Single-term, spin-independent kick fit of Islam, Field & Khanna,
    /// calibrated to BHPTNRSur1dq1e4 estimates
    pub fn kick_fit_simplified(&self) -> f64 {
        0.034 / self.q.powi(2)
    }
}
