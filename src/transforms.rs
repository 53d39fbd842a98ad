use crate::errors::{RemnantError, Result};
use ndarray::{Array1, Array2, Axis};

/// Map mass ratios to the fit-space coordinates the regressors were trained
/// on, `log10(q)`, shaped as an (n, 1) column vector.
///
/// Mass ratios follow the q >= 1 convention; anything non-finite or below 1
/// is rejected rather than propagated as NaN.
pub fn to_fit_coords(mass_ratios: &[f64]) -> Result<Array2<f64>> {
    if mass_ratios.is_empty() {
        return Err(RemnantError::InvalidValue(
            "at least one mass ratio is required".to_string(),
        ));
    }
    for &q in mass_ratios {
        if !q.is_finite() || q < 1.0 {
            return Err(RemnantError::InvalidValue(format!(
                "mass ratio must be finite and >= 1, got {}",
                q
            )));
        }
    }
    let coords: Array1<f64> = mass_ratios.iter().map(|q| q.log10()).collect();
    Ok(coords.insert_axis(Axis(1)))
}

/// A physical quantity predicted by the remnant surrogate, with its inverse
/// transform from fit space back to physical units.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Quantity {
    /// Remnant mass, fit in log10(1 - mf)
    Mass,
    /// Remnant spin, fit in log10(sf)
    Spin,
    /// Remnant kick velocity, fit in log10(vf)
    Kick,
    /// Peak luminosity, fit in log10(Lpeak)
    Luminosity,
}

impl Quantity {
    /// Transform a raw fit output into the physical quantity
    pub fn from_fit(self, y: f64) -> f64 {
        match self {
            Quantity::Mass => 1.0 - 10f64.powf(y),
            Quantity::Spin | Quantity::Kick | Quantity::Luminosity => 10f64.powf(y),
        }
    }

    /// Propagate the fit-space standard deviation through the inverse
    /// transform, as the first-order difference `f(y + std) - f(y)`.
    ///
    /// One-sided by construction; its sign follows the monotonicity of the
    /// inverse transform (negative for the mass, whose transform decreases
    /// in the fit output).
    pub fn uncertainty(self, y: f64, std: f64) -> f64 {
        self.from_fit(y + std) - self.from_fit(y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    #[test]
    fn test_fit_coords_are_log10_column_vector() {
        let coords = to_fit_coords(&[1.0, 10.0, 1000.0]).expect("valid mass ratios");
        assert_eq!(coords.dim(), (3, 1));
        assert_abs_diff_eq!(coords, array![[0.0], [1.0], [3.0]], epsilon = 1e-12);
    }

    #[test]
    fn test_fit_coords_reject_bad_mass_ratios() {
        assert!(to_fit_coords(&[]).is_err());
        assert!(to_fit_coords(&[0.5]).is_err());
        assert!(to_fit_coords(&[-3.0]).is_err());
        assert!(to_fit_coords(&[f64::NAN]).is_err());
        assert!(to_fit_coords(&[f64::INFINITY]).is_err());
        assert!(to_fit_coords(&[10.0, 0.0]).is_err());
    }

    #[test]
    fn test_inverse_transforms() {
        assert_abs_diff_eq!(Quantity::Mass.from_fit(-2.0), 0.99, epsilon = 1e-12);
        assert_abs_diff_eq!(Quantity::Spin.from_fit(-1.0), 0.1, epsilon = 1e-12);
        assert_abs_diff_eq!(Quantity::Kick.from_fit(0.0), 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(Quantity::Luminosity.from_fit(2.0), 100.0, epsilon = 1e-12);
    }

    #[test]
    fn test_uncertainty_is_one_sided_difference() {
        let (y, s) = (-2.0, 0.1);
        assert_abs_diff_eq!(
            Quantity::Spin.uncertainty(y, s),
            10f64.powf(y + s) - 10f64.powf(y),
            epsilon = 1e-15
        );
        // mass transform decreases in the fit output
        assert!(Quantity::Mass.uncertainty(y, s) < 0.0);
        assert!(Quantity::Kick.uncertainty(y, s) > 0.0);
        assert!(Quantity::Luminosity.uncertainty(y, s) > 0.0);
    }

    #[test]
    fn test_each_quantity_uses_its_own_transform_for_uncertainty() {
        // kick and luminosity propagate through 10^y, not the mass transform
        let (y, s) = (1.5, 0.2);
        let expected = 10f64.powf(y + s) - 10f64.powf(y);
        assert_abs_diff_eq!(Quantity::Kick.uncertainty(y, s), expected, epsilon = 1e-12);
        assert_abs_diff_eq!(
            Quantity::Luminosity.uncertainty(y, s),
            expected,
            epsilon = 1e-12
        );
        assert_abs_diff_eq!(
            Quantity::Mass.uncertainty(y, s),
            -expected,
            epsilon = 1e-12
        );
    }
}
