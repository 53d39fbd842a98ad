use crate::errors::Result;
use crate::store::{FitBundle, FitStoreConfig};
use crate::surrogates::GprFit;
use crate::transforms::{to_fit_coords, Quantity};
use log::debug;
use ndarray::{Array1, Array2, Zip};

/// A predicted value with its propagated 1-sigma fit uncertainty
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Estimate {
    pub value: f64,
    pub err: f64,
}

/// Remnant properties predicted at a single mass ratio
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RemnantProperties {
    pub mass: Estimate,
    pub spin: Estimate,
    pub kick: Estimate,
    pub peak_luminosity: Estimate,
}

/// Remnant properties predicted at a sequence of mass ratios, every field
/// aligned by position with the input
#[derive(Clone, Debug, PartialEq)]
pub struct RemnantSeries {
    pub mass: Array1<f64>,
    pub mass_err: Array1<f64>,
    pub spin: Array1<f64>,
    pub spin_err: Array1<f64>,
    pub kick: Array1<f64>,
    pub kick_err: Array1<f64>,
    pub peak_luminosity: Array1<f64>,
    pub peak_luminosity_err: Array1<f64>,
}

impl RemnantSeries {
    /// Number of predictions held
    pub fn len(&self) -> usize {
        self.mass.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mass.is_empty()
    }

    /// Predictions at position i as a scalar record
    pub fn at(&self, i: usize) -> RemnantProperties {
        RemnantProperties {
            mass: Estimate {
                value: self.mass[i],
                err: self.mass_err[i],
            },
            spin: Estimate {
                value: self.spin[i],
                err: self.spin_err[i],
            },
            kick: Estimate {
                value: self.kick[i],
                err: self.kick_err[i],
            },
            peak_luminosity: Estimate {
                value: self.peak_luminosity[i],
                err: self.peak_luminosity_err[i],
            },
        }
    }
}

/// Input cardinality of an evaluation, resolved once at the API boundary
#[derive(Clone, Debug, PartialEq)]
pub enum FitInput {
    Scalar(f64),
    Series(Vec<f64>),
}

impl From<f64> for FitInput {
    fn from(q: f64) -> FitInput {
        FitInput::Scalar(q)
    }
}

impl From<Vec<f64>> for FitInput {
    fn from(qs: Vec<f64>) -> FitInput {
        FitInput::Series(qs)
    }
}

impl From<&[f64]> for FitInput {
    fn from(qs: &[f64]) -> FitInput {
        FitInput::Series(qs.to_vec())
    }
}

impl<const N: usize> From<[f64; N]> for FitInput {
    fn from(qs: [f64; N]) -> FitInput {
        FitInput::Series(qs.to_vec())
    }
}

/// Evaluation output, shape-matched to the input cardinality
#[derive(Clone, Debug, PartialEq)]
pub enum FitOutput {
    Scalar(RemnantProperties),
    Series(RemnantSeries),
}

impl FitOutput {
    pub fn as_scalar(&self) -> Option<&RemnantProperties> {
        match self {
            FitOutput::Scalar(properties) => Some(properties),
            FitOutput::Series(_) => None,
        }
    }

    pub fn as_series(&self) -> Option<&RemnantSeries> {
        match self {
            FitOutput::Scalar(_) => None,
            FitOutput::Series(series) => Some(series),
        }
    }
}

/// Remnant property predictor backed by four pre-trained regression fits.
///
/// Models are loaded once at construction and read-only afterwards, so
/// independent instances can be used from different threads freely.
pub struct RemnantSurrogate {
    fits: FitBundle,
}

impl RemnantSurrogate {
    /// Load the surrogate from the configured fit artifact
    pub fn load(config: &FitStoreConfig) -> Result<RemnantSurrogate> {
        let fits = FitBundle::load(config)?;
        debug!("Remnant surrogate ready: {}", fits);
        Ok(RemnantSurrogate { fits })
    }

    /// Build the surrogate around an already assembled bundle
    pub fn new(fits: FitBundle) -> RemnantSurrogate {
        RemnantSurrogate { fits }
    }

    /// Evaluate all four fits at the given mass ratio(s).
    ///
    /// A scalar input yields [FitOutput::Scalar], a sequence input
    /// [FitOutput::Series] of the same length. Each quantity comes back in
    /// physical units with its propagated 1-sigma uncertainty.
    pub fn evaluate_fit(&self, input: impl Into<FitInput>) -> Result<FitOutput> {
        let input = input.into();
        let mass_ratios: &[f64] = match &input {
            FitInput::Scalar(q) => std::slice::from_ref(q),
            FitInput::Series(qs) => qs,
        };
        let x_fit = to_fit_coords(mass_ratios)?;
        let series = self.evaluate_fit_at(&x_fit)?;
        Ok(match input {
            FitInput::Scalar(_) => FitOutput::Scalar(series.at(0)),
            FitInput::Series(_) => FitOutput::Series(series),
        })
    }

    /// Evaluate at a single mass ratio
    pub fn predict(&self, mass_ratio: f64) -> Result<RemnantProperties> {
        let x_fit = to_fit_coords(std::slice::from_ref(&mass_ratio))?;
        Ok(self.evaluate_fit_at(&x_fit)?.at(0))
    }

    fn evaluate_fit_at(&self, x_fit: &Array2<f64>) -> Result<RemnantSeries> {
        let (mass, mass_err) = eval_quantity(self.fits.mass.as_ref(), Quantity::Mass, x_fit)?;
        let (spin, spin_err) = eval_quantity(self.fits.spin.as_ref(), Quantity::Spin, x_fit)?;
        let (kick, kick_err) = eval_quantity(self.fits.kick.as_ref(), Quantity::Kick, x_fit)?;
        let (peak_luminosity, peak_luminosity_err) =
            eval_quantity(self.fits.luminosity.as_ref(), Quantity::Luminosity, x_fit)?;
        Ok(RemnantSeries {
            mass,
            mass_err,
            spin,
            spin_err,
            kick,
            kick_err,
            peak_luminosity,
            peak_luminosity_err,
        })
    }
}

/// Query one fit and inverse-transform prediction and uncertainty into
/// physical units, each through the quantity's own transform.
fn eval_quantity(
    fit: &dyn GprFit,
    quantity: Quantity,
    x_fit: &Array2<f64>,
) -> Result<(Array1<f64>, Array1<f64>)> {
    let (pred, std) = fit.predict_with_std(&x_fit.view())?;
    let value = pred.mapv(|y| quantity.from_fit(y));
    let err = Zip::from(&pred)
        .and(&std)
        .map_collect(|&y, &s| quantity.uncertainty(y, s));
    Ok((value, err))
}
