use crate::errors::{RemnantError, Result};
use ndarray::{Array1, ArrayView2};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::Path;
use std::{fmt, fs};

/// A trait for a pre-trained regression fit queried by the remnant surrogate.
///
/// Implementations predict, for each row of an `(n, 1)` matrix of fit-space
/// coordinates, a point value together with its 1-sigma standard deviation.
/// Any regression backend exposing this capability is substitutable; the
/// bundle loader deserializes implementations as tagged trait objects.
#[typetag::serde(tag = "type")]
pub trait GprFit: fmt::Display + Send + Sync {
    /// Predict values and standard deviations at n points given as (n, 1) matrix.
    fn predict_with_std(&self, x: &ArrayView2<f64>) -> Result<(Array1<f64>, Array1<f64>)>;
}

/// A Gaussian-process fit exported as a dense sample grid.
///
/// The training pipeline evaluates the trained regressor on a fine grid over
/// the fit coordinate and stores `(x, mean, std)` triples; prediction is
/// piecewise-linear interpolation on that grid, clamped at the edges.
/// Deserialization goes through [TabulatedFit::new], so a record violating
/// the grid invariants is rejected as corrupt rather than accepted.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(try_from = "FitGrid")]
pub struct TabulatedFit {
    x: Vec<f64>,
    mean: Vec<f64>,
    std: Vec<f64>,
}

/// Raw grid triples as they sit in a fit record, before validation
#[derive(Deserialize)]
struct FitGrid {
    x: Vec<f64>,
    mean: Vec<f64>,
    std: Vec<f64>,
}

impl TryFrom<FitGrid> for TabulatedFit {
    type Error = RemnantError;

    fn try_from(grid: FitGrid) -> Result<TabulatedFit> {
        TabulatedFit::new(grid.x, grid.mean, grid.std)
    }
}

impl TabulatedFit {
    /// Build a fit from sample grid triples. The grid must be strictly
    /// increasing and hold at least two samples.
    pub fn new(x: Vec<f64>, mean: Vec<f64>, std: Vec<f64>) -> Result<TabulatedFit> {
        if x.len() < 2 || x.len() != mean.len() || x.len() != std.len() {
            return Err(RemnantError::InvalidValue(format!(
                "tabulated fit needs equal-length grids of at least 2 samples, got ({}, {}, {})",
                x.len(),
                mean.len(),
                std.len()
            )));
        }
        if !x.windows(2).all(|w| w[0] < w[1]) {
            return Err(RemnantError::InvalidValue(
                "tabulated fit grid must be strictly increasing".to_string(),
            ));
        }
        if x.iter().chain(mean.iter()).chain(std.iter()).any(|v| !v.is_finite()) {
            return Err(RemnantError::InvalidValue(
                "tabulated fit grid values must be finite".to_string(),
            ));
        }
        Ok(TabulatedFit { x, mean, std })
    }

    /// Number of grid samples
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    fn interpolate(&self, table: &[f64], xq: f64) -> f64 {
        let n = self.x.len();
        if xq <= self.x[0] {
            return table[0];
        }
        if xq >= self.x[n - 1] {
            return table[n - 1];
        }
        let i = self.x.partition_point(|&v| v <= xq);
        let (x0, x1) = (self.x[i - 1], self.x[i]);
        let t = (xq - x0) / (x1 - x0);
        table[i - 1] + t * (table[i] - table[i - 1])
    }
}

#[typetag::serde]
impl GprFit for TabulatedFit {
    fn predict_with_std(&self, x: &ArrayView2<f64>) -> Result<(Array1<f64>, Array1<f64>)> {
        if x.ncols() != 1 {
            return Err(RemnantError::InvalidValue(format!(
                "fit coordinates must be a column vector, got {} columns",
                x.ncols()
            )));
        }
        let coords = x.column(0);
        let mean = coords.mapv(|xq| self.interpolate(&self.mean, xq));
        let std = coords.mapv(|xq| self.interpolate(&self.std, xq));
        Ok((mean, std))
    }
}

impl fmt::Display for TabulatedFit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "TabulatedFit({} samples over [{}, {}])",
            self.x.len(),
            self.x[0],
            self.x[self.x.len() - 1]
        )
    }
}

/// Write fits to the given file as concatenated JSON records, the artifact
/// format read back by the bundle loader.
pub fn write_fit_records(path: &Path, fits: &[Box<dyn GprFit>]) -> Result<()> {
    let mut file = fs::File::create(path)?;
    for fit in fits {
        let bytes = serde_json::to_string(fit)?;
        file.write_all(bytes.as_bytes())?;
        file.write_all(b"\n")?;
    }
    Ok(())
}
