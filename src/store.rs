use crate::errors::{RemnantError, Result};
use crate::surrogates::GprFit;
use log::{debug, info};
use std::fs;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// Conventional location of the fit artifact relative to the crate data dir
pub const DEFAULT_ARTIFACT_PATH: &str = "data/BHPTNRSur1dq1e3_remnant.json";

/// Published location of the fit artifact, fetched once when absent locally
pub const DEFAULT_REMOTE_URL: &str =
    "https://zenodo.org/record/8162005/files/BHPTNRSur1dq1e3_remnant.json";

/// Where the fit artifact lives and where to fetch it from when missing.
///
/// Resolved by the caller; the loader itself carries no implicit path state.
/// Setting `remote_url` to `None` disables the network fallback entirely.
#[derive(Clone, Debug)]
pub struct FitStoreConfig {
    pub artifact_path: PathBuf,
    pub remote_url: Option<String>,
}

impl Default for FitStoreConfig {
    fn default() -> Self {
        FitStoreConfig {
            artifact_path: PathBuf::from(DEFAULT_ARTIFACT_PATH),
            remote_url: Some(DEFAULT_REMOTE_URL.to_string()),
        }
    }
}

impl FitStoreConfig {
    /// Configuration for a local artifact with no network fallback
    pub fn local(path: impl Into<PathBuf>) -> Self {
        FitStoreConfig {
            artifact_path: path.into(),
            remote_url: None,
        }
    }
}

/// The four regression fits backing the remnant surrogate, one per quantity.
///
/// The artifact stores the fits positionally (mass, spin, kick, luminosity);
/// roles are assigned right after deserialization so nothing downstream
/// depends on record order.
pub struct FitBundle {
    pub mass: Box<dyn GprFit>,
    pub spin: Box<dyn GprFit>,
    pub kick: Box<dyn GprFit>,
    pub luminosity: Box<dyn GprFit>,
}

impl FitBundle {
    /// Load the four fits from the configured artifact, fetching it first
    /// when absent and a remote URL is configured.
    ///
    /// # Errors
    ///
    /// * [RemnantError::InvalidArtifact]: artifact missing with no fallback,
    ///   or a record count other than four,
    /// * [RemnantError::FetchError]: the fallback download failed,
    /// * [RemnantError::JsonError]: a record could not be deserialized.
    pub fn load(config: &FitStoreConfig) -> Result<FitBundle> {
        if !config.artifact_path.is_file() {
            match &config.remote_url {
                Some(url) => fetch_artifact(url, &config.artifact_path)?,
                None => {
                    return Err(RemnantError::InvalidArtifact(format!(
                        "{} not found and no remote url configured",
                        config.artifact_path.display()
                    )))
                }
            }
        }
        let file = fs::File::open(&config.artifact_path)?;
        let reader = BufReader::new(file);

        // Concatenated JSON records, read until end of stream
        let mut fits: Vec<Box<dyn GprFit>> = Vec::new();
        for record in serde_json::Deserializer::from_reader(reader).into_iter() {
            fits.push(record?);
        }
        debug!(
            "{} fit records read from {}",
            fits.len(),
            config.artifact_path.display()
        );

        let [mass, spin, kick, luminosity]: [Box<dyn GprFit>; 4] =
            fits.try_into().map_err(|fits: Vec<Box<dyn GprFit>>| {
                RemnantError::InvalidArtifact(format!(
                    "expected 4 fit records (mass, spin, kick, luminosity), found {}",
                    fits.len()
                ))
            })?;
        Ok(FitBundle {
            mass,
            spin,
            kick,
            luminosity,
        })
    }
}

impl std::fmt::Debug for FitBundle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(self, f)
    }
}

impl std::fmt::Display for FitBundle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "FitBundle[mass={}, spin={}, kick={}, luminosity={}]",
            self.mass, self.spin, self.kick, self.luminosity
        )
    }
}

fn fetch_artifact(url: &str, dest: &Path) -> Result<()> {
    info!("Remnant fit artifact not found, fetching {}", url);
    if let Some(dir) = dest.parent() {
        if !dir.as_os_str().is_empty() {
            fs::create_dir_all(dir)?;
        }
    }
    let response = reqwest::blocking::get(url)?;
    if !response.status().is_success() {
        return Err(RemnantError::FetchError(format!(
            "{} returned status {}",
            url,
            response.status()
        )));
    }
    let bytes = response.bytes()?;
    fs::write(dest, &bytes)?;
    info!("Remnant fit artifact saved to {}", dest.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surrogates::{write_fit_records, TabulatedFit};
    use std::env;

    fn grid_fit(offset: f64) -> Box<dyn GprFit> {
        Box::new(
            TabulatedFit::new(
                vec![0.0, 1.5, 3.0],
                vec![offset, offset - 1.0, offset - 2.0],
                vec![0.01, 0.02, 0.03],
            )
            .unwrap(),
        )
    }

    fn artifact_with_records(name: &str, n: usize) -> PathBuf {
        let path = env::temp_dir().join(name);
        let fits: Vec<Box<dyn GprFit>> = (0..n).map(|i| grid_fit(-(i as f64))).collect();
        write_fit_records(&path, &fits).expect("artifact written");
        path
    }

    #[test]
    fn test_load_four_record_artifact() {
        let _ = env_logger::builder().is_test(true).try_init();
        let path = artifact_with_records("bhpt_remnant_store_four.json", 4);
        let bundle = FitBundle::load(&FitStoreConfig::local(&path)).expect("bundle loaded");
        let x = ndarray::array![[0.0]];
        let (mass, _) = bundle.mass.predict_with_std(&x.view()).unwrap();
        let (lum, _) = bundle.luminosity.predict_with_std(&x.view()).unwrap();
        assert_eq!(mass[0], 0.0);
        assert_eq!(lum[0], -3.0);
    }

    #[test]
    fn test_load_rejects_wrong_record_count() {
        let path = artifact_with_records("bhpt_remnant_store_three.json", 3);
        let err = FitBundle::load(&FitStoreConfig::local(&path)).unwrap_err();
        assert!(matches!(err, RemnantError::InvalidArtifact(_)), "{}", err);

        let path = artifact_with_records("bhpt_remnant_store_five.json", 5);
        assert!(FitBundle::load(&FitStoreConfig::local(&path)).is_err());
    }

    #[test]
    fn test_load_missing_artifact_without_fallback_is_fatal() {
        let path = env::temp_dir().join("bhpt_remnant_store_no_such_file.json");
        let err = FitBundle::load(&FitStoreConfig::local(&path)).unwrap_err();
        assert!(matches!(err, RemnantError::InvalidArtifact(_)), "{}", err);
    }

    #[test]
    fn test_load_rejects_corrupt_artifact() {
        let path = env::temp_dir().join("bhpt_remnant_store_corrupt.json");
        fs::write(&path, b"{\"type\":\"TabulatedFit\",\"x\":[0.0").unwrap();
        assert!(matches!(
            FitBundle::load(&FitStoreConfig::local(&path)),
            Err(RemnantError::JsonError(_))
        ));
    }

    #[test]
    fn test_load_rejects_records_with_invalid_grids() {
        // well-formed JSON whose grid breaks the fit invariants is corrupt too
        let record = r#"{"type":"TabulatedFit","x":[],"mean":[],"std":[]}"#;
        let path = env::temp_dir().join("bhpt_remnant_store_empty_grid.json");
        fs::write(&path, format!("{0}\n{0}\n{0}\n{0}\n", record)).unwrap();
        assert!(matches!(
            FitBundle::load(&FitStoreConfig::local(&path)),
            Err(RemnantError::JsonError(_))
        ));
    }

    #[test]
    fn test_bundle_debug_names_every_fit() {
        let path = artifact_with_records("bhpt_remnant_store_debug.json", 4);
        let bundle = FitBundle::load(&FitStoreConfig::local(&path)).unwrap();
        let repr = format!("{:?}", bundle);
        for role in ["mass", "spin", "kick", "luminosity"] {
            assert!(repr.contains(role), "{}", repr);
        }
    }

    #[test]
    fn test_default_config_points_at_published_artifact() {
        let config = FitStoreConfig::default();
        assert_eq!(config.artifact_path, PathBuf::from(DEFAULT_ARTIFACT_PATH));
        assert_eq!(config.remote_url.as_deref(), Some(DEFAULT_REMOTE_URL));
    }
}
