use std::path::Path;

use config::Config;
use serde::{Deserialize, Serialize};

use crate::error::DensityError;

/// tuning parameters for one density run. each engine owns its own copy, so
/// cities processed side by side may use different values.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DensityConfig {
    /// number of raster cells along each axis of the density grid
    pub grid_resolution: usize,
    /// standard deviation of the smoothing kernel, in grid cells
    pub smoothing_sigma: f64,
    /// kernel radius as a multiple of `smoothing_sigma`
    pub kernel_truncate: f64,
    /// edges longer than this are treated as gaps in the shape and dropped
    pub jump_threshold_km: f64,
    /// number of steps used to quantize density into classes
    pub density_classes: u32,
    /// maximum class difference (exclusive) for two edges to share a run
    pub class_epsilon: f64,
    /// maximum gap (exclusive) between a run's tail and the next edge
    pub contiguity_threshold_km: f64,
    /// classify shapes on the rayon thread pool
    pub parallelize: bool,
}

impl Default for DensityConfig {
    fn default() -> Self {
        Self {
            grid_resolution: 1000,
            smoothing_sigma: 8.0,
            kernel_truncate: 4.0,
            jump_threshold_km: 1.0,
            density_classes: 20,
            class_epsilon: 0.001,
            contiguity_threshold_km: 0.05,
            parallelize: false,
        }
    }
}

impl DensityConfig {
    pub fn validate(&self) -> Result<(), DensityError> {
        if self.grid_resolution < 2 {
            return Err(DensityError::InvalidConfiguration(format!(
                "grid_resolution must be at least 2, found {}",
                self.grid_resolution
            )));
        }
        if self.density_classes == 0 {
            return Err(DensityError::InvalidConfiguration(String::from(
                "density_classes must be positive",
            )));
        }
        let non_negative = [
            ("smoothing_sigma", self.smoothing_sigma),
            ("kernel_truncate", self.kernel_truncate),
            ("jump_threshold_km", self.jump_threshold_km),
            ("class_epsilon", self.class_epsilon),
            ("contiguity_threshold_km", self.contiguity_threshold_km),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(DensityError::InvalidConfiguration(format!(
                    "{name} must be a finite, non-negative number, found {value}"
                )));
            }
        }
        Ok(())
    }
}

impl TryFrom<&Path> for DensityConfig {
    type Error = DensityError;

    /// reads a configuration from a .toml or .json file. keys missing from
    /// the file keep their default values.
    fn try_from(path: &Path) -> Result<Self, Self::Error> {
        let filepath = path.to_str().unwrap_or_default();
        let format = match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => config::FileFormat::Toml,
            Some("json") => config::FileFormat::Json,
            _ => {
                return Err(DensityError::InvalidConfiguration(format!(
                    "unsupported file type: {filepath}"
                )))
            }
        };
        let config = Config::builder()
            .add_source(config::File::new(filepath, format))
            .build()
            .map_err(|e| DensityError::ConfigurationReadError {
                msg: format!("failed reading '{filepath}'"),
                source: e,
            })?;
        let conf = config
            .try_deserialize::<DensityConfig>()
            .map_err(|e| DensityError::ConfigurationReadError {
                msg: format!("failed decoding '{filepath}'"),
                source: e,
            })?;
        conf.validate()?;
        Ok(conf)
    }
}
