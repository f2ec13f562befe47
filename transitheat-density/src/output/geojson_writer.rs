use std::path::Path;

use geojson::FeatureCollection;

use crate::classify::MergedFeature;
use crate::error::DensityError;

use super::write_atomic;

/// name of the density artifact inside a city's output directory
pub const DENSITY_FILENAME: &str = "transit_density.geojson";

pub fn feature_collection(features: &[MergedFeature]) -> FeatureCollection {
    FeatureCollection {
        bbox: None,
        features: features.iter().map(MergedFeature::to_geojson).collect(),
        foreign_members: None,
    }
}

/// serializes the features of one city as a GeoJSON FeatureCollection and
/// writes it atomically to `path`.
pub fn write_feature_collection(features: &[MergedFeature], path: &Path) -> Result<(), DensityError> {
    let collection = feature_collection(features);
    let bytes = serde_json::to_vec(&collection)?;
    write_atomic(path, &bytes)?;
    log::info!("saved {} features to {}", features.len(), path.display());
    Ok(())
}
