//! discovery of city directories and the `cities.json` manifest read by the
//! map frontend.
use std::path::Path;

use itertools::Itertools;
use transitheat_density::output::write_atomic;

use crate::pipeline::PipelineError;

/// name of the manifest written to the root of the output directory
pub const MANIFEST_FILENAME: &str = "cities.json";

/// sorted names of the non-hidden subdirectories of `directory`
pub fn list_city_directories(directory: &Path) -> Result<Vec<String>, PipelineError> {
    let entries = std::fs::read_dir(directory).map_err(|e| {
        PipelineError::CatalogError(format!("failure listing {}: {e}", directory.display()))
    })?;
    let mut cities = vec![];
    for entry in entries {
        let entry = entry.map_err(|e| {
            PipelineError::CatalogError(format!("failure listing {}: {e}", directory.display()))
        })?;
        let name = entry.file_name().to_string_lossy().to_string();
        if entry.path().is_dir() && !name.starts_with('.') {
            cities.push(name);
        }
    }
    Ok(cities.into_iter().sorted().collect_vec())
}

/// cities with raw GTFS data available. a missing source directory has no
/// cities.
pub fn list_source_cities(source_directory: &Path) -> Result<Vec<String>, PipelineError> {
    if !source_directory.exists() {
        log::warn!("source directory {} does not exist", source_directory.display());
        return Ok(vec![]);
    }
    list_city_directories(source_directory)
}

/// rewrites `cities.json` with every processed city found in the output
/// directory
pub fn update_manifest(output_directory: &Path) -> Result<Vec<String>, PipelineError> {
    if !output_directory.is_dir() {
        return Err(PipelineError::CatalogError(format!(
            "could not find output directory: {}",
            output_directory.display()
        )));
    }
    let cities = list_city_directories(output_directory)?;
    let manifest_file = output_directory.join(MANIFEST_FILENAME);
    let bytes = serde_json::to_vec_pretty(&cities)
        .map_err(|e| PipelineError::CatalogError(format!("failure encoding manifest: {e}")))?;
    write_atomic(&manifest_file, &bytes)?;
    log::info!("updated {}", manifest_file.display());
    log::info!("found {} cities: {}", cities.len(), cities.join(", "));
    Ok(cities)
}
