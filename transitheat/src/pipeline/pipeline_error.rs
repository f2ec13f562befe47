use transitheat_density::DensityError;

use crate::frequency::FrequencyError;

#[derive(thiserror::Error, Debug)]
pub enum PipelineError {
    #[error("city '{0}' not found in source directory")]
    CityNotFound(String),
    #[error("density map failed: {source}")]
    DensityError {
        #[from]
        source: DensityError,
    },
    #[error("frequency analysis failed: {source}")]
    FrequencyError {
        #[from]
        source: FrequencyError,
    },
    #[error("{0}")]
    CatalogError(String),
    #[error("failure building thread pool: {0}")]
    ThreadPoolError(String),
    #[error("pipeline failed for cities: {}", .0.join(", "))]
    CityFailures(Vec<String>),
    #[error("{failed} of {total} pipeline stages failed")]
    StageFailures { failed: usize, total: usize },
}
