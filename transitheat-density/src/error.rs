use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DensityError {
    #[error("route geometry source not found: {0}")]
    InputMissing(PathBuf),
    #[error("failure reading route geometry from {filepath}: {source}")]
    CsvError {
        filepath: String,
        source: csv::Error,
    },
    #[error("shape '{shape_id}' has a non-finite coordinate at sequence {sequence}: ({lat}, {lon})")]
    NonFiniteCoordinate {
        shape_id: String,
        sequence: u32,
        lat: f64,
        lon: f64,
    },
    #[error("route geometry source {0} contains no shape points")]
    EmptyGeometry(String),
    #[error("invalid density configuration: {0}")]
    InvalidConfiguration(String),
    #[error("{msg}: {source}")]
    ConfigurationReadError {
        msg: String,
        source: config::ConfigError,
    },
    #[error("failure writing {filepath}: {source}")]
    WriteFailure {
        filepath: String,
        source: std::io::Error,
    },
    #[error("failure encoding feature collection: {source}")]
    SerializationError {
        #[from]
        source: serde_json::Error,
    },
}
