use std::path::PathBuf;

use transitheat_density::DensityError;

#[derive(thiserror::Error, Debug)]
pub enum FrequencyError {
    #[error("required GTFS file not found: {0}")]
    InputMissing(PathBuf),
    #[error("failure reading {filepath}: {source}")]
    CsvError { filepath: String, source: csv::Error },
    #[error("invalid GTFS time '{0}', expected H:MM:SS")]
    InvalidTime(String),
    #[error("time window start {start} is after its end {end}")]
    InvalidTimeWindow { start: u32, end: u32 },
    #[error("failure encoding frequency report: {source}")]
    SerializationError {
        #[from]
        source: serde_json::Error,
    },
    #[error("failure writing frequency report: {source}")]
    OutputError {
        #[from]
        source: DensityError,
    },
}
