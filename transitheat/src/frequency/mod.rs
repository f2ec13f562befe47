//! average time between arrivals at each stop within a time window.
mod frequency_analysis;
mod frequency_error;
mod frequency_ops;
mod frequency_report;
mod gtfs_time;
mod stop_row;
mod stop_time_row;

pub use frequency_analysis::FrequencyAnalysis;
pub use frequency_error::FrequencyError;
pub use frequency_ops::{average_gap, average_gap_in_window};
pub use frequency_report::{FrequencyReport, StopFrequency};
pub use gtfs_time::parse_gtfs_time;
pub use stop_row::StopRow;
pub use stop_time_row::StopTimeRow;
