use serde::{Deserialize, Serialize};

/// the columns of `stop_times.txt` used for frequency analysis
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StopTimeRow {
    pub stop_id: String,
    /// may be blank for stops that are not timepoints
    pub arrival_time: Option<String>,
}
