use serde::{Deserialize, Serialize};

/// the columns of `stops.txt` used to describe a stop
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StopRow {
    pub stop_id: String,
    /// an empty name is kept, only stops missing from `stops.txt` are dropped
    #[serde(default)]
    pub stop_name: String,
    pub stop_lat: Option<f64>,
    pub stop_lon: Option<f64>,
}
