use serde::{Deserialize, Serialize};

/// a stop with a known name, location and a positive average gap
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StopFrequency {
    pub stop_id: String,
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    pub avg_gap_sec: u32,
}

impl StopFrequency {
    /// the gap rounded up to whole minutes, as shown to riders
    pub fn approximate_minutes(&self) -> u32 {
        self.avg_gap_sec / 60 + 1
    }
}

/// frequency of every valid stop in a city, most frequent first
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FrequencyReport {
    pub city: String,
    pub start_sec: u32,
    pub end_sec: u32,
    pub sorted_by: String,
    pub stops: Vec<StopFrequency>,
}

impl FrequencyReport {
    pub const SORTED_BY: &'static str = "avg_gap_sec_asc";

    /// file name of the report, named by the whole hours of its window
    pub fn filename(&self) -> String {
        format!("frequency_{}_{}.json", self.start_sec / 3600, self.end_sec / 3600)
    }
}
