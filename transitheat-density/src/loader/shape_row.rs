use serde::{Deserialize, Serialize};

/// a single row from `shapes.txt`. other GTFS columns such as
/// `shape_dist_traveled` are ignored.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShapeRow {
    pub shape_id: String,
    pub shape_pt_lat: f64,
    pub shape_pt_lon: f64,
    /// order of the point within its shape. values increase along the shape
    /// but are not required to be consecutive.
    pub shape_pt_sequence: u32,
}

impl ShapeRow {
    pub fn new(shape_id: &str, shape_pt_sequence: u32, shape_pt_lat: f64, shape_pt_lon: f64) -> Self {
        Self {
            shape_id: shape_id.to_string(),
            shape_pt_lat,
            shape_pt_lon,
            shape_pt_sequence,
        }
    }
}
