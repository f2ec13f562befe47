use geo::{LineString, Point};
use serde_json::{Map, Value};

use super::DensityClass;

/// a polyline of at least two points built from a run of edges that share a
/// shape and a density class.
#[derive(Clone, Debug, PartialEq)]
pub struct MergedFeature {
    pub shape_id: String,
    pub density: DensityClass,
    pub coords: Vec<Point<f64>>,
}

impl MergedFeature {
    pub fn line_string(&self) -> LineString<f64> {
        self.coords.iter().map(|p| p.0).collect()
    }

    /// GeoJSON feature with a [lon, lat] LineString and `density`/`shape_id`
    /// properties
    pub fn to_geojson(&self) -> geojson::Feature {
        let mut properties = Map::new();
        properties.insert(String::from("density"), Value::from(self.density.value()));
        properties.insert(String::from("shape_id"), Value::from(self.shape_id.clone()));
        geojson::Feature {
            bbox: None,
            geometry: Some(geojson::Geometry::new(geojson::Value::from(&self.line_string()))),
            id: None,
            properties: Some(properties),
            foreign_members: None,
        }
    }
}
