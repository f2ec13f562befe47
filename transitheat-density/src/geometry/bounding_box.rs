use geo::Point;
use serde::{Deserialize, Serialize};

/// extent of every shape point in a city, in degrees.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl BoundingBox {
    /// builds the extent of a collection of points, or None when it is empty.
    pub fn from_points<'a, I>(points: I) -> Option<BoundingBox>
    where
        I: IntoIterator<Item = &'a Point<f64>>,
    {
        points.into_iter().fold(None, |acc, p| {
            let (lon, lat) = (p.x(), p.y());
            match acc {
                None => Some(BoundingBox {
                    min_lat: lat,
                    max_lat: lat,
                    min_lon: lon,
                    max_lon: lon,
                }),
                Some(b) => Some(BoundingBox {
                    min_lat: b.min_lat.min(lat),
                    max_lat: b.max_lat.max(lat),
                    min_lon: b.min_lon.min(lon),
                    max_lon: b.max_lon.max(lon),
                }),
            }
        })
    }

    /// position of a latitude within the box, in [0, 1] for points inside it.
    /// a collapsed latitude axis maps everything to 0.
    pub fn normalize_lat(&self, lat: f64) -> f64 {
        normalize(lat, self.min_lat, self.max_lat)
    }

    /// position of a longitude within the box, see [`BoundingBox::normalize_lat`].
    pub fn normalize_lon(&self, lon: f64) -> f64 {
        normalize(lon, self.min_lon, self.max_lon)
    }

    /// true if the point lies inside the box or on its boundary. NaN
    /// coordinates are never contained.
    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        self.min_lat <= lat && lat <= self.max_lat && self.min_lon <= lon && lon <= self.max_lon
    }

    pub fn is_degenerate(&self) -> bool {
        self.max_lat == self.min_lat || self.max_lon == self.min_lon
    }

    /// true when both axes are collapsed, i.e. every point shares one location
    pub fn is_point(&self) -> bool {
        self.max_lat == self.min_lat && self.max_lon == self.min_lon
    }
}

fn normalize(value: f64, min: f64, max: f64) -> f64 {
    if max > min {
        (value - min) / (max - min)
    } else {
        0.0
    }
}
