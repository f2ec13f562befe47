use geo::{Distance, Haversine, Point};

/// great-circle distance in kilometers using the mean earth radius.
pub fn haversine_km(src: Point<f64>, dst: Point<f64>) -> f64 {
    Haversine.distance(src, dst) / 1000.0
}

/// arithmetic midpoint in lon/lat space. edges are short enough (bounded by the
/// jump threshold) that this is indistinguishable from the geodesic midpoint.
pub fn midpoint(src: Point<f64>, dst: Point<f64>) -> Point<f64> {
    Point::new((src.x() + dst.x()) / 2.0, (src.y() + dst.y()) / 2.0)
}
