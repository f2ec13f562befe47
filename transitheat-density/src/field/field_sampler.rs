use super::SmoothedField;

/// bilinear interpolant over a [`SmoothedField`]. grid node `i` along an axis
/// sits at `min + i * (max - min) / (resolution - 1)`.
#[derive(Clone, Debug)]
pub struct FieldSampler {
    field: SmoothedField,
}

impl FieldSampler {
    pub fn new(field: SmoothedField) -> FieldSampler {
        FieldSampler { field }
    }

    pub fn field(&self) -> &SmoothedField {
        &self.field
    }

    /// interpolated field value at a coordinate. anything outside the
    /// bounding box, or NaN, samples as exactly 0.
    pub fn sample(&self, lat: f64, lon: f64) -> f64 {
        let bbox = self.field.bbox();
        if !bbox.contains(lat, lon) {
            return 0.0;
        }
        let n = self.field.resolution();
        let (r0, r1, tr) = bracket(bbox.normalize_lat(lat), n);
        let (c0, c1, tc) = bracket(bbox.normalize_lon(lon), n);
        let v = self.field.values();
        let top = v[(r0, c0)] * (1.0 - tc) + v[(r0, c1)] * tc;
        let bottom = v[(r1, c0)] * (1.0 - tc) + v[(r1, c1)] * tc;
        top * (1.0 - tr) + bottom * tr
    }

    /// field value at a coordinate rescaled into [0, 1]
    pub fn sample_normalized(&self, lat: f64, lon: f64) -> f64 {
        self.field.normalize(self.sample(lat, lon))
    }
}

/// lower node, upper node and the fractional weight of the upper node for a
/// normalized position on an axis with `n` nodes
fn bracket(position: f64, n: usize) -> (usize, usize, f64) {
    let f = position * (n - 1) as f64;
    let lower = (f.floor().max(0.0) as usize).min(n - 2);
    let t = (f - lower as f64).clamp(0.0, 1.0);
    (lower, lower + 1, t)
}
