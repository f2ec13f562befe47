use ndarray::Array2;

use crate::geometry::BoundingBox;

use super::{smoothing, DensityGrid};

/// continuous density "heat" over the same grid as a [`DensityGrid`], with
/// its global range kept for normalization.
#[derive(Clone, Debug)]
pub struct SmoothedField {
    values: Array2<f64>,
    bbox: BoundingBox,
    min: f64,
    max: f64,
}

impl SmoothedField {
    /// applies the gaussian filter to a raster of point counts
    pub fn from_grid(grid: &DensityGrid, sigma: f64, truncate: f64) -> SmoothedField {
        let values = smoothing::gaussian_filter(&grid.to_f64(), sigma, truncate);
        SmoothedField::new(values, *grid.bbox())
    }

    /// wraps an already smoothed square grid covering `bbox`
    pub fn new(values: Array2<f64>, bbox: BoundingBox) -> SmoothedField {
        let (min, max) = values
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(*v), hi.max(*v))
            });
        SmoothedField {
            values,
            bbox,
            min,
            max,
        }
    }

    pub fn values(&self) -> &Array2<f64> {
        &self.values
    }

    pub fn bbox(&self) -> &BoundingBox {
        &self.bbox
    }

    pub fn resolution(&self) -> usize {
        self.values.nrows()
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    /// true when every cell holds the same value, or when the box is
    /// collapsed to a single location. in that case all mass sits in one
    /// cell and there is no relative density to compare.
    pub fn is_flat(&self) -> bool {
        self.bbox.is_point() || !(self.max > self.min)
    }

    /// rescales a field value into [0, 1] against the global range. a flat
    /// field normalizes everything to 0.
    pub fn normalize(&self, value: f64) -> f64 {
        if self.is_flat() {
            0.0
        } else {
            ((value - self.min) / (self.max - self.min)).clamp(0.0, 1.0)
        }
    }
}
