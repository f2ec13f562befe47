use geo::Point;
use ndarray::Array2;
use rayon::prelude::*;

use crate::geometry::BoundingBox;

/// square raster of point counts over a bounding box. rows bin latitude,
/// columns bin longitude.
#[derive(Clone, Debug)]
pub struct DensityGrid {
    counts: Array2<u32>,
    bbox: BoundingBox,
}

impl DensityGrid {
    /// bins every point into a `resolution` x `resolution` grid. points are
    /// not deduplicated, so corridors shared by many shapes collect
    /// proportionally more mass.
    ///
    /// # Arguments
    ///
    /// * `points` - all shape points of a city
    /// * `bbox` - extent the grid covers
    /// * `resolution` - cells per axis, at least 2
    /// * `parallelize` - accumulate partial grids on the rayon pool and sum them
    pub fn rasterize(
        points: &[Point<f64>],
        bbox: BoundingBox,
        resolution: usize,
        parallelize: bool,
    ) -> DensityGrid {
        let cell = |p: &Point<f64>| cell_index(&bbox, resolution, p);
        let counts = if parallelize {
            points
                .par_iter()
                .with_min_len(16_384)
                .fold(
                    || Array2::<u32>::zeros((resolution, resolution)),
                    |mut acc, p| {
                        acc[cell(p)] += 1;
                        acc
                    },
                )
                .reduce(
                    || Array2::<u32>::zeros((resolution, resolution)),
                    |a, b| a + b,
                )
        } else {
            let mut acc = Array2::<u32>::zeros((resolution, resolution));
            for p in points {
                acc[cell(p)] += 1;
            }
            acc
        };
        DensityGrid { counts, bbox }
    }

    /// the (row, column) cell a point falls into
    pub fn cell_of(&self, point: &Point<f64>) -> (usize, usize) {
        cell_index(&self.bbox, self.resolution(), point)
    }

    pub fn counts(&self) -> &Array2<u32> {
        &self.counts
    }

    pub fn bbox(&self) -> &BoundingBox {
        &self.bbox
    }

    pub fn resolution(&self) -> usize {
        self.counts.nrows()
    }

    /// sum of all cell counts
    pub fn total_mass(&self) -> u64 {
        self.counts.iter().map(|c| *c as u64).sum()
    }

    /// counts as real values, the input to smoothing
    pub fn to_f64(&self) -> Array2<f64> {
        self.counts.mapv(|c| c as f64)
    }
}

fn cell_index(bbox: &BoundingBox, resolution: usize, point: &Point<f64>) -> (usize, usize) {
    let row = bin(bbox.normalize_lat(point.y()), resolution);
    let col = bin(bbox.normalize_lon(point.x()), resolution);
    (row, col)
}

/// floor(position * (resolution - 1)), kept inside the grid
fn bin(position: f64, resolution: usize) -> usize {
    let max_index = (resolution - 1) as f64;
    (position * max_index).floor().clamp(0.0, max_index) as usize
}
