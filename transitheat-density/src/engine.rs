use std::fmt::Display;
use std::path::Path;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::classify::{MergedFeature, SegmentClassifier};
use crate::config::DensityConfig;
use crate::error::DensityError;
use crate::field::{DensityGrid, FieldSampler, SmoothedField};
use crate::loader::ShapeCollection;
use crate::output;

/// counts describing one density run
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DensitySummary {
    pub shapes: usize,
    pub points: usize,
    pub edges: usize,
    pub jump_edges: usize,
    pub features: usize,
    pub field_min: f64,
    pub field_max: f64,
}

impl Display for DensitySummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} shapes, {} points, {} edges ({} dropped as jumps) merged into {} features, field range [{}, {}]",
            self.shapes,
            self.points,
            self.edges,
            self.jump_edges,
            self.features,
            self.field_min,
            self.field_max
        )
    }
}

/// builds the density field of a city's route geometry and reduces its
/// shapes to density classified polylines.
#[derive(Clone, Debug)]
pub struct DensityEngine {
    config: DensityConfig,
}

impl DensityEngine {
    pub fn new(config: DensityConfig) -> Result<DensityEngine, DensityError> {
        config.validate()?;
        Ok(DensityEngine { config })
    }

    pub fn config(&self) -> &DensityConfig {
        &self.config
    }

    /// rasterizes every shape point
    pub fn rasterize(&self, shapes: &ShapeCollection) -> DensityGrid {
        let points = shapes.points().copied().collect_vec();
        DensityGrid::rasterize(
            &points,
            *shapes.bbox(),
            self.config.grid_resolution,
            self.config.parallelize,
        )
    }

    /// rasterize, smooth, and wrap the result in an interpolant
    pub fn build_sampler(&self, shapes: &ShapeCollection) -> FieldSampler {
        let grid = self.rasterize(shapes);
        log::debug!(
            "rasterized {} points into a {}x{} grid",
            grid.total_mass(),
            grid.resolution(),
            grid.resolution()
        );
        let field = SmoothedField::from_grid(
            &grid,
            self.config.smoothing_sigma,
            self.config.kernel_truncate,
        );
        if field.is_flat() {
            log::warn!("density field is flat, every edge will be classified as 0");
        }
        FieldSampler::new(field)
    }

    /// computes the merged, density classified features of a shape collection
    pub fn run(&self, shapes: &ShapeCollection) -> (Vec<MergedFeature>, DensitySummary) {
        let sampler = self.build_sampler(shapes);
        let classifier = SegmentClassifier::new(&sampler, &self.config);
        let classification = classifier.classify_all(shapes, self.config.parallelize);
        let summary = DensitySummary {
            shapes: shapes.n_shapes(),
            points: shapes.n_points(),
            edges: classification.n_edges,
            jump_edges: classification.n_jumps,
            features: classification.features.len(),
            field_min: sampler.field().min(),
            field_max: sampler.field().max(),
        };
        (classification.features, summary)
    }

    /// reads a `shapes.txt` file and writes the density feature collection.
    /// nothing is written when reading fails.
    pub fn run_file(&self, shapes_file: &Path, output_file: &Path) -> Result<DensitySummary, DensityError> {
        log::info!("loading shapes from {}", shapes_file.display());
        let shapes = ShapeCollection::try_from_csv(shapes_file)?;
        let (features, summary) = self.run(&shapes);
        log::info!("{summary}");
        output::write_feature_collection(&features, output_file)?;
        Ok(summary)
    }
}
