use itertools::Itertools;
use kdam::tqdm;
use rayon::prelude::*;

use crate::config::DensityConfig;
use crate::field::FieldSampler;
use crate::geometry::{haversine_km, midpoint};
use crate::loader::{RouteShape, ShapeCollection};

use super::{DensityClass, Edge, MergeCriteria, MergedFeature, RunState};

/// merged features of one or more shapes plus edge counts for reporting
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Classification {
    pub features: Vec<MergedFeature>,
    /// edges considered, including dropped ones
    pub n_edges: usize,
    /// edges dropped for exceeding the jump threshold
    pub n_jumps: usize,
}

impl Classification {
    fn append(mut self, other: Classification) -> Classification {
        self.features.extend(other.features);
        self.n_edges += other.n_edges;
        self.n_jumps += other.n_jumps;
        self
    }
}

/// walks shapes edge by edge, classifies each edge against the density field
/// and merges runs of equally classified edges.
pub struct SegmentClassifier<'a> {
    sampler: &'a FieldSampler,
    steps: u32,
    jump_threshold_km: f64,
    criteria: MergeCriteria,
}

impl<'a> SegmentClassifier<'a> {
    pub fn new(sampler: &'a FieldSampler, config: &DensityConfig) -> SegmentClassifier<'a> {
        SegmentClassifier {
            sampler,
            steps: config.density_classes,
            jump_threshold_km: config.jump_threshold_km,
            criteria: MergeCriteria {
                class_epsilon: config.class_epsilon,
                contiguity_threshold_km: config.contiguity_threshold_km,
            },
        }
    }

    /// density class at the midpoint of two points
    pub fn classify_edge(&self, src: geo::Point<f64>, dst: geo::Point<f64>) -> DensityClass {
        let mid = midpoint(src, dst);
        let sample = self.sampler.sample_normalized(mid.y(), mid.x());
        DensityClass::quantize(sample, self.steps)
    }

    /// classified edges of a shape with jump edges removed
    pub fn edges<'s>(&'s self, shape: &'s RouteShape) -> impl Iterator<Item = Edge<'s>> + 's {
        shape
            .edges()
            .filter(move |(src, dst)| haversine_km(*src, *dst) <= self.jump_threshold_km)
            .map(move |(src, dst)| Edge::new(&shape.shape_id, src, dst, self.classify_edge(src, dst)))
    }

    /// merges the edges of a single shape. runs never cross shapes, so every
    /// run is flushed at the end of the shape.
    pub fn classify_shape(&self, shape: &RouteShape) -> Classification {
        let n_edges = shape.len().saturating_sub(1);
        let mut n_kept = 0;
        let mut state = RunState::new();
        let mut features = vec![];
        for edge in self.edges(shape) {
            n_kept += 1;
            if let Some(feature) = state.push(&edge, &self.criteria) {
                features.push(feature);
            }
        }
        features.extend(state.finish());
        Classification {
            features,
            n_edges,
            n_jumps: n_edges - n_kept,
        }
    }

    /// classifies every shape of a collection. features are emitted in shape
    /// id order, then in point order within each shape, whether or not the
    /// work runs in parallel.
    pub fn classify_all(&self, shapes: &ShapeCollection, parallelize: bool) -> Classification {
        if parallelize {
            let shape_refs = shapes.shapes().collect_vec();
            shape_refs
                .par_iter()
                .map(|shape| self.classify_shape(shape))
                .collect::<Vec<_>>()
                .into_iter()
                .fold(Classification::default(), Classification::append)
        } else {
            tqdm!(
                shapes.shapes(),
                total = shapes.n_shapes(),
                desc = "classifying shapes"
            )
            .map(|shape| self.classify_shape(shape))
            .fold(Classification::default(), Classification::append)
        }
    }
}
