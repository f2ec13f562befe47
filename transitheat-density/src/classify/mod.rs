//! edge classification against the density field and greedy merging of
//! classified edges into polylines.
mod density_class;
mod edge;
mod merged_feature;
mod run_state;
mod segment_classifier;

pub use density_class::DensityClass;
pub use edge::Edge;
pub use merged_feature::MergedFeature;
pub use run_state::{MergeCriteria, Run, RunState, RunTransition};
pub use segment_classifier::{Classification, SegmentClassifier};
