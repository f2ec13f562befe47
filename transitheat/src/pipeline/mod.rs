mod data_layout;
mod pipeline_error;
mod pipeline_ops;
mod pipeline_report;

pub use data_layout::DataLayout;
pub use pipeline_error::PipelineError;
pub use pipeline_ops::{run_city, run_pipeline, PipelineOptions};
pub use pipeline_report::{PipelineReport, PipelineStage, StageOutcome};
