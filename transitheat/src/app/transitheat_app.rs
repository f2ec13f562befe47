use super::TransitHeatOperation;
use crate::pipeline::{DataLayout, PipelineError};
use clap::Parser;

/// command line tool building transit density maps and stop frequency
/// reports from per-city GTFS feeds
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct TransitHeatApp {
    #[command(subcommand)]
    pub op: TransitHeatOperation,
    /// directory containing one GTFS directory per city
    #[arg(long, default_value_t = String::from("cities"))]
    pub source_directory: String,
    /// directory receiving per-city outputs and the city manifest
    #[arg(long, default_value_t = String::from("docs/data"))]
    pub output_directory: String,
}

impl TransitHeatApp {
    pub fn layout(&self) -> DataLayout {
        DataLayout::new(&self.source_directory, &self.output_directory)
    }

    pub fn run(&self) -> Result<(), PipelineError> {
        self.op.run(&self.layout())
    }
}
