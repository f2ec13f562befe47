use std::path::Path;

use chrono::NaiveTime;
use clap::{value_parser, Subcommand};
use transitheat_density::{output::create_dirs, DensityConfig, DensityEngine};

use crate::catalog;
use crate::frequency::FrequencyAnalysis;
use crate::pipeline::{self, DataLayout, PipelineError, PipelineOptions};

#[derive(Debug, Clone, Subcommand)]
pub enum TransitHeatOperation {
    /// build the smoothed route density map for one city
    Density {
        #[arg(long)]
        city: String,
        /// TOML or JSON file overriding the density defaults
        #[arg(long)]
        configuration_file: Option<String>,
    },
    /// rank the stops of one city by average arrival gap
    Frequency {
        #[arg(long)]
        city: String,
        #[arg(long, value_parser = value_parser!(NaiveTime), default_value = "16:00:00")]
        start: NaiveTime,
        #[arg(long, value_parser = value_parser!(NaiveTime), default_value = "18:00:00")]
        end: NaiveTime,
    },
    /// run every stage for a list of cities, then refresh the manifest.
    /// without --city, all cities in the source directory are processed.
    Pipeline {
        #[arg(long)]
        city: Vec<String>,
        #[arg(long, default_value_t = 1)]
        parallelism: usize,
        #[arg(long)]
        configuration_file: Option<String>,
        #[arg(long, value_parser = value_parser!(NaiveTime), default_value = "16:00:00")]
        start: NaiveTime,
        #[arg(long, value_parser = value_parser!(NaiveTime), default_value = "18:00:00")]
        end: NaiveTime,
    },
    /// rewrite the city manifest from the output directory
    Manifest,
    /// list the cities available in the source directory
    Cities,
}

impl TransitHeatOperation {
    pub fn run(&self, layout: &DataLayout) -> Result<(), PipelineError> {
        match self {
            TransitHeatOperation::Density {
                city,
                configuration_file,
            } => {
                let config = read_density_config(configuration_file.as_deref())?;
                if !layout.city_source_directory(city).is_dir() {
                    return Err(PipelineError::CityNotFound(city.clone()));
                }
                create_dirs(layout.city_output_directory(city))?;
                let engine = DensityEngine::new(config)?;
                engine.run_file(&layout.shapes_file(city), &layout.density_file(city))?;
                Ok(())
            }
            TransitHeatOperation::Frequency { city, start, end } => {
                let analysis = FrequencyAnalysis::from_times(*start, *end)?;
                let source = layout.city_source_directory(city);
                if !source.is_dir() {
                    return Err(PipelineError::CityNotFound(city.clone()));
                }
                let target = layout.city_output_directory(city);
                create_dirs(&target)?;
                analysis.run_and_write(city, &source, &target)?;
                Ok(())
            }
            TransitHeatOperation::Pipeline {
                city,
                parallelism,
                configuration_file,
                start,
                end,
            } => {
                let options = PipelineOptions {
                    density: read_density_config(configuration_file.as_deref())?,
                    frequency: FrequencyAnalysis::from_times(*start, *end)?,
                };
                let cities = if city.is_empty() {
                    catalog::list_source_cities(&layout.source_directory)?
                } else {
                    city.clone()
                };
                if cities.is_empty() {
                    log::warn!("no cities to process");
                    return Ok(());
                }
                let reports = pipeline::run_pipeline(layout, &cities, &options, *parallelism)?;
                let total: usize = reports.iter().map(|r| r.stages.len()).sum();
                let failed: usize = reports.iter().map(|r| r.n_failed()).sum();
                if failed > 0 {
                    return Err(PipelineError::StageFailures { failed, total });
                }
                log::info!("processed {} cities", reports.len());
                Ok(())
            }
            TransitHeatOperation::Manifest => {
                catalog::update_manifest(&layout.output_directory)?;
                Ok(())
            }
            TransitHeatOperation::Cities => {
                let cities = catalog::list_source_cities(&layout.source_directory)?;
                for city in cities.iter() {
                    println!("{city}");
                }
                Ok(())
            }
        }
    }
}

fn read_density_config(configuration_file: Option<&str>) -> Result<DensityConfig, PipelineError> {
    match configuration_file {
        None => Ok(DensityConfig::default()),
        Some(f) => {
            let config = DensityConfig::try_from(Path::new(f))?;
            Ok(config)
        }
    }
}
