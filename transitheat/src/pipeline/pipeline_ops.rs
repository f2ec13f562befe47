use rayon::prelude::*;
use transitheat_density::{output::create_dirs, DensityConfig, DensityEngine};

use crate::catalog;
use crate::frequency::FrequencyAnalysis;

use super::{DataLayout, PipelineError, PipelineReport, PipelineStage};

/// settings shared by every city of a pipeline run
#[derive(Clone, Debug, Default)]
pub struct PipelineOptions {
    pub density: DensityConfig,
    pub frequency: FrequencyAnalysis,
}

/// runs the frequency analysis and the density map for one city. a failing
/// stage is recorded and does not stop the next one. the city must exist in
/// the source directory.
pub fn run_city(
    layout: &DataLayout,
    city: &str,
    options: &PipelineOptions,
) -> Result<PipelineReport, PipelineError> {
    let source = layout.city_source_directory(city);
    if !source.is_dir() {
        return Err(PipelineError::CityNotFound(city.to_string()));
    }
    log::info!("starting pipeline for {city}");
    let target = layout.city_output_directory(city);
    create_dirs(&target)?;

    let mut report = PipelineReport::new(city);
    let frequency = options.frequency.run_and_write(city, &source, &target);
    report.record(PipelineStage::Frequency, frequency);

    let density = DensityEngine::new(options.density.clone())
        .and_then(|engine| engine.run_file(&layout.shapes_file(city), &layout.density_file(city)));
    report.record(PipelineStage::Density, density);

    log::info!("completed pipeline for {city}");
    Ok(report)
}

/// processes cities concurrently on a pool of `parallelism` threads, then
/// refreshes the manifest once every city has finished. the manifest is
/// refreshed even when some cities fail, those failures are reported after.
pub fn run_pipeline(
    layout: &DataLayout,
    cities: &[String],
    options: &PipelineOptions,
    parallelism: usize,
) -> Result<Vec<PipelineReport>, PipelineError> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(parallelism.max(1))
        .build()
        .map_err(|e| PipelineError::ThreadPoolError(e.to_string()))?;
    let results: Vec<Result<PipelineReport, PipelineError>> = pool.install(|| {
        cities
            .par_iter()
            .map(|city| run_city(layout, city, options))
            .collect()
    });
    create_dirs(&layout.output_directory)?;
    catalog::update_manifest(&layout.output_directory)?;

    let mut reports = vec![];
    let mut failed = vec![];
    for (city, result) in cities.iter().zip(results) {
        match result {
            Ok(report) => reports.push(report),
            Err(e) => {
                log::error!("{city}: {e}");
                failed.push(city.clone());
            }
        }
    }
    if !failed.is_empty() {
        return Err(PipelineError::CityFailures(failed));
    }
    Ok(reports)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::MANIFEST_FILENAME;
    use std::path::{Path, PathBuf};

    fn fresh_root(name: &str) -> PathBuf {
        let root = std::env::temp_dir().join("transitheat-pipeline-tests").join(name);
        if root.exists() {
            std::fs::remove_dir_all(&root).expect("test invariant failed");
        }
        root
    }

    fn write_city(source: &Path, city: &str, with_shapes: bool) {
        let dir = source.join(city);
        std::fs::create_dir_all(&dir).expect("test invariant failed");
        std::fs::write(
            dir.join("stop_times.txt"),
            "trip_id,arrival_time,departure_time,stop_id,stop_sequence\n\
             t1,16:00:00,16:00:00,s1,1\n\
             t2,16:20:00,16:20:00,s1,1\n",
        )
        .expect("test invariant failed");
        std::fs::write(
            dir.join("stops.txt"),
            "stop_id,stop_name,stop_lat,stop_lon\ns1,Central,39.75,-104.99\n",
        )
        .expect("test invariant failed");
        if with_shapes {
            let mut shapes = String::from("shape_id,shape_pt_lat,shape_pt_lon,shape_pt_sequence\n");
            for i in 0..30 {
                shapes.push_str(&format!("r1,{},{},{}\n", 39.7 + i as f64 * 0.0005, -105.0 + i as f64 * 0.0005, i));
            }
            std::fs::write(dir.join("shapes.txt"), shapes).expect("test invariant failed");
        }
    }

    fn small_options() -> PipelineOptions {
        PipelineOptions {
            density: DensityConfig {
                grid_resolution: 50,
                smoothing_sigma: 2.0,
                ..Default::default()
            },
            frequency: FrequencyAnalysis::default(),
        }
    }

    #[test]
    fn test_unknown_city() {
        let root = fresh_root("unknown");
        let layout = DataLayout::new(root.join("cities"), root.join("out"));
        let result = run_city(&layout, "atlantis", &small_options());
        assert!(matches!(result, Err(PipelineError::CityNotFound(_))));
        assert!(!layout.city_output_directory("atlantis").exists());
    }

    #[test]
    fn test_pipeline_writes_artifacts_and_manifest() {
        let root = fresh_root("full");
        let layout = DataLayout::new(root.join("cities"), root.join("out"));
        write_city(&layout.source_directory, "alpha", true);
        write_city(&layout.source_directory, "beta", true);
        let cities = vec![String::from("beta"), String::from("alpha")];
        let reports = run_pipeline(&layout, &cities, &small_options(), 2).expect("test failed");
        assert_eq!(reports.len(), 2);
        assert!(reports.iter().all(|r| r.is_success()));
        for city in ["alpha", "beta"] {
            assert!(layout.density_file(city).is_file());
            assert!(layout.city_output_directory(city).join("frequency_16_18.json").is_file());
        }
        let manifest = std::fs::read_to_string(layout.output_directory.join(MANIFEST_FILENAME))
            .expect("test failed");
        let listed: Vec<String> = serde_json::from_str(&manifest).expect("test failed");
        assert_eq!(listed, vec!["alpha", "beta"]);
    }

    #[test]
    fn test_manifest_refreshed_when_a_city_is_unknown() {
        let root = fresh_root("mixed");
        let layout = DataLayout::new(root.join("cities"), root.join("out"));
        write_city(&layout.source_directory, "alpha", true);
        let cities = vec![String::from("alpha"), String::from("atlantis")];
        let result = run_pipeline(&layout, &cities, &small_options(), 2);
        match result {
            Err(PipelineError::CityFailures(failed)) => assert_eq!(failed, vec!["atlantis"]),
            other => panic!("expected city failures, found {other:?}"),
        }
        assert!(layout.density_file("alpha").is_file());
        let manifest = std::fs::read_to_string(layout.output_directory.join(MANIFEST_FILENAME))
            .expect("test failed");
        let listed: Vec<String> = serde_json::from_str(&manifest).expect("test failed");
        assert_eq!(listed, vec!["alpha"]);
    }

    #[test]
    fn test_missing_shapes_fails_density_stage_only() {
        let root = fresh_root("no-shapes");
        let layout = DataLayout::new(root.join("cities"), root.join("out"));
        write_city(&layout.source_directory, "gamma", false);
        let report = run_city(&layout, "gamma", &small_options()).expect("test failed");
        assert_eq!(report.n_failed(), 1);
        let density = report
            .stages
            .iter()
            .find(|s| s.stage == PipelineStage::Density)
            .expect("test failed");
        assert!(density.error.is_some());
        assert!(!layout.density_file("gamma").exists());
        assert!(layout.city_output_directory("gamma").join("frequency_16_18.json").is_file());
    }
}
