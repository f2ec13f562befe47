use std::path::{Path, PathBuf};

use transitheat_density::output::DENSITY_FILENAME;

/// where raw GTFS feeds are read from and where per-city artifacts go.
/// `<source>/<city>/` holds a city's GTFS text files and `<output>/<city>/`
/// receives its frequency report and density map.
#[derive(Clone, Debug, PartialEq)]
pub struct DataLayout {
    pub source_directory: PathBuf,
    pub output_directory: PathBuf,
}

impl DataLayout {
    pub fn new<P: AsRef<Path>, Q: AsRef<Path>>(source_directory: P, output_directory: Q) -> Self {
        Self {
            source_directory: source_directory.as_ref().to_path_buf(),
            output_directory: output_directory.as_ref().to_path_buf(),
        }
    }

    pub fn city_source_directory(&self, city: &str) -> PathBuf {
        self.source_directory.join(city)
    }

    pub fn city_output_directory(&self, city: &str) -> PathBuf {
        self.output_directory.join(city)
    }

    pub fn shapes_file(&self, city: &str) -> PathBuf {
        self.city_source_directory(city).join("shapes.txt")
    }

    pub fn density_file(&self, city: &str) -> PathBuf {
        self.city_output_directory(city).join(DENSITY_FILENAME)
    }
}
