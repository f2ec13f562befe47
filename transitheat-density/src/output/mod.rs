mod fs;
mod geojson_writer;

pub use fs::{create_dirs, write_atomic};
pub use geojson_writer::{feature_collection, write_feature_collection, DENSITY_FILENAME};
