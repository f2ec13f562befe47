//! raster, smoothing and sampling of the route point density field.
mod density_grid;
mod field_sampler;
mod smoothed_field;
pub mod smoothing;

pub use density_grid::DensityGrid;
pub use field_sampler::FieldSampler;
pub use smoothed_field::SmoothedField;
