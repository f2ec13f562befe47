//! Route density field and adaptive polyline simplification.
//!
//! Raw GTFS shape points are rasterized into a grid over their bounding box,
//! smoothed into a continuous density field, and then every shape is walked
//! edge by edge, classified against the field, and merged into as few
//! polylines as possible. See [`DensityEngine`] for the entry point.
pub mod classify;
pub mod config;
pub mod engine;
pub mod error;
pub mod field;
pub mod geometry;
pub mod loader;
pub mod output;

pub use config::DensityConfig;
pub use engine::{DensityEngine, DensitySummary};
pub use error::DensityError;
