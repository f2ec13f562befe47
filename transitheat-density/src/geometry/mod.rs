mod bounding_box;
mod distance;

pub use bounding_box::BoundingBox;
pub use distance::{haversine_km, midpoint};
