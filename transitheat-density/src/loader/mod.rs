mod route_shape;
mod shape_collection;
mod shape_row;

pub use route_shape::RouteShape;
pub use shape_collection::ShapeCollection;
pub use shape_row::ShapeRow;
