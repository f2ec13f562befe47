mod operation;
mod transitheat_app;

pub use operation::TransitHeatOperation;
pub use transitheat_app::TransitHeatApp;
