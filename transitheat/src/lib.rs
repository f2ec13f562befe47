pub mod app;
pub mod catalog;
pub mod frequency;
pub mod pipeline;
