pub mod api;
pub mod dataset;

pub use api::{router, serve};
pub use dataset::Dataset;
