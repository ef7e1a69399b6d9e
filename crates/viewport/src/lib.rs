pub mod metrics;
pub mod tracker;

pub use metrics::*;
pub use tracker::*;
