pub mod error;
pub mod service;
pub mod stats;
pub mod validation;

pub use error::{ReviewStatsError, Result};
pub use service::ReviewService;
pub use stats::GradeTally;
