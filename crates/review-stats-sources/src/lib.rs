pub mod traits;
pub mod error;
pub mod factory;
pub mod file;
pub mod memory;
mod validate;

pub use traits::ReviewSource;
pub use error::SourceError;
pub use factory::{create_source, create_source_from_config};
pub use file::{CsvReviewSource, JsonReviewSource};
pub use memory::InMemoryReviewSource;
