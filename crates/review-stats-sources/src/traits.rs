use std::sync::Arc;

use review_stats_models::Review;

use crate::SourceError;

/// Supplies the full review set on demand.
///
/// Implementations must hand out a stable snapshot per call without side
/// effects: the query engine calls `get_all_reviews` once per query and may be
/// shared between threads.
pub trait ReviewSource: Send + Sync {
    // Source metadata
    fn source_name(&self) -> &str;

    // Data retrieval
    fn get_all_reviews(&self) -> Result<Vec<Review>, SourceError>;
}

impl<T: ReviewSource + ?Sized> ReviewSource for Box<T> {
    fn source_name(&self) -> &str {
        (**self).source_name()
    }

    fn get_all_reviews(&self) -> Result<Vec<Review>, SourceError> {
        (**self).get_all_reviews()
    }
}

impl<T: ReviewSource + ?Sized> ReviewSource for Arc<T> {
    fn source_name(&self) -> &str {
        (**self).source_name()
    }

    fn get_all_reviews(&self) -> Result<Vec<Review>, SourceError> {
        (**self).get_all_reviews()
    }
}
