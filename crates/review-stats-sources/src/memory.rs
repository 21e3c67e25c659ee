use review_stats_models::Review;
use tracing::debug;

use crate::{ReviewSource, SourceError};

/// Review source backed by a fixed in-memory set. Each call hands out a fresh copy.
#[derive(Debug, Clone, Default)]
pub struct InMemoryReviewSource {
    reviews: Vec<Review>,
}

impl InMemoryReviewSource {
    pub fn new(reviews: Vec<Review>) -> Self {
        Self { reviews }
    }

    pub fn len(&self) -> usize {
        self.reviews.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reviews.is_empty()
    }
}

impl From<Vec<Review>> for InMemoryReviewSource {
    fn from(reviews: Vec<Review>) -> Self {
        Self::new(reviews)
    }
}

impl ReviewSource for InMemoryReviewSource {
    fn source_name(&self) -> &str {
        "memory"
    }

    fn get_all_reviews(&self) -> Result<Vec<Review>, SourceError> {
        debug!(count = self.reviews.len(), "Serving in-memory reviews");
        Ok(self.reviews.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_in_memory_returns_snapshot() {
        let source = InMemoryReviewSource::new(vec![
            Review::new(1, 1, 3, Utc::now()),
            Review::new(2, 1, 4, Utc::now()),
        ]);

        let first = source.get_all_reviews().unwrap();
        let second = source.get_all_reviews().unwrap();
        assert_eq!(first.len(), 2);
        assert_eq!(first, second);
        assert_eq!(source.source_name(), "memory");
    }

    #[test]
    fn test_in_memory_empty() {
        let source = InMemoryReviewSource::default();
        assert!(source.is_empty());
        assert!(source.get_all_reviews().unwrap().is_empty());
    }
}
