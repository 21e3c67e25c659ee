// Record checks every file-backed source applies before handing reviews out.
// The query engine assumes these hold and never re-checks them.

use review_stats_models::{is_valid_grade, Review, MAX_GRADE, MIN_GRADE};

use crate::SourceError;

pub fn validate_review(review: &Review, record: usize) -> Result<(), SourceError> {
    if review.reviewer <= 0 {
        return Err(SourceError::invalid_record(
            record,
            format!("reviewer id must be positive, got {}", review.reviewer),
        ));
    }
    if review.movie <= 0 {
        return Err(SourceError::invalid_record(
            record,
            format!("movie id must be positive, got {}", review.movie),
        ));
    }
    if !is_valid_grade(review.grade) {
        return Err(SourceError::invalid_record(
            record,
            format!("grade must be between {} and {}, got {}", MIN_GRADE, MAX_GRADE, review.grade),
        ));
    }
    Ok(())
}
