// Argument checks shared by every query. These only look at the arguments,
// so they run before the review set is fetched.

use review_stats_models::is_valid_grade;

use crate::error::{ReviewStatsError, Result, INVALID_AMOUNT, INVALID_MOVIE, INVALID_RATE, INVALID_REVIEWER};

pub fn is_positive_id(id: i32) -> bool {
    id > 0
}

pub fn is_valid_rate(rate: i32) -> bool {
    is_valid_grade(rate)
}

pub fn ensure_reviewer(reviewer: i32) -> Result<()> {
    ensure(is_positive_id(reviewer), INVALID_REVIEWER)
}

pub fn ensure_movie(movie: i32) -> Result<()> {
    ensure(is_positive_id(movie), INVALID_MOVIE)
}

pub fn ensure_rate(rate: i32) -> Result<()> {
    ensure(is_valid_rate(rate), INVALID_RATE)
}

pub fn ensure_amount(amount: i32) -> Result<()> {
    ensure(amount > 0, INVALID_AMOUNT)
}

/// True when `id` is within the number of reviews in the snapshot.
/// Listing queries bound ids by the review count rather than by the largest id.
pub fn within_review_count(id: i32, review_count: usize) -> bool {
    usize::try_from(id).map(|id| id <= review_count).unwrap_or(false)
}

fn ensure(condition: bool, message: &str) -> Result<()> {
    if condition {
        Ok(())
    } else {
        Err(ReviewStatsError::invalid_argument(message))
    }
}
