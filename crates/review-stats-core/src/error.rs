use review_stats_sources::SourceError;
use thiserror::Error;

pub const MISSING_REPOSITORY: &str = "Missing repository";
pub const REVIEWER_NOT_FOUND: &str = "Reviewer does not exist";
pub const MOVIE_NOT_FOUND: &str = "Movie does not exist";
pub const INVALID_RATE: &str = "Rate must be between 1 and 5";
pub const INVALID_REVIEWER: &str = "Reviewer must be a positive number";
pub const INVALID_MOVIE: &str = "Movie must be a positive number";
pub const INVALID_AMOUNT: &str = "Amount must be a positive number";
pub const AMOUNT_EXCEEDS_REVIEWS: &str = "Amount exceeds the number of available reviews";
pub const REVIEWER_EXCEEDS_REVIEWS: &str = "Reviewer exceeds the number of available reviews";
pub const MOVIE_EXCEEDS_REVIEWS: &str = "Movie exceeds the number of available reviews";

/// Failures reported by the query engine.
///
/// `InvalidArgument` means the caller passed something outside the domain of
/// the query; `NotFound` means the arguments were fine but the data has nothing
/// to answer with.
#[derive(Debug, Error)]
pub enum ReviewStatsError {
    #[error("{0}")]
    InvalidArgument(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Review source failed: {0}")]
    Source(#[from] SourceError),
}

impl ReviewStatsError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

pub type Result<T> = std::result::Result<T, ReviewStatsError>;
