use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::grade::TOP_GRADE;

pub type ReviewerId = i32;
pub type MovieId = i32;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Review {
    pub reviewer: ReviewerId,
    pub movie: MovieId,
    pub grade: i32, // 1-5, enforced by the review source
    pub review_date: DateTime<Utc>,
}

impl Review {
    pub fn new(reviewer: ReviewerId, movie: MovieId, grade: i32, review_date: DateTime<Utc>) -> Self {
        Self {
            reviewer,
            movie,
            grade,
            review_date,
        }
    }

    pub fn is_top_rate(&self) -> bool {
        self.grade == TOP_GRADE
    }
}
