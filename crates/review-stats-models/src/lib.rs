pub mod grade;
pub mod review;

pub use grade::{is_valid_grade, MAX_GRADE, MIN_GRADE, TOP_GRADE};
pub use review::{MovieId, Review, ReviewerId};
