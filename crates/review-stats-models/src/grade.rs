// Grade domain shared by sources (which enforce it) and the query engine (which assumes it)

/// Lowest grade a reviewer can give
pub const MIN_GRADE: i32 = 1;

/// Highest grade a reviewer can give
pub const MAX_GRADE: i32 = 5;

/// A "top rate" is a review graded exactly this value
pub const TOP_GRADE: i32 = MAX_GRADE;

pub fn is_valid_grade(grade: i32) -> bool {
    (MIN_GRADE..=MAX_GRADE).contains(&grade)
}
