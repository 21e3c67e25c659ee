use chrono::{DateTime, NaiveDate, Utc};
use csv::Reader;
use review_stats_models::Review;
use std::collections::HashMap;
use std::io::Read;
use tracing::{debug, info};

use crate::validate::validate_review;
use crate::SourceError;

const REQUIRED_COLUMNS: [&str; 4] = ["Reviewer", "Movie", "Grade", "Date"];

/// Parse a review CSV export with `Reviewer,Movie,Grade,Date` columns (any order, extra columns ignored)
pub fn parse_reviews_csv<R: Read>(input: R) -> Result<Vec<Review>, SourceError> {
    let mut reader = Reader::from_reader(input);
    let mut reviews = Vec::new();

    let headers = reader.headers()?.clone();
    let header_map: HashMap<String, usize> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| (h.trim().to_string(), i))
        .collect();

    let available_columns: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
    debug!("Available CSV columns: {:?}", available_columns);

    for col in &REQUIRED_COLUMNS {
        if !header_map.contains_key(*col) {
            return Err(SourceError::MissingColumn {
                column: col.to_string(),
                available: available_columns,
            });
        }
    }

    let mut row_count = 0;
    for result in reader.records() {
        let record = result?;
        row_count += 1;

        let field = |name: &str| record.get(header_map[name]).unwrap_or("").trim();

        let reviewer = parse_int(field("Reviewer"), "Reviewer", row_count)?;
        let movie = parse_int(field("Movie"), "Movie", row_count)?;
        let grade = parse_int(field("Grade"), "Grade", row_count)?;
        let review_date = parse_review_date(field("Date"))
            .ok_or_else(|| SourceError::invalid_record(row_count, format!("unparseable date '{}'", field("Date"))))?;

        let review = Review::new(reviewer, movie, grade, review_date);
        validate_review(&review, row_count)?;

        if row_count <= 3 {
            debug!(
                row = row_count,
                reviewer = review.reviewer,
                movie = review.movie,
                grade = review.grade,
                "Parsed review CSV row"
            );
        }

        reviews.push(review);
    }

    info!("Parsed {} review rows from CSV", reviews.len());
    Ok(reviews)
}

/// Parse a JSON array of reviews
pub fn parse_reviews_json<R: Read>(input: R) -> Result<Vec<Review>, SourceError> {
    let reviews: Vec<Review> = serde_json::from_reader(input)?;
    for (index, review) in reviews.iter().enumerate() {
        validate_review(review, index + 1)?;
    }
    info!("Parsed {} reviews from JSON", reviews.len());
    Ok(reviews)
}

fn parse_int(value: &str, column: &str, row: usize) -> Result<i32, SourceError> {
    value
        .parse::<i32>()
        .map_err(|e| SourceError::invalid_record(row, format!("{} '{}' is not an integer: {}", column, value, e)))
}

/// Accepts RFC 3339 timestamps or bare `YYYY-MM-DD` dates (stored at midnight UTC)
pub fn parse_review_date(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Some(ts.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()?
        .and_hms_opt(0, 0, 0)
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_reviews_csv() {
        let data = "Reviewer,Movie,Grade,Date\n1,10,4,2021-05-01\n2,10,5,2021-05-02T12:30:00Z\n";
        let reviews = parse_reviews_csv(data.as_bytes()).unwrap();

        assert_eq!(reviews.len(), 2);
        assert_eq!(reviews[0].reviewer, 1);
        assert_eq!(reviews[0].movie, 10);
        assert_eq!(reviews[0].grade, 4);
        assert_eq!(reviews[0].review_date, Utc.with_ymd_and_hms(2021, 5, 1, 0, 0, 0).unwrap());
        assert_eq!(reviews[1].review_date, Utc.with_ymd_and_hms(2021, 5, 2, 12, 30, 0).unwrap());
    }

    #[test]
    fn test_parse_reviews_csv_column_order_and_extras() {
        let data = "Date,Comment,Grade,Movie,Reviewer\n2020-01-01,great,5,3,7\n";
        let reviews = parse_reviews_csv(data.as_bytes()).unwrap();
        assert_eq!(reviews, vec![Review::new(7, 3, 5, Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap())]);
    }

    #[test]
    fn test_parse_reviews_csv_missing_column() {
        let data = "Reviewer,Movie,Grade\n1,2,3\n";
        let err = parse_reviews_csv(data.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("Missing required column: Date"));
    }

    #[test]
    fn test_parse_reviews_csv_rejects_bad_grade() {
        let data = "Reviewer,Movie,Grade,Date\n1,2,3,2020-01-01\n1,3,9,2020-01-01\n";
        let err = parse_reviews_csv(data.as_bytes()).unwrap_err();
        assert!(matches!(err, SourceError::InvalidRecord { record: 2, .. }));
    }

    #[test]
    fn test_parse_reviews_csv_rejects_bad_date() {
        let data = "Reviewer,Movie,Grade,Date\n1,2,3,yesterday\n";
        let err = parse_reviews_csv(data.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("unparseable date"));
    }

    #[test]
    fn test_parse_reviews_json() {
        let data = r#"[
            {"reviewer": 1, "movie": 2, "grade": 5, "review_date": "2022-02-02T00:00:00Z"},
            {"reviewer": 3, "movie": 2, "grade": 1, "review_date": "2022-02-03T00:00:00Z"}
        ]"#;
        let reviews = parse_reviews_json(data.as_bytes()).unwrap();
        assert_eq!(reviews.len(), 2);
        assert_eq!(reviews[1].grade, 1);
    }

    #[test]
    fn test_parse_reviews_json_rejects_bad_grade() {
        let data = r#"[{"reviewer": 1, "movie": 2, "grade": 0, "review_date": "2022-02-02T00:00:00Z"}]"#;
        assert!(matches!(
            parse_reviews_json(data.as_bytes()).unwrap_err(),
            SourceError::InvalidRecord { record: 1, .. }
        ));
    }

    #[test]
    fn test_parse_review_date_formats() {
        assert!(parse_review_date("2021-12-31").is_some());
        assert!(parse_review_date("2021-12-31T23:59:59+02:00").is_some());
        assert!(parse_review_date("31/12/2021").is_none());
    }
}
