// File-backed review sources. Files are re-read on every call so that each
// query sees the export as it currently is on disk.

mod parser;

pub use parser::{parse_review_date, parse_reviews_csv, parse_reviews_json};

use review_stats_models::Review;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::{ReviewSource, SourceError};

fn open(path: &Path) -> Result<BufReader<File>, SourceError> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|e| SourceError::io(path, e))
}

#[derive(Debug, Clone)]
pub struct CsvReviewSource {
    path: PathBuf,
}

impl CsvReviewSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ReviewSource for CsvReviewSource {
    fn source_name(&self) -> &str {
        "csv"
    }

    fn get_all_reviews(&self) -> Result<Vec<Review>, SourceError> {
        debug!(path = %self.path.display(), "Reading reviews CSV");
        parse_reviews_csv(open(&self.path)?)
    }
}

#[derive(Debug, Clone)]
pub struct JsonReviewSource {
    path: PathBuf,
}

impl JsonReviewSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ReviewSource for JsonReviewSource {
    fn source_name(&self) -> &str {
        "json"
    }

    fn get_all_reviews(&self) -> Result<Vec<Review>, SourceError> {
        debug!(path = %self.path.display(), "Reading reviews JSON");
        parse_reviews_json(open(&self.path)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_csv_source_reads_file_each_call() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "Reviewer,Movie,Grade,Date").unwrap();
        writeln!(file, "1,1,3,2020-01-01").unwrap();
        file.flush().unwrap();

        let source = CsvReviewSource::new(file.path());
        assert_eq!(source.get_all_reviews().unwrap().len(), 1);

        writeln!(file, "2,1,4,2020-01-02").unwrap();
        file.flush().unwrap();
        assert_eq!(source.get_all_reviews().unwrap().len(), 2);
    }

    #[test]
    fn test_json_source() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"reviewer": 4, "movie": 9, "grade": 2, "review_date": "2019-07-07T00:00:00Z"}}]"#
        )
        .unwrap();
        file.flush().unwrap();

        let reviews = JsonReviewSource::new(file.path()).get_all_reviews().unwrap();
        assert_eq!(reviews.len(), 1);
        assert_eq!(reviews[0].reviewer, 4);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let source = CsvReviewSource::new("/nonexistent/reviews.csv");
        let err = source.get_all_reviews().unwrap_err();
        assert!(matches!(err, SourceError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/reviews.csv"));
    }
}
