/// Builds review sources from configuration, so the CLI and tests share one
/// place that maps a `[source]` section onto a concrete implementation.

use review_stats_config::{Config, SourceConfig, SourceKind};
use tracing::info;

use crate::file::{CsvReviewSource, JsonReviewSource};
use crate::{ReviewSource, SourceError};

pub fn create_source(config: &SourceConfig) -> Result<Box<dyn ReviewSource>, SourceError> {
    let kind = config
        .resolved_kind()
        .ok_or_else(|| SourceError::UnknownKind(config.path.clone()))?;

    info!(kind = kind.as_str(), path = %config.path.display(), "Creating review source");

    let source: Box<dyn ReviewSource> = match kind {
        SourceKind::Csv => Box::new(CsvReviewSource::new(&config.path)),
        SourceKind::Json => Box::new(JsonReviewSource::new(&config.path)),
    };
    Ok(source)
}

/// Returns `None` when the config has no `[source]` section
pub fn create_source_from_config(config: &Config) -> Result<Option<Box<dyn ReviewSource>>, SourceError> {
    config.source.as_ref().map(create_source).transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_create_source_by_extension() {
        let csv = create_source(&SourceConfig::new("reviews.csv")).unwrap();
        assert_eq!(csv.source_name(), "csv");

        let json = create_source(&SourceConfig::new("reviews.json")).unwrap();
        assert_eq!(json.source_name(), "json");
    }

    #[test]
    fn test_explicit_kind_overrides_extension() {
        let config = SourceConfig {
            kind: Some(SourceKind::Json),
            path: PathBuf::from("reviews.csv"),
        };
        assert_eq!(create_source(&config).unwrap().source_name(), "json");
    }

    #[test]
    fn test_unknown_kind() {
        let err = create_source(&SourceConfig::new("reviews.dat")).err().unwrap();
        assert!(matches!(err, SourceError::UnknownKind(_)));
    }

    #[test]
    fn test_create_source_from_config_without_source() {
        let config = Config::default();
        assert!(create_source_from_config(&config).unwrap().is_none());
    }
}
