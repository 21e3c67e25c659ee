use crate::output::Output;
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use review_stats_config::{Config, SourceConfig};
use review_stats_core::{ReviewService, ReviewStatsError};
use review_stats_models::{MovieId, ReviewerId};
use review_stats_sources::{create_source, ReviewSource};
use serde_json::json;
use std::path::PathBuf;
use tracing::{info, warn};

/// One engine query, decoupled from the clap definitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Query {
    ReviewerCount { reviewer: ReviewerId },
    ReviewerAverage { reviewer: ReviewerId },
    ReviewerRates { reviewer: ReviewerId, rate: i32 },
    MovieCount { movie: MovieId },
    MovieAverage { movie: MovieId },
    MovieRates { movie: MovieId, rate: i32 },
    MostTopRates,
    MostProductive,
    TopRated { amount: i32 },
    ReviewerMovies { reviewer: ReviewerId },
    MovieReviewers { movie: MovieId },
}

impl Query {
    pub fn name(&self) -> &'static str {
        match self {
            Query::ReviewerCount { .. } => "reviewer-count",
            Query::ReviewerAverage { .. } => "reviewer-average",
            Query::ReviewerRates { .. } => "reviewer-rates",
            Query::MovieCount { .. } => "movie-count",
            Query::MovieAverage { .. } => "movie-average",
            Query::MovieRates { .. } => "movie-rates",
            Query::MostTopRates => "most-top-rates",
            Query::MostProductive => "most-productive",
            Query::TopRated { .. } => "top-rated",
            Query::ReviewerMovies { .. } => "reviewer-movies",
            Query::MovieReviewers { .. } => "movie-reviewers",
        }
    }
}

/// `--reviews` wins over the `[source]` section of the config file
pub fn resolve_source_config(config: &Config, reviews_override: Option<PathBuf>) -> Option<SourceConfig> {
    reviews_override
        .map(SourceConfig::new)
        .or_else(|| config.source.clone())
}

pub fn run_query(query: Query, config: &Config, reviews_override: Option<PathBuf>, output: &Output) -> Result<()> {
    let source = resolve_source_config(config, reviews_override)
        .as_ref()
        .map(create_source)
        .transpose()
        .wrap_err("Failed to set up review source")?;

    let service = ReviewService::try_new(source)
        .wrap_err("No review source configured. Pass --reviews <FILE> or run 'reviewstats config init'")?;

    info!(query = query.name(), source = service.source().source_name(), "Running query");

    match execute(&service, query, output) {
        Ok(()) => Ok(()),
        Err(e @ (ReviewStatsError::InvalidArgument(_) | ReviewStatsError::NotFound(_))) => {
            warn!(query = query.name(), error = %e, "Query rejected");
            Err(e).wrap_err_with(|| format!("{} failed", query.name()))
        }
        Err(e) => Err(e).wrap_err("Could not read reviews"),
    }
}

pub fn execute<S: ReviewSource>(
    service: &ReviewService<S>,
    query: Query,
    output: &Output,
) -> Result<(), ReviewStatsError> {
    let name = query.name();
    match query {
        Query::ReviewerCount { reviewer } => {
            let count = service.count_reviews_by_reviewer(reviewer)?;
            output.value(name, &format!("Reviews by reviewer {}", reviewer), json!(count));
        }
        Query::ReviewerAverage { reviewer } => {
            let average = service.average_grade_by_reviewer(reviewer)?;
            output.value(name, &format!("Average grade of reviewer {}", reviewer), json!(average));
        }
        Query::ReviewerRates { reviewer, rate } => {
            let count = service.count_rates_by_reviewer(reviewer, rate)?;
            output.value(name, &format!("Grade {} reviews by reviewer {}", rate, reviewer), json!(count));
        }
        Query::MovieCount { movie } => {
            let count = service.count_reviews_of_movie(movie)?;
            output.value(name, &format!("Reviews of movie {}", movie), json!(count));
        }
        Query::MovieAverage { movie } => {
            let average = service.average_grade_of_movie(movie)?;
            output.value(name, &format!("Average grade of movie {}", movie), json!(average));
        }
        Query::MovieRates { movie, rate } => {
            let count = service.count_rates_of_movie(movie, rate)?;
            output.value(name, &format!("Grade {} reviews of movie {}", rate, movie), json!(count));
        }
        Query::MostTopRates => {
            let movies = service.movies_with_most_top_rates()?;
            output.id_list(name, "Movie", &movies);
        }
        Query::MostProductive => {
            let reviewers = service.most_productive_reviewers()?;
            output.id_list(name, "Reviewer", &reviewers);
        }
        Query::TopRated { amount } => {
            let movies = service.top_rated_movies(amount)?;
            output.id_list(name, "Movie", &movies);
        }
        Query::ReviewerMovies { reviewer } => {
            let movies = service.movies_reviewed_by_reviewer(reviewer)?;
            output.id_list(name, "Movie", &movies);
        }
        Query::MovieReviewers { movie } => {
            let reviewers = service.reviewers_of_movie(movie)?;
            output.id_list(name, "Reviewer", &reviewers);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::OutputFormat;
    use review_stats_models::Review;
    use review_stats_sources::file::parse_review_date;
    use review_stats_sources::InMemoryReviewSource;

    fn quiet_output() -> Output {
        Output::new(OutputFormat::Json, true)
    }

    #[test]
    fn test_resolve_source_prefers_override() {
        let config = Config {
            source: Some(SourceConfig::new("from-config.csv")),
            ..Config::default()
        };

        let resolved = resolve_source_config(&config, Some(PathBuf::from("override.json"))).unwrap();
        assert_eq!(resolved.path, PathBuf::from("override.json"));

        let resolved = resolve_source_config(&config, None).unwrap();
        assert_eq!(resolved.path, PathBuf::from("from-config.csv"));

        assert!(resolve_source_config(&Config::default(), None).is_none());
    }

    #[test]
    fn test_run_query_without_source_fails() {
        let err = run_query(Query::MostProductive, &Config::default(), None, &quiet_output()).unwrap_err();
        let root = err.root_cause().to_string();
        assert_eq!(root, "Missing repository");
    }

    #[test]
    fn test_execute_propagates_engine_errors() {
        let service = ReviewService::new(InMemoryReviewSource::new(vec![Review::new(1, 1, 4, parse_review_date("2021-01-01").unwrap())]));
        let output = quiet_output();

        assert!(execute(&service, Query::ReviewerRates { reviewer: 1, rate: 9 }, &output)
            .unwrap_err()
            .is_invalid_argument());
        assert!(execute(&service, Query::MovieCount { movie: 2 }, &output)
            .unwrap_err()
            .is_not_found());
        assert!(execute(&service, Query::MovieReviewers { movie: 1 }, &output).is_ok());
    }

    #[test]
    fn test_run_query_reads_csv_override() {
        use std::io::Write;
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "Reviewer,Movie,Grade,Date").unwrap();
        writeln!(file, "1,1,5,2021-01-01").unwrap();
        file.flush().unwrap();

        let result = run_query(
            Query::MostTopRates,
            &Config::default(),
            Some(file.path().to_path_buf()),
            &quiet_output(),
        );
        assert!(result.is_ok());
    }
}
