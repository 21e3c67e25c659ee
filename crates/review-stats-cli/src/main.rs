use clap::{ArgAction, Parser, Subcommand};
use commands::config::{self as config_cmd, SourceKindArg};
use commands::query::{self, Query};
use std::path::PathBuf;

mod commands;
mod logging;
mod output;

#[derive(Parser)]
#[command(name = "reviewstats")]
#[command(about = "Review statistics - counts, averages and rankings over movie reviews")]
#[command(version)]
struct Cli {
    /// Enable verbose output (use multiple times for more verbosity: -v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors and bare results
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_enum)]
    output: output::OutputFormat,

    /// Config file (defaults to the platform config directory)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Review file to query instead of the configured source (.csv or .json)
    #[arg(long, global = true, value_name = "FILE")]
    reviews: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Number of reviews written by a reviewer
    ReviewerCount {
        #[arg(allow_negative_numbers = true)]
        reviewer: i32,
    },
    /// Average grade given by a reviewer
    ReviewerAverage {
        #[arg(allow_negative_numbers = true)]
        reviewer: i32,
    },
    /// Number of reviews by a reviewer with a given grade (1-5)
    ReviewerRates {
        #[arg(allow_negative_numbers = true)]
        reviewer: i32,
        #[arg(allow_negative_numbers = true)]
        rate: i32,
    },
    /// Number of reviews of a movie
    MovieCount {
        #[arg(allow_negative_numbers = true)]
        movie: i32,
    },
    /// Average grade of a movie
    MovieAverage {
        #[arg(allow_negative_numbers = true)]
        movie: i32,
    },
    /// Number of reviews of a movie with a given grade (1-5)
    MovieRates {
        #[arg(allow_negative_numbers = true)]
        movie: i32,
        #[arg(allow_negative_numbers = true)]
        rate: i32,
    },
    /// Movies with the most grade-5 reviews (all ties)
    MostTopRates,
    /// Reviewers with the most reviews (all ties)
    MostProductive,
    /// Movies ordered by ascending average grade, limited to AMOUNT
    TopRated {
        #[arg(allow_negative_numbers = true)]
        amount: i32,
    },
    /// Movies reviewed by a reviewer, newest first
    #[command(long_about = "List the movies a reviewer has reviewed, newest review first. Reviews on the same date are listed by ascending grade.")]
    ReviewerMovies {
        #[arg(allow_negative_numbers = true)]
        reviewer: i32,
    },
    /// Reviewers of a movie, highest grade first
    #[command(long_about = "List the reviewers of a movie, highest grade first. Equal grades are listed newest review first.")]
    MovieReviewers {
        #[arg(allow_negative_numbers = true)]
        movie: i32,
    },
    /// Show or create the configuration file
    Config {
        #[command(subcommand)]
        cmd: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Point the configuration at a review file
    Init {
        /// Review file (.csv or .json)
        #[arg(long = "source", value_name = "FILE")]
        source: PathBuf,

        /// File format, when it cannot be inferred from the extension
        #[arg(long, value_enum)]
        kind: Option<SourceKindArg>,
    },
}

impl Commands {
    fn into_query(self) -> Option<Query> {
        let query = match self {
            Commands::ReviewerCount { reviewer } => Query::ReviewerCount { reviewer },
            Commands::ReviewerAverage { reviewer } => Query::ReviewerAverage { reviewer },
            Commands::ReviewerRates { reviewer, rate } => Query::ReviewerRates { reviewer, rate },
            Commands::MovieCount { movie } => Query::MovieCount { movie },
            Commands::MovieAverage { movie } => Query::MovieAverage { movie },
            Commands::MovieRates { movie, rate } => Query::MovieRates { movie, rate },
            Commands::MostTopRates => Query::MostTopRates,
            Commands::MostProductive => Query::MostProductive,
            Commands::TopRated { amount } => Query::TopRated { amount },
            Commands::ReviewerMovies { reviewer } => Query::ReviewerMovies { reviewer },
            Commands::MovieReviewers { movie } => Query::MovieReviewers { movie },
            Commands::Config { .. } => return None,
        };
        Some(query)
    }
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    let config_path = config_cmd::config_path(cli.config);
    let config = config_cmd::load_config(&config_path)?;

    logging::init_logging(cli.verbose, cli.quiet, &config.logging)
        .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    let output = output::Output::new(cli.output, cli.quiet);

    let result = match cli.command {
        Commands::Config { cmd } => match cmd {
            ConfigCommands::Show => config_cmd::show_config(&config, &config_path, &output),
            ConfigCommands::Init { source, kind } => config_cmd::init_config(&config_path, source, kind, &output),
        },
        command => match command.into_query() {
            Some(q) => query::run_query(q, &config, cli.reviews, &output),
            None => Ok(()),
        },
    };

    // color-eyre renders errors for humans; machine-readable output gets a JSON error line instead
    if let Err(e) = &result {
        if !output.is_human() {
            output.error(format!("{:#}", e));
            std::process::exit(1);
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_negative_ids() {
        let cli = Cli::try_parse_from(["reviewstats", "reviewer-rates", "-1", "3"]).unwrap();
        assert_eq!(
            cli.command.into_query(),
            Some(Query::ReviewerRates { reviewer: -1, rate: 3 })
        );
    }

    #[test]
    fn test_parse_global_reviews_flag() {
        let cli = Cli::try_parse_from(["reviewstats", "top-rated", "3", "--reviews", "r.csv"]).unwrap();
        assert_eq!(cli.reviews, Some(PathBuf::from("r.csv")));
        assert_eq!(cli.command.into_query(), Some(Query::TopRated { amount: 3 }));
    }

    #[test]
    fn test_config_command_is_not_a_query() {
        let cli = Cli::try_parse_from(["reviewstats", "config", "show"]).unwrap();
        assert!(cli.command.into_query().is_none());
    }
}
