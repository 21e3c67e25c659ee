pub mod config;
pub mod paths;

pub use config::{Config, LoggingConfig, SourceConfig, SourceKind, default_logging_config};
pub use paths::{PathManager, container_base_path};
