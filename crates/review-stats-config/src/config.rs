use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Config {
    /// Where reviews are read from. Optional so that a fresh config still loads;
    /// the query engine refuses to start without one.
    #[serde(default)]
    pub source: Option<SourceConfig>,
    #[serde(default = "default_logging_config")]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Explicit file format; inferred from the file extension when omitted
    #[serde(default)]
    pub kind: Option<SourceKind>,
    pub path: PathBuf,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Csv,
    Json,
}

impl SourceKind {
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "csv" => Some(SourceKind::Csv),
            "json" => Some(SourceKind::Json),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::Csv => "csv",
            SourceKind::Json => "json",
        }
    }
}

impl SourceConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { kind: None, path: path.into() }
    }

    /// Explicit kind wins over the extension
    pub fn resolved_kind(&self) -> Option<SourceKind> {
        self.kind.or_else(|| SourceKind::from_path(&self.path))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_json_logging")]
    pub json: bool,
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        default_logging_config()
    }
}

pub fn default_logging_config() -> LoggingConfig {
    LoggingConfig {
        level: default_log_level(),
        json: default_json_logging(),
        file: None,
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_json_logging() -> bool {
    use std::io::IsTerminal;
    !std::io::stdout().is_terminal()
}

const VALID_LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

impl Config {
    pub fn load_from_file(path: &PathBuf) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save_to_file(&self, path: &PathBuf) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        let level = self.logging.level.to_ascii_lowercase();
        if !VALID_LOG_LEVELS.contains(&level.as_str()) {
            return Err(anyhow::anyhow!(
                "Invalid logging level: {}. Use one of {:?}",
                self.logging.level,
                VALID_LOG_LEVELS
            ));
        }

        if let Some(source) = &self.source {
            if source.path.as_os_str().is_empty() {
                return Err(anyhow::anyhow!("source.path cannot be empty"));
            }
            if source.resolved_kind().is_none() {
                return Err(anyhow::anyhow!(
                    "Cannot infer source kind from {}. Set source.kind to \"csv\" or \"json\"",
                    source.path.display()
                ));
            }
        }

        Ok(())
    }

    pub fn is_source_configured(&self) -> bool {
        self.source
            .as_ref()
            .map(|s| !s.path.as_os_str().is_empty())
            .unwrap_or(false)
    }
}
