use crate::output::Output;
use clap::ValueEnum;
use color_eyre::eyre::{eyre, WrapErr};
use color_eyre::Result;
use comfy_table::{Cell, Table};
use review_stats_config::{Config, PathManager, SourceConfig, SourceKind};
use serde_json::json;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SourceKindArg {
    Csv,
    Json,
}

impl From<SourceKindArg> for SourceKind {
    fn from(kind: SourceKindArg) -> Self {
        match kind {
            SourceKindArg::Csv => SourceKind::Csv,
            SourceKindArg::Json => SourceKind::Json,
        }
    }
}

/// Config file to use: `--config` if given, otherwise the platform default
pub fn config_path(explicit: Option<PathBuf>) -> PathBuf {
    explicit.unwrap_or_else(|| PathManager::default().config_file())
}

/// Load the config file, falling back to defaults when it does not exist yet
pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }
    let config = Config::load_from_file(&path.to_path_buf())
        .map_err(|e| eyre!("Failed to load config from {}: {}", path.display(), e))?;
    config
        .validate()
        .map_err(|e| eyre!("Invalid config in {}: {}", path.display(), e))?;
    Ok(config)
}

pub fn show_config(config: &Config, path: &Path, output: &Output) -> Result<()> {
    let source_kind = config
        .source
        .as_ref()
        .and_then(|s| s.resolved_kind())
        .map(|k| k.as_str());
    let source_path = config.source.as_ref().map(|s| s.path.display().to_string());
    let log_file = config.logging.file.as_ref().map(|f| f.display().to_string());

    if !output.is_human() {
        output.json(&json!({
            "config_file": path.display().to_string(),
            "source": {
                "kind": source_kind,
                "path": source_path,
            },
            "logging": {
                "level": config.logging.level,
                "json": config.logging.json,
                "file": log_file,
            }
        }));
        return Ok(());
    }

    let not_set = "(not set)".to_string();
    let mut table = Table::new();
    table.set_header(vec![
        Cell::new("Setting").add_attribute(comfy_table::Attribute::Bold),
        Cell::new("Value").add_attribute(comfy_table::Attribute::Bold),
    ]);
    table.add_row(vec![Cell::new("Config File"), Cell::new(path.display().to_string())]);
    table.add_row(vec![
        Cell::new("Source Kind"),
        Cell::new(source_kind.unwrap_or("(not set)")),
    ]);
    table.add_row(vec![
        Cell::new("Source Path"),
        Cell::new(source_path.unwrap_or_else(|| not_set.clone())),
    ]);
    table.add_row(vec![Cell::new("Log Level"), Cell::new(&config.logging.level)]);
    table.add_row(vec![Cell::new("JSON Logs"), Cell::new(config.logging.json)]);
    table.add_row(vec![Cell::new("Log File"), Cell::new(log_file.unwrap_or(not_set))]);
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
    println!("{}", table);

    if !config.is_source_configured() {
        output.warn("No review source configured. Run 'reviewstats config init --source <FILE>'");
    }
    Ok(())
}

/// Write `[source]` into the config file, keeping any existing logging settings
pub fn init_config(
    path: &Path,
    reviews: PathBuf,
    kind: Option<SourceKindArg>,
    output: &Output,
) -> Result<()> {
    let mut config = load_config(path)?;
    config.source = Some(SourceConfig {
        kind: kind.map(SourceKind::from),
        path: reviews,
    });
    config
        .validate()
        .map_err(|e| eyre!("Refusing to write invalid config: {}", e))?;
    config
        .save_to_file(&path.to_path_buf())
        .map_err(|e| eyre!("{}", e))
        .wrap_err_with(|| format!("Failed to write config to {}", path.display()))?;

    info!(path = %path.display(), "Wrote config");
    output.success(format!("Configuration saved to {}", path.display()));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::OutputFormat;

    #[test]
    fn test_load_config_missing_file_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(&dir.path().join("config.toml")).unwrap();
        assert!(config.source.is_none());
    }

    #[test]
    fn test_init_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let output = Output::new(OutputFormat::Json, true);

        init_config(&path, PathBuf::from("/data/reviews.dat"), Some(SourceKindArg::Csv), &output).unwrap();

        let config = load_config(&path).unwrap();
        let source = config.source.unwrap();
        assert_eq!(source.kind, Some(SourceKind::Csv));
        assert_eq!(source.path, PathBuf::from("/data/reviews.dat"));
    }

    #[test]
    fn test_init_rejects_unknown_extension_without_kind() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let output = Output::new(OutputFormat::Json, true);

        assert!(init_config(&path, PathBuf::from("reviews.dat"), None, &output).is_err());
        assert!(!path.exists());
    }
}
