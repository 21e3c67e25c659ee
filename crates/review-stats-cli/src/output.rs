use clap::ValueEnum;
use comfy_table::{Attribute, Cell, Table};
use owo_colors::OwoColorize;
use serde_json::json;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
    #[value(name = "json-pretty")]
    JsonPretty,
}

pub struct Output {
    format: OutputFormat,
    quiet: bool,
}

impl Output {
    pub fn new(format: OutputFormat, quiet: bool) -> Self {
        Self { format, quiet }
    }

    pub fn success(&self, msg: impl AsRef<str>) {
        if self.quiet {
            return;
        }

        match self.format {
            OutputFormat::Human => {
                println!("{} {}", "✓".green(), msg.as_ref());
            }
            OutputFormat::Json | OutputFormat::JsonPretty => {
                let json = json!({
                    "type": "success",
                    "message": msg.as_ref()
                });
                self.print_json(&json);
            }
        }
    }

    pub fn error(&self, msg: impl AsRef<str>) {
        // Errors should always be shown, even in quiet mode
        match self.format {
            OutputFormat::Human => {
                eprintln!("{} {}", "✗".red(), msg.as_ref());
            }
            OutputFormat::Json | OutputFormat::JsonPretty => {
                let json = json!({
                    "type": "error",
                    "message": msg.as_ref()
                });
                self.print_json(&json);
            }
        }
    }

    pub fn warn(&self, msg: impl AsRef<str>) {
        if self.quiet {
            return;
        }

        match self.format {
            OutputFormat::Human => {
                println!("{} {}", "⚠".yellow(), msg.as_ref());
            }
            OutputFormat::Json | OutputFormat::JsonPretty => {
                let json = json!({
                    "type": "warning",
                    "message": msg.as_ref()
                });
                self.print_json(&json);
            }
        }
    }

    /// Single-valued query result (a count or an average)
    pub fn value(&self, query: &str, label: &str, value: serde_json::Value) {
        // Results are the point of the command, so quiet mode only drops decoration
        match self.format {
            OutputFormat::Human => {
                if self.quiet {
                    println!("{}", value);
                } else {
                    println!("{}: {}", label.bold(), value);
                }
            }
            OutputFormat::Json | OutputFormat::JsonPretty => {
                self.print_json(&json!({
                    "type": "result",
                    "query": query,
                    "value": value
                }));
            }
        }
    }

    /// Ordered list of ids; rank is the 1-based position in the list
    pub fn id_list(&self, query: &str, column: &str, ids: &[i32]) {
        match self.format {
            OutputFormat::Human => {
                if self.quiet {
                    for id in ids {
                        println!("{}", id);
                    }
                    return;
                }
                if ids.is_empty() {
                    println!("{}", "(no results)".dimmed());
                    return;
                }
                println!("{}", id_table(column, ids));
            }
            OutputFormat::Json | OutputFormat::JsonPretty => {
                self.print_json(&json!({
                    "type": "result",
                    "query": query,
                    "value": ids
                }));
            }
        }
    }

    pub fn json(&self, data: &serde_json::Value) {
        if self.quiet && self.format != OutputFormat::Human {
            return;
        }

        self.print_json(data);
    }

    pub fn is_human(&self) -> bool {
        self.format == OutputFormat::Human
    }

    fn print_json(&self, data: &serde_json::Value) {
        match self.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string(data).unwrap_or_default());
            }
            OutputFormat::JsonPretty => {
                println!("{}", serde_json::to_string_pretty(data).unwrap_or_default());
            }
            OutputFormat::Human => {
                println!("{}", data);
            }
        }
    }
}

pub fn id_table(column: &str, ids: &[i32]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        Cell::new("#").add_attribute(Attribute::Bold),
        Cell::new(column).add_attribute(Attribute::Bold),
    ]);
    for (rank, id) in ids.iter().enumerate() {
        table.add_row(vec![Cell::new(rank + 1), Cell::new(id)]);
    }
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_table_rows() {
        let table = id_table("Movie", &[12, 7]);
        let rendered = table.to_string();
        assert!(rendered.contains("Movie"));
        assert!(rendered.contains("12"));
        assert!(rendered.contains('7'));
        assert_eq!(table.row_iter().count(), 2);
    }
}
