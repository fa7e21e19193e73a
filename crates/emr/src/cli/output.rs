//! Output formatting utilities

use anyhow::{Context, Result};
use colored::Colorize;
use serde_json::Value;
use std::fs::File;
use std::io::{self, IsTerminal, Write};
use std::path::Path;
use tabled::builder::Builder;
use tabled::settings::Style;

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    Json,
    #[default]
    JsonPretty,
    Table,
}

impl OutputFormat {
    /// Parse a format name; unknown names fall back to pretty JSON
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => Self::Json,
            "table" => Self::Table,
            _ => Self::JsonPretty,
        }
    }

    /// Format from an optional `--format` argument
    pub fn from_arg(arg: Option<&str>) -> Self {
        arg.map(Self::parse).unwrap_or_default()
    }
}

/// Set up color output based on user preference
pub fn setup_colors(mode: &str) {
    match mode.to_lowercase().as_str() {
        "always" => colored::control::set_override(true),
        "never" => colored::control::set_override(false),
        _ => colored::control::set_override(io::stdout().is_terminal()),
    }
}

/// Format an error for display
pub fn format_error(error: &anyhow::Error) -> String {
    format!("{} {:#}", "Error:".red().bold(), error)
}

/// Format a warning for display
pub fn format_warning(warning: &str) -> String {
    format!("{} {}", "Warning:".yellow().bold(), warning)
}

/// Format a success message for display
pub fn format_success(message: &str) -> String {
    format!("{} {}", "Success:".green().bold(), message)
}

/// Write output to a file or stdout
pub fn write_output(content: &str, output_file: Option<&Path>) -> Result<()> {
    if let Some(path) = output_file {
        let mut file = File::create(path)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;
        file.write_all(content.as_bytes())
            .with_context(|| format!("Failed to write to output file: {}", path.display()))?;
        eprintln!(
            "{}",
            format_success(&format!("Output written to {}", path.display()))
        );
    } else {
        println!("{content}");
    }
    Ok(())
}

/// Format JSON value for output
pub fn format_json(value: &Value, pretty: bool) -> Result<String> {
    if pretty {
        serde_json::to_string_pretty(value).context("Failed to serialize JSON")
    } else {
        serde_json::to_string(value).context("Failed to serialize JSON")
    }
}

/// Format value as table (if possible)
///
/// Arrays of objects become one row per object with the first object's keys
/// as columns; a single object becomes a key/value table.
pub fn format_as_table(value: &Value) -> Option<String> {
    match value {
        Value::Array(items) => {
            if items.is_empty() {
                return Some("(empty list)".to_string());
            }
            let Some(Value::Object(first)) = items.first() else {
                return None;
            };

            let columns: Vec<String> = first.keys().cloned().collect();
            let mut builder = Builder::default();
            builder.push_record(columns.iter().cloned());
            for item in items {
                let Value::Object(obj) = item else {
                    return None;
                };
                builder.push_record(
                    columns
                        .iter()
                        .map(|column| obj.get(column).map(format_value).unwrap_or_default()),
                );
            }
            Some(builder.build().with(Style::modern()).to_string())
        }
        Value::Object(obj) => {
            let mut builder = Builder::default();
            builder.push_record(["Key", "Value"].map(String::from));
            for (key, value) in obj {
                builder.push_record([key.clone(), format_value(value)]);
            }
            Some(builder.build().with(Style::modern()).to_string())
        }
        _ => None,
    }
}

/// Format a simple value for display
fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        Value::Array(arr) => arr.iter().map(format_value).collect::<Vec<_>>().join(", "),
        Value::Object(obj) => format!("{{}} with {} fields", obj.len()),
    }
}

/// Print output in the specified format
pub fn print_output(value: &Value, format: OutputFormat, output_file: Option<&Path>) -> Result<()> {
    let content = match format {
        OutputFormat::Json => format_json(value, false)?,
        OutputFormat::JsonPretty => format_json(value, true)?,
        OutputFormat::Table => match format_as_table(value) {
            Some(table) => table,
            None => format_json(value, true)?,
        },
    };

    write_output(&content, output_file)
}
