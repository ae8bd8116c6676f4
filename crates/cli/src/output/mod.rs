//! Rendering of command results as tables, JSON or plain text

use anyhow::Result;
use serde::Serialize;

mod formatters;
mod table;
mod views;

pub use formatters::{JsonFormatter, PlainFormatter};
pub use table::TableFormatter;
pub use views::*;

/// How command results are written to stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Pretty JSON, for scripts
    Json,
    #[default]
    Table,
    /// `key: value` lines
    Plain,
}

/// A command result renderable in every [`OutputFormat`].
///
/// JSON and plain text come from the serialized form; only the table layout
/// is written per type.
pub trait Formattable: Serialize {
    fn format_table(&self) -> Result<String>;

    fn format_json(&self) -> Result<String> {
        JsonFormatter::format(self)
    }

    fn format_plain(&self) -> Result<String> {
        PlainFormatter::format(self)
    }

    fn format(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Json => self.format_json(),
            OutputFormat::Table => self.format_table(),
            OutputFormat::Plain => self.format_plain(),
        }
    }
}

/// Status line colors
pub mod colors {
    use colored::{ColoredString, Colorize};

    pub fn success(s: &str) -> ColoredString {
        s.green()
    }

    pub fn warning(s: &str) -> ColoredString {
        s.yellow()
    }

    pub fn info(s: &str) -> ColoredString {
        s.blue()
    }

    pub fn dim(s: &str) -> ColoredString {
        s.dimmed()
    }
}
