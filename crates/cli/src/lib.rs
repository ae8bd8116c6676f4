//! Migration Portal CLI Library
//!
//! Command implementations, output formatting and prompts for the
//! `migration-portal` binary. Commands run against the file-backed stores
//! under the configured data directory and remember the signed-in account
//! between invocations.

pub mod commands;
pub mod interactive;
pub mod output;

pub use commands::CommandContext;
pub use output::{Formattable, JsonFormatter, OutputFormat, PlainFormatter, TableFormatter};

/// Re-export common types
pub use anyhow::{Context, Result};
