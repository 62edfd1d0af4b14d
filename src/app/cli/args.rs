//! Command-line arguments
//!
//! Every option except the input file can also come from the TOML
//! configuration file; values given here take precedence.

use crate::core::logging::{LOG_FORMATS, LOG_LEVELS};
use crate::core::validation::{validate_millis, validate_positive_int, validate_submitter};
use clap::{ArgAction, Parser};
use std::path::PathBuf;

#[derive(Parser, Debug, Clone, Default)]
#[command(name = "moviebatch")]
#[command(about = "Bulk-import movies through a batched insert queue")]
#[command(version, long_version = crate::core::version::long_version())]
pub struct Args {
    /// JSON file with the movies to import (an array or {"movies": [...]})
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// User recorded as the submitter of every imported movie
    #[arg(short = 'u', long = "added-by", value_name = "USER", value_parser = validate_submitter)]
    pub added_by: Option<String>,

    /// Movies written per insert call [default: 10]
    #[arg(short = 'b', long = "batch-size", value_name = "COUNT", value_parser = validate_positive_int)]
    pub batch_size: Option<usize>,

    /// Pause between insert calls in milliseconds [default: 50]
    #[arg(short = 'd', long = "delay-ms", value_name = "MS", value_parser = validate_millis)]
    pub delay_ms: Option<u64>,

    /// Largest accepted submission [default: 1000]
    #[arg(short = 'm', long = "max-items", value_name = "COUNT", value_parser = validate_positive_int)]
    pub max_items: Option<usize>,

    /// Maximum number of movies the in-memory catalog holds [default: unlimited]
    #[arg(long = "store-capacity", value_name = "COUNT", value_parser = validate_positive_int)]
    pub store_capacity: Option<usize>,

    /// Configuration file path
    #[arg(short = 'c', long = "config-file", value_name = "FILE")]
    pub config_file: Option<PathBuf>,

    /// Log level
    #[arg(short = 'l', long = "log-level", value_name = "LEVEL", value_parser = LOG_LEVELS)]
    pub log_level: Option<String>,

    /// Log output format
    #[arg(short = 'o', long = "log-format", value_name = "FORMAT", value_parser = LOG_FORMATS)]
    pub log_format: Option<String>,

    /// Log file path (use 'none' to disable file logging)
    #[arg(short = 'f', long = "log-file", value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Force colored output
    #[arg(long = "color", action = ArgAction::SetTrue, conflicts_with = "no_color")]
    pub color: bool,

    /// Disable colored output
    #[arg(long = "no-color", action = ArgAction::SetTrue)]
    pub no_color: bool,

    /// Print the final queue status as JSON
    #[arg(long = "json", action = ArgAction::SetTrue)]
    pub json: bool,
}
