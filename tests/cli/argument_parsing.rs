//! CLI argument parsing tests

use clap::Parser;
use moviebatch::app::cli::args::Args;
use moviebatch::app::cli::config::ConfigError;
use std::path::PathBuf;
use std::time::Duration;

#[test]
fn test_short_and_long_options_match() {
    let long = Args::try_parse_from([
        "moviebatch",
        "--added-by",
        "admin",
        "--batch-size",
        "3",
        "--delay-ms",
        "20",
        "--max-items",
        "50",
        "--log-level",
        "debug",
        "--log-format",
        "ext",
        "movies.json",
    ])
    .unwrap();
    let short = Args::try_parse_from([
        "moviebatch",
        "-u",
        "admin",
        "-b",
        "3",
        "-d",
        "20",
        "-m",
        "50",
        "-l",
        "debug",
        "-o",
        "ext",
        "movies.json",
    ])
    .unwrap();

    assert_eq!(long.added_by, short.added_by);
    assert_eq!(long.batch_size, short.batch_size);
    assert_eq!(long.delay_ms, short.delay_ms);
    assert_eq!(long.max_items, short.max_items);
    assert_eq!(long.log_level, short.log_level);
    assert_eq!(long.log_format, short.log_format);
}

#[test]
fn test_submitter_is_trimmed() {
    let args = Args::try_parse_from(["moviebatch", "-u", "  admin  ", "movies.json"]).unwrap();
    assert_eq!(args.added_by.as_deref(), Some("admin"));
}

#[test]
fn test_resolve_without_config() {
    let args = Args::try_parse_from([
        "moviebatch",
        "-u",
        "admin",
        "-b",
        "3",
        "-d",
        "0",
        "--no-color",
        "--json",
        "movies.json",
    ])
    .unwrap();
    let settings = args.resolve(None).unwrap();

    assert_eq!(settings.file, PathBuf::from("movies.json"));
    assert_eq!(settings.import.queue.batch_size, 3);
    assert_eq!(settings.import.queue.inter_batch_delay, Duration::ZERO);
    assert_eq!(settings.import.max_items, 1000);
    assert!(settings.json);
    assert!(!settings.use_color);
}

#[test]
fn test_resolve_requires_submitter() {
    let args = Args::try_parse_from(["moviebatch", "movies.json"]).unwrap();
    let error = args.resolve(None).unwrap_err();
    assert!(matches!(error, ConfigError::MissingSubmitter));
    assert!(error.to_string().contains("--added-by"));
}
