//! CLI TOML configuration tests

use clap::Parser;
use moviebatch::app::cli::args::Args;
use moviebatch::app::cli::config::{load_config, ConfigError};
use std::path::PathBuf;
use std::time::Duration;

#[tokio::test]
async fn test_config_file_supplies_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("moviebatch.toml");
    std::fs::write(
        &path,
        r#"
added-by = "curator"

[queue]
batch-size = 4
delay-ms = 5
max-items = 40

[logging]
level = "warn"
format = "json"
file = "none"
color = false
"#,
    )
    .unwrap();

    let config = load_config(Some(&path)).await.unwrap();
    let args = Args::try_parse_from(["moviebatch", "movies.json"]).unwrap();
    let settings = args.resolve(config).unwrap();

    assert_eq!(settings.added_by, "curator");
    assert_eq!(settings.import.queue.batch_size, 4);
    assert_eq!(
        settings.import.queue.inter_batch_delay,
        Duration::from_millis(5)
    );
    assert_eq!(settings.import.max_items, 40);
    assert_eq!(settings.log_level, "warn");
    assert_eq!(settings.log_format, "json");
    assert_eq!(settings.log_file, Some(PathBuf::from("none")));
    assert!(!settings.use_color);
}

#[tokio::test]
async fn test_command_line_wins_over_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("moviebatch.toml");
    std::fs::write(&path, "added-by = \"curator\"\n[queue]\nbatch-size = 4\n").unwrap();

    let config = load_config(Some(&path)).await.unwrap();
    let args = Args::try_parse_from(["moviebatch", "-u", "admin", "-b", "9", "movies.json"])
        .unwrap();
    let settings = args.resolve(config).unwrap();

    assert_eq!(settings.added_by, "admin");
    assert_eq!(settings.import.queue.batch_size, 9);
}

#[tokio::test]
async fn test_invalid_config_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("moviebatch.toml");

    std::fs::write(&path, "[queue]\nbatch-size = \"ten\"\n").unwrap();
    assert!(matches!(
        load_config(Some(&path)).await,
        Err(ConfigError::Parse { .. })
    ));

    std::fs::write(&path, "added-by = \"\"\n").unwrap();
    let config = load_config(Some(&path)).await.unwrap();
    let args = Args::try_parse_from(["moviebatch", "movies.json"]).unwrap();
    match args.resolve(config) {
        Err(ConfigError::Invalid { key, .. }) => assert_eq!(key, "added-by"),
        other => panic!("unexpected result: {:?}", other),
    }
}
