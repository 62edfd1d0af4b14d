//! Tests running the `moviebatch` executable

use crate::common::{movie_json, movie_titles, write_movie_file};
use serde_json::{json, Value};
use std::path::Path;
use std::process::{Command, Output};

/// Run the binary with an isolated config directory and no colors
fn moviebatch(config_home: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_moviebatch"))
        .args(args)
        .arg("--no-color")
        .env("XDG_CONFIG_HOME", config_home)
        .env("HOME", config_home)
        .output()
        .expect("failed to run moviebatch")
}

#[test]
fn test_import_reports_json_outcome() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_movie_file(dir.path(), &Value::Array(movie_titles(7)));

    let output = moviebatch(
        dir.path(),
        &["-u", "admin", "-b", "3", "-d", "0", "--json", file.to_str().unwrap()],
    );
    assert_eq!(output.status.code(), Some(0), "{:?}", output);

    let outcome: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(outcome["accepted"], 7);
    assert_eq!(outcome["stored"], 7);
    assert_eq!(outcome["interrupted"], false);
    assert_eq!(outcome["status"]["queueLength"], 0);
    assert_eq!(outcome["status"]["processing"], false);
    assert_eq!(outcome["status"]["stats"]["totalSubmitted"], 7);
    assert_eq!(outcome["status"]["stats"]["totalProcessed"], 7);
    assert_eq!(outcome["status"]["stats"]["totalFailed"], 0);
}

#[test]
fn test_full_catalog_gives_partial_failure_exit_code() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_movie_file(dir.path(), &Value::Array(movie_titles(5)));

    let output = moviebatch(
        dir.path(),
        &[
            "-u",
            "admin",
            "-b",
            "2",
            "-d",
            "0",
            "--store-capacity",
            "3",
            "--json",
            file.to_str().unwrap(),
        ],
    );
    assert_eq!(output.status.code(), Some(2), "{:?}", output);

    let outcome: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(outcome["stored"], 3);
    assert_eq!(outcome["status"]["stats"]["totalProcessed"], 2);
    assert_eq!(outcome["status"]["stats"]["totalFailed"], 3);
    let errors = outcome["status"]["stats"]["errors"].as_array().unwrap();
    assert_eq!(errors.len(), 2);
    assert_eq!(errors[0]["batch"][0]["title"], "Feature 02");
    assert!(errors[0]["error"]
        .as_str()
        .unwrap()
        .contains("catalog is full (3 movies)"));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Queue processing error"), "{}", stderr);
}

#[test]
fn test_failure_summary_in_text_mode() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_movie_file(dir.path(), &Value::Array(movie_titles(2)));

    let output = moviebatch(
        dir.path(),
        &["-u", "admin", "-d", "0", "--store-capacity", "1", file.to_str().unwrap()],
    );
    assert_eq!(output.status.code(), Some(2), "{:?}", output);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("Import finished with errors"), "{}", stdout);
    assert!(stdout.contains("Failed:    2"));
    assert!(stdout.contains("Stored:    1"));
    assert!(stdout.contains("Feature 00, Feature 01"));
}

#[test]
fn test_unusable_log_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_movie_file(dir.path(), &Value::Array(movie_titles(1)));
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, "not a directory").unwrap();
    let log_file = blocker.join("logs").join("moviebatch.log");

    let output = moviebatch(
        dir.path(),
        &[
            "-u",
            "admin",
            "--log-file",
            log_file.to_str().unwrap(),
            file.to_str().unwrap(),
        ],
    );
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to initialise logging"));
    assert!(output.stdout.is_empty());
}

#[test]
fn test_wrapped_document_and_text_summary() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_movie_file(dir.path(), &json!({ "movies": movie_titles(2) }));

    let output = moviebatch(dir.path(), &["-u", "admin", "-d", "0", file.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(0), "{:?}", output);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Import complete"));
    assert!(stdout.contains("Inserted:  2"));
    assert!(stdout.contains("Stored:    2"));
}

#[test]
fn test_invalid_movie_rejects_submission() {
    let dir = tempfile::tempdir().unwrap();
    let mut broken = movie_json("Too Long");
    broken["duration"] = json!(900);
    let file = write_movie_file(dir.path(), &json!([movie_json("Se7en"), broken]));

    let output = moviebatch(dir.path(), &["-u", "admin", file.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("1 of 2 movies failed validation"), "{}", stderr);
    assert!(stderr.contains("movie #2 (\"Too Long\")"), "{}", stderr);
    assert!(output.stdout.is_empty());
}

#[test]
fn test_missing_submitter_fails_before_import() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_movie_file(dir.path(), &Value::Array(movie_titles(1)));

    let output = moviebatch(dir.path(), &[file.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("No submitting user given"));
}

#[test]
fn test_config_file_supplies_submitter() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_movie_file(dir.path(), &Value::Array(movie_titles(3)));
    let config = dir.path().join("import.toml");
    std::fs::write(&config, "added-by = \"curator\"\n[queue]\ndelay-ms = 0\n").unwrap();

    let output = moviebatch(
        dir.path(),
        &["-c", config.to_str().unwrap(), "--json", file.to_str().unwrap()],
    );
    assert_eq!(output.status.code(), Some(0), "{:?}", output);
    let outcome: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(outcome["stored"], 3);
}

#[test]
fn test_missing_files_are_reported() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nowhere.json");

    let output = moviebatch(dir.path(), &["-u", "admin", missing.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Error reading movie file"));

    let output = moviebatch(
        dir.path(),
        &["-u", "admin", "-c", "/nonexistent/moviebatch.toml", "movies.json"],
    );
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("configuration file does not exist"));
}

#[test]
fn test_version_flag() {
    let dir = tempfile::tempdir().unwrap();
    let output = Command::new(env!("CARGO_BIN_EXE_moviebatch"))
        .arg("--version")
        .env("XDG_CONFIG_HOME", dir.path())
        .output()
        .unwrap();
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains(env!("CARGO_PKG_VERSION")));
}
