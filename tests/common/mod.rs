//! Common test utilities and helpers
//!
//! Movie documents and input files shared by the integration tests.

#![allow(dead_code)]

use serde_json::{json, Value};
use std::path::{Path, PathBuf};

/// A valid movie document as a client would submit it
pub fn movie_json(title: &str) -> Value {
    json!({
        "title": title,
        "description": "Two detectives hunt a serial killer.",
        "releaseDate": "1995-09-22",
        "duration": 127,
        "rating": 8.6,
        "poster": "https://example.org/posters/se7en.jpg"
    })
}

pub fn movie_titles(count: usize) -> Vec<Value> {
    (0..count)
        .map(|i| movie_json(&format!("Feature {:02}", i)))
        .collect()
}

/// Write `document` as `movies.json` inside `dir`
pub fn write_movie_file(dir: &Path, document: &Value) -> PathBuf {
    let path = dir.join("movies.json");
    std::fs::write(&path, serde_json::to_string_pretty(document).unwrap()).unwrap();
    path
}
