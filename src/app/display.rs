//! Import summary output

use crate::app::import::ImportOutcome;
use colored::Colorize;

fn paint(text: &str, use_color: bool, style: fn(&str) -> colored::ColoredString) -> String {
    if use_color {
        style(text).to_string()
    } else {
        text.to_string()
    }
}

/// Human-readable summary of an import run
pub fn render_summary(outcome: &ImportOutcome, use_color: bool) -> String {
    let stats = &outcome.status.stats;
    let mut lines = Vec::new();

    let headline = if outcome.interrupted {
        paint("Import interrupted", use_color, |s| s.yellow().bold())
    } else if stats.total_failed > 0 {
        paint("Import finished with errors", use_color, |s| s.red().bold())
    } else {
        paint("Import complete", use_color, |s| s.green().bold())
    };
    lines.push(headline);

    lines.push(format!("  Submitted: {}", stats.total_submitted));
    lines.push(format!("  Inserted:  {}", stats.total_processed));
    lines.push(format!(
        "  Failed:    {}",
        if stats.total_failed > 0 {
            paint(&stats.total_failed.to_string(), use_color, |s| s.red())
        } else {
            stats.total_failed.to_string()
        }
    ));
    if outcome.interrupted {
        lines.push(format!("  Discarded: {}", outcome.discarded));
    }
    lines.push(match outcome.stored {
        Some(stored) => format!("  Stored:    {}", stored),
        None => format!("  Stored:    {}", paint("unknown", use_color, |s| s.yellow())),
    });

    for (n, failure) in stats.errors.iter().enumerate() {
        let titles: Vec<&str> = failure.batch.iter().map(|m| m.title.as_str()).collect();
        lines.push(format!(
            "  {} batch {} ({} movies): {}",
            paint("error:", use_color, |s| s.red()),
            n + 1,
            failure.batch.len(),
            failure.error
        ));
        lines.push(format!("    {}", titles.join(", ")));
    }

    lines.join("\n")
}

pub fn render_json(outcome: &ImportOutcome) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(outcome)
}
