//! Validation utilities for CLI and configuration values

/// Validate positive integer value
pub fn validate_positive_int(value: &str) -> Result<usize, String> {
    match value.trim().parse::<usize>() {
        Ok(0) => Err("Value must be greater than 0".to_string()),
        Ok(n) => Ok(n),
        Err(_) => Err(format!("'{}' is not a valid positive integer", value)),
    }
}

/// Validate a millisecond duration (zero allowed)
pub fn validate_millis(value: &str) -> Result<u64, String> {
    value
        .trim()
        .parse::<u64>()
        .map_err(|_| format!("'{}' is not a valid number of milliseconds", value))
}

/// Validate the identity recorded as the submitter of imported movies
pub fn validate_submitter(value: &str) -> Result<String, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err("Submitter cannot be empty".to_string());
    }
    if trimmed.chars().any(char::is_control) {
        return Err(format!("Submitter '{}' contains control characters", trimmed));
    }
    Ok(trimmed.to_string())
}
