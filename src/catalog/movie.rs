//! Movie records and their schema rules

use crate::catalog::error::MovieValidationError;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

pub const MAX_TITLE_CHARS: usize = 200;
pub const MAX_DESCRIPTION_CHARS: usize = 2000;
pub const MIN_DURATION_MINUTES: i64 = 1;
pub const MAX_DURATION_MINUTES: i64 = 600;
pub const MIN_RATING: f64 = 0.0;
pub const MAX_RATING: f64 = 10.0;

/// A movie as submitted for insertion
///
/// Required fields are optional here so that a missing field is reported as
/// a validation message rather than a parse error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMovie {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub release_date: Option<NaiveDate>,
    /// Running time in minutes
    #[serde(default)]
    pub duration: Option<i64>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub poster: String,
    /// Stamped by the import service; submitters cannot choose it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub added_by: Option<String>,
}

/// A stored movie
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub release_date: NaiveDate,
    pub duration: u32,
    pub rating: f64,
    pub poster: String,
    pub added_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum MovieList {
    Bare(Vec<NewMovie>),
    Wrapped { movies: Vec<NewMovie> },
}

/// Parse an import document: a JSON array of movies or `{"movies": [...]}`
pub fn parse_movie_list(json: &str) -> Result<Vec<NewMovie>, serde_json::Error> {
    Ok(match serde_json::from_str(json)? {
        MovieList::Bare(movies) | MovieList::Wrapped { movies } => movies,
    })
}

impl NewMovie {
    /// Copy with string fields trimmed, as stored
    pub fn normalized(&self) -> Self {
        Self {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            poster: self.poster.trim().to_string(),
            added_by: self.added_by.as_ref().map(|user| user.trim().to_string()),
            ..self.clone()
        }
    }

    /// Check the submitted fields against the movie schema
    ///
    /// Reports every violated rule. The submitter is not checked here; it
    /// is stamped by the import service and enforced by the store.
    pub fn validate(&self) -> Result<(), MovieValidationError> {
        let mut messages = Vec::new();

        let title = self.title.trim();
        if title.is_empty() {
            messages.push("Movie title is required".to_string());
        } else if title.chars().count() > MAX_TITLE_CHARS {
            messages.push(format!("Title cannot exceed {} characters", MAX_TITLE_CHARS));
        }

        let description = self.description.trim();
        if description.is_empty() {
            messages.push("Movie description is required".to_string());
        } else if description.chars().count() > MAX_DESCRIPTION_CHARS {
            messages.push(format!(
                "Description cannot exceed {} characters",
                MAX_DESCRIPTION_CHARS
            ));
        }

        if self.release_date.is_none() {
            messages.push("Release date is required".to_string());
        }

        match self.duration {
            None => messages.push("Duration is required".to_string()),
            Some(minutes) if minutes < MIN_DURATION_MINUTES => {
                messages.push("Duration must be at least 1 minute".to_string())
            }
            Some(minutes) if minutes > MAX_DURATION_MINUTES => messages.push(format!(
                "Duration cannot exceed {} minutes",
                MAX_DURATION_MINUTES
            )),
            Some(_) => {}
        }

        match self.rating {
            None => messages.push("Rating is required".to_string()),
            Some(rating) if !(MIN_RATING..=MAX_RATING).contains(&rating) => {
                messages.push("Rating must be between 0 and 10".to_string())
            }
            Some(_) => {}
        }

        if messages.is_empty() {
            Ok(())
        } else {
            Err(MovieValidationError { messages })
        }
    }

    /// Build the stored record, enforcing the schema and the submitter
    pub fn to_movie(&self, id: u64, now: DateTime<Utc>) -> Result<Movie, MovieValidationError> {
        let movie = self.normalized();
        let mut validation = movie.validate().err().unwrap_or(MovieValidationError {
            messages: Vec::new(),
        });

        let added_by = movie.added_by.clone().filter(|user| !user.is_empty());
        if added_by.is_none() {
            validation
                .messages
                .push("Movie submitter (addedBy) is required".to_string());
        }

        match (
            added_by,
            movie.release_date,
            movie.duration.and_then(|minutes| u32::try_from(minutes).ok()),
            movie.rating,
        ) {
            (Some(added_by), Some(release_date), Some(duration), Some(rating))
                if validation.messages.is_empty() =>
            {
                Ok(Movie {
                    id,
                    title: movie.title,
                    description: movie.description,
                    release_date,
                    duration,
                    rating,
                    poster: movie.poster,
                    added_by,
                    created_at: now,
                    updated_at: now,
                })
            }
            _ => Err(validation),
        }
    }
}
