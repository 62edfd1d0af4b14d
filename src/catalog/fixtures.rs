//! Test fixtures shared by catalog tests

use crate::catalog::movie::NewMovie;
use chrono::NaiveDate;

pub fn sample_movie(title: &str) -> NewMovie {
    NewMovie {
        title: title.to_string(),
        description: "A heist crew is pursued across Los Angeles.".to_string(),
        release_date: NaiveDate::from_ymd_opt(1995, 12, 15),
        duration: Some(170),
        rating: Some(8.3),
        poster: String::new(),
        added_by: None,
    }
}

pub fn sample_movies(count: usize) -> Vec<NewMovie> {
    (0..count)
        .map(|i| sample_movie(&format!("Movie {:03}", i)))
        .collect()
}

/// A submitted movie already stamped with its submitter
pub fn stamped(mut movie: NewMovie, user: &str) -> NewMovie {
    movie.added_by = Some(user.to_string());
    movie
}
