//! Core domain types for the MovieLens datasets.
//!
//! These are the records the recommendation core consumes:
//! - `Rating` is one (user, movie, rating) interaction
//! - `Movie` is one catalog entry, used to resolve ids to display titles
//! - `Dataset` bundles both streams as they come off disk

use serde::{Deserialize, Serialize};

// =============================================================================
// Type Aliases
// =============================================================================

/// Unique identifier for a user
pub type UserId = u32;

/// Unique identifier for a movie
pub type MovieId = u32;

// =============================================================================
// Movie-related Types
// =============================================================================

/// Represents a movie in the catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Movie {
    pub id: MovieId,
    /// Display title, usually with the release year: "Toy Story (1995)"
    pub title: String,
    /// Year extracted from the title, if it carries one
    pub year: Option<u16>,
    pub genres: Vec<Genre>,
}

impl Movie {
    /// Title without the trailing "(year)" suffix
    pub fn name(&self) -> &str {
        split_title_year(&self.title).0
    }
}

/// Movie genres used across the MovieLens releases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Genre {
    Action,
    Adventure,
    Animation,
    Children,
    Comedy,
    Crime,
    Documentary,
    Drama,
    Fantasy,
    FilmNoir,
    Horror,
    Imax,
    Musical,
    Mystery,
    Romance,
    SciFi,
    Thriller,
    War,
    Western,
}

// =============================================================================
// Rating Type
// =============================================================================

/// A single rating from a user for a movie
///
/// Immutable once loaded. The timestamp is carried through for completeness
/// but nothing in the recommendation core reads it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    pub user_id: UserId,
    pub movie_id: MovieId,
    /// Star rating, 0.5 to 5.0 in MovieLens
    pub rating: f32,
    /// Unix timestamp when the rating was made
    pub timestamp: Option<i64>,
}

impl Rating {
    pub fn new(user_id: UserId, movie_id: MovieId, rating: f32) -> Self {
        Self {
            user_id,
            movie_id,
            rating,
            timestamp: None,
        }
    }
}

// =============================================================================
// Dataset
// =============================================================================

/// The two raw record streams: item catalog and interactions.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub movies: Vec<Movie>,
    pub ratings: Vec<Rating>,
}

impl Dataset {
    pub fn new(movies: Vec<Movie>, ratings: Vec<Rating>) -> Self {
        Self { movies, ratings }
    }

    /// (movies, ratings) counts for logging
    pub fn counts(&self) -> (usize, usize) {
        (self.movies.len(), self.ratings.len())
    }
}

/// Split a display title into its name and release year
///
/// Example: "Toy Story (1995)" -> ("Toy Story", Some(1995))
///          "Movie Title"      -> ("Movie Title", None)
pub fn split_title_year(title: &str) -> (&str, Option<u16>) {
    let trimmed = title.trim_end();
    if let Some(rest) = trimmed.strip_suffix(')')
        && let Some(start) = rest.rfind('(')
        && let Ok(year) = rest[start + 1..].trim().parse::<u16>()
    {
        return (rest[..start].trim_end(), Some(year));
    }
    (title, None)
}
