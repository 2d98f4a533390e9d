//! Filter that drops cold-start movies.
//!
//! A movie with only a handful of ratings produces similarity scores that
//! are mostly noise, so its ratings are removed before the matrix is built.

use super::count_by;
use crate::traits::Filter;
use data_loader::Rating;

/// Keeps ratings of movies rated strictly more than `min_count` times.
///
/// ## Algorithm
/// 1. Count ratings per movie in the input
/// 2. Keep a rating only if its movie's count is `> min_count`
pub struct MinItemRatingsFilter {
    min_count: usize,
}

impl MinItemRatingsFilter {
    /// Create a new MinItemRatingsFilter.
    ///
    /// # Arguments
    /// * `min_count` - Movies need more than this many ratings (typically 50)
    pub fn new(min_count: usize) -> Self {
        Self { min_count }
    }
}

impl Filter for MinItemRatingsFilter {
    fn name(&self) -> &str {
        "MinItemRatingsFilter"
    }

    fn apply(&self, ratings: Vec<Rating>) -> Vec<Rating> {
        let counts = count_by(&ratings, |r| r.movie_id);

        ratings
            .into_iter()
            .filter(|rating| counts.get(&rating.movie_id).copied().unwrap_or(0) > self.min_count)
            .collect()
    }
}
