//! Filter that drops casual raters.
//!
//! Users with very few ratings contribute mostly noise to item-item
//! similarity.

use super::count_by;
use crate::traits::Filter;
use data_loader::Rating;

/// Keeps ratings of users who rated strictly more than `min_count` movies
/// in the filter's input.
pub struct MinUserRatingsFilter {
    min_count: usize,
}

impl MinUserRatingsFilter {
    /// Create a new MinUserRatingsFilter.
    ///
    /// # Arguments
    /// * `min_count` - Users need more than this many ratings (typically 10)
    pub fn new(min_count: usize) -> Self {
        Self { min_count }
    }
}

impl Filter for MinUserRatingsFilter {
    fn name(&self) -> &str {
        "MinUserRatingsFilter"
    }

    fn apply(&self, ratings: Vec<Rating>) -> Vec<Rating> {
        let counts = count_by(&ratings, |r| r.user_id);

        ratings
            .into_iter()
            .filter(|rating| counts.get(&rating.user_id).copied().unwrap_or(0) > self.min_count)
            .collect()
    }
}
