//! Filter implementations for the interaction pipeline.
//!
//! This module contains the concrete filters that can be composed
//! into a FilterPipeline.

pub mod min_item_ratings;
pub mod min_user_ratings;

// Re-export for convenience
pub use min_item_ratings::MinItemRatingsFilter;
pub use min_user_ratings::MinUserRatingsFilter;

use data_loader::Rating;
use std::collections::HashMap;
use std::hash::Hash;

/// Count ratings per key in a single sequential pass.
pub(crate) fn count_by<K, F>(ratings: &[Rating], key: F) -> HashMap<K, usize>
where
    K: Eq + Hash,
    F: Fn(&Rating) -> K,
{
    let mut counts = HashMap::new();
    for rating in ratings {
        *counts.entry(key(rating)).or_insert(0) += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_by_movie() {
        let ratings = vec![
            Rating::new(1, 10, 4.0),
            Rating::new(2, 10, 3.0),
            Rating::new(3, 20, 5.0),
        ];

        let counts = count_by(&ratings, |r| r.movie_id);

        assert_eq!(counts.len(), 2);
        assert_eq!(counts[&10], 2);
        assert_eq!(counts[&20], 1);
    }

    #[test]
    fn test_count_by_user_on_empty_input() {
        let counts = count_by(&[], |r: &Rating| r.user_id);
        assert!(counts.is_empty());
    }
}
