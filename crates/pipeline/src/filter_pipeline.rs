//! The FilterPipeline orchestrates multiple filters.
//!
//! This module provides the main FilterPipeline struct that chains
//! multiple filters together using the builder pattern.

use crate::filters::{MinItemRatingsFilter, MinUserRatingsFilter};
use crate::traits::Filter;
use data_loader::Rating;
use std::collections::HashSet;
use tracing::{debug, info};

/// Size of a rating set after filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterSummary {
    pub ratings: usize,
    pub unique_movies: usize,
    pub unique_users: usize,
}

impl FilterSummary {
    pub fn of(ratings: &[Rating]) -> Self {
        let movies: HashSet<_> = ratings.iter().map(|r| r.movie_id).collect();
        let users: HashSet<_> = ratings.iter().map(|r| r.user_id).collect();
        Self {
            ratings: ratings.len(),
            unique_movies: movies.len(),
            unique_users: users.len(),
        }
    }
}

/// Chains multiple filters together into a processing pipeline.
///
/// ## Usage
/// ```ignore
/// let pipeline = FilterPipeline::new()
///     .add_filter(MinItemRatingsFilter::new(50))
///     .add_filter(MinUserRatingsFilter::new(10));
///
/// let filtered = pipeline.apply(ratings);
/// ```
pub struct FilterPipeline {
    filters: Vec<Box<dyn Filter>>,
}

impl FilterPipeline {
    /// Create a new empty FilterPipeline.
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
        }
    }

    /// The standard interaction filter: drop cold-start items, then casual users.
    ///
    /// Each pass runs exactly once, in this order. The user pass counts
    /// ratings in the item-filtered set, and dropping users afterwards can
    /// leave an item at or below the item threshold again. The passes are
    /// not repeated until stable.
    pub fn interaction_filter(min_item_ratings: usize, min_user_ratings: usize) -> Self {
        Self::new()
            .add_filter(MinItemRatingsFilter::new(min_item_ratings))
            .add_filter(MinUserRatingsFilter::new(min_user_ratings))
    }

    /// Add a filter to the pipeline (builder pattern).
    pub fn add_filter(mut self, filter: impl Filter + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    /// Number of stages in the pipeline
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Apply all filters in sequence to the ratings.
    ///
    /// Each filter sees the output of the previous one.
    pub fn apply(&self, ratings: Vec<Rating>) -> Vec<Rating> {
        let input_count = ratings.len();
        let mut current = ratings;
        for filter in &self.filters {
            debug!(
                "Applying filter: {} (input count: {})",
                filter.name(),
                current.len()
            );
            current = filter.apply(current);
            debug!(
                "Filter applied: {} (output count: {})",
                filter.name(),
                current.len()
            );
        }
        let summary = FilterSummary::of(&current);
        info!(
            "[filtered] ratings={} unique_movies={} unique_users={} (dropped {})",
            summary.ratings,
            summary.unique_movies,
            summary.unique_users,
            input_count - summary.ratings
        );
        current
    }
}

impl Default for FilterPipeline {
    fn default() -> Self {
        Self::new()
    }
}
