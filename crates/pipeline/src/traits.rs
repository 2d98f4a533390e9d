//! Core traits for the interaction filtering pipeline.
//!
//! This module defines the Filter trait that allows composable,
//! extensible filters to be applied to interaction records.

use data_loader::Rating;

/// Core trait for filtering interaction records.
///
/// All filters must implement this trait to be used in the FilterPipeline.
///
/// ## Design Note
/// - `Send + Sync` allows a built pipeline to be shared across threads
/// - Filters take ownership of the Vec<Rating> and return a filtered Vec
/// - Filtering never fails; an empty output is a valid result
pub trait Filter: Send + Sync {
    /// Returns the name of this filter (for logging/debugging)
    fn name(&self) -> &str;

    /// Apply this filter to a set of ratings.
    ///
    /// Surviving ratings keep their relative order.
    fn apply(&self, ratings: Vec<Rating>) -> Vec<Rating>;
}
