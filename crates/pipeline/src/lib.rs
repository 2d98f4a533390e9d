//! Pipeline from raw ratings to the item × user rating matrix.
//!
//! This crate provides:
//! - Filter trait and implementations for interaction filtering
//! - FilterPipeline for composing filters
//! - The rating matrix builder and the title index it produces
//!
//! ## Architecture
//! The pipeline runs once, before any query is served:
//! 1. Filters remove cold-start movies, then casual users
//! 2. The builder pivots the survivors into a sparse matrix keyed by title
//! 3. The matrix is handed to the similarity engine
//!
//! ## Example Usage
//! ```ignore
//! use pipeline::{build_rating_matrix, FilterPipeline};
//!
//! let filtered = FilterPipeline::interaction_filter(50, 10).apply(dataset.ratings);
//! let matrix = build_rating_matrix(&filtered, &dataset.movies);
//! ```

pub mod filter_pipeline;
pub mod filters;
pub mod matrix;
pub mod title_index;
pub mod traits;

/// Movies need strictly more ratings than this to be kept
pub const DEFAULT_MIN_ITEM_RATINGS: usize = 50;

/// Users need strictly more ratings than this (after item filtering) to be kept
pub const DEFAULT_MIN_USER_RATINGS: usize = 10;

// Re-export main types
pub use filter_pipeline::{FilterPipeline, FilterSummary};
pub use matrix::{MatrixStats, RatingMatrix, build_rating_matrix};
pub use title_index::TitleIndex;
pub use traits::Filter;
