//! # Data Loader Crate
//!
//! Loads MovieLens catalog and rating files into typed in-memory records.
//! This is the ingestion side of the recommender: it owns file formats and
//! field validation so the recommendation core can assume well-typed input.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (Movie, Rating, Dataset)
//! - **parser**: Parse .csv and .dat files into Rust structs
//! - **loader**: Detect the layout of a data directory and load it
//! - **error**: Error types for data loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::Dataset;
//! use std::path::Path;
//!
//! let dataset = Dataset::load_from_dir(Path::new("data"))?;
//! let (movies, ratings) = dataset.counts();
//! println!("{} movies, {} ratings", movies, ratings);
//! ```

pub mod error;
pub mod loader;
pub mod parser;
pub mod types;

// Re-export commonly used types for convenience
pub use error::{DataLoadError, Result};
pub use loader::DataFormat;
pub use types::{
    // Type aliases
    MovieId,
    UserId,
    // Core types
    Dataset,
    Genre,
    Movie,
    Rating,
    // Helpers
    split_title_year,
};
