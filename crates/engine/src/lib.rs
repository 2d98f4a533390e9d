//! Similarity engine for item-based movie recommendations.
//!
//! This crate ties the pipeline together: it builds the rating matrix,
//! precomputes item-item cosine similarity, and answers "more like this"
//! queries by exact title.
//!
//! ## Example Usage
//! ```ignore
//! use engine::{EngineConfig, RecommendationEngine};
//!
//! let engine = RecommendationEngine::build(EngineConfig::default(), dataset.ratings, &dataset.movies)?;
//! match engine.recommend("Toy Story (1995)", 5) {
//!     Ok(titles) => println!("{:?}", titles),
//!     Err(e) => println!("{}", e),
//! }
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod similarity;

pub use config::{
    DEFAULT_MIN_ITEM_RATINGS, DEFAULT_MIN_USER_RATINGS, DEFAULT_TOP_N, EngineConfig,
};
pub use engine::{Recommendation, RecommendationEngine};
pub use error::{EngineError, Result};
pub use similarity::{SimilarityMatrix, cosine_similarity};
