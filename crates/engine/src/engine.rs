//! # Recommendation Engine
//!
//! Owns everything built at startup and answers queries against it:
//! 1. Filter raw ratings (cold-start movies, then casual users)
//! 2. Pivot the survivors into the sparse item × user matrix
//! 3. Precompute all-pairs cosine similarity
//! 4. Serve `recommend` / `list_titles` as read-only lookups
//!
//! Nothing is mutated after construction, so one engine can be shared by
//! reference (or `Arc`) between any number of concurrent callers. A refresh
//! means building a new engine and swapping it in.

use std::time::Instant;

use serde::Serialize;
use tracing::{debug, info, instrument};

use data_loader::{Movie, Rating};
use pipeline::{FilterPipeline, MatrixStats, RatingMatrix, build_rating_matrix};

use crate::config::EngineConfig;
use crate::error::{EngineError, Result};
use crate::similarity::{SimilarityMatrix, cosine_similarity};

/// One ranked recommendation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub title: String,
    /// Cosine similarity to the queried title, in [0, 1]
    pub score: f64,
}

/// Item-based collaborative filtering engine
#[derive(Debug, Clone)]
pub struct RecommendationEngine {
    config: EngineConfig,
    matrix: RatingMatrix,
    similarity: SimilarityMatrix,
}

impl RecommendationEngine {
    /// Run the whole pipeline over raw ratings and the movie catalog
    ///
    /// # Errors
    /// `EmptyCatalog` when filtering leaves nothing to compare.
    #[instrument(skip_all, fields(ratings = ratings.len(), movies = catalog.len()))]
    pub fn build(config: EngineConfig, ratings: Vec<Rating>, catalog: &[Movie]) -> Result<Self> {
        let start_time = Instant::now();

        let filtered =
            FilterPipeline::interaction_filter(config.min_item_ratings, config.min_user_ratings)
                .apply(ratings);
        let matrix = build_rating_matrix(&filtered, catalog);
        let engine = Self::from_matrix(config, matrix)?;

        info!(
            "Recommendation engine ready: {} titles in {:.2?}",
            engine.len(),
            start_time.elapsed()
        );
        Ok(engine)
    }

    /// Precompute similarity for an already built rating matrix
    ///
    /// # Errors
    /// `EmptyCatalog` when the matrix has no rows or no columns.
    pub fn from_matrix(config: EngineConfig, matrix: RatingMatrix) -> Result<Self> {
        if matrix.is_empty() {
            return Err(EngineError::EmptyCatalog {
                items: matrix.n_items(),
                users: matrix.n_users(),
            });
        }

        let start_time = Instant::now();
        let similarity = cosine_similarity(matrix.values());
        debug!(
            "Computed {}x{} similarity matrix in {:.2?}",
            similarity.len(),
            similarity.len(),
            start_time.elapsed()
        );

        Ok(Self {
            config,
            matrix,
            similarity,
        })
    }

    /// Titles most similar to `title`, best first
    ///
    /// The queried title is never part of the result. Fewer than `top_n`
    /// titles come back only when the catalog has fewer other titles.
    ///
    /// # Errors
    /// `NotFound` when `title` is not an exact, case-sensitive match.
    pub fn recommend(&self, title: &str, top_n: usize) -> Result<Vec<String>> {
        Ok(self
            .recommend_scored(title, top_n)?
            .into_iter()
            .map(|rec| rec.title)
            .collect())
    }

    /// `recommend` with the configured default count
    pub fn recommend_default(&self, title: &str) -> Result<Vec<String>> {
        self.recommend(title, self.config.top_n)
    }

    /// Same ranking as `recommend`, with the similarity score attached
    pub fn recommend_scored(&self, title: &str, top_n: usize) -> Result<Vec<Recommendation>> {
        let row = self.position(title)?;
        let titles = self.matrix.titles().as_slice();

        let mut ranked: Vec<(usize, f64)> = self
            .similarity
            .row(row)
            .iter()
            .copied()
            .enumerate()
            .filter(|&(other, _)| other != row)
            .collect();
        // Stable: equal scores stay in row order
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
        ranked.truncate(top_n);

        Ok(ranked
            .into_iter()
            .map(|(other, score)| Recommendation {
                title: titles[other].clone(),
                score,
            })
            .collect())
    }

    /// Similarity score between two titles
    pub fn similarity_between(&self, a: &str, b: &str) -> Result<f64> {
        Ok(self.similarity.get(self.position(a)?, self.position(b)?))
    }

    /// Every title the engine can answer for, ascending
    pub fn list_titles(&self) -> Vec<String> {
        let mut titles = self.matrix.titles().as_slice().to_vec();
        titles.sort();
        titles
    }

    pub fn contains(&self, title: &str) -> bool {
        self.matrix.titles().contains(title)
    }

    /// Number of titles
    pub fn len(&self) -> usize {
        self.matrix.n_items()
    }

    /// False for any engine that constructed successfully
    pub fn is_empty(&self) -> bool {
        self.matrix.n_items() == 0
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn matrix(&self) -> &RatingMatrix {
        &self.matrix
    }

    pub fn similarity(&self) -> &SimilarityMatrix {
        &self.similarity
    }

    pub fn stats(&self) -> MatrixStats {
        self.matrix.stats()
    }

    fn position(&self, title: &str) -> Result<usize> {
        self.matrix
            .titles()
            .position(title)
            .ok_or_else(|| EngineError::NotFound {
                title: title.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_engine_is_shareable() {
        assert_send_sync::<RecommendationEngine>();
    }

    #[test]
    fn test_empty_matrix_rejected() {
        let matrix = build_rating_matrix(&[], &[]);

        let err = RecommendationEngine::from_matrix(EngineConfig::default(), matrix).unwrap_err();

        assert_eq!(err, EngineError::EmptyCatalog { items: 0, users: 0 });
    }

    #[test]
    fn test_recommendation_serializes() {
        let rec = Recommendation {
            title: "Heat (1995)".to_string(),
            score: 0.5,
        };

        let json = serde_json::to_string(&rec).unwrap();

        assert_eq!(json, r#"{"title":"Heat (1995)","score":0.5}"#);
    }
}
