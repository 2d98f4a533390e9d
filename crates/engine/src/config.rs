//! Engine configuration.

pub use pipeline::{DEFAULT_MIN_ITEM_RATINGS, DEFAULT_MIN_USER_RATINGS};

/// Number of recommendations returned when the caller does not ask for a count
pub const DEFAULT_TOP_N: usize = 5;

/// Thresholds and defaults an engine instance is built with.
///
/// Each engine owns its own copy, so differently configured engines can
/// live side by side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Movies need strictly more ratings than this to be kept (default 50)
    pub min_item_ratings: usize,
    /// Users need strictly more ratings than this, counted after the item
    /// pass (default 10)
    pub min_user_ratings: usize,
    /// Default recommendation count (default 5)
    pub top_n: usize,
}

impl EngineConfig {
    pub fn with_min_item_ratings(mut self, min: usize) -> Self {
        self.min_item_ratings = min;
        self
    }

    pub fn with_min_user_ratings(mut self, min: usize) -> Self {
        self.min_user_ratings = min;
        self
    }

    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            min_item_ratings: DEFAULT_MIN_ITEM_RATINGS,
            min_user_ratings: DEFAULT_MIN_USER_RATINGS,
            top_n: DEFAULT_TOP_N,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.min_item_ratings, 50);
        assert_eq!(config.min_user_ratings, 10);
        assert_eq!(config.top_n, 5);
    }

    #[test]
    fn test_builder() {
        let config = EngineConfig::default()
            .with_min_item_ratings(0)
            .with_min_user_ratings(1)
            .with_top_n(10);
        assert_eq!(
            config,
            EngineConfig {
                min_item_ratings: 0,
                min_user_ratings: 1,
                top_n: 10
            }
        );
    }
}
