//! Error types for the recommendation engine.

use thiserror::Error;

/// Errors surfaced by engine construction and queries
///
/// `NotFound` is a per-query result the caller is expected to render;
/// `EmptyCatalog` only comes out of construction and means there is
/// nothing to serve.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// The queried title has no exact match in the title index
    #[error("'{title}' was not found in the catalog")]
    NotFound { title: String },

    /// Filtering left no items or no users to compare
    #[error("rating matrix is empty after filtering ({items} items x {users} users)")]
    EmptyCatalog { items: usize, users: usize },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, EngineError>;
