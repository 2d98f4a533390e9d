//! Rating matrix construction.
//!
//! Turns filtered interaction records into an item × user matrix:
//! - rows are unique display titles (see [`TitleIndex`])
//! - columns are user ids in ascending order
//! - a cell holds the mean of the ratings that user gave that title
//!
//! Absent cells are zero. Only non-zero cells are stored, in CSR form.

use crate::title_index::TitleIndex;
use data_loader::{Movie, MovieId, Rating, UserId};
use sprs::{CsMat, TriMat};
use std::collections::{BTreeSet, HashMap};
use tracing::{debug, info};

/// Shape and density of a built matrix
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatrixStats {
    pub rows: usize,
    pub cols: usize,
    /// Number of explicitly stored (non-zero) cells
    pub stored: usize,
    /// Ratings dropped because their movie had no catalog entry
    pub orphans: usize,
    /// Fraction of cells that are zero; 0.0 for an empty matrix
    pub sparsity: f64,
}

/// Item × user rating matrix backed by a CSR sparse matrix.
///
/// Immutable once built.
#[derive(Debug, Clone)]
pub struct RatingMatrix {
    titles: TitleIndex,
    users: Vec<UserId>,
    values: CsMat<f64>,
    orphans: usize,
}

impl RatingMatrix {
    /// Row labels
    pub fn titles(&self) -> &TitleIndex {
        &self.titles
    }

    /// Column labels, ascending
    pub fn users(&self) -> &[UserId] {
        &self.users
    }

    /// The sparse values, one row per title
    pub fn values(&self) -> &CsMat<f64> {
        &self.values
    }

    pub fn n_items(&self) -> usize {
        self.titles.len()
    }

    pub fn n_users(&self) -> usize {
        self.users.len()
    }

    /// True when there are no rows or no columns
    pub fn is_empty(&self) -> bool {
        self.n_items() == 0 || self.n_users() == 0
    }

    /// Cell value; zero when the user did not rate the title
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.values.get(row, col).copied().unwrap_or(0.0)
    }

    /// Cell value looked up by labels
    pub fn rating(&self, title: &str, user_id: UserId) -> Option<f64> {
        let row = self.titles.position(title)?;
        let col = self.users.binary_search(&user_id).ok()?;
        Some(self.get(row, col))
    }

    /// Materialise a single row as a dense vector
    pub fn to_dense_row(&self, row: usize) -> Option<Vec<f64>> {
        let view = self.values.outer_view(row)?;
        let mut dense = vec![0.0; self.n_users()];
        for (col, &value) in view.iter() {
            dense[col] = value;
        }
        Some(dense)
    }

    pub fn stats(&self) -> MatrixStats {
        let rows = self.n_items();
        let cols = self.n_users();
        let stored = self.values.nnz();
        let cells = rows * cols;
        let sparsity = if cells == 0 {
            0.0
        } else {
            1.0 - stored as f64 / cells as f64
        };

        MatrixStats {
            rows,
            cols,
            stored,
            orphans: self.orphans,
            sparsity,
        }
    }
}

/// Build the item × user matrix from filtered ratings and the movie catalog.
///
/// ## Algorithm
/// 1. Attach a display title to every rating; ratings of movies missing
///    from the catalog are dropped
/// 2. Group by (title, user) and average, so repeated ratings and movie ids
///    that share a title collapse into one cell
/// 3. Sort titles and users to fix row and column order
/// 4. Assemble triplets and compress to CSR
pub fn build_rating_matrix(ratings: &[Rating], catalog: &[Movie]) -> RatingMatrix {
    let titles_by_id: HashMap<MovieId, &str> = catalog
        .iter()
        .map(|movie| (movie.id, movie.title.as_str()))
        .collect();

    let mut cells: HashMap<(&str, UserId), (f64, u32)> = HashMap::new();
    let mut orphans = 0;
    for rating in ratings {
        match titles_by_id.get(&rating.movie_id) {
            Some(&title) => {
                let cell = cells.entry((title, rating.user_id)).or_insert((0.0, 0));
                cell.0 += f64::from(rating.rating);
                cell.1 += 1;
            }
            None => orphans += 1,
        }
    }
    if orphans > 0 {
        debug!("Dropped {} ratings with no catalog entry", orphans);
    }

    let title_set: BTreeSet<&str> = cells.keys().map(|&(title, _)| title).collect();
    let users: Vec<UserId> = cells
        .keys()
        .map(|&(_, user_id)| user_id)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let title_rows: HashMap<&str, usize> = title_set
        .iter()
        .enumerate()
        .map(|(row, &title)| (title, row))
        .collect();
    let user_cols: HashMap<UserId, usize> = users
        .iter()
        .enumerate()
        .map(|(col, &user_id)| (user_id, col))
        .collect();

    let mut triplets = TriMat::with_capacity((title_set.len(), users.len()), cells.len());
    for (&(title, user_id), &(sum, count)) in &cells {
        let mean = sum / f64::from(count);
        // A zero rating is indistinguishable from "not rated"
        if mean != 0.0 {
            triplets.add_triplet(title_rows[title], user_cols[&user_id], mean);
        }
    }
    let values: CsMat<f64> = triplets.to_csr();

    let matrix = RatingMatrix {
        titles: TitleIndex::new(title_set.into_iter().map(str::to_string)),
        users,
        values,
        orphans,
    };

    let stats = matrix.stats();
    info!(
        "[matrix] shape=({}, {}) stored_elements={} sparsity={:.2}%",
        stats.rows,
        stats.cols,
        stats.stored,
        stats.sparsity * 100.0
    );

    matrix
}
