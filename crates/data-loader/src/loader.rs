//! Dataset loading.
//!
//! Picks the on-disk layout present in a directory and parses the catalog
//! and the interaction records side by side.

use crate::error::{DataLoadError, Result};
use crate::parser;
use crate::types::*;
use std::path::Path;
use tracing::info;

/// On-disk layout of a MovieLens release
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataFormat {
    /// movies.csv + ratings.csv (MovieLens small / latest)
    Csv,
    /// movies.dat + ratings.dat (MovieLens 1M)
    Dat,
}

impl DataFormat {
    /// Detect the layout used in `data_dir`
    ///
    /// CSV wins when both are present.
    pub fn detect(data_dir: &Path) -> Result<Self> {
        if data_dir.join("ratings.csv").exists() {
            Ok(DataFormat::Csv)
        } else if data_dir.join("ratings.dat").exists() {
            Ok(DataFormat::Dat)
        } else {
            Err(DataLoadError::FileNotFound {
                path: data_dir.join("ratings.csv").display().to_string(),
            })
        }
    }
}

impl Dataset {
    /// Load the catalog and ratings from a MovieLens directory
    ///
    /// Both files are parsed in parallel with `rayon::join`.
    pub fn load_from_dir(data_dir: &Path) -> Result<Self> {
        let format = DataFormat::detect(data_dir)?;
        info!("Loading MovieLens dataset from {:?} ({:?} layout)", data_dir, format);

        let (movies, ratings) = match format {
            DataFormat::Csv => {
                let movies_path = data_dir.join("movies.csv");
                let ratings_path = data_dir.join("ratings.csv");
                rayon::join(
                    || parser::parse_movies_csv(&movies_path),
                    || parser::parse_ratings_csv(&ratings_path),
                )
            }
            DataFormat::Dat => {
                let movies_path = data_dir.join("movies.dat");
                let ratings_path = data_dir.join("ratings.dat");
                rayon::join(
                    || parser::parse_movies_dat(&movies_path),
                    || parser::parse_ratings_dat(&ratings_path),
                )
            }
        };

        let dataset = Dataset::new(movies?, ratings?);
        let (movie_count, rating_count) = dataset.counts();
        info!("[raw] movies={} ratings={}", movie_count, rating_count);

        Ok(dataset)
    }
}
