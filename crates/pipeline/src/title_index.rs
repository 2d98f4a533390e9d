//! Row labels shared by the rating matrix and the similarity matrix.

use std::collections::HashMap;

/// Ordered bijection between row position and display title.
///
/// Titles are kept in ascending lexicographic order. The order never changes
/// after construction; it is the only way a title query is turned into a
/// matrix row.
#[derive(Debug, Clone, Default)]
pub struct TitleIndex {
    titles: Vec<String>,
    positions: HashMap<String, usize>,
}

impl TitleIndex {
    /// Build an index from any collection of titles; duplicates collapse.
    pub fn new(titles: impl IntoIterator<Item = String>) -> Self {
        let mut titles: Vec<String> = titles.into_iter().collect();
        titles.sort();
        titles.dedup();

        let positions = titles
            .iter()
            .enumerate()
            .map(|(row, title)| (title.clone(), row))
            .collect();

        Self { titles, positions }
    }

    /// Row of `title`, exact and case-sensitive
    pub fn position(&self, title: &str) -> Option<usize> {
        self.positions.get(title).copied()
    }

    /// Title stored at `row`
    pub fn title(&self, row: usize) -> Option<&str> {
        self.titles.get(row).map(String::as_str)
    }

    pub fn contains(&self, title: &str) -> bool {
        self.positions.contains_key(title)
    }

    pub fn len(&self) -> usize {
        self.titles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }

    /// Titles in row order
    pub fn as_slice(&self) -> &[String] {
        &self.titles
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.titles.iter().map(String::as_str)
    }
}
