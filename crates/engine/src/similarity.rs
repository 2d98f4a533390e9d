//! Item-item cosine similarity.
//!
//! cos(a, b) = a·b / (‖a‖ ‖b‖), taken as 0 when either norm is 0.
//!
//! The dot products come from the sparse Gram matrix `A·Aᵀ`, so the
//! item × user input is never densified. Only the item × item output is
//! dense.

use sprs::CsMat;

/// Dense, symmetric item × item similarity matrix (row-major).
///
/// Rows and columns share the rating matrix's title order.
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityMatrix {
    n: usize,
    data: Vec<f64>,
}

impl SimilarityMatrix {
    /// Number of items (rows == columns)
    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Similarity of items `i` and `j`
    ///
    /// # Panics
    /// If either index is out of bounds.
    pub fn get(&self, i: usize, j: usize) -> f64 {
        assert!(j < self.n, "column {} out of bounds ({} items)", j, self.n);
        self.row(i)[j]
    }

    /// Scores of item `i` against every item, in row order
    ///
    /// # Panics
    /// If `i` is out of bounds.
    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i * self.n..(i + 1) * self.n]
    }
}

/// Sum of squares of every row
pub fn squared_norms(matrix: &CsMat<f64>) -> Vec<f64> {
    matrix
        .outer_iterator()
        .map(|row| row.iter().map(|(_, &v)| v * v).sum())
        .collect()
}

/// Pairwise cosine similarity between all rows of a CSR matrix.
///
/// Computed in f64 throughout. The denominator is `sqrt(|a|² |b|²)`, so two
/// rows with the same values score exactly 1.0 whenever their squared norm
/// and dot product sum the same terms exactly (e.g. half-star ratings).
///
/// The result is exactly symmetric (the upper triangle is mirrored), its
/// diagonal is exactly 1.0 for non-zero rows and 0.0 for zero rows, and
/// every value is clamped to [0, 1].
pub fn cosine_similarity(matrix: &CsMat<f64>) -> SimilarityMatrix {
    let n = matrix.rows();
    let squared = squared_norms(matrix);
    let gram: CsMat<f64> = matrix * &matrix.transpose_view();

    let mut data = vec![0.0f64; n * n];
    for (i, row) in gram.outer_iterator().enumerate() {
        for (j, &dot) in row.iter() {
            if j <= i {
                continue;
            }
            let denom = (squared[i] * squared[j]).sqrt();
            if denom > 0.0 {
                let score = (dot / denom).clamp(0.0, 1.0);
                data[i * n + j] = score;
                data[j * n + i] = score;
            }
        }
    }
    for (i, &norm) in squared.iter().enumerate() {
        if norm > 0.0 {
            data[i * n + i] = 1.0;
        }
    }

    SimilarityMatrix { n, data }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sprs::TriMat;

    fn csr(shape: (usize, usize), cells: &[(usize, usize, f64)]) -> CsMat<f64> {
        let mut triplets = TriMat::new(shape);
        for &(row, col, value) in cells {
            triplets.add_triplet(row, col, value);
        }
        triplets.to_csr()
    }

    #[test]
    fn test_identical_rows() {
        let matrix = csr((2, 3), &[(0, 0, 4.0), (0, 2, 2.0), (1, 0, 4.0), (1, 2, 2.0)]);

        let sim = cosine_similarity(&matrix);

        assert_eq!(sim.get(0, 1), 1.0);
        assert_eq!(sim.get(0, 0), 1.0);
    }

    #[test]
    fn test_identical_half_star_rows_score_exactly_one() {
        let cells: Vec<(usize, usize, f64)> = (0..7)
            .flat_map(|user| {
                let value = 0.5 + 0.5 * user as f64;
                [(0, user, value), (1, user, value)]
            })
            .collect();
        let matrix = csr((2, 7), &cells);

        let sim = cosine_similarity(&matrix);

        assert_eq!(sim.get(0, 1), 1.0);
        assert_eq!(sim.get(1, 0), 1.0);
    }

    #[test]
    fn test_orthogonal_rows() {
        let matrix = csr((2, 2), &[(0, 0, 5.0), (1, 1, 3.0)]);

        let sim = cosine_similarity(&matrix);

        assert_eq!(sim.get(0, 1), 0.0);
        assert_eq!(sim.get(1, 0), 0.0);
    }

    #[test]
    fn test_known_value() {
        // (1, 1) vs (1, 0): cos = 1 / sqrt(2)
        let matrix = csr((2, 2), &[(0, 0, 1.0), (0, 1, 1.0), (1, 0, 1.0)]);

        let sim = cosine_similarity(&matrix);

        assert!((sim.get(0, 1) - std::f64::consts::FRAC_1_SQRT_2).abs() < 1e-12);
    }

    #[test]
    fn test_zero_row_does_not_divide_by_zero() {
        let matrix = csr((3, 2), &[(0, 0, 1.0), (2, 0, 2.0)]);

        let sim = cosine_similarity(&matrix);

        assert_eq!(sim.row(1), &[0.0f64; 3]);
        assert!(sim.row(0).iter().all(|v| v.is_finite()));
        assert_eq!(sim.get(1, 1), 0.0);
    }

    #[test]
    fn test_symmetric_with_unit_diagonal() {
        let matrix = csr(
            (4, 5),
            &[
                (0, 0, 4.0),
                (0, 3, 1.5),
                (1, 0, 2.0),
                (1, 1, 5.0),
                (1, 4, 3.0),
                (2, 2, 0.5),
                (2, 3, 4.5),
                (3, 0, 3.0),
                (3, 4, 2.0),
            ],
        );

        let sim = cosine_similarity(&matrix);

        assert_eq!(sim.len(), 4);
        for i in 0..4 {
            assert_eq!(sim.get(i, i), 1.0);
            for j in 0..4 {
                assert_eq!(sim.get(i, j), sim.get(j, i));
                assert!((0.0..=1.0).contains(&sim.get(i, j)));
            }
        }
    }

    #[test]
    fn test_squared_norms() {
        let matrix = csr((2, 2), &[(0, 0, 3.0), (0, 1, 4.0)]);
        assert_eq!(squared_norms(&matrix), vec![25.0, 0.0]);
    }
}
