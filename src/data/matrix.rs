// matrix.rs - Identifier-indexed symmetric distance matrix

use crate::error::SummaryError;
use std::collections::HashMap;

/// Absolute tolerance used when checking symmetry, scaled by magnitude
const SYMMETRY_TOLERANCE: f64 = 1e-9;

/// Square, symmetric, non-negative matrix of pairwise distances.
///
/// The only way to obtain one is [`DistanceMatrix::from_rows`], so every value
/// of this type already satisfies the structural checks the summarizer relies on.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    labels: Vec<String>,
    index: HashMap<String, usize>,
    values: Vec<f64>,
}

impl DistanceMatrix {
    /// Build a matrix from row labels and full rows (row `i` belongs to `labels[i]`)
    pub fn from_rows(labels: Vec<String>, rows: Vec<Vec<f64>>) -> Result<Self, SummaryError> {
        let n = labels.len();
        if n == 0 {
            return Err(SummaryError::matrix("matrix has no identifiers"));
        }
        if rows.len() != n {
            return Err(SummaryError::matrix(format!(
                "matrix is not square: {} labels but {} rows",
                n,
                rows.len()
            )));
        }

        let mut index = HashMap::with_capacity(n);
        for (i, label) in labels.iter().enumerate() {
            if label.is_empty() {
                return Err(SummaryError::matrix(format!("empty identifier at position {}", i + 1)));
            }
            if index.insert(label.clone(), i).is_some() {
                return Err(SummaryError::matrix(format!("duplicate identifier '{}'", label)));
            }
        }

        let mut values = Vec::with_capacity(n * n);
        for (label, row) in labels.iter().zip(rows) {
            if row.len() != n {
                return Err(SummaryError::matrix(format!(
                    "matrix is not square: row '{}' has {} values, expected {}",
                    label,
                    row.len(),
                    n
                )));
            }
            for (j, value) in row.iter().enumerate() {
                if !value.is_finite() || *value < 0.0 {
                    return Err(SummaryError::matrix(format!(
                        "distance between '{}' and '{}' must be a finite non-negative number, got {}",
                        label, labels[j], value
                    )));
                }
            }
            values.extend(row);
        }

        for i in 0..n {
            for j in (i + 1)..n {
                let a = values[i * n + j];
                let b = values[j * n + i];
                let scale = a.abs().max(b.abs()).max(1.0);
                if (a - b).abs() > SYMMETRY_TOLERANCE * scale {
                    return Err(SummaryError::matrix(format!(
                        "matrix is not symmetric: d({}, {}) = {} but d({}, {}) = {}",
                        labels[i], labels[j], a, labels[j], labels[i], b
                    )));
                }
            }
        }

        Ok(Self {
            labels,
            index,
            values,
        })
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Identifiers in row/column order
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Distance by position; panics if either index is out of bounds
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.values[i * self.labels.len() + j]
    }

    /// Distance by identifier
    pub fn distance(&self, a: &str, b: &str) -> Option<f64> {
        Some(self.get(self.index_of(a)?, self.index_of(b)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{InputKind, SummaryError};

    fn labels(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    fn assert_matrix_error(result: Result<DistanceMatrix, SummaryError>, needle: &str) {
        match result {
            Err(SummaryError::InvalidInputKind { kind, reason }) => {
                assert_eq!(kind, InputKind::DistanceMatrix);
                assert!(reason.contains(needle), "unexpected reason: {}", reason);
            }
            other => panic!("expected InvalidInputKind, got {:?}", other),
        }
    }

    #[test]
    fn test_lookup_by_identifier() {
        let m = DistanceMatrix::from_rows(
            labels(&["a", "b", "c"]),
            vec![
                vec![0.0, 1.0, 2.0],
                vec![1.0, 0.0, 4.0],
                vec![2.0, 4.0, 0.0],
            ],
        )
        .unwrap();

        assert_eq!(m.len(), 3);
        assert_eq!(m.index_of("c"), Some(2));
        assert_eq!(m.distance("b", "c"), Some(4.0));
        assert_eq!(m.distance("c", "a"), Some(2.0));
        assert_eq!(m.distance("a", "z"), None);
        assert!(!m.contains("z"));
    }

    #[test]
    fn test_rejects_non_square() {
        assert_matrix_error(
            DistanceMatrix::from_rows(labels(&["a", "b"]), vec![vec![0.0, 1.0]]),
            "not square",
        );
        assert_matrix_error(
            DistanceMatrix::from_rows(labels(&["a", "b"]), vec![vec![0.0, 1.0], vec![1.0]]),
            "row 'b'",
        );
    }

    #[test]
    fn test_rejects_asymmetric_and_negative() {
        assert_matrix_error(
            DistanceMatrix::from_rows(labels(&["a", "b"]), vec![vec![0.0, 1.0], vec![2.0, 0.0]]),
            "not symmetric",
        );
        assert_matrix_error(
            DistanceMatrix::from_rows(labels(&["a", "b"]), vec![vec![0.0, -1.0], vec![-1.0, 0.0]]),
            "non-negative",
        );
        assert_matrix_error(
            DistanceMatrix::from_rows(labels(&["a"]), vec![vec![f64::NAN]]),
            "finite",
        );
    }

    #[test]
    fn test_tolerates_rounding_asymmetry() {
        let m = DistanceMatrix::from_rows(
            labels(&["a", "b"]),
            vec![vec![0.0, 0.1 + 0.2], vec![0.3, 0.0]],
        );
        assert!(m.is_ok());
    }

    #[test]
    fn test_rejects_duplicate_and_empty_labels() {
        assert_matrix_error(
            DistanceMatrix::from_rows(labels(&["a", "a"]), vec![vec![0.0, 0.0], vec![0.0, 0.0]]),
            "duplicate identifier 'a'",
        );
        assert_matrix_error(DistanceMatrix::from_rows(Vec::new(), Vec::new()), "no identifiers");
        assert_matrix_error(
            DistanceMatrix::from_rows(labels(&[""]), vec![vec![0.0]]),
            "empty identifier",
        );
    }
}
