use std::collections::HashMap;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MatrixError {
    #[error("Duplicate sequence label in annealing matrix: {0}")]
    DuplicateLabel(String),

    #[error("Annealing matrix is not square: {labels} labels but row {row} has {found} values")]
    NotSquare {
        labels: usize,
        row: usize,
        found: usize,
    },

    #[error("Annealing matrix has {labels} labels but {rows} rows")]
    RowCountMismatch { labels: usize, rows: usize },

    #[error("Sequence not present in annealing matrix: {0}")]
    MissingLabel(String),
}

/// Square table of observed ligation counts between pairs of overhang sequences.
///
/// Stored densely in row-major order with a sequence -> index lookup, so a
/// cell lookup costs two hash lookups and one array access.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnealingMatrix {
    labels: Vec<String>,
    index: HashMap<String, usize>,
    counts: Vec<u32>,
}

impl AnnealingMatrix {
    /// Create a zero-filled matrix over the given sequences
    ///
    /// # Errors
    ///
    /// Returns `MatrixError::DuplicateLabel` if a sequence appears twice.
    pub fn with_labels(labels: Vec<String>) -> Result<Self, MatrixError> {
        let index = build_index(&labels)?;
        let counts = vec![0; labels.len() * labels.len()];
        Ok(Self {
            labels,
            index,
            counts,
        })
    }

    /// Create a matrix from labels and one row of counts per label
    ///
    /// # Errors
    ///
    /// Returns `MatrixError::DuplicateLabel` for repeated labels, or
    /// `MatrixError::RowCountMismatch` / `MatrixError::NotSquare` if the rows
    /// do not form a square table.
    pub fn from_rows(labels: Vec<String>, rows: Vec<Vec<u32>>) -> Result<Self, MatrixError> {
        if rows.len() != labels.len() {
            return Err(MatrixError::RowCountMismatch {
                labels: labels.len(),
                rows: rows.len(),
            });
        }

        let index = build_index(&labels)?;
        let mut counts = Vec::with_capacity(labels.len() * labels.len());
        for (row, values) in rows.into_iter().enumerate() {
            if values.len() != labels.len() {
                return Err(MatrixError::NotSquare {
                    labels: labels.len(),
                    row,
                    found: values.len(),
                });
            }
            counts.extend(values);
        }

        Ok(Self {
            labels,
            index,
            counts,
        })
    }

    /// Set the count for a pair of sequences in both orientations.
    ///
    /// Returns false if either sequence is not in the matrix.
    pub fn set(&mut self, a: &str, b: &str, count: u32) -> bool {
        let (Some(&i), Some(&j)) = (self.index.get(a), self.index.get(b)) else {
            return false;
        };
        let n = self.labels.len();
        self.counts[i * n + j] = count;
        self.counts[j * n + i] = count;
        true
    }

    /// Count for the cell (row `a`, column `b`)
    #[must_use]
    pub fn get(&self, a: &str, b: &str) -> Option<u32> {
        let i = *self.index.get(a)?;
        let j = *self.index.get(b)?;
        Some(self.counts[i * self.labels.len() + j])
    }

    #[must_use]
    pub fn contains(&self, seq: &str) -> bool {
        self.index.contains_key(seq)
    }

    #[must_use]
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Number of sequences (rows) in the matrix
    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Length of the sequences in the matrix, if they are uniform
    #[must_use]
    pub fn sequence_length(&self) -> Option<usize> {
        let first = self.labels.first()?.len();
        self.labels
            .iter()
            .all(|l| l.len() == first)
            .then_some(first)
    }

    #[must_use]
    pub fn is_symmetric(&self) -> bool {
        let n = self.labels.len();
        (0..n).all(|i| (i + 1..n).all(|j| self.counts[i * n + j] == self.counts[j * n + i]))
    }

    /// Sub-matrix spanning only the given sequences, in the order given.
    ///
    /// Repeated sequences are kept once.
    ///
    /// # Errors
    ///
    /// Returns `MatrixError::MissingLabel` for the first sequence not in the matrix.
    pub fn restrict_to<'a, I>(&self, sequences: I) -> Result<Self, MatrixError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut labels: Vec<String> = Vec::new();
        let mut source: Vec<usize> = Vec::new();
        for seq in sequences {
            let &idx = self
                .index
                .get(seq)
                .ok_or_else(|| MatrixError::MissingLabel(seq.to_string()))?;
            if !source.contains(&idx) {
                labels.push(seq.to_string());
                source.push(idx);
            }
        }

        let n = self.labels.len();
        let rows = source
            .iter()
            .map(|&i| source.iter().map(|&j| self.counts[i * n + j]).collect())
            .collect();
        Self::from_rows(labels, rows)
    }
}

fn build_index(labels: &[String]) -> Result<HashMap<String, usize>, MatrixError> {
    let mut index = HashMap::with_capacity(labels.len());
    for (i, label) in labels.iter().enumerate() {
        if index.insert(label.clone(), i).is_some() {
            return Err(MatrixError::DuplicateLabel(label.clone()));
        }
    }
    Ok(index)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(seqs: &[&str]) -> Vec<String> {
        seqs.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_set_and_get_symmetric() {
        let mut matrix = AnnealingMatrix::with_labels(labels(&["AAAA", "TTTT", "ACGT"])).unwrap();
        assert!(matrix.set("AAAA", "TTTT", 1200));
        assert_eq!(matrix.get("AAAA", "TTTT"), Some(1200));
        assert_eq!(matrix.get("TTTT", "AAAA"), Some(1200));
        assert_eq!(matrix.get("ACGT", "ACGT"), Some(0));
        assert_eq!(matrix.get("AAAA", "GGGG"), None);
        assert!(!matrix.set("GGGG", "CCCC", 1));
        assert!(matrix.is_symmetric());
        assert_eq!(matrix.sequence_length(), Some(4));
    }

    #[test]
    fn test_duplicate_label() {
        let result = AnnealingMatrix::with_labels(labels(&["AAAA", "AAAA"]));
        assert_eq!(result, Err(MatrixError::DuplicateLabel("AAAA".to_string())));
    }

    #[test]
    fn test_from_rows_not_square() {
        let result = AnnealingMatrix::from_rows(labels(&["A", "T"]), vec![vec![0, 1], vec![1]]);
        assert!(matches!(result, Err(MatrixError::NotSquare { row: 1, .. })));

        let result = AnnealingMatrix::from_rows(labels(&["A", "T"]), vec![vec![0, 1]]);
        assert!(matches!(result, Err(MatrixError::RowCountMismatch { .. })));
    }

    #[test]
    fn test_asymmetric_detected() {
        let matrix =
            AnnealingMatrix::from_rows(labels(&["A", "T"]), vec![vec![0, 5], vec![4, 0]]).unwrap();
        assert!(!matrix.is_symmetric());
    }

    #[test]
    fn test_restrict_to() {
        let mut matrix =
            AnnealingMatrix::with_labels(labels(&["AAAA", "TTTT", "ACGT", "CCTA", "TAGG"]))
                .unwrap();
        matrix.set("CCTA", "TAGG", 900);
        matrix.set("AAAA", "CCTA", 7);

        let subset = matrix.restrict_to(["TAGG", "CCTA", "AAAA", "TAGG"]).unwrap();
        assert_eq!(subset.labels(), &labels(&["TAGG", "CCTA", "AAAA"])[..]);
        assert_eq!(subset.get("CCTA", "TAGG"), Some(900));
        assert_eq!(subset.get("CCTA", "AAAA"), Some(7));
        assert!(!subset.contains("ACGT"));

        let missing = matrix.restrict_to(["GGGG"]);
        assert_eq!(missing, Err(MatrixError::MissingLabel("GGGG".to_string())));
    }
}
