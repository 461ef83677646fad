//! Parser for annealing matrix tables.
//!
//! The expected layout is a square table with a header row of column
//! sequences followed by one row per sequence:
//!
//! ```text
//! ,AAAA,AAAC,...
//! AAAA,0,3,...
//! AAAC,3,0,...
//! ```
//!
//! Comma and tab delimiters are detected from the header line. Files ending in
//! `.gz` or `.bgz` are decompressed transparently.

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use flate2::read::GzDecoder;
use thiserror::Error;
use tracing::warn;

use crate::annealing::matrix::{AnnealingMatrix, MatrixError};
use crate::core::sequence::{self, SequenceError};

#[derive(Error, Debug)]
pub enum MatrixParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid annealing matrix format: {0}")]
    InvalidFormat(String),

    #[error("Invalid count on line {line}: '{value}'")]
    InvalidCount { line: usize, value: String },

    #[error("Invalid sequence label: {0}")]
    Sequence(#[from] SequenceError),

    #[error(transparent)]
    Matrix(#[from] MatrixError),
}

/// Check if the path has an annealing matrix extension (optionally gzipped)
#[must_use]
pub fn is_matrix_file(path: &Path) -> bool {
    let name = path.to_string_lossy().to_lowercase();
    let name = name
        .strip_suffix(".gz")
        .or_else(|| name.strip_suffix(".bgz"))
        .unwrap_or(&name);
    name.ends_with(".csv") || name.ends_with(".tsv")
}

/// Dataset id for a matrix file: the file name without matrix/compression extensions
#[must_use]
pub fn dataset_stem(path: &Path) -> Option<String> {
    let name = path.file_name()?.to_string_lossy().to_string();
    let mut stem = name.as_str();
    for suffix in [".gz", ".bgz", ".GZ", ".BGZ"] {
        stem = stem.strip_suffix(suffix).unwrap_or(stem);
    }
    for suffix in [".csv", ".tsv", ".CSV", ".TSV"] {
        stem = stem.strip_suffix(suffix).unwrap_or(stem);
    }
    (!stem.is_empty()).then(|| stem.to_string())
}

#[allow(clippy::case_sensitive_file_extension_comparisons)] // Already lowercased
fn is_gzipped(path: &Path) -> bool {
    let path_str = path.to_string_lossy().to_lowercase();
    path_str.ends_with(".gz") || path_str.ends_with(".bgz")
}

/// Parse an annealing matrix file
///
/// # Errors
///
/// Returns `MatrixParseError::Io` if the file cannot be read, or another
/// variant if its content is not a valid square table.
pub fn parse_matrix_file(path: &Path) -> Result<AnnealingMatrix, MatrixParseError> {
    let mut content = String::new();
    if is_gzipped(path) {
        GzDecoder::new(std::fs::File::open(path)?).read_to_string(&mut content)?;
    } else {
        content = std::fs::read_to_string(path)?;
    }
    parse_matrix_text(&content)
}

/// Parse annealing matrix text
///
/// # Errors
///
/// Returns `MatrixParseError::InvalidFormat` if the header is missing or rows
/// and columns name different sequences, `MatrixParseError::InvalidCount` for
/// non-integer cells, `MatrixParseError::Sequence` for non-DNA labels, or
/// `MatrixParseError::Matrix` if the table is not square.
pub fn parse_matrix_text(text: &str) -> Result<AnnealingMatrix, MatrixParseError> {
    let mut lines = text
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim_end_matches('\r')))
        .filter(|(_, line)| !line.trim().is_empty() && !line.trim_start().starts_with('#'));

    let (_, header) = lines
        .next()
        .ok_or_else(|| MatrixParseError::InvalidFormat("No header line found".to_string()))?;
    let delimiter = if header.contains('\t') { '\t' } else { ',' };

    // The first header cell labels the row column and is ignored
    let columns = header
        .split(delimiter)
        .skip(1)
        .map(|field| sequence::normalize(field.trim().trim_matches('"')))
        .collect::<Result<Vec<_>, _>>()?;
    if columns.is_empty() {
        return Err(MatrixParseError::InvalidFormat(
            "Header line has no sequence columns".to_string(),
        ));
    }

    let mut rows: HashMap<String, Vec<u32>> = HashMap::with_capacity(columns.len());
    for (line_num, line) in lines {
        let mut fields = line.split(delimiter);
        let label = sequence::normalize(fields.next().unwrap_or_default().trim().trim_matches('"'))?;

        let values = fields
            .map(|field| {
                let field = field.trim();
                field.parse::<u32>().map_err(|_| MatrixParseError::InvalidCount {
                    line: line_num,
                    value: field.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        if rows.insert(label.clone(), values).is_some() {
            return Err(MatrixError::DuplicateLabel(label).into());
        }
    }

    // Reorder rows to match the column order
    let mut ordered = Vec::with_capacity(columns.len());
    for column in &columns {
        let row = rows.remove(column).ok_or_else(|| {
            MatrixParseError::InvalidFormat(format!("Column {column} has no matching row"))
        })?;
        ordered.push(row);
    }
    if let Some(extra) = rows.keys().next() {
        return Err(MatrixParseError::InvalidFormat(format!(
            "Row {extra} has no matching column"
        )));
    }

    let matrix = AnnealingMatrix::from_rows(columns, ordered)?;
    if !matrix.is_symmetric() {
        warn!(
            "Annealing matrix with {} sequences is not symmetric; cells are read as (row, column)",
            matrix.len()
        );
    }
    Ok(matrix)
}
