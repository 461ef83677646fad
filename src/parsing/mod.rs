//! Parsers for annealing data and overhang lists.
//!
//! This module provides parsers for:
//!
//! - **Annealing matrices**: Square CSV/TSV tables of ligation counts, optionally gzipped
//! - **Overhang lists**: Comma, semicolon or whitespace separated sequences
//!
//! ## Example
//!
//! ```rust,no_run
//! use overhang::parsing::matrix::parse_matrix_file;
//! use overhang::parsing::overhangs::parse_overhang_text;
//! use std::path::Path;
//!
//! let matrix = parse_matrix_file(Path::new("data/37C_1h/2020_01h_Esp3I.csv")).unwrap();
//! let overhangs = parse_overhang_text("CTAT,GGAC,TGTT");
//! assert!(overhangs.iter().all(|oh| matrix.contains(oh)));
//! ```

pub mod matrix;
pub mod overhangs;
