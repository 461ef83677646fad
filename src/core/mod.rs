//! Core data types for overhang analysis.
//!
//! This module provides the fundamental types used throughout the library:
//!
//! - [`sequence`]: Reverse complement, GC content, canonical ordering and distances
//! - [`OverhangRecord`](overhang::OverhangRecord): One overhang stored as its canonical pair
//! - [`Enzyme`](types::Enzyme), [`AnnealingCondition`](types::AnnealingCondition),
//!   [`OverhangPair`](types::OverhangPair): Shared value types
//! - [`sets`]: Published and demonstration overhang sets
//!
//! ## Canonical Pairs
//!
//! An overhang and its reverse complement describe the same junction. Every
//! overhang is therefore stored as a pair ordered lexicographically:
//!
//! | Input | Canonical | Complement | Palindromic |
//! |-------|-----------|------------|-------------|
//! | TAGG  | CCTA      | TAGG       | no          |
//! | CCTA  | CCTA      | TAGG       | no          |
//! | AATT  | AATT      | AATT       | yes         |

pub mod overhang;
pub mod sequence;
pub mod sets;
pub mod types;
