//! Sequence primitives for short DNA overhangs.
//!
//! All functions operate on upper-case `ACGT` strings. Lower-case input is
//! accepted and normalized; any other character is rejected with
//! [`SequenceError::InvalidBase`].

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SequenceError {
    #[error("Invalid base '{base}' at position {position} in sequence '{sequence}' (expected A, C, G or T)")]
    InvalidBase {
        sequence: String,
        base: char,
        position: usize,
    },

    #[error("Empty sequence")]
    EmptySequence,
}

/// Helper function to convert usize count to f64 with explicit precision loss allowance
#[inline]
fn count_to_f64(count: usize) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    {
        count as f64
    }
}

/// Watson-Crick complement of a single upper-case base.
#[inline]
#[must_use]
pub const fn complement_base(base: u8) -> Option<u8> {
    match base {
        b'A' => Some(b'T'),
        b'T' => Some(b'A'),
        b'C' => Some(b'G'),
        b'G' => Some(b'C'),
        _ => None,
    }
}

/// Trim and upper-case a sequence and check that it only contains `ACGT`.
///
/// # Errors
///
/// Returns `SequenceError::InvalidBase` for the first character outside the
/// DNA alphabet. The reported position indexes the trimmed sequence.
pub fn normalize(seq: &str) -> Result<String, SequenceError> {
    let trimmed = seq.trim();
    let upper = trimmed.to_ascii_uppercase();
    if let Some((position, base)) = upper
        .char_indices()
        .find(|(_, c)| !matches!(c, 'A' | 'C' | 'G' | 'T'))
    {
        return Err(SequenceError::InvalidBase {
            sequence: trimmed.to_string(),
            base,
            position,
        });
    }
    Ok(upper)
}

/// Reverse complement a DNA sequence.
///
/// # Examples
///
/// ```
/// use overhang::core::sequence::reverse_complement;
///
/// assert_eq!(reverse_complement("TAGG").unwrap(), "CCTA");
/// assert_eq!(reverse_complement("aatt").unwrap(), "AATT");
/// assert!(reverse_complement("ACGN").is_err());
/// ```
///
/// # Errors
///
/// Returns `SequenceError::InvalidBase` if any character is not A, C, G or T.
pub fn reverse_complement(seq: &str) -> Result<String, SequenceError> {
    let normalized = normalize(seq)?;
    Ok(normalized
        .bytes()
        .rev()
        .filter_map(complement_base)
        .map(char::from)
        .collect())
}

/// Fraction of G and C bases in a sequence.
///
/// # Errors
///
/// Returns `SequenceError::EmptySequence` on zero-length input, or
/// `SequenceError::InvalidBase` for non-DNA characters.
pub fn gc_content(seq: &str) -> Result<f64, SequenceError> {
    let normalized = normalize(seq)?;
    if normalized.is_empty() {
        return Err(SequenceError::EmptySequence);
    }
    let gc = normalized.bytes().filter(|b| matches!(b, b'G' | b'C')).count();
    Ok(count_to_f64(gc) / count_to_f64(normalized.len()))
}

/// Order a sequence and its reverse complement lexicographically.
///
/// Self-complementary (palindromic) sequences return the same value twice.
///
/// # Errors
///
/// Returns `SequenceError::InvalidBase` if any character is not A, C, G or T.
pub fn canonical_pair(seq: &str) -> Result<(String, String), SequenceError> {
    let forward = normalize(seq)?;
    let reverse = reverse_complement(&forward)?;
    if forward <= reverse {
        Ok((forward, reverse))
    } else {
        Ok((reverse, forward))
    }
}

/// Number of mismatching positions between two sequences.
///
/// Positions beyond the shorter sequence count as mismatches.
#[must_use]
pub fn hamming(a: &str, b: &str) -> usize {
    let mismatches = a.bytes().zip(b.bytes()).filter(|(x, y)| x != y).count();
    mismatches + a.len().abs_diff(b.len())
}

/// Length of the longest run of one repeated base.
#[must_use]
pub fn max_repeat(seq: &str) -> usize {
    let mut longest = 0;
    let mut current = 0;
    let mut previous = None;
    for base in seq.bytes() {
        if Some(base) == previous {
            current += 1;
        } else {
            current = 1;
            previous = Some(base);
        }
        longest = longest.max(current);
    }
    longest
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reverse_complement() {
        assert_eq!(reverse_complement("A").unwrap(), "T");
        assert_eq!(reverse_complement("AAAA").unwrap(), "TTTT");
        assert_eq!(reverse_complement("GACT").unwrap(), "AGTC");
        assert_eq!(reverse_complement("CCAG").unwrap(), "CTGG");
        assert_eq!(reverse_complement("").unwrap(), "");
    }

    #[test]
    fn test_reverse_complement_round_trip() {
        for seq in ["ACGT", "TAGG", "CACC", "GGAC", "TTTA", "CGCG"] {
            let rc = reverse_complement(seq).unwrap();
            assert_eq!(reverse_complement(&rc).unwrap(), seq);
        }
    }

    #[test]
    fn test_reverse_complement_invalid_base() {
        let err = reverse_complement("ACNT").unwrap_err();
        assert_eq!(
            err,
            SequenceError::InvalidBase {
                sequence: "ACNT".to_string(),
                base: 'N',
                position: 2,
            }
        );
    }

    #[test]
    fn test_normalize_trims_before_reporting() {
        assert_eq!(normalize("  acgt\n").unwrap(), "ACGT");

        let err = normalize("  AXGT").unwrap_err();
        assert_eq!(
            err,
            SequenceError::InvalidBase {
                sequence: "AXGT".to_string(),
                base: 'X',
                position: 1,
            }
        );
    }

    #[test]
    fn test_gc_content() {
        assert!((gc_content("AAAA").unwrap() - 0.0).abs() < f64::EPSILON);
        assert!((gc_content("GCGC").unwrap() - 1.0).abs() < f64::EPSILON);
        assert!((gc_content("CACC").unwrap() - 0.75).abs() < f64::EPSILON);
        assert_eq!(gc_content(""), Err(SequenceError::EmptySequence));
    }

    #[test]
    fn test_gc_content_reverse_complement_invariant() {
        for seq in ["TAGG", "ATGG", "GACT", "CTAT", "AAC"] {
            let rc = reverse_complement(seq).unwrap();
            assert!((gc_content(seq).unwrap() - gc_content(&rc).unwrap()).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn test_canonical_pair() {
        assert_eq!(
            canonical_pair("TTT").unwrap(),
            ("AAA".to_string(), "TTT".to_string())
        );
        assert_eq!(
            canonical_pair("AATT").unwrap(),
            ("AATT".to_string(), "AATT".to_string())
        );
        // Either orientation yields the same ordered pair
        assert_eq!(canonical_pair("TAGG").unwrap(), canonical_pair("CCTA").unwrap());
    }

    #[test]
    fn test_lowercase_is_normalized() {
        assert_eq!(
            canonical_pair("ccta").unwrap(),
            ("CCTA".to_string(), "TAGG".to_string())
        );
    }

    #[test]
    fn test_hamming() {
        assert_eq!(hamming("ACGT", "ACGT"), 0);
        assert_eq!(hamming("ACGT", "ACGA"), 1);
        assert_eq!(hamming("AAAA", "TTTT"), 4);
        assert_eq!(hamming("ACG", "ACGT"), 1);
    }

    #[test]
    fn test_max_repeat() {
        assert_eq!(max_repeat(""), 0);
        assert_eq!(max_repeat("ACGT"), 1);
        assert_eq!(max_repeat("AAAC"), 3);
        assert_eq!(max_repeat("CAAT"), 2);
        assert_eq!(max_repeat("GGGG"), 4);
    }
}
