use serde::Serialize;
use std::collections::BTreeSet;

use crate::core::sequence::{self, SequenceError};
use crate::core::types::OverhangPair;

/// Homopolymer run length at which an overhang is flagged as a multimer
pub const MULTIMER_RUN_LENGTH: usize = 3;

/// Longest overhang length [`generate_overhang_pairs`] will enumerate
pub const MAX_ENUMERATION_LENGTH: usize = 12;

const START_CODON: &str = "ATG";
const STOP_CODONS: [&str; 3] = ["TAA", "TAG", "TGA"];

/// Reading-frame and composition flags for an overhang pair.
///
/// The `rc` variants test the complement strand of the pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SequenceFlags {
    pub has_multimer: bool,
    pub has_start_codon: bool,
    pub has_stop_codon: bool,
    pub has_rc_start_codon: bool,
    pub has_rc_stop_codon: bool,
}

impl SequenceFlags {
    #[must_use]
    pub fn inspect(canonical: &str, complement: &str) -> Self {
        Self {
            has_multimer: sequence::max_repeat(canonical) >= MULTIMER_RUN_LENGTH,
            has_start_codon: canonical.contains(START_CODON),
            has_stop_codon: has_stop_codon(canonical),
            has_rc_start_codon: complement.contains(START_CODON),
            has_rc_stop_codon: has_stop_codon(complement),
        }
    }
}

fn has_stop_codon(seq: &str) -> bool {
    STOP_CODONS.iter().any(|codon| seq.contains(codon))
}

/// One overhang, stored as its canonical pair.
///
/// `canonical` is the lexicographically smaller of the input and its reverse
/// complement. For self-complementary overhangs both fields hold the same
/// sequence and `palindromic` is set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverhangRecord {
    input: String,
    canonical: String,
    complement: String,
    gc_content: f64,
    palindromic: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    flags: Option<SequenceFlags>,
}

impl OverhangRecord {
    /// Build a record from a raw overhang string.
    ///
    /// # Errors
    ///
    /// Returns `SequenceError::EmptySequence` for empty input or
    /// `SequenceError::InvalidBase` for characters outside `ACGT`.
    pub fn new(seq: &str) -> Result<Self, SequenceError> {
        let input = sequence::normalize(seq)?;
        let gc_content = sequence::gc_content(&input)?;
        let (canonical, complement) = sequence::canonical_pair(&input)?;
        let palindromic = canonical == complement;

        Ok(Self {
            input,
            canonical,
            complement,
            gc_content,
            palindromic,
            flags: None,
        })
    }

    /// Attach sequence flags. Flags are computed once; later calls keep the first result.
    #[must_use]
    pub fn with_flags(mut self) -> Self {
        if self.flags.is_none() {
            self.flags = Some(SequenceFlags::inspect(&self.canonical, &self.complement));
        }
        self
    }

    /// The (upper-cased) sequence this record was built from
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    #[must_use]
    pub fn canonical(&self) -> &str {
        &self.canonical
    }

    #[must_use]
    pub fn complement(&self) -> &str {
        &self.complement
    }

    #[must_use]
    pub fn gc_content(&self) -> f64 {
        self.gc_content
    }

    #[must_use]
    pub fn is_palindromic(&self) -> bool {
        self.palindromic
    }

    /// Palindromic overhangs cannot direct an oriented assembly
    #[must_use]
    pub fn is_usable(&self) -> bool {
        !self.palindromic
    }

    #[must_use]
    pub fn flags(&self) -> Option<&SequenceFlags> {
        self.flags.as_ref()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.canonical.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.canonical.is_empty()
    }

    #[must_use]
    pub fn pair(&self) -> OverhangPair {
        OverhangPair::new(self.canonical.clone(), self.complement.clone())
    }

    /// Mismatches between two overhangs, taking the closer of the two orientations of `other`.
    ///
    /// An overhang and its reverse complement are the same junction, so the
    /// distance is symmetric and zero for a record compared with itself.
    #[must_use]
    pub fn hamming_distance(&self, other: &OverhangRecord) -> usize {
        let direct = sequence::hamming(&self.canonical, &other.canonical);
        let reverse = sequence::hamming(&self.canonical, &other.complement);
        direct.min(reverse)
    }
}

/// All canonical pairs of DNA sequences of the given length.
///
/// Every one of the `4^length` sequences falls into exactly one pair;
/// self-complementary sequences form a pair with themselves. Lengths of zero
/// or above [`MAX_ENUMERATION_LENGTH`] yield an empty set.
#[must_use]
pub fn generate_overhang_pairs(length: usize) -> BTreeSet<OverhangPair> {
    const BASES: [char; 4] = ['A', 'C', 'G', 'T'];

    let mut pairs = BTreeSet::new();
    if length == 0 || length > MAX_ENUMERATION_LENGTH {
        return pairs;
    }
    let Some(total) = u32::try_from(length).ok().and_then(|exp| 4usize.checked_pow(exp)) else {
        return pairs;
    };

    for mut code in 0..total {
        let mut seq = vec!['A'; length];
        for slot in seq.iter_mut().rev() {
            *slot = BASES[code % 4];
            code /= 4;
        }
        let seq: String = seq.into_iter().collect();
        if let Ok((canonical, complement)) = sequence::canonical_pair(&seq) {
            pairs.insert(OverhangPair::new(canonical, complement));
        }
    }
    pairs
}

/// Records for every canonical overhang pair of the given length, with flags populated.
#[must_use]
pub fn generate_all_overhangs(length: usize) -> Vec<OverhangRecord> {
    generate_overhang_pairs(length)
        .into_iter()
        .filter_map(|pair| OverhangRecord::new(&pair.canonical).ok())
        .map(OverhangRecord::with_flags)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overhang_record() {
        let oh = OverhangRecord::new("AAA").unwrap().with_flags();
        assert_eq!(oh.canonical(), "AAA");
        assert_eq!(oh.complement(), "TTT");
        assert!(oh.is_usable());
        assert!(oh.gc_content().abs() < f64::EPSILON);
        assert!(oh.flags().unwrap().has_multimer);
    }

    #[test]
    fn test_record_from_complement_orientation() {
        let oh = OverhangRecord::new("TAGG").unwrap();
        assert_eq!(oh.input(), "TAGG");
        assert_eq!(oh.canonical(), "CCTA");
        assert_eq!(oh.complement(), "TAGG");
        assert_eq!(oh.pair(), OverhangRecord::new("CCTA").unwrap().pair());
    }

    #[test]
    fn test_palindromic() {
        let oh = OverhangRecord::new("AATT").unwrap();
        assert!(oh.is_palindromic());
        assert!(!oh.is_usable());
        assert_eq!(oh.canonical(), oh.complement());

        assert!(OverhangRecord::new("TTAA").unwrap().is_palindromic());
        assert!(!OverhangRecord::new("TAGG").unwrap().is_palindromic());
    }

    #[test]
    fn test_invalid_input() {
        assert_eq!(OverhangRecord::new(""), Err(SequenceError::EmptySequence));
        assert!(matches!(
            OverhangRecord::new("AXTT"),
            Err(SequenceError::InvalidBase { base: 'X', .. })
        ));
    }

    #[test]
    fn test_codon_flags() {
        let atga = OverhangRecord::new("ATGA").unwrap().with_flags();
        let flags = atga.flags().unwrap();
        assert!(flags.has_start_codon);
        assert!(flags.has_stop_codon);

        // ATGT is stored as ACAT/ATGT, so the start codon is on the complement
        let atgt = OverhangRecord::new("ATGT").unwrap().with_flags();
        assert!(atgt.flags().unwrap().has_rc_start_codon);
        assert!(!atgt.flags().unwrap().has_start_codon);

        let tga = OverhangRecord::new("TGA").unwrap().with_flags();
        assert!(tga.flags().unwrap().has_rc_stop_codon);

        let aaa = OverhangRecord::new("AAA").unwrap().with_flags();
        assert!(!aaa.flags().unwrap().has_start_codon);
        assert!(!aaa.flags().unwrap().has_stop_codon);
    }

    #[test]
    fn test_flags_absent_until_requested() {
        assert!(OverhangRecord::new("ACGA").unwrap().flags().is_none());
    }

    #[test]
    fn test_hamming_distance() {
        let a = OverhangRecord::new("TAGG").unwrap();
        let b = OverhangRecord::new("CCTA").unwrap();
        let c = OverhangRecord::new("TAGC").unwrap();
        let d = OverhangRecord::new("GACT").unwrap();

        assert_eq!(a.hamming_distance(&a), 0);
        // Reverse complements are the same junction
        assert_eq!(a.hamming_distance(&b), 0);
        assert_eq!(a.hamming_distance(&c), c.hamming_distance(&a));
        assert_eq!(a.hamming_distance(&d), d.hamming_distance(&a));
    }

    #[test]
    fn test_hamming_distance_symmetric_over_all_three_mers() {
        let records = generate_all_overhangs(3);
        for a in &records {
            assert_eq!(a.hamming_distance(a), 0);
            for b in &records {
                assert_eq!(a.hamming_distance(b), b.hamming_distance(a));
            }
        }
    }

    #[test]
    fn test_generate_overhang_pairs() {
        let pairs = generate_overhang_pairs(1);
        let expected: BTreeSet<OverhangPair> = [
            OverhangPair::new("A", "T"),
            OverhangPair::new("C", "G"),
        ]
        .into_iter()
        .collect();
        assert_eq!(pairs, expected);

        assert!(generate_overhang_pairs(0).is_empty());
        assert_eq!(generate_overhang_pairs(2).len(), 10);
    }

    #[test]
    fn test_generate_overhang_pairs_length_limit() {
        assert!(generate_overhang_pairs(MAX_ENUMERATION_LENGTH + 1).is_empty());
        assert!(generate_overhang_pairs(32).is_empty());
        assert!(generate_overhang_pairs(usize::MAX).is_empty());
        assert!(generate_all_overhangs(64).is_empty());
    }

    #[test]
    fn test_generate_all_overhangs() {
        assert_eq!(generate_all_overhangs(3).len(), 32);

        let four_mers = generate_all_overhangs(4);
        assert_eq!(four_mers.len(), 136);
        assert_eq!(four_mers.iter().filter(|oh| oh.is_palindromic()).count(), 16);
        assert!(four_mers.iter().all(|oh| oh.flags().is_some()));
    }
}
