//! Published and demonstration overhang sets.

/// Demonstration set containing one of each defect: a palindrome (AATT),
/// a reverse-complement collision (TAGG/CCTA), a duplicate (TCCG), a weak
/// Watson-Crick pairing (CACC), a self-misannealing overhang (GACT) and a
/// misannealing pair (CCAG).
pub const DISASTANDARD: [&str; 9] = [
    "AATT", "TAGG", "CCTA", "TCCG", "TCCG", "CACC", "GACT", "ATGG", "CCAG",
];

/// EMMA mammalian assembly standard
pub const EMMA: [&str; 27] = [
    "TAGG", "ATGG", "GACT", "GGAC", "TCCG", "CCAG", "CAGC", "AGGC", "ATCC", "GCGT", "TGCT",
    "GGTA", "CGTC", "TCAC", "CTAC", "GCAA", "CCCT", "GCTC", "CGGT", "GTGC", "AGCG", "TGGA",
    "GTTG", "CGAA", "CACG", "ACTG", "ACGA",
];

/// EcoFlex level 1 overhangs
pub const ECOFLEX_LEVEL_1: [&str; 6] = ["ATCT", "TGCC", "CCGG", "GAAG", "CTTC", "TTAG"];

/// EcoFlex level 2 overhangs
pub const ECOFLEX_LEVEL_2: [&str; 5] = ["CTAT", "GTAC", "GGAC", "TCGA", "TGTT"];

/// A named overhang set that can be selected by name
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum PredefinedSet {
    Disastandard,
    Emma,
    EcoflexLevel1,
    EcoflexLevel2,
}

impl PredefinedSet {
    #[must_use]
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Disastandard => "Disastandard",
            Self::Emma => "EMMA",
            Self::EcoflexLevel1 => "EcoFlex level 1",
            Self::EcoflexLevel2 => "EcoFlex level 2",
        }
    }

    #[must_use]
    pub fn overhangs(&self) -> Vec<String> {
        let overhangs: &[&str] = match self {
            Self::Disastandard => &DISASTANDARD,
            Self::Emma => &EMMA,
            Self::EcoflexLevel1 => &ECOFLEX_LEVEL_1,
            Self::EcoflexLevel2 => &ECOFLEX_LEVEL_2,
        };
        overhangs.iter().map(|s| (*s).to_string()).collect()
    }
}
