use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Type IIS restriction enzymes with published annealing datasets
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
pub enum Enzyme {
    BsaI,
    BsmBI,
    #[default]
    Esp3I,
    BbsI,
}

impl Enzyme {
    pub const ALL: [Enzyme; 4] = [Enzyme::BsaI, Enzyme::BsmBI, Enzyme::Esp3I, Enzyme::BbsI];

    /// Name as written in the literature
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::BsaI => "BsaI",
            Self::BsmBI => "BsmBI",
            Self::Esp3I => "Esp3I",
            Self::BbsI => "BbsI",
        }
    }
}

impl std::fmt::Display for Enzyme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown enzyme '{0}' (expected one of: BsaI, BsmBI, Esp3I, BbsI)")]
pub struct UnknownEnzymeError(pub String);

impl FromStr for Enzyme {
    type Err = UnknownEnzymeError;

    /// Case-insensitive parse of an enzyme name
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Enzyme::ALL
            .into_iter()
            .find(|e| e.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownEnzymeError(s.to_string()))
    }
}

/// Identifier of an annealing dataset (e.g. `2020_01h_Esp3I`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DatasetId(pub String);

impl DatasetId {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }
}

impl std::fmt::Display for DatasetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Ligation condition under which an annealing dataset was measured
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AnnealingCondition {
    pub temperature_celsius: u32,
    pub duration_hours: u32,
}

impl AnnealingCondition {
    #[must_use]
    pub fn new(temperature_celsius: u32, duration_hours: u32) -> Self {
        Self {
            temperature_celsius,
            duration_hours,
        }
    }

    /// Directory name used for this condition in a data directory (e.g. `37C_1h`)
    #[must_use]
    pub fn dir_name(&self) -> String {
        format!("{}C_{}h", self.temperature_celsius, self.duration_hours)
    }

    /// Parse a directory name of the form `37C_1h`
    #[must_use]
    pub fn from_dir_name(name: &str) -> Option<Self> {
        let (temperature, duration) = name.split_once('_')?;
        let temperature = temperature.strip_suffix(|c: char| c == 'C' || c == 'c')?.parse().ok()?;
        let duration = duration.strip_suffix(|c: char| c == 'h' || c == 'H')?.parse().ok()?;
        Some(Self::new(temperature, duration))
    }
}

impl Default for AnnealingCondition {
    fn default() -> Self {
        Self::new(37, 1)
    }
}

impl std::fmt::Display for AnnealingCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}°C, {}h",
            self.temperature_celsius, self.duration_hours
        )
    }
}

/// An overhang together with its reverse complement, in canonical order
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OverhangPair {
    pub canonical: String,
    pub complement: String,
}

impl OverhangPair {
    pub fn new(canonical: impl Into<String>, complement: impl Into<String>) -> Self {
        Self {
            canonical: canonical.into(),
            complement: complement.into(),
        }
    }
}

impl std::fmt::Display for OverhangPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.canonical, self.complement)
    }
}
