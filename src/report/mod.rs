//! Renderings of evaluation results.
//!
//! A [`ReportAdapter`] turns the records and diagnostics of one overhang set
//! into a document. Three plain renderings are provided:
//!
//! - [`TextReport`]: human-readable summary with errors and warnings
//! - [`JsonReport`]: machine-readable, timestamped
//! - [`TsvReport`]: one row per distinct overhang

use std::collections::BTreeSet;
use thiserror::Error;

use crate::core::overhang::OverhangRecord;
use crate::evaluation::diagnostics::OverhangSetDiagnostics;

pub mod json;
pub mod text;
pub mod tsv;

pub use json::JsonReport;
pub use text::TextReport;
pub use tsv::TsvReport;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Failed to serialize report: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to format report: {0}")]
    Format(#[from] std::fmt::Error),
}

/// Renders one evaluated overhang set
pub trait ReportAdapter {
    /// Render a report for the set called `name`.
    ///
    /// `subset` is the compatible subset, when one was computed.
    ///
    /// # Errors
    ///
    /// Returns `ReportError` if the document cannot be produced.
    fn render(
        &self,
        name: &str,
        records: &[OverhangRecord],
        diagnostics: &OverhangSetDiagnostics,
        subset: Option<&BTreeSet<String>>,
    ) -> Result<String, ReportError>;
}

/// Short labels for the sequence flags set on a record
pub(crate) fn flag_labels(record: &OverhangRecord) -> Vec<&'static str> {
    let Some(flags) = record.flags() else {
        return Vec::new();
    };
    [
        (flags.has_multimer, "multimer"),
        (flags.has_start_codon, "start"),
        (flags.has_stop_codon, "stop"),
        (flags.has_rc_start_codon, "rc-start"),
        (flags.has_rc_stop_codon, "rc-stop"),
    ]
    .into_iter()
    .filter_map(|(set, label)| set.then_some(label))
    .collect()
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_labels() {
        let record = OverhangRecord::new("CATG").unwrap();
        assert!(flag_labels(&record).is_empty());

        // CATG: canonical CATG contains ATG on both strands
        let record = record.with_flags();
        assert_eq!(flag_labels(&record), vec!["start", "rc-start"]);

        let record = OverhangRecord::new("AAAT").unwrap().with_flags();
        assert_eq!(flag_labels(&record), vec!["multimer"]);
    }
}
