use std::collections::BTreeSet;
use std::fmt::Write;

use crate::core::overhang::OverhangRecord;
use crate::evaluation::diagnostics::OverhangSetDiagnostics;
use crate::evaluation::evaluator::unique_records;
use crate::report::{flag_labels, ReportAdapter, ReportError};

/// Plain-text summary for terminals
#[derive(Debug, Clone, Copy, Default)]
pub struct TextReport;

impl ReportAdapter for TextReport {
    fn render(
        &self,
        name: &str,
        records: &[OverhangRecord],
        diagnostics: &OverhangSetDiagnostics,
        subset: Option<&BTreeSet<String>>,
    ) -> Result<String, ReportError> {
        let mut out = String::new();

        writeln!(out, "Overhang set: {name}")?;
        writeln!(out, "{}", "=".repeat(60))?;
        writeln!(
            out,
            "Enzyme: {} (dataset {}, {})",
            diagnostics.enzyme, diagnostics.dataset, diagnostics.condition
        )?;
        writeln!(
            out,
            "Overhangs: {} of length {}",
            diagnostics.overhang_count, diagnostics.overhang_length
        )?;

        writeln!(out, "\nOverhangs:")?;
        for record in unique_records(records) {
            write!(
                out,
                "  {:<8} {:<16} GC {:>3.0}%",
                record.input(),
                record.pair().to_string(),
                record.gc_content() * 100.0
            )?;
            let labels = flag_labels(record);
            if !labels.is_empty() {
                write!(out, "  [{}]", labels.join(", "))?;
            }
            writeln!(out)?;
        }

        let errors = diagnostics.error_messages();
        let warnings = diagnostics.warning_messages();
        if errors.is_empty() && warnings.is_empty() {
            writeln!(out, "\nNo problems found.")?;
        }
        if !errors.is_empty() {
            writeln!(out, "\nErrors:")?;
            for message in &errors {
                writeln!(out, "  - {message}")?;
            }
        }
        if !warnings.is_empty() {
            writeln!(out, "\nWarnings:")?;
            for message in &warnings {
                writeln!(out, "  - {message}")?;
            }
        }

        if !diagnostics.similar_overhangs.is_empty() {
            writeln!(out, "\nSimilar overhangs:")?;
            for similar in &diagnostics.similar_overhangs {
                writeln!(
                    out,
                    "  {} ~ {} ({} mismatch{})",
                    similar.first,
                    similar.second,
                    similar.distance,
                    if similar.distance == 1 { "" } else { "es" }
                )?;
            }
        }

        if let Some(subset) = subset {
            writeln!(out, "\nCompatible subset ({} overhangs):", subset.len())?;
            let members: Vec<&str> = subset.iter().map(String::as_str).collect();
            writeln!(out, "  {}", members.join(", "))?;
        }

        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::test_support::disastandard;

    #[test]
    fn test_text_report() {
        let (records, diagnostics) = disastandard();
        let text = TextReport
            .render("Disastandard", &records, &diagnostics, None)
            .unwrap();

        assert!(text.starts_with("Overhang set: Disastandard\n"));
        assert!(text.contains("Enzyme: Esp3I (dataset 2020_01h_Esp3I, 37°C, 1h)"));
        assert!(text.contains("Duplicate overhang(s): TCCG"));
        assert!(text.contains("Palindromic overhang(s): AATT"));
        assert!(text.contains("Weak annealing: CACC/GGTG"));
        assert!(text.contains("Misannealing pairs: ATGG/CCAT ~ CCAG/CTGG"));
        assert!(!text.contains("No problems found"));
        assert!(!text.contains("Compatible subset"));
        // TCCG is listed once
        assert_eq!(text.matches("  TCCG ").count(), 1);
    }

    #[test]
    fn test_text_report_with_subset() {
        let (records, mut diagnostics) = disastandard();
        diagnostics.duplicates = false;
        diagnostics.duplicate_overhangs.clear();
        diagnostics.palindromic.clear();
        diagnostics.reverse_complement_collisions.clear();
        diagnostics.weak_anneals.clear();
        diagnostics.self_misanneals.clear();
        diagnostics.cross_misanneals.clear();

        let subset = BTreeSet::from(["CTAT".to_string(), "TGTT".to_string()]);
        let text = TextReport
            .render("custom", &records, &diagnostics, Some(&subset))
            .unwrap();
        assert!(text.contains("No problems found."));
        assert!(text.contains("Compatible subset (2 overhangs):\n  CTAT, TGTT"));
    }
}
