use std::collections::BTreeSet;
use std::fmt::Write;

use crate::core::overhang::OverhangRecord;
use crate::evaluation::diagnostics::OverhangSetDiagnostics;
use crate::evaluation::evaluator::unique_records;
use crate::report::{ReportAdapter, ReportError};

const HEADER: &str = "set\toverhang\tcanonical\tcomplement\tgc_content\tpalindromic\tduplicate\trc_collision\tweak\tself_misanneal\tmisanneal_partners\tin_subset";

/// Tab-separated table with one row per distinct overhang.
///
/// `in_subset` is `.` when no subset was computed.
#[derive(Debug, Clone, Copy, Default)]
pub struct TsvReport;

impl ReportAdapter for TsvReport {
    fn render(
        &self,
        name: &str,
        records: &[OverhangRecord],
        diagnostics: &OverhangSetDiagnostics,
        subset: Option<&BTreeSet<String>>,
    ) -> Result<String, ReportError> {
        let mut out = String::new();
        writeln!(out, "{HEADER}")?;

        for record in unique_records(records) {
            let pair = record.pair();
            let partners = diagnostics
                .cross_misanneals
                .iter()
                .filter(|m| m.first == pair || m.second == pair)
                .count();
            let in_subset = subset.map_or(".", |s| {
                if s.contains(record.input()) {
                    "yes"
                } else {
                    "no"
                }
            });

            writeln!(
                out,
                "{}\t{}\t{}\t{}\t{:.2}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
                name,
                record.input(),
                record.canonical(),
                record.complement(),
                record.gc_content(),
                record.is_palindromic(),
                diagnostics.duplicate_overhangs.contains(record.input()),
                diagnostics.reverse_complement_collisions.contains(record.input()),
                diagnostics.weak_anneals.contains(&pair),
                diagnostics.self_misanneals.contains(&pair),
                partners,
                in_subset,
            )?;
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::test_support::disastandard;

    #[test]
    fn test_tsv_report() {
        let (records, diagnostics) = disastandard();
        let tsv = TsvReport
            .render("Disastandard", &records, &diagnostics, None)
            .unwrap();
        let lines: Vec<&str> = tsv.lines().collect();

        assert_eq!(lines[0], HEADER);
        assert_eq!(lines.len(), 9);
        assert_eq!(
            lines[1],
            "Disastandard\tAATT\tAATT\tAATT\t0.00\ttrue\tfalse\tfalse\tfalse\ttrue\t0\t."
        );
        let cacc = lines.iter().find(|l| l.contains("\tCACC\t")).unwrap();
        assert!(cacc.ends_with("\t0.75\tfalse\tfalse\tfalse\ttrue\tfalse\t0\t."));
        let ccag = lines.iter().find(|l| l.contains("\tCCAG\t")).unwrap();
        assert!(ccag.ends_with("\t1\t."));
    }

    #[test]
    fn test_tsv_report_subset_column() {
        let (records, diagnostics) = disastandard();
        let subset = BTreeSet::from(["TCCG".to_string()]);
        let tsv = TsvReport
            .render("Disastandard", &records, &diagnostics, Some(&subset))
            .unwrap();
        let tccg = tsv.lines().find(|l| l.contains("\tTCCG\t")).unwrap();
        assert!(tccg.ends_with("\tyes"));
        let aatt = tsv.lines().find(|l| l.contains("\tAATT\t")).unwrap();
        assert!(aatt.ends_with("\tno"));
    }
}
