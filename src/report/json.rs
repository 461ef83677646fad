use std::collections::BTreeSet;

use crate::core::overhang::OverhangRecord;
use crate::evaluation::diagnostics::OverhangSetDiagnostics;
use crate::evaluation::evaluator::unique_records;
use crate::report::{ReportAdapter, ReportError};

/// Pretty-printed JSON document with a generation timestamp
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonReport;

impl ReportAdapter for JsonReport {
    fn render(
        &self,
        name: &str,
        records: &[OverhangRecord],
        diagnostics: &OverhangSetDiagnostics,
        subset: Option<&BTreeSet<String>>,
    ) -> Result<String, ReportError> {
        let output = serde_json::json!({
            "name": name,
            "generated_at": chrono::Utc::now().to_rfc3339(),
            "overhangs": unique_records(records),
            "diagnostics": diagnostics,
            "errors": diagnostics.error_messages(),
            "warnings": diagnostics.warning_messages(),
            "compatible_subset": subset,
        });
        Ok(serde_json::to_string_pretty(&output)?)
    }
}
