use clap::Args;
use tracing::warn;

use crate::cli::{AnnealingArgs, OutputFormat, OverhangSetArgs, ThresholdArgs};
use crate::core::overhang::OverhangRecord;
use crate::evaluation::evaluator::{build_records, CompatibilityEvaluator};

#[derive(Args)]
pub struct EvaluateArgs {
    #[command(flatten)]
    pub set: OverhangSetArgs,

    #[command(flatten)]
    pub annealing: AnnealingArgs,

    #[command(flatten)]
    pub thresholds: ThresholdArgs,

    /// Exit with an error if the set has structural defects
    #[arg(long)]
    pub strict: bool,
}

pub fn run(args: EvaluateArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let enzyme = args.annealing.parse_enzyme()?;
    let (name, overhangs) = args.set.collect()?;
    let records: Vec<OverhangRecord> = build_records(&overhangs)?
        .into_iter()
        .map(OverhangRecord::with_flags)
        .collect();

    if verbose {
        eprintln!(
            "Evaluating {} overhang(s) from '{}' with {}",
            records.len(),
            name,
            enzyme
        );
    }

    let store = args.annealing.load_store()?;
    let registry = args.annealing.load_registry()?;
    let config = args.thresholds.config(args.annealing.condition());
    let evaluator = CompatibilityEvaluator::new(&store, registry, config);
    let diagnostics = evaluator.evaluate_records(&records, enzyme)?;

    if diagnostics.oversized_set {
        warn!(
            "{} overhangs exceeds the recommended maximum of {} for length {}",
            diagnostics.overhang_count,
            diagnostics.size_limit.unwrap_or_default(),
            diagnostics.overhang_length
        );
    }

    let report = format
        .report_adapter()
        .render(&name, &records, &diagnostics, None)?;
    print!("{report}");

    if args.strict && diagnostics.has_errors {
        anyhow::bail!(
            "Overhang set '{}' has errors: {}",
            name,
            diagnostics.error_messages().join("; ")
        );
    }
    Ok(())
}
