use clap::Args;

use crate::cli::{AnnealingArgs, OutputFormat, OverhangSetArgs, ThresholdArgs};
use crate::core::overhang::OverhangRecord;
use crate::evaluation::clique::find_compatible_subset;
use crate::evaluation::evaluator::{build_records, unique_records, CompatibilityEvaluator};

#[derive(Args)]
pub struct SubsetArgs {
    #[command(flatten)]
    pub set: OverhangSetArgs,

    #[command(flatten)]
    pub annealing: AnnealingArgs,

    #[command(flatten)]
    pub thresholds: ThresholdArgs,
}

pub fn run(args: SubsetArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let enzyme = args.annealing.parse_enzyme()?;
    let (name, overhangs) = args.set.collect()?;
    let records: Vec<OverhangRecord> = build_records(&overhangs)?
        .into_iter()
        .map(OverhangRecord::with_flags)
        .collect();

    let store = args.annealing.load_store()?;
    let registry = args.annealing.load_registry()?;
    let config = args.thresholds.config(args.annealing.condition());
    let evaluator = CompatibilityEvaluator::new(&store, registry, config);
    let diagnostics = evaluator.evaluate_records(&records, enzyme)?;

    let subset = find_compatible_subset(&diagnostics, &records);
    let excluded: Vec<&str> = unique_records(&records)
        .into_iter()
        .map(OverhangRecord::input)
        .filter(|seq| !subset.contains(*seq))
        .collect();

    if verbose {
        eprintln!(
            "Kept {} of {} distinct overhang(s)",
            subset.len(),
            subset.len() + excluded.len()
        );
    }

    let report = format
        .report_adapter()
        .render(&name, &records, &diagnostics, Some(&subset))?;
    print!("{report}");

    if matches!(format, OutputFormat::Text) && !excluded.is_empty() {
        println!("\nExcluded ({}):", excluded.len());
        println!("  {}", excluded.join(", "));
    }
    Ok(())
}
