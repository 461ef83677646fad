use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

use crate::annealing::matrix::AnnealingMatrix;
use crate::annealing::store::AnnealingDataStore;
use crate::cli::{load_registry, parse_enzyme, OutputFormat};
use crate::core::overhang::{generate_all_overhangs, OverhangRecord};
use crate::core::types::{AnnealingCondition, Enzyme};
use crate::evaluation::evaluator::{CompatibilityEvaluator, EvaluatorConfig};
use crate::report::flag_labels;

#[derive(Args)]
pub struct CompendiumArgs {
    /// Overhang length
    #[arg(short, long, default_value = "4", value_parser = clap::value_parser!(u8).range(1..=8))]
    pub length: u8,

    /// Omit palindromic overhangs
    #[arg(long)]
    pub usable_only: bool,

    /// Annotate with annealing data from this directory
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Restriction enzyme used for annotation
    #[arg(short, long, default_value = "Esp3I")]
    pub enzyme: String,

    /// JSON file mapping enzyme names to dataset ids
    #[arg(long)]
    pub enzyme_map: Option<PathBuf>,

    /// Ligation temperature in °C
    #[arg(long, default_value = "37")]
    pub temperature: u32,

    /// Ligation duration in hours
    #[arg(long, default_value = "1")]
    pub duration: u32,
}

/// One compendium row; annealing fields are set only for sequences in the dataset
struct CompendiumEntry {
    record: OverhangRecord,
    watson_crick: Option<u32>,
    self_misanneal: Option<bool>,
}

impl CompendiumEntry {
    fn annotate(record: OverhangRecord, matrix: Option<&AnnealingMatrix>) -> Self {
        let watson_crick = matrix.and_then(|m| m.get(record.canonical(), record.complement()));
        let self_misanneal = matrix.and_then(|m| {
            let canonical = m.get(record.canonical(), record.canonical())?;
            let complement = m.get(record.complement(), record.complement())?;
            Some(canonical != 0 || complement != 0)
        });
        Self {
            record,
            watson_crick,
            self_misanneal,
        }
    }
}

pub fn run(args: CompendiumArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let enzyme = parse_enzyme(&args.enzyme)?;
    let records: Vec<OverhangRecord> = generate_all_overhangs(usize::from(args.length))
        .into_iter()
        .filter(|r| !args.usable_only || r.is_usable())
        .collect();

    let store = match &args.data_dir {
        Some(dir) => Some(AnnealingDataStore::load_from_dir(dir).with_context(|| {
            format!("Failed to load annealing data from {}", dir.display())
        })?),
        None => None,
    };

    let evaluator = match &store {
        Some(store) => {
            let config = EvaluatorConfig {
                condition: AnnealingCondition::new(args.temperature, args.duration),
                ..EvaluatorConfig::default()
            };
            Some(CompatibilityEvaluator::new(
                store,
                load_registry(args.enzyme_map.as_deref())?,
                config,
            ))
        }
        None => None,
    };
    let matrix = match &evaluator {
        Some(evaluator) => Some(evaluator.matrix_for(enzyme)?.1),
        None => None,
    };

    let entries: Vec<CompendiumEntry> = records
        .into_iter()
        .map(|r| CompendiumEntry::annotate(r, matrix))
        .collect();

    if verbose {
        eprintln!(
            "{} overhang pair(s) of length {}",
            entries.len(),
            args.length
        );
    }

    match format {
        OutputFormat::Text => print_text_compendium(&entries, args.length),
        OutputFormat::Json => print_json_compendium(&entries, &args, enzyme)?,
        OutputFormat::Tsv => print_tsv_compendium(&entries),
    }
    Ok(())
}

fn print_text_compendium(entries: &[CompendiumEntry], length: u8) {
    println!("Overhangs of length {length}: {}", entries.len());
    println!("{}", "=".repeat(60));

    for entry in entries {
        let record = &entry.record;
        let mut line = format!(
            "{:<10} {:<10} GC {:>3.0}%",
            record.canonical(),
            record.complement(),
            record.gc_content() * 100.0
        );
        if let Some(count) = entry.watson_crick {
            line.push_str(&format!("  WC {count:>5}"));
        }
        if record.is_palindromic() {
            line.push_str("  palindromic");
        }
        if entry.self_misanneal == Some(true) {
            line.push_str("  self-misanneal");
        }
        let labels = flag_labels(record);
        if !labels.is_empty() {
            line.push_str(&format!("  [{}]", labels.join(", ")));
        }
        println!("{line}");
    }
}

fn print_json_compendium(
    entries: &[CompendiumEntry],
    args: &CompendiumArgs,
    enzyme: Enzyme,
) -> anyhow::Result<()> {
    let annotated = args.data_dir.is_some();
    let output = serde_json::json!({
        "length": args.length,
        "enzyme": annotated.then(|| enzyme.to_string()),
        "count": entries.len(),
        "overhangs": entries.iter().map(|e| {
            serde_json::json!({
                "overhang": &e.record,
                "watson_crick": e.watson_crick,
                "self_misanneal": e.self_misanneal,
            })
        }).collect::<Vec<_>>(),
    });

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_tsv_compendium(entries: &[CompendiumEntry]) {
    println!("canonical\tcomplement\tgc_content\tpalindromic\thas_multimer\thas_start_codon\thas_stop_codon\thas_rc_start_codon\thas_rc_stop_codon\twatson_crick\tself_misanneal");
    for entry in entries {
        let record = &entry.record;
        let flags = record.flags().copied().unwrap_or_default();
        println!(
            "{}\t{}\t{:.2}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
            record.canonical(),
            record.complement(),
            record.gc_content(),
            record.is_palindromic(),
            flags.has_multimer,
            flags.has_start_codon,
            flags.has_stop_codon,
            flags.has_rc_start_codon,
            flags.has_rc_stop_codon,
            entry
                .watson_crick
                .map_or_else(|| ".".to_string(), |c| c.to_string()),
            entry
                .self_misanneal
                .map_or_else(|| ".".to_string(), |s| s.to_string()),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_annotate_without_data() {
        let record = OverhangRecord::new("CTAT").unwrap();
        let entry = CompendiumEntry::annotate(record, None);
        assert_eq!(entry.watson_crick, None);
        assert_eq!(entry.self_misanneal, None);
    }

    #[test]
    fn test_annotate_with_data() {
        let labels = ["AATT", "ATAG", "CTAT"].map(String::from).to_vec();
        let mut matrix = AnnealingMatrix::with_labels(labels).unwrap();
        matrix.set("ATAG", "CTAT", 812);
        matrix.set("AATT", "AATT", 950);
        matrix.set("CTAT", "CTAT", 4);

        let entry = CompendiumEntry::annotate(OverhangRecord::new("CTAT").unwrap(), Some(&matrix));
        assert_eq!(entry.watson_crick, Some(812));
        assert_eq!(entry.self_misanneal, Some(true));

        let entry = CompendiumEntry::annotate(OverhangRecord::new("AATT").unwrap(), Some(&matrix));
        assert_eq!(entry.watson_crick, Some(950));
        // A palindrome pairs with a copy of itself
        assert_eq!(entry.self_misanneal, Some(true));

        let entry = CompendiumEntry::annotate(OverhangRecord::new("ATAG").unwrap(), Some(&matrix));
        assert_eq!(entry.record.canonical(), "ATAG");
        assert_eq!(entry.self_misanneal, Some(true));

        // Not in the dataset
        let entry = CompendiumEntry::annotate(OverhangRecord::new("GGAC").unwrap(), Some(&matrix));
        assert_eq!(entry.watson_crick, None);
        assert_eq!(entry.self_misanneal, None);
    }
}
