use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

use crate::annealing::store::{AnnealingDataStore, AnnealingMatrixProvider};
use crate::cli::{load_registry, OutputFormat};
use crate::core::types::{AnnealingCondition, DatasetId, Enzyme};

#[derive(Args)]
pub struct EnzymesArgs {
    /// JSON file mapping enzyme names to dataset ids
    #[arg(long)]
    pub enzyme_map: Option<PathBuf>,

    /// Check which datasets are present in this directory
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Ligation temperature in °C
    #[arg(long, default_value = "37")]
    pub temperature: u32,

    /// Ligation duration in hours
    #[arg(long, default_value = "1")]
    pub duration: u32,
}

struct EnzymeEntry {
    enzyme: Enzyme,
    dataset: Option<DatasetId>,
    /// Sequences in the loaded dataset, when a data directory was given
    sequences: Option<usize>,
}

pub fn run(args: EnzymesArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let registry = load_registry(args.enzyme_map.as_deref())?;
    let condition = AnnealingCondition::new(args.temperature, args.duration);

    let store = match &args.data_dir {
        Some(dir) => Some(AnnealingDataStore::load_from_dir(dir).with_context(|| {
            format!("Failed to load annealing data from {}", dir.display())
        })?),
        None => None,
    };

    if verbose {
        if let Some(store) = &store {
            for (condition, dataset) in store.datasets() {
                eprintln!("Found {dataset} ({condition})");
            }
        }
    }

    let entries: Vec<EnzymeEntry> = Enzyme::ALL
        .into_iter()
        .map(|enzyme| {
            let dataset = registry.dataset_for(enzyme).cloned();
            let sequences = match (&store, &dataset) {
                (Some(store), Some(dataset)) => {
                    Some(store.lookup(dataset, &condition).map_or(0, |m| m.len()))
                }
                _ => None,
            };
            EnzymeEntry {
                enzyme,
                dataset,
                sequences,
            }
        })
        .collect();

    match format {
        OutputFormat::Text => print_text_enzymes(&entries, condition),
        OutputFormat::Json => print_json_enzymes(&entries, condition)?,
        OutputFormat::Tsv => print_tsv_enzymes(&entries),
    }
    Ok(())
}

fn print_text_enzymes(entries: &[EnzymeEntry], condition: AnnealingCondition) {
    println!("Enzyme datasets ({condition}):");
    for entry in entries {
        let dataset = entry
            .dataset
            .as_ref()
            .map_or_else(|| "-".to_string(), ToString::to_string);
        match entry.sequences {
            Some(0) => println!("  {:<8} {dataset}  (not found)", entry.enzyme.name()),
            Some(n) => println!("  {:<8} {dataset}  ({n} sequences)", entry.enzyme.name()),
            None => println!("  {:<8} {dataset}", entry.enzyme.name()),
        }
    }
}

fn print_json_enzymes(entries: &[EnzymeEntry], condition: AnnealingCondition) -> anyhow::Result<()> {
    let output = serde_json::json!({
        "condition": condition,
        "enzymes": entries.iter().map(|e| {
            serde_json::json!({
                "enzyme": e.enzyme.name(),
                "dataset": e.dataset,
                "sequences": e.sequences,
            })
        }).collect::<Vec<_>>(),
    });

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_tsv_enzymes(entries: &[EnzymeEntry]) {
    println!("enzyme\tdataset\tsequences");
    for entry in entries {
        println!(
            "{}\t{}\t{}",
            entry.enzyme.name(),
            entry.dataset.as_ref().map_or(".", |d| d.0.as_str()),
            entry
                .sequences
                .map_or_else(|| ".".to_string(), |n| n.to_string()),
        );
    }
}
