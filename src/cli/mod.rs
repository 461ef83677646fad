//! Command-line interface for overhang.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **evaluate**: Check an overhang set for structural and annealing defects
//! - **subset**: Find the largest subset of an overhang set that is free of misannealing
//! - **compendium**: List every overhang of a given length with its properties
//! - **enzymes**: Show the enzyme to annealing dataset mapping
//!
//! ## Usage
//!
//! ```text
//! # Evaluate overhangs given on the command line
//! overhang evaluate --data-dir data CTAT GGAC TGTT
//!
//! # Evaluate a predefined set with another enzyme
//! overhang evaluate --data-dir data --set emma --enzyme BsaI
//!
//! # Read overhangs from a file, JSON output for scripting
//! overhang evaluate --data-dir data --input overhangs.txt --format json
//!
//! # Largest misannealing-free subset
//! overhang subset --data-dir data CTAT GGAC TGTT
//!
//! # All 3-nt overhangs
//! overhang compendium --length 3 --format tsv
//! ```

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};

use crate::annealing::registry::EnzymeRegistry;
use crate::annealing::store::AnnealingDataStore;
use crate::core::sets::PredefinedSet;
use crate::core::types::{AnnealingCondition, Enzyme};
use crate::evaluation::evaluator::{
    EvaluatorConfig, DEFAULT_NOISE_THRESHOLD, DEFAULT_STRENGTH_THRESHOLD,
};
use crate::parsing::overhangs::{parse_overhang_file, parse_overhang_text};
use crate::report::{JsonReport, ReportAdapter, TextReport, TsvReport};

pub mod compendium;
pub mod enzymes;
pub mod evaluate;
pub mod subset;

#[derive(Parser)]
#[command(name = "overhang")]
#[command(author = "Fulcrum Genomics")]
#[command(version)]
#[command(about = "Evaluate Golden Gate overhang sets for structural and annealing defects")]
#[command(
    long_about = "overhang checks whether a set of Golden Gate overhangs can be used together in a one-pot assembly.\n\nIt reports:\n- Structural defects: duplicates, palindromes, reverse-complement collisions\n- Annealing defects from enzyme ligation data: weak pairing, self-misannealing, misannealing pairs\n- The largest subset of overhangs that are pairwise free of misannealing"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check an overhang set for defects
    Evaluate(evaluate::EvaluateArgs),

    /// Find the largest compatible subset of an overhang set
    Subset(subset::SubsetArgs),

    /// List all overhangs of a given length
    Compendium(compendium::CompendiumArgs),

    /// Show which annealing dataset each enzyme uses
    Enzymes(enzymes::EnzymesArgs),
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}

impl OutputFormat {
    /// Report adapter producing this format
    #[must_use]
    pub fn report_adapter(self) -> Box<dyn ReportAdapter> {
        match self {
            Self::Text => Box::new(TextReport),
            Self::Json => Box::new(JsonReport),
            Self::Tsv => Box::new(TsvReport),
        }
    }
}

/// Where the overhangs to evaluate come from
#[derive(clap::Args)]
pub struct OverhangSetArgs {
    /// Overhang sequences (separated by spaces or commas)
    pub overhangs: Vec<String>,

    /// File of overhangs, one per line or comma separated ('#' starts a comment)
    #[arg(short, long, conflicts_with = "set")]
    pub input: Option<PathBuf>,

    /// Use a predefined overhang set
    #[arg(long, value_enum, conflicts_with = "overhangs")]
    pub set: Option<PredefinedSet>,

    /// Name shown in reports
    #[arg(long)]
    pub name: Option<String>,
}

impl OverhangSetArgs {
    /// Report name and raw overhang strings, in input order
    ///
    /// # Errors
    ///
    /// Returns an error if the input file cannot be read or no overhangs were given.
    pub fn collect(&self) -> anyhow::Result<(String, Vec<String>)> {
        let mut overhangs = Vec::new();
        let mut default_name = "custom".to_string();

        if let Some(set) = self.set {
            overhangs.extend(set.overhangs());
            default_name = set.display_name().to_string();
        }
        if let Some(path) = &self.input {
            let parsed = parse_overhang_file(path)
                .with_context(|| format!("Failed to read overhangs from {}", path.display()))?;
            overhangs.extend(parsed);
            if let Some(stem) = path.file_stem() {
                default_name = stem.to_string_lossy().to_string();
            }
        }
        for arg in &self.overhangs {
            overhangs.extend(parse_overhang_text(arg));
        }

        if overhangs.is_empty() {
            anyhow::bail!("No overhangs given (pass sequences, --input or --set)");
        }
        Ok((self.name.clone().unwrap_or(default_name), overhangs))
    }
}

/// Annealing data and enzyme selection
#[derive(clap::Args)]
pub struct AnnealingArgs {
    /// Directory of annealing datasets, laid out as <dir>/<T>C_<D>h/<dataset>.csv
    #[arg(long)]
    pub data_dir: PathBuf,

    /// Restriction enzyme (BsaI, BsmBI, Esp3I, BbsI)
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

impl AnnealingArgs {
    #[must_use]
    pub fn condition(&self) -> AnnealingCondition {
        AnnealingCondition::new(self.temperature, self.duration)
    }

    /// # Errors
    ///
    /// Returns an error if `--enzyme` does not name a supported enzyme.
    pub fn parse_enzyme(&self) -> anyhow::Result<Enzyme> {
        parse_enzyme(&self.enzyme)
    }

    /// # Errors
    ///
    /// Returns an error if the data directory cannot be loaded.
    pub fn load_store(&self) -> anyhow::Result<AnnealingDataStore> {
        AnnealingDataStore::load_from_dir(&self.data_dir).with_context(|| {
            format!(
                "Failed to load annealing data from {}",
                self.data_dir.display()
            )
        })
    }

    /// # Errors
    ///
    /// Returns an error if `--enzyme-map` is given and cannot be loaded.
    pub fn load_registry(&self) -> anyhow::Result<EnzymeRegistry> {
        load_registry(self.enzyme_map.as_deref())
    }
}

/// Evaluation thresholds
#[derive(clap::Args)]
pub struct ThresholdArgs {
    /// Minimum Watson-Crick ligation count for a reliable pairing
    #[arg(long, default_value_t = DEFAULT_STRENGTH_THRESHOLD)]
    pub strength_threshold: u32,

    /// Cross-ligation counts above this are reported as misannealing
    #[arg(long, default_value_t = DEFAULT_NOISE_THRESHOLD)]
    pub noise_threshold: u32,

    /// Report overhangs differing in fewer than this many positions (0 disables)
    #[arg(long, default_value = "0")]
    pub difference_threshold: usize,
}

impl ThresholdArgs {
    #[must_use]
    pub fn config(&self, condition: AnnealingCondition) -> EvaluatorConfig {
        EvaluatorConfig {
            strength_threshold: self.strength_threshold,
            noise_threshold: self.noise_threshold,
            difference_threshold: self.difference_threshold,
            condition,
        }
    }
}

pub(crate) fn parse_enzyme(name: &str) -> anyhow::Result<Enzyme> {
    Ok(name.parse::<Enzyme>()?)
}

pub(crate) fn load_registry(path: Option<&std::path::Path>) -> anyhow::Result<EnzymeRegistry> {
    match path {
        Some(path) => EnzymeRegistry::load_from_file(path)
            .with_context(|| format!("Failed to load enzyme map {}", path.display())),
        None => Ok(EnzymeRegistry::default()),
    }
}
