use clap::Parser;
use tracing_subscriber::EnvFilter;

mod annealing;
mod cli;
mod core;
mod evaluation;
mod parsing;
mod report;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity flag
    let filter = if cli.verbose {
        EnvFilter::new("overhang=debug,info")
    } else {
        EnvFilter::new("overhang=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();

    match cli.command {
        cli::Commands::Evaluate(args) => {
            cli::evaluate::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::Subset(args) => {
            cli::subset::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::Compendium(args) => {
            cli::compendium::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::Enzymes(args) => {
            cli::enzymes::run(args, cli.format, cli.verbose)?;
        }
    }

    Ok(())
}
