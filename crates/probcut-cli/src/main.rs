//! Command-line tool for inspecting ProbCut calibration tables.

mod decide;
mod table;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use probcut_core::types::{Depth, Score};

#[derive(Parser, Debug)]
#[command(author, version, about = "Inspect and exercise ProbCut calibration tables")]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: SubCommands,
}

#[derive(Debug, Subcommand)]
enum SubCommands {
    /// Validate a calibration table and print its records
    Check {
        #[arg(value_name = "FILE", value_hint = clap::ValueHint::FilePath)]
        table: PathBuf,

        /// Largest deep depth accepted
        #[arg(long)]
        max_depth: Option<Depth>,
    },
    /// Evaluate one cutoff decision against a fixed shallow value
    Decide {
        #[arg(short, long, value_name = "FILE", value_hint = clap::ValueHint::FilePath)]
        table: PathBuf,

        /// Depth the node would be searched to
        #[arg(short, long)]
        deep: Depth,

        #[arg(short, long, allow_hyphen_values = true)]
        alpha: Score,

        #[arg(short, long, allow_hyphen_values = true)]
        beta: Score,

        /// Value every probe returns
        #[arg(short, long, allow_hyphen_values = true)]
        shallow_value: Score,

        /// Confidence threshold in standard deviations
        #[arg(long, conflicts_with = "selectivity")]
        threshold: Option<f64>,

        /// Selectivity preset (0: most aggressive, 5: most conservative)
        #[arg(long, value_parser = clap::value_parser!(u8).range(0..=5))]
        selectivity: Option<u8>,
    },
}

fn init_logger(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, level),
    )
    .format_timestamp(None)
    .init();
}

fn main() {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    let result = match cli.command {
        SubCommands::Check { table, max_depth } => table::check(&table, max_depth),
        SubCommands::Decide {
            table,
            deep,
            alpha,
            beta,
            shallow_value,
            threshold,
            selectivity,
        } => decide::run(&decide::DecideArgs {
            table,
            deep,
            alpha,
            beta,
            shallow_value,
            threshold,
            selectivity,
        }),
    };

    if let Err(e) = result {
        log::error!("{e:#}");
        std::process::exit(1);
    }
}
