//! `decide` subcommand: run one ProbCut decision with a scripted probe.

use std::path::PathBuf;

use anyhow::{Result, ensure};
use colored::Colorize;

use probcut_core::types::{Depth, Score};
use probcut_core::{Bound, CalibrationStore, Decision, ProbCut, ProbeSearch, Selectivity};

use crate::table;

pub struct DecideArgs {
    pub table: PathBuf,
    pub deep: Depth,
    pub alpha: Score,
    pub beta: Score,
    pub shallow_value: Score,
    pub threshold: Option<f64>,
    pub selectivity: Option<u8>,
}

/// Probe that returns the same value for every window and logs each request.
struct ScriptedProbe {
    value: Score,
    probing: bool,
}

impl ProbeSearch for ScriptedProbe {
    fn probe(&mut self, depth: Depth, alpha: Score, beta: Score) -> Option<Score> {
        println!("  probe depth {depth} window ({alpha}, {beta}) -> {}", self.value);
        Some(self.value)
    }

    fn is_probing(&self) -> bool {
        self.probing
    }

    fn set_probing(&mut self, probing: bool) {
        self.probing = probing;
    }
}

/// Builds the ProbCut instance the command line asks for.
///
/// `--threshold` enables ProbCut with that threshold, `--selectivity` applies a
/// preset (which may disable it), and neither enables it with the default.
fn configure(args: &DecideArgs, store: CalibrationStore) -> Result<ProbCut> {
    ensure!(
        args.alpha < args.beta,
        "alpha ({}) must be less than beta ({})",
        args.alpha,
        args.beta
    );

    let mut probcut = ProbCut::with_store(store);
    match (args.threshold, args.selectivity) {
        (Some(t), _) => {
            probcut.set_threshold(t)?;
            probcut.set_enabled(true);
        }
        (None, Some(level)) => probcut.set_selectivity(Selectivity::from_u8(level)),
        (None, None) => probcut.set_enabled(true),
    }
    Ok(probcut)
}

fn decide(probcut: &ProbCut, args: &DecideArgs) -> Decision {
    let mut ctx = ScriptedProbe {
        value: args.shallow_value,
        probing: false,
    };
    probcut.try_cutoff(&mut ctx, args.deep, args.alpha, args.beta)
}

pub fn run(args: &DecideArgs) -> Result<()> {
    let store = table::load(&args.table, None)?;
    let probcut = configure(args, store)?;

    println!(
        "depth {} window ({}, {}) threshold {:.2}, {} record(s)",
        args.deep,
        args.alpha,
        args.beta,
        probcut.threshold(),
        probcut.store().size(args.deep)
    );

    match decide(&probcut, args) {
        Decision::NoCutoff => println!("{}", "no cutoff".yellow()),
        Decision::Cutoff { value, bound } => {
            let kind = match bound {
                Bound::Lower => "fail-high (lower bound)",
                Bound::Upper => "fail-low (upper bound)",
            };
            println!("{} {value} {kind}", "cutoff".green().bold());
        }
    }
    Ok(())
}
