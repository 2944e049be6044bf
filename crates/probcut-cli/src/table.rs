//! `check` subcommand: validate and print a calibration table.

use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;

use probcut_core::CalibrationStore;
use probcut_core::calibration;
use probcut_core::types::Depth;

/// Loads a table into a fresh store, reporting the file on failure.
pub fn load(path: &Path, max_depth: Option<Depth>) -> Result<CalibrationStore> {
    let mut store = match max_depth {
        Some(depth) => CalibrationStore::with_max_depth(depth),
        None => CalibrationStore::new(),
    };
    calibration::load_file(path, &mut store)
        .with_context(|| format!("failed to load calibration table '{}'", path.display()))?;
    Ok(store)
}

pub fn check(path: &Path, max_depth: Option<Depth>) -> Result<()> {
    let store = load(path, max_depth)?;

    println!(
        "{} {} ({} records, max depth {})",
        "OK".green().bold(),
        path.display(),
        store.len(),
        store.max_depth()
    );

    for deep in 0..=store.max_depth() {
        let cutoffs = store.cutoffs(deep);
        if cutoffs.is_empty() {
            continue;
        }
        println!("{}", format!("depth {deep}").cyan());
        for (idx, cutoff) in cutoffs.iter().enumerate() {
            println!("  [{idx}] {cutoff}");
        }
    }

    if store.is_empty() {
        println!("{}", "table contains no records".yellow());
    }
    Ok(())
}
