//! Calibration table reader.
//!
//! Tables are plain CSV with one record per line:
//!
//! ```text
//! deep,shallow,a,b,sigma
//! 6,2,1.02,-0.35,3.10
//! # comments and blank lines are skipped
//! 8,4,0.98,0.12,2.75
//! ```
//!
//! The header line is optional.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::debug;

use crate::cutoff::Cutoff;
use crate::error::ProbCutError;
use crate::store::CalibrationStore;
use crate::types::Depth;

/// Column header written by [`write_table`] and accepted by the readers.
pub const HEADER: &str = "deep,shallow,a,b,sigma";

/// Parses a single table line into a record.
///
/// Returns `Ok(None)` for blank lines, comments and the header.
pub fn parse_line(line: &str, line_no: usize) -> Result<Option<Cutoff>, ProbCutError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') || line.eq_ignore_ascii_case(HEADER) {
        return Ok(None);
    }

    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    if fields.len() != 5 {
        return Err(ProbCutError::Parse {
            line: line_no,
            message: format!("expected 5 fields, found {}", fields.len()),
        });
    }

    let depth = |idx: usize, name: &str| -> Result<Depth, ProbCutError> {
        fields[idx].parse::<Depth>().map_err(|e| ProbCutError::Parse {
            line: line_no,
            message: format!("invalid {name} '{}': {e}", fields[idx]),
        })
    };
    let coef = |idx: usize, name: &str| -> Result<f32, ProbCutError> {
        fields[idx].parse::<f32>().map_err(|e| ProbCutError::Parse {
            line: line_no,
            message: format!("invalid {name} '{}': {e}", fields[idx]),
        })
    };

    Ok(Some(Cutoff::new(
        depth(1, "shallow depth")?,
        depth(0, "deep depth")?,
        coef(2, "a")?,
        coef(3, "b")?,
        coef(4, "sigma")?,
    )))
}

/// Reads a table and adds every record to `store`.
///
/// A record the store rejects is reported with its line number and aborts the
/// load; records added before it stay in the store.
pub fn load_into<R: BufRead>(
    reader: R,
    store: &mut CalibrationStore,
) -> Result<usize, ProbCutError> {
    let mut count = 0;
    for (idx, line) in reader.lines().enumerate() {
        let line_no = idx + 1;
        let Some(cutoff) = parse_line(&line?, line_no)? else {
            continue;
        };
        store
            .add_cutoff(cutoff)
            .map_err(|e| ProbCutError::Record {
                line: line_no,
                source: Box::new(e),
            })?;
        count += 1;
    }
    debug!("loaded {count} probcut calibration records");
    Ok(count)
}

/// Loads a calibration table file into `store`.
pub fn load_file<P: AsRef<Path>>(
    path: P,
    store: &mut CalibrationStore,
) -> Result<usize, ProbCutError> {
    let path = path.as_ref();
    debug!("reading probcut calibration from {}", path.display());
    let file = File::open(path)?;
    load_into(BufReader::new(file), store)
}

/// Writes the store as a table that [`load_into`] reads back.
pub fn write_table<W: std::io::Write>(
    writer: &mut W,
    store: &CalibrationStore,
) -> std::io::Result<()> {
    writeln!(writer, "{HEADER}")?;
    for c in store.iter() {
        writeln!(writer, "{},{},{},{},{}", c.deep, c.shallow, c.a, c.b, c.sigma)?;
    }
    Ok(())
}
