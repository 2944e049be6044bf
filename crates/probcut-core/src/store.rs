//! Calibration storage keyed by deep depth.

use log::debug;

use crate::constants::MAX_PROBCUT_DEPTH;
use crate::cutoff::Cutoff;
use crate::error::ProbCutError;
use crate::types::Depth;

/// Ordered calibration records for each deep depth.
///
/// Records are append-only and kept in insertion order. Depths above
/// [`max_depth`](Self::max_depth) are never stored and always look up as
/// missing.
#[derive(Clone, Debug)]
pub struct CalibrationStore {
    max_depth: Depth,
    slots: Vec<Vec<Cutoff>>,
}

impl Default for CalibrationStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CalibrationStore {
    /// Creates an empty store accepting depths up to [`MAX_PROBCUT_DEPTH`].
    pub fn new() -> Self {
        Self::with_max_depth(MAX_PROBCUT_DEPTH)
    }

    /// Creates an empty store accepting depths up to `max_depth`.
    pub fn with_max_depth(max_depth: Depth) -> Self {
        CalibrationStore {
            max_depth,
            slots: Vec::new(),
        }
    }

    /// Largest deep depth this store accepts.
    #[inline]
    pub fn max_depth(&self) -> Depth {
        self.max_depth
    }

    /// Appends a record to the sequence for `cutoff.deep`.
    ///
    /// Invalid records and depths beyond the maximum are rejected and leave
    /// the store untouched.
    pub fn add_cutoff(&mut self, cutoff: Cutoff) -> Result<(), ProbCutError> {
        if cutoff.deep > self.max_depth {
            debug!("rejecting cutoff {cutoff}: depth out of range");
            return Err(ProbCutError::DepthOutOfRange {
                depth: cutoff.deep,
                max: self.max_depth,
            });
        }
        if let Err(err) = cutoff.validate() {
            debug!("rejecting cutoff {cutoff}: {err}");
            return Err(err);
        }

        let idx = cutoff.deep as usize;
        if self.slots.len() <= idx {
            self.slots.resize_with(idx + 1, Vec::new);
        }
        self.slots[idx].push(cutoff);
        Ok(())
    }

    /// Returns the `index`-th record stored for `deep`.
    #[inline]
    pub fn get_cutoff(&self, deep: Depth, index: usize) -> Option<Cutoff> {
        self.cutoffs(deep).get(index).copied()
    }

    /// Number of records stored for `deep`.
    #[inline]
    pub fn size(&self, deep: Depth) -> usize {
        self.cutoffs(deep).len()
    }

    /// All records for `deep` in insertion order.
    #[inline]
    pub fn cutoffs(&self, deep: Depth) -> &[Cutoff] {
        if deep > self.max_depth {
            return &[];
        }
        self.slots
            .get(deep as usize)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Total number of records across all depths.
    pub fn len(&self) -> usize {
        self.slots.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Vec::is_empty)
    }

    /// Iterates over every record, ordered by deep depth then insertion.
    pub fn iter(&self) -> impl Iterator<Item = &Cutoff> {
        self.slots.iter().flatten()
    }

    /// Removes all records, keeping the depth limit.
    pub fn clear(&mut self) {
        self.slots.clear();
    }
}
