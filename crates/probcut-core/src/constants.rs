//! Global constants

use crate::types::{Depth, Score};

/// Default maximum deep depth a calibration store accepts.
pub const MAX_PROBCUT_DEPTH: Depth = 20;

/// Infinity score for search windows.
///
/// A window edge at or beyond this value is open, and no probe is run against it.
pub const SCORE_INF: Score = 30000;

/// Threshold used by a freshly constructed [`ProbCut`](crate::ProbCut).
pub const DEFAULT_THRESHOLD: f64 = 1.0;
