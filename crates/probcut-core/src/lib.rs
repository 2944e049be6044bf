//! Statistical forward pruning (ProbCut) for alpha-beta search.
//!
//! A [`ProbCut`] instance owns a [`CalibrationStore`] of fitted linear models
//! relating shallow-search values to deep-search values, plus the confidence
//! settings used to decide whether a deep search can be skipped.

pub mod calibration;
pub mod constants;
pub mod cutoff;
pub mod error;
pub mod probcut;
pub mod search;
pub mod store;
pub mod types;

pub use cutoff::Cutoff;
pub use error::ProbCutError;
pub use probcut::{ProbCut, Selectivity};
pub use search::{Bound, Decision, ProbeSearch};
pub use store::CalibrationStore;
