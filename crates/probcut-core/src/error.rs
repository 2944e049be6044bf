//! Error types for calibration and configuration.

use thiserror::Error;

use crate::types::Depth;

/// Errors reported while configuring ProbCut.
///
/// The decision path itself never fails; these only surface when records or
/// settings are supplied.
#[derive(Debug, Error)]
pub enum ProbCutError {
    /// Deep depth is beyond what the store accepts.
    #[error("deep depth {depth} exceeds the maximum calibrated depth {max}")]
    DepthOutOfRange { depth: Depth, max: Depth },

    /// Residual standard deviation must be strictly positive.
    #[error("sigma must be positive, got {0}")]
    InvalidSigma(f32),

    /// Slope must be strictly positive for the probe bound to be derived.
    #[error("slope `a` must be positive, got {0}")]
    InvalidSlope(f32),

    /// A coefficient is NaN or infinite.
    #[error("coefficient `{name}` is not finite")]
    NonFiniteCoefficient { name: &'static str },

    /// The probe would not be cheaper than the search it predicts.
    #[error("shallow depth {shallow} must be less than deep depth {deep}")]
    ShallowNotBelowDeep { shallow: Depth, deep: Depth },

    /// Confidence threshold must be finite and non-negative.
    #[error("threshold must be a finite non-negative number, got {0}")]
    InvalidThreshold(f64),

    /// Malformed line in a calibration table.
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },

    /// A well-formed line holding a record the store rejected.
    #[error("line {line}: invalid calibration record")]
    Record {
        line: usize,
        #[source]
        source: Box<ProbCutError>,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
