//! Error types for staged progress simulation.

use thiserror::Error;

/// Errors raised while building or starting a simulated operation.
///
/// Nothing can fail once a run is ticking; every variant here is reported
/// synchronously, before any timer is scheduled.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProgressError {
    /// The stage list cannot drive a run.
    #[error("invalid stage sequence: {0}")]
    InvalidSequence(SequenceDefect),

    /// Driver settings are out of range.
    #[error("invalid driver config: {reason}")]
    InvalidConfig {
        /// What is wrong with the config
        reason: String,
    },

    /// A catalog id did not match any entry.
    #[error("unknown {kind} '{id}'")]
    UnknownCatalogEntry {
        /// Catalog that was searched (industry, model, ...)
        kind: &'static str,
        /// The id that was requested
        id: String,
    },
}

/// What makes a stage list malformed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SequenceDefect {
    /// No stages at all.
    #[error("sequence is empty")]
    Empty,

    /// A threshold above 100.
    #[error("stage {index} has threshold {threshold} above 100")]
    ThresholdOutOfRange {
        /// Position of the offending stage
        index: usize,
        /// Its threshold
        threshold: u8,
    },

    /// A threshold that does not exceed its predecessor.
    #[error("stage {index} threshold {threshold} does not exceed previous {previous}")]
    NotIncreasing {
        /// Position of the offending stage
        index: usize,
        /// Threshold of the stage before it
        previous: u8,
        /// Its threshold
        threshold: u8,
    },

    /// The last stage does not end at 100.
    #[error("final stage threshold is {threshold}, expected 100")]
    FinalNotComplete {
        /// Threshold of the last stage
        threshold: u8,
    },
}

impl From<SequenceDefect> for ProgressError {
    fn from(defect: SequenceDefect) -> Self {
        ProgressError::InvalidSequence(defect)
    }
}

/// Result type for docflow operations.
pub type Result<T> = std::result::Result<T, ProgressError>;
