use thiserror::Error;

/// Errors produced by the scoring core.
///
/// Nothing in `core` or `models` recovers from one of these internally; they
/// propagate to the caller (library user or CLI) as typed values.
#[derive(Debug, Error, PartialEq)]
pub enum DerError {
    /// A turn with `start >= end`, a negative timestamp, or a non-finite value.
    #[error("invalid turn for speaker {speaker:?}: start={start}, end={end}")]
    InvalidTurn {
        speaker: String,
        start: f64,
        end: f64,
    },

    /// A UEM was supplied but intersecting it with the inputs leaves zero
    /// scored duration. Not fatal: the caller gets zero metrics back.
    #[error("scoring domain is empty after applying the UEM")]
    EmptyScoringDomain,

    /// A recording present in the reference set is absent from the
    /// hypothesis set, and `skip_missing` was not requested.
    #[error("recording {0:?} is missing from the hypothesis set")]
    MissingRecording(String),

    /// A malformed line in an RTTM or UEM file.
    #[error("{file}:{line}: {reason}")]
    ParseError {
        file: String,
        line: usize,
        reason: String,
    },

    /// An invalid argument to `compute_der` (negative collar, unknown region
    /// filter string, etc).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

pub type Result<T> = std::result::Result<T, DerError>;
