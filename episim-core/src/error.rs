//! Errors in the library.
use thiserror::Error;

/// Errors in the library.
///
/// Failures of environments and agents are not wrapped in this type. They are
/// propagated as they are, with some context attached by the caller.
#[derive(Error, Debug)]
pub enum EpisimError {
    /// Invalid configuration, detected when an object is constructed.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// An observation does not have the shape of the frames in the current state.
    #[error("Observation shape error: expected {expected:?}, found {found:?}")]
    ObservationShapeError {
        /// Frame shape of the current state.
        expected: Vec<usize>,

        /// Shape of the given observation.
        found: Vec<usize>,
    },

    /// Record key error.
    #[error("Record key error: {0}")]
    RecordKeyError(String),

    /// Record value type error.
    #[error("Record value type error: {0}")]
    RecordValueTypeError(String),
}

impl EpisimError {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Self::ConfigurationError(msg.into())
    }
}
