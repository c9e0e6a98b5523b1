//! Error types for the wire protocol.

use thiserror::Error;

/// Errors that can occur when encoding or decoding protocol lines.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// The command name did not match any entry in the vocabulary.
    #[error("unknown command: {0}")]
    UnknownCommand(String),

    /// A command was given the wrong number of arguments.
    #[error("{command}: expected {expected} argument(s), got {actual}")]
    BadArity {
        /// The command name.
        command: String,
        /// Number of arguments the command takes.
        expected: usize,
        /// Number of arguments received.
        actual: usize,
    },

    /// An argument or value could not be parsed as its declared type.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A reply line did not match the expected shape.
    #[error("invalid reply: {0}")]
    InvalidReply(String),

    /// A pixel grid string was malformed.
    #[error("invalid image: {0}")]
    InvalidImage(String),

    /// A line exceeded the maximum supported length.
    #[error("line too long: max {max} bytes, got {actual}")]
    LineTooLong { max: usize, actual: usize },
}

/// Result type alias for protocol operations.
pub type ProtocolResult<T> = Result<T, ProtocolError>;
