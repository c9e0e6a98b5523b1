//! Error types for the host side of the link.

use remotebit_protocol::ProtocolError;
use thiserror::Error;

/// Errors that can occur when talking to the board.
#[derive(Debug, Error)]
pub enum LinkError {
    /// The serial port could not be opened or configured.
    #[error("serial port: {0}")]
    Serial(#[from] serialport::Error),

    /// An I/O fault on the underlying stream (including read timeouts).
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The device echoed back something other than the request line.
    /// Indicates line corruption or desync; the protocol has no
    /// resynchronization mechanism.
    #[error("echo mismatch: got {echo:?} for request {request:?}")]
    EchoMismatch {
        /// The request that was sent.
        request: String,
        /// The malformed echo, including any further buffered output.
        echo: String,
    },

    /// Expected the acknowledgement literal, got something else.
    #[error("expected acknowledgement, got {reply:?} for request {request:?}")]
    AckMismatch {
        /// The request that was sent.
        request: String,
        /// The line received instead of `ok`.
        reply: String,
    },

    /// The device did not recognize the command (`ERROR:` reply).
    #[error("device error: {0}")]
    Device(String),

    /// The command's handler faulted on the device (`EXCEPTION:` reply).
    #[error("device exception: {0}")]
    Exception(String),

    /// A reply could not be parsed as the operation's return type.
    #[error("cannot parse reply {reply:?} as {expected}")]
    ReplyParse {
        /// The reply line.
        reply: String,
        /// What the operation expected.
        expected: &'static str,
    },

    /// A protocol-level encode/decode fault.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),
}

/// Result type alias for link operations.
pub type LinkResult<T> = Result<T, LinkError>;
