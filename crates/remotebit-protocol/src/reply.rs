//! Reply parsing and encoding.
//!
//! Every request is answered by exactly one reply line, in one of three
//! shapes distinguished by a prefix or fixed literal:
//!
//! - the acknowledgement literal `ok` for commands with no return value,
//! - a value line carrying the command-specific encoding of the result,
//! - `ERROR: <message>` (unrecognized command) or `EXCEPTION: <message>`
//!   (the command's handler faulted).

use std::fmt;

use crate::error::{ProtocolError, ProtocolResult};

/// Acknowledgement literal for commands with no return value.
pub const ACK: &str = "ok";

/// Prefix of an unknown-command reply.
pub const ERROR_PREFIX: &str = "ERROR:";

/// Prefix of a handler-fault reply.
pub const EXCEPTION_PREFIX: &str = "EXCEPTION:";

/// A parsed reply line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// The acknowledgement literal `ok`.
    Ack,

    /// A value line. May be empty (`radio.receive_bytes` with no pending
    /// message). Decoding into the operation's return type is up to the
    /// caller, which knows what it asked for.
    Value(String),

    /// `ERROR:` reply — the dispatcher did not recognize the command.
    Error(String),

    /// `EXCEPTION:` reply — the command's handler faulted.
    Exception(String),
}

impl Reply {
    /// Parse a reply line (without the terminator).
    ///
    /// Trailing whitespace is trimmed before matching. Any line that is not
    /// the acknowledgement literal and carries no error prefix is a value.
    pub fn parse(line: &str) -> Reply {
        let line = line.trim_end();
        if line == ACK {
            return Reply::Ack;
        }
        if let Some(message) = line.strip_prefix(ERROR_PREFIX) {
            return Reply::Error(message.trim_start().to_string());
        }
        if let Some(message) = line.strip_prefix(EXCEPTION_PREFIX) {
            return Reply::Exception(message.trim_start().to_string());
        }
        Reply::Value(line.to_string())
    }

    /// Encode the reply as a wire line (without the terminator).
    pub fn encode(&self) -> String {
        match self {
            Reply::Ack => ACK.to_string(),
            Reply::Value(value) => value.clone(),
            Reply::Error(message) => format!("{ERROR_PREFIX} {message}"),
            Reply::Exception(message) => format!("{EXCEPTION_PREFIX} {message}"),
        }
    }

    /// Check whether this is an error or exception reply.
    pub fn is_fault(&self) -> bool {
        matches!(self, Reply::Error(_) | Reply::Exception(_))
    }

    /// Get the value if this is a value reply.
    pub fn as_value(&self) -> Option<&str> {
        match self {
            Reply::Value(value) => Some(value),
            _ => None,
        }
    }

    /// Extract the value, treating any other shape as an invalid reply.
    pub fn into_value(self) -> ProtocolResult<String> {
        match self {
            Reply::Value(value) => Ok(value),
            other => Err(ProtocolError::InvalidReply(format!(
                "expected a value, got {other}"
            ))),
        }
    }
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ack() {
        assert_eq!(Reply::parse("ok"), Reply::Ack);
        assert_eq!(Reply::parse("ok\r"), Reply::Ack);
    }

    #[test]
    fn test_parse_value() {
        assert_eq!(Reply::parse("123"), Reply::Value("123".to_string()));
        assert_eq!(Reply::parse("True"), Reply::Value("True".to_string()));
        assert_eq!(Reply::parse(""), Reply::Value(String::new()));
    }

    #[test]
    fn test_parse_error() {
        let reply = Reply::parse("ERROR: Unknown command.");
        assert_eq!(reply, Reply::Error("Unknown command.".to_string()));
        assert!(reply.is_fault());
    }

    #[test]
    fn test_parse_exception() {
        let reply = Reply::parse("EXCEPTION: invalid pin: 99");
        assert_eq!(reply, Reply::Exception("invalid pin: 99".to_string()));
        assert!(reply.is_fault());
    }

    #[test]
    fn test_encode_round_trip() {
        for reply in [
            Reply::Ack,
            Reply::Value("1 2 3".to_string()),
            Reply::Error("Unknown command.".to_string()),
            Reply::Exception("hardware fault".to_string()),
        ] {
            assert_eq!(Reply::parse(&reply.encode()), reply);
        }
    }

    #[test]
    fn test_into_value_rejects_ack() {
        assert!(Reply::Ack.into_value().is_err());
        assert_eq!(
            Reply::Value("7".to_string()).into_value().unwrap(),
            "7"
        );
    }
}
