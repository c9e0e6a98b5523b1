//! Line codec for the wire.
//!
//! Requests and replies are plain text lines terminated with `\r\n`. The
//! codec accumulates raw bytes (serial reads arrive in arbitrary chunks) and
//! splits out complete lines.

use bytes::BytesMut;

use crate::error::{ProtocolError, ProtocolResult};

/// Maximum request/reply line length.
///
/// Long enough for an escaped speech phrase or a full radio payload rendered
/// as decimal bytes.
pub const MAX_LINE_LENGTH: usize = 1024;

/// Line terminator used on the wire.
pub const LINE_TERMINATOR: &str = "\r\n";

/// A codec for reading and writing protocol lines.
///
/// Accumulates received bytes until a complete line is available. `\r\n`,
/// `\r`, and `\n` framing all decode the same way, and empty lines are
/// preserved (`radio.receive_bytes` replies an empty value line when no
/// message is pending).
#[derive(Debug, Default)]
pub struct LineCodec {
    /// Buffer for accumulating incoming data.
    buffer: BytesMut,
    /// A line ended with `\r` at the end of the buffer; the matching `\n`
    /// may still be in flight and must be dropped when it arrives.
    pending_lf: bool,
}

impl LineCodec {
    /// Create a new line codec.
    pub fn new() -> Self {
        LineCodec {
            buffer: BytesMut::with_capacity(MAX_LINE_LENGTH),
            pending_lf: false,
        }
    }

    /// Add received data to the buffer.
    pub fn push(&mut self, data: &[u8]) {
        self.buffer.extend_from_slice(data);
    }

    /// Try to decode a complete line from the buffer.
    ///
    /// Returns `Some(line)` without the terminator, or `None` if more data
    /// is needed.
    pub fn decode_line(&mut self) -> Option<String> {
        // Drop a \n completing a \r\n pair that was split across reads.
        if self.pending_lf {
            if let Some(&b) = self.buffer.first() {
                if b == b'\n' {
                    let _ = self.buffer.split_to(1);
                }
                self.pending_lf = false;
            }
        }

        let end = self
            .buffer
            .iter()
            .position(|&b| b == b'\r' || b == b'\n')?;

        let line_data = self.buffer.split_to(end);
        let terminator = self.buffer.split_to(1)[0];
        if terminator == b'\r' {
            match self.buffer.first() {
                Some(b'\n') => {
                    let _ = self.buffer.split_to(1);
                }
                Some(_) => {}
                None => self.pending_lf = true,
            }
        }

        Some(String::from_utf8_lossy(&line_data).to_string())
    }

    /// Encode a line for transmission, appending the `\r\n` terminator.
    pub fn encode_line(line: &str) -> ProtocolResult<Vec<u8>> {
        if line.len() > MAX_LINE_LENGTH {
            return Err(ProtocolError::LineTooLong {
                max: MAX_LINE_LENGTH,
                actual: line.len(),
            });
        }
        let mut buf = Vec::with_capacity(line.len() + LINE_TERMINATOR.len());
        buf.extend_from_slice(line.as_bytes());
        buf.extend_from_slice(LINE_TERMINATOR.as_bytes());
        Ok(buf)
    }

    /// Get the number of buffered bytes.
    pub fn buffered_len(&self) -> usize {
        self.buffer.len()
    }

    /// Clear the buffer.
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.pending_lf = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_line() {
        let encoded = LineCodec::encode_line("pin.read_digital 0").unwrap();
        assert_eq!(encoded, b"pin.read_digital 0\r\n");
    }

    #[test]
    fn test_encode_line_too_long() {
        let line = "x".repeat(MAX_LINE_LENGTH + 1);
        assert!(matches!(
            LineCodec::encode_line(&line),
            Err(ProtocolError::LineTooLong { .. })
        ));
    }

    #[test]
    fn test_decode_line() {
        let mut codec = LineCodec::new();
        codec.push(b"ok\r\n123\r\n");

        assert_eq!(codec.decode_line(), Some("ok".to_string()));
        assert_eq!(codec.decode_line(), Some("123".to_string()));
        assert!(codec.decode_line().is_none());
    }

    #[test]
    fn test_partial_line() {
        let mut codec = LineCodec::new();
        codec.push(b"tempera");
        assert!(codec.decode_line().is_none());

        codec.push(b"ture\r\n");
        assert_eq!(codec.decode_line(), Some("temperature".to_string()));
    }

    #[test]
    fn test_empty_line_preserved() {
        let mut codec = LineCodec::new();
        codec.push(b"\r\nTrue\r\n");

        assert_eq!(codec.decode_line(), Some(String::new()));
        assert_eq!(codec.decode_line(), Some("True".to_string()));
        assert!(codec.decode_line().is_none());
    }

    #[test]
    fn test_crlf_split_across_reads() {
        let mut codec = LineCodec::new();
        codec.push(b"ok\r");
        assert_eq!(codec.decode_line(), Some("ok".to_string()));
        assert!(codec.decode_line().is_none());

        codec.push(b"\n7\r\n");
        assert_eq!(codec.decode_line(), Some("7".to_string()));
        assert!(codec.decode_line().is_none());
    }

    #[test]
    fn test_bare_lf_framing() {
        let mut codec = LineCodec::new();
        codec.push(b"True\nFalse\n");

        assert_eq!(codec.decode_line(), Some("True".to_string()));
        assert_eq!(codec.decode_line(), Some("False".to_string()));
        assert!(codec.decode_line().is_none());
    }
}
