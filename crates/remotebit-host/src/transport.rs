//! Transport layer: how request lines reach the board and reply lines come
//! back.
//!
//! Two implementations share one contract: [`SerialTransport`] talks to real
//! firmware over a serial port, [`DebugTransport`] is a console stand-in for
//! running host code with no hardware attached.

use std::io::{self, Read, Write};
use std::time::Duration;

use remotebit_protocol::{LineCodec, Reply, ACK};
use tracing::trace;

use crate::error::{LinkError, LinkResult};

/// Sends a request line and obtains the reply.
///
/// Exactly one request is in flight at a time: both methods block until the
/// board has answered (or faulted) before returning.
pub trait Transport {
    /// Send a request line. With `expect_ack`, additionally read one reply
    /// line and require it to be the acknowledgement literal.
    fn send(&mut self, request: &str, expect_ack: bool) -> LinkResult<()>;

    /// Send a request line and read one reply line, failing on `ERROR:` or
    /// `EXCEPTION:` replies. Returns the trimmed reply.
    fn send_receive(&mut self, request: &str) -> LinkResult<String>;
}

/// Line-oriented transport over any byte stream.
///
/// The firmware's input handling echoes every received line before acting on
/// it, so `send` first reads the echo back and verifies it matches what was
/// written; a mismatch means the line was corrupted or the endpoints are
/// desynced, which the protocol cannot recover from.
pub struct StreamTransport<S: Read + Write> {
    stream: S,
    codec: LineCodec,
}

impl<S: Read + Write> StreamTransport<S> {
    /// Wrap a byte stream.
    pub fn new(stream: S) -> Self {
        StreamTransport {
            stream,
            codec: LineCodec::new(),
        }
    }

    /// Read one complete line from the stream.
    fn read_line(&mut self) -> LinkResult<String> {
        let mut buf = [0u8; 256];
        loop {
            if let Some(line) = self.codec.decode_line() {
                return Ok(line);
            }
            let n = self.stream.read(&mut buf)?;
            if n == 0 {
                return Err(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    "stream closed while waiting for a line",
                )
                .into());
            }
            self.codec.push(&buf[..n]);
        }
    }

    /// Best-effort read of whatever else the board has buffered, for
    /// inclusion in an echo-mismatch report. Stops at the first read error
    /// (timeout, EOF) rather than propagating it.
    fn drain_pending(&mut self) -> String {
        let mut pending = String::new();
        while let Some(line) = self.codec.decode_line() {
            pending.push_str(&line);
            pending.push('\n');
        }
        let mut buf = [0u8; 256];
        loop {
            match self.stream.read(&mut buf) {
                Ok(0) | Err(_) => break,
                Ok(n) => pending.push_str(&String::from_utf8_lossy(&buf[..n])),
            }
        }
        pending
    }
}

impl<S: Read + Write> Transport for StreamTransport<S> {
    fn send(&mut self, request: &str, expect_ack: bool) -> LinkResult<()> {
        let frame = LineCodec::encode_line(request)?;
        self.stream.write_all(&frame)?;
        self.stream.flush()?;

        let echo = self.read_line()?;
        trace!(request, echo = echo.as_str(), "sent");
        if echo != request {
            let mut garbled = echo;
            garbled.push_str(&self.drain_pending());
            return Err(LinkError::EchoMismatch {
                request: request.to_string(),
                echo: garbled,
            });
        }

        if expect_ack {
            let reply = self.read_line()?;
            trace!(request, reply = reply.as_str(), "ack");
            if reply.trim_end() != ACK {
                return Err(LinkError::AckMismatch {
                    request: request.to_string(),
                    reply,
                });
            }
        }
        Ok(())
    }

    fn send_receive(&mut self, request: &str) -> LinkResult<String> {
        self.send(request, false)?;
        let line = self.read_line()?;
        trace!(request, reply = line.as_str(), "reply");
        match Reply::parse(&line) {
            Reply::Error(message) => Err(LinkError::Device(message)),
            Reply::Exception(message) => Err(LinkError::Exception(message)),
            _ => Ok(line.trim_end().to_string()),
        }
    }
}

/// Transport over a real serial port.
pub type SerialTransport = StreamTransport<Box<dyn serialport::SerialPort>>;

impl SerialTransport {
    /// Open the serial device at the given path.
    pub fn open(path: &str, baud_rate: u32, read_timeout: Duration) -> LinkResult<Self> {
        let port = serialport::new(path, baud_rate)
            .timeout(read_timeout)
            .open()?;
        Ok(StreamTransport::new(port))
    }
}

/// Console stand-in used when no board is reachable.
///
/// Requests are printed to stdout; replies are read from stdin, so the
/// host-side API can be exercised manually without hardware.
#[derive(Debug, Default)]
pub struct DebugTransport;

impl DebugTransport {
    pub fn new() -> Self {
        DebugTransport
    }
}

impl Transport for DebugTransport {
    fn send(&mut self, request: &str, _expect_ack: bool) -> LinkResult<()> {
        println!("{request}");
        Ok(())
    }

    fn send_receive(&mut self, request: &str) -> LinkResult<String> {
        println!("{request}");
        let mut line = String::new();
        io::stdin().read_line(&mut line)?;
        Ok(line.trim_end().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    /// In-memory stream with scripted device output.
    struct FakeStream {
        /// Bytes "the device" will produce.
        input: Cursor<Vec<u8>>,
        /// Bytes written by the host.
        written: Vec<u8>,
    }

    impl FakeStream {
        fn new(device_output: &str) -> Self {
            FakeStream {
                input: Cursor::new(device_output.as_bytes().to_vec()),
                written: Vec::new(),
            }
        }
    }

    impl Read for FakeStream {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            self.input.read(buf)
        }
    }

    impl Write for FakeStream {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.written.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_send_with_ack() {
        let stream = FakeStream::new("display.clear\r\nok\r\n");
        let mut transport = StreamTransport::new(stream);
        transport.send("display.clear", true).unwrap();
        assert_eq!(transport.stream.written, b"display.clear\r\n");
    }

    #[test]
    fn test_send_echo_mismatch() {
        let stream = FakeStream::new("displax.clear\r\nsome garbage\r\n");
        let mut transport = StreamTransport::new(stream);
        let err = transport.send("display.clear", true).unwrap_err();
        match err {
            LinkError::EchoMismatch { request, echo } => {
                assert_eq!(request, "display.clear");
                assert!(echo.contains("displax.clear"));
                // Buffered garbage is included in the report.
                assert!(echo.contains("some garbage"));
            }
            other => panic!("expected EchoMismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_send_ack_mismatch() {
        let stream = FakeStream::new("display.clear\r\nnope\r\n");
        let mut transport = StreamTransport::new(stream);
        let err = transport.send("display.clear", true).unwrap_err();
        assert!(matches!(err, LinkError::AckMismatch { .. }));
    }

    #[test]
    fn test_send_receive_value() {
        let stream = FakeStream::new("temperature\r\n21\r\n");
        let mut transport = StreamTransport::new(stream);
        assert_eq!(transport.send_receive("temperature").unwrap(), "21");
    }

    #[test]
    fn test_send_receive_device_faults() {
        let stream = FakeStream::new("foo.bar\r\nERROR: Unknown command.\r\n");
        let mut transport = StreamTransport::new(stream);
        let err = transport.send_receive("foo.bar").unwrap_err();
        assert!(matches!(err, LinkError::Device(_)));

        let stream = FakeStream::new("pin.read_digital 99\r\nEXCEPTION: invalid pin: 99\r\n");
        let mut transport = StreamTransport::new(stream);
        let err = transport.send_receive("pin.read_digital 99").unwrap_err();
        assert!(matches!(err, LinkError::Exception(_)));
    }

    #[test]
    fn test_send_receive_empty_value() {
        let stream = FakeStream::new("radio.receive_bytes\r\n\r\n");
        let mut transport = StreamTransport::new(stream);
        assert_eq!(transport.send_receive("radio.receive_bytes").unwrap(), "");
    }
}
