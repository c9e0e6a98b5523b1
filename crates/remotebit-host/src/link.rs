//! The link: a caller-owned handle over whichever transport is in use.
//!
//! All transport faults funnel through one reporting point so behavior is
//! consistent and switchable between returning typed errors and
//! print-and-exit (see [`ErrorMode`]).

use std::fmt::Display;
use std::str::FromStr;

use remotebit_protocol::{parse_bool, Request};
use tracing::{debug, warn};

use crate::config::{ErrorMode, LinkConfig};
use crate::error::{LinkError, LinkResult};
use crate::transport::{DebugTransport, SerialTransport, Transport};

/// The active transport to the board (or its console stand-in).
///
/// One per board; replaced wholesale when reopened. Every request blocks
/// until its reply or acknowledgement arrives, so at most one request is in
/// flight at a time.
pub struct Link {
    transport: Box<dyn Transport>,
    error_mode: ErrorMode,
}

impl Link {
    /// Open a link, falling back to the console debug transport if the
    /// serial device cannot be opened.
    pub fn open(config: &LinkConfig) -> Link {
        match Link::open_serial(config) {
            Ok(link) => link,
            Err(e) => {
                warn!(
                    path = config.device_path(),
                    error = %e,
                    "cannot connect to micro:bit, using debug link to the console"
                );
                Link::debug(config)
            }
        }
    }

    /// Open a link over the configured serial device, without fallback.
    pub fn open_serial(config: &LinkConfig) -> LinkResult<Link> {
        let transport =
            SerialTransport::open(config.device_path(), config.baud_rate, config.read_timeout)?;
        debug!(path = config.device_path(), baud = config.baud_rate, "serial link open");
        Ok(Link {
            transport: Box::new(transport),
            error_mode: config.error_mode,
        })
    }

    /// A link over the console debug transport.
    pub fn debug(config: &LinkConfig) -> Link {
        Link {
            transport: Box::new(DebugTransport::new()),
            error_mode: config.error_mode,
        }
    }

    /// A link over an arbitrary transport (used by tests).
    pub fn with_transport(transport: Box<dyn Transport>, error_mode: ErrorMode) -> Link {
        Link {
            transport,
            error_mode,
        }
    }

    /// Send a no-return request and require the acknowledgement.
    pub fn request_ack(&mut self, request: &Request) -> LinkResult<()> {
        let line = request.to_line();
        let result = self.transport.send(&line, true);
        self.report(result)
    }

    /// Send a value-returning request and return the raw reply line.
    pub fn request_value(&mut self, request: &Request) -> LinkResult<String> {
        let line = request.to_line();
        let result = self.transport.send_receive(&line);
        self.report(result)
    }

    /// Send a value-returning request and parse the reply as a number.
    pub fn request_num<T>(&mut self, request: &Request) -> LinkResult<T>
    where
        T: FromStr,
        T::Err: Display,
    {
        let reply = self.request_value(request)?;
        reply.parse().map_err(|_| LinkError::ReplyParse {
            reply,
            expected: "a number",
        })
    }

    /// Send a value-returning request and parse the reply as a wire boolean.
    pub fn request_bool(&mut self, request: &Request) -> LinkResult<bool> {
        let reply = self.request_value(request)?;
        parse_bool(&reply).map_err(|_| LinkError::ReplyParse {
            reply,
            expected: "True or False",
        })
    }

    /// The single funnel for transport faults. Local decode faults (a reply
    /// that is not the expected type) are not routed here; they always
    /// propagate to the caller.
    fn report<T>(&self, result: LinkResult<T>) -> LinkResult<T> {
        match (&result, self.error_mode) {
            (Err(e), ErrorMode::Exit) => {
                eprintln!("ERROR: micro:bit link: {e}");
                std::process::exit(1);
            }
            _ => result,
        }
    }
}

/// Parse one token of a space-joined tuple reply.
pub(crate) fn parse_reply_num<T>(reply: &str, token: Option<&str>) -> LinkResult<T>
where
    T: FromStr,
{
    token
        .and_then(|t| t.parse().ok())
        .ok_or_else(|| LinkError::ReplyParse {
            reply: reply.to_string(),
            expected: "a space-joined tuple of numbers",
        })
}
