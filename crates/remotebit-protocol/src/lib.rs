//! remotebit wire protocol
//!
//! This crate provides the line-based text command protocol shared by the
//! remotebit host library and the device-side dispatcher. Host API calls are
//! encoded as one-line text commands, sent over a serial link, and answered
//! with a single reply line.
//!
//! # Protocol Overview
//!
//! - **Requests** (host → device): `<command> [<arg> ...]`, space-delimited,
//!   terminated with `\r\n`. The device echoes each received line before
//!   acting on it.
//! - **Replies** (device → host): exactly one line per request, one of:
//!   - the acknowledgement literal `ok` for commands with no return value,
//!   - a value line (decimal integer, `True`/`False`, escaped string,
//!     hex-encoded bytes, colon-joined pixel grid, or a space-joined tuple),
//!   - `ERROR: <message>` for an unrecognized command,
//!   - `EXCEPTION: <message>` when the command's handler faulted.
//!
//! # Escaping
//!
//! Arguments and values that may contain spaces or newlines are escaped into
//! a single space-safe token (see [`escape`]). Splitting a request into
//! positional arguments happens on the literal space character, so an
//! **unescaped** argument containing a space desynchronizes the argument
//! positions of everything after it. Escaping such payloads is a protocol
//! precondition on the sender, not something the receiver can recover from.
//!
//! # Example
//!
//! ```rust
//! use remotebit_protocol::{Request, Reply};
//!
//! let req = Request::PinReadDigital { pin: 0 };
//! assert_eq!(req.to_line(), "pin.read_digital 0");
//!
//! let reply = Reply::parse("EXCEPTION: invalid pin: 99");
//! assert!(reply.is_fault());
//! ```

mod codec;
mod error;
mod escape;
mod image;
mod reply;
mod request;

pub use codec::*;
pub use error::*;
pub use escape::*;
pub use image::*;
pub use reply::*;
pub use request::*;
