//! remotebit host library
//!
//! Drive a physical micro:bit over a serial link with a micro:bit-like API:
//! every call builds a one-line text command, sends it to the dispatcher
//! running on the board, and parses the single reply line back into a typed
//! value.
//!
//! ```rust,no_run
//! use remotebit_host::{LinkConfig, Microbit};
//! use remotebit_protocol::{icons, Image};
//!
//! # fn main() -> Result<(), remotebit_host::LinkError> {
//! let mut mb = Microbit::open(&LinkConfig::default());
//! mb.display().show(Image::parse(icons::HEART)?)?;
//! let light = mb.display().read_light_level()?;
//! println!("light level: {light}");
//! # Ok(())
//! # }
//! ```
//!
//! Opening falls back to a console-based debug link when no board is
//! reachable, so host programs can be exercised interactively without
//! hardware (requests are printed, replies are typed in).
//!
//! The protocol is strictly synchronous: one request in flight at a time,
//! each call blocking until its reply or acknowledgement arrives. The
//! `&mut` borrow threaded from [`Microbit`] through every capability proxy
//! enforces this at compile time.

mod config;
mod error;
mod link;
mod transport;

pub mod api;

pub use api::Microbit;
pub use config::{
    default_device_path, ErrorMode, LinkConfig, DEFAULT_BAUD_RATE, DEFAULT_READ_TIMEOUT,
};
pub use error::{LinkError, LinkResult};
pub use link::Link;
pub use transport::{DebugTransport, SerialTransport, StreamTransport, Transport};

pub use remotebit_protocol as protocol;
pub use remotebit_protocol::{icons, Button, Image, ShowValue};
