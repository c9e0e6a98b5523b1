//! remotebit device side
//!
//! The dispatcher reads one request line at a time, echoes it back, executes
//! it against a [`Board`], and writes exactly one reply line. [`SimBoard`]
//! is a software board used for the standalone simulator binary and for
//! exercising the host library without hardware.

mod board;
mod dispatcher;
mod sim;

pub use board::{Board, BoardError, BoardResult};
pub use dispatcher::Dispatcher;
pub use sim::SimBoard;
