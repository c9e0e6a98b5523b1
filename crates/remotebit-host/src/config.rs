//! Link configuration.

use std::time::Duration;

/// Baud rate of the firmware's UART console.
pub const DEFAULT_BAUD_RATE: u32 = 115_200;

/// Default per-read timeout. The original protocol has none and an
/// unresponsive board would block the host forever; the timeout surfaces as
/// an I/O error instead.
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(10);

/// The platform's conventional device path for a micro:bit's USB serial
/// interface.
pub fn default_device_path() -> &'static str {
    if cfg!(windows) {
        "COM7"
    } else if cfg!(target_os = "macos") {
        "/dev/tty.usbmodem102"
    } else {
        "/dev/ttyACM0"
    }
}

/// What to do when a transport fault occurs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Print the fault and terminate the process with a non-zero status.
    /// The default: with no resynchronization mechanism in the protocol, a
    /// desynced link is unusable and scripts are better off stopping.
    #[default]
    Exit,
    /// Return the fault as a typed [`crate::LinkError`] for the caller to
    /// handle.
    Raise,
}

/// Configuration for opening a [`crate::Link`].
#[derive(Debug, Clone)]
pub struct LinkConfig {
    /// Serial device path; `None` uses [`default_device_path`].
    pub path: Option<String>,
    /// Serial baud rate.
    pub baud_rate: u32,
    /// Per-read timeout on the serial port.
    pub read_timeout: Duration,
    /// Transport fault handling.
    pub error_mode: ErrorMode,
}

impl Default for LinkConfig {
    fn default() -> Self {
        LinkConfig {
            path: None,
            baud_rate: DEFAULT_BAUD_RATE,
            read_timeout: DEFAULT_READ_TIMEOUT,
            error_mode: ErrorMode::default(),
        }
    }
}

impl LinkConfig {
    /// Config for a specific device path.
    pub fn with_path(path: impl Into<String>) -> Self {
        LinkConfig {
            path: Some(path.into()),
            ..LinkConfig::default()
        }
    }

    /// Return transport faults instead of exiting.
    pub fn raising(mut self) -> Self {
        self.error_mode = ErrorMode::Raise;
        self
    }

    /// The device path to open.
    pub fn device_path(&self) -> &str {
        self.path.as_deref().unwrap_or_else(|| default_device_path())
    }
}
