//! The micro:bit-like host API.
//!
//! [`Microbit`] owns the link; each capability accessor hands out a proxy
//! borrowing the link mutably, so the one-request-in-flight contract of the
//! protocol is enforced by the borrow checker.

mod audio;
mod buttons;
mod display;
mod i2c;
mod motion;
mod music;
mod pins;
mod radio;
mod speech;

pub use audio::{Microphone, Speaker};
pub use buttons::ButtonHandle;
pub use display::{Display, ShowOptions};
pub use i2c::I2c;
pub use motion::{Accelerometer, Compass};
pub use music::Music;
pub use pins::Pin;
pub use radio::Radio;
pub use speech::{Speech, SpeechParams};

use remotebit_protocol::{Button, Request};

use crate::config::LinkConfig;
use crate::error::LinkResult;
use crate::link::Link;

/// A micro:bit driven over a [`Link`].
pub struct Microbit {
    link: Link,
}

impl Microbit {
    /// Open a board, falling back to the console debug link when no device
    /// is reachable.
    pub fn open(config: &LinkConfig) -> Microbit {
        Microbit {
            link: Link::open(config),
        }
    }

    /// Wrap an already-open link.
    pub fn from_link(link: Link) -> Microbit {
        Microbit { link }
    }

    /// Direct access to the underlying link.
    pub fn link_mut(&mut self) -> &mut Link {
        &mut self.link
    }

    /// Milliseconds since the board powered up.
    pub fn running_time(&mut self) -> LinkResult<u64> {
        self.link.request_num(&Request::RunningTime)
    }

    /// Board temperature in degrees Celsius.
    pub fn temperature(&mut self) -> LinkResult<i32> {
        self.link.request_num(&Request::Temperature)
    }

    /// A GPIO pin.
    pub fn pin(&mut self, pin: u8) -> Pin<'_> {
        Pin::new(&mut self.link, pin)
    }

    /// One of the two physical buttons.
    pub fn button(&mut self, button: Button) -> ButtonHandle<'_> {
        ButtonHandle::new(&mut self.link, button)
    }

    /// Button A.
    pub fn button_a(&mut self) -> ButtonHandle<'_> {
        self.button(Button::A)
    }

    /// Button B.
    pub fn button_b(&mut self) -> ButtonHandle<'_> {
        self.button(Button::B)
    }

    /// The 5x5 LED display.
    pub fn display(&mut self) -> Display<'_> {
        Display::new(&mut self.link)
    }

    /// The accelerometer.
    pub fn accelerometer(&mut self) -> Accelerometer<'_> {
        Accelerometer::new(&mut self.link)
    }

    /// The compass (magnetometer).
    pub fn compass(&mut self) -> Compass<'_> {
        Compass::new(&mut self.link)
    }

    /// The I2C bus.
    pub fn i2c(&mut self) -> I2c<'_> {
        I2c::new(&mut self.link)
    }

    /// Music playback.
    pub fn music(&mut self) -> Music<'_> {
        Music::new(&mut self.link)
    }

    /// The 2.4 GHz radio.
    pub fn radio(&mut self) -> Radio<'_> {
        Radio::new(&mut self.link)
    }

    /// The speech synthesizer.
    pub fn speech(&mut self) -> Speech<'_> {
        Speech::new(&mut self.link)
    }

    /// The built-in speaker.
    pub fn speaker(&mut self) -> Speaker<'_> {
        Speaker::new(&mut self.link)
    }

    /// The microphone.
    pub fn microphone(&mut self) -> Microphone<'_> {
        Microphone::new(&mut self.link)
    }
}
