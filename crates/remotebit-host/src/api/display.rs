//! LED display operations.

use remotebit_protocol::{Request, ShowValue};

use crate::error::LinkResult;
use crate::link::Link;

/// Options for [`Display::show_with`].
#[derive(Debug, Clone)]
pub struct ShowOptions {
    /// Delay between frames in milliseconds.
    pub delay_ms: u32,
    /// Block until the animation completes.
    pub wait: bool,
    /// Repeat the animation forever.
    pub looping: bool,
    /// Clear the display afterwards.
    pub clear: bool,
}

impl Default for ShowOptions {
    fn default() -> Self {
        ShowOptions {
            delay_ms: 400,
            wait: true,
            looping: false,
            clear: false,
        }
    }
}

/// The 5x5 LED display.
pub struct Display<'a> {
    link: &'a mut Link,
}

impl<'a> Display<'a> {
    pub(crate) fn new(link: &'a mut Link) -> Self {
        Display { link }
    }

    /// Turn all pixels off.
    pub fn clear(&mut self) -> LinkResult<()> {
        self.link.request_ack(&Request::DisplayClear)
    }

    /// Set one pixel's brightness (0-9).
    pub fn set_pixel(&mut self, x: u8, y: u8, value: u8) -> LinkResult<()> {
        self.link
            .request_ack(&Request::DisplaySetPixel { x, y, value })
    }

    /// Read one pixel's brightness.
    pub fn get_pixel(&mut self, x: u8, y: u8) -> LinkResult<u8> {
        self.link.request_num(&Request::DisplayGetPixel { x, y })
    }

    /// Show an image, text, or number with default options.
    pub fn show(&mut self, value: impl Into<ShowValue>) -> LinkResult<()> {
        self.show_with(value, &ShowOptions::default())
    }

    /// Show an image, text, or number.
    pub fn show_with(
        &mut self,
        value: impl Into<ShowValue>,
        options: &ShowOptions,
    ) -> LinkResult<()> {
        self.link.request_ack(&Request::DisplayShow {
            value: value.into(),
            delay_ms: options.delay_ms,
            wait: options.wait,
            looping: options.looping,
            clear: options.clear,
        })
    }

    /// Scroll text across the display.
    pub fn scroll(&mut self, text: impl Into<String>) -> LinkResult<()> {
        self.link
            .request_ack(&Request::DisplayScroll { text: text.into() })
    }

    /// Turn the display on.
    pub fn on(&mut self) -> LinkResult<()> {
        self.link.request_ack(&Request::DisplayOn)
    }

    /// Turn the display off (frees the pins it shares).
    pub fn off(&mut self) -> LinkResult<()> {
        self.link.request_ack(&Request::DisplayOff)
    }

    /// Check whether the display is on.
    pub fn is_on(&mut self) -> LinkResult<bool> {
        self.link.request_bool(&Request::DisplayIsOn)
    }

    /// Read the ambient light level (0-255).
    pub fn read_light_level(&mut self) -> LinkResult<u8> {
        self.link.request_num(&Request::DisplayReadLightLevel)
    }
}
