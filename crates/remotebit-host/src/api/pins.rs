//! GPIO pin operations.

use remotebit_protocol::Request;

use crate::error::LinkResult;
use crate::link::Link;

/// A GPIO pin on the edge connector.
///
/// Which operations a pin supports depends on the hardware; an unsupported
/// operation comes back as a device exception.
pub struct Pin<'a> {
    link: &'a mut Link,
    pin: u8,
}

impl<'a> Pin<'a> {
    pub(crate) fn new(link: &'a mut Link, pin: u8) -> Self {
        Pin { link, pin }
    }

    /// Read the digital value (0 or 1).
    pub fn read_digital(&mut self) -> LinkResult<u8> {
        self.link
            .request_num(&Request::PinReadDigital { pin: self.pin })
    }

    /// Write a digital value (0 or 1).
    pub fn write_digital(&mut self, value: u8) -> LinkResult<()> {
        self.link.request_ack(&Request::PinWriteDigital {
            pin: self.pin,
            value,
        })
    }

    /// Read the analog value (0-1023).
    pub fn read_analog(&mut self) -> LinkResult<u16> {
        self.link
            .request_num(&Request::PinReadAnalog { pin: self.pin })
    }

    /// Write a PWM value (0-1023).
    pub fn write_analog(&mut self, value: u16) -> LinkResult<()> {
        self.link.request_ack(&Request::PinWriteAnalog {
            pin: self.pin,
            value,
        })
    }

    /// Set the PWM period in milliseconds.
    pub fn set_analog_period(&mut self, period_ms: u32) -> LinkResult<()> {
        self.link.request_ack(&Request::PinSetAnalogPeriod {
            pin: self.pin,
            period_ms,
        })
    }

    /// Set the PWM period in microseconds.
    pub fn set_analog_period_microseconds(&mut self, period_us: u32) -> LinkResult<()> {
        self.link
            .request_ack(&Request::PinSetAnalogPeriodMicroseconds {
                pin: self.pin,
                period_us,
            })
    }

    /// Check whether the pin is being touched.
    pub fn is_touched(&mut self) -> LinkResult<bool> {
        self.link
            .request_bool(&Request::PinIsTouched { pin: self.pin })
    }
}
