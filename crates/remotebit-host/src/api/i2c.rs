//! I2C bus operations.

use remotebit_protocol::{hex_decode, Request};

use crate::error::{LinkError, LinkResult};
use crate::link::Link;

/// Default bus frequency in hertz.
pub const DEFAULT_FREQUENCY: u32 = 100_000;
/// Default data pin.
pub const DEFAULT_SDA: u8 = 20;
/// Default clock pin.
pub const DEFAULT_SCL: u8 = 19;

/// The I2C bus.
pub struct I2c<'a> {
    link: &'a mut Link,
}

impl<'a> I2c<'a> {
    pub(crate) fn new(link: &'a mut Link) -> Self {
        I2c { link }
    }

    /// Reinitialize the bus with the default frequency and pins.
    pub fn init(&mut self) -> LinkResult<()> {
        self.init_with(DEFAULT_FREQUENCY, DEFAULT_SDA, DEFAULT_SCL)
    }

    /// Reinitialize the bus with explicit frequency and pins.
    pub fn init_with(&mut self, frequency: u32, sda: u8, scl: u8) -> LinkResult<()> {
        self.link.request_ack(&Request::I2cInit {
            frequency,
            sda,
            scl,
        })
    }

    /// Scan the bus and return the addresses that responded.
    ///
    /// The reply is space-joined decimal addresses, empty when nothing
    /// responds.
    pub fn scan(&mut self) -> LinkResult<Vec<u8>> {
        let reply = self.link.request_value(&Request::I2cScan)?;
        reply
            .split_whitespace()
            .map(|token| {
                token.parse().map_err(|_| LinkError::ReplyParse {
                    reply: reply.clone(),
                    expected: "space-joined decimal addresses",
                })
            })
            .collect()
    }

    /// Read `count` bytes from the device at `address`.
    ///
    /// With `repeat` set, no stop condition is sent after the read.
    pub fn read(&mut self, address: u8, count: u32, repeat: bool) -> LinkResult<Vec<u8>> {
        let reply = self.link.request_value(&Request::I2cRead {
            address,
            count,
            repeat,
        })?;
        Ok(hex_decode(&reply)?)
    }

    /// Write bytes to the device at `address`.
    ///
    /// With `repeat` set, no stop condition is sent after the write.
    pub fn write(&mut self, address: u8, data: &[u8], repeat: bool) -> LinkResult<()> {
        self.link.request_ack(&Request::I2cWrite {
            address,
            data: data.to_vec(),
            repeat,
        })
    }
}
