//! Radio operations.

use remotebit_protocol::{decode_bytes, Request};

use crate::error::LinkResult;
use crate::link::Link;

/// The 2.4 GHz radio.
pub struct Radio<'a> {
    link: &'a mut Link,
}

impl<'a> Radio<'a> {
    pub(crate) fn new(link: &'a mut Link) -> Self {
        Radio { link }
    }

    /// Power the radio on.
    pub fn on(&mut self) -> LinkResult<()> {
        self.link.request_ack(&Request::RadioOn)
    }

    /// Power the radio off.
    pub fn off(&mut self) -> LinkResult<()> {
        self.link.request_ack(&Request::RadioOff)
    }

    /// Reset channel, power, and queue settings to defaults.
    pub fn reset(&mut self) -> LinkResult<()> {
        self.link.request_ack(&Request::RadioReset)
    }

    /// Broadcast a byte payload.
    pub fn send_bytes(&mut self, data: &[u8]) -> LinkResult<()> {
        self.link.request_ack(&Request::RadioSendBytes {
            data: data.to_vec(),
        })
    }

    /// Receive the next pending payload, or `None` if the queue is empty.
    pub fn receive_bytes(&mut self) -> LinkResult<Option<Vec<u8>>> {
        let reply = self.link.request_value(&Request::RadioReceiveBytes)?;
        if reply.is_empty() {
            return Ok(None);
        }
        Ok(Some(decode_bytes(&reply)?))
    }

    /// Broadcast a UTF-8 string.
    pub fn send(&mut self, message: &str) -> LinkResult<()> {
        self.send_bytes(message.as_bytes())
    }

    /// Receive the next pending payload as a string, or `None` if the
    /// queue is empty. Invalid UTF-8 bytes are replaced.
    pub fn receive(&mut self) -> LinkResult<Option<String>> {
        Ok(self
            .receive_bytes()?
            .map(|data| String::from_utf8_lossy(&data).into_owned()))
    }
}
