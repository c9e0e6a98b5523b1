//! Speaker and microphone operations.

use remotebit_protocol::Request;

use crate::error::LinkResult;
use crate::link::Link;

/// The built-in speaker (micro:bit v2).
pub struct Speaker<'a> {
    link: &'a mut Link,
}

impl<'a> Speaker<'a> {
    pub(crate) fn new(link: &'a mut Link) -> Self {
        Speaker { link }
    }

    /// Enable the speaker.
    pub fn on(&mut self) -> LinkResult<()> {
        self.link.request_ack(&Request::SpeakerOn)
    }

    /// Disable the speaker; audio still plays on the edge connector.
    pub fn off(&mut self) -> LinkResult<()> {
        self.link.request_ack(&Request::SpeakerOff)
    }
}

/// The built-in microphone (micro:bit v2).
pub struct Microphone<'a> {
    link: &'a mut Link,
}

impl<'a> Microphone<'a> {
    pub(crate) fn new(link: &'a mut Link) -> Self {
        Microphone { link }
    }

    /// Current sound pressure level, 0 (quiet) to 255 (loud).
    pub fn sound_level(&mut self) -> LinkResult<u8> {
        self.link.request_num(&Request::MicrophoneSoundLevel)
    }
}
