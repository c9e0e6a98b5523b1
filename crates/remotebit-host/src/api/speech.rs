//! Speech synthesis operations.

use remotebit_protocol::{unescape, Request};

use crate::error::LinkResult;
use crate::link::Link;

/// Voice parameters for the SAM synthesizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpeechParams {
    pub pitch: u8,
    pub speed: u8,
    pub mouth: u8,
    pub throat: u8,
}

impl Default for SpeechParams {
    fn default() -> Self {
        SpeechParams {
            pitch: 64,
            speed: 72,
            mouth: 128,
            throat: 128,
        }
    }
}

/// The speech synthesizer.
pub struct Speech<'a> {
    link: &'a mut Link,
}

impl<'a> Speech<'a> {
    pub(crate) fn new(link: &'a mut Link) -> Self {
        Speech { link }
    }

    /// Translate English words to the phoneme notation the synthesizer
    /// consumes.
    pub fn translate(&mut self, text: &str) -> LinkResult<String> {
        let reply = self.link.request_value(&Request::SpeechTranslate {
            text: text.to_string(),
        })?;
        Ok(unescape(&reply))
    }

    /// Say English words with the default voice.
    pub fn say(&mut self, text: &str) -> LinkResult<()> {
        self.say_with(text, &SpeechParams::default())
    }

    /// Say English words with explicit voice parameters.
    pub fn say_with(&mut self, text: &str, params: &SpeechParams) -> LinkResult<()> {
        self.link.request_ack(&Request::SpeechSay {
            text: text.to_string(),
            pitch: params.pitch,
            speed: params.speed,
            mouth: params.mouth,
            throat: params.throat,
        })
    }

    /// Pronounce phonemes with the default voice.
    pub fn pronounce(&mut self, phonemes: &str) -> LinkResult<()> {
        self.pronounce_with(phonemes, &SpeechParams::default())
    }

    /// Pronounce phonemes with explicit voice parameters.
    pub fn pronounce_with(&mut self, phonemes: &str, params: &SpeechParams) -> LinkResult<()> {
        self.link.request_ack(&Request::SpeechPronounce {
            phonemes: phonemes.to_string(),
            pitch: params.pitch,
            speed: params.speed,
            mouth: params.mouth,
            throat: params.throat,
        })
    }

    /// Sing phonemes carrying embedded pitch notation (`#64DOWWWWWW`).
    pub fn sing(&mut self, phonemes: &str) -> LinkResult<()> {
        self.sing_with(phonemes, &SpeechParams::default())
    }

    /// Sing phonemes with explicit voice parameters.
    pub fn sing_with(&mut self, phonemes: &str, params: &SpeechParams) -> LinkResult<()> {
        self.link.request_ack(&Request::SpeechSing {
            phonemes: phonemes.to_string(),
            pitch: params.pitch,
            speed: params.speed,
            mouth: params.mouth,
            throat: params.throat,
        })
    }
}
