//! Music playback operations.

use remotebit_protocol::Request;

use crate::error::LinkResult;
use crate::link::{parse_reply_num, Link};

/// The pin music plays on unless told otherwise.
pub const DEFAULT_MUSIC_PIN: u8 = 0;

/// The music peripheral.
pub struct Music<'a> {
    link: &'a mut Link,
}

impl<'a> Music<'a> {
    pub(crate) fn new(link: &'a mut Link) -> Self {
        Music { link }
    }

    /// Set the tempo as ticks per beat and beats per minute.
    pub fn set_tempo(&mut self, ticks: u32, bpm: u32) -> LinkResult<()> {
        self.link.request_ack(&Request::MusicSetTempo { ticks, bpm })
    }

    /// Get the current `(ticks, bpm)` tempo.
    pub fn get_tempo(&mut self) -> LinkResult<(u32, u32)> {
        let reply = self.link.request_value(&Request::MusicGetTempo)?;
        let mut tokens = reply.split(' ');
        let ticks = parse_reply_num(&reply, tokens.next())?;
        let bpm = parse_reply_num(&reply, tokens.next())?;
        Ok((ticks, bpm))
    }

    /// Play a tune on the default pin, blocking until it finishes.
    pub fn play(&mut self, notes: &[&str]) -> LinkResult<()> {
        self.play_with(notes, DEFAULT_MUSIC_PIN, true, false)
    }

    /// Play a tune with explicit pin, wait, and loop settings.
    pub fn play_with(
        &mut self,
        notes: &[&str],
        pin: u8,
        wait: bool,
        looping: bool,
    ) -> LinkResult<()> {
        self.link.request_ack(&Request::MusicPlay {
            notes: notes.iter().map(|n| n.to_string()).collect(),
            pin,
            wait,
            looping,
        })
    }

    /// Play a pitch in hertz for a duration in milliseconds.
    ///
    /// A negative duration plays until [`Music::stop`] is called.
    pub fn pitch(&mut self, frequency: u32, duration_ms: i32) -> LinkResult<()> {
        self.pitch_with(frequency, duration_ms, DEFAULT_MUSIC_PIN, true)
    }

    /// Play a pitch with explicit pin and wait settings.
    pub fn pitch_with(
        &mut self,
        frequency: u32,
        duration_ms: i32,
        pin: u8,
        wait: bool,
    ) -> LinkResult<()> {
        self.link.request_ack(&Request::MusicPitch {
            frequency,
            duration_ms,
            pin,
            wait,
        })
    }

    /// Stop playback on the default pin.
    pub fn stop(&mut self) -> LinkResult<()> {
        self.stop_on(DEFAULT_MUSIC_PIN)
    }

    /// Stop playback on a specific pin.
    pub fn stop_on(&mut self, pin: u8) -> LinkResult<()> {
        self.link.request_ack(&Request::MusicStop { pin })
    }

    /// Reset ticks, tempo, and octave to their defaults.
    pub fn reset(&mut self) -> LinkResult<()> {
        self.link.request_ack(&Request::MusicReset)
    }
}
