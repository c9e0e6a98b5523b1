//! The board abstraction the dispatcher executes against.

use remotebit_protocol::{Button, ShowValue};
use thiserror::Error;

/// A fault raised by a board operation. The dispatcher formats these into
/// `EXCEPTION:` reply lines.
#[derive(Error, Debug)]
pub enum BoardError {
    #[error("invalid pin: {0}")]
    InvalidPin(u8),

    #[error("pin {pin} does not support {operation}")]
    UnsupportedPin { pin: u8, operation: &'static str },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("{0} is not enabled")]
    Unavailable(&'static str),

    #[error("hardware fault: {0}")]
    Hardware(String),
}

pub type BoardResult<T> = Result<T, BoardError>;

/// Everything a board must be able to do to serve the command vocabulary.
///
/// One method per command. Implementations decide what a pin, a display,
/// or a radio physically is; the dispatcher only sequences calls and
/// formats replies.
pub trait Board {
    // Pins
    fn pin_read_digital(&mut self, pin: u8) -> BoardResult<u8>;
    fn pin_write_digital(&mut self, pin: u8, value: u8) -> BoardResult<()>;
    fn pin_read_analog(&mut self, pin: u8) -> BoardResult<u16>;
    fn pin_write_analog(&mut self, pin: u8, value: u16) -> BoardResult<()>;
    fn pin_set_analog_period(&mut self, pin: u8, period_ms: u32) -> BoardResult<()>;
    fn pin_set_analog_period_microseconds(&mut self, pin: u8, period_us: u32) -> BoardResult<()>;
    fn pin_is_touched(&mut self, pin: u8) -> BoardResult<bool>;

    // Buttons
    fn button_is_pressed(&mut self, button: Button) -> BoardResult<bool>;
    fn button_was_pressed(&mut self, button: Button) -> BoardResult<bool>;
    fn button_get_presses(&mut self, button: Button) -> BoardResult<u32>;

    // Display
    fn display_clear(&mut self) -> BoardResult<()>;
    fn display_set_pixel(&mut self, x: u8, y: u8, value: u8) -> BoardResult<()>;
    fn display_get_pixel(&mut self, x: u8, y: u8) -> BoardResult<u8>;
    fn display_show(
        &mut self,
        value: &ShowValue,
        delay_ms: u32,
        wait: bool,
        looping: bool,
        clear: bool,
    ) -> BoardResult<()>;
    fn display_scroll(&mut self, text: &str) -> BoardResult<()>;
    fn display_on(&mut self) -> BoardResult<()>;
    fn display_off(&mut self) -> BoardResult<()>;
    fn display_is_on(&mut self) -> BoardResult<bool>;
    fn display_read_light_level(&mut self) -> BoardResult<u8>;

    // System
    fn running_time(&mut self) -> BoardResult<u64>;
    fn temperature(&mut self) -> BoardResult<i32>;

    // Music
    fn music_set_tempo(&mut self, ticks: u32, bpm: u32) -> BoardResult<()>;
    fn music_get_tempo(&mut self) -> BoardResult<(u32, u32)>;
    fn music_play(&mut self, notes: &[String], pin: u8, wait: bool, looping: bool)
        -> BoardResult<()>;
    fn music_pitch(&mut self, frequency: u32, duration_ms: i32, pin: u8, wait: bool)
        -> BoardResult<()>;
    fn music_stop(&mut self, pin: u8) -> BoardResult<()>;
    fn music_reset(&mut self) -> BoardResult<()>;

    // Accelerometer
    fn accel_get_x(&mut self) -> BoardResult<i32>;
    fn accel_get_y(&mut self) -> BoardResult<i32>;
    fn accel_get_z(&mut self) -> BoardResult<i32>;
    fn accel_get_values(&mut self) -> BoardResult<(i32, i32, i32)>;
    fn accel_current_gesture(&mut self) -> BoardResult<String>;
    fn accel_is_gesture(&mut self, gesture: &str) -> BoardResult<bool>;
    fn accel_was_gesture(&mut self, gesture: &str) -> BoardResult<bool>;
    fn accel_get_gestures(&mut self) -> BoardResult<Vec<String>>;

    // Compass
    fn compass_calibrate(&mut self) -> BoardResult<()>;
    fn compass_is_calibrated(&mut self) -> BoardResult<bool>;
    fn compass_clear_calibration(&mut self) -> BoardResult<()>;
    fn compass_get_x(&mut self) -> BoardResult<i32>;
    fn compass_get_y(&mut self) -> BoardResult<i32>;
    fn compass_get_z(&mut self) -> BoardResult<i32>;
    fn compass_heading(&mut self) -> BoardResult<u32>;
    fn compass_get_field_strength(&mut self) -> BoardResult<i32>;

    // I2C
    fn i2c_init(&mut self, frequency: u32, sda: u8, scl: u8) -> BoardResult<()>;
    fn i2c_scan(&mut self) -> BoardResult<Vec<u8>>;
    fn i2c_read(&mut self, address: u8, count: u32, repeat: bool) -> BoardResult<Vec<u8>>;
    fn i2c_write(&mut self, address: u8, data: &[u8], repeat: bool) -> BoardResult<()>;

    // Radio
    fn radio_on(&mut self) -> BoardResult<()>;
    fn radio_off(&mut self) -> BoardResult<()>;
    fn radio_reset(&mut self) -> BoardResult<()>;
    fn radio_send_bytes(&mut self, data: &[u8]) -> BoardResult<()>;
    fn radio_receive_bytes(&mut self) -> BoardResult<Option<Vec<u8>>>;

    // Speech
    fn speech_translate(&mut self, text: &str) -> BoardResult<String>;
    fn speech_pronounce(
        &mut self,
        phonemes: &str,
        pitch: u8,
        speed: u8,
        mouth: u8,
        throat: u8,
    ) -> BoardResult<()>;
    fn speech_say(
        &mut self,
        text: &str,
        pitch: u8,
        speed: u8,
        mouth: u8,
        throat: u8,
    ) -> BoardResult<()>;
    fn speech_sing(
        &mut self,
        phonemes: &str,
        pitch: u8,
        speed: u8,
        mouth: u8,
        throat: u8,
    ) -> BoardResult<()>;

    // Speaker and microphone
    fn speaker_on(&mut self) -> BoardResult<()>;
    fn speaker_off(&mut self) -> BoardResult<()>;
    fn microphone_sound_level(&mut self) -> BoardResult<u8>;
}
