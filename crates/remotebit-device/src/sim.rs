//! A simulated board.
//!
//! Backs the standalone simulator binary and lets the host library be
//! exercised end to end without hardware. Inputs that real hardware would
//! sample (pins, buttons, sensors) are primed through fixture setters;
//! outputs (display, music, radio sends, i2c writes) are recorded so tests
//! can observe them.

use std::collections::{BTreeMap, VecDeque};

use remotebit_protocol::{Button, Image, ShowValue, DISPLAY_SIZE};

use crate::board::{Board, BoardError, BoardResult};

/// Pins present on the edge connector. 17 and 18 are voltage rails.
const VALID_PINS: &[u8] = &[0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 19, 20];
/// Pins wired for analog input.
const ANALOG_PINS: &[u8] = &[0, 1, 2, 3, 4, 10];
/// Pins with capacitive touch sensing.
const TOUCH_PINS: &[u8] = &[0, 1, 2];

#[derive(Debug, Default, Clone, Copy)]
struct ButtonState {
    pressed: bool,
    was_pressed: bool,
    presses: u32,
}

#[derive(Debug, Default, Clone)]
struct PinState {
    digital: u8,
    analog: u16,
    period_us: Option<u32>,
}

/// A software stand-in for the physical board.
pub struct SimBoard {
    pins: BTreeMap<u8, PinState>,
    button_a: ButtonState,
    button_b: ButtonState,
    display: Image,
    display_on: bool,
    light_level: u8,
    last_shown: Option<String>,
    last_scrolled: Option<String>,
    clock_ms: u64,
    temperature: i32,
    tempo: (u32, u32),
    last_played: Option<String>,
    acceleration: (i32, i32, i32),
    current_gesture: String,
    gesture_history: Vec<String>,
    compass_calibrated: bool,
    compass_field: (i32, i32, i32),
    compass_heading: u32,
    i2c_devices: BTreeMap<u8, Vec<u8>>,
    i2c_writes: Vec<(u8, Vec<u8>)>,
    radio_on: bool,
    radio_inbox: VecDeque<Vec<u8>>,
    radio_outbox: Vec<Vec<u8>>,
    speaker_on: bool,
    sound_level: u8,
    last_utterance: Option<String>,
}

impl SimBoard {
    pub fn new() -> SimBoard {
        SimBoard {
            pins: VALID_PINS.iter().map(|&p| (p, PinState::default())).collect(),
            button_a: ButtonState::default(),
            button_b: ButtonState::default(),
            display: Image::blank(),
            display_on: true,
            light_level: 0,
            last_shown: None,
            last_scrolled: None,
            clock_ms: 0,
            temperature: 21,
            tempo: (4, 120),
            last_played: None,
            acceleration: (0, 0, -1024),
            current_gesture: "face up".to_string(),
            gesture_history: Vec::new(),
            compass_calibrated: false,
            compass_field: (0, 0, 0),
            compass_heading: 0,
            i2c_devices: BTreeMap::new(),
            i2c_writes: Vec::new(),
            radio_on: false,
            radio_inbox: VecDeque::new(),
            radio_outbox: Vec::new(),
            speaker_on: true,
            sound_level: 0,
            last_utterance: None,
        }
    }

    fn pin(&self, pin: u8) -> BoardResult<&PinState> {
        self.pins.get(&pin).ok_or(BoardError::InvalidPin(pin))
    }

    fn pin_mut(&mut self, pin: u8) -> BoardResult<&mut PinState> {
        self.pins.get_mut(&pin).ok_or(BoardError::InvalidPin(pin))
    }

    fn button(&mut self, button: Button) -> &mut ButtonState {
        match button {
            Button::A => &mut self.button_a,
            Button::B => &mut self.button_b,
        }
    }

    // Fixture setters for tests and scripted simulations.

    /// Prime the digital input value of a pin.
    pub fn set_digital_input(&mut self, pin: u8, value: u8) {
        if let Some(state) = self.pins.get_mut(&pin) {
            state.digital = value;
        }
    }

    /// Prime the analog input value of a pin.
    pub fn set_analog_input(&mut self, pin: u8, value: u16) {
        if let Some(state) = self.pins.get_mut(&pin) {
            state.analog = value;
        }
    }

    /// Simulate one press-and-release of a button.
    pub fn press_button(&mut self, button: Button) {
        let state = self.button(button);
        state.was_pressed = true;
        state.presses += 1;
    }

    /// Hold or release a button.
    pub fn hold_button(&mut self, button: Button, pressed: bool) {
        self.button(button).pressed = pressed;
    }

    pub fn set_light_level(&mut self, level: u8) {
        self.light_level = level;
    }

    pub fn advance_clock(&mut self, ms: u64) {
        self.clock_ms += ms;
    }

    pub fn set_temperature(&mut self, celsius: i32) {
        self.temperature = celsius;
    }

    pub fn set_acceleration(&mut self, x: i32, y: i32, z: i32) {
        self.acceleration = (x, y, z);
    }

    /// Make a gesture current and append it to the history.
    pub fn set_gesture(&mut self, gesture: &str) {
        self.current_gesture = gesture.to_string();
        self.gesture_history.push(gesture.to_string());
    }

    pub fn set_compass_field(&mut self, x: i32, y: i32, z: i32) {
        self.compass_field = (x, y, z);
    }

    pub fn set_compass_heading(&mut self, degrees: u32) {
        self.compass_heading = degrees;
    }

    /// Attach an i2c device whose reads serve `data` cyclically.
    pub fn add_i2c_device(&mut self, address: u8, data: Vec<u8>) {
        self.i2c_devices.insert(address, data);
    }

    /// Everything written over i2c, in order, as `(address, bytes)`.
    pub fn i2c_writes(&self) -> &[(u8, Vec<u8>)] {
        &self.i2c_writes
    }

    /// Queue an incoming radio message.
    pub fn push_radio_message(&mut self, data: Vec<u8>) {
        self.radio_inbox.push_back(data);
    }

    /// Everything broadcast over the radio, in order.
    pub fn radio_sent(&self) -> &[Vec<u8>] {
        &self.radio_outbox
    }

    pub fn set_sound_level(&mut self, level: u8) {
        self.sound_level = level;
    }

    /// The current display contents.
    pub fn display(&self) -> &Image {
        &self.display
    }

    /// The most recent `display.show` value, rendered as text.
    pub fn last_shown(&self) -> Option<&str> {
        self.last_shown.as_deref()
    }

    /// The most recent `display.scroll` text.
    pub fn last_scrolled(&self) -> Option<&str> {
        self.last_scrolled.as_deref()
    }

    /// The most recent speech utterance.
    pub fn last_utterance(&self) -> Option<&str> {
        self.last_utterance.as_deref()
    }

    /// What music is currently playing, if any.
    pub fn last_played(&self) -> Option<&str> {
        self.last_played.as_deref()
    }

    /// Whether the built-in speaker is enabled.
    pub fn is_speaker_on(&self) -> bool {
        self.speaker_on
    }

    /// The PWM period configured on a pin, in microseconds.
    pub fn analog_period_microseconds(&self, pin: u8) -> Option<u32> {
        self.pins.get(&pin).and_then(|state| state.period_us)
    }

    fn radio(&mut self) -> BoardResult<()> {
        if self.radio_on {
            Ok(())
        } else {
            Err(BoardError::Unavailable("radio"))
        }
    }
}

impl Default for SimBoard {
    fn default() -> Self {
        SimBoard::new()
    }
}

impl Board for SimBoard {
    fn pin_read_digital(&mut self, pin: u8) -> BoardResult<u8> {
        Ok(self.pin(pin)?.digital)
    }

    fn pin_write_digital(&mut self, pin: u8, value: u8) -> BoardResult<()> {
        if value > 1 {
            return Err(BoardError::InvalidArgument(format!(
                "digital value must be 0 or 1, got {value}"
            )));
        }
        self.pin_mut(pin)?.digital = value;
        Ok(())
    }

    fn pin_read_analog(&mut self, pin: u8) -> BoardResult<u16> {
        if !ANALOG_PINS.contains(&pin) {
            self.pin(pin)?;
            return Err(BoardError::UnsupportedPin {
                pin,
                operation: "analog input",
            });
        }
        Ok(self.pin(pin)?.analog)
    }

    fn pin_write_analog(&mut self, pin: u8, value: u16) -> BoardResult<()> {
        if value > 1023 {
            return Err(BoardError::InvalidArgument(format!(
                "analog value must be 0-1023, got {value}"
            )));
        }
        self.pin_mut(pin)?.analog = value;
        Ok(())
    }

    fn pin_set_analog_period(&mut self, pin: u8, period_ms: u32) -> BoardResult<()> {
        let period_us = period_ms.checked_mul(1000).ok_or_else(|| {
            BoardError::InvalidArgument(format!("analog period too large: {period_ms} ms"))
        })?;
        self.pin_mut(pin)?.period_us = Some(period_us);
        Ok(())
    }

    fn pin_set_analog_period_microseconds(&mut self, pin: u8, period_us: u32) -> BoardResult<()> {
        self.pin_mut(pin)?.period_us = Some(period_us);
        Ok(())
    }

    fn pin_is_touched(&mut self, pin: u8) -> BoardResult<bool> {
        if !TOUCH_PINS.contains(&pin) {
            self.pin(pin)?;
            return Err(BoardError::UnsupportedPin {
                pin,
                operation: "touch sensing",
            });
        }
        Ok(self.pin(pin)?.digital != 0)
    }

    fn button_is_pressed(&mut self, button: Button) -> BoardResult<bool> {
        Ok(self.button(button).pressed)
    }

    fn button_was_pressed(&mut self, button: Button) -> BoardResult<bool> {
        let state = self.button(button);
        let was = state.was_pressed;
        state.was_pressed = false;
        Ok(was)
    }

    fn button_get_presses(&mut self, button: Button) -> BoardResult<u32> {
        let state = self.button(button);
        let presses = state.presses;
        state.presses = 0;
        Ok(presses)
    }

    fn display_clear(&mut self) -> BoardResult<()> {
        self.display = Image::blank();
        Ok(())
    }

    fn display_set_pixel(&mut self, x: u8, y: u8, value: u8) -> BoardResult<()> {
        self.display
            .set_pixel(x as usize, y as usize, value)
            .map_err(|e| BoardError::InvalidArgument(e.to_string()))
    }

    fn display_get_pixel(&mut self, x: u8, y: u8) -> BoardResult<u8> {
        self.display
            .get_pixel(x as usize, y as usize)
            .map_err(|e| BoardError::InvalidArgument(e.to_string()))
    }

    fn display_show(
        &mut self,
        value: &ShowValue,
        _delay_ms: u32,
        _wait: bool,
        _looping: bool,
        _clear: bool,
    ) -> BoardResult<()> {
        if let ShowValue::Image(image) = value {
            // Crop or pad into the 5x5 grid, top-left anchored.
            let mut grid = Image::blank();
            for y in 0..DISPLAY_SIZE.min(image.height()) {
                for x in 0..DISPLAY_SIZE.min(image.width()) {
                    let v = image
                        .get_pixel(x, y)
                        .map_err(|e| BoardError::InvalidArgument(e.to_string()))?;
                    grid.set_pixel(x, y, v)
                        .map_err(|e| BoardError::InvalidArgument(e.to_string()))?;
                }
            }
            self.display = grid;
        }
        self.last_shown = Some(match value {
            ShowValue::Image(image) => image.to_string(),
            ShowValue::Str(text) => text.clone(),
            ShowValue::Int(n) => n.to_string(),
            ShowValue::Float(x) => x.to_string(),
        });
        Ok(())
    }

    fn display_scroll(&mut self, text: &str) -> BoardResult<()> {
        self.last_scrolled = Some(text.to_string());
        Ok(())
    }

    fn display_on(&mut self) -> BoardResult<()> {
        self.display_on = true;
        Ok(())
    }

    fn display_off(&mut self) -> BoardResult<()> {
        self.display_on = false;
        Ok(())
    }

    fn display_is_on(&mut self) -> BoardResult<bool> {
        Ok(self.display_on)
    }

    fn display_read_light_level(&mut self) -> BoardResult<u8> {
        Ok(self.light_level)
    }

    fn running_time(&mut self) -> BoardResult<u64> {
        Ok(self.clock_ms)
    }

    fn temperature(&mut self) -> BoardResult<i32> {
        Ok(self.temperature)
    }

    fn music_set_tempo(&mut self, ticks: u32, bpm: u32) -> BoardResult<()> {
        if ticks == 0 || bpm == 0 {
            return Err(BoardError::InvalidArgument(
                "ticks and bpm must be positive".to_string(),
            ));
        }
        self.tempo = (ticks, bpm);
        Ok(())
    }

    fn music_get_tempo(&mut self) -> BoardResult<(u32, u32)> {
        Ok(self.tempo)
    }

    fn music_play(
        &mut self,
        notes: &[String],
        _pin: u8,
        _wait: bool,
        _looping: bool,
    ) -> BoardResult<()> {
        self.last_played = Some(notes.join(" "));
        Ok(())
    }

    fn music_pitch(
        &mut self,
        frequency: u32,
        _duration_ms: i32,
        _pin: u8,
        _wait: bool,
    ) -> BoardResult<()> {
        self.last_played = Some(format!("{frequency}hz"));
        Ok(())
    }

    fn music_stop(&mut self, _pin: u8) -> BoardResult<()> {
        self.last_played = None;
        Ok(())
    }

    fn music_reset(&mut self) -> BoardResult<()> {
        self.tempo = (4, 120);
        Ok(())
    }

    fn accel_get_x(&mut self) -> BoardResult<i32> {
        Ok(self.acceleration.0)
    }

    fn accel_get_y(&mut self) -> BoardResult<i32> {
        Ok(self.acceleration.1)
    }

    fn accel_get_z(&mut self) -> BoardResult<i32> {
        Ok(self.acceleration.2)
    }

    fn accel_get_values(&mut self) -> BoardResult<(i32, i32, i32)> {
        Ok(self.acceleration)
    }

    fn accel_current_gesture(&mut self) -> BoardResult<String> {
        Ok(self.current_gesture.clone())
    }

    fn accel_is_gesture(&mut self, gesture: &str) -> BoardResult<bool> {
        Ok(self.current_gesture == gesture)
    }

    fn accel_was_gesture(&mut self, gesture: &str) -> BoardResult<bool> {
        let seen = self.gesture_history.iter().any(|g| g == gesture);
        self.gesture_history.retain(|g| g != gesture);
        Ok(seen)
    }

    fn accel_get_gestures(&mut self) -> BoardResult<Vec<String>> {
        Ok(std::mem::take(&mut self.gesture_history))
    }

    fn compass_calibrate(&mut self) -> BoardResult<()> {
        self.compass_calibrated = true;
        Ok(())
    }

    fn compass_is_calibrated(&mut self) -> BoardResult<bool> {
        Ok(self.compass_calibrated)
    }

    fn compass_clear_calibration(&mut self) -> BoardResult<()> {
        self.compass_calibrated = false;
        Ok(())
    }

    fn compass_get_x(&mut self) -> BoardResult<i32> {
        Ok(self.compass_field.0)
    }

    fn compass_get_y(&mut self) -> BoardResult<i32> {
        Ok(self.compass_field.1)
    }

    fn compass_get_z(&mut self) -> BoardResult<i32> {
        Ok(self.compass_field.2)
    }

    fn compass_heading(&mut self) -> BoardResult<u32> {
        Ok(self.compass_heading)
    }

    fn compass_get_field_strength(&mut self) -> BoardResult<i32> {
        let (x, y, z) = self.compass_field;
        Ok(x.abs().max(y.abs()).max(z.abs()))
    }

    fn i2c_init(&mut self, _frequency: u32, _sda: u8, _scl: u8) -> BoardResult<()> {
        Ok(())
    }

    fn i2c_scan(&mut self) -> BoardResult<Vec<u8>> {
        Ok(self.i2c_devices.keys().copied().collect())
    }

    fn i2c_read(&mut self, address: u8, count: u32, _repeat: bool) -> BoardResult<Vec<u8>> {
        let data = self
            .i2c_devices
            .get(&address)
            .ok_or_else(|| BoardError::Hardware(format!("no i2c device at {address:#04x}")))?;
        if data.is_empty() {
            return Ok(vec![0; count as usize]);
        }
        Ok(data.iter().copied().cycle().take(count as usize).collect())
    }

    fn i2c_write(&mut self, address: u8, data: &[u8], _repeat: bool) -> BoardResult<()> {
        if !self.i2c_devices.contains_key(&address) {
            return Err(BoardError::Hardware(format!(
                "no i2c device at {address:#04x}"
            )));
        }
        self.i2c_writes.push((address, data.to_vec()));
        Ok(())
    }

    fn radio_on(&mut self) -> BoardResult<()> {
        self.radio_on = true;
        Ok(())
    }

    fn radio_off(&mut self) -> BoardResult<()> {
        self.radio_on = false;
        Ok(())
    }

    fn radio_reset(&mut self) -> BoardResult<()> {
        self.radio_inbox.clear();
        self.radio_outbox.clear();
        Ok(())
    }

    fn radio_send_bytes(&mut self, data: &[u8]) -> BoardResult<()> {
        self.radio()?;
        self.radio_outbox.push(data.to_vec());
        Ok(())
    }

    fn radio_receive_bytes(&mut self) -> BoardResult<Option<Vec<u8>>> {
        self.radio()?;
        Ok(self.radio_inbox.pop_front())
    }

    fn speech_translate(&mut self, text: &str) -> BoardResult<String> {
        // phoneme notation is uppercase; good enough for a simulator
        Ok(text.to_uppercase())
    }

    fn speech_pronounce(
        &mut self,
        phonemes: &str,
        _pitch: u8,
        _speed: u8,
        _mouth: u8,
        _throat: u8,
    ) -> BoardResult<()> {
        self.last_utterance = Some(phonemes.to_string());
        Ok(())
    }

    fn speech_say(
        &mut self,
        text: &str,
        _pitch: u8,
        _speed: u8,
        _mouth: u8,
        _throat: u8,
    ) -> BoardResult<()> {
        self.last_utterance = Some(text.to_string());
        Ok(())
    }

    fn speech_sing(
        &mut self,
        phonemes: &str,
        _pitch: u8,
        _speed: u8,
        _mouth: u8,
        _throat: u8,
    ) -> BoardResult<()> {
        self.last_utterance = Some(phonemes.to_string());
        Ok(())
    }

    fn speaker_on(&mut self) -> BoardResult<()> {
        self.speaker_on = true;
        Ok(())
    }

    fn speaker_off(&mut self) -> BoardResult<()> {
        self.speaker_on = false;
        Ok(())
    }

    fn microphone_sound_level(&mut self) -> BoardResult<u8> {
        Ok(self.sound_level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn button_was_pressed_drains() {
        let mut board = SimBoard::new();
        board.press_button(Button::A);
        assert!(board.button_was_pressed(Button::A).unwrap());
        assert!(!board.button_was_pressed(Button::A).unwrap());
    }

    #[test]
    fn button_presses_reset_on_read() {
        let mut board = SimBoard::new();
        board.press_button(Button::B);
        board.press_button(Button::B);
        assert_eq!(board.button_get_presses(Button::B).unwrap(), 2);
        assert_eq!(board.button_get_presses(Button::B).unwrap(), 0);
    }

    #[test]
    fn power_rail_pins_are_invalid() {
        let mut board = SimBoard::new();
        assert!(matches!(
            board.pin_read_digital(17),
            Err(BoardError::InvalidPin(17))
        ));
        assert!(matches!(
            board.pin_read_digital(18),
            Err(BoardError::InvalidPin(18))
        ));
        assert!(board.pin_read_digital(19).is_ok());
    }

    #[test]
    fn analog_read_needs_an_analog_pin() {
        let mut board = SimBoard::new();
        assert!(matches!(
            board.pin_read_analog(5),
            Err(BoardError::UnsupportedPin { pin: 5, .. })
        ));
        board.set_analog_input(3, 512);
        assert_eq!(board.pin_read_analog(3).unwrap(), 512);
    }

    #[test]
    fn gestures_drain_on_read() {
        let mut board = SimBoard::new();
        board.set_gesture("shake");
        board.set_gesture("up");
        assert!(board.accel_was_gesture("shake").unwrap());
        assert!(!board.accel_was_gesture("shake").unwrap());
        assert_eq!(board.accel_get_gestures().unwrap(), vec!["up".to_string()]);
        assert!(board.accel_get_gestures().unwrap().is_empty());
    }

    #[test]
    fn radio_requires_power() {
        let mut board = SimBoard::new();
        assert!(matches!(
            board.radio_send_bytes(b"hi"),
            Err(BoardError::Unavailable("radio"))
        ));
        board.radio_on().unwrap();
        board.radio_send_bytes(b"hi").unwrap();
        assert_eq!(board.radio_sent(), &[b"hi".to_vec()]);
    }

    #[test]
    fn radio_inbox_is_fifo() {
        let mut board = SimBoard::new();
        board.radio_on().unwrap();
        board.push_radio_message(vec![1]);
        board.push_radio_message(vec![2]);
        assert_eq!(board.radio_receive_bytes().unwrap(), Some(vec![1]));
        assert_eq!(board.radio_receive_bytes().unwrap(), Some(vec![2]));
        assert_eq!(board.radio_receive_bytes().unwrap(), None);
    }

    #[test]
    fn i2c_read_cycles_device_data() {
        let mut board = SimBoard::new();
        board.add_i2c_device(0x1d, vec![0xab, 0xcd]);
        assert_eq!(
            board.i2c_read(0x1d, 3, false).unwrap(),
            vec![0xab, 0xcd, 0xab]
        );
        assert!(board.i2c_read(0x2a, 1, false).is_err());
    }

    #[test]
    fn show_image_lands_on_the_grid() {
        let mut board = SimBoard::new();
        let image = Image::parse("90000:00000:00000:00000:00009").unwrap();
        board
            .display_show(&ShowValue::Image(image), 400, true, false, false)
            .unwrap();
        assert_eq!(board.display().get_pixel(0, 0).unwrap(), 9);
        assert_eq!(board.display().get_pixel(4, 4).unwrap(), 9);
        assert_eq!(board.display().get_pixel(2, 2).unwrap(), 0);
    }
}
