//! The command vocabulary: every request the device dispatcher recognizes.
//!
//! A request is `<command> [<arg> ...]`, split on the literal space
//! character. Integers are decimal ASCII, booleans are the literals
//! `True`/`False`, and free-form text or byte payloads are escaped into a
//! single token (see [`crate::escape`]). An argument that can contain a
//! space **must** be escaped by the sender; the positional split cannot
//! recover from an embedded space in a plain token.

use std::fmt;
use std::str::FromStr;

use crate::error::{ProtocolError, ProtocolResult};
use crate::escape::{decode_bytes, encode_bytes, escape, unescape};
use crate::image::Image;

/// Wire literal for `true`.
pub const TRUE_LITERAL: &str = "True";
/// Wire literal for `false`.
pub const FALSE_LITERAL: &str = "False";

/// Render a boolean in its wire form.
pub fn render_bool(value: bool) -> &'static str {
    if value {
        TRUE_LITERAL
    } else {
        FALSE_LITERAL
    }
}

/// Parse a wire boolean literal.
pub fn parse_bool(token: &str) -> ProtocolResult<bool> {
    match token {
        TRUE_LITERAL => Ok(true),
        FALSE_LITERAL => Ok(false),
        other => Err(ProtocolError::InvalidArgument(format!(
            "invalid boolean: {other}"
        ))),
    }
}

/// One of the two physical buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    A,
    B,
}

impl Button {
    /// Wire name of the button.
    pub fn as_str(&self) -> &'static str {
        match self {
            Button::A => "A",
            Button::B => "B",
        }
    }

    /// Parse a button from its wire name.
    pub fn parse(token: &str) -> ProtocolResult<Button> {
        match token {
            "A" => Ok(Button::A),
            "B" => Ok(Button::B),
            other => Err(ProtocolError::InvalidArgument(format!(
                "invalid button: {other}"
            ))),
        }
    }
}

impl fmt::Display for Button {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A value accepted by `display.show`, tagged on the wire with one of
/// `img`, `str`, `int`, `fp`.
#[derive(Debug, Clone, PartialEq)]
pub enum ShowValue {
    /// A pixel grid, carried as a colon-joined digit grid token.
    Image(Image),
    /// Text, escaped on the wire.
    Str(String),
    /// An integer.
    Int(i64),
    /// A floating point number.
    Float(f64),
}

impl ShowValue {
    /// The wire type tag.
    pub fn type_tag(&self) -> &'static str {
        match self {
            ShowValue::Image(_) => "img",
            ShowValue::Str(_) => "str",
            ShowValue::Int(_) => "int",
            ShowValue::Float(_) => "fp",
        }
    }

    /// Render the value token (escaped where needed).
    pub fn render(&self) -> String {
        match self {
            ShowValue::Image(image) => escape(&image.to_string()),
            ShowValue::Str(text) => escape(text),
            ShowValue::Int(n) => n.to_string(),
            ShowValue::Float(x) => x.to_string(),
        }
    }

    /// Parse a tagged value token.
    pub fn parse(tag: &str, token: &str) -> ProtocolResult<ShowValue> {
        let raw = unescape(token);
        match tag {
            "img" => Ok(ShowValue::Image(Image::parse(&raw)?)),
            "str" => Ok(ShowValue::Str(raw)),
            "int" => raw.parse().map(ShowValue::Int).map_err(|_| {
                ProtocolError::InvalidArgument(format!("invalid integer: {raw}"))
            }),
            "fp" => raw.parse().map(ShowValue::Float).map_err(|_| {
                ProtocolError::InvalidArgument(format!("invalid float: {raw}"))
            }),
            other => Err(ProtocolError::InvalidArgument(format!(
                "invalid show value type: {other}"
            ))),
        }
    }
}

impl From<Image> for ShowValue {
    fn from(image: Image) -> Self {
        ShowValue::Image(image)
    }
}

impl From<&str> for ShowValue {
    fn from(text: &str) -> Self {
        ShowValue::Str(text.to_string())
    }
}

impl From<i64> for ShowValue {
    fn from(n: i64) -> Self {
        ShowValue::Int(n)
    }
}

impl From<f64> for ShowValue {
    fn from(x: f64) -> Self {
        ShowValue::Float(x)
    }
}

/// A request the device dispatcher recognizes.
#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    // ========== Pins ==========
    /// Read the digital value of a pin (0 or 1).
    PinReadDigital { pin: u8 },
    /// Write a digital value to a pin.
    PinWriteDigital { pin: u8, value: u8 },
    /// Read the analog value of a pin (0-1023).
    PinReadAnalog { pin: u8 },
    /// Write a PWM value to a pin (0-1023).
    PinWriteAnalog { pin: u8, value: u16 },
    /// Set the PWM period of a pin in milliseconds.
    PinSetAnalogPeriod { pin: u8, period_ms: u32 },
    /// Set the PWM period of a pin in microseconds.
    PinSetAnalogPeriodMicroseconds { pin: u8, period_us: u32 },
    /// Check whether a touch pin is being touched.
    PinIsTouched { pin: u8 },

    // ========== Buttons ==========
    /// Check whether a button is currently pressed.
    ButtonIsPressed { button: Button },
    /// Check whether a button was pressed since the last call.
    ButtonWasPressed { button: Button },
    /// Get and reset the press count of a button.
    ButtonGetPresses { button: Button },

    // ========== Display ==========
    /// Turn all display pixels off.
    DisplayClear,
    /// Set one display pixel's brightness (0-9).
    DisplaySetPixel { x: u8, y: u8, value: u8 },
    /// Read one display pixel's brightness.
    DisplayGetPixel { x: u8, y: u8 },
    /// Show a value on the display.
    DisplayShow {
        value: ShowValue,
        /// Delay between frames in milliseconds.
        delay_ms: u32,
        /// Block until the animation completes.
        wait: bool,
        /// Repeat the animation forever.
        looping: bool,
        /// Clear the display afterwards.
        clear: bool,
    },
    /// Scroll text across the display.
    DisplayScroll { text: String },
    /// Turn the display on.
    DisplayOn,
    /// Turn the display off.
    DisplayOff,
    /// Check whether the display is on.
    DisplayIsOn,
    /// Read the ambient light level (0-255).
    DisplayReadLightLevel,

    // ========== System ==========
    /// Milliseconds since the board powered up.
    RunningTime,
    /// Board temperature in degrees Celsius.
    Temperature,

    // ========== Music ==========
    /// Set the tempo as ticks per beat and beats per minute.
    MusicSetTempo { ticks: u32, bpm: u32 },
    /// Get the current tempo.
    MusicGetTempo,
    /// Play a tune of notes on a pin.
    MusicPlay {
        /// Notes in MicroPython notation (e.g. `c4:4`).
        notes: Vec<String>,
        pin: u8,
        wait: bool,
        looping: bool,
    },
    /// Play a pitch on a pin.
    MusicPitch {
        frequency: u32,
        /// Duration in milliseconds; negative plays until stopped.
        duration_ms: i32,
        pin: u8,
        wait: bool,
    },
    /// Stop playback on a pin.
    MusicStop { pin: u8 },
    /// Reset tempo, ticks, and octave to defaults.
    MusicReset,

    // ========== Accelerometer ==========
    /// Acceleration on the X axis in milli-g.
    AccelGetX,
    /// Acceleration on the Y axis in milli-g.
    AccelGetY,
    /// Acceleration on the Z axis in milli-g.
    AccelGetZ,
    /// All three axes at once.
    AccelGetValues,
    /// Name of the current gesture.
    AccelCurrentGesture,
    /// Check whether the named gesture is active.
    AccelIsGesture { gesture: String },
    /// Check whether the named gesture occurred since the last call.
    AccelWasGesture { gesture: String },
    /// Gesture history since the last call.
    AccelGetGestures,

    // ========== Compass ==========
    /// Run the on-board calibration routine.
    CompassCalibrate,
    /// Check whether the compass has been calibrated.
    CompassIsCalibrated,
    /// Discard the current calibration.
    CompassClearCalibration,
    /// Magnetic field strength on the X axis in nanotesla.
    CompassGetX,
    /// Magnetic field strength on the Y axis in nanotesla.
    CompassGetY,
    /// Magnetic field strength on the Z axis in nanotesla.
    CompassGetZ,
    /// Compass heading in degrees (0-360).
    CompassHeading,
    /// Overall magnetic field strength.
    CompassGetFieldStrength,

    // ========== I2C ==========
    /// Reinitialize the I2C bus.
    I2cInit { frequency: u32, sda: u8, scl: u8 },
    /// Scan the bus for responding addresses.
    I2cScan,
    /// Read bytes from a device.
    I2cRead { address: u8, count: u32, repeat: bool },
    /// Write bytes to a device (hex-encoded on the wire).
    I2cWrite {
        address: u8,
        data: Vec<u8>,
        repeat: bool,
    },

    // ========== Radio ==========
    /// Power the radio on.
    RadioOn,
    /// Power the radio off.
    RadioOff,
    /// Reset the radio configuration to defaults.
    RadioReset,
    /// Broadcast a byte payload.
    RadioSendBytes { data: Vec<u8> },
    /// Receive the next pending payload, if any.
    RadioReceiveBytes,

    // ========== Speech ==========
    /// Translate English words to phonemes.
    SpeechTranslate { text: String },
    /// Pronounce phonemes.
    SpeechPronounce {
        phonemes: String,
        pitch: u8,
        speed: u8,
        mouth: u8,
        throat: u8,
    },
    /// Say English words.
    SpeechSay {
        text: String,
        pitch: u8,
        speed: u8,
        mouth: u8,
        throat: u8,
    },
    /// Sing phonemes with embedded pitch notation.
    SpeechSing {
        phonemes: String,
        pitch: u8,
        speed: u8,
        mouth: u8,
        throat: u8,
    },

    // ========== Speaker / Microphone ==========
    /// Enable the built-in speaker.
    SpeakerOn,
    /// Disable the built-in speaker.
    SpeakerOff,
    /// Sound pressure level from the microphone (0-255).
    MicrophoneSoundLevel,
}

impl Request {
    /// The wire command name.
    pub fn command(&self) -> &'static str {
        match self {
            Request::PinReadDigital { .. } => "pin.read_digital",
            Request::PinWriteDigital { .. } => "pin.write_digital",
            Request::PinReadAnalog { .. } => "pin.read_analog",
            Request::PinWriteAnalog { .. } => "pin.write_analog",
            Request::PinSetAnalogPeriod { .. } => "pin.set_analog_period",
            Request::PinSetAnalogPeriodMicroseconds { .. } => {
                "pin.set_analog_period_microseconds"
            }
            Request::PinIsTouched { .. } => "pin.is_touched",
            Request::ButtonIsPressed { .. } => "button.is_pressed",
            Request::ButtonWasPressed { .. } => "button.was_pressed",
            Request::ButtonGetPresses { .. } => "button.get_presses",
            Request::DisplayClear => "display.clear",
            Request::DisplaySetPixel { .. } => "display.set_pixel",
            Request::DisplayGetPixel { .. } => "display.get_pixel",
            Request::DisplayShow { .. } => "display.show",
            Request::DisplayScroll { .. } => "display.scroll",
            Request::DisplayOn => "display.on",
            Request::DisplayOff => "display.off",
            Request::DisplayIsOn => "display.is_on",
            Request::DisplayReadLightLevel => "display.read_light_level",
            Request::RunningTime => "running_time",
            Request::Temperature => "temperature",
            Request::MusicSetTempo { .. } => "music.set_tempo",
            Request::MusicGetTempo => "music.get_tempo",
            Request::MusicPlay { .. } => "music.play",
            Request::MusicPitch { .. } => "music.pitch",
            Request::MusicStop { .. } => "music.stop",
            Request::MusicReset => "music.reset",
            Request::AccelGetX => "a.get_x",
            Request::AccelGetY => "a.get_y",
            Request::AccelGetZ => "a.get_z",
            Request::AccelGetValues => "a.get_values",
            Request::AccelCurrentGesture => "a.current_gesture",
            Request::AccelIsGesture { .. } => "a.is_gesture",
            Request::AccelWasGesture { .. } => "a.was_gesture",
            Request::AccelGetGestures => "a.get_gestures",
            Request::CompassCalibrate => "compass.calibrate",
            Request::CompassIsCalibrated => "compass.is_calibrated",
            Request::CompassClearCalibration => "compass.clear_calibration",
            Request::CompassGetX => "compass.get_x",
            Request::CompassGetY => "compass.get_y",
            Request::CompassGetZ => "compass.get_z",
            Request::CompassHeading => "compass.heading",
            Request::CompassGetFieldStrength => "compass.get_field_strength",
            Request::I2cInit { .. } => "i2c.init",
            Request::I2cScan => "i2c.scan",
            Request::I2cRead { .. } => "i2c.read",
            Request::I2cWrite { .. } => "i2c.write",
            Request::RadioOn => "radio.on",
            Request::RadioOff => "radio.off",
            Request::RadioReset => "radio.reset",
            Request::RadioSendBytes { .. } => "radio.send_bytes",
            Request::RadioReceiveBytes => "radio.receive_bytes",
            Request::SpeechTranslate { .. } => "speech.translate",
            Request::SpeechPronounce { .. } => "speech.pronounce",
            Request::SpeechSay { .. } => "speech.say",
            Request::SpeechSing { .. } => "speech.sing",
            Request::SpeakerOn => "speaker.on",
            Request::SpeakerOff => "speaker.off",
            Request::MicrophoneSoundLevel => "microphone.sound_level",
        }
    }

    /// Encode the request as a wire line (without the terminator).
    pub fn to_line(&self) -> String {
        let name = self.command();
        match self {
            Request::PinReadDigital { pin }
            | Request::PinReadAnalog { pin }
            | Request::PinIsTouched { pin }
            | Request::MusicStop { pin } => format!("{name} {pin}"),
            Request::PinWriteDigital { pin, value } => format!("{name} {pin} {value}"),
            Request::PinWriteAnalog { pin, value } => format!("{name} {pin} {value}"),
            Request::PinSetAnalogPeriod { pin, period_ms } => {
                format!("{name} {pin} {period_ms}")
            }
            Request::PinSetAnalogPeriodMicroseconds { pin, period_us } => {
                format!("{name} {pin} {period_us}")
            }
            Request::ButtonIsPressed { button }
            | Request::ButtonWasPressed { button }
            | Request::ButtonGetPresses { button } => format!("{name} {button}"),
            Request::DisplaySetPixel { x, y, value } => format!("{name} {x} {y} {value}"),
            Request::DisplayGetPixel { x, y } => format!("{name} {x} {y}"),
            Request::DisplayShow {
                value,
                delay_ms,
                wait,
                looping,
                clear,
            } => format!(
                "{name} {} {} {delay_ms} {} {} {}",
                value.type_tag(),
                value.render(),
                render_bool(*wait),
                render_bool(*looping),
                render_bool(*clear),
            ),
            Request::DisplayScroll { text } => format!("{name} {}", escape(text)),
            Request::MusicSetTempo { ticks, bpm } => format!("{name} {ticks} {bpm}"),
            Request::MusicPlay {
                notes,
                pin,
                wait,
                looping,
            } => format!(
                "{name} {} {pin} {} {}",
                escape(&notes.join(" ")),
                render_bool(*wait),
                render_bool(*looping),
            ),
            Request::MusicPitch {
                frequency,
                duration_ms,
                pin,
                wait,
            } => format!("{name} {frequency} {duration_ms} {pin} {}", render_bool(*wait)),
            Request::AccelIsGesture { gesture } | Request::AccelWasGesture { gesture } => {
                format!("{name} {}", escape(gesture))
            }
            Request::I2cInit {
                frequency,
                sda,
                scl,
            } => format!("{name} {frequency} {sda} {scl}"),
            Request::I2cRead {
                address,
                count,
                repeat,
            } => format!("{name} {address} {count} {}", render_bool(*repeat)),
            Request::I2cWrite {
                address,
                data,
                repeat,
            } => format!(
                "{name} {address} {} {}",
                hex_encode(data),
                render_bool(*repeat)
            ),
            Request::RadioSendBytes { data } => format!("{name} {}", encode_bytes(data)),
            Request::SpeechTranslate { text } => format!("{name} {}", escape(text)),
            Request::SpeechPronounce {
                phonemes: text,
                pitch,
                speed,
                mouth,
                throat,
            }
            | Request::SpeechSing {
                phonemes: text,
                pitch,
                speed,
                mouth,
                throat,
            }
            | Request::SpeechSay {
                text,
                pitch,
                speed,
                mouth,
                throat,
            } => format!(
                "{name} {} {pitch} {speed} {mouth} {throat}",
                escape(text)
            ),
            // Commands with no arguments.
            _ => name.to_string(),
        }
    }

    /// Decode a wire line into a request.
    ///
    /// The line is split on the literal space character; token 0 selects
    /// the command and the remaining tokens are positional arguments. An
    /// unescaped argument containing a space desynchronizes the positions
    /// and surfaces as an arity or argument error here.
    pub fn parse(line: &str) -> ProtocolResult<Request> {
        let mut tokens = line.split(' ');
        let command = tokens.next().unwrap_or("");
        let args: Vec<&str> = tokens.collect();

        match command {
            "pin.read_digital" => {
                let [pin] = take::<1>(command, &args)?;
                Ok(Request::PinReadDigital {
                    pin: parse_num(command, "pin", pin)?,
                })
            }
            "pin.write_digital" => {
                let [pin, value] = take::<2>(command, &args)?;
                Ok(Request::PinWriteDigital {
                    pin: parse_num(command, "pin", pin)?,
                    value: parse_num(command, "value", value)?,
                })
            }
            "pin.read_analog" => {
                let [pin] = take::<1>(command, &args)?;
                Ok(Request::PinReadAnalog {
                    pin: parse_num(command, "pin", pin)?,
                })
            }
            "pin.write_analog" => {
                let [pin, value] = take::<2>(command, &args)?;
                Ok(Request::PinWriteAnalog {
                    pin: parse_num(command, "pin", pin)?,
                    value: parse_num(command, "value", value)?,
                })
            }
            "pin.set_analog_period" => {
                let [pin, period] = take::<2>(command, &args)?;
                Ok(Request::PinSetAnalogPeriod {
                    pin: parse_num(command, "pin", pin)?,
                    period_ms: parse_num(command, "period", period)?,
                })
            }
            "pin.set_analog_period_microseconds" => {
                let [pin, period] = take::<2>(command, &args)?;
                Ok(Request::PinSetAnalogPeriodMicroseconds {
                    pin: parse_num(command, "pin", pin)?,
                    period_us: parse_num(command, "period", period)?,
                })
            }
            "pin.is_touched" => {
                let [pin] = take::<1>(command, &args)?;
                Ok(Request::PinIsTouched {
                    pin: parse_num(command, "pin", pin)?,
                })
            }
            "button.is_pressed" => {
                let [button] = take::<1>(command, &args)?;
                Ok(Request::ButtonIsPressed {
                    button: Button::parse(button)?,
                })
            }
            "button.was_pressed" => {
                let [button] = take::<1>(command, &args)?;
                Ok(Request::ButtonWasPressed {
                    button: Button::parse(button)?,
                })
            }
            "button.get_presses" => {
                let [button] = take::<1>(command, &args)?;
                Ok(Request::ButtonGetPresses {
                    button: Button::parse(button)?,
                })
            }
            "display.clear" => {
                take::<0>(command, &args)?;
                Ok(Request::DisplayClear)
            }
            "display.set_pixel" => {
                let [x, y, value] = take::<3>(command, &args)?;
                Ok(Request::DisplaySetPixel {
                    x: parse_num(command, "x", x)?,
                    y: parse_num(command, "y", y)?,
                    value: parse_num(command, "value", value)?,
                })
            }
            "display.get_pixel" => {
                let [x, y] = take::<2>(command, &args)?;
                Ok(Request::DisplayGetPixel {
                    x: parse_num(command, "x", x)?,
                    y: parse_num(command, "y", y)?,
                })
            }
            "display.show" => {
                let [tag, value, delay, wait, looping, clear] = take::<6>(command, &args)?;
                Ok(Request::DisplayShow {
                    value: ShowValue::parse(tag, value)?,
                    delay_ms: parse_num(command, "delay", delay)?,
                    wait: parse_bool(wait)?,
                    looping: parse_bool(looping)?,
                    clear: parse_bool(clear)?,
                })
            }
            "display.scroll" => {
                let [text] = take::<1>(command, &args)?;
                Ok(Request::DisplayScroll {
                    text: unescape(text),
                })
            }
            "display.on" => {
                take::<0>(command, &args)?;
                Ok(Request::DisplayOn)
            }
            "display.off" => {
                take::<0>(command, &args)?;
                Ok(Request::DisplayOff)
            }
            "display.is_on" => {
                take::<0>(command, &args)?;
                Ok(Request::DisplayIsOn)
            }
            "display.read_light_level" => {
                take::<0>(command, &args)?;
                Ok(Request::DisplayReadLightLevel)
            }
            "running_time" => {
                take::<0>(command, &args)?;
                Ok(Request::RunningTime)
            }
            "temperature" => {
                take::<0>(command, &args)?;
                Ok(Request::Temperature)
            }
            "music.set_tempo" => {
                let [ticks, bpm] = take::<2>(command, &args)?;
                Ok(Request::MusicSetTempo {
                    ticks: parse_num(command, "ticks", ticks)?,
                    bpm: parse_num(command, "bpm", bpm)?,
                })
            }
            "music.get_tempo" => {
                take::<0>(command, &args)?;
                Ok(Request::MusicGetTempo)
            }
            "music.play" => {
                let [notes, pin, wait, looping] = take::<4>(command, &args)?;
                Ok(Request::MusicPlay {
                    notes: unescape(notes)
                        .split_whitespace()
                        .map(str::to_string)
                        .collect(),
                    pin: parse_num(command, "pin", pin)?,
                    wait: parse_bool(wait)?,
                    looping: parse_bool(looping)?,
                })
            }
            "music.pitch" => {
                let [frequency, duration, pin, wait] = take::<4>(command, &args)?;
                Ok(Request::MusicPitch {
                    frequency: parse_num(command, "frequency", frequency)?,
                    duration_ms: parse_num(command, "duration", duration)?,
                    pin: parse_num(command, "pin", pin)?,
                    wait: parse_bool(wait)?,
                })
            }
            "music.stop" => {
                let [pin] = take::<1>(command, &args)?;
                Ok(Request::MusicStop {
                    pin: parse_num(command, "pin", pin)?,
                })
            }
            "music.reset" => {
                take::<0>(command, &args)?;
                Ok(Request::MusicReset)
            }
            "a.get_x" => {
                take::<0>(command, &args)?;
                Ok(Request::AccelGetX)
            }
            "a.get_y" => {
                take::<0>(command, &args)?;
                Ok(Request::AccelGetY)
            }
            "a.get_z" => {
                take::<0>(command, &args)?;
                Ok(Request::AccelGetZ)
            }
            "a.get_values" => {
                take::<0>(command, &args)?;
                Ok(Request::AccelGetValues)
            }
            "a.current_gesture" => {
                take::<0>(command, &args)?;
                Ok(Request::AccelCurrentGesture)
            }
            "a.is_gesture" => {
                let [gesture] = take::<1>(command, &args)?;
                Ok(Request::AccelIsGesture {
                    gesture: unescape(gesture),
                })
            }
            "a.was_gesture" => {
                let [gesture] = take::<1>(command, &args)?;
                Ok(Request::AccelWasGesture {
                    gesture: unescape(gesture),
                })
            }
            "a.get_gestures" => {
                take::<0>(command, &args)?;
                Ok(Request::AccelGetGestures)
            }
            "compass.calibrate" => {
                take::<0>(command, &args)?;
                Ok(Request::CompassCalibrate)
            }
            "compass.is_calibrated" => {
                take::<0>(command, &args)?;
                Ok(Request::CompassIsCalibrated)
            }
            "compass.clear_calibration" => {
                take::<0>(command, &args)?;
                Ok(Request::CompassClearCalibration)
            }
            "compass.get_x" => {
                take::<0>(command, &args)?;
                Ok(Request::CompassGetX)
            }
            "compass.get_y" => {
                take::<0>(command, &args)?;
                Ok(Request::CompassGetY)
            }
            "compass.get_z" => {
                take::<0>(command, &args)?;
                Ok(Request::CompassGetZ)
            }
            "compass.heading" => {
                take::<0>(command, &args)?;
                Ok(Request::CompassHeading)
            }
            "compass.get_field_strength" => {
                take::<0>(command, &args)?;
                Ok(Request::CompassGetFieldStrength)
            }
            "i2c.init" => {
                let [frequency, sda, scl] = take::<3>(command, &args)?;
                Ok(Request::I2cInit {
                    frequency: parse_num(command, "frequency", frequency)?,
                    sda: parse_num(command, "sda", sda)?,
                    scl: parse_num(command, "scl", scl)?,
                })
            }
            "i2c.scan" => {
                take::<0>(command, &args)?;
                Ok(Request::I2cScan)
            }
            "i2c.read" => {
                let [address, count, repeat] = take::<3>(command, &args)?;
                Ok(Request::I2cRead {
                    address: parse_num(command, "address", address)?,
                    count: parse_num(command, "count", count)?,
                    repeat: parse_bool(repeat)?,
                })
            }
            "i2c.write" => {
                let [address, data, repeat] = take::<3>(command, &args)?;
                Ok(Request::I2cWrite {
                    address: parse_num(command, "address", address)?,
                    data: hex_decode(data)?,
                    repeat: parse_bool(repeat)?,
                })
            }
            "radio.on" => {
                take::<0>(command, &args)?;
                Ok(Request::RadioOn)
            }
            "radio.off" => {
                take::<0>(command, &args)?;
                Ok(Request::RadioOff)
            }
            "radio.reset" => {
                take::<0>(command, &args)?;
                Ok(Request::RadioReset)
            }
            "radio.send_bytes" => {
                let [data] = take::<1>(command, &args)?;
                Ok(Request::RadioSendBytes {
                    data: decode_bytes(data)?,
                })
            }
            "radio.receive_bytes" => {
                take::<0>(command, &args)?;
                Ok(Request::RadioReceiveBytes)
            }
            "speech.translate" => {
                let [text] = take::<1>(command, &args)?;
                Ok(Request::SpeechTranslate {
                    text: unescape(text),
                })
            }
            "speech.pronounce" => {
                let (text, pitch, speed, mouth, throat) = parse_speech(command, &args)?;
                Ok(Request::SpeechPronounce {
                    phonemes: text,
                    pitch,
                    speed,
                    mouth,
                    throat,
                })
            }
            "speech.say" => {
                let (text, pitch, speed, mouth, throat) = parse_speech(command, &args)?;
                Ok(Request::SpeechSay {
                    text,
                    pitch,
                    speed,
                    mouth,
                    throat,
                })
            }
            "speech.sing" => {
                let (text, pitch, speed, mouth, throat) = parse_speech(command, &args)?;
                Ok(Request::SpeechSing {
                    phonemes: text,
                    pitch,
                    speed,
                    mouth,
                    throat,
                })
            }
            "speaker.on" => {
                take::<0>(command, &args)?;
                Ok(Request::SpeakerOn)
            }
            "speaker.off" => {
                take::<0>(command, &args)?;
                Ok(Request::SpeakerOff)
            }
            "microphone.sound_level" => {
                take::<0>(command, &args)?;
                Ok(Request::MicrophoneSoundLevel)
            }
            other => Err(ProtocolError::UnknownCommand(other.to_string())),
        }
    }
}

impl fmt::Display for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_line())
    }
}

/// Check arity and return the argument tokens as a fixed-size array.
fn take<'a, const N: usize>(command: &str, args: &[&'a str]) -> ProtocolResult<[&'a str; N]> {
    <[&str; N]>::try_from(args).map_err(|_| ProtocolError::BadArity {
        command: command.to_string(),
        expected: N,
        actual: args.len(),
    })
}

fn parse_num<T: FromStr>(command: &str, what: &str, token: &str) -> ProtocolResult<T> {
    token.parse().map_err(|_| {
        ProtocolError::InvalidArgument(format!("{command}: invalid {what}: {token}"))
    })
}

fn parse_speech(command: &str, args: &[&str]) -> ProtocolResult<(String, u8, u8, u8, u8)> {
    let [text, pitch, speed, mouth, throat] = take::<5>(command, args)?;
    Ok((
        unescape(text),
        parse_num(command, "pitch", pitch)?,
        parse_num(command, "speed", speed)?,
        parse_num(command, "mouth", mouth)?,
        parse_num(command, "throat", throat)?,
    ))
}

/// Lowercase hex encoding for i2c byte payloads.
pub fn hex_encode(data: &[u8]) -> String {
    hex::encode(data)
}

/// Reverse [`hex_encode`]. Accepts upper or lower case digits.
pub fn hex_decode(token: &str) -> ProtocolResult<Vec<u8>> {
    hex::decode(token)
        .map_err(|e| ProtocolError::InvalidArgument(format!("invalid hex payload {token}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_no_args() {
        assert_eq!(Request::DisplayClear.to_line(), "display.clear");
        assert_eq!(Request::RunningTime.to_line(), "running_time");
    }

    #[test]
    fn test_encode_pin() {
        let req = Request::PinWriteDigital { pin: 2, value: 1 };
        assert_eq!(req.to_line(), "pin.write_digital 2 1");
    }

    #[test]
    fn test_encode_scroll_escapes_text() {
        let req = Request::DisplayScroll {
            text: "hello world".to_string(),
        };
        assert_eq!(req.to_line(), "display.scroll hello%20world");
    }

    #[test]
    fn test_encode_show_string() {
        let req = Request::DisplayShow {
            value: ShowValue::Str("hi there".to_string()),
            delay_ms: 400,
            wait: true,
            looping: false,
            clear: false,
        };
        assert_eq!(
            req.to_line(),
            "display.show str hi%20there 400 True False False"
        );
    }

    #[test]
    fn test_encode_radio_send_bytes() {
        let req = Request::RadioSendBytes {
            data: vec![1, 2, 255],
        };
        assert_eq!(req.to_line(), "radio.send_bytes 1%202%20255");
    }

    #[test]
    fn test_encode_i2c_write() {
        let req = Request::I2cWrite {
            address: 0x1d,
            data: vec![0x00, 0xab],
            repeat: false,
        };
        assert_eq!(req.to_line(), "i2c.write 29 00ab False");
    }

    #[test]
    fn test_parse_round_trip() {
        let requests = [
            Request::PinReadDigital { pin: 0 },
            Request::PinSetAnalogPeriodMicroseconds {
                pin: 3,
                period_us: 500,
            },
            Request::ButtonGetPresses { button: Button::B },
            Request::DisplaySetPixel { x: 2, y: 4, value: 9 },
            Request::DisplayShow {
                value: ShowValue::Int(-5),
                delay_ms: 100,
                wait: false,
                looping: true,
                clear: true,
            },
            Request::DisplayScroll {
                text: "50% off today".to_string(),
            },
            Request::MusicPlay {
                notes: vec!["c4:4".to_string(), "e4:4".to_string()],
                pin: 0,
                wait: true,
                looping: false,
            },
            Request::MusicPitch {
                frequency: 440,
                duration_ms: -1,
                pin: 0,
                wait: false,
            },
            Request::AccelIsGesture {
                gesture: "face up".to_string(),
            },
            Request::I2cRead {
                address: 29,
                count: 6,
                repeat: false,
            },
            Request::I2cWrite {
                address: 29,
                data: vec![0x2d, 0x08],
                repeat: true,
            },
            Request::RadioSendBytes {
                data: vec![0, 128, 255],
            },
            Request::SpeechSay {
                text: "hello world".to_string(),
                pitch: 64,
                speed: 72,
                mouth: 128,
                throat: 128,
            },
            Request::MicrophoneSoundLevel,
        ];
        for req in requests {
            let line = req.to_line();
            assert_eq!(Request::parse(&line).unwrap(), req, "line: {line}");
        }
    }

    #[test]
    fn test_parse_unknown_command() {
        assert!(matches!(
            Request::parse("foo.bar"),
            Err(ProtocolError::UnknownCommand(_))
        ));
        assert!(matches!(
            Request::parse(""),
            Err(ProtocolError::UnknownCommand(_))
        ));
    }

    #[test]
    fn test_parse_bad_arity() {
        assert!(matches!(
            Request::parse("pin.read_digital"),
            Err(ProtocolError::BadArity {
                expected: 1,
                actual: 0,
                ..
            })
        ));
        assert!(matches!(
            Request::parse("display.clear now"),
            Err(ProtocolError::BadArity { .. })
        ));
    }

    #[test]
    fn test_parse_bad_argument() {
        assert!(matches!(
            Request::parse("pin.read_digital abc"),
            Err(ProtocolError::InvalidArgument(_))
        ));
        assert!(matches!(
            Request::parse("button.is_pressed C"),
            Err(ProtocolError::InvalidArgument(_))
        ));
        assert!(matches!(
            Request::parse("pin.is_touched 300"),
            Err(ProtocolError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_show_image_round_trip() {
        let image = Image::parse("09090:99999:99999:09990:00900").unwrap();
        let req = Request::DisplayShow {
            value: ShowValue::Image(image),
            delay_ms: 400,
            wait: true,
            looping: false,
            clear: false,
        };
        let line = req.to_line();
        assert_eq!(Request::parse(&line).unwrap(), req);
    }

    #[test]
    fn test_hex_round_trip() {
        let data = vec![0x00, 0x7f, 0xff];
        assert_eq!(hex_decode(&hex_encode(&data)).unwrap(), data);
        assert_eq!(hex_decode("00AB").unwrap(), vec![0x00, 0xab]);
        assert!(hex_decode("abc").is_err());
        assert!(hex_decode("zz").is_err());
    }

    #[test]
    fn test_bool_literals() {
        assert_eq!(render_bool(true), "True");
        assert!(!parse_bool("False").unwrap());
        assert!(parse_bool("true").is_err());
    }
}
