//! The request dispatcher.
//!
//! One request line in, one reply line out. The dispatcher owns the board,
//! parses each line into a request, runs the matching board operation, and
//! formats the result. A malformed or faulting request never kills the
//! loop; the fault becomes the reply and the loop reads the next line.

use std::io::{self, BufRead, Write};

use remotebit_protocol::{
    encode_bytes, escape, hex_encode, render_bool, ProtocolError, Reply, Request, LINE_TERMINATOR,
};

use crate::board::{Board, BoardResult};

/// Serves the command vocabulary against a [`Board`].
pub struct Dispatcher<B: Board> {
    board: B,
    echo: bool,
}

impl<B: Board> Dispatcher<B> {
    pub fn new(board: B) -> Dispatcher<B> {
        Dispatcher { board, echo: true }
    }

    /// Control whether received lines are echoed back before the reply.
    /// Hosts use the echo to verify the line survived the wire intact.
    pub fn echo(mut self, echo: bool) -> Dispatcher<B> {
        self.echo = echo;
        self
    }

    pub fn board(&self) -> &B {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut B {
        &mut self.board
    }

    /// Handle one request line (without the terminator) and produce the
    /// reply for it.
    pub fn handle_line(&mut self, line: &str) -> Reply {
        let request = match Request::parse(line) {
            Ok(request) => request,
            Err(ProtocolError::UnknownCommand(_)) => {
                return Reply::Error("Unknown command.".to_string());
            }
            Err(e) => return Reply::Exception(e.to_string()),
        };
        log::debug!("request: {request}");
        match self.execute(&request) {
            Ok(None) => Reply::Ack,
            Ok(Some(value)) => Reply::Value(value),
            Err(e) => Reply::Exception(e.to_string()),
        }
    }

    /// Read request lines from `input` until EOF, writing the echo and the
    /// reply for each to `output`.
    pub fn serve<R: BufRead, W: Write>(&mut self, mut input: R, mut output: W) -> io::Result<()> {
        let mut line = String::new();
        loop {
            line.clear();
            if input.read_line(&mut line)? == 0 {
                return Ok(());
            }
            let line = line.trim_end_matches(['\r', '\n']);
            if self.echo {
                output.write_all(line.as_bytes())?;
                output.write_all(LINE_TERMINATOR.as_bytes())?;
            }
            let reply = self.handle_line(line);
            output.write_all(reply.encode().as_bytes())?;
            output.write_all(LINE_TERMINATOR.as_bytes())?;
            output.flush()?;
        }
    }

    /// Run one request against the board. `None` means the command has no
    /// return value and is acknowledged with `ok`.
    fn execute(&mut self, request: &Request) -> BoardResult<Option<String>> {
        let board = &mut self.board;
        match request {
            // Pins
            Request::PinReadDigital { pin } => value(board.pin_read_digital(*pin)?),
            Request::PinWriteDigital { pin, value } => ack(board.pin_write_digital(*pin, *value)),
            Request::PinReadAnalog { pin } => value(board.pin_read_analog(*pin)?),
            Request::PinWriteAnalog { pin, value } => ack(board.pin_write_analog(*pin, *value)),
            Request::PinSetAnalogPeriod { pin, period_ms } => {
                ack(board.pin_set_analog_period(*pin, *period_ms))
            }
            Request::PinSetAnalogPeriodMicroseconds { pin, period_us } => {
                ack(board.pin_set_analog_period_microseconds(*pin, *period_us))
            }
            Request::PinIsTouched { pin } => boolean(board.pin_is_touched(*pin)?),

            // Buttons
            Request::ButtonIsPressed { button } => boolean(board.button_is_pressed(*button)?),
            Request::ButtonWasPressed { button } => boolean(board.button_was_pressed(*button)?),
            Request::ButtonGetPresses { button } => value(board.button_get_presses(*button)?),

            // Display
            Request::DisplayClear => ack(board.display_clear()),
            Request::DisplaySetPixel { x, y, value } => ack(board.display_set_pixel(*x, *y, *value)),
            Request::DisplayGetPixel { x, y } => value(board.display_get_pixel(*x, *y)?),
            Request::DisplayShow {
                value,
                delay_ms,
                wait,
                looping,
                clear,
            } => ack(board.display_show(value, *delay_ms, *wait, *looping, *clear)),
            Request::DisplayScroll { text } => ack(board.display_scroll(text)),
            Request::DisplayOn => ack(board.display_on()),
            Request::DisplayOff => ack(board.display_off()),
            Request::DisplayIsOn => boolean(board.display_is_on()?),
            Request::DisplayReadLightLevel => value(board.display_read_light_level()?),

            // System
            Request::RunningTime => value(board.running_time()?),
            Request::Temperature => value(board.temperature()?),

            // Music
            Request::MusicSetTempo { ticks, bpm } => ack(board.music_set_tempo(*ticks, *bpm)),
            Request::MusicGetTempo => {
                let (ticks, bpm) = board.music_get_tempo()?;
                Ok(Some(format!("{ticks} {bpm}")))
            }
            Request::MusicPlay {
                notes,
                pin,
                wait,
                looping,
            } => ack(board.music_play(notes, *pin, *wait, *looping)),
            Request::MusicPitch {
                frequency,
                duration_ms,
                pin,
                wait,
            } => ack(board.music_pitch(*frequency, *duration_ms, *pin, *wait)),
            Request::MusicStop { pin } => ack(board.music_stop(*pin)),
            Request::MusicReset => ack(board.music_reset()),

            // Accelerometer
            Request::AccelGetX => value(board.accel_get_x()?),
            Request::AccelGetY => value(board.accel_get_y()?),
            Request::AccelGetZ => value(board.accel_get_z()?),
            Request::AccelGetValues => {
                let (x, y, z) = board.accel_get_values()?;
                Ok(Some(format!("{x} {y} {z}")))
            }
            Request::AccelCurrentGesture => Ok(Some(board.accel_current_gesture()?)),
            Request::AccelIsGesture { gesture } => boolean(board.accel_is_gesture(gesture)?),
            Request::AccelWasGesture { gesture } => boolean(board.accel_was_gesture(gesture)?),
            Request::AccelGetGestures => Ok(Some(board.accel_get_gestures()?.join(" "))),

            // Compass
            Request::CompassCalibrate => ack(board.compass_calibrate()),
            Request::CompassIsCalibrated => boolean(board.compass_is_calibrated()?),
            Request::CompassClearCalibration => ack(board.compass_clear_calibration()),
            Request::CompassGetX => value(board.compass_get_x()?),
            Request::CompassGetY => value(board.compass_get_y()?),
            Request::CompassGetZ => value(board.compass_get_z()?),
            Request::CompassHeading => value(board.compass_heading()?),
            Request::CompassGetFieldStrength => value(board.compass_get_field_strength()?),

            // I2C
            Request::I2cInit {
                frequency,
                sda,
                scl,
            } => ack(board.i2c_init(*frequency, *sda, *scl)),
            // scan addresses are space-joined decimals; only read payloads
            // use the hex form
            Request::I2cScan => Ok(Some(
                board
                    .i2c_scan()?
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(" "),
            )),
            Request::I2cRead {
                address,
                count,
                repeat,
            } => Ok(Some(hex_encode(&board.i2c_read(*address, *count, *repeat)?))),
            Request::I2cWrite {
                address,
                data,
                repeat,
            } => ack(board.i2c_write(*address, data, *repeat)),

            // Radio
            Request::RadioOn => ack(board.radio_on()),
            Request::RadioOff => ack(board.radio_off()),
            Request::RadioReset => ack(board.radio_reset()),
            Request::RadioSendBytes { data } => ack(board.radio_send_bytes(data)),
            Request::RadioReceiveBytes => {
                // no pending message encodes as an empty value line
                let payload = board.radio_receive_bytes()?;
                Ok(Some(payload.as_deref().map(encode_bytes).unwrap_or_default()))
            }

            // Speech
            Request::SpeechTranslate { text } => {
                Ok(Some(escape(&board.speech_translate(text)?)))
            }
            Request::SpeechPronounce {
                phonemes,
                pitch,
                speed,
                mouth,
                throat,
            } => ack(board.speech_pronounce(phonemes, *pitch, *speed, *mouth, *throat)),
            Request::SpeechSay {
                text,
                pitch,
                speed,
                mouth,
                throat,
            } => ack(board.speech_say(text, *pitch, *speed, *mouth, *throat)),
            Request::SpeechSing {
                phonemes,
                pitch,
                speed,
                mouth,
                throat,
            } => ack(board.speech_sing(phonemes, *pitch, *speed, *mouth, *throat)),

            // Speaker and microphone
            Request::SpeakerOn => ack(board.speaker_on()),
            Request::SpeakerOff => ack(board.speaker_off()),
            Request::MicrophoneSoundLevel => value(board.microphone_sound_level()?),
        }
    }
}

fn ack(result: BoardResult<()>) -> BoardResult<Option<String>> {
    result.map(|()| None)
}

fn value<T: ToString>(v: T) -> BoardResult<Option<String>> {
    Ok(Some(v.to_string()))
}

fn boolean(v: bool) -> BoardResult<Option<String>> {
    Ok(Some(render_bool(v).to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::SimBoard;

    fn dispatcher() -> Dispatcher<SimBoard> {
        Dispatcher::new(SimBoard::new())
    }

    #[test]
    fn read_digital_reports_primed_value() {
        let mut d = dispatcher();
        d.board_mut().set_digital_input(0, 1);
        assert_eq!(d.handle_line("pin.read_digital 0"), Reply::Value("1".to_string()));
    }

    #[test]
    fn unknown_command_is_error_and_loop_survives() {
        let mut d = dispatcher();
        assert_eq!(
            d.handle_line("foo.bar 1 2"),
            Reply::Error("Unknown command.".to_string())
        );
        assert_eq!(d.handle_line("temperature"), Reply::Value("21".to_string()));
    }

    #[test]
    fn board_fault_is_exception_and_loop_survives() {
        let mut d = dispatcher();
        assert_eq!(
            d.handle_line("pin.read_digital 99"),
            Reply::Exception("invalid pin: 99".to_string())
        );
        assert_eq!(d.handle_line("display.clear"), Reply::Ack);
    }

    #[test]
    fn bad_arity_is_exception() {
        let reply = dispatcher().handle_line("pin.write_digital 1");
        assert!(matches!(reply, Reply::Exception(_)));
    }

    #[test]
    fn tuple_replies_are_space_joined() {
        let mut d = dispatcher();
        d.board_mut().set_acceleration(10, -20, 1024);
        assert_eq!(
            d.handle_line("a.get_values"),
            Reply::Value("10 -20 1024".to_string())
        );
        assert_eq!(
            d.handle_line("music.get_tempo"),
            Reply::Value("4 120".to_string())
        );
    }

    #[test]
    fn overflowing_analog_period_is_exception_and_loop_survives() {
        let mut d = dispatcher();
        // 4_294_968 ms exceeds what fits in u32 microseconds
        assert!(matches!(
            d.handle_line("pin.set_analog_period 0 4294968"),
            Reply::Exception(_)
        ));
        assert_eq!(d.handle_line("pin.set_analog_period 0 20"), Reply::Ack);
    }

    #[test]
    fn i2c_scan_replies_decimal_addresses() {
        let mut d = dispatcher();
        assert_eq!(d.handle_line("i2c.scan"), Reply::Value(String::new()));
        d.board_mut().add_i2c_device(0x1d, vec![]);
        d.board_mut().add_i2c_device(0x3c, vec![]);
        assert_eq!(d.handle_line("i2c.scan"), Reply::Value("29 60".to_string()));
    }

    #[test]
    fn radio_receive_with_empty_queue_is_empty_value() {
        let mut d = dispatcher();
        assert_eq!(d.handle_line("radio.on"), Reply::Ack);
        assert_eq!(
            d.handle_line("radio.receive_bytes"),
            Reply::Value(String::new())
        );
    }

    #[test]
    fn serve_echoes_and_replies_per_line() {
        let input = b"display.clear\r\nfoo\r\n".to_vec();
        let mut output = Vec::new();
        let mut d = dispatcher();
        d.serve(&input[..], &mut output).unwrap();
        let text = String::from_utf8(output).unwrap();
        assert_eq!(
            text,
            "display.clear\r\nok\r\nfoo\r\nERROR: Unknown command.\r\n"
        );
    }

    #[test]
    fn serve_without_echo_writes_replies_only() {
        let input = b"temperature\r\n".to_vec();
        let mut output = Vec::new();
        let mut d = dispatcher().echo(false);
        d.serve(&input[..], &mut output).unwrap();
        assert_eq!(String::from_utf8(output).unwrap(), "21\r\n");
    }
}
