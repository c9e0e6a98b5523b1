//! End-to-end tests driving the host API against the device dispatcher
//! with a simulated board, request lines in and reply lines out, with no
//! byte stream in between.

use std::cell::RefCell;
use std::rc::Rc;

use remotebit_host::api::Microbit;
use remotebit_host::protocol::{icons, Button, Image, Reply};
use remotebit_host::{ErrorMode, Link, LinkError, LinkResult, Transport};
use remotebit_device::{Dispatcher, SimBoard};

/// Feeds request lines straight into a dispatcher and hands its reply back,
/// standing in for the serial wire.
struct Loopback {
    dispatcher: Rc<RefCell<Dispatcher<SimBoard>>>,
}

impl Transport for Loopback {
    fn send(&mut self, request: &str, expect_ack: bool) -> LinkResult<()> {
        match self.dispatcher.borrow_mut().handle_line(request) {
            Reply::Ack => Ok(()),
            Reply::Error(message) => Err(LinkError::Device(message)),
            Reply::Exception(message) => Err(LinkError::Exception(message)),
            Reply::Value(value) => {
                if expect_ack {
                    Err(LinkError::AckMismatch {
                        request: request.to_string(),
                        reply: value,
                    })
                } else {
                    Ok(())
                }
            }
        }
    }

    fn send_receive(&mut self, request: &str) -> LinkResult<String> {
        match self.dispatcher.borrow_mut().handle_line(request) {
            Reply::Ack => Ok("ok".to_string()),
            Reply::Value(value) => Ok(value),
            Reply::Error(message) => Err(LinkError::Device(message)),
            Reply::Exception(message) => Err(LinkError::Exception(message)),
        }
    }
}

/// A board wired to a dispatcher through the loopback, plus a shared handle
/// to the simulated board for priming inputs and observing outputs.
fn loopback_board() -> (Microbit, Rc<RefCell<Dispatcher<SimBoard>>>) {
    let dispatcher = Rc::new(RefCell::new(Dispatcher::new(SimBoard::new())));
    let transport = Loopback {
        dispatcher: Rc::clone(&dispatcher),
    };
    let link = Link::with_transport(Box::new(transport), ErrorMode::Raise);
    (Microbit::from_link(link), dispatcher)
}

#[test]
fn display_pixels_round_trip() {
    let (mut mb, _sim) = loopback_board();
    mb.display().set_pixel(2, 3, 9).unwrap();
    assert_eq!(mb.display().get_pixel(2, 3).unwrap(), 9);
    mb.display().clear().unwrap();
    assert_eq!(mb.display().get_pixel(2, 3).unwrap(), 0);
}

#[test]
fn show_icon_lands_on_the_device_display() {
    let (mut mb, sim) = loopback_board();
    let heart = Image::parse(icons::HEART).unwrap();
    mb.display().show(heart.clone()).unwrap();
    assert_eq!(sim.borrow().board().display(), &heart);
}

#[test]
fn buttons_report_primed_presses() {
    let (mut mb, sim) = loopback_board();
    sim.borrow_mut().board_mut().press_button(Button::A);
    sim.borrow_mut().board_mut().press_button(Button::A);
    assert!(!mb.button_a().is_pressed().unwrap());
    assert!(mb.button_a().was_pressed().unwrap());
    assert!(!mb.button_a().was_pressed().unwrap());
    assert_eq!(mb.button_a().get_presses().unwrap(), 2);
}

#[test]
fn sensors_read_primed_values() {
    let (mut mb, sim) = loopback_board();
    {
        let mut d = sim.borrow_mut();
        let board = d.board_mut();
        board.set_temperature(-5);
        board.advance_clock(1234);
        board.set_acceleration(10, -20, 1024);
    }
    assert_eq!(mb.temperature().unwrap(), -5);
    assert_eq!(mb.running_time().unwrap(), 1234);
    assert_eq!(mb.accelerometer().get_values().unwrap(), (10, -20, 1024));
    assert_eq!(mb.accelerometer().get_x().unwrap(), 10);
}

#[test]
fn radio_round_trip_and_unpowered_fault() {
    let (mut mb, sim) = loopback_board();

    match mb.radio().send_bytes(&[1, 2, 3]) {
        Err(LinkError::Exception(message)) => assert!(message.contains("radio")),
        other => panic!("expected an exception, got {other:?}"),
    }

    mb.radio().on().unwrap();
    mb.radio().send_bytes(&[1, 2, 255]).unwrap();
    assert_eq!(sim.borrow().board().radio_sent(), &[vec![1, 2, 255]]);

    assert_eq!(mb.radio().receive_bytes().unwrap(), None);
    sim.borrow_mut().board_mut().push_radio_message(b"hi there".to_vec());
    assert_eq!(mb.radio().receive().unwrap().as_deref(), Some("hi there"));
}

#[test]
fn i2c_scan_read_write() {
    let (mut mb, sim) = loopback_board();
    sim.borrow_mut().board_mut().add_i2c_device(0x1d, vec![0xab, 0xcd]);

    assert_eq!(mb.i2c().scan().unwrap(), vec![0x1d]);
    assert_eq!(mb.i2c().read(0x1d, 2, false).unwrap(), vec![0xab, 0xcd]);
    mb.i2c().write(0x1d, &[0x00, 0xff], false).unwrap();
    assert_eq!(sim.borrow().board().i2c_writes(), &[(0x1d, vec![0x00, 0xff])]);
}

#[test]
fn scrolled_text_survives_spaces_and_percent_signs() {
    let (mut mb, sim) = loopback_board();
    mb.display().scroll("50% done, 50% left").unwrap();
    assert_eq!(
        sim.borrow().board().last_scrolled(),
        Some("50% done, 50% left")
    );
}

#[test]
fn speech_translate_unescapes_the_phonemes() {
    let (mut mb, _sim) = loopback_board();
    // the simulated synthesizer uppercases its input
    assert_eq!(mb.speech().translate("hello world").unwrap(), "HELLO WORLD");
}

#[test]
fn unknown_pin_surfaces_as_a_typed_exception() {
    let (mut mb, _sim) = loopback_board();
    match mb.pin(99).read_digital() {
        Err(LinkError::Exception(message)) => assert!(message.contains("99")),
        other => panic!("expected an exception, got {other:?}"),
    }
}

#[test]
fn music_tempo_round_trip() {
    let (mut mb, _sim) = loopback_board();
    assert_eq!(mb.music().get_tempo().unwrap(), (4, 120));
    mb.music().set_tempo(8, 90).unwrap();
    assert_eq!(mb.music().get_tempo().unwrap(), (8, 90));
}
