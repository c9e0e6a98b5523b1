//! Button operations.

use remotebit_protocol::{Button, Request};

use crate::error::LinkResult;
use crate::link::Link;

/// One of the two physical buttons.
pub struct ButtonHandle<'a> {
    link: &'a mut Link,
    button: Button,
}

impl<'a> ButtonHandle<'a> {
    pub(crate) fn new(link: &'a mut Link, button: Button) -> Self {
        ButtonHandle { link, button }
    }

    /// Check whether the button is currently pressed.
    pub fn is_pressed(&mut self) -> LinkResult<bool> {
        self.link.request_bool(&Request::ButtonIsPressed {
            button: self.button,
        })
    }

    /// Check whether the button was pressed since this was last called.
    pub fn was_pressed(&mut self) -> LinkResult<bool> {
        self.link.request_bool(&Request::ButtonWasPressed {
            button: self.button,
        })
    }

    /// Get the press count since this was last called, and reset it.
    pub fn get_presses(&mut self) -> LinkResult<u32> {
        self.link.request_num(&Request::ButtonGetPresses {
            button: self.button,
        })
    }
}
