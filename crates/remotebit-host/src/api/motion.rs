//! Accelerometer and compass operations.

use remotebit_protocol::Request;

use crate::error::LinkResult;
use crate::link::{parse_reply_num, Link};

/// The accelerometer.
pub struct Accelerometer<'a> {
    link: &'a mut Link,
}

impl<'a> Accelerometer<'a> {
    pub(crate) fn new(link: &'a mut Link) -> Self {
        Accelerometer { link }
    }

    /// Acceleration on the X axis in milli-g.
    pub fn get_x(&mut self) -> LinkResult<i32> {
        self.link.request_num(&Request::AccelGetX)
    }

    /// Acceleration on the Y axis in milli-g.
    pub fn get_y(&mut self) -> LinkResult<i32> {
        self.link.request_num(&Request::AccelGetY)
    }

    /// Acceleration on the Z axis in milli-g.
    pub fn get_z(&mut self) -> LinkResult<i32> {
        self.link.request_num(&Request::AccelGetZ)
    }

    /// All three axes at once.
    pub fn get_values(&mut self) -> LinkResult<(i32, i32, i32)> {
        let reply = self.link.request_value(&Request::AccelGetValues)?;
        let mut tokens = reply.split(' ');
        let x = parse_reply_num(&reply, tokens.next())?;
        let y = parse_reply_num(&reply, tokens.next())?;
        let z = parse_reply_num(&reply, tokens.next())?;
        Ok((x, y, z))
    }

    /// Name of the current gesture (`up`, `down`, `face up`, `shake`, ...).
    pub fn current_gesture(&mut self) -> LinkResult<String> {
        self.link.request_value(&Request::AccelCurrentGesture)
    }

    /// Check whether the named gesture is currently active.
    pub fn is_gesture(&mut self, gesture: &str) -> LinkResult<bool> {
        self.link.request_bool(&Request::AccelIsGesture {
            gesture: gesture.to_string(),
        })
    }

    /// Check whether the named gesture occurred since this was last called.
    pub fn was_gesture(&mut self, gesture: &str) -> LinkResult<bool> {
        self.link.request_bool(&Request::AccelWasGesture {
            gesture: gesture.to_string(),
        })
    }

    /// The gesture history since this was last called.
    ///
    /// The wire form joins names with spaces, so multi-word gesture names
    /// (`face up`) are ambiguous in the history; this mirrors the firmware.
    pub fn get_gestures(&mut self) -> LinkResult<Vec<String>> {
        let reply = self.link.request_value(&Request::AccelGetGestures)?;
        Ok(reply.split_whitespace().map(str::to_string).collect())
    }
}

/// The compass (magnetometer).
pub struct Compass<'a> {
    link: &'a mut Link,
}

impl<'a> Compass<'a> {
    pub(crate) fn new(link: &'a mut Link) -> Self {
        Compass { link }
    }

    /// Run the on-board calibration routine (blocks until the user
    /// completes it).
    pub fn calibrate(&mut self) -> LinkResult<()> {
        self.link.request_ack(&Request::CompassCalibrate)
    }

    /// Check whether the compass has been calibrated.
    pub fn is_calibrated(&mut self) -> LinkResult<bool> {
        self.link.request_bool(&Request::CompassIsCalibrated)
    }

    /// Discard the current calibration.
    pub fn clear_calibration(&mut self) -> LinkResult<()> {
        self.link.request_ack(&Request::CompassClearCalibration)
    }

    /// Magnetic field strength on the X axis in nanotesla.
    pub fn get_x(&mut self) -> LinkResult<i32> {
        self.link.request_num(&Request::CompassGetX)
    }

    /// Magnetic field strength on the Y axis in nanotesla.
    pub fn get_y(&mut self) -> LinkResult<i32> {
        self.link.request_num(&Request::CompassGetY)
    }

    /// Magnetic field strength on the Z axis in nanotesla.
    pub fn get_z(&mut self) -> LinkResult<i32> {
        self.link.request_num(&Request::CompassGetZ)
    }

    /// Compass heading in degrees (0-360).
    pub fn heading(&mut self) -> LinkResult<u32> {
        self.link.request_num(&Request::CompassHeading)
    }

    /// Overall magnetic field strength.
    pub fn get_field_strength(&mut self) -> LinkResult<i32> {
        self.link.request_num(&Request::CompassGetFieldStrength)
    }
}
