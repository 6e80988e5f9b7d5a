//! Limit switch inputs.

use embedded_hal::digital::InputPin;

use crate::config::SwitchLevel;
use crate::error::{LimitSwitch, MotorError, Result};

/// The pair of end-of-travel switches bounding an axis.
pub struct LimitSwitches<START, END>
where
    START: InputPin,
    END: InputPin,
{
    start: START,
    end: END,
    active_high: bool,
}

impl<START, END> LimitSwitches<START, END>
where
    START: InputPin,
    END: InputPin,
{
    /// Wrap both switch inputs. Both report `active_level` when pressed.
    pub fn new(start: START, end: END, active_level: SwitchLevel) -> Self {
        Self {
            start,
            end,
            active_high: active_level.is_high(),
        }
    }

    /// Whether `switch` is currently pressed.
    pub fn is_active(&mut self, switch: LimitSwitch) -> Result<bool> {
        let high = match switch {
            LimitSwitch::Start => self.start.is_high().map_err(|_| MotorError::PinError)?,
            LimitSwitch::End => self.end.is_high().map_err(|_| MotorError::PinError)?,
        };

        Ok(high == self.active_high)
    }

    /// Level reported when pressed.
    pub fn active_level(&self) -> SwitchLevel {
        if self.active_high {
            SwitchLevel::High
        } else {
            SwitchLevel::Low
        }
    }

    /// Give the inputs back.
    pub fn release(self) -> (START, END) {
        (self.start, self.end)
    }
}
