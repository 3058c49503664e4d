//! `embedded-hal` pin reader adapter.
//!
//! Maps button pin ids to HAL input pins so the polling path can read
//! raw levels from any HAL that implements `embedded_hal::digital::InputPin`
//! (ESP-IDF `PinDriver`, RP2040, STM32, host mocks).

use embedded_hal::digital::InputPin;

use crate::config::{MAX_BUTTONS, PinConfig, PinId};
use crate::error::PinReadError;
use crate::ports::PinReader;

pub struct HalPinReader<P> {
    pins: heapless::Vec<(PinId, P), MAX_BUTTONS>,
}

impl<P: InputPin> Default for HalPinReader<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: InputPin> HalPinReader<P> {
    pub const fn new() -> Self {
        Self {
            pins: heapless::Vec::new(),
        }
    }

    /// Register `pin` under `id`. Gives the pin back if the reader is full.
    pub fn add(&mut self, id: PinId, pin: P) -> Result<(), P> {
        self.pins.push((id, pin)).map_err(|(_, pin)| pin)
    }
}

impl<P: InputPin> PinReader for HalPinReader<P> {
    fn read_level(&mut self, pin: &PinConfig) -> Result<bool, PinReadError> {
        let (_, hal_pin) = self
            .pins
            .iter_mut()
            .find(|(id, _)| *id == pin.pin)
            .ok_or(PinReadError::UnknownPin(pin.pin))?;
        hal_pin
            .is_high()
            .map_err(|_| PinReadError::ReadFailed(pin.pin))
    }
}
