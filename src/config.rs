//! Button driver configuration.
//!
//! One [`ButtonConfig`] is handed to the driver at initialization and never
//! changes afterwards. It can be built in code or parsed from JSON.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::recorder::EdgeKind;
use crate::tick::TickTiming;

/// Upper bound on the number of independent buttons.
pub const MAX_BUTTONS: usize = 5;

/// Opaque hardware pin identifier (a GPIO number on most targets).
pub type PinId = u8;

/// Which input path writes a button's timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterruptMode {
    /// Polled only; `process_tick` writes both timestamps.
    #[default]
    None,
    /// Interrupt on release closes the interval; polling opens it.
    RisingEdge,
    /// Interrupt on press opens the interval; polling closes it.
    FallingEdge,
    /// Interrupt on both edges: first edge opens, next edge closes.
    BothEdges,
}

impl InterruptMode {
    /// Whether `process_tick` needs to read this button's level.
    pub const fn needs_polling(self) -> bool {
        !matches!(self, Self::BothEdges)
    }

    /// Whether an interrupt edge of this kind is meaningful for the mode.
    pub const fn accepts(self, edge: EdgeKind) -> bool {
        match (self, edge) {
            (Self::None, _) => false,
            (Self::BothEdges, _) | (_, EdgeKind::Any) => true,
            (Self::RisingEdge, EdgeKind::Rising) | (Self::FallingEdge, EdgeKind::Falling) => true,
            _ => false,
        }
    }
}

/// Per-button pin assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PinConfig {
    pub pin: PinId,
    #[serde(default)]
    pub interrupt_mode: InterruptMode,
}

impl PinConfig {
    pub const fn new(pin: PinId, interrupt_mode: InterruptMode) -> Self {
        Self { pin, interrupt_mode }
    }
}

/// Full driver configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ButtonConfig {
    /// Buttons in slot order; the slot index is the reported button id.
    pub pins: heapless::Vec<PinConfig, MAX_BUTTONS>,
    /// `true` if a high level means pressed.
    pub active_high: bool,
    /// Timer ticks per microsecond.
    pub ticks_per_us: u32,
    /// Quiet time after release before the press is trusted (µs).
    pub debounce_us: u32,
    /// Presses held longer than this are long presses (µs).
    pub long_press_us: u32,
    /// Discard an opened interval that never closes within this time (µs).
    pub stale_press_us: Option<u32>,
}

impl Default for ButtonConfig {
    fn default() -> Self {
        Self {
            pins: heapless::Vec::new(),
            active_high: false,
            ticks_per_us: 1,
            debounce_us: 10_000, // 10 ms
            long_press_us: 1_000_000, // 1 s
            stale_press_us: None,
        }
    }
}

impl ButtonConfig {
    /// Append a button. Fails once [`MAX_BUTTONS`] are configured.
    pub fn with_button(mut self, pin: PinId, mode: InterruptMode) -> Result<Self, ConfigError> {
        self.pins
            .push(PinConfig::new(pin, mode))
            .map_err(|_| ConfigError::TooManyButtons)?;
        Ok(self)
    }

    /// Parse and validate a JSON configuration document.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json).map_err(|e| {
            debug!("ButtonConfig: JSON rejected: {}", e);
            ConfigError::Parse
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Configured buttons in slot order.
    pub fn buttons(&self) -> &[PinConfig] {
        &self.pins
    }

    /// Slot index of the button on `pin`.
    pub fn find_pin(&self, pin: PinId) -> Option<usize> {
        self.pins.iter().position(|p| p.pin == pin)
    }

    /// Whether any button relies on the polling path.
    pub fn needs_pin_reader(&self) -> bool {
        self.pins.iter().any(|p| p.interrupt_mode.needs_polling())
    }

    /// Reject configurations the driver cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pins.is_empty() {
            return Err(ConfigError::NoButtons);
        }
        for (i, a) in self.pins.iter().enumerate() {
            if self.pins[i + 1..].iter().any(|b| b.pin == a.pin) {
                return Err(ConfigError::DuplicatePin(a.pin));
            }
        }
        TickTiming::from_config(self).map(|_| ())
    }
}
