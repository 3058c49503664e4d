//! Unified error types for the button driver.
//!
//! A single `Error` enum that every fallible path converts into. All
//! variants are `Copy` so they can be returned from `initialize` without
//! allocation.
//!
//! Only configuration problems are ever surfaced to the caller. Unknown
//! pins on the edge path and calls made before initialization are silent
//! no-ops, and pin read failures on the polling path count as "not pressed".

use core::fmt;

use crate::config::PinId;

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The driver configuration was rejected.
    Config(ConfigError),
    /// A pin level could not be read.
    PinRead(PinReadError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "config: {e}"),
            Self::PinRead(e) => write!(f, "pin read: {e}"),
        }
    }
}

impl core::error::Error for Error {}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// No API bundle was supplied to `initialize`.
    MissingConfig,
    /// Zero buttons configured.
    NoButtons,
    /// More buttons than [`MAX_BUTTONS`](crate::config::MAX_BUTTONS).
    TooManyButtons,
    /// The tick source capability is absent.
    MissingClock,
    /// The event sink capability is absent.
    MissingEventSink,
    /// A polled or hybrid button is configured but no pin reader was given.
    MissingPinReader,
    /// `ticks_per_us` is zero.
    ZeroTickRate,
    /// The same pin is assigned to two buttons.
    DuplicatePin(PinId),
    /// A threshold converted to ticks does not fit a `Tick`.
    ThresholdOverflow(&'static str),
    /// `debounce_us` is not shorter than the short-press window.
    DebounceExceedsWindow,
    /// A serialized configuration could not be parsed.
    Parse,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingConfig => write!(f, "configuration missing"),
            Self::NoButtons => write!(f, "no buttons configured"),
            Self::TooManyButtons => write!(f, "too many buttons"),
            Self::MissingClock => write!(f, "tick source missing"),
            Self::MissingEventSink => write!(f, "event callback missing"),
            Self::MissingPinReader => write!(f, "pin reader missing for polled button"),
            Self::ZeroTickRate => write!(f, "tick rate is zero"),
            Self::DuplicatePin(pin) => write!(f, "pin {pin} assigned twice"),
            Self::ThresholdOverflow(name) => write!(f, "{name} overflows the tick range"),
            Self::DebounceExceedsWindow => {
                write!(f, "debounce_us must be shorter than the short press window")
            }
            Self::Parse => write!(f, "configuration could not be parsed"),
        }
    }
}

impl core::error::Error for ConfigError {}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

// ---------------------------------------------------------------------------
// Pin read errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinReadError {
    /// The reader has no pin with this id.
    UnknownPin(PinId),
    /// The underlying GPIO read failed.
    ReadFailed(PinId),
}

impl fmt::Display for PinReadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownPin(pin) => write!(f, "unknown pin {pin}"),
            Self::ReadFailed(pin) => write!(f, "GPIO {pin} read failed"),
        }
    }
}

impl core::error::Error for PinReadError {}

impl From<PinReadError> for Error {
    fn from(e: PinReadError) -> Self {
        Self::PinRead(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
