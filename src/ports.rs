//! Port traits: the boundary between the classifier and the platform.
//!
//! ```text
//!   Clock ─────┐
//!   PinReader ─┼──▶ ButtonDriver ──▶ EventSink
//!   (edges) ───┘
//! ```
//!
//! The driver never touches timers or GPIO registers. The platform supplies
//! a tick source, an optional level reader for polled buttons, and a sink for
//! classified events. Closures work for all three.

use core::fmt;

use crate::config::PinConfig;
use crate::error::PinReadError;
use crate::tick::{self, Tick};

// ───────────────────────────────────────────────────────────────
// Classified events
// ───────────────────────────────────────────────────────────────

/// Slot index of a configured button (0-based, configuration order).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ButtonId(pub u8);

impl ButtonId {
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ButtonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "button {}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressKind {
    Normal,
    Long,
    Double,
}

/// A classified press on one button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PressEvent {
    pub kind: PressKind,
    pub button: ButtonId,
}

impl PressEvent {
    pub const fn new(kind: PressKind, button: ButtonId) -> Self {
        Self { kind, button }
    }
}

// ───────────────────────────────────────────────────────────────
// Tick source
// ───────────────────────────────────────────────────────────────

/// Monotonic, wrapping tick source.
pub trait Clock {
    /// Current counter value.
    fn now(&self) -> Tick;

    /// Ticks from `start` to `end`. Must be wraparound-safe.
    fn elapsed(&self, start: Tick, end: Tick) -> Tick {
        tick::elapsed(start, end)
    }
}

impl<F: Fn() -> Tick> Clock for F {
    fn now(&self) -> Tick {
        self()
    }
}

// ───────────────────────────────────────────────────────────────
// Level reader
// ───────────────────────────────────────────────────────────────

/// Raw level of a button pin, before polarity is applied.
pub trait PinReader {
    fn read_level(&mut self, pin: &PinConfig) -> Result<bool, PinReadError>;
}

impl<F: FnMut(&PinConfig) -> Result<bool, PinReadError>> PinReader for F {
    fn read_level(&mut self, pin: &PinConfig) -> Result<bool, PinReadError> {
        self(pin)
    }
}

// ───────────────────────────────────────────────────────────────
// Event sink
// ───────────────────────────────────────────────────────────────

/// Receives classified events from `process_tick`.
///
/// Called synchronously from the main loop, never from the edge path.
pub trait EventSink {
    fn emit(&mut self, event: PressEvent);
}

impl<F: FnMut(PressEvent)> EventSink for F {
    fn emit(&mut self, event: PressEvent) {
        self(event);
    }
}
