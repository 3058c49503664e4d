//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing every classified press to the
//! logger (UART / USB-CDC in production). An application that reacts to
//! presses implements the same trait, or passes a closure.

use log::info;

use crate::ports::{EventSink, PressEvent, PressKind};

/// Adapter that logs every [`PressEvent`] to the serial console.
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: PressEvent) {
        match event.kind {
            PressKind::Normal => info!("BUTTON | {} normal press", event.button),
            PressKind::Long => info!("BUTTON | {} long press", event.button),
            PressKind::Double => info!("BUTTON | {} double press", event.button),
        }
    }
}
