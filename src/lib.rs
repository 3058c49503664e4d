//! Button press classifier library.
//!
//! Turns raw button activity (polled levels or edge interrupts) into
//! normal, long and double press events for up to
//! [`MAX_BUTTONS`](config::MAX_BUTTONS) buttons. The core knows nothing
//! about GPIO or timers; time and levels come in through the traits in
//! [`ports`], events go out through [`ports::EventSink`].
//!
//! ```text
//!  on_edge ──▶ EdgeRecorder ──▶ PressClassifier ──▶ EventSink
//!  (ISR)       (start, end)     classify · decide
//!                  ▲
//!  process_tick ───┘  (polling)
//! ```
//!
//! All ESP-IDF-specific code is guarded by `#[cfg(target_os = "espidf")]`
//! within each module.

#![deny(unused_must_use)]

pub mod adapters;
pub mod classifier;
pub mod config;
pub mod driver;
pub mod error;
pub mod events;
pub mod ports;
pub mod recorder;
pub mod tick;

pub use classifier::{ClassifiedDelta, PressClassifier, ShortPressCounter};
pub use config::{ButtonConfig, InterruptMode, MAX_BUTTONS, PinConfig, PinId};
pub use driver::{ButtonApi, ButtonDriver};
pub use error::{ConfigError, Error, PinReadError, Result};
pub use ports::{ButtonId, Clock, EventSink, PinReader, PressEvent, PressKind};
pub use recorder::{EdgeKind, EdgeRecorder, PressedInterval};
pub use tick::Tick;
