//! Adapters: concrete implementations of the port traits.
//!
//! | Adapter    | Implements  | Connects to                         |
//! |------------|-------------|-------------------------------------|
//! | `gpio`     | PinReader   | embedded-hal `InputPin`s            |
//! | `log_sink` | EventSink   | Serial log output                   |
//! | `time`     | Clock       | ESP32 system timer / host `Instant` |

pub mod gpio;
pub mod log_sink;
pub mod time;
