//! System tick clock adapter.
//!
//! One tick per microsecond, truncated to `u32` (wraps after ~71.6 min).
//!
//! - **`target_os = "espidf"`**: wraps `esp_timer_get_time()` from the
//!   ESP-IDF high-resolution timer.
//! - **`not(target_os = "espidf")`**: uses `std::time::Instant` for
//!   host-side testing and simulation.

use crate::ports::Clock;
use crate::tick::Tick;

/// Ticks per microsecond produced by [`SystemTickClock`].
pub const SYSTEM_TICKS_PER_US: u32 = 1;

#[derive(Debug, Clone, Copy)]
pub struct SystemTickClock {
    #[cfg(not(target_os = "espidf"))]
    start: std::time::Instant,
}

impl Default for SystemTickClock {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemTickClock {
    pub fn new() -> Self {
        Self {
            #[cfg(not(target_os = "espidf"))]
            start: std::time::Instant::now(),
        }
    }

    /// Microseconds since boot (monotonic, wraps at `u64::MAX`).
    #[cfg(target_os = "espidf")]
    pub fn uptime_us(&self) -> u64 {
        (unsafe { esp_idf_svc::sys::esp_timer_get_time() }) as u64
    }

    /// Microseconds since the clock was created.
    #[cfg(not(target_os = "espidf"))]
    pub fn uptime_us(&self) -> u64 {
        self.start.elapsed().as_micros() as u64
    }
}

impl Clock for SystemTickClock {
    fn now(&self) -> Tick {
        self.uptime_us() as Tick
    }
}
