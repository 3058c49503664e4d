//! Tick arithmetic.
//!
//! Ticks are opaque `u32` counter values that wrap at `u32::MAX`. Every
//! elapsed-time comparison in the crate goes through [`elapsed`] (or the
//! clock's override of it), never a bare subtraction.

use crate::config::ButtonConfig;
use crate::error::ConfigError;

/// Raw timer counter value.
pub type Tick = u32;

/// Quiet window after a confirmed short press during which a second short
/// press counts towards a double press (microseconds).
pub const SHORT_PRESS_WINDOW_US: u32 = 500_000;

/// Ticks elapsed from `start` to `end`, across at most one wraparound.
///
/// ```
/// assert_eq!(buttonpress::tick::elapsed(u32::MAX - 5, 10), 16);
/// ```
pub const fn elapsed(start: Tick, end: Tick) -> Tick {
    end.wrapping_sub(start)
}

/// Convert a microsecond duration into ticks, or `None` if it does not fit.
pub fn us_to_ticks(us: u32, ticks_per_us: u32) -> Option<Tick> {
    Tick::try_from(u64::from(us) * u64::from(ticks_per_us)).ok()
}

/// Thresholds converted to ticks once, at initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickTiming {
    /// Quiet time after the closing edge before it is trusted.
    pub debounce: Tick,
    /// Press durations above this are long presses.
    pub long_press: Tick,
    /// Short-press acceptance window ([`SHORT_PRESS_WINDOW_US`]).
    pub acceptance_window: Tick,
    /// Half-open intervals older than this are discarded, if set.
    pub stale_press: Option<Tick>,
}

impl TickTiming {
    pub fn from_config(config: &ButtonConfig) -> Result<Self, ConfigError> {
        let rate = config.ticks_per_us;
        if rate == 0 {
            return Err(ConfigError::ZeroTickRate);
        }
        let convert = |us: u32, name: &'static str| {
            us_to_ticks(us, rate).ok_or(ConfigError::ThresholdOverflow(name))
        };

        let stale_press = match config.stale_press_us {
            Some(us) => Some(convert(us, "stale_press_us")?),
            None => None,
        };

        let timing = Self {
            debounce: convert(config.debounce_us, "debounce_us")?,
            long_press: convert(config.long_press_us, "long_press_us")?,
            acceptance_window: convert(SHORT_PRESS_WINDOW_US, "short press window")?,
            stale_press,
        };
        // A press confirmed only after the window closes can never count.
        if timing.debounce >= timing.acceptance_window {
            return Err(ConfigError::DebounceExceedsWindow);
        }
        Ok(timing)
    }
}
