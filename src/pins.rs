//! GPIO pin assignments for the demo board.
//!
//! Single source of truth for the demo binary; change a pin here and the
//! driver configuration and interrupt registration follow.

use buttonpress::PinId;

/// Button 1: any-edge interrupt, active-low with internal pull-up.
pub const BUTTON1_GPIO: PinId = 33;
/// Button 2: polled, active-low with internal pull-up.
pub const BUTTON2_GPIO: PinId = 32;
