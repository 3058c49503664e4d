//! Press classifier: debounce, long/short split, and the double-press window.
//!
//! Classification runs in two phases per button per pass:
//!
//! 1. [`PressClassifier::classify`] looks at a completed pressed interval
//!    once its closing edge has settled. A long hold is reported at once;
//!    a short press only bumps a rolling counter.
//! 2. [`PressClassifier::decide`] closes the counting window once no
//!    further short press has arrived for [`SHORT_PRESS_WINDOW_US`], and
//!    turns the counter into a normal or double press.
//!
//! A double press can only be confirmed after the quiet window following
//! the *second* press, which is why the two phases are separate.
//!
//! [`SHORT_PRESS_WINDOW_US`]: crate::tick::SHORT_PRESS_WINDOW_US

use log::debug;

use crate::config::MAX_BUTTONS;
use crate::ports::{Clock, PressKind};
use crate::recorder::{EdgeRecorder, PressedInterval};
use crate::tick::{Tick, TickTiming};

/// Rolling short-press state for one button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ShortPressCounter {
    pub count: u8,
    /// Tick at which the most recent short press was confirmed.
    pub last_short_press: Option<Tick>,
}

/// What one `classify` call did to a button's state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassifiedDelta {
    /// Nothing to classify yet.
    Idle,
    /// Closing edge not settled; re-evaluated next pass.
    Debouncing,
    /// Hold exceeded the long-press threshold; interval cleared.
    LongPress,
    /// Short press counted; interval cleared. Carries the running count.
    ShortPress { count: u8 },
    /// Short press settled only after the acceptance window; dropped.
    Abandoned,
    /// A release stamp with no matching press stamp; dropped.
    Orphaned,
    /// Press never closed within the stale limit; dropped.
    Expired,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Verdict {
    Idle,
    Debouncing,
    Long,
    Short,
    Abandoned,
    Orphaned,
    Expired,
}

impl Verdict {
    const fn clears(self) -> bool {
        !matches!(self, Self::Idle | Self::Debouncing)
    }
}

fn evaluate(iv: PressedInterval, now: Tick, clock: &impl Clock, timing: &TickTiming) -> Verdict {
    match (iv.start, iv.end) {
        (Some(start), Some(end)) => {
            let since_release = clock.elapsed(end, now);
            if since_release <= timing.debounce {
                Verdict::Debouncing
            } else if clock.elapsed(start, end) > timing.long_press {
                Verdict::Long
            } else if since_release < timing.acceptance_window {
                Verdict::Short
            } else {
                Verdict::Abandoned
            }
        }
        (Some(start), None) => match timing.stale_press {
            Some(limit) if clock.elapsed(start, now) > limit => Verdict::Expired,
            _ => Verdict::Idle,
        },
        (None, Some(_)) => Verdict::Orphaned,
        (None, None) => Verdict::Idle,
    }
}

/// Per-button short-press counters.
pub struct PressClassifier {
    counters: [ShortPressCounter; MAX_BUTTONS],
}

impl Default for PressClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl PressClassifier {
    pub const fn new() -> Self {
        Self {
            counters: [ShortPressCounter {
                count: 0,
                last_short_press: None,
            }; MAX_BUTTONS],
        }
    }

    /// Classify the pressed interval of button `index`, if it is ready.
    pub fn classify(
        &mut self,
        index: usize,
        recorder: &EdgeRecorder,
        clock: &impl Clock,
        timing: &TickTiming,
    ) -> ClassifiedDelta {
        let Some(counter) = self.counters.get_mut(index) else {
            return ClassifiedDelta::Idle;
        };

        let (verdict, now) = recorder.resolve(index, |iv| {
            let now = clock.now();
            let verdict = evaluate(iv, now, clock, timing);
            ((verdict, now), verdict.clears())
        });

        match verdict {
            Verdict::Idle => ClassifiedDelta::Idle,
            Verdict::Debouncing => ClassifiedDelta::Debouncing,
            Verdict::Long => ClassifiedDelta::LongPress,
            Verdict::Short => {
                counter.count = counter.count.saturating_add(1);
                counter.last_short_press = Some(now);
                ClassifiedDelta::ShortPress {
                    count: counter.count,
                }
            }
            Verdict::Abandoned => {
                debug!("classifier: slot {} press settled too late, dropped", index);
                ClassifiedDelta::Abandoned
            }
            Verdict::Orphaned => {
                debug!("classifier: slot {} release without press, dropped", index);
                ClassifiedDelta::Orphaned
            }
            Verdict::Expired => {
                debug!("classifier: slot {} press never released, dropped", index);
                ClassifiedDelta::Expired
            }
        }
    }

    /// Resolve the short-press counter of button `index` once its window closed.
    pub fn decide(&mut self, index: usize, clock: &impl Clock, timing: &TickTiming) -> Option<PressKind> {
        let counter = self.counters.get_mut(index)?;
        let last = counter.last_short_press?;
        if counter.count == 0 || clock.elapsed(last, clock.now()) <= timing.acceptance_window {
            return None;
        }

        let count = counter.count;
        *counter = ShortPressCounter::default();
        match count {
            1 => Some(PressKind::Normal),
            2 => Some(PressKind::Double),
            n => {
                debug!("classifier: slot {} closed with {} presses, no event", index, n);
                None
            }
        }
    }

    /// Counter state of button `index`.
    pub fn counter(&self, index: usize) -> Option<ShortPressCounter> {
        self.counters.get(index).copied()
    }

    pub fn reset(&mut self) {
        self.counters = [ShortPressCounter::default(); MAX_BUTTONS];
    }
}
