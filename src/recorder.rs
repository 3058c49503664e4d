//! Edge recorder: turns edges and level samples into pressed intervals.
//!
//! Each slot holds one [`PressedInterval`]: the tick the press opened and
//! the tick it closed. The recorder is the only writer of these stamps;
//! the classifier reads them and clears the slot once a press is resolved.
//!
//! Interrupt handlers and the main loop may touch the same slot, so every
//! access runs inside a `critical_section`. A reader never sees a start
//! stamp from one press paired with an end stamp from another.

use core::cell::Cell;

use critical_section::Mutex;

use crate::config::{InterruptMode, MAX_BUTTONS};
use crate::tick::Tick;

/// Polarity of an interrupt edge as reported by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeKind {
    Rising,
    Falling,
    /// Any-edge interrupt that does not report which edge fired.
    Any,
}

/// One press-to-release cycle awaiting classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PressedInterval {
    pub start: Option<Tick>,
    pub end: Option<Tick>,
}

impl PressedInterval {
    pub const UNSET: Self = Self {
        start: None,
        end: None,
    };

    /// Both stamps recorded.
    pub const fn is_complete(&self) -> bool {
        self.start.is_some() && self.end.is_some()
    }

    pub const fn is_unset(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    /// Apply an interrupt edge at `now`.
    pub fn record_edge(&mut self, mode: InterruptMode, now: Tick) {
        match mode {
            InterruptMode::RisingEdge => {
                if self.end.is_none() {
                    self.end = Some(now);
                }
            }
            InterruptMode::FallingEdge => {
                if self.start.is_none() {
                    self.start = Some(now);
                }
            }
            InterruptMode::BothEdges => {
                if self.start.is_none() {
                    self.start = Some(now);
                } else {
                    self.end = Some(now);
                }
            }
            InterruptMode::None => {}
        }
    }

    /// Apply a polled level sample at `now` (polarity already applied).
    pub fn record_level(&mut self, mode: InterruptMode, pressed: bool, now: Tick) {
        if !pressed {
            return;
        }
        match mode {
            InterruptMode::None => {
                if self.start.is_none() {
                    self.start = Some(now);
                } else {
                    self.end = Some(now);
                }
            }
            InterruptMode::RisingEdge => {
                // A release stamp already present belongs to no press.
                if self.is_unset() {
                    self.start = Some(now);
                }
            }
            InterruptMode::FallingEdge => {
                if self.start.is_some() {
                    self.end = Some(now);
                }
            }
            InterruptMode::BothEdges => {}
        }
    }
}

/// Fixed array of per-button intervals, shareable with interrupt context.
pub struct EdgeRecorder {
    slots: [Mutex<Cell<PressedInterval>>; MAX_BUTTONS],
}

impl Default for EdgeRecorder {
    fn default() -> Self {
        Self::new()
    }
}

impl EdgeRecorder {
    pub const fn new() -> Self {
        Self {
            slots: [const { Mutex::new(Cell::new(PressedInterval::UNSET)) }; MAX_BUTTONS],
        }
    }

    /// Record an interrupt edge for slot `index`. Out-of-range slots are ignored.
    pub fn record_edge(&self, index: usize, mode: InterruptMode, now: Tick) {
        self.update(index, |iv| iv.record_edge(mode, now));
    }

    /// Record a polled level sample for slot `index`.
    pub fn record_level(&self, index: usize, mode: InterruptMode, pressed: bool, now: Tick) {
        self.update(index, |iv| iv.record_level(mode, pressed, now));
    }

    /// Consistent copy of slot `index`.
    pub fn snapshot(&self, index: usize) -> PressedInterval {
        self.slots.get(index).map_or(PressedInterval::UNSET, |slot| {
            critical_section::with(|cs| slot.borrow(cs).get())
        })
    }

    /// Read, decide and optionally clear slot `index` in one critical section.
    ///
    /// `decide` returns its verdict and whether the slot should be cleared.
    /// It runs with interrupts masked, so it must only do arithmetic.
    pub fn resolve<T>(&self, index: usize, decide: impl FnOnce(PressedInterval) -> (T, bool)) -> T {
        let Some(slot) = self.slots.get(index) else {
            return decide(PressedInterval::UNSET).0;
        };
        critical_section::with(|cs| {
            let cell = slot.borrow(cs);
            let (verdict, clear) = decide(cell.get());
            if clear {
                cell.set(PressedInterval::UNSET);
            }
            verdict
        })
    }

    /// Clear every slot.
    pub fn reset(&self) {
        critical_section::with(|cs| {
            for slot in &self.slots {
                slot.borrow(cs).set(PressedInterval::UNSET);
            }
        });
    }

    fn update(&self, index: usize, f: impl FnOnce(&mut PressedInterval)) {
        if let Some(slot) = self.slots.get(index) {
            critical_section::with(|cs| {
                let cell = slot.borrow(cs);
                let mut iv = cell.get();
                f(&mut iv);
                cell.set(iv);
            });
        }
    }
}
