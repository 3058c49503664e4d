//! Interrupt-safe edge queue.
//!
//! For platforms where the driver must not be touched from interrupt
//! context, the ISR only captures `(pin, edge, tick)` and pushes it here.
//! The main loop replays the samples into the driver before each
//! `process_tick`.
//!
//! ```text
//! ┌─────────────┐     ┌──────────────┐     ┌──────────────────────┐
//! │ GPIO ISR    │────▶│  EdgeQueue   │────▶│ drain_into(driver)   │
//! │ (producer)  │     │  (lock-free) │     │ driver.process_tick()│
//! └─────────────┘     └──────────────┘     └──────────────────────┘
//! ```
//!
//! The captured tick is the edge time, so queueing latency does not skew
//! press durations.

use core::sync::atomic::{AtomicU32, Ordering};

use heapless::mpmc::MpMcQueue;

use crate::config::PinId;
use crate::driver::ButtonDriver;
use crate::ports::{Clock, EventSink, PinReader};
use crate::recorder::EdgeKind;
use crate::tick::Tick;

/// Maximum number of pending edges. Power of 2.
pub const EDGE_QUEUE_CAP: usize = 16;

/// One interrupt edge captured in ISR context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeSample {
    pub pin: PinId,
    pub edge: EdgeKind,
    pub tick: Tick,
}

pub struct EdgeQueue {
    inner: MpMcQueue<EdgeSample, EDGE_QUEUE_CAP>,
    dropped: AtomicU32,
}

impl Default for EdgeQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl EdgeQueue {
    pub const fn new() -> Self {
        Self {
            inner: MpMcQueue::new(),
            dropped: AtomicU32::new(0),
        }
    }

    /// Push a sample. Safe to call from ISR context (lock-free).
    /// Returns `false` if the queue is full (sample dropped).
    pub fn push(&self, sample: EdgeSample) -> bool {
        if self.inner.enqueue(sample).is_ok() {
            return true;
        }
        self.dropped.fetch_add(1, Ordering::Relaxed);
        false
    }

    pub fn pop(&self) -> Option<EdgeSample> {
        self.inner.dequeue()
    }

    /// Replay every pending sample into `driver` in FIFO order.
    /// Returns how many samples the driver accepted.
    pub fn drain_into<C, R, S>(&self, driver: &ButtonDriver<C, R, S>) -> usize
    where
        C: Clock,
        R: PinReader,
        S: EventSink,
    {
        let mut accepted = 0;
        while let Some(s) = self.pop() {
            if driver.on_edge_at(s.pin, s.edge, s.tick) {
                accepted += 1;
            }
        }
        accepted
    }

    /// Number of samples dropped on a full queue since the last call.
    pub fn take_dropped(&self) -> u32 {
        self.dropped.swap(0, Ordering::Relaxed)
    }
}
