//! Button driver facade.
//!
//! [`ButtonDriver`] owns the validated configuration, the injected
//! capabilities, the [`EdgeRecorder`] and the [`PressClassifier`], and
//! exposes the three outward entry points:
//!
//! | Entry point       | Context        | Effect                                  |
//! |-------------------|----------------|-----------------------------------------|
//! | `initialize`      | setup          | validate + store config, mark ready     |
//! | `on_edge[_at]`    | interrupt      | stamp the pressed interval of one pin   |
//! | `process_tick`    | main loop      | poll → classify → decide, emit events   |
//!
//! Until `initialize` succeeds every other entry point is a silent no-op.

use log::{debug, info, warn};

use crate::classifier::{ClassifiedDelta, PressClassifier, ShortPressCounter};
use crate::config::{ButtonConfig, PinId};
use crate::error::{ConfigError, Result};
use crate::ports::{ButtonId, Clock, EventSink, PinReader, PressEvent, PressKind};
use crate::recorder::{EdgeKind, EdgeRecorder, PressedInterval};
use crate::tick::{Tick, TickTiming};

// ───────────────────────────────────────────────────────────────
// Initialization bundle
// ───────────────────────────────────────────────────────────────

/// Everything `initialize` needs. Capabilities left as `None` are reported
/// as configuration errors.
pub struct ButtonApi<C, R, S> {
    pub config: ButtonConfig,
    pub clock: Option<C>,
    /// Only required when a button relies on polling.
    pub reader: Option<R>,
    pub sink: Option<S>,
}

impl<C, R, S> ButtonApi<C, R, S> {
    pub fn new(config: ButtonConfig) -> Self {
        Self {
            config,
            clock: None,
            reader: None,
            sink: None,
        }
    }

    pub fn with_clock(mut self, clock: C) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn with_reader(mut self, reader: R) -> Self {
        self.reader = Some(reader);
        self
    }

    pub fn with_sink(mut self, sink: S) -> Self {
        self.sink = Some(sink);
        self
    }
}

struct Ready<C, R, S> {
    config: ButtonConfig,
    timing: TickTiming,
    clock: C,
    reader: Option<R>,
    sink: S,
}

impl<C, R, S> Ready<C, R, S> {
    fn from_api(api: Option<ButtonApi<C, R, S>>) -> core::result::Result<Self, ConfigError> {
        let api = api.ok_or(ConfigError::MissingConfig)?;
        if api.config.pins.is_empty() {
            return Err(ConfigError::NoButtons);
        }
        let clock = api.clock.ok_or(ConfigError::MissingClock)?;
        let sink = api.sink.ok_or(ConfigError::MissingEventSink)?;

        api.config.validate()?;
        if api.reader.is_none() && api.config.needs_pin_reader() {
            return Err(ConfigError::MissingPinReader);
        }
        let timing = TickTiming::from_config(&api.config)?;

        Ok(Self {
            config: api.config,
            timing,
            clock,
            reader: api.reader,
            sink,
        })
    }
}

// ───────────────────────────────────────────────────────────────
// ButtonDriver
// ───────────────────────────────────────────────────────────────

pub struct ButtonDriver<C, R, S> {
    ready: Option<Ready<C, R, S>>,
    recorder: EdgeRecorder,
    classifier: PressClassifier,
}

impl<C, R, S> Default for ButtonDriver<C, R, S>
where
    C: Clock,
    R: PinReader,
    S: EventSink,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<C, R, S> ButtonDriver<C, R, S>
where
    C: Clock,
    R: PinReader,
    S: EventSink,
{
    /// An uninitialized driver; every entry point is a no-op until
    /// [`initialize`](Self::initialize) succeeds.
    pub const fn new() -> Self {
        Self {
            ready: None,
            recorder: EdgeRecorder::new(),
            classifier: PressClassifier::new(),
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Validate and install a configuration, replacing any previous one.
    ///
    /// All pressed intervals and counters are cleared. On failure the driver
    /// is left uninitialized.
    pub fn initialize(&mut self, api: impl Into<Option<ButtonApi<C, R, S>>>) -> Result<()> {
        self.ready = None;
        let ready = Ready::from_api(api.into()).inspect_err(|e| {
            warn!("ButtonDriver: init rejected: {}", e);
        })?;

        self.recorder.reset();
        self.classifier.reset();
        info!(
            "ButtonDriver: {} button(s), debounce={}us long={}us, {} tick(s)/us, active_{}",
            ready.config.pins.len(),
            ready.config.debounce_us,
            ready.config.long_press_us,
            ready.config.ticks_per_us,
            if ready.config.active_high { "high" } else { "low" },
        );
        self.ready = Some(ready);
        Ok(())
    }

    pub fn is_ready(&self) -> bool {
        self.ready.is_some()
    }

    /// Number of configured buttons (0 before initialization).
    pub fn button_count(&self) -> usize {
        self.ready.as_ref().map_or(0, |r| r.config.pins.len())
    }

    pub fn config(&self) -> Option<&ButtonConfig> {
        self.ready.as_ref().map(|r| &r.config)
    }

    // ── Edge path (interrupt context) ─────────────────────────

    /// Record an interrupt edge on `pin`, stamped with the current tick.
    ///
    /// Returns `false` without side effects if the driver is not ready, the
    /// pin is unknown, or the edge does not apply to the pin's mode.
    pub fn on_edge(&self, pin: PinId, edge: EdgeKind) -> bool {
        match &self.ready {
            Some(ready) => self.record_edge(ready, pin, edge, ready.clock.now()),
            None => false,
        }
    }

    /// Record an interrupt edge on `pin` with a tick captured by the platform.
    pub fn on_edge_at(&self, pin: PinId, edge: EdgeKind, tick: Tick) -> bool {
        match &self.ready {
            Some(ready) => self.record_edge(ready, pin, edge, tick),
            None => false,
        }
    }

    fn record_edge(&self, ready: &Ready<C, R, S>, pin: PinId, edge: EdgeKind, now: Tick) -> bool {
        let Some(index) = ready.config.find_pin(pin) else {
            return false;
        };
        let mode = ready.config.pins[index].interrupt_mode;
        if !mode.accepts(edge) {
            return false;
        }
        self.recorder.record_edge(index, mode, now);
        true
    }

    // ── Processing pass (main loop) ───────────────────────────

    /// Run one pass over every configured button: poll its level if the
    /// mode needs it, classify a settled interval, then close the
    /// short-press window if it elapsed. Emits at most two events per button.
    pub fn process_tick(&mut self) {
        let Some(ready) = self.ready.as_mut() else {
            return;
        };

        for (index, pin) in ready.config.pins.iter().enumerate() {
            let mode = pin.interrupt_mode;
            if mode.needs_polling() {
                if let Some(reader) = ready.reader.as_mut() {
                    let pressed = match reader.read_level(pin) {
                        Ok(level) => level == ready.config.active_high,
                        Err(e) => {
                            debug!("ButtonDriver: {} treated as released", e);
                            false
                        }
                    };
                    self.recorder
                        .record_level(index, mode, pressed, ready.clock.now());
                }
            }

            let button = ButtonId(index as u8);
            let delta = self
                .classifier
                .classify(index, &self.recorder, &ready.clock, &ready.timing);
            if delta == ClassifiedDelta::LongPress {
                emit(&mut ready.sink, PressKind::Long, button);
            }
            if let Some(kind) = self.classifier.decide(index, &ready.clock, &ready.timing) {
                emit(&mut ready.sink, kind, button);
            }
        }
    }

    // ── Inspection ────────────────────────────────────────────

    /// Current pressed interval of slot `index`.
    pub fn interval(&self, index: usize) -> PressedInterval {
        self.recorder.snapshot(index)
    }

    /// Current short-press counter of slot `index`.
    pub fn short_press_counter(&self, index: usize) -> Option<ShortPressCounter> {
        if index >= self.button_count() {
            return None;
        }
        self.classifier.counter(index)
    }
}

fn emit(sink: &mut impl EventSink, kind: PressKind, button: ButtonId) {
    debug!("ButtonDriver: {} -> {:?}", button, kind);
    sink.emit(PressEvent::new(kind, button));
}
