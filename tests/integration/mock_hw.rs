//! Mock hardware for integration tests.
//!
//! A settable clock, a pin-level table and a sink that records every event,
//! bundled with a driver in [`Rig`] so tests read as a timeline of edges,
//! level changes and processing passes.

use buttonpress::{
    ButtonApi, ButtonConfig, ButtonDriver, ButtonId, Clock, EdgeKind, Error, EventSink,
    InterruptMode, PinConfig, PinId, PinReadError, PinReader, PressEvent, PressKind, Tick,
};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

// ── MockClock ─────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MockClock(Rc<Cell<Tick>>);

#[allow(dead_code)]
impl MockClock {
    pub fn set(&self, tick: Tick) {
        self.0.set(tick);
    }

    pub fn get(&self) -> Tick {
        self.0.get()
    }
}

impl Clock for MockClock {
    fn now(&self) -> Tick {
        self.0.get()
    }
}

// ── MockPins ──────────────────────────────────────────────────

/// Raw pin levels keyed by pin id. Pins never set are unknown to the reader.
#[derive(Clone, Default)]
pub struct MockPins {
    levels: Rc<RefCell<HashMap<PinId, bool>>>,
    failing: Rc<RefCell<Vec<PinId>>>,
    pub reads: Rc<Cell<u32>>,
}

#[allow(dead_code)]
impl MockPins {
    pub fn set_level(&self, pin: PinId, high: bool) {
        self.levels.borrow_mut().insert(pin, high);
    }

    /// Make `pin` unknown to the reader.
    pub fn forget(&self, pin: PinId) {
        self.levels.borrow_mut().remove(&pin);
    }

    pub fn fail(&self, pin: PinId) {
        self.failing.borrow_mut().push(pin);
    }
}

impl PinReader for MockPins {
    fn read_level(&mut self, pin: &PinConfig) -> Result<bool, PinReadError> {
        self.reads.set(self.reads.get() + 1);
        if self.failing.borrow().contains(&pin.pin) {
            return Err(PinReadError::ReadFailed(pin.pin));
        }
        self.levels
            .borrow()
            .get(&pin.pin)
            .copied()
            .ok_or(PinReadError::UnknownPin(pin.pin))
    }
}

// ── RecordingSink ─────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct RecordingSink(pub Rc<RefCell<Vec<PressEvent>>>);

impl EventSink for RecordingSink {
    fn emit(&mut self, event: PressEvent) {
        self.0.borrow_mut().push(event);
    }
}

// ── Rig ───────────────────────────────────────────────────────

pub type TestDriver = ButtonDriver<MockClock, MockPins, RecordingSink>;

pub struct Rig {
    pub driver: TestDriver,
    pub clock: MockClock,
    pub pins: MockPins,
    pub sink: RecordingSink,
    active_high: bool,
}

#[allow(dead_code)]
impl Rig {
    /// Driver initialized with clock, pin reader and sink. Every configured
    /// pin starts released.
    pub fn try_new(config: ButtonConfig) -> Result<Self, Error> {
        let clock = MockClock::default();
        let pins = MockPins::default();
        let sink = RecordingSink::default();
        let active_high = config.active_high;
        for p in config.buttons() {
            pins.set_level(p.pin, !active_high);
        }

        let mut driver = TestDriver::new();
        driver.initialize(
            ButtonApi::new(config)
                .with_clock(clock.clone())
                .with_reader(pins.clone())
                .with_sink(sink.clone()),
        )?;
        Ok(Self {
            driver,
            clock,
            pins,
            sink,
            active_high,
        })
    }

    pub fn new(config: ButtonConfig) -> Self {
        Self::try_new(config).expect("rig config must be valid")
    }

    /// Single button with default timing.
    pub fn single(pin: PinId, mode: InterruptMode) -> Self {
        Self::new(ButtonConfig::default().with_button(pin, mode).unwrap())
    }

    pub fn press(&self, pin: PinId) {
        self.pins.set_level(pin, self.active_high);
    }

    pub fn release(&self, pin: PinId) {
        self.pins.set_level(pin, !self.active_high);
    }

    pub fn edge(&self, pin: PinId, edge: EdgeKind, tick: Tick) -> bool {
        self.driver.on_edge_at(pin, edge, tick)
    }

    /// One processing pass at `tick`.
    pub fn tick_at(&mut self, tick: Tick) {
        self.clock.set(tick);
        self.driver.process_tick();
    }

    /// Processing passes every `step` ticks from `from`, ending with one at `to`.
    pub fn run(&mut self, from: Tick, to: Tick, step: Tick) {
        let mut t = from;
        while t < to {
            self.tick_at(t);
            t += step;
        }
        self.tick_at(to);
    }

    pub fn mode_of(&self, pin: PinId) -> InterruptMode {
        self.driver
            .config()
            .and_then(|c| c.buttons().iter().find(|p| p.pin == pin))
            .map_or(InterruptMode::None, |p| p.interrupt_mode)
    }

    /// One press of `pin` held from `start` for `duration` ticks, delivered
    /// through whichever path the pin's mode uses, with processing passes
    /// every `step` ticks while held. Returns the release tick.
    pub fn hold(&mut self, pin: PinId, start: Tick, duration: Tick, step: Tick) -> Tick {
        let mode = self.mode_of(pin);
        let end = start + duration;
        if matches!(mode, InterruptMode::FallingEdge | InterruptMode::BothEdges) {
            self.edge(pin, EdgeKind::Falling, start);
        }
        self.press(pin);
        self.run(start, end, step);
        self.release(pin);
        if matches!(mode, InterruptMode::RisingEdge | InterruptMode::BothEdges) {
            self.edge(pin, EdgeKind::Rising, end);
        }
        end
    }

    pub fn events(&self) -> Vec<PressEvent> {
        self.sink.0.borrow().clone()
    }

    pub fn kinds(&self) -> Vec<PressKind> {
        self.sink.0.borrow().iter().map(|e| e.kind).collect()
    }

    pub fn count(&self, index: usize) -> u8 {
        self.driver
            .short_press_counter(index)
            .map_or(0, |c| c.count)
    }
}

#[allow(dead_code)]
pub fn event(kind: PressKind, button: u8) -> PressEvent {
    PressEvent::new(kind, ButtonId(button))
}
