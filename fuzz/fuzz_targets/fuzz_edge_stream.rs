//! Fuzz target: arbitrary edge / level / pass streams through `ButtonDriver`
//!
//! The first byte picks the interrupt mode of each of three buttons and the
//! polarity. The rest is read as 4-byte ops `[kind, pin, delta_lo, delta_hi]`
//! that advance the clock by `delta` ticks and then deliver an edge, flip a
//! raw level or run a processing pass.
//!
//! Invariants checked:
//! - No panics under any op sequence (including tick wraparound)
//! - A pass emits at most two events per button, each for a configured button
//! - Short-press counters never outlive a closed window by more than a pass
//!
//! cargo fuzz run fuzz_edge_stream

#![no_main]

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use buttonpress::{
    ButtonApi, ButtonConfig, ButtonDriver, EdgeKind, InterruptMode, PinConfig, PinReadError,
    PressEvent, Tick,
};
use libfuzzer_sys::fuzz_target;

const BUTTONS: u8 = 3;
// Tight thresholds so short fuzz inputs reach every classification branch.
const TICKS_PER_US: u32 = 1;
const DEBOUNCE_US: u32 = 1_000;
const LONG_PRESS_US: u32 = 50_000;

fn mode(bits: u8) -> InterruptMode {
    match bits & 0b11 {
        0 => InterruptMode::None,
        1 => InterruptMode::RisingEdge,
        2 => InterruptMode::FallingEdge,
        _ => InterruptMode::BothEdges,
    }
}

fuzz_target!(|data: &[u8]| {
    let Some((&header, ops)) = data.split_first() else {
        return;
    };

    let mut config = ButtonConfig {
        active_high: header & 0x80 != 0,
        ticks_per_us: TICKS_PER_US,
        debounce_us: DEBOUNCE_US,
        long_press_us: LONG_PRESS_US,
        stale_press_us: (header & 0x40 != 0).then_some(200_000),
        ..ButtonConfig::default()
    };
    for pin in 0..BUTTONS {
        config = config
            .with_button(pin, mode(header >> (2 * pin)))
            .expect("three buttons fit");
    }

    let now = Rc::new(Cell::new(Tick::MAX - 100_000));
    let levels = Rc::new(Cell::new(0u8));
    let events: Rc<RefCell<Vec<PressEvent>>> = Rc::default();

    let mut driver = ButtonDriver::new();
    driver
        .initialize(
            ButtonApi::new(config)
                .with_clock({
                    let now = now.clone();
                    move || now.get()
                })
                .with_reader({
                    let levels = levels.clone();
                    move |pin: &PinConfig| -> Result<bool, PinReadError> {
                        Ok(levels.get() & (1 << pin.pin) != 0)
                    }
                })
                .with_sink({
                    let events = events.clone();
                    move |e: PressEvent| events.borrow_mut().push(e)
                }),
        )
        .expect("fuzz config is valid");

    for op in ops.chunks_exact(4) {
        let pin = op[1] % (BUTTONS + 1); // BUTTONS itself is an unknown pin
        let delta = u16::from_le_bytes([op[2], op[3]]);
        now.set(now.get().wrapping_add(Tick::from(delta)));

        match op[0] % 5 {
            0 => {
                driver.on_edge(pin, EdgeKind::Rising);
            }
            1 => {
                driver.on_edge(pin, EdgeKind::Falling);
            }
            2 => {
                driver.on_edge(pin, EdgeKind::Any);
            }
            3 => levels.set(levels.get() ^ (1 << pin)),
            _ => {
                let before = events.borrow().len();
                driver.process_tick();
                let emitted = &events.borrow()[before..];
                assert!(emitted.len() <= 2 * usize::from(BUTTONS));
                assert!(emitted.iter().all(|e| e.button.index() < usize::from(BUTTONS)));
            }
        }
    }

    // Drain: a long quiet stretch must close every open window.
    for _ in 0..4 {
        now.set(now.get().wrapping_add(300_000));
        driver.process_tick();
    }
    for index in 0..usize::from(BUTTONS) {
        assert_eq!(driver.short_press_counter(index).map(|c| c.count), Some(0));
    }
});
