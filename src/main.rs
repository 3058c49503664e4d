//! Button demo: Main Entry Point
//!
//! Two active-low buttons on an ESP32:
//!
//! | Button | GPIO | Mode                          |
//! |--------|------|-------------------------------|
//! | 0      | 33   | any-edge interrupt (`BothEdges`) |
//! | 1      | 32   | polled (`None`)               |
//!
//! The GPIO ISR only stamps the edge into [`EDGES`]; the main loop replays
//! the queue into the driver, runs a processing pass, and re-arms the
//! interrupt. Classified presses are logged by [`LogEventSink`].
#![deny(unused_must_use)]

mod pins;

use anyhow::Result;
use esp_idf_hal::delay::FreeRtos;
use esp_idf_hal::gpio::{AnyIOPin, IOPin, Input, InterruptType, PinDriver, Pull};
use esp_idf_hal::peripherals::Peripherals;
use log::{info, warn};

use buttonpress::adapters::gpio::HalPinReader;
use buttonpress::adapters::log_sink::LogEventSink;
use buttonpress::adapters::time::{SYSTEM_TICKS_PER_US, SystemTickClock};
use buttonpress::events::{EdgeQueue, EdgeSample};
use buttonpress::{ButtonApi, ButtonConfig, ButtonDriver, Clock, EdgeKind, InterruptMode};

type DemoDriver =
    ButtonDriver<SystemTickClock, HalPinReader<PinDriver<'static, AnyIOPin, Input>>, LogEventSink>;

/// Edges captured by the GPIO ISR, drained by the main loop.
static EDGES: EdgeQueue = EdgeQueue::new();

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;
    info!("buttonpress demo v{}", env!("CARGO_PKG_VERSION"));

    let peripherals = Peripherals::take()?;
    let clock = SystemTickClock::new();

    // ── 2. GPIO ───────────────────────────────────────────────
    let mut edge_pin = PinDriver::input(peripherals.pins.gpio33.downgrade())?;
    edge_pin.set_pull(Pull::Up)?;
    edge_pin.set_interrupt_type(InterruptType::AnyEdge)?;

    let mut polled_pin = PinDriver::input(peripherals.pins.gpio32.downgrade())?;
    polled_pin.set_pull(Pull::Up)?;
    let mut reader = HalPinReader::new();
    if reader.add(pins::BUTTON2_GPIO, polled_pin).is_err() {
        anyhow::bail!("pin reader full");
    }

    // ── 3. Driver ─────────────────────────────────────────────
    let config = ButtonConfig {
        ticks_per_us: SYSTEM_TICKS_PER_US,
        debounce_us: 10_000,      // 10 ms
        long_press_us: 1_000_000, // 1 s
        ..ButtonConfig::default()
    }
    .with_button(pins::BUTTON1_GPIO, InterruptMode::BothEdges)?
    .with_button(pins::BUTTON2_GPIO, InterruptMode::None)?;

    let mut driver = DemoDriver::new();
    driver.initialize(
        ButtonApi::new(config)
            .with_clock(clock)
            .with_reader(reader)
            .with_sink(LogEventSink::new()),
    )?;

    // SAFETY: the callback runs in ISR context; it only reads the timer and
    // pushes into a lock-free queue.
    unsafe {
        edge_pin.subscribe(move || {
            EDGES.push(EdgeSample {
                pin: pins::BUTTON1_GPIO,
                edge: EdgeKind::Any,
                tick: clock.now(),
            });
        })?;
    }
    edge_pin.enable_interrupt()?;

    // ── 4. Main loop ──────────────────────────────────────────
    loop {
        EDGES.drain_into(&driver);
        let dropped = EDGES.take_dropped();
        if dropped > 0 {
            warn!("edge queue overflow, {} edge(s) dropped", dropped);
        }

        driver.process_tick();

        // The HAL disarms the interrupt after each notification.
        edge_pin.enable_interrupt()?;
        FreeRtos::delay_ms(1);
    }
}
