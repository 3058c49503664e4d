//! Initialization: capability checks, configuration validation and
//! re-initialization.

use crate::mock_hw::{MockClock, MockPins, RecordingSink, Rig, TestDriver};
use buttonpress::{
    ButtonApi, ButtonConfig, ConfigError, EdgeKind, Error, InterruptMode, PressKind,
};

type Api = ButtonApi<MockClock, MockPins, RecordingSink>;

fn one_button(mode: InterruptMode) -> ButtonConfig {
    ButtonConfig::default().with_button(33, mode).unwrap()
}

fn init(api: impl Into<Option<Api>>) -> (TestDriver, Result<(), Error>) {
    let mut driver = TestDriver::new();
    let result = driver.initialize(api);
    (driver, result)
}

// ── Missing pieces ────────────────────────────────────────────

#[test]
fn absent_api_is_rejected() {
    let (driver, result) = init(None);
    assert_eq!(result, Err(Error::Config(ConfigError::MissingConfig)));
    assert!(!driver.is_ready());
}

#[test]
fn zero_buttons_rejected_before_capabilities() {
    let (driver, result) = init(Api::new(ButtonConfig::default()));
    assert_eq!(result, Err(Error::Config(ConfigError::NoButtons)));
    assert!(!driver.is_ready());
}

#[test]
fn missing_clock_rejected() {
    let api = Api::new(one_button(InterruptMode::BothEdges)).with_sink(RecordingSink::default());
    let (_, result) = init(api);
    assert_eq!(result, Err(Error::Config(ConfigError::MissingClock)));
}

#[test]
fn missing_sink_rejected() {
    let api = Api::new(one_button(InterruptMode::BothEdges)).with_clock(MockClock::default());
    let (_, result) = init(api);
    assert_eq!(result, Err(Error::Config(ConfigError::MissingEventSink)));
}

#[test]
fn polled_button_needs_a_reader() {
    for mode in [
        InterruptMode::None,
        InterruptMode::RisingEdge,
        InterruptMode::FallingEdge,
    ] {
        let api = Api::new(one_button(mode))
            .with_clock(MockClock::default())
            .with_sink(RecordingSink::default());
        let (driver, result) = init(api);
        assert_eq!(
            result,
            Err(Error::Config(ConfigError::MissingPinReader)),
            "{mode:?}"
        );
        assert!(!driver.is_ready());
    }
}

#[test]
fn interrupt_only_button_runs_without_reader() {
    let api = Api::new(one_button(InterruptMode::BothEdges))
        .with_clock(MockClock::default())
        .with_sink(RecordingSink::default());
    let (driver, result) = init(api);
    assert_eq!(result, Ok(()));
    assert!(driver.is_ready());
    assert_eq!(driver.button_count(), 1);
}

// ── Validation ────────────────────────────────────────────────

#[test]
fn duplicate_pin_rejected() {
    let config = one_button(InterruptMode::BothEdges)
        .with_button(33, InterruptMode::None)
        .unwrap();
    assert_eq!(
        Rig::try_new(config).err(),
        Some(Error::Config(ConfigError::DuplicatePin(33)))
    );
}

#[test]
fn zero_tick_rate_rejected() {
    let config = ButtonConfig {
        ticks_per_us: 0,
        ..one_button(InterruptMode::None)
    };
    assert_eq!(
        Rig::try_new(config).err(),
        Some(Error::Config(ConfigError::ZeroTickRate))
    );
}

#[test]
fn threshold_that_overflows_ticks_rejected() {
    let config = ButtonConfig {
        ticks_per_us: 10_000,
        ..one_button(InterruptMode::None)
    };
    assert_eq!(
        Rig::try_new(config).err(),
        Some(Error::Config(ConfigError::ThresholdOverflow("long_press_us")))
    );
}

#[test]
fn debounce_longer_than_the_window_rejected() {
    let config = ButtonConfig {
        debounce_us: 600_000,
        ..one_button(InterruptMode::BothEdges)
    };
    assert_eq!(
        Rig::try_new(config).err(),
        Some(Error::Config(ConfigError::DebounceExceedsWindow))
    );
}

#[test]
fn json_config_initializes_a_driver() {
    let config = ButtonConfig::from_json(
        r#"{ "pins": [{ "pin": 33, "interrupt_mode": "both_edges" }], "active_high": true }"#,
    )
    .unwrap();
    let rig = Rig::new(config);
    assert!(rig.driver.is_ready());
    assert!(rig.driver.config().unwrap().active_high);
}

// ── Re-initialization ─────────────────────────────────────────

#[test]
fn reinit_clears_pending_state() {
    let mut rig = Rig::single(33, InterruptMode::BothEdges);
    rig.edge(33, EdgeKind::Any, 0);
    rig.edge(33, EdgeKind::Any, 15_000);
    rig.tick_at(25_001);
    assert_eq!(rig.count(0), 1);
    rig.edge(33, EdgeKind::Any, 100_000);
    assert!(!rig.driver.interval(0).is_unset());

    rig.driver
        .initialize(
            Api::new(one_button(InterruptMode::BothEdges))
                .with_clock(rig.clock.clone())
                .with_sink(rig.sink.clone()),
        )
        .unwrap();

    assert!(rig.driver.interval(0).is_unset());
    assert_eq!(rig.count(0), 0);
    rig.tick_at(2_000_000);
    assert!(rig.events().is_empty());
}

#[test]
fn reinit_replaces_configuration() {
    let mut rig = Rig::single(33, InterruptMode::BothEdges);
    let two = one_button(InterruptMode::BothEdges)
        .with_button(12, InterruptMode::BothEdges)
        .unwrap();
    rig.driver
        .initialize(
            Api::new(two)
                .with_clock(rig.clock.clone())
                .with_sink(rig.sink.clone()),
        )
        .unwrap();
    assert_eq!(rig.driver.button_count(), 2);

    rig.edge(12, EdgeKind::Any, 0);
    rig.edge(12, EdgeKind::Any, 1_200_000);
    rig.tick_at(1_210_001);
    assert_eq!(rig.kinds(), vec![PressKind::Long]);
    assert_eq!(rig.events()[0].button.index(), 1);
}

#[test]
fn failed_reinit_leaves_driver_not_ready() {
    let mut rig = Rig::single(33, InterruptMode::BothEdges);
    let result = rig.driver.initialize(Api::new(ButtonConfig::default()));
    assert_eq!(result, Err(Error::Config(ConfigError::NoButtons)));
    assert!(!rig.driver.is_ready());
    assert_eq!(rig.driver.button_count(), 0);

    assert!(!rig.edge(33, EdgeKind::Any, 0));
    rig.tick_at(1_000_000);
    assert!(rig.events().is_empty());
}
