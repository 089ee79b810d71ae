use std::time::Duration;

use combo_input::{
    ActionDispatcher, ButtonProbe, ComboBinding, ComboConfig, ComboDriver, ComboError,
    ComboEvent, ComboSequence, ComboTable, ComboTracker, InputMonitor, Snapshot,
    VirtualButtonProbe,
};

const DT: Duration = Duration::from_millis(10);

#[derive(Default)]
struct Recorder {
    actions: Vec<String>,
    misses: Vec<Vec<u64>>,
}

impl ActionDispatcher<String> for Recorder {
    fn dispatch(&mut self, action: &String) {
        self.actions.push(action.clone());
    }

    fn no_match(&mut self, sequence: &ComboSequence) {
        self.misses.push(sequence.states());
    }
}

fn dpad_config(window: Duration) -> ComboConfig {
    ComboConfig {
        buttons: vec![
            "Up".to_string(),
            "Down".to_string(),
            "Left".to_string(),
            "Right".to_string(),
        ],
        window_ms: window.as_millis() as u64,
        combos: vec![ComboBinding::new("Fireball", &[&["Up"], &["Down"]])],
    }
}

/// Run one tick per frame and collect every finalized-window event.
fn run(
    driver: &mut ComboDriver<String>,
    frames: &[&[&str]],
    recorder: &mut Recorder,
) -> Vec<ComboEvent<String>> {
    let mut probe = VirtualButtonProbe::new();
    let mut events = Vec::new();
    for frame in frames {
        probe.set_pressed(frame.iter().copied());
        if let Some(event) = driver.tick(&probe, DT, recorder).unwrap() {
            events.push(event);
        }
    }
    events
}

#[test]
fn single_press_closes_as_unregistered_miss() {
    // Window of two ticks: windows close on ticks 3 and 6.
    let mut driver = dpad_config(2 * DT).build_driver().unwrap();
    let mut recorder = Recorder::default();

    let frames: &[&[&str]] = &[&["Up"], &[], &[], &[], &[], &[], &[]];
    let events = run(&mut driver, frames, &mut recorder);

    assert_eq!(events.len(), 2);
    assert_eq!(events[0], ComboEvent::Extended { len: 1 });
    match &events[1] {
        ComboEvent::NoMatch { sequence } => assert_eq!(sequence.states(), vec![0b0001]),
        other => panic!("expected a miss, got {other:?}"),
    }
    assert!(recorder.actions.is_empty());
    assert_eq!(recorder.misses, vec![vec![0b0001]]);
}

#[test]
fn up_then_down_resolves_fireball() {
    // Half-tick window: after the first tick every tick closes a window.
    let mut driver = dpad_config(DT / 2).build_driver().unwrap();
    let mut recorder = Recorder::default();

    let frames: &[&[&str]] = &[&["Up"], &[], &["Down"], &[]];
    let events = run(&mut driver, frames, &mut recorder);

    assert_eq!(events.len(), 3);
    assert!(matches!(
        &events[2],
        ComboEvent::Matched { action, .. } if action == "Fireball"
    ));
    assert_eq!(recorder.actions, vec!["Fireball".to_string()]);
    assert!(driver.tracker().sequence().is_empty());
}

#[test]
fn down_then_up_does_not_match() {
    let mut driver = dpad_config(DT / 2).build_driver().unwrap();
    let mut recorder = Recorder::default();

    let frames: &[&[&str]] = &[&["Down"], &[], &["Up"], &[]];
    let events = run(&mut driver, frames, &mut recorder);

    assert!(matches!(events.last(), Some(ComboEvent::NoMatch { .. })));
    assert!(recorder.actions.is_empty());
    assert_eq!(recorder.misses, vec![vec![0b0010, 0b0001]]);
}

#[test]
fn tracker_resolves_fed_snapshots_directly() {
    let monitor = InputMonitor::new(["Up", "Down", "Left", "Right"], DT).unwrap();
    let keys = monitor.key_table();
    let mut table = ComboTable::new();
    table.register([0b0001, 0b0010], "Fireball").unwrap();
    let mut tracker = ComboTracker::new(table);

    for state in [0b0001, 0b0010] {
        let event = tracker.feed(Snapshot::from_state(keys, state).unwrap());
        assert!(matches!(event, ComboEvent::Extended { .. }));
    }
    let event = tracker.feed(Snapshot::empty(keys));
    assert!(matches!(event, ComboEvent::Matched { action: "Fireball", .. }));
    assert!(tracker.sequence().is_empty());
}

#[test]
fn window_boundary_is_strictly_greater_than() {
    let mut monitor = InputMonitor::new(["Up"], 2 * DT).unwrap();
    monitor.advance_timer(DT);
    monitor.advance_timer(DT);
    assert_eq!(monitor.timer(), 2 * DT);
    assert!(!monitor.window_elapsed());

    monitor.advance_timer(DT);
    assert!(monitor.window_elapsed());
}

#[test]
fn press_released_within_window_still_registers() {
    let mut monitor = InputMonitor::new(["Up", "Down"], 3 * DT).unwrap();
    let mut probe = VirtualButtonProbe::new();

    probe.press("Down");
    monitor.capture_tick(&probe).unwrap();
    probe.release("Down");
    monitor.capture_tick(&probe).unwrap();

    assert_eq!(monitor.finalize_window().state(), 0b10);
}

/// Probe that reports a fixed set of held buttons, like a gamepad stuck in
/// one position.
struct HeldButtons(&'static [&'static str]);

impl ButtonProbe for HeldButtons {
    fn is_pressed(&self, name: &str) -> bool {
        self.0.iter().any(|held| *held == name)
    }
}

#[test]
fn custom_probe_is_polled_for_every_monitored_button() {
    let mut monitor = InputMonitor::new(["Up", "Down", "Left", "Right"], DT).unwrap();
    monitor.capture_tick(&HeldButtons(&["Left", "Right", "Start"])).unwrap();
    assert_eq!(monitor.pending().state(), 0b1100);
    assert_eq!(monitor.pending().to_string(), "Left+Right");
}

#[test]
fn unknown_key_is_raised_for_manual_presses() {
    let mut monitor = InputMonitor::new(["Up", "Down"], DT).unwrap();
    assert_eq!(
        monitor.press("Jump"),
        Err(ComboError::UnknownKey {
            name: "Jump".to_string()
        })
    );

    let mut snapshot = Snapshot::empty(monitor.key_table());
    assert!(matches!(
        snapshot.set("Jump"),
        Err(ComboError::UnknownKey { .. })
    ));
}

#[test]
fn invalid_configuration_is_rejected_at_construction() {
    assert!(matches!(
        InputMonitor::new(Vec::<String>::new(), DT),
        Err(ComboError::InvalidConfiguration(_))
    ));
    assert!(matches!(
        InputMonitor::new(["Up"], Duration::ZERO),
        Err(ComboError::InvalidConfiguration(_))
    ));

    let mut table = ComboTable::new();
    assert!(matches!(
        table.register([0b01, 0, 0b10], "Broken".to_string()),
        Err(ComboError::InvalidConfiguration(_))
    ));
}

#[test]
fn snapshot_log_follows_driver_windows() {
    let mut driver = dpad_config(DT / 2).build_driver().unwrap();
    let mut recorder = Recorder::default();
    driver.enable_snapshot_log();

    let frames: &[&[&str]] = &[&["Up"], &[], &["Down"], &[]];
    run(&mut driver, frames, &mut recorder);

    let log = driver.take_snapshot_log().unwrap();
    let pressed: Vec<Vec<String>> = log.into_records().into_iter().map(|r| r.pressed).collect();
    assert_eq!(
        pressed,
        vec![
            vec!["Up".to_string()],
            vec!["Down".to_string()],
            Vec::new()
        ]
    );
}
