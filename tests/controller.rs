use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crossbeam_channel::{unbounded, Receiver};

use elevator::modules::buttons::Button;
use elevator::modules::{doors, start, Controller};
use elevator::utilities::lamps::{DirectionLamps, DoorLamps};
use elevator::utilities::overwrite::overwrite_channel;
use elevator::utilities::telemetry::DoorTelemetry;
use shared_resources::call::{CallHeading, Slot};
use shared_resources::config::{Config, TimingConfig};
use shared_resources::door_message::{DoorCommand, DoorStatus};
use shared_resources::status_event::{Rejection, StatusEvent};

const TIMEOUT: Duration = Duration::from_secs(5);

const CLOSED: DoorLamps = DoorLamps([true, true, true]);
const AJAR: DoorLamps = DoorLamps([true, true, false]);
const HALF_OPEN: DoorLamps = DoorLamps([true, false, false]);
const OPEN: DoorLamps = DoorLamps([false, false, false]);

fn fast_timing(move_tick_ms: u64) -> TimingConfig {
    TimingConfig {
        move_tick_ms: move_tick_ms,
        no_destination_poll_ms: 1,
        door_step_ms: 1,
        door_pause_ms: 5,
        button_poll_ms: 1,
        button_debounce_ms: 0,
    }
}

fn fast_controller(move_tick_ms: u64) -> Controller {
    let mut config = Config::default();
    config.timing = fast_timing(move_tick_ms);
    config.channels.status_log_capacity = 4096;
    start(&config, std::io::empty()).unwrap()
}

/// Collects status events up to and including the first one matching `last`.
fn events_until(rx: &Receiver<StatusEvent>, last: StatusEvent) -> Vec<StatusEvent> {
    let mut events = Vec::new();
    loop {
        let event = rx.recv_timeout(TIMEOUT).expect("controller went quiet");
        let done = event == last;
        events.push(event);
        if done {
            return events;
        }
    }
}

fn lamps_until(rx: &Receiver<DoorLamps>, last: DoorLamps) -> Vec<DoorLamps> {
    let mut lamps = Vec::new();
    loop {
        let lamp = rx.recv_timeout(TIMEOUT).expect("door went quiet");
        lamps.push(lamp);
        if lamp == last && lamps.len() > 1 {
            return lamps;
        }
    }
}

fn positions(events: &[StatusEvent]) -> Vec<(f32, f32)> {
    events
        .iter()
        .filter_map(|event| match event {
            StatusEvent::Position { feet, speed } => Some((*feet, *speed)),
            _ => None,
        })
        .collect()
}

#[test]
fn mid_call_from_ground_runs_a_full_trip() {
    let controller = fast_controller(1);
    assert!(controller.links.call(Slot::Mid, CallHeading::Up));

    let events = events_until(&controller.status_rx, StatusEvent::Stopped { floor: "P1" });
    assert_eq!(events.first(), Some(&StatusEvent::Moving { floor: "P1" }));
    let trip = positions(&events);
    assert_eq!(trip.last(), Some(&(500.0, 0.0)));
    assert!(trip.iter().all(|(feet, speed)| (0.0..=510.0).contains(feet) && (0.0..=50.0).contains(speed)));

    assert_eq!(
        controller.direction_lamp_rx.recv_timeout(TIMEOUT),
        Ok(DirectionLamps { up: true, down: false })
    );
    assert_eq!(
        lamps_until(&controller.door_lamp_rx, CLOSED),
        vec![CLOSED, AJAR, HALF_OPEN, OPEN, OPEN, OPEN, HALF_OPEN, AJAR, CLOSED]
    );
}

#[test]
fn door_cycle_reports_closed_once() {
    let (door_command_tx, door_command_rx) = overwrite_channel();
    let (door_status_tx, door_status_rx) = overwrite_channel();
    let (door_lamp_tx, door_lamp_rx) = unbounded();
    let door_telemetry = Arc::new(DoorTelemetry::new());
    {
        let door_telemetry = door_telemetry.clone();
        thread::spawn(move || doors::main(fast_timing(1), door_command_rx, door_status_tx, door_lamp_tx, door_telemetry));
    }

    door_command_tx.post(DoorCommand::OpenThenAutoClose);
    assert_eq!(lamps_until(&door_lamp_rx, CLOSED).len(), 9);
    assert_eq!(door_status_rx.recv_timeout(TIMEOUT), Ok(DoorStatus::Closed));
    assert!(door_telemetry.is_closed());

    thread::sleep(Duration::from_millis(20));
    assert!(door_status_rx.is_empty());
    assert!(door_lamp_rx.is_empty());
}

#[test]
fn emergency_going_up_stops_short_then_holds_the_door_at_ground() {
    let controller = fast_controller(5);
    assert!(controller.links.call(Slot::Top, CallHeading::Down));

    let mut seen = 0;
    while seen < 5 {
        if let StatusEvent::Position { .. } = controller.status_rx.recv_timeout(TIMEOUT).unwrap() {
            seen += 1;
        }
    }
    controller.links.emergency_stop();

    let events = events_until(&controller.status_rx, StatusEvent::Stopped { floor: "GD" });
    let stop = events
        .iter()
        .position(|event| *event == StatusEvent::Stopped { floor: "ES" })
        .expect("car did not stop short");
    assert!(!events.contains(&StatusEvent::Stopped { floor: "P2" }));
    assert_eq!(events.get(stop + 1), Some(&StatusEvent::Moving { floor: "GD" }));
    assert_eq!(positions(&events).last(), Some(&(0.0, 0.0)));

    // held open until cleared
    assert_eq!(lamps_until(&controller.door_lamp_rx, OPEN), vec![CLOSED, AJAR, HALF_OPEN, OPEN]);
    thread::sleep(Duration::from_millis(20));
    assert!(controller.door_lamp_rx.try_iter().all(|lamps| lamps == OPEN));

    controller.links.clear_emergency();
    let closing = lamps_until(&controller.door_lamp_rx, CLOSED);
    assert_eq!(closing.last(), Some(&CLOSED));
    assert!(closing.contains(&HALF_OPEN));

    let directions: Vec<DirectionLamps> = controller.direction_lamp_rx.try_iter().collect();
    assert!(directions.contains(&DirectionLamps { up: false, down: true }));
}

#[test]
fn door_open_is_refused_during_a_trip() {
    let controller = fast_controller(5);
    assert!(controller.links.call(Slot::Top, CallHeading::Down));
    loop {
        if let StatusEvent::Position { .. } = controller.status_rx.recv_timeout(TIMEOUT).unwrap() {
            break;
        }
    }
    controller.links.open_door();

    let events = events_until(&controller.status_rx, StatusEvent::Stopped { floor: "P2" });
    assert!(events.contains(&StatusEvent::Rejected { reason: Rejection::DoorWhileMoving }));
    assert!(!events.contains(&StatusEvent::DoorOpening));
}

#[test]
fn car_button_sends_the_car_in_its_travel_direction() {
    let controller = fast_controller(1);
    controller.buttons.press(Button::Top);

    let events = events_until(&controller.status_rx, StatusEvent::Stopped { floor: "P2" });
    assert!(events.contains(&StatusEvent::FloorRequested { floor: None, direction: None }));
    assert!(events.contains(&StatusEvent::Moving { floor: "P2" }));
    assert_eq!(positions(&events).last(), Some(&(510.0, 0.0)));
}
