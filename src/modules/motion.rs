/// ----- MOTION MODULE -----
/// This module owns the request table and the car. It waits for a
/// destination, drives the car there one tick at a time, and hands the
/// car over to the doors on arrival. Inputs from the console and the
/// buttons are picked up between ticks and between arbitration attempts.

use std::sync::Arc;
use std::thread;

use crossbeam_channel::{Receiver, Sender};
use log::{debug, info, warn};

use shared_resources::call::{CallDirection, CallHeading, Slot};
use shared_resources::car_input::CarInput;
use shared_resources::config::{CarConfig, TimingConfig};
use shared_resources::door_message::{DoorCommand, DoorStatus};
use shared_resources::request::RequestTable;
use shared_resources::status_event::StatusEvent;

use crate::utilities::car::Car;
use crate::utilities::lamps::DirectionLamps;
use crate::utilities::overwrite::{discard_pending, OverwriteSender};
use crate::utilities::status_log::StatusLog;
use crate::utilities::telemetry::{CarTelemetry, DoorTelemetry};

pub fn apply_input(input: CarInput, car: &mut Car, requests: &mut RequestTable) {
    match input {
        CarInput::Call { slot, heading } => {
            if !slot.is_stop() {
                warn!("ignoring call to {:?}, it is not a stop", slot);
                return;
            }
            let direction = match heading {
                CallHeading::Up => CallDirection::Up,
                CallHeading::Down => CallDirection::Down,
                CallHeading::Travel => {
                    if car.going_up {
                        CallDirection::Up
                    } else {
                        CallDirection::Down
                    }
                }
            };
            requests.add_request(slot, direction);
        }
        CarInput::EmergencyStop => {
            info!("emergency stop engaged");
            car.emergency_stop = true;
        }
        CarInput::SetMaxSpeed(speed) => car.max_speed = speed,
        CarInput::SetAcceleration(acceleration) => car.acceleration = acceleration,
    }
}

fn drain_inputs(car_input_rx: &Receiver<CarInput>, car: &mut Car, requests: &mut RequestTable) {
    while let Ok(input) = car_input_rx.try_recv() {
        apply_input(input, car, requests);
    }
}

/// Door command to issue once the car has stopped, if any.
fn arrival_door_command(car: &mut Car, requests: &RequestTable) -> Option<DoorCommand> {
    if !car.emergency_stop {
        Some(DoorCommand::OpenThenAutoClose)
    } else if car.position == requests.feet(Slot::Ground) {
        car.emergency_stop = false;
        Some(DoorCommand::HoldOpen)
    } else {
        // stopped short on the way up, the ground stop comes next
        None
    }
}

pub fn main(
    car_config: CarConfig,
    timing: TimingConfig,
    car_input_rx: Receiver<CarInput>,
    door_command_tx: OverwriteSender<DoorCommand>,
    door_status_rx: Receiver<DoorStatus>,
    direction_lamp_tx: Sender<DirectionLamps>,
    status_log: StatusLog,
    car_telemetry: Arc<CarTelemetry>,
    door_telemetry: Arc<DoorTelemetry>,
) {
    let mut car = Car::new(&car_config);
    let mut requests = RequestTable::new();
    let mut shown_lamps: Option<DirectionLamps> = None;

    loop {
        // WAIT FOR A DESTINATION
        loop {
            drain_inputs(&car_input_rx, &mut car, &mut requests);
            let found = car.update_destination(&mut requests);

            let lamps = car.direction_lamps();
            if shown_lamps != Some(lamps) {
                if direction_lamp_tx.send(lamps).is_err() {
                    debug!("direction lamp channel closed, stopping motion");
                    return;
                }
                shown_lamps = Some(lamps);
            }
            car_telemetry.publish(car.is_moving(&requests), car.going_up, car.speed);
            if found {
                break;
            }

            thread::sleep(timing.no_destination_poll());
            if !door_telemetry.is_closed() && door_status_rx.recv().is_err() {
                debug!("door status channel closed, stopping motion");
                return;
            }
        }

        // DRIVE THERE
        let destination = requests.get(car.destination).label();
        debug!("heading for {} from {:.2} ft", destination, car.position);
        if !car.has_arrived(&requests) {
            status_log.log(StatusEvent::Moving { floor: destination });
        }

        car.begin_trip();
        while !car.has_arrived(&requests) {
            thread::sleep(timing.move_tick());
            drain_inputs(&car_input_rx, &mut car, &mut requests);
            let position = car.tick(&mut requests);
            car_telemetry.publish(car.is_moving(&requests), car.going_up, car.speed);
            status_log.log(position);
        }
        car_telemetry.publish(false, car.going_up, car.speed);

        let stopped_at = requests.get(car.destination).label();
        status_log.log(StatusEvent::Stopped { floor: stopped_at });

        // HAND OVER TO THE DOORS
        if let Some(command) = arrival_door_command(&mut car, &requests) {
            discard_pending(&door_status_rx);
            door_command_tx.post(command);
            if door_status_rx.recv().is_err() {
                debug!("door status channel closed, stopping motion");
                return;
            }
        }
    }
}
