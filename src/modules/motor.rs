/// ----- MOTOR MODULE -----
/// This module drives the motor pulse pin. The pin toggles at one hertz for
/// every 10 ft/s of car speed and is held low while the car stands still.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crossbeam_channel::Sender;
use log::debug;

use crate::utilities::lamps::MotorPulse;
use crate::utilities::telemetry::CarTelemetry;

/// Pulse to output next and how long to hold it.
pub fn next_pulse(speed: f32, level: bool) -> (MotorPulse, Duration) {
    let hz = MotorPulse::rate_for(speed);
    let level = if speed > 0.0 { !level } else { false };
    (MotorPulse { hz: hz, level: level }, Duration::from_millis(1000 / hz as u64))
}

pub fn main(car_telemetry: Arc<CarTelemetry>, pulse_tx: Sender<MotorPulse>) {
    let mut level = false;

    loop {
        let (pulse, hold) = next_pulse(car_telemetry.speed(), level);
        level = pulse.level;
        if pulse_tx.send(pulse).is_err() {
            debug!("pulse channel closed, stopping motor");
            return;
        }
        thread::sleep(hold);
    }
}
