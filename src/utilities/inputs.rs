use std::sync::Arc;

use crossbeam_channel::{Sender, TrySendError};
use log::warn;

use shared_resources::call::{CallHeading, Slot};
use shared_resources::car_input::CarInput;
use shared_resources::door_message::DoorCommand;
use shared_resources::status_event::{Rejection, StatusEvent};

use super::overwrite::OverwriteSender;
use super::status_log::StatusLog;
use super::telemetry::CarTelemetry;

/// Handles shared by everything that takes requests from outside: the
/// console and the car buttons. Holds the rules for when a request is
/// turned down.
#[derive(Debug, Clone)]
pub struct InputLinks {
    pub car_input_tx: Sender<CarInput>,
    pub door_command_tx: OverwriteSender<DoorCommand>,
    pub status_log: StatusLog,
    pub car: Arc<CarTelemetry>,
}

impl InputLinks {
    /// Returns `false` if the input was dropped.
    pub fn send_input(&self, input: CarInput) -> bool {
        match self.car_input_tx.try_send(input) {
            Ok(()) => true,
            Err(TrySendError::Full(input)) => {
                warn!("car input queue full, dropping {:?}", input);
                self.log(StatusEvent::Rejected { reason: Rejection::InputDropped });
                false
            }
            Err(TrySendError::Disconnected(input)) => {
                warn!("motion controller is gone, dropping {:?}", input);
                false
            }
        }
    }

    pub fn call(&self, slot: Slot, heading: CallHeading) -> bool {
        self.send_input(CarInput::Call { slot: slot, heading: heading })
    }

    pub fn emergency_stop(&self) {
        if self.send_input(CarInput::EmergencyStop) {
            self.log(StatusEvent::EmergencyStop);
        }
    }

    pub fn open_door(&self) {
        if self.car.is_moving() {
            self.log(StatusEvent::Rejected { reason: Rejection::DoorWhileMoving });
            return;
        }
        self.door_command_tx.post(DoorCommand::OpenThenAutoClose);
        self.log(StatusEvent::DoorOpening);
    }

    /// Silently ignored while the car is moving.
    pub fn close_door(&self) {
        if self.car.is_moving() {
            return;
        }
        self.door_command_tx.post(DoorCommand::Close);
        self.log(StatusEvent::DoorClosing);
    }

    /// Clearing an emergency closes the held door, so it needs a stopped car.
    pub fn clear_emergency(&self) {
        if self.car.is_moving() {
            self.log(StatusEvent::Rejected { reason: Rejection::EmergencyClearWhileMoving });
            return;
        }
        self.door_command_tx.post(DoorCommand::Close);
        self.log(StatusEvent::DoorClosing);
    }

    pub fn set_max_speed(&self, speed: f32) {
        if self.send_input(CarInput::SetMaxSpeed(speed)) {
            self.log(StatusEvent::MaxSpeedUpdated { speed: speed });
        }
    }

    pub fn set_acceleration(&self, acceleration: f32) {
        if self.send_input(CarInput::SetAcceleration(acceleration)) {
            self.log(StatusEvent::AccelerationUpdated { acceleration: acceleration });
        }
    }

    pub fn log(&self, event: StatusEvent) {
        self.status_log.log(event);
    }
}
