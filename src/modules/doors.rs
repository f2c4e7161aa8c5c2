/// ----- DOORS MODULE -----
/// This module animates the door lamps. It sleeps until a door command
/// arrives, then steps the door through its phases, picking up newer
/// commands between steps, and reports back once the door is closed again.

use std::sync::Arc;
use std::thread;

use crossbeam_channel::{Receiver, Sender};
use log::debug;

use shared_resources::config::TimingConfig;
use shared_resources::door_message::{DoorCommand, DoorStatus};

use crate::utilities::door::{Delay, Door};
use crate::utilities::lamps::DoorLamps;
use crate::utilities::overwrite::OverwriteSender;
use crate::utilities::telemetry::DoorTelemetry;

pub fn main(
    timing: TimingConfig,
    door_command_rx: Receiver<DoorCommand>,
    door_status_tx: OverwriteSender<DoorStatus>,
    door_lamp_tx: Sender<DoorLamps>,
    door_telemetry: Arc<DoorTelemetry>,
) {
    let mut door = Door::new();

    loop {
        let command = match door_command_rx.recv() {
            Ok(command) => command,
            Err(_) => {
                debug!("door command channel closed, stopping doors");
                return;
            }
        };
        if !door.start(command) {
            continue;
        }
        debug!("door animation started by {:?}", command);
        door_telemetry.set_closed(false);

        while !door.is_complete() {
            if let Ok(command) = door_command_rx.try_recv() {
                debug!("door command {:?} during phase {:?}", command, door.phase());
                door.command(command);
            }
            let step = door.step();
            if door_lamp_tx.send(step.lamps).is_err() {
                debug!("door lamp channel closed, stopping doors");
                return;
            }
            match step.delay {
                Delay::None => {}
                Delay::Step => thread::sleep(timing.door_step()),
                Delay::Pause => thread::sleep(timing.door_pause()),
            }
        }

        door.reset();
        door_telemetry.set_closed(true);
        door_status_tx.post(DoorStatus::Closed);
        debug!("door closed");
    }
}
