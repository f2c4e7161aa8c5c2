use std::io::BufRead;
use std::sync::Arc;
use std::thread;

use crossbeam_channel::{bounded, select, unbounded, Receiver};
use log::info;

use shared_resources::config::Config;
use shared_resources::status_event::StatusEvent;

use crate::error::Error;
use crate::utilities::inputs::InputLinks;
use crate::utilities::lamps::{DirectionLamps, DoorLamps, MotorPulse};
use crate::utilities::overwrite::overwrite_channel;
use crate::utilities::status_log::status_log;
use crate::utilities::telemetry::{CarTelemetry, DoorTelemetry};

use self::buttons::LatchedButtons;
use self::console::TaskInfo;
use self::io::Transport;

pub mod buttons;
pub mod console;
pub mod doors;
pub mod io;
pub mod motion;
pub mod motor;

/// Handles to a running controller: the inputs it accepts and the outputs
/// it produces.
pub struct Controller {
    pub links: InputLinks,
    pub buttons: Arc<LatchedButtons>,
    pub status_rx: Receiver<StatusEvent>,
    pub door_lamp_rx: Receiver<DoorLamps>,
    pub direction_lamp_rx: Receiver<DirectionLamps>,
    pub pulse_rx: Receiver<MotorPulse>,
    pub quit_rx: Receiver<()>,
}

fn task_list(config: &Config) -> Vec<TaskInfo> {
    let timing = &config.timing;
    vec![
        TaskInfo { name: "motion", schedule: format!("{} ms ticks, {} ms idle poll", timing.move_tick_ms, timing.no_destination_poll_ms) },
        TaskInfo { name: "doors", schedule: format!("on command, {} ms steps", timing.door_step_ms) },
        TaskInfo { name: "buttons", schedule: format!("every {} ms", timing.button_poll_ms) },
        TaskInfo { name: "motor", schedule: String::from("1000/hz ms") },
        TaskInfo { name: "console", schedule: String::from("on input") },
    ]
}

/// Spawns every activity of the car. Console commands are read from
/// `console_input` until it runs out.
pub fn start<R: BufRead + Send + 'static>(config: &Config, console_input: R) -> Result<Controller, Error> {
    // INITIALIZE CHANNELS
    let (status_log, status_rx) = status_log(config.channels.status_log_capacity);
    let (car_input_tx, car_input_rx) = bounded(config.channels.car_input_capacity);
    let (door_command_tx, door_command_rx) = overwrite_channel();
    let (door_status_tx, door_status_rx) = overwrite_channel();
    let (door_lamp_tx, door_lamp_rx) = unbounded();
    let (direction_lamp_tx, direction_lamp_rx) = unbounded();
    let (pulse_tx, pulse_rx) = unbounded();
    let (quit_tx, quit_rx) = bounded(1);

    let car_telemetry = Arc::new(CarTelemetry::new());
    let door_telemetry = Arc::new(DoorTelemetry::new());
    let buttons = Arc::new(LatchedButtons::new());
    let links = InputLinks {
        car_input_tx: car_input_tx,
        door_command_tx: door_command_tx.clone(),
        status_log: status_log.clone(),
        car: car_telemetry.clone(),
    };

    // INITIALIZE THREAD FOR DOOR EVENTS
    {
        let timing = config.timing.clone();
        let door_telemetry = door_telemetry.clone();
        thread::Builder::new().name("doors".to_string()).spawn(move || doors::main(
            timing,
            door_command_rx,
            door_status_tx,
            door_lamp_tx,
            door_telemetry,
        ))?;
    }

    // INITIALIZE THREAD FOR CAR MOTION
    {
        let car_config = config.car.clone();
        let timing = config.timing.clone();
        let car_telemetry = car_telemetry.clone();
        thread::Builder::new().name("motion".to_string()).spawn(move || motion::main(
            car_config,
            timing,
            car_input_rx,
            door_command_tx,
            door_status_rx,
            direction_lamp_tx,
            status_log,
            car_telemetry,
            door_telemetry,
        ))?;
    }

    // INITIALIZE THREAD FOR BUTTONS
    {
        let timing = config.timing.clone();
        let buttons = buttons.clone();
        let links = links.clone();
        thread::Builder::new().name("buttons".to_string()).spawn(move || buttons::main(
            timing,
            buttons,
            links,
        ))?;
    }

    // INITIALIZE THREAD FOR MOTOR PULSE
    thread::Builder::new().name("motor".to_string()).spawn(move || motor::main(
        car_telemetry,
        pulse_tx,
    ))?;

    // INITIALIZE THREAD FOR CONSOLE
    {
        let tasks = task_list(config);
        let buttons = buttons.clone();
        let links = links.clone();
        thread::Builder::new().name("console".to_string()).spawn(move || console::main(
            console_input,
            links,
            buttons,
            tasks,
            quit_tx,
        ))?;
    }

    Ok(Controller {
        links: links,
        buttons: buttons,
        status_rx: status_rx,
        door_lamp_rx: door_lamp_rx,
        direction_lamp_rx: direction_lamp_rx,
        pulse_rx: pulse_rx,
        quit_rx: quit_rx,
    })
}

pub fn run() -> Result<(), Error> {
    // READ CONFIGURATION
    let config = Config::get()?;
    info!("starting with {:?}", config);

    let controller = start(&config, std::io::BufReader::new(std::io::stdin()))?;
    let mut transport = Transport::new(std::io::stdout(), &config.output);

    loop {
        select! {
            recv(controller.status_rx) -> msg => match msg {
                Ok(event) => transport.status(&event)?,
                Err(_) => return Ok(()),
            },
            recv(controller.door_lamp_rx) -> msg => match msg {
                Ok(lamps) => transport.door_lamps(lamps)?,
                Err(_) => return Ok(()),
            },
            recv(controller.direction_lamp_rx) -> msg => match msg {
                Ok(lamps) => transport.direction_lamps(lamps)?,
                Err(_) => return Ok(()),
            },
            recv(controller.pulse_rx) -> msg => match msg {
                Ok(pulse) => transport.pulse(pulse)?,
                Err(_) => return Ok(()),
            },
            recv(controller.quit_rx) -> _ => {
                println!("STOPPING PROGRAM...");
                return Ok(())
            }
        }
    }
}
