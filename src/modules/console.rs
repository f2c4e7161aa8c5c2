/// ----- CONSOLE MODULE -----
/// This module reads operator commands line by line and turns them into
/// calls, door commands and parameter changes. Replies and rejections are
/// written to the status log like everything else the car reports.

use std::io::BufRead;
use std::sync::Arc;

use crossbeam_channel::Sender;
use log::{debug, warn};

use shared_resources::call::{CallDirection, CallHeading, Slot};
use shared_resources::status_event::{Rejection, StatusEvent};

use crate::modules::buttons::{Button, LatchedButtons};
use crate::utilities::inputs::InputLinks;

const HELP: [&str; 14] = [
    "z      GD call outside car",
    "x      P1 call DN outside car",
    "c      P1 call UP outside car",
    "v      P2 call outside car",
    "b, ES  emergency stop",
    "n, ER  emergency clear",
    "m      door interference",
    "S n    max speed in ft/s",
    "AP n   acceleration in ft/s^2",
    "SF n   send to floor 0/1/2",
    "TS     task list",
    "RTS    task list",
    "press  p2|p1|gd|open|close",
    "help   this list",
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    Call { slot: Slot, heading: CallHeading },
    SendToFloor(Slot),
    EmergencyStop,
    EmergencyClear,
    DoorInterference,
    SetMaxSpeed(f32),
    SetAcceleration(f32),
    TaskStats,
    Help,
    Press(Button),
}

/// A spawned activity and how it is scheduled, for the task listing.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskInfo {
    pub name: &'static str,
    pub schedule: String,
}

fn parse_positive(text: Option<&str>) -> Result<f32, Rejection> {
    let text = text.unwrap_or("");
    match text.parse::<f32>() {
        Ok(value) if value.is_finite() && value > 0.0 => Ok(value),
        _ => Err(Rejection::InvalidNumber { text: text.to_string() }),
    }
}

fn parse_floor(text: Option<&str>) -> Result<Slot, Rejection> {
    let text = text.unwrap_or("");
    let floor = text
        .parse::<i64>()
        .map_err(|_| Rejection::InvalidNumber { text: text.to_string() })?;
    u8::try_from(floor)
        .ok()
        .and_then(Slot::from_floor)
        .ok_or(Rejection::FloorOutOfRange)
}

fn parse_button(text: Option<&str>) -> Result<Button, Rejection> {
    match text {
        Some("p2") => Ok(Button::Top),
        Some("p1") => Ok(Button::Mid),
        Some("gd") => Ok(Button::Ground),
        Some("open") => Ok(Button::DoorOpen),
        Some("close") => Ok(Button::DoorClose),
        other => Err(Rejection::UnknownCommand {
            command: format!("press {}", other.unwrap_or("")).trim_end().to_string(),
        }),
    }
}

/// Parses one non-empty console line.
pub fn parse(line: &str) -> Result<Command, Rejection> {
    let mut words = line.split_whitespace();
    let name = words.next().unwrap_or("");
    let argument = words.next();

    match name {
        "z" => Ok(Command::Call { slot: Slot::Ground, heading: CallHeading::Up }),
        "x" => Ok(Command::Call { slot: Slot::Mid, heading: CallHeading::Down }),
        "c" => Ok(Command::Call { slot: Slot::Mid, heading: CallHeading::Up }),
        "v" => Ok(Command::Call { slot: Slot::Top, heading: CallHeading::Down }),
        "b" | "ES" => Ok(Command::EmergencyStop),
        "n" | "ER" => Ok(Command::EmergencyClear),
        "m" => Ok(Command::DoorInterference),
        "S" => parse_positive(argument).map(Command::SetMaxSpeed),
        "AP" => parse_positive(argument).map(Command::SetAcceleration),
        "SF" => parse_floor(argument).map(Command::SendToFloor),
        "TS" | "RTS" => Ok(Command::TaskStats),
        "help" => Ok(Command::Help),
        "press" => parse_button(argument).map(Command::Press),
        _ => Err(Rejection::UnknownCommand { command: line.trim().to_string() }),
    }
}

fn call_acknowledgment(slot: Slot, heading: CallHeading) -> StatusEvent {
    let (floor, direction) = match slot {
        Slot::Ground => ("GD", None),
        Slot::Mid => ("P1", Some(heading)),
        Slot::Top => ("P2", None),
        Slot::Emergency => ("ES", None),
    };
    let direction = match direction {
        Some(CallHeading::Up) => Some(CallDirection::Up),
        Some(CallHeading::Down) => Some(CallDirection::Down),
        _ => None,
    };
    StatusEvent::FloorRequested { floor: Some(floor), direction: direction }
}

pub fn execute(command: Command, links: &InputLinks, buttons: &LatchedButtons, tasks: &[TaskInfo]) {
    match command {
        Command::Call { slot, heading } => {
            if links.call(slot, heading) {
                links.log(call_acknowledgment(slot, heading));
            }
        }
        Command::SendToFloor(slot) => {
            if links.call(slot, CallHeading::Travel) {
                links.log(StatusEvent::FloorRequested { floor: None, direction: None });
            }
        }
        Command::EmergencyStop => links.emergency_stop(),
        Command::EmergencyClear => links.clear_emergency(),
        Command::DoorInterference => links.open_door(),
        Command::SetMaxSpeed(speed) => links.set_max_speed(speed),
        Command::SetAcceleration(acceleration) => links.set_acceleration(acceleration),
        Command::TaskStats => {
            links.log(StatusEvent::Reply { text: format!("{:<10} {}", "TASK", "SCHEDULE") });
            for task in tasks {
                links.log(StatusEvent::Reply { text: format!("{:<10} {}", task.name, task.schedule) });
            }
        }
        Command::Help => {
            for line in HELP.iter() {
                links.log(StatusEvent::Reply { text: line.to_string() });
            }
        }
        Command::Press(button) => buttons.press(button),
    }
}

pub fn main<R: BufRead>(
    reader: R,
    links: InputLinks,
    buttons: Arc<LatchedButtons>,
    tasks: Vec<TaskInfo>,
    quit_tx: Sender<()>,
) {
    for line in reader.lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                warn!("console read failed: {}", e);
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }
        match parse(&line) {
            Ok(command) => {
                debug!("console command {:?}", command);
                execute(command, &links, &buttons, &tasks);
            }
            Err(reason) => links.log(StatusEvent::Rejected { reason: reason }),
        }
    }
    debug!("console input ended");
    let _ = quit_tx.send(());
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Cursor;

    use crossbeam_channel::bounded;
    use shared_resources::car_input::CarInput;
    use shared_resources::door_message::DoorCommand;

    use crate::modules::buttons::ButtonSource;
    use crate::utilities::inputs::tests::harness;

    #[test]
    fn single_letter_calls() {
        assert_eq!(parse("z"), Ok(Command::Call { slot: Slot::Ground, heading: CallHeading::Up }));
        assert_eq!(parse("x"), Ok(Command::Call { slot: Slot::Mid, heading: CallHeading::Down }));
        assert_eq!(parse(" c "), Ok(Command::Call { slot: Slot::Mid, heading: CallHeading::Up }));
        assert_eq!(parse("v"), Ok(Command::Call { slot: Slot::Top, heading: CallHeading::Down }));
    }

    #[test]
    fn long_and_short_emergency_names() {
        assert_eq!(parse("b"), Ok(Command::EmergencyStop));
        assert_eq!(parse("ES"), Ok(Command::EmergencyStop));
        assert_eq!(parse("n"), Ok(Command::EmergencyClear));
        assert_eq!(parse("ER"), Ok(Command::EmergencyClear));
        assert_eq!(parse("RTS"), Ok(Command::TaskStats));
    }

    #[test]
    fn numeric_arguments() {
        assert_eq!(parse("S 25.5"), Ok(Command::SetMaxSpeed(25.5)));
        assert_eq!(parse("AP 4"), Ok(Command::SetAcceleration(4.0)));
        assert_eq!(parse("SF 2"), Ok(Command::SendToFloor(Slot::Top)));
    }

    #[test]
    fn bad_numbers_are_rejected() {
        assert_eq!(parse("S fast"), Err(Rejection::InvalidNumber { text: String::from("fast") }));
        assert_eq!(parse("AP -3"), Err(Rejection::InvalidNumber { text: String::from("-3") }));
        assert_eq!(parse("S"), Err(Rejection::InvalidNumber { text: String::new() }));
        assert_eq!(parse("SF 3"), Err(Rejection::FloorOutOfRange));
        assert_eq!(parse("SF -1"), Err(Rejection::FloorOutOfRange));
        assert_eq!(parse("SF one"), Err(Rejection::InvalidNumber { text: String::from("one") }));
    }

    #[test]
    fn unknown_commands_are_named() {
        assert_eq!(parse("open sesame"), Err(Rejection::UnknownCommand { command: String::from("open sesame") }));
        assert_eq!(parse("press up"), Err(Rejection::UnknownCommand { command: String::from("press up") }));
        assert_eq!(parse("press gd"), Ok(Command::Press(Button::Ground)));
    }

    #[test]
    fn calls_are_forwarded_and_acknowledged() {
        let h = harness(8);
        let buttons = LatchedButtons::new();
        execute(parse("c").unwrap(), &h.links, &buttons, &[]);
        execute(parse("SF 1").unwrap(), &h.links, &buttons, &[]);

        assert_eq!(h.car_input_rx.try_recv(), Ok(CarInput::Call { slot: Slot::Mid, heading: CallHeading::Up }));
        assert_eq!(h.car_input_rx.try_recv(), Ok(CarInput::Call { slot: Slot::Mid, heading: CallHeading::Travel }));
        assert_eq!(h.status_rx.try_recv().map(|event| event.to_string()), Ok(String::from("Floor P1 UP Requested")));
        assert_eq!(
            h.status_rx.try_recv(),
            Ok(StatusEvent::FloorRequested { floor: None, direction: None })
        );
        assert_eq!(call_acknowledgment(Slot::Mid, CallHeading::Down).to_string(), "Floor P1 DN Requested");
        assert_eq!(call_acknowledgment(Slot::Top, CallHeading::Down).to_string(), "Floor P2 Requested");
        assert_eq!(
            call_acknowledgment(Slot::Mid, CallHeading::Up),
            StatusEvent::FloorRequested { floor: Some("P1"), direction: Some(CallDirection::Up) }
        );
    }

    #[test]
    fn session_runs_until_end_of_input() {
        let h = harness(8);
        let buttons = Arc::new(LatchedButtons::new());
        let (quit_tx, quit_rx) = bounded(1);
        let tasks = vec![TaskInfo { name: "motion", schedule: String::from("every 500 ms") }];
        let input = Cursor::new("m\n\nbogus\nTS\npress open\nS 10\n");

        main(input, h.links.clone(), buttons.clone(), tasks, quit_tx);

        assert_eq!(quit_rx.try_recv(), Ok(()));
        assert_eq!(h.door_command_rx.try_recv(), Ok(DoorCommand::OpenThenAutoClose));
        assert_eq!(h.car_input_rx.try_recv(), Ok(CarInput::SetMaxSpeed(10.0)));
        assert!(buttons.is_pressed(Button::DoorOpen));

        let lines: Vec<String> = h.status_rx.try_iter().map(|event| event.to_string()).collect();
        assert_eq!(
            lines,
            vec![
                String::from("Door Opening"),
                String::from("Command not recognised: bogus, type help"),
                String::from("TASK       SCHEDULE"),
                String::from("motion     every 500 ms"),
                String::from("Maximum speed updated"),
            ]
        );
    }
}
