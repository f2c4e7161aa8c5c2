use std::io::{stdout, Stdout, Write};

use crossterm::{cursor, terminal, ExecutableCommand, Result};

use super::lamps::{DirectionLamps, DoorLamps, MotorPulse};

const STATUS_SIZE: u16 = 13;

/// What the status panel shows, updated by the run loop as outputs arrive.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelState {
    pub door_lamps: DoorLamps,
    pub direction_lamps: DirectionLamps,
    pub pulse: MotorPulse,
    pub last_line: String,
}

impl PanelState {
    pub fn new() -> Self {
        PanelState {
            door_lamps: DoorLamps([true, true, true]),
            direction_lamps: DirectionLamps::from_going_up(true),
            pulse: MotorPulse { hz: 1, level: false },
            last_line: String::new(),
        }
    }
}

impl Default for PanelState {
    fn default() -> Self {
        Self::new()
    }
}

pub struct Debug {
    stdout: Stdout,
    line_length: usize,
}

impl Debug {
    pub fn new(line_length: usize) -> Self {
        let mut stdout = stdout();
        // room for the first redraw to move up into
        for _ in 0..STATUS_SIZE {
            let _ = writeln!(stdout);
        }
        Debug {
            stdout: stdout,
            line_length: line_length,
        }
    }

    pub fn printstatus(&mut self, panel: &PanelState) -> Result<()> {
        self.stdout.execute(cursor::MoveUp(STATUS_SIZE))?;
        self.stdout.execute(terminal::Clear(terminal::ClearType::FromCursorDown))?;

        writeln!(self.stdout, "+-------------------------+")?;
        writeln!(self.stdout, "| CAR OUTPUTS             |")?;
        writeln!(self.stdout, "+------------+------------+")?;
        writeln!(self.stdout, "| {0:<10} | {1:<10} |", "DOOR", panel.door_lamps.as_string())?;
        writeln!(self.stdout, "+------------+------------+")?;
        writeln!(self.stdout, "| {0:<10} | {1:<10} |", "DIRECTION", panel.direction_lamps.as_string())?;
        writeln!(self.stdout, "+------------+------------+")?;
        writeln!(self.stdout, "| {0:<10} | {1:<10} |", "MOTOR", panel.pulse.as_string())?;
        writeln!(self.stdout, "+------------+------------+\n")?;

        writeln!(self.stdout, "LAST STATUS")?;
        writeln!(self.stdout, "{:-<1$}", "", self.line_length)?;
        writeln!(self.stdout, "{}", panel.last_line)?;

        Ok(())
    }
}
