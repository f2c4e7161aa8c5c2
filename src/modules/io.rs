/// ----- I/O MODULE -----
/// This module is the output side of the car. Status events are printed
/// as status lines (plain text or JSON), and the lamps and motor pulse are
/// either traced or shown on the status panel.

use std::io::Write;

use log::{debug, trace};

use shared_resources::config::{OutputConfig, OutputFormat};
use shared_resources::status_event::StatusEvent;

use crate::utilities::debug::{Debug, PanelState};
use crate::utilities::lamps::{DirectionLamps, DoorLamps, MotorPulse};

enum Sink<W: Write> {
    Lines(W),
    Panel(Debug),
}

pub struct Transport<W: Write> {
    sink: Sink<W>,
    format: OutputFormat,
    line_length: usize,
    panel: PanelState,
}

impl<W: Write> Transport<W> {
    /// Status lines go to `out` unless the status panel is enabled, in which
    /// case the panel takes over the terminal.
    pub fn new(out: W, output: &OutputConfig) -> Self {
        let sink = if output.status_panel {
            Sink::Panel(Debug::new(output.line_length))
        } else {
            Sink::Lines(out)
        };
        Transport {
            sink: sink,
            format: output.format,
            line_length: output.line_length,
            panel: PanelState::new(),
        }
    }

    pub fn format_line(&self, event: &StatusEvent) -> std::io::Result<String> {
        match self.format {
            OutputFormat::Text => Ok(event.to_line(self.line_length)),
            OutputFormat::Json => Ok(event.to_json()?),
        }
    }

    pub fn status(&mut self, event: &StatusEvent) -> std::io::Result<()> {
        self.panel.last_line = event.to_line(self.line_length);
        let line = self.format_line(event)?;
        match &mut self.sink {
            Sink::Lines(out) => {
                writeln!(out, "{}", line)?;
                out.flush()
            }
            Sink::Panel(debug) => debug.printstatus(&self.panel),
        }
    }

    pub fn door_lamps(&mut self, lamps: DoorLamps) -> std::io::Result<()> {
        debug!("door lamps {}", lamps.as_string());
        self.panel.door_lamps = lamps;
        self.redraw()
    }

    pub fn direction_lamps(&mut self, lamps: DirectionLamps) -> std::io::Result<()> {
        debug!("direction lamps {}", lamps.as_string());
        self.panel.direction_lamps = lamps;
        self.redraw()
    }

    pub fn pulse(&mut self, pulse: MotorPulse) -> std::io::Result<()> {
        trace!("motor pulse {}", pulse.as_string());
        self.panel.pulse = pulse;
        self.redraw()
    }

    fn redraw(&mut self) -> std::io::Result<()> {
        match &mut self.sink {
            Sink::Lines(_) => Ok(()),
            Sink::Panel(debug) => debug.printstatus(&self.panel),
        }
    }

    pub fn panel(&self) -> &PanelState {
        &self.panel
    }
}
