use shared_resources::door_message::DoorCommand;

use crate::utilities::lamps::DoorLamps;

/// How far open the door is. `Paused` is the timed wait at full open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DoorPhase {
    Closed = 0,
    Ajar = 1,
    HalfOpen = 2,
    Open = 3,
    Paused = 4,
}

impl DoorPhase {
    /// Unknown indices fall back to `Closed`.
    pub fn from_index(index: u8) -> Self {
        match index {
            1 => DoorPhase::Ajar,
            2 => DoorPhase::HalfOpen,
            3 => DoorPhase::Open,
            4 => DoorPhase::Paused,
            _ => DoorPhase::Closed,
        }
    }

    pub fn lamps(self) -> DoorLamps {
        match self {
            DoorPhase::Closed => DoorLamps([true, true, true]),
            DoorPhase::Ajar => DoorLamps([true, true, false]),
            DoorPhase::HalfOpen => DoorLamps([true, false, false]),
            DoorPhase::Open | DoorPhase::Paused => DoorLamps([false, false, false]),
        }
    }
}

/// Wait requested after a phase has been shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delay {
    None,
    Step,
    Pause,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DoorStep {
    pub phase: DoorPhase,
    pub lamps: DoorLamps,
    pub delay: Delay,
}

/// Door animation state, owned by the door controller.
#[derive(Debug, Clone, PartialEq)]
pub struct Door {
    shown: DoorPhase,
    next: DoorPhase,
    opening: bool,
    hold_open: bool,
    animation_complete: bool,
}

impl Door {
    pub fn new() -> Self {
        Door {
            shown: DoorPhase::Closed,
            next: DoorPhase::Closed,
            opening: false,
            hold_open: false,
            animation_complete: false,
        }
    }

    /// The phase the next step will show.
    pub fn phase(&self) -> DoorPhase {
        self.next
    }

    pub fn is_opening(&self) -> bool {
        self.opening
    }

    pub fn is_closed(&self) -> bool {
        self.shown == DoorPhase::Closed && !self.opening
    }

    pub fn is_complete(&self) -> bool {
        self.animation_complete
    }

    /// Handles a command while idle. Returns `true` if an animation starts.
    pub fn start(&mut self, command: DoorCommand) -> bool {
        match command {
            DoorCommand::OpenThenAutoClose => self.opening = true,
            DoorCommand::HoldOpen => {
                self.opening = true;
                self.hold_open = true;
            }
            DoorCommand::Close => {}
        }
        self.opening
    }

    /// Handles a command that arrives while the door is animating.
    pub fn command(&mut self, command: DoorCommand) {
        match command {
            DoorCommand::Close => {
                // a held door has to reach full open before it may close
                if !self.hold_open || self.shown == DoorPhase::Open {
                    self.opening = false;
                }
            }
            DoorCommand::OpenThenAutoClose => {
                let mid_close = matches!(self.shown, DoorPhase::Ajar | DoorPhase::HalfOpen | DoorPhase::Open);
                if !self.opening && mid_close && !self.hold_open {
                    // a reversing door loses one extra step
                    self.next = DoorPhase::from_index(self.next as u8 + 2);
                }
                self.opening = true;
            }
            DoorCommand::HoldOpen => {}
        }
    }

    /// Shows the pending phase and works out the one after it.
    pub fn step(&mut self) -> DoorStep {
        self.shown = self.next;
        let delay = match self.shown {
            DoorPhase::Closed => {
                if self.opening {
                    self.next = DoorPhase::Ajar;
                } else {
                    self.animation_complete = true;
                }
                Delay::Step
            }
            DoorPhase::Ajar => {
                self.next = if self.opening { DoorPhase::HalfOpen } else { DoorPhase::Closed };
                Delay::Step
            }
            DoorPhase::HalfOpen => {
                self.next = if self.opening { DoorPhase::Open } else { DoorPhase::Ajar };
                Delay::Step
            }
            DoorPhase::Open => match (self.opening, self.hold_open) {
                (true, true) => Delay::Step,
                (true, false) => {
                    self.next = DoorPhase::Paused;
                    Delay::None
                }
                (false, _) => {
                    self.next = DoorPhase::HalfOpen;
                    Delay::None
                }
            },
            DoorPhase::Paused => {
                self.next = DoorPhase::Open;
                self.opening = false;
                Delay::Pause
            }
        };
        DoorStep {
            phase: self.shown,
            lamps: self.shown.lamps(),
            delay: delay,
        }
    }

    pub fn reset(&mut self) {
        *self = Door::new();
    }
}

impl Default for Door {
    fn default() -> Self {
        Self::new()
    }
}
