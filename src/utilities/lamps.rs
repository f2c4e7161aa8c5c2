/// The three door lamps, lit from the left as the door closes.
#[derive(serde::Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct DoorLamps(pub [bool; 3]);

impl DoorLamps {
    pub fn as_string(self) -> String {
        self.0.iter().map(|lit| if *lit { '#' } else { '.' }).collect()
    }
}

/// Up/down indicator pair. Exactly one of them is lit.
#[derive(serde::Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirectionLamps {
    pub up: bool,
    pub down: bool,
}

impl DirectionLamps {
    pub fn from_going_up(going_up: bool) -> Self {
        DirectionLamps {
            up: going_up,
            down: !going_up,
        }
    }

    pub fn as_string(self) -> String {
        if self.up {
            String::from("up")
        } else {
            String::from("down")
        }
    }
}

/// State of the motor pulse pin and the rate it is toggled at.
#[derive(serde::Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct MotorPulse {
    pub hz: u32,
    pub level: bool,
}

impl MotorPulse {
    /// One hertz per 10 ft/s, never slower than 1 Hz.
    pub fn rate_for(speed: f32) -> u32 {
        if speed > 0.0 {
            ((speed / 10.0).floor() as u32).max(1)
        } else {
            1
        }
    }

    pub fn as_string(self) -> String {
        format!("{} Hz {}", self.hz, if self.level { "high" } else { "low" })
    }
}
