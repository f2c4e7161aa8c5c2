use std::fmt;

use super::call::CallDirection;

/// Why an input was turned down.
#[derive(serde::Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum Rejection {
    DoorWhileMoving,
    EmergencyClearWhileMoving,
    FloorOutOfRange,
    InvalidNumber { text: String },
    UnknownCommand { command: String },
    InputDropped,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::DoorWhileMoving => write!(f, "Can't open door while car is moving"),
            Rejection::EmergencyClearWhileMoving => {
                write!(f, "wait until the car is stopped before clearing emergency status")
            }
            Rejection::FloorOutOfRange => write!(f, "Floor number has to be between 0 and 2"),
            Rejection::InvalidNumber { text } => write!(f, "'{}' is not a positive number", text),
            Rejection::UnknownCommand { command } => {
                write!(f, "Command not recognised: {}, type help", command)
            }
            Rejection::InputDropped => write!(f, "Input queue full, request dropped"),
        }
    }
}

/// Everything that ends up on the status line output. Kept structured until
/// it reaches the transport, which decides how to print it.
#[derive(serde::Serialize, Debug, Clone, PartialEq)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum StatusEvent {
    Position { feet: f32, speed: f32 },
    Moving { floor: &'static str },
    Stopped { floor: &'static str },
    FloorRequested { floor: Option<&'static str>, direction: Option<CallDirection> },
    DoorOpening,
    DoorClosing,
    EmergencyStop,
    MaxSpeedUpdated { speed: f32 },
    AccelerationUpdated { acceleration: f32 },
    Rejected { reason: Rejection },
    Reply { text: String },
}

impl StatusEvent {
    /// Text form of the event, cut to at most `max_len` characters.
    pub fn to_line(&self, max_len: usize) -> String {
        self.to_string().chars().take(max_len).collect()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl fmt::Display for StatusEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusEvent::Position { feet, speed } => write!(f, "{:.2} Feet :: {:.2} ft/s", feet, speed),
            StatusEvent::Moving { floor } => write!(f, "Floor {} Moving", floor),
            StatusEvent::Stopped { floor } => write!(f, "Floor {} Stopped", floor),
            StatusEvent::FloorRequested { floor: Some(floor), direction: Some(direction) } => {
                write!(f, "Floor {} {} Requested", floor, direction.as_string())
            }
            StatusEvent::FloorRequested { floor: Some(floor), direction: None } => {
                write!(f, "Floor {} Requested", floor)
            }
            StatusEvent::FloorRequested { floor: None, .. } => write!(f, "Floor Requested"),
            StatusEvent::DoorOpening => write!(f, "Door Opening"),
            StatusEvent::DoorClosing => write!(f, "Door Closing"),
            StatusEvent::EmergencyStop => write!(f, "Emergency stop activated"),
            StatusEvent::MaxSpeedUpdated { .. } => write!(f, "Maximum speed updated"),
            StatusEvent::AccelerationUpdated { .. } => write!(f, "Acceleration updated"),
            StatusEvent::Rejected { reason } => write!(f, "{}", reason),
            StatusEvent::Reply { text } => write!(f, "{}", text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_line_uses_two_decimals() {
        let event = StatusEvent::Position { feet: 123.456, speed: 5.0 };
        assert_eq!(event.to_line(50), "123.46 Feet :: 5.00 ft/s");
    }

    #[test]
    fn lines_are_cut_to_the_line_length() {
        let event = StatusEvent::Rejected { reason: Rejection::EmergencyClearWhileMoving };
        let line = event.to_line(20);
        assert_eq!(line.chars().count(), 20);
        assert_eq!(line, "wait until the car i");
    }

    #[test]
    fn call_acknowledgments() {
        let mid_up = StatusEvent::FloorRequested { floor: Some("P1"), direction: Some(CallDirection::Up) };
        assert_eq!(mid_up.to_string(), "Floor P1 UP Requested");
        let in_car = StatusEvent::FloorRequested { floor: None, direction: None };
        assert_eq!(in_car.to_string(), "Floor Requested");
    }

    #[test]
    fn json_is_tagged_by_event() {
        let json = StatusEvent::Stopped { floor: "GD" }.to_json().unwrap();
        assert_eq!(json, r#"{"event":"stopped","floor":"GD"}"#);
        let json = StatusEvent::Rejected { reason: Rejection::DoorWhileMoving }.to_json().unwrap();
        assert_eq!(json, r#"{"event":"rejected","reason":"door_while_moving"}"#);
    }
}
