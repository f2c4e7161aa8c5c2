/// Direction a caller wants to travel in.
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallDirection {
    Up,
    Down,
    Either,
}

impl CallDirection {
    pub fn opposite(self) -> Option<Self> {
        match self {
            CallDirection::Up => Some(CallDirection::Down),
            CallDirection::Down => Some(CallDirection::Up),
            CallDirection::Either => None,
        }
    }

    pub fn as_string(self) -> String {
        match self {
            CallDirection::Up => String::from("UP"),
            CallDirection::Down => String::from("DN"),
            CallDirection::Either => String::from("EITHER"),
        }
    }
}

/// Direction attached to a call when it is placed. `Travel` is used by the
/// buttons inside the car, which follow whatever way the car is heading.
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallHeading {
    Up,
    Down,
    Travel,
}

/// Slot in the request table. The first three are the real stops, the last
/// one is the emergency stopping point which is computed while moving.
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Ground = 0,
    Mid = 1,
    Top = 2,
    Emergency = 3,
}

impl Slot {
    pub fn num_slots() -> usize {
        4
    }

    pub fn from_floor(floor: u8) -> Option<Self> {
        match floor {
            0 => Some(Slot::Ground),
            1 => Some(Slot::Mid),
            2 => Some(Slot::Top),
            _ => None,
        }
    }

    pub fn is_stop(self) -> bool {
        self != Slot::Emergency
    }

    pub fn iter_stops() -> impl Iterator<Item = Slot> {
        [Slot::Ground, Slot::Mid, Slot::Top].iter().copied()
    }
}
