use super::call::{CallDirection, Slot};

pub const GROUND_FEET: f32 = 0.0;
pub const MID_FEET: f32 = 500.0;
pub const TOP_FEET: f32 = 510.0;

/// A pending (or idle) call for one slot of the table.
#[derive(Debug, Clone, PartialEq)]
pub struct CallRecord {
    pub requested: bool,
    pub direction: CallDirection,
    feet: f32,
    label: &'static str,
}

impl CallRecord {
    fn new(direction: CallDirection, feet: f32, label: &'static str) -> Self {
        CallRecord {
            requested: false,
            direction: direction,
            feet: feet,
            label: label,
        }
    }

    pub fn feet(&self) -> f32 {
        self.feet
    }

    pub fn label(&self) -> &'static str {
        self.label
    }
}

/// The fixed set of call records, indexed by [`Slot`].
///
/// Stop positions never change; only the emergency slot gets a new position,
/// and only through [`RequestTable::set_emergency_point`].
#[derive(Debug, Clone)]
pub struct RequestTable {
    records: [CallRecord; 4],
}

impl RequestTable {
    pub fn new() -> Self {
        RequestTable {
            records: [
                CallRecord::new(CallDirection::Up, GROUND_FEET, "GD"),
                CallRecord::new(CallDirection::Up, MID_FEET, "P1"),
                CallRecord::new(CallDirection::Down, TOP_FEET, "P2"),
                CallRecord::new(CallDirection::Down, GROUND_FEET, "ES"),
            ],
        }
    }

    pub fn get(&self, slot: Slot) -> &CallRecord {
        &self.records[slot as usize]
    }

    pub fn feet(&self, slot: Slot) -> f32 {
        self.records[slot as usize].feet
    }

    pub fn is_requested(&self, slot: Slot) -> bool {
        self.records[slot as usize].requested
    }

    pub fn is_requested_in(&self, slot: Slot, direction: CallDirection) -> bool {
        let record = &self.records[slot as usize];
        record.requested && record.direction == direction
    }

    /// Registers a call. A second call against an already pending one in the
    /// opposite direction turns it into an `Either` call.
    pub fn add_request(&mut self, slot: Slot, direction: CallDirection) {
        let record = &mut self.records[slot as usize];
        if record.requested && record.direction.opposite() == Some(direction) {
            record.direction = CallDirection::Either;
        } else {
            record.direction = direction;
        }
        record.requested = true;
    }

    pub fn clear_request(&mut self, slot: Slot) {
        self.records[slot as usize].requested = false;
    }

    pub fn set_direction(&mut self, slot: Slot, direction: CallDirection) {
        self.records[slot as usize].direction = direction;
    }

    pub fn set_emergency_point(&mut self, feet: f32) {
        self.records[Slot::Emergency as usize].feet = feet.clamp(GROUND_FEET, TOP_FEET);
    }

    /// The real stop the car is standing at, if any. Positions are snapped on
    /// arrival so an exact comparison is intended.
    pub fn stop_at(&self, feet: f32) -> Option<Slot> {
        Slot::iter_stops().find(|slot| self.records[*slot as usize].feet == feet)
    }

    pub fn pending(&self) -> Vec<Slot> {
        Slot::iter_stops().filter(|slot| self.is_requested(*slot)).collect()
    }
}

impl Default for RequestTable {
    fn default() -> Self {
        Self::new()
    }
}
