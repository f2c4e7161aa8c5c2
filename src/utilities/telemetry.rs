use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

/// Read-only view of the car for the other activities.
///
/// Every field is written by the motion controller alone, one at a time, so a
/// reader can see e.g. the new `moving` together with the old `speed`.
#[derive(Debug)]
pub struct CarTelemetry {
    moving: AtomicBool,
    going_up: AtomicBool,
    speed_bits: AtomicU32,
}

impl CarTelemetry {
    pub fn new() -> Self {
        CarTelemetry {
            moving: AtomicBool::new(false),
            going_up: AtomicBool::new(true),
            speed_bits: AtomicU32::new(0.0f32.to_bits()),
        }
    }

    pub fn publish(&self, moving: bool, going_up: bool, speed: f32) {
        self.moving.store(moving, Ordering::Relaxed);
        self.going_up.store(going_up, Ordering::Relaxed);
        self.speed_bits.store(speed.to_bits(), Ordering::Relaxed);
    }

    pub fn is_moving(&self) -> bool {
        self.moving.load(Ordering::Relaxed)
    }

    pub fn going_up(&self) -> bool {
        self.going_up.load(Ordering::Relaxed)
    }

    pub fn speed(&self) -> f32 {
        f32::from_bits(self.speed_bits.load(Ordering::Relaxed))
    }
}

impl Default for CarTelemetry {
    fn default() -> Self {
        Self::new()
    }
}

/// Whether the door is fully closed, written by the door controller.
#[derive(Debug)]
pub struct DoorTelemetry {
    closed: AtomicBool,
}

impl DoorTelemetry {
    pub fn new() -> Self {
        DoorTelemetry {
            closed: AtomicBool::new(true),
        }
    }

    pub fn set_closed(&self, closed: bool) {
        self.closed.store(closed, Ordering::Relaxed);
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Relaxed)
    }
}

impl Default for DoorTelemetry {
    fn default() -> Self {
        Self::new()
    }
}
