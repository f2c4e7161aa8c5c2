use shared_resources::call::{CallDirection, Slot};
use shared_resources::config::CarConfig;
use shared_resources::request::RequestTable;
use shared_resources::status_event::StatusEvent;

use crate::utilities::lamps::DirectionLamps;
use crate::utilities::requests;

/// Position and motion of the car, owned by the motion controller.
#[derive(Debug, Clone, PartialEq)]
pub struct Car {
    pub position: f32,
    pub speed: f32,
    pub max_speed: f32,
    pub acceleration: f32,
    pub going_up: bool,
    /// Direction of the current acceleration phase. Differs from `going_up`
    /// while the car is slowing down.
    pub accel_up: bool,
    pub emergency_stop: bool,
    pub destination: Slot,
}

fn signed(up: bool, value: f32) -> f32 {
    if up {
        value
    } else {
        -value
    }
}

impl Car {
    pub fn new(car_config: &CarConfig) -> Self {
        Car {
            position: 0.0,
            speed: 0.0,
            max_speed: car_config.max_speed,
            acceleration: car_config.acceleration,
            going_up: true,
            accel_up: true,
            emergency_stop: false,
            destination: Slot::Ground,
        }
    }

    pub fn has_arrived(&self, requests: &RequestTable) -> bool {
        self.position == requests.feet(self.destination)
    }

    pub fn is_moving(&self, requests: &RequestTable) -> bool {
        !(self.has_arrived(requests) && self.speed == 0.0)
    }

    pub fn direction_lamps(&self) -> DirectionLamps {
        DirectionLamps::from_going_up(self.going_up)
    }

    /// Chooses where to go next. Only meaningful while standing still.
    /// Returns `false` if there is nowhere to go.
    pub fn update_destination(&mut self, requests: &mut RequestTable) -> bool {
        let here = requests.stop_at(self.position);
        match here {
            Some(Slot::Ground) => self.going_up = true,
            Some(Slot::Mid) => match requests.get(Slot::Mid).direction {
                CallDirection::Up => self.going_up = true,
                CallDirection::Down => self.going_up = false,
                CallDirection::Either => {}
            },
            Some(Slot::Top) => self.going_up = false,
            _ => {}
        }

        if self.emergency_stop {
            self.destination = Slot::Ground;
            requests.clear_request(Slot::Ground);
            self.going_up = false;
            return true;
        }

        let Some(at) = here else {
            return false;
        };
        match requests::scan(requests, at, self.going_up) {
            Some(pick) => {
                self.destination = pick.slot;
                self.going_up = pick.going_up;
                true
            }
            None => false,
        }
    }

    pub fn begin_trip(&mut self) {
        self.accel_up = self.going_up;
    }

    /// Advances the car by one control tick towards its destination.
    pub fn tick(&mut self, requests: &mut RequestTable) -> StatusEvent {
        if self.emergency_stop {
            self.retarget_for_emergency(requests);
        }

        self.position += signed(self.going_up, self.speed / 2.0);

        let delta = self.acceleration / 2.0;
        self.speed += if self.accel_up == self.going_up { delta } else { -delta };
        self.speed = self.speed.clamp(0.0, self.max_speed);

        // curvature of the half step, zero once at cruising speed
        if self.speed != self.max_speed {
            self.position += signed(self.accel_up, 0.125 * self.acceleration);
        }

        let target = requests.feet(self.destination);
        let remaining = signed(self.going_up, target - self.position);
        let decel_speed = (2.0 * self.acceleration * remaining.max(0.0)).sqrt();
        if self.speed >= decel_speed {
            if self.accel_up == self.going_up {
                self.accel_up = !self.accel_up;
            }
            self.speed = decel_speed;
        }

        let crossed = if self.going_up {
            self.position >= target
        } else {
            self.position <= target
        };
        if self.speed <= 0.0 || crossed {
            self.speed = 0.0;
            self.position = target;
        }

        StatusEvent::Position {
            feet: self.position,
            speed: self.speed,
        }
    }

    /// The car cannot reverse on the spot: going up it stops as soon as
    /// physically possible, going down it just heads for the ground stop.
    fn retarget_for_emergency(&mut self, requests: &mut RequestTable) {
        if self.going_up {
            let stopping_distance = self.speed * self.speed / (2.0 * self.acceleration);
            requests.set_emergency_point(self.position + stopping_distance);
            self.destination = Slot::Emergency;
        } else {
            self.destination = Slot::Ground;
            self.accel_up = self.going_up;
        }
    }
}
