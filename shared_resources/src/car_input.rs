use super::call::{CallHeading, Slot};

/// Events the input collaborators hand to the motion controller.
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Copy, PartialEq)]
pub enum CarInput {
    Call { slot: Slot, heading: CallHeading },
    EmergencyStop,
    SetMaxSpeed(f32),
    SetAcceleration(f32),
}
