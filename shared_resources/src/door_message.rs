/// Commands understood by the door controller. Only the latest one matters,
/// they are posted on an overwrite channel.
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DoorCommand {
    OpenThenAutoClose,
    HoldOpen,
    Close,
}

/// Acknowledgments sent back by the door controller.
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DoorStatus {
    Closed,
}
