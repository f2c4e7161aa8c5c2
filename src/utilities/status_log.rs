use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use log::trace;

use shared_resources::status_event::StatusEvent;

/// Producer side of the status line queue. Logging never blocks: when the
/// queue is full the event is dropped.
#[derive(Debug, Clone)]
pub struct StatusLog {
    tx: Sender<StatusEvent>,
}

pub fn status_log(capacity: usize) -> (StatusLog, Receiver<StatusEvent>) {
    let (tx, rx) = bounded(capacity);
    (StatusLog { tx: tx }, rx)
}

impl StatusLog {
    pub fn log(&self, event: StatusEvent) {
        match self.tx.try_send(event) {
            Ok(()) => {}
            Err(TrySendError::Full(event)) => trace!("status log full, dropping \"{}\"", event),
            Err(TrySendError::Disconnected(_)) => {}
        }
    }
}
