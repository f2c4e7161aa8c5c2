use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};

/// Sending half of a single-slot channel where a new message replaces one
/// that has not been picked up yet. Receivers are plain crossbeam receivers.
#[derive(Debug)]
pub struct OverwriteSender<T> {
    tx: Sender<T>,
    slot: Receiver<T>,
}

impl<T> Clone for OverwriteSender<T> {
    fn clone(&self) -> Self {
        OverwriteSender {
            tx: self.tx.clone(),
            slot: self.slot.clone(),
        }
    }
}

pub fn overwrite_channel<T>() -> (OverwriteSender<T>, Receiver<T>) {
    let (tx, rx) = bounded(1);
    (OverwriteSender { tx: tx, slot: rx.clone() }, rx)
}

impl<T> OverwriteSender<T> {
    pub fn post(&self, msg: T) {
        let mut msg = msg;
        loop {
            match self.tx.try_send(msg) {
                Ok(()) => return,
                Err(TrySendError::Full(unsent)) => {
                    // evict whatever is waiting and try again
                    let _ = self.slot.try_recv();
                    msg = unsent;
                }
                // unreachable while `slot` is alive, nothing to deliver to anyway
                Err(TrySendError::Disconnected(_)) => return,
            }
        }
    }
}

/// Throws away anything waiting on `rx` without blocking.
pub fn discard_pending<T>(rx: &Receiver<T>) {
    while rx.try_recv().is_ok() {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latest_message_wins() {
        let (tx, rx) = overwrite_channel();
        tx.post(1);
        tx.post(2);
        tx.clone().post(3);
        assert_eq!(rx.try_recv(), Ok(3));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn discarding_empties_the_slot() {
        let (tx, rx) = overwrite_channel();
        tx.post("stale");
        discard_pending(&rx);
        assert!(rx.is_empty());
        tx.post("fresh");
        assert_eq!(rx.recv(), Ok("fresh"));
    }
}
