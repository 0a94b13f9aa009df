//! Tokio-backed implementation of [`ControlChannel`].

use tapcast_core::protocol::ControlMessage;
use tokio::sync::mpsc;

use crate::ports::ControlChannel;

/// Bounded control channel over a tokio mpsc sender.
///
/// `push` maps to `try_send`, so a full or closed channel fails immediately
/// without blocking the dispatch thread; the draining side runs on the
/// async runtime.
pub struct BoundedControlChannel {
    tx: mpsc::Sender<ControlMessage>,
}

impl BoundedControlChannel {
    /// Creates a channel with the given capacity and returns the sending
    /// half together with the receiver for the drain task.
    pub fn new(capacity: usize) -> (Self, mpsc::Receiver<ControlMessage>) {
        let (tx, rx) = mpsc::channel(capacity);
        (Self { tx }, rx)
    }
}

impl ControlChannel for BoundedControlChannel {
    fn push(&self, msg: ControlMessage) -> bool {
        self.tx.try_send(msg).is_ok()
    }
}
