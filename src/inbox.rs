//! Inbox queue - the FIFO carrying expression requests from the transport
//! thread to the playback state machine.
//!
//! One producer (the transport), one consumer (the render thread). Pushes
//! never block and never fail; popping is always non-blocking so a silent
//! transport can never stall animation.

use crossbeam::channel::{unbounded, Receiver, Sender};

/// Create a connected sender/receiver pair.
pub fn inbox() -> (InboxSender, Inbox) {
    let (tx, rx) = unbounded();
    (InboxSender { tx }, Inbox { rx })
}

/// Producer half, held by the transport thread.
#[derive(Debug, Clone)]
pub struct InboxSender {
    tx: Sender<String>,
}

impl InboxSender {
    /// Queue an expression request. Never blocks; if the consumer is gone
    /// the request is silently dropped.
    pub fn push(&self, name: impl Into<String>) {
        let _ = self.tx.send(name.into());
    }
}

/// Consumer half, owned by the playback state machine.
#[derive(Debug)]
pub struct Inbox {
    rx: Receiver<String>,
}

impl Inbox {
    /// Take the oldest pending request, or `None` immediately if the queue
    /// is empty.
    pub fn try_pop(&self) -> Option<String> {
        self.rx.try_recv().ok()
    }
}
