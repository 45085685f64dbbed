//! Explicit change notification for view state.
//!
//! Each state container owns a [`ChangeNotifier`] and bumps it after every
//! mutation. Views hold a `watch::Receiver` and re-render when it changes;
//! they read the new state from the container itself.

use tokio::sync::watch;

/// Monotonic revision counter shared with subscribers.
#[derive(Debug)]
pub struct ChangeNotifier {
    tx: watch::Sender<u64>,
}

impl ChangeNotifier {
    #[must_use]
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(0);
        Self { tx }
    }

    /// Subscribe to future changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.tx.subscribe()
    }

    /// Current revision.
    #[must_use]
    pub fn revision(&self) -> u64 {
        *self.tx.borrow()
    }

    /// Record a change and wake subscribers.
    pub fn notify(&self) {
        // send_modify updates the value even with no receivers alive
        self.tx.send_modify(|rev| *rev = rev.wrapping_add(1));
    }
}

impl Default for ChangeNotifier {
    fn default() -> Self {
        Self::new()
    }
}

/// A boolean that subscribers can wait on, such as "a request is in flight".
#[derive(Debug)]
pub struct PendingFlag {
    tx: watch::Sender<bool>,
}

impl PendingFlag {
    #[must_use]
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx }
    }

    #[must_use]
    pub fn watch(&self) -> watch::Receiver<bool> {
        self.tx.subscribe()
    }

    #[must_use]
    pub fn is_set(&self) -> bool {
        *self.tx.borrow()
    }

    /// Update the flag. Subscribers are only woken when the value changes.
    pub fn set(&self, pending: bool) {
        self.tx.send_if_modified(|current| {
            let changed = *current != pending;
            *current = pending;
            changed
        });
    }
}

impl Default for PendingFlag {
    fn default() -> Self {
        Self::new()
    }
}
