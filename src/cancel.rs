//! Cancellation of a running import.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Control messages the host UI may send while an import runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ControlMessage {
    /// Stop issuing host calls as soon as possible; keep what was created.
    Cancel,
}

/// Shared cancellation flag. Clones observe the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancelHandle {
    cancelled: Arc<AtomicBool>,
}

impl CancelHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Applies a control message received from the host.
    pub fn handle(&self, message: ControlMessage) {
        match message {
            ControlMessage::Cancel => self.cancel(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cancel_message_sets_shared_flag() {
        let handle = CancelHandle::new();
        let observer = handle.clone();
        let message: ControlMessage = serde_json::from_str(r#"{"type":"cancel"}"#).unwrap();
        assert!(!observer.is_cancelled());
        handle.handle(message);
        assert!(observer.is_cancelled());
    }
}
