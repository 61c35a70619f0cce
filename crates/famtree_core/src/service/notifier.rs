//! Fire-and-forget user notifications.

use log::info;
use std::cell::RefCell;

/// Receives success messages after user-visible mutations.
pub trait Notifier {
    fn notify(&self, message: &str);
}

/// Writes notifications to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, message: &str) {
        info!("event=notify module=service status=ok message={message:?}");
    }
}

/// Keeps every message in order, for front ends that print them later.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    messages: RefCell<Vec<String>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.borrow().clone()
    }

    /// Returns and clears pending messages.
    pub fn drain(&self) -> Vec<String> {
        self.messages.borrow_mut().drain(..).collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str) {
        self.messages.borrow_mut().push(message.to_string());
    }
}
