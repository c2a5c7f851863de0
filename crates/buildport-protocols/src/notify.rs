//! Import progress notification protocol.

use tokio::sync::mpsc;

use crate::types::Build;

/// Receives progress for an import.
///
/// `completed` is called exactly once per import, on every exit path.
pub trait NotificationSink: Send + Sync {
    /// Progress message for a build.
    fn status_update(&self, build: &Build, message: &str);

    /// The import finished, successfully or not.
    fn completed(&self);

    /// A fatal error occurred.
    fn error_occurred(&self, message: &str);
}

/// Notification as a value, for channel-based consumers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportEvent {
    Status {
        build_id: String,
        build_name: String,
        message: String,
    },
    Error(String),
    Completed,
}

/// Forwards notifications into an unbounded channel.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: mpsc::UnboundedSender<ImportEvent>,
}

impl ChannelSink {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<ImportEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl NotificationSink for ChannelSink {
    fn status_update(&self, build: &Build, message: &str) {
        let _ = self.tx.send(ImportEvent::Status {
            build_id: build.id.clone(),
            build_name: build.name.clone(),
            message: message.to_string(),
        });
    }

    fn completed(&self) {
        let _ = self.tx.send(ImportEvent::Completed);
    }

    fn error_occurred(&self, message: &str) {
        let _ = self.tx.send(ImportEvent::Error(message.to_string()));
    }
}
