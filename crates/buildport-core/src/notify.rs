//! Notification sink that writes to the log.

use buildport_protocols::{Build, NotificationSink};
use tracing::{debug, error, info};

/// Logs import progress through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl NotificationSink for TracingSink {
    fn status_update(&self, build: &Build, message: &str) {
        if build.name.is_empty() {
            info!(build_id = %build.id, "{}", message);
        } else {
            info!(build_id = %build.id, build = %build.name, "{}", message);
        }
    }

    fn completed(&self) {
        debug!("Import completed");
    }

    fn error_occurred(&self, message: &str) {
        error!("{}", message);
    }
}
