//! Browser session configuration types.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Browser session configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrowserConfig {
    /// Chrome remote debugging port.
    #[serde(default = "default_debug_port")]
    pub debug_port: u16,

    /// Launch Chrome when nothing listens on the debug port.
    #[serde(default = "default_launch")]
    pub launch: bool,

    /// Run a launched Chrome headless.
    #[serde(default = "default_headless")]
    pub headless: bool,

    /// Chrome executable; searched in well-known locations when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chrome_path: Option<PathBuf>,

    /// Profile directory for a launched Chrome.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_data_dir: Option<PathBuf>,

    #[serde(default = "default_window_width")]
    pub window_width: u32,

    #[serde(default = "default_window_height")]
    pub window_height: u32,

    /// Timeout for a single protocol request.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// How long to wait for a launched Chrome to accept connections.
    #[serde(default = "default_startup_timeout_secs")]
    pub startup_timeout_secs: u64,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            debug_port: default_debug_port(),
            launch: default_launch(),
            headless: default_headless(),
            chrome_path: None,
            user_data_dir: None,
            window_width: default_window_width(),
            window_height: default_window_height(),
            request_timeout_secs: default_request_timeout_secs(),
            startup_timeout_secs: default_startup_timeout_secs(),
        }
    }
}

impl BrowserConfig {
    /// HTTP endpoint of the debugging interface.
    pub fn endpoint(&self) -> String {
        format!("http://localhost:{}", self.debug_port)
    }
}

fn default_debug_port() -> u16 {
    9222
}

fn default_launch() -> bool {
    true
}

fn default_headless() -> bool {
    true
}

fn default_window_width() -> u32 {
    1600
}

fn default_window_height() -> u32 {
    900
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_startup_timeout_secs() -> u64 {
    15
}
