//! Page sessions over one shared Chrome connection.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use buildport_config::BrowserConfig;
use buildport_protocols::{PageDriver, PageError, PageSessionFactory};
use tokio::process::Child;
use tokio::sync::Mutex;
use tracing::info;

use crate::cdp::{CdpClient, CdpError};
use crate::driver::CdpPageDriver;
use crate::launcher;

/// Opens a fresh tab per session.
///
/// Connects to Chrome on the configured debug port, launching it first when
/// nothing answers and launching is enabled.
pub struct CdpSessionFactory {
    config: BrowserConfig,
    client: Mutex<Option<Arc<CdpClient>>>,
    /// Chrome process handle (if we launched it).
    chrome: Mutex<Option<Child>>,
}

impl CdpSessionFactory {
    pub fn new(config: BrowserConfig) -> Self {
        Self {
            config,
            client: Mutex::new(None),
            chrome: Mutex::new(None),
        }
    }

    /// Connected client, reconnecting if the browser socket dropped.
    async fn client(&self) -> Result<Arc<CdpClient>, CdpError> {
        let mut slot = self.client.lock().await;
        if let Some(client) = slot.as_ref() {
            if client.is_connected() {
                return Ok(client.clone());
            }
        }

        if !launcher::is_running(&self.config).await {
            if !self.config.launch {
                return Err(CdpError::ChromeNotAvailable(self.config.endpoint()));
            }
            info!("Chrome not running on port {}, launching...", self.config.debug_port);
            let child = launcher::launch(&self.config).await?;
            *self.chrome.lock().await = Some(child);
        } else {
            info!("Using Chrome on port {}", self.config.debug_port);
        }

        let timeout = Duration::from_secs(self.config.request_timeout_secs);
        let client = Arc::new(CdpClient::connect(&self.config.endpoint(), timeout).await?);
        *slot = Some(client.clone());
        Ok(client)
    }

    /// Drop the connection and stop Chrome if this factory launched it.
    pub async fn shutdown(&self) {
        self.client.lock().await.take();
        if let Some(mut child) = self.chrome.lock().await.take() {
            info!("Shutting down Chrome...");
            let _ = child.kill().await;
        }
    }
}

#[async_trait]
impl PageSessionFactory for CdpSessionFactory {
    async fn open(&self) -> Result<Box<dyn PageDriver>, PageError> {
        let client = self.client().await?;
        let session = client.new_page().await?;
        Ok(Box::new(CdpPageDriver::new(client, session)))
    }
}
