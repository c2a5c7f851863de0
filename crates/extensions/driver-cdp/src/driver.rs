//! [`PageDriver`] backed by a CDP page session.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use buildport_protocols::{ElementHandle, PageDriver, PageError, Selector};
use serde_json::Value;
use tokio::time::Instant;
use tracing::{debug, trace};

use crate::cdp::{CdpClient, PageSession};
use crate::script::{ElementOp, element_script, find_script, parse_ids, parse_value};

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// One browser tab driven through CDP.
pub struct CdpPageDriver {
    client: Arc<CdpClient>,
    session: PageSession,
    implicit_wait_ms: AtomicU64,
    closed: AtomicBool,
}

impl CdpPageDriver {
    pub fn new(client: Arc<CdpClient>, session: PageSession) -> Self {
        Self {
            client,
            session,
            implicit_wait_ms: AtomicU64::new(0),
            closed: AtomicBool::new(false),
        }
    }

    async fn run(&self, script: &str) -> Result<Value, PageError> {
        if self.closed.load(Ordering::SeqCst) {
            return Err(PageError::Closed);
        }
        Ok(self.session.evaluate(script).await?)
    }

    async fn on_element(&self, element: &ElementHandle, op: ElementOp) -> Result<Value, PageError> {
        let result = self.run(&element_script(element.0, op)).await?;
        parse_value(result)
    }
}

#[async_trait]
impl PageDriver for CdpPageDriver {
    async fn navigate(&self, url: &str) -> Result<(), PageError> {
        if self.closed.load(Ordering::SeqCst) {
            return Err(PageError::Closed);
        }
        Ok(self.session.navigate(url).await?)
    }

    async fn find_elements(
        &self,
        scope: Option<&ElementHandle>,
        selector: &Selector,
    ) -> Result<Vec<ElementHandle>, PageError> {
        let script = find_script(scope.map(|s| s.0), selector);
        let deadline = Instant::now() + self.implicit_wait();

        loop {
            let ids = parse_ids(&self.run(&script).await?, selector)?;
            let now = Instant::now();
            if !ids.is_empty() || now >= deadline {
                trace!("{} matched {} elements", selector, ids.len());
                return Ok(ids.into_iter().map(ElementHandle).collect());
            }
            tokio::time::sleep(POLL_INTERVAL.min(deadline - now)).await;
        }
    }

    async fn click(&self, element: &ElementHandle) -> Result<(), PageError> {
        self.on_element(element, ElementOp::Click).await?;
        Ok(())
    }

    async fn read_text(&self, element: &ElementHandle) -> Result<String, PageError> {
        let value = self.on_element(element, ElementOp::Text).await?;
        Ok(value.as_str().unwrap_or_default().to_string())
    }

    async fn is_displayed(&self, element: &ElementHandle) -> Result<bool, PageError> {
        let value = self.on_element(element, ElementOp::Displayed).await?;
        Ok(value.as_bool().unwrap_or(false))
    }

    fn implicit_wait(&self) -> Duration {
        Duration::from_millis(self.implicit_wait_ms.load(Ordering::SeqCst))
    }

    fn set_implicit_wait(&self, wait: Duration) {
        let ms = u64::try_from(wait.as_millis()).unwrap_or(u64::MAX);
        self.implicit_wait_ms.store(ms, Ordering::SeqCst);
    }

    async fn close(&self) -> Result<(), PageError> {
        if self.closed.swap(true, Ordering::SeqCst) {
            return Ok(());
        }
        debug!("Closing page {}", self.session.target_id());
        Ok(self.client.close_page(self.session.target_id()).await?)
    }
}
