//! Page-interaction protocol definitions.
//!
//! The extractor only talks to a page through [`PageDriver`], so the
//! browser backend can be swapped (CDP, a scripted fake in tests) without
//! touching extraction logic.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::PageError;

/// How a selector string is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SelectorKind {
    Css,
    XPath,
    Tag,
    Id,
    Class,
}

impl SelectorKind {
    fn prefix(&self) -> &'static str {
        match self {
            SelectorKind::Css => "css",
            SelectorKind::XPath => "xpath",
            SelectorKind::Tag => "tag",
            SelectorKind::Id => "id",
            SelectorKind::Class => "class",
        }
    }
}

/// Element lookup expression, written as `kind:value` in configuration
/// (for example `tag:main` or `xpath:./div[./span]`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Selector {
    kind: SelectorKind,
    value: String,
}

impl Selector {
    pub fn new(kind: SelectorKind, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }

    pub fn css(value: impl Into<String>) -> Self {
        Self::new(SelectorKind::Css, value)
    }

    pub fn xpath(value: impl Into<String>) -> Self {
        Self::new(SelectorKind::XPath, value)
    }

    pub fn tag(value: impl Into<String>) -> Self {
        Self::new(SelectorKind::Tag, value)
    }

    pub fn id(value: impl Into<String>) -> Self {
        Self::new(SelectorKind::Id, value)
    }

    pub fn class(value: impl Into<String>) -> Self {
        Self::new(SelectorKind::Class, value)
    }

    pub fn kind(&self) -> SelectorKind {
        self.kind
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Substitute `{name}` in the selector value.
    pub fn with_placeholder(&self, name: &str, replacement: &str) -> Selector {
        Selector {
            kind: self.kind,
            value: self.value.replace(&format!("{{{}}}", name), replacement),
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind.prefix(), self.value)
    }
}

impl FromStr for Selector {
    type Err = PageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (prefix, value) = s
            .split_once(':')
            .ok_or_else(|| PageError::InvalidSelector(s.to_string()))?;
        let kind = match prefix.trim().to_ascii_lowercase().as_str() {
            "css" => SelectorKind::Css,
            "xpath" => SelectorKind::XPath,
            "tag" => SelectorKind::Tag,
            "id" => SelectorKind::Id,
            "class" => SelectorKind::Class,
            _ => return Err(PageError::InvalidSelector(s.to_string())),
        };
        if value.trim().is_empty() {
            return Err(PageError::InvalidSelector(s.to_string()));
        }
        Ok(Selector::new(kind, value))
    }
}

impl TryFrom<String> for Selector {
    type Error = PageError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Selector> for String {
    fn from(selector: Selector) -> Self {
        selector.to_string()
    }
}

/// Opaque reference to an element on the current page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementHandle(pub u64);

/// Page-interaction capability.
///
/// Lookups honor the implicit wait: a driver may keep polling for up to
/// [`PageDriver::implicit_wait`] before returning an empty result.
#[async_trait]
pub trait PageDriver: Send + Sync {
    /// Load a URL and wait for the document to be ready.
    async fn navigate(&self, url: &str) -> Result<(), PageError>;

    /// Find all elements matching `selector` below `scope` (document if `None`).
    async fn find_elements(
        &self,
        scope: Option<&ElementHandle>,
        selector: &Selector,
    ) -> Result<Vec<ElementHandle>, PageError>;

    /// Find the first element matching `selector`.
    async fn find_element(
        &self,
        scope: Option<&ElementHandle>,
        selector: &Selector,
    ) -> Result<ElementHandle, PageError> {
        self.find_elements(scope, selector)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| PageError::ElementNotFound(selector.to_string()))
    }

    /// Click an element.
    async fn click(&self, element: &ElementHandle) -> Result<(), PageError>;

    /// Visible text of an element, lines separated by `\n`.
    async fn read_text(&self, element: &ElementHandle) -> Result<String, PageError>;

    /// Whether an element is rendered and visible.
    async fn is_displayed(&self, element: &ElementHandle) -> Result<bool, PageError>;

    /// Current implicit wait for lookups.
    fn implicit_wait(&self) -> Duration;

    /// Change the implicit wait for lookups.
    fn set_implicit_wait(&self, wait: Duration);

    /// Poll until an element matching `selector` is displayed or `timeout` elapses.
    async fn wait_until_displayed(
        &self,
        selector: &Selector,
        timeout: Duration,
        poll_interval: Duration,
    ) -> Result<Option<ElementHandle>, PageError> {
        let deadline = tokio::time::Instant::now() + timeout;
        loop {
            for element in self.find_elements(None, selector).await? {
                if self.is_displayed(&element).await? {
                    return Ok(Some(element));
                }
            }

            if tokio::time::Instant::now() >= deadline {
                return Ok(None);
            }

            tokio::time::sleep(poll_interval).await;
        }
    }

    /// Release the session. Further calls fail with [`PageError::Closed`].
    async fn close(&self) -> Result<(), PageError>;
}

/// Opens page sessions; each import owns its session exclusively.
#[async_trait]
pub trait PageSessionFactory: Send + Sync {
    async fn open(&self) -> Result<Box<dyn PageDriver>, PageError>;
}

#[cfg(test)]
#[path = "page_tests.rs"]
mod tests;
