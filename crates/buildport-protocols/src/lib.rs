//! # buildport Protocols
//!
//! Data model and protocol definitions (traits) shared by the buildport crates.
//! Contains only interface definitions - no implementations.
//!
//! ## Core Traits
//!
//! - [`PageDriver`] - Page-interaction capability used by the extractor
//! - [`PageSessionFactory`] - Opens page sessions for one import at a time
//! - [`NotificationSink`] - Receives import progress and completion
//! - [`BuildCatalog`] - Persists and enumerates imported builds

pub mod catalog;
pub mod error;
pub mod notify;
pub mod page;
pub mod types;

pub use catalog::BuildCatalog;
pub use error::{CatalogError, PageError};
pub use notify::{ChannelSink, ImportEvent, NotificationSink};
pub use page::{ElementHandle, PageDriver, PageSessionFactory, Selector, SelectorKind};
pub use types::*;
