//! # buildport Driver: CDP
//!
//! Page driver over the Chrome DevTools Protocol.
//!
//! [`CdpSessionFactory`] connects to (or launches) Chrome and opens one tab
//! per import; each tab is driven by a [`CdpPageDriver`], which resolves
//! selectors and runs element operations through in-page scripts.

pub mod cdp;
pub mod driver;
pub mod factory;
pub mod launcher;
mod script;

pub use cdp::{CdpClient, CdpError, PageSession};
pub use driver::CdpPageDriver;
pub use factory::CdpSessionFactory;
