//! Chrome DevTools Protocol (CDP) client.
//!
//! Connects to Chrome over the WebSocket advertised by `/json/version` and
//! speaks CDP's JSON-RPC. Page sessions use flattened target attachment, so
//! every session shares the browser socket.

mod client;
mod error;
mod protocol;
mod session;

pub use client::CdpClient;
pub use error::CdpError;
pub use protocol::*;
pub use session::PageSession;
