//! Error types for the buildport protocol layer.

mod catalog;
mod page;

pub use catalog::*;
pub use page::*;
