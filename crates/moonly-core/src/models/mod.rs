//! Data models for the relay
//!
//! Each sub-module represents one piece of the attachment lifecycle: the
//! allow-list read from the host's options store, the transient upload request
//! and its result, the host-owned attachment record, and access decisions.

mod access;
mod allow_list;
mod attachment;
mod upload;

// Re-export all models for convenient imports
pub use access::*;
pub use allow_list::*;
pub use attachment::*;
pub use upload::*;
