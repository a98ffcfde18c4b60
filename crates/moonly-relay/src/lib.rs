//! Moonly CDN relay
//!
//! The per-request pipeline that decides whether a staged video goes to the
//! CDN, the access gate used for playback, best-effort delete propagation, and
//! the adapters the host's media hooks call into.

pub mod allow_list;
pub mod authorizer;
pub mod hooks;
pub mod relay;
pub mod retry;

pub use allow_list::{
    allow_list_source, AllowListError, AllowListSource, JsonFileAllowList, StaticAllowList,
};
pub use authorizer::{authorizer_for, AllowListAuthorizer, DomainAuthorizer, RemoteAuthorizer};
pub use hooks::{
    AttachmentStore, MemoryAttachmentStore, UploadContext, UploadDescriptor, UploadOutcome,
};
pub use relay::CdnRelay;
pub use retry::RetryConfig;
