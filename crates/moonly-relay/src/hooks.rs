//! Host hook adapters
//!
//! Each function corresponds to one media event in the host CMS. The upload
//! hook hands an [`UploadContext`] back to its caller, which passes it on to
//! the attachment-created hook for the same upload.

use crate::relay::CdnRelay;
use async_trait::async_trait;
use moonly_core::{
    size_format, AttachmentRecord, ErrorMetadata, RelayError, UploadRequest, UploadResult,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::path::PathBuf;
use tokio::sync::RwLock;
use tracing::{debug, warn};

/// The host's attachment metadata store.
#[async_trait]
pub trait AttachmentStore: Send + Sync {
    /// Stored location: an uploads-relative path or a CDN URL.
    async fn attached_file(&self, id: u64) -> anyhow::Result<Option<String>>;

    async fn set_attached_file(&self, id: u64, location: &str) -> anyhow::Result<()>;

    async fn filesize(&self, id: u64) -> anyhow::Result<Option<u64>>;

    async fn set_filesize(&self, id: u64, size_bytes: u64) -> anyhow::Result<()>;
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct StoredAttachment {
    attached_file: Option<String>,
    filesize: Option<u64>,
}

/// In-process store, for embedding hosts without their own metadata table.
#[derive(Debug, Default)]
pub struct MemoryAttachmentStore {
    attachments: RwLock<HashMap<u64, StoredAttachment>>,
}

impl MemoryAttachmentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AttachmentStore for MemoryAttachmentStore {
    async fn attached_file(&self, id: u64) -> anyhow::Result<Option<String>> {
        let attachments = self.attachments.read().await;
        Ok(attachments.get(&id).and_then(|a| a.attached_file.clone()))
    }

    async fn set_attached_file(&self, id: u64, location: &str) -> anyhow::Result<()> {
        let mut attachments = self.attachments.write().await;
        attachments.entry(id).or_default().attached_file = Some(location.to_string());
        Ok(())
    }

    async fn filesize(&self, id: u64) -> anyhow::Result<Option<u64>> {
        let attachments = self.attachments.read().await;
        Ok(attachments.get(&id).and_then(|a| a.filesize))
    }

    async fn set_filesize(&self, id: u64, size_bytes: u64) -> anyhow::Result<()> {
        let mut attachments = self.attachments.write().await;
        attachments.entry(id).or_default().filesize = Some(size_bytes);
        Ok(())
    }
}

/// What the upload hook learned, carried to the attachment-created hook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadContext {
    pub remote_url: String,
    pub size_bytes: u64,
}

/// The host's description of a freshly handled upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadDescriptor {
    pub file: PathBuf,
    pub url: String,
    #[serde(rename = "type", default)]
    pub mime_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadOutcome {
    /// Leave the upload as the host produced it.
    PassThrough(UploadDescriptor),
    /// The video now lives on the CDN; `descriptor.url` points there.
    Rewritten {
        descriptor: UploadDescriptor,
        context: UploadContext,
    },
    /// The host should fail the upload and show `message`.
    Rejected { reason: RelayError, message: String },
}

/// Upload-intercept hook.
pub async fn on_upload(
    relay: &CdnRelay,
    descriptor: UploadDescriptor,
    site: &str,
) -> UploadOutcome {
    let request = UploadRequest {
        local_path: descriptor.file.clone(),
        mime_type: descriptor.mime_type.clone(),
        client_domain: site.to_string(),
        size_bytes: 0,
    };

    match relay.validate_and_upload(&request).await {
        UploadResult::PassThrough => UploadOutcome::PassThrough(descriptor),
        UploadResult::Accepted {
            remote_url,
            size_bytes,
        } => UploadOutcome::Rewritten {
            descriptor: UploadDescriptor {
                url: remote_url.clone(),
                ..descriptor
            },
            context: UploadContext {
                remote_url,
                size_bytes,
            },
        },
        UploadResult::Rejected { reason } => UploadOutcome::Rejected {
            message: reason.client_message(),
            reason,
        },
    }
}

/// Attachment-created hook: commit the upload's CDN location and size.
pub async fn on_attachment_created(
    store: &dyn AttachmentStore,
    attachment_id: u64,
    context: Option<&UploadContext>,
) -> anyhow::Result<()> {
    let Some(context) = context else {
        return Ok(());
    };

    store
        .set_attached_file(attachment_id, &context.remote_url)
        .await?;
    if context.size_bytes > 0 {
        store.set_filesize(attachment_id, context.size_bytes).await?;
    }
    debug!(
        attachment_id = attachment_id,
        remote_url = %context.remote_url,
        size_bytes = context.size_bytes,
        "Attachment linked to CDN video"
    );
    Ok(())
}

/// Attachment-deleted hook. Only CDN-hosted videos are propagated.
pub async fn on_attachment_deleted(
    relay: &CdnRelay,
    store: &dyn AttachmentStore,
    attachment_id: u64,
) {
    let location = match store.attached_file(attachment_id).await {
        Ok(Some(location)) => location,
        Ok(None) => return,
        Err(e) => {
            warn!(attachment_id = attachment_id, error = %e, "Could not read attachment location");
            return;
        }
    };

    if !relay.is_cdn_url(&location) {
        return;
    }
    relay.propagate_delete(&location).await;
}

/// Attachment-URL-resolution hook.
pub async fn resolve_attachment_url(
    relay: &CdnRelay,
    store: &dyn AttachmentStore,
    attachment_id: u64,
    local_url: &str,
    client_domain: Option<&str>,
) -> String {
    let attached_file_url = match store.attached_file(attachment_id).await {
        Ok(location) => location.unwrap_or_default(),
        Err(e) => {
            warn!(attachment_id = attachment_id, error = %e, "Could not read attachment location");
            return local_url.to_string();
        }
    };

    let record = AttachmentRecord {
        id: attachment_id,
        attached_file_url,
        local_url: local_url.to_string(),
        filesize: store.filesize(attachment_id).await.ok().flatten(),
    };
    relay.resolve_serving_url(&record, client_domain).await
}

/// Attachment-JSON-serialization hook: expose the stored CDN size to the
/// media library.
pub async fn prepare_attachment_json(
    store: &dyn AttachmentStore,
    attachment_id: u64,
    response: &mut Map<String, Value>,
) {
    let filesize = match store.filesize(attachment_id).await {
        Ok(Some(size)) if size > 0 => size,
        Ok(_) => return,
        Err(e) => {
            warn!(attachment_id = attachment_id, error = %e, "Could not read attachment size");
            return;
        }
    };

    response.insert(
        "filesizeHumanReadable".to_string(),
        Value::String(size_format(filesize)),
    );
    response.insert("filesizeInBytes".to_string(), Value::from(filesize));
}
