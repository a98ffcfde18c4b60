use serde::{Deserialize, Serialize};

/// The host's media record, as far as the relay needs to see it.
///
/// `attached_file_url` is the stored location: a path relative to the host's
/// uploads directory for local files, or the CDN URL once a video has been
/// relayed. `local_url` is the URL the host itself would serve.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentRecord {
    pub id: u64,
    pub attached_file_url: String,
    #[serde(default)]
    pub local_url: String,
    #[serde(default)]
    pub filesize: Option<u64>,
}

impl AttachmentRecord {
    /// Whether the stored location points at a remote (https) URL.
    pub fn is_remote(&self) -> bool {
        self.attached_file_url.starts_with("https://")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn is_remote_requires_https() {
        let mut record = AttachmentRecord {
            id: 7,
            attached_file_url: "https://moonlycdn.com/v/abc.mp4".to_string(),
            local_url: "https://viden.dk/wp-content/uploads/clip.mp4".to_string(),
            filesize: None,
        };
        assert!(record.is_remote());

        record.attached_file_url = "2024/05/clip.mp4".to_string();
        assert!(!record.is_remote());

        record.attached_file_url = "http://moonlycdn.com/v/abc.mp4".to_string();
        assert!(!record.is_remote());
    }
}
