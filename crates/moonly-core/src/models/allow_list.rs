use crate::domain::domains_match;
use serde::{Deserialize, Serialize};

/// One row of the allow-list repeater field in the host's options store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllowListEntry {
    pub domain_name: String,
}

impl AllowListEntry {
    pub fn new(domain_name: impl Into<String>) -> Self {
        Self {
            domain_name: domain_name.into(),
        }
    }
}

/// The set of client domains permitted to upload to or stream from the CDN.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllowList {
    entries: Vec<AllowListEntry>,
}

impl AllowList {
    pub fn new(entries: Vec<AllowListEntry>) -> Self {
        Self { entries }
    }

    /// Build from the raw repeater field value, e.g. `[{"domain_name": "viden.dk"}]`.
    ///
    /// Rows without a string `domain_name`, or with a blank one, are skipped.
    pub fn from_raw(raw: &serde_json::Value) -> Self {
        let entries = raw
            .as_array()
            .map(|rows| {
                rows.iter()
                    .filter_map(|row| row.get("domain_name").and_then(|v| v.as_str()))
                    .map(str::trim)
                    .filter(|name| !name.is_empty())
                    .map(AllowListEntry::new)
                    .collect()
            })
            .unwrap_or_default();
        Self { entries }
    }

    pub fn entries(&self) -> &[AllowListEntry] {
        &self.entries
    }

    pub fn domain_names(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.domain_name.clone()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Case-insensitive, trimmed, IDN-aware membership test.
    pub fn contains(&self, domain: &str) -> bool {
        self.entries
            .iter()
            .any(|entry| domains_match(&entry.domain_name, domain))
    }
}
