//! Per-build identifier and timestamp.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::config::EpubConfig;

/// Values minted once per build and shared by every document that needs them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildStamp {
    /// Book identifier embedded in both the package and navigation documents.
    pub identifier: String,
    /// `dcterms:modified` value.
    pub modified: String,
}

impl BuildStamp {
    /// Mint a stamp, honoring any identifier or timestamp pinned in `config`.
    pub fn mint(config: &EpubConfig) -> Self {
        let identifier = match &config.identifier {
            Some(id) => id.clone(),
            None => format!("urn:uuid:{}", Uuid::new_v4()),
        };
        let modified = format_modified(config.modified.unwrap_or_else(Utc::now));
        Self {
            identifier,
            modified,
        }
    }
}

/// Format a timestamp the way `dcterms:modified` requires (UTC, whole seconds).
pub fn format_modified(time: DateTime<Utc>) -> String {
    time.format("%Y-%m-%dT%H:%M:%SZ").to_string()
}
