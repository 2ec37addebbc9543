//! Build configuration.

use chrono::{DateTime, Utc};

/// Default deflate level for every entry except the mimetype marker.
pub const DEFAULT_COMPRESSION_LEVEL: u32 = 6;

/// Default `dc:language` tag.
pub const DEFAULT_LANGUAGE: &str = "en";

/// How section bodies are embedded in content documents.
///
/// The policy applies to every section of a build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BodyPolicy {
    /// Bodies are plain text and always escaped.
    #[default]
    PlainText,
    /// Bodies are XHTML fragments from a trusted editor. They are checked for
    /// well-formedness and embedded verbatim; malformed bodies fail the build.
    TrustedMarkup,
}

/// Configuration for EPUB builds.
#[derive(Debug, Clone)]
pub struct EpubConfig {
    /// Compression level for deflate (0-9, default 6).
    pub compression_level: Option<u32>,
    /// Language tag written to the package metadata and content documents.
    pub language: String,
    pub body_policy: BodyPolicy,
    /// Fixed book identifier. When unset, every build mints a fresh
    /// `urn:uuid:` identifier.
    pub identifier: Option<String>,
    /// Fixed `dcterms:modified` timestamp. When unset, the build time is used.
    pub modified: Option<DateTime<Utc>>,
}

impl Default for EpubConfig {
    fn default() -> Self {
        Self {
            compression_level: None,
            language: DEFAULT_LANGUAGE.to_string(),
            body_policy: BodyPolicy::default(),
            identifier: None,
            modified: None,
        }
    }
}

impl EpubConfig {
    pub fn with_body_policy(mut self, policy: BodyPolicy) -> Self {
        self.body_policy = policy;
        self
    }

    pub fn with_compression_level(mut self, level: u32) -> Self {
        self.compression_level = Some(level.min(9));
        self
    }

    pub fn with_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = Some(identifier.into());
        self
    }

    pub fn with_modified(mut self, modified: DateTime<Utc>) -> Self {
        self.modified = Some(modified);
        self
    }
}
