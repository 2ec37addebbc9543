//! EPUB document generation and packaging.
//!
//! Each generator is a pure function producing one [`GeneratedDocument`];
//! [`packager::package`] serializes them behind the mimetype marker.

pub mod container;
pub mod content;
pub mod ncx;
pub mod opf;
pub mod packager;

/// Content of the uncompressed `mimetype` entry.
pub const MIMETYPE: &str = "application/epub+zip";

pub const MIMETYPE_PATH: &str = "mimetype";
pub const CONTAINER_PATH: &str = "META-INF/container.xml";
pub const OPF_PATH: &str = "OEBPS/content.opf";
pub const NCX_PATH: &str = "OEBPS/toc.ncx";

/// Directory holding the package document and everything it references.
pub const CONTENT_DIR: &str = "OEBPS";

pub const XHTML_MEDIA_TYPE: &str = "application/xhtml+xml";
pub const NCX_MEDIA_TYPE: &str = "application/x-dtbncx+xml";
pub const OPF_MEDIA_TYPE: &str = "application/oebps-package+xml";
pub const CONTAINER_MEDIA_TYPE: &str = "application/xml";

/// Manifest id of the navigation document.
pub const NCX_ID: &str = "ncx";

/// A document produced by a build, ready to be written to the archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedDocument {
    /// Archive-relative path, unique within one archive.
    pub path: String,
    pub media_type: &'static str,
    pub data: Vec<u8>,
}

impl GeneratedDocument {
    pub fn new(path: impl Into<String>, media_type: &'static str, text: String) -> Self {
        Self {
            path: path.into(),
            media_type,
            data: text.into_bytes(),
        }
    }

    /// Path relative to the package document, as used by `href`/`src`.
    pub fn href(&self) -> &str {
        self.path
            .strip_prefix(CONTENT_DIR)
            .and_then(|p| p.strip_prefix('/'))
            .unwrap_or(&self.path)
    }
}

/// Manifest id of the section at `index`.
pub fn page_id(index: usize) -> String {
    format!("page{index}")
}

/// Href of the section at `index`, relative to the package document.
pub fn page_href(index: usize) -> String {
    format!("page{index}.xhtml")
}
