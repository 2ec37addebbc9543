//! Handing finished artifacts to wherever the user wants them saved.

use std::path::{Path, PathBuf};

use crate::build::Artifact;
use crate::error::{Error, Result};

/// Canonical EPUB file extension.
pub const EXTENSION: &str = "epub";

/// File name used when the title leaves nothing usable.
pub const FALLBACK_FILE_NAME: &str = "untitled.epub";

/// Longest file stem in bytes, leaving room for the extension within the
/// 255-byte name limit of common filesystems.
pub const MAX_STEM_BYTES: usize = 200;

/// A destination for finished books.
///
/// Delivery is a one-shot hand-off: the target reports whether it accepted
/// the bytes, not what the user later does with them.
pub trait Deliver {
    fn deliver(&self, artifact: &Artifact) -> Result<()>;
}

/// Saves artifacts into a directory under their suggested file name.
#[derive(Debug, Clone)]
pub struct DirectoryTarget {
    dir: PathBuf,
}

impl DirectoryTarget {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Where `artifact` will be written.
    pub fn path_for(&self, artifact: &Artifact) -> PathBuf {
        self.dir.join(&artifact.file_name)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl Deliver for DirectoryTarget {
    fn deliver(&self, artifact: &Artifact) -> Result<()> {
        let path = self.path_for(artifact);
        std::fs::write(&path, &artifact.bytes).map_err(Error::Delivery)?;
        tracing::info!(path = %path.display(), "delivered book");
        Ok(())
    }
}

/// Derive a file name from a book title.
///
/// Path separators, characters reserved on common filesystems and control
/// characters become `_`; surrounding whitespace and trailing dots are
/// dropped, and the stem is cut to [`MAX_STEM_BYTES`] on a character
/// boundary. An empty result falls back to [`FALLBACK_FILE_NAME`].
///
/// # Examples
///
/// ```
/// use quire::suggested_file_name;
///
/// assert_eq!(suggested_file_name("My Book"), "My Book.epub");
/// assert_eq!(suggested_file_name("AC/DC: Live"), "AC_DC_ Live.epub");
/// assert_eq!(suggested_file_name("   "), "untitled.epub");
/// ```
pub fn suggested_file_name(title: &str) -> String {
    let stem: String = title
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    let stem = truncate_to_boundary(stem.trim(), MAX_STEM_BYTES);
    let stem = stem.trim_end().trim_end_matches('.').trim_end();

    if stem.is_empty() {
        FALLBACK_FILE_NAME.to_string()
    } else {
        format!("{stem}.{EXTENSION}")
    }
}

fn truncate_to_boundary(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}
