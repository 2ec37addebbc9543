//! Error types for quire operations.

use std::io;

use thiserror::Error;

/// Errors that can occur while assembling, packaging or delivering a book.
#[derive(Error, Debug)]
pub enum Error {
    /// The book has no sections, or every section body is empty.
    #[error("book has no content: at least one section needs a non-empty body")]
    EmptyBook,

    /// A text field holds a character XML 1.0 cannot represent.
    #[error("{field}{} contains U+{:04X}, which cannot appear in an XML document", section_suffix(.index), code_point(.ch))]
    Encoding {
        field: &'static str,
        index: Option<usize>,
        ch: char,
    },

    /// A section body is not a well-formed XHTML fragment (trusted markup only).
    #[error("section {index} body is not well-formed markup: {reason}")]
    MalformedMarkup { index: usize, reason: String },

    /// No content documents reached the package document generator.
    #[error("package manifest would contain no content documents")]
    EmptyManifest,

    /// Two generated documents claimed the same archive path.
    #[error("duplicate archive entry: {0}")]
    DuplicateEntry(String),

    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("packaging failed: {0}")]
    Packaging(#[source] io::Error),

    #[error("build task failed: {0}")]
    BuildTask(String),

    #[error("delivery failed: {0}")]
    Delivery(#[source] io::Error),
}

fn section_suffix(index: &Option<usize>) -> String {
    match index {
        Some(i) => format!(" of section {i}"),
        None => String::new(),
    }
}

fn code_point(ch: &char) -> u32 {
    u32::from(*ch)
}

pub type Result<T> = std::result::Result<T, Error>;
