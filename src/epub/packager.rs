//! Serialize generated documents into an EPUB (ZIP) container.

use std::collections::HashSet;
use std::io::{Cursor, Write};

use zip::CompressionMethod;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use super::{GeneratedDocument, MIMETYPE, MIMETYPE_PATH};
use crate::error::{Error, Result};

/// Write the mimetype marker followed by `documents` into a new archive.
///
/// The marker is the first entry, stored uncompressed with no trailing
/// newline. Documents follow in the given order, deflated at
/// `compression_level`. Any failure discards the whole archive.
pub fn package(documents: &[GeneratedDocument], compression_level: u32) -> Result<Vec<u8>> {
    let mut seen = HashSet::with_capacity(documents.len() + 1);
    seen.insert(MIMETYPE_PATH);
    for doc in documents {
        if !seen.insert(doc.path.as_str()) {
            return Err(Error::DuplicateEntry(doc.path.clone()));
        }
    }

    let stored = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
    let deflated = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .compression_level(Some(i64::from(compression_level.min(9))));

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));

    // Must be first and uncompressed so readers can sniff the format.
    zip.start_file(MIMETYPE_PATH, stored)?;
    zip.write_all(MIMETYPE.as_bytes()).map_err(Error::Packaging)?;

    for doc in documents {
        tracing::debug!(path = %doc.path, bytes = doc.data.len(), "writing archive entry");
        zip.start_file(doc.path.as_str(), deflated)?;
        zip.write_all(&doc.data).map_err(Error::Packaging)?;
    }

    let cursor = zip.finish()?;
    Ok(cursor.into_inner())
}
