//! `META-INF/container.xml`, the pointer to the package document.

use super::{CONTAINER_MEDIA_TYPE, CONTAINER_PATH, GeneratedDocument, OPF_MEDIA_TYPE};
use crate::markup::escape_xml;

/// Generate the container document pointing at `opf_path`.
pub fn generate(opf_path: &str) -> GeneratedDocument {
    let xml = format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<container version="1.0" xmlns="urn:oasis:names:tc:opendocument:xmlns:container">
  <rootfiles>
    <rootfile full-path="{}" media-type="{}"/>
  </rootfiles>
</container>
"#,
        escape_xml(opf_path),
        OPF_MEDIA_TYPE
    );
    GeneratedDocument::new(CONTAINER_PATH, CONTAINER_MEDIA_TYPE, xml)
}
