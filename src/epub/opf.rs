//! `content.opf` package document: metadata, manifest and spine.

use super::{GeneratedDocument, NCX_ID, OPF_MEDIA_TYPE, OPF_PATH, page_id};
use crate::error::{Error, Result};
use crate::markup::escape_xml;

/// Book-level metadata written to the package document.
#[derive(Debug, Clone, Copy)]
pub struct PackageMetadata<'a> {
    pub identifier: &'a str,
    /// `dcterms:modified` value, already formatted as `YYYY-MM-DDThh:mm:ssZ`.
    pub modified: &'a str,
    pub language: &'a str,
    pub title: &'a str,
    pub author: &'a str,
}

/// A manifest `<item>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestItem {
    pub id: String,
    pub href: String,
    pub media_type: &'static str,
}

/// Manifest entries: one per content page in order, then the NCX.
pub fn manifest(pages: &[GeneratedDocument], ncx: &GeneratedDocument) -> Vec<ManifestItem> {
    let mut items: Vec<ManifestItem> = pages
        .iter()
        .enumerate()
        .map(|(i, page)| ManifestItem {
            id: page_id(i),
            href: page.href().to_string(),
            media_type: page.media_type,
        })
        .collect();

    items.push(ManifestItem {
        id: NCX_ID.to_string(),
        href: ncx.href().to_string(),
        media_type: ncx.media_type,
    });
    items
}

/// Generate content.opf.
///
/// The spine lists every page in order. Fails with [`Error::EmptyManifest`]
/// when there are no pages, which only happens if book validation was skipped.
pub fn generate(
    metadata: &PackageMetadata<'_>,
    pages: &[GeneratedDocument],
    ncx: &GeneratedDocument,
) -> Result<GeneratedDocument> {
    if pages.is_empty() {
        return Err(Error::EmptyManifest);
    }

    let mut opf = String::new();

    opf.push_str(&format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<package xmlns="http://www.idpf.org/2007/opf" version="3.0" xml:lang="{}" unique-identifier="BookId">
  <metadata xmlns:dc="http://purl.org/dc/elements/1.1/">
"#,
        escape_xml(metadata.language)
    ));

    opf.push_str(&format!(
        "    <dc:identifier id=\"BookId\">{}</dc:identifier>\n",
        escape_xml(metadata.identifier)
    ));
    if let Some(scheme) = identifier_type(metadata.identifier) {
        opf.push_str(&format!(
            "    <meta refines=\"#BookId\" property=\"identifier-type\" scheme=\"xsd:string\">{scheme}</meta>\n"
        ));
    }
    opf.push_str(&format!(
        "    <meta property=\"dcterms:modified\">{}</meta>\n",
        escape_xml(metadata.modified)
    ));
    opf.push_str(&format!(
        "    <dc:language>{}</dc:language>\n",
        escape_xml(metadata.language)
    ));
    opf.push_str(&format!(
        "    <dc:title>{}</dc:title>\n",
        escape_xml(metadata.title)
    ));
    if !metadata.author.is_empty() {
        opf.push_str(&format!(
            "    <dc:creator>{}</dc:creator>\n",
            escape_xml(metadata.author)
        ));
    }
    opf.push_str("  </metadata>\n");

    opf.push_str("  <manifest>\n");
    for item in manifest(pages, ncx) {
        opf.push_str(&format!(
            "    <item id=\"{}\" href=\"{}\" media-type=\"{}\"/>\n",
            escape_xml(&item.id),
            escape_xml(&item.href),
            item.media_type
        ));
    }
    opf.push_str("  </manifest>\n");

    opf.push_str(&format!("  <spine toc=\"{NCX_ID}\">\n"));
    for i in 0..pages.len() {
        opf.push_str(&format!("    <itemref idref=\"{}\"/>\n", page_id(i)));
    }
    opf.push_str("  </spine>\n</package>\n");

    Ok(GeneratedDocument::new(OPF_PATH, OPF_MEDIA_TYPE, opf))
}

/// Identifier type for URN identifiers whose scheme readers recognize.
fn identifier_type(identifier: &str) -> Option<&'static str> {
    let nss = identifier.strip_prefix("urn:")?;
    let (nid, _) = nss.split_once(':')?;
    if nid.eq_ignore_ascii_case("uuid") {
        Some("uuid")
    } else if nid.eq_ignore_ascii_case("isbn") {
        Some("isbn")
    } else {
        None
    }
}
