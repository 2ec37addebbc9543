//! `toc.ncx` navigation document.

use super::{GeneratedDocument, NCX_MEDIA_TYPE, NCX_PATH};
use crate::book::Section;
use crate::markup::escape_xml;

/// One entry of the navigation map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavPoint {
    /// 1-based position in reading order.
    pub play_order: usize,
    pub label: String,
    /// Target href relative to the package document.
    pub src: String,
}

/// Build one nav point per section, in section order.
///
/// `pages` are the rendered content documents, index-aligned with `sections`.
/// Unnamed sections are labelled by position ("Page 2").
pub fn nav_points(sections: &[Section], pages: &[GeneratedDocument]) -> Vec<NavPoint> {
    sections
        .iter()
        .zip(pages)
        .enumerate()
        .map(|(i, (section, page))| {
            let play_order = i + 1;
            let label = if section.name.is_empty() {
                format!("Page {play_order}")
            } else {
                section.name.clone()
            };
            NavPoint {
                play_order,
                label,
                src: page.href().to_string(),
            }
        })
        .collect()
}

/// Generate toc.ncx for `points`.
pub fn generate(title: &str, identifier: &str, points: &[NavPoint]) -> GeneratedDocument {
    let mut ncx = String::new();

    ncx.push_str(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE ncx PUBLIC "-//NISO//DTD ncx 2005-1//EN" "http://www.daisy.org/z3986/2005/ncx-2005-1.dtd">
<ncx xmlns="http://www.daisy.org/z3986/2005/ncx/" version="2005-1">
  <head>
    <meta name="dtb:uid" content=""#,
    );
    ncx.push_str(&escape_xml(identifier));
    ncx.push_str(
        r#""/>
    <meta name="dtb:depth" content="1"/>
    <meta name="dtb:totalPageCount" content="0"/>
    <meta name="dtb:maxPageNumber" content="0"/>
  </head>
  <docTitle>
    <text>"#,
    );
    ncx.push_str(&escape_xml(title));
    ncx.push_str(
        r#"</text>
  </docTitle>
  <navMap>
"#,
    );

    for point in points {
        ncx.push_str(&format!(
            "    <navPoint id=\"navPoint-{0}\" playOrder=\"{0}\">\n",
            point.play_order
        ));
        ncx.push_str(&format!(
            "      <navLabel><text>{}</text></navLabel>\n",
            escape_xml(&point.label)
        ));
        ncx.push_str(&format!(
            "      <content src=\"{}\"/>\n",
            escape_xml(&point.src)
        ));
        ncx.push_str("    </navPoint>\n");
    }

    ncx.push_str("  </navMap>\n</ncx>\n");
    GeneratedDocument::new(NCX_PATH, NCX_MEDIA_TYPE, ncx)
}
