//! Per-section XHTML content documents.

use super::{CONTENT_DIR, GeneratedDocument, XHTML_MEDIA_TYPE, page_href};
use crate::book::{Book, Section};
use crate::config::{BodyPolicy, EpubConfig};
use crate::error::Result;
use crate::markup::{check_fragment, escape_xml};

/// Check every body against the build's [`BodyPolicy`].
///
/// Plain-text bodies need no check beyond escaping. Trusted markup must be a
/// well-formed fragment, checked for all sections before anything renders.
pub fn check_bodies(book: &Book, policy: BodyPolicy) -> Result<()> {
    if policy == BodyPolicy::TrustedMarkup {
        for (i, section) in book.sections.iter().enumerate() {
            check_fragment(i, &section.body)?;
        }
    }
    Ok(())
}

/// Render the section at `index` as a standalone XHTML document.
///
/// The section name becomes the document title and a leading `<h1>`; an
/// unnamed section gets an empty title and no heading. Bodies must already
/// have passed [`check_bodies`].
pub fn render_section(index: usize, section: &Section, config: &EpubConfig) -> GeneratedDocument {
    let name = escape_xml(&section.name);
    let lang = escape_xml(&config.language);

    let mut html = String::with_capacity(section.body.len() + 512);
    html.push_str(&format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="no"?>
<!DOCTYPE html>
<html xmlns="http://www.w3.org/1999/xhtml" xmlns:epub="http://www.idpf.org/2007/ops" xml:lang="{lang}" lang="{lang}">
  <head>
    <title>{name}</title>
  </head>
  <body>
    <section>
"#
    ));

    if !name.is_empty() {
        html.push_str(&format!("      <h1>{name}</h1>\n"));
    }

    match config.body_policy {
        BodyPolicy::PlainText => {
            html.push_str(&format!("      <p>{}</p>\n", escape_xml(&section.body)));
        }
        BodyPolicy::TrustedMarkup => {
            html.push_str(&format!("      <div>{}</div>\n", section.body));
        }
    }

    html.push_str("    </section>\n  </body>\n</html>\n");

    GeneratedDocument::new(
        format!("{CONTENT_DIR}/{}", page_href(index)),
        XHTML_MEDIA_TYPE,
        html,
    )
}

/// Render every section in order.
pub fn render_all(book: &Book, config: &EpubConfig) -> Vec<GeneratedDocument> {
    book.sections
        .iter()
        .enumerate()
        .map(|(i, section)| render_section(i, section, config))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn render(name: &str, body: &str, policy: BodyPolicy) -> String {
        let config = EpubConfig::default().with_body_policy(policy);
        let doc = render_section(0, &Section::new(name, body), &config);
        String::from_utf8(doc.data).unwrap()
    }

    #[test]
    fn test_plain_text_body_is_escaped() {
        let html = render("Intro", "Hello & welcome", BodyPolicy::PlainText);
        assert!(html.contains("<title>Intro</title>"));
        assert!(html.contains("<h1>Intro</h1>"));
        assert!(html.contains("<p>Hello &amp; welcome</p>"));
    }

    #[test]
    fn test_unnamed_section_has_no_heading() {
        let html = render("", "<ok>", BodyPolicy::PlainText);
        assert!(html.contains("<title></title>"));
        assert!(!html.contains("<h1>"));
        assert!(html.contains("<p>&lt;ok&gt;</p>"));
    }

    #[test]
    fn test_name_is_escaped_in_title_and_heading() {
        let html = render("Q&A <1>", "x", BodyPolicy::PlainText);
        assert!(html.contains("<title>Q&amp;A &lt;1&gt;</title>"));
        assert!(html.contains("<h1>Q&amp;A &lt;1&gt;</h1>"));
    }

    #[test]
    fn test_trusted_markup_passes_through() {
        let html = render("Intro", "<b>bold</b> &amp; more", BodyPolicy::TrustedMarkup);
        assert!(html.contains("<div><b>bold</b> &amp; more</div>"));
    }

    #[test]
    fn test_check_bodies() {
        let book = Book::new("T").with_section("a", "fine").with_section("b", "<ok>");
        assert!(check_bodies(&book, BodyPolicy::PlainText).is_ok());
        assert!(matches!(
            check_bodies(&book, BodyPolicy::TrustedMarkup),
            Err(Error::MalformedMarkup { index: 1, .. })
        ));
    }

    #[test]
    fn test_render_all_paths_follow_section_order() {
        let book = Book::new("T")
            .with_section("A", "1")
            .with_section("B", "2")
            .with_section("C", "3");
        let paths: Vec<_> = render_all(&book, &EpubConfig::default())
            .into_iter()
            .map(|d| d.path)
            .collect();
        assert_eq!(
            paths,
            ["OEBPS/page0.xhtml", "OEBPS/page1.xhtml", "OEBPS/page2.xhtml"]
        );
    }
}
