//! Text escaping and markup checks for generated XML documents.
//!
//! Every piece of author-supplied text passes through here before it is
//! embedded in a generated document: [`check_text`] rejects characters XML 1.0
//! cannot carry, [`escape_xml`] neutralizes reserved characters, and
//! [`check_fragment`] validates section bodies that are passed through as
//! trusted markup.

use quick_xml::NsReader;
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::{PrefixDeclaration, ResolveResult};

use crate::error::{Error, Result};

/// Escape XML special characters.
///
/// Quotes are escaped as well so the result is safe inside attribute values.
/// Carriage returns become a character reference, otherwise a parser would
/// normalize them away.
///
/// # Examples
///
/// ```
/// use quire::markup::escape_xml;
///
/// assert_eq!(escape_xml("Hello & <welcome>"), "Hello &amp; &lt;welcome&gt;");
/// ```
pub fn escape_xml(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&apos;"),
            '\r' => result.push_str("&#xD;"),
            _ => result.push(c),
        }
    }
    result
}

/// Whether `c` is allowed in an XML 1.0 document.
pub fn is_xml_char(c: char) -> bool {
    matches!(c,
        '\t' | '\n' | '\r'
        | '\u{20}'..='\u{D7FF}'
        | '\u{E000}'..='\u{FFFD}'
        | '\u{10000}'..='\u{10FFFF}')
}

/// Reject text containing characters that no XML document can represent.
///
/// `field` and `index` identify the offending field in the error.
pub fn check_text(field: &'static str, index: Option<usize>, text: &str) -> Result<()> {
    match text.chars().find(|&c| !is_xml_char(c)) {
        Some(ch) => Err(Error::Encoding { field, index, ch }),
        None => Ok(()),
    }
}

/// Namespaces in scope for section bodies, as declared by the page's `<html>`.
const FRAGMENT_WRAPPER_OPEN: &str =
    r#"<fragment xmlns="http://www.w3.org/1999/xhtml" xmlns:epub="http://www.idpf.org/2007/ops">"#;

/// Validate that `fragment` is well-formed XHTML body content.
///
/// The fragment may hold text, elements, comments and CDATA, but every element
/// must be closed inside the fragment, only the predefined XML entities and
/// character references may be used, and it may not carry a declaration or
/// doctype of its own. Element and attribute prefixes must resolve against the
/// XHTML and `epub:` namespaces of the page or a declaration inside the
/// fragment.
pub fn check_fragment(index: usize, fragment: &str) -> Result<()> {
    let wrapped = format!("{FRAGMENT_WRAPPER_OPEN}{fragment}</fragment>");
    let mut reader = NsReader::from_str(&wrapped);
    reader.config_mut().check_end_names = true;

    let malformed = |reason: String| Error::MalformedMarkup { index, reason };

    let mut depth = 0usize;
    let mut closed = false;

    loop {
        let (ns, event) = reader
            .read_resolved_event()
            .map_err(|e| malformed(e.to_string()))?;
        let unknown_prefix = match ns {
            ResolveResult::Unknown(prefix) => {
                Some(String::from_utf8_lossy(&prefix).into_owned())
            }
            _ => None,
        };

        if closed && !matches!(event, Event::Eof) {
            return Err(malformed("markup closes its enclosing element".to_string()));
        }

        match event {
            Event::Start(e) => {
                if let Some(prefix) = unknown_prefix {
                    return Err(malformed(format!("undeclared namespace prefix {prefix}:")));
                }
                check_attributes(&reader, &e).map_err(malformed)?;
                depth += 1;
            }
            Event::Empty(e) => {
                if let Some(prefix) = unknown_prefix {
                    return Err(malformed(format!("undeclared namespace prefix {prefix}:")));
                }
                check_attributes(&reader, &e).map_err(malformed)?;
            }
            Event::End(_) => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    closed = true;
                }
            }
            Event::GeneralRef(e) => {
                let entity = String::from_utf8_lossy(e.as_ref());
                if !is_known_entity(&entity) {
                    return Err(malformed(format!("undefined entity &{entity};")));
                }
            }
            Event::Decl(_) | Event::DocType(_) | Event::PI(_) => {
                return Err(malformed(
                    "declarations and processing instructions are not allowed".to_string(),
                ));
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if depth != 0 || !closed {
        return Err(malformed("unclosed element".to_string()));
    }
    Ok(())
}

/// Check the attributes of one start tag.
///
/// Values may not contain a raw `<` or an unknown entity, prefixed names must
/// resolve, and a prefix may not be bound to the empty namespace.
fn check_attributes(
    reader: &NsReader<&[u8]>,
    start: &BytesStart<'_>,
) -> std::result::Result<(), String> {
    for attr in start.attributes() {
        let attr = attr.map_err(|e| e.to_string())?;
        let name = String::from_utf8_lossy(attr.key.as_ref()).into_owned();

        if attr.value.contains(&b'<') {
            return Err(format!("attribute {name} contains a raw '<'"));
        }
        attr.decode_and_unescape_value(reader.decoder())
            .map_err(|e| format!("attribute {name}: {e}"))?;

        if let Some(binding) = attr.key.as_namespace_binding() {
            if matches!(binding, PrefixDeclaration::Named(_)) && attr.value.is_empty() {
                return Err(format!("{name} cannot bind a prefix to an empty namespace"));
            }
            continue;
        }

        if let (ResolveResult::Unknown(prefix), _) = reader.resolve_attribute(attr.key) {
            return Err(format!(
                "undeclared namespace prefix {}: on attribute {name}",
                String::from_utf8_lossy(&prefix)
            ));
        }
    }
    Ok(())
}

/// Predefined XML entities plus decimal/hex character references to valid
/// XML characters.
fn is_known_entity(entity: &str) -> bool {
    if matches!(entity, "amp" | "lt" | "gt" | "quot" | "apos") {
        return true;
    }

    let code = if let Some(hex) = entity.strip_prefix("#x") {
        u32::from_str_radix(hex, 16).ok()
    } else if let Some(dec) = entity.strip_prefix('#') {
        dec.parse::<u32>().ok()
    } else {
        None
    };

    code.and_then(char::from_u32).is_some_and(is_xml_char)
}
