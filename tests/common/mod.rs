//! Helpers for reading generated archives back.

#![allow(dead_code)]

use std::io::{Cursor, Read};

use quick_xml::events::Event;
use quick_xml::name::ResolveResult;
use quick_xml::{NsReader, Reader};
use zip::{CompressionMethod, ZipArchive};

pub struct Entry {
    pub name: String,
    pub stored: bool,
    pub text: String,
}

/// Every archive entry in archive order.
pub fn entries(bytes: &[u8]) -> Vec<Entry> {
    let mut archive = ZipArchive::new(Cursor::new(bytes)).expect("valid zip");
    (0..archive.len())
        .map(|i| {
            let mut file = archive.by_index(i).expect("entry");
            let mut text = String::new();
            file.read_to_string(&mut text).expect("utf-8 entry");
            Entry {
                name: file.name().to_string(),
                stored: file.compression() == CompressionMethod::Stored,
                text,
            }
        })
        .collect()
}

pub fn entry<'a>(entries: &'a [Entry], name: &str) -> &'a str {
    &entries
        .iter()
        .find(|e| e.name == name)
        .unwrap_or_else(|| panic!("missing entry {name}"))
        .text
}

pub fn names(entries: &[Entry]) -> Vec<&str> {
    entries.iter().map(|e| e.name.as_str()).collect()
}

/// Parse the whole document, failing on any well-formedness error.
pub fn assert_well_formed(xml: &str) {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().check_end_names = true;
    let mut depth = 0i32;
    loop {
        match reader.read_event() {
            Ok(Event::Start(_)) => depth += 1,
            Ok(Event::End(_)) => depth -= 1,
            Ok(Event::GeneralRef(e)) => {
                let entity = String::from_utf8_lossy(e.as_ref()).to_string();
                assert!(resolve_entity(&entity).is_some(), "unknown entity {entity}");
            }
            Ok(Event::Eof) => break,
            Err(e) => panic!("malformed document: {e}\n{xml}"),
            _ => {}
        }
    }
    assert_eq!(depth, 0, "unbalanced document:\n{xml}");
}

/// Strict parse: well-formed, every element and attribute prefix bound,
/// no raw `<` or unknown entity in attribute values.
pub fn assert_namespace_well_formed(xml: &str) {
    assert_well_formed(xml);

    let mut reader = NsReader::from_str(xml);
    reader.config_mut().check_end_names = true;
    loop {
        let (ns, event) = reader
            .read_resolved_event()
            .unwrap_or_else(|e| panic!("malformed document: {e}\n{xml}"));
        let unknown = matches!(ns, ResolveResult::Unknown(_));

        match event {
            Event::Start(e) | Event::Empty(e) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                assert!(!unknown, "unbound prefix on element {name}\n{xml}");
                for attr in e.attributes() {
                    let attr = attr.unwrap_or_else(|e| panic!("bad attribute on {name}: {e}"));
                    let key = String::from_utf8_lossy(attr.key.as_ref()).to_string();
                    assert!(!attr.value.contains(&b'<'), "raw '<' in {key}\n{xml}");
                    attr.decode_and_unescape_value(reader.decoder())
                        .unwrap_or_else(|e| panic!("bad value in {key}: {e}"));
                    if attr.key.as_namespace_binding().is_none() {
                        let (resolved, _) = reader.resolve_attribute(attr.key);
                        assert!(
                            !matches!(resolved, ResolveResult::Unknown(_)),
                            "unbound prefix on attribute {key}\n{xml}"
                        );
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }
}

/// Values of `attr` on every element with local name `element`.
pub fn attribute_values(xml: &str, element: &str, attr: &str) -> Vec<String> {
    let mut reader = Reader::from_str(xml);
    let mut values = Vec::new();
    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) | Ok(Event::Empty(e))
                if e.local_name().as_ref() == element.as_bytes() =>
            {
                for a in e.attributes().flatten() {
                    if a.key.as_ref() == attr.as_bytes() {
                        values.push(String::from_utf8_lossy(&a.value).to_string());
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => panic!("malformed document: {e}"),
            _ => {}
        }
    }
    values
}

/// Unescaped text content of every element with local name `element`.
pub fn element_texts(xml: &str, element: &str) -> Vec<String> {
    let mut reader = Reader::from_str(xml);
    let mut texts = Vec::new();
    let mut depth = 0usize;
    let mut current = String::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                if depth > 0 {
                    depth += 1;
                } else if e.local_name().as_ref() == element.as_bytes() {
                    depth = 1;
                    current.clear();
                }
            }
            Ok(Event::Empty(e)) if depth == 0 && e.local_name().as_ref() == element.as_bytes() => {
                texts.push(String::new());
            }
            Ok(Event::End(_)) if depth > 0 => {
                depth -= 1;
                if depth == 0 {
                    texts.push(std::mem::take(&mut current));
                }
            }
            Ok(Event::Text(e)) if depth > 0 => {
                current.push_str(&String::from_utf8_lossy(e.as_ref()));
            }
            Ok(Event::CData(e)) if depth > 0 => {
                current.push_str(&String::from_utf8_lossy(&e));
            }
            Ok(Event::GeneralRef(e)) if depth > 0 => {
                let entity = String::from_utf8_lossy(e.as_ref()).to_string();
                current.push_str(&resolve_entity(&entity).expect("known entity"));
            }
            Ok(Event::Eof) => break,
            Err(e) => panic!("malformed document: {e}"),
            _ => {}
        }
    }
    texts
}

fn resolve_entity(entity: &str) -> Option<String> {
    match entity {
        "apos" => return Some("'".to_string()),
        "quot" => return Some("\"".to_string()),
        "lt" => return Some("<".to_string()),
        "gt" => return Some(">".to_string()),
        "amp" => return Some("&".to_string()),
        _ => {}
    }

    let code = if let Some(hex) = entity.strip_prefix("#x") {
        u32::from_str_radix(hex, 16).ok()
    } else if let Some(dec) = entity.strip_prefix('#') {
        dec.parse::<u32>().ok()
    } else {
        None
    };
    code.and_then(char::from_u32).map(|c| c.to_string())
}
