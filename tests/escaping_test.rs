//! Property tests: author text survives escaping byte-for-byte.

mod common;

use proptest::prelude::*;
use quire::markup::is_xml_char;
use quire::{Book, EpubBuilder};

use common::{assert_well_formed, element_texts, entries, entry};

/// Strings biased towards markup-significant characters.
fn author_text() -> impl Strategy<Value = String> {
    let ch = prop_oneof![
        3 => prop::sample::select(vec!['<', '>', '&', '"', '\'', ';', '#', '\n', '\r', '\t']),
        1 => any::<char>().prop_map(|c| if is_xml_char(c) { c } else { '?' }),
        2 => prop::char::range('a', 'z'),
    ];
    prop::collection::vec(ch, 0..48).prop_map(|chars| chars.into_iter().collect())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn section_text_round_trips(name in author_text(), body in author_text(), title in author_text()) {
        // The trailing section keeps the book buildable when `body` is empty.
        let book = Book::new(title.clone())
            .with_section(name.clone(), body.clone())
            .with_section("filler", "x");
        let artifact = EpubBuilder::new().package(&book).unwrap();
        let entries = entries(&artifact.bytes);

        let page = entry(&entries, "OEBPS/page0.xhtml");
        assert_well_formed(page);
        prop_assert_eq!(element_texts(page, "p"), vec![body]);
        prop_assert_eq!(element_texts(page, "title"), vec![name.clone()]);
        if name.is_empty() {
            prop_assert!(element_texts(page, "h1").is_empty());
        } else {
            prop_assert_eq!(element_texts(page, "h1"), vec![name]);
        }

        let opf = entry(&entries, "OEBPS/content.opf");
        assert_well_formed(opf);
        prop_assert_eq!(element_texts(opf, "title"), vec![title.clone()]);

        let ncx = entry(&entries, "OEBPS/toc.ncx");
        assert_well_formed(ncx);
        prop_assert_eq!(&element_texts(ncx, "text")[0], &title);
    }

    #[test]
    fn suggested_name_is_a_plain_file_name(title in author_text()) {
        let name = quire::suggested_file_name(&title);
        prop_assert!(name.ends_with(".epub"));
        prop_assert!(name.len() <= quire::deliver::MAX_STEM_BYTES + ".epub".len());
        prop_assert!(!name.contains('/') && !name.contains('\\'));
        prop_assert!(!name.chars().any(char::is_control));
    }
}
