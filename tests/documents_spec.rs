use teg_reader::{parse_document, TegError, TegReader, XmlValue, ROOT_ELEMENT};

const EXPORT_FRAGMENT: &[u8] = b"<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
<Cartridge serialNumber=\"A1003R\" lotNumber=\"77\">\
<Sample><TestType>CK</TestType><R>5.1</R></Sample>\
<Sample><TestType>CRT</TestType><R>0.8</R></Sample>\
</Cartridge>";

fn parsed(bytes: &[u8]) -> XmlValue {
    parse_document(bytes)
        .unwrap_or_else(|e| panic!("failed to parse fixture fragment: {}", e))
}

#[test]
fn document_root_key_is_the_root_element_name() {
    let doc = parsed(EXPORT_FRAGMENT);
    let root = doc.as_map().expect("document must be a map");
    assert_eq!(root.len(), 1);
    assert!(root.contains_key(ROOT_ELEMENT));
}

#[test]
fn every_container_fragment_round_trips_through_the_parser() {
    let mut buf = Vec::new();
    buf.extend_from_slice(&[0x00, 0x17, 0xfe]);
    buf.extend_from_slice(EXPORT_FRAGMENT);
    buf.extend_from_slice(&[0x42, 0x00]);
    buf.extend_from_slice(EXPORT_FRAGMENT);

    let reader = TegReader::from_bytes(buf);
    let documents: Vec<XmlValue> = reader
        .documents()
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();

    assert_eq!(documents.len(), 2);
    for doc in &documents {
        assert!(doc.get(ROOT_ELEMENT).is_some());
    }
}

#[test]
fn attributes_become_prefixed_keys() {
    let doc = parsed(EXPORT_FRAGMENT);
    let cartridge = doc.get(ROOT_ELEMENT).unwrap();

    assert_eq!(
        cartridge.get("@serialNumber").and_then(XmlValue::as_text),
        Some("A1003R")
    );
    assert_eq!(
        cartridge.get("@lotNumber").and_then(XmlValue::as_text),
        Some("77")
    );
}

#[test]
fn repeated_siblings_collapse_into_an_ordered_list() {
    let doc = parsed(EXPORT_FRAGMENT);
    let samples = doc
        .get(ROOT_ELEMENT)
        .and_then(|c| c.get("Sample"))
        .and_then(XmlValue::as_list)
        .expect("repeated <Sample> elements must collapse into a list");

    assert_eq!(samples.len(), 2);
    let types: Vec<&str> = samples
        .iter()
        .map(|s| s.get("TestType").and_then(XmlValue::as_text).unwrap())
        .collect();
    assert_eq!(types, ["CK", "CRT"], "document order must be preserved");
}

#[test]
fn leaf_element_is_its_text() {
    let doc = parsed(EXPORT_FRAGMENT);
    let r = doc
        .get(ROOT_ELEMENT)
        .and_then(|c| c.get("Sample"))
        .and_then(XmlValue::as_list)
        .and_then(|s| s[0].get("R"))
        .and_then(XmlValue::as_text);
    assert_eq!(r, Some("5.1"));
}

#[test]
fn text_beside_attributes_lands_under_text_key() {
    let doc = parsed(b"<Cartridge serialNumber=\"A1\">degraded</Cartridge>");
    let cartridge = doc.get(ROOT_ELEMENT).unwrap();
    assert_eq!(
        cartridge.get("#text").and_then(XmlValue::as_text),
        Some("degraded")
    );
}

#[test]
fn empty_element_is_null() {
    let doc = parsed(b"<Cartridge serialNumber=\"A1\"><Note/></Cartridge>");
    assert_eq!(
        doc.get(ROOT_ELEMENT).and_then(|c| c.get("Note")),
        Some(&XmlValue::Null)
    );
}

#[test]
fn entities_are_unescaped() {
    let doc = parsed(b"<Cartridge serialNumber=\"A1\"><Note>R &amp; MA</Note></Cartridge>");
    assert_eq!(
        doc.get(ROOT_ELEMENT)
            .and_then(|c| c.get("Note"))
            .and_then(XmlValue::as_text),
        Some("R & MA")
    );
}

#[test]
fn mismatched_close_tag_is_a_parse_error() {
    let result = parse_document(b"<Cartridge serialNumber=\"A1\"><R>5</Q></Cartridge>");
    assert!(matches!(result, Err(TegError::Xml(_))));
}

#[test]
fn truncated_fragment_is_an_error() {
    let result = parse_document(b"<?xml version=\"1.0\"?><Cartridge serialNumber=\"A1\"><R>5");
    // Either the XML reader flags the missing end tags itself or the
    // document builder reports the still-open element; both are errors.
    match result {
        Err(TegError::InvalidDocument(_)) | Err(TegError::Xml(_)) => {}
        other => panic!("expected a parse error, got {:?}", other),
    }
}

#[test]
fn declaration_alone_has_no_root_element() {
    let result = parse_document(b"<?xml version=\"1.0\"?>");
    match result {
        Err(TegError::InvalidDocument(msg)) => assert!(msg.contains("no root element")),
        other => panic!("expected InvalidDocument, got {:?}", other),
    }
}

#[test]
fn documents_serialize_as_plain_nested_json() {
    let doc = parsed(
        b"<?xml version=\"1.0\"?>\
<Cartridge serialNumber=\"A1\"><R>5.1</R><R>6.0</R><Note/></Cartridge>",
    );

    let json = serde_json::to_value(&doc).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "Cartridge": {
                "@serialNumber": "A1",
                "R": ["5.1", "6.0"],
                "Note": null
            }
        })
    );
}
