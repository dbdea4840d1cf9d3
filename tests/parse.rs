//! End-to-end parsing of complete packets

#[path = "fixtures/mod.rs"]
mod fixtures;

use fixtures::{init_logger, photo_packet, PHOTO_LEAVES, PHOTO_RDF};
use pretty_assertions::assert_eq;
use xmpindex::core::schemas::ns;
use xmpindex::{
    standard_registry, ArrayFieldType, ByteOrderMark, LeafValue, Namespace, PropertyIndex,
    QualifiedName, Registry, ScalarFieldType, ScalarValue, XmpDateTime, XmpError, XmpParser,
};

fn scalar<'a>(index: &'a PropertyIndex, phrase: &str) -> &'a ScalarValue {
    let values = index.get_phrase(phrase).unwrap();
    assert_eq!(values.len(), 1, "{phrase}");
    values[0].as_scalar().unwrap()
}

fn strings(index: &PropertyIndex, phrase: &str) -> Vec<String> {
    let values = index.get_phrase(phrase).unwrap();
    values[0]
        .as_array()
        .unwrap()
        .string_items(standard_registry())
        .unwrap()
}

mod packet {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn leaves_and_header() {
        init_logger();
        let mut parser = XmpParser::new(standard_registry());
        let index = parser.parse_str(&photo_packet()).unwrap();

        assert_eq!(index.count(), PHOTO_LEAVES);
        assert_eq!(parser.byte_order_mark(), Some(ByteOrderMark::Utf8));
    }

    #[test]
    fn without_wrapper() {
        let mut parser = XmpParser::new(standard_registry());
        let index = parser.parse_str(PHOTO_RDF).unwrap();
        assert_eq!(index.count(), PHOTO_LEAVES);
        assert_eq!(parser.byte_order_mark(), None);
    }

    #[test]
    fn description_attributes() {
        let index: PropertyIndex = photo_packet().parse().unwrap();

        assert_eq!(
            scalar(&index, "[xmp]CreatorTool").as_str(),
            Some("Adobe Photoshop CS2 Windows")
        );
        assert_eq!(scalar(&index, "[xmpRights]Marked").as_bool(), Some(true));
        assert_eq!(scalar(&index, "[pdf]Trapped").to_string(), "False");
        assert_eq!(scalar(&index, "[photoshop]ColorMode").as_str(), Some("3"));

        let created = scalar(&index, "[xmp]CreateDate").as_date().unwrap();
        assert_eq!(created.unix_timestamp(), Some(1_145_971_921));
    }

    #[test]
    fn scalar_leaf_carries_its_namespace() {
        let index: PropertyIndex = photo_packet().parse().unwrap();
        match &index.get_phrase("[dc]format").unwrap()[0] {
            LeafValue::Scalar(leaf) => {
                assert_eq!(leaf.namespace.uri(), ns::DC);
                assert_eq!(leaf.field, "format");
                assert_eq!(leaf.value, ScalarValue::from("image/jpeg"));
            }
            other => panic!("expected a scalar leaf, got {other:?}"),
        }
    }

    #[test]
    fn text_arrays() {
        let index: PropertyIndex = photo_packet().parse().unwrap();

        assert_eq!(strings(&index, "[dc]creator"), vec!["Llywelyn", "Stefan"]);
        assert_eq!(strings(&index, "[dc]subject"), vec!["purple", "square"]);
        assert_eq!(
            strings(&index, "[dc]title"),
            vec![
                "{[xml]lang=[x-default]} [Purple Square]",
                "{[xml]lang=[de]} [Lila Quadrat]",
            ]
        );
    }

    #[test]
    fn resource_events() {
        let index: PropertyIndex = photo_packet().parse().unwrap();
        let history = index.get_phrase("[xmpMM]History").unwrap()[0]
            .as_array()
            .unwrap();

        assert_eq!(history.kind(), ArrayFieldType::OrderedResourceEvent);
        assert_eq!(history.path().phrase(standard_registry()), "[xmpMM]History");
        assert_eq!(
            history.string_items(standard_registry()).unwrap(),
            vec![
                "[stEvt]action=[created] [stEvt]instanceID=[xmp.iid:01] \
                 [stEvt]softwareAgent=[Adobe Photoshop CS2 Windows]",
                "[stEvt]action=[saved] [stEvt]changed=[/] [stEvt]instanceID=[xmp.iid:02]",
            ]
        );
    }

    #[test]
    fn struct_fields() {
        let index: PropertyIndex = photo_packet().parse().unwrap();
        assert_eq!(
            scalar(&index, "[xmpMM]DerivedFrom.[stRef]instanceID").as_str(),
            Some("xmp.iid:01")
        );
        assert_eq!(
            scalar(&index, "[xmpMM]DerivedFrom.[stRef]documentID").as_str(),
            Some("xmp.did:01")
        );
        assert!(matches!(
            index.get_phrase("[xmpMM]DerivedFrom"),
            Err(XmpError::PropertyNotFound(_))
        ));
    }

    #[test]
    fn dump_lists_every_leaf() {
        let index: PropertyIndex = photo_packet().parse().unwrap();
        let dump = index.dump(standard_registry());

        let lines: Vec<&str> = dump.lines().collect();
        assert_eq!(lines.len(), PHOTO_LEAVES);
        assert_eq!(lines[0], "[dc]creator = [OrderedTextArray<Llywelyn, Stefan>]");
        assert!(lines.contains(&"[xmpMM]DerivedFrom.[stRef]documentID = [xmp.did:01]"));
        assert!(lines.contains(&"[xmp]Label = [Final]"));
    }
}

mod values {
    use super::*;
    use pretty_assertions::assert_eq;

    fn label_packet(body: &str) -> String {
        format!(
            r#"<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#">
  <rdf:Description xmlns:xmp="http://ns.adobe.com/xap/1.0/">{body}</rdf:Description>
</rdf:RDF>"#
        )
    }

    #[test]
    fn label_text() {
        let index: PropertyIndex = label_packet("<xmp:Label>test</xmp:Label>").parse().unwrap();
        assert_eq!(index.count(), 1);
        assert_eq!(scalar(&index, "[xmp]Label").as_str(), Some("test"));
    }

    #[test]
    fn self_closing_label_is_empty() {
        let index: PropertyIndex = label_packet("<xmp:Label/>").parse().unwrap();
        assert_eq!(index.count(), 1);
        assert_eq!(scalar(&index, "[xmp]Label").as_str(), Some(""));
    }

    #[test]
    fn invalid_date_is_skipped() {
        init_logger();
        let index: PropertyIndex = label_packet(
            "<xmp:ModifyDate>not-a-date</xmp:ModifyDate><xmp:Label>ok</xmp:Label>",
        )
        .parse()
        .unwrap();
        assert_eq!(index.count(), 1);
        assert!(index.get_phrase("[xmp]ModifyDate").is_err());
    }

    #[test]
    fn date_instants_truncate_to_seconds() {
        let plain: XmpDateTime = "2019-05-07T12:34:56Z-05:00".parse().unwrap();
        let precise: XmpDateTime = "2019-05-07T12:34:56.000000123Z-05:00".parse().unwrap();
        assert_eq!(plain.unix_timestamp(), precise.unix_timestamp());
    }

    #[test]
    fn repeated_properties_keep_document_order() {
        let index: PropertyIndex = label_packet(
            "<xmp:Label>one</xmp:Label><xmp:Nickname>n</xmp:Nickname><xmp:Label>two</xmp:Label>",
        )
        .parse()
        .unwrap();
        let labels: Vec<String> = index
            .get_phrase("[xmp]Label")
            .unwrap()
            .iter()
            .map(|value| value.render(standard_registry()))
            .collect();
        assert_eq!(labels, vec!["one", "two"]);
        assert_eq!(index.count(), 3);
    }
}

mod registry {
    use super::*;
    use pretty_assertions::assert_eq;

    const CUSTOM: &str = r#"<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#">
  <rdf:Description xmlns:cam="http://example.com/camera/1.0/"
      xmlns:other="http://example.com/other/">
    <cam:Serial>A-1234</cam:Serial>
    <cam:Shots>412</cam:Shots>
    <other:Ignored>x</other:Ignored>
  </rdf:Description>
</rdf:RDF>"#;

    fn camera() -> Namespace {
        Namespace::new("http://example.com/camera/1.0/", "cam")
            .with_field("Serial", ScalarFieldType::Text)
            .with_field("Shots", ScalarFieldType::Integer)
    }

    #[test]
    fn custom_namespace() {
        init_logger();
        let mut registry = Registry::new();
        registry.register(camera()).unwrap();

        let index = XmpParser::new(&registry).parse_str(CUSTOM).unwrap();
        assert_eq!(index.count(), 2);
        let shots = index.get_phrase("[cam]Shots").unwrap()[0].as_scalar().unwrap();
        assert_eq!(shots.as_int(), Some(412));
    }

    #[test]
    fn duplicate_registration_fails() {
        let mut registry = Registry::standard();
        let err = registry
            .register(Namespace::new(ns::XMP, "xap"))
            .unwrap_err();
        assert!(matches!(err, XmpError::DuplicateNamespace(_)));
        assert!(!err.is_recoverable());
    }

    #[test]
    fn unknown_prefix_is_cached() {
        init_logger();
        let registry = Registry::new();
        let name = QualifiedName::new("http://example.com/other/", "Ignored");

        assert_eq!(name.render(&registry), "[?]Ignored");
        let misses = registry.resolutions();
        assert_eq!(name.render(&registry), "[?]Ignored");
        assert_eq!(registry.resolutions(), misses);
    }
}

mod failures {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn wrong_packet_id() {
        let xml = format!(
            "<?xpacket begin=\"\" id=\"0000\"?>\n{}\n<?xpacket end=\"w\"?>",
            PHOTO_RDF
        );
        let err = xml.parse::<PropertyIndex>().unwrap_err();
        assert!(matches!(err, XmpError::Packet(_)));
    }

    #[test]
    fn missing_packet_id() {
        let xml = format!("<?xpacket begin=\"\"?>\n{}", PHOTO_RDF);
        let err = xml.parse::<PropertyIndex>().unwrap_err();
        assert_eq!(
            err.to_string(),
            XmpError::Packet("'begin' or 'id' attributes of xpacket tag missing".to_string())
                .to_string()
        );
    }

    #[test]
    fn truncated_packet() {
        let cut = &PHOTO_RDF[..PHOTO_RDF.find("<dc:subject>").unwrap()];
        let err = cut.parse::<PropertyIndex>().unwrap_err();
        assert!(!err.is_recoverable());
    }

    #[test]
    fn ordered_array_in_bag() {
        let xml = r#"<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#">
  <rdf:Description xmlns:dc="http://purl.org/dc/elements/1.1/">
    <dc:creator><rdf:Bag><rdf:li>a</rdf:li></rdf:Bag></dc:creator>
  </rdf:Description>
</rdf:RDF>"#;
        match xml.parse::<PropertyIndex>().unwrap_err() {
            XmpError::UnexpectedTag { expected, found } => {
                assert_eq!((expected.as_str(), found.as_str()), ("[rdf]Seq", "[rdf]Bag"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
