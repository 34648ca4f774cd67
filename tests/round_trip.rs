//! XML round trip property tests
//!
//! A tree converted to XML and read back must be equivalent to the tree it came from, and
//! any namespace-free element tree written as LessXaml and read back must convert to the
//! same XML it came from.

use lessml::lessml::building::build_tree;
use lessml::lessml::formats::{to_dsl_text, DEFAULT_INDENT};
use lessml::lessml::grammar::GrammarConfig;
use lessml::lessml::lexing::tokenize;
use lessml::lessml::xml::{from_xml, to_xml, Element, XName, XmlDocument, XmlNode};
use proptest::prelude::*;
use rstest::rstest;
use std::collections::BTreeMap;

#[rstest]
#[case::single_element("A", r#"<A/>"#)]
#[case::attribute("A\n    B = C", r#"<A B="C"/>"#)]
#[case::element_value("A\n    'This is a value'", r#"<A>This is a value</A>"#)]
#[case::default_namespace("A\n    xmlns = http://example.org", r#"<A xmlns="http://example.org"/>"#)]
#[case::aliased_namespace(
    "telerik:RadButton\n    xmlns:telerik = clr-namespace: Telerik.Windows.Controls",
    r#"<telerik:RadButton xmlns:telerik="clr-namespace: Telerik.Windows.Controls"/>"#
)]
#[case::attribute_after_declarations(
    "RadButton\n    xmlns = default\n    xmlns:telerik = urn:telerik\n    telerik:Theming.Enabled = True",
    r#"<RadButton xmlns="default" xmlns:telerik="urn:telerik" telerik:Theming.Enabled="True"/>"#
)]
#[case::reused_default_namespace(
    "A\n    xmlns = NS1\n    B\n        xmlns = NS2",
    r#"<A xmlns="NS1"><B xmlns="NS2"/></A>"#
)]
#[case::reused_alias(
    "n:A\n    xmlns:n = NS1\n    n:B\n        xmlns:n = NS2",
    r#"<n:A xmlns:n="NS1"><n:B xmlns:n="NS2"/></n:A>"#
)]
#[case::mixed_content(
    "TextBlock\n    'a very '\n    Bold\n        'bold'\n    ' proposition'",
    r#"<TextBlock>a very <Bold>bold</Bold> proposition</TextBlock>"#
)]
fn test_tree_survives_xml(#[case] source: &str, #[case] expected_xml: &str) {
    let tree = build_tree(tokenize(source, &GrammarConfig::xml()).unwrap()).unwrap();
    let xml = to_xml(&tree).unwrap().to_xml_string().unwrap();
    assert_eq!(xml, expected_xml);

    let back = from_xml(&XmlDocument::parse(&xml).unwrap()).unwrap();
    assert!(
        back.equivalent_to(&tree),
        "{:#?}\nis not equivalent to\n{:#?}",
        back.snapshot(),
        tree.snapshot()
    );
}

fn attributes() -> impl Strategy<Value = BTreeMap<String, String>> {
    prop::collection::btree_map("a[a-z]{0,5}", "[a-z0-9'#]{0,8}", 0..3)
}

fn leaf() -> impl Strategy<Value = Element> {
    ("[A-Z][a-z]{0,5}", attributes()).prop_map(|(name, attributes)| {
        attributes
            .into_iter()
            .fold(Element::new(XName::local(name)), |e, (k, v)| {
                e.with_attribute(XName::local(k), v)
            })
    })
}

fn element() -> impl Strategy<Value = Element> {
    leaf().prop_recursive(3, 24, 4, |inner| {
        (leaf(), prop::collection::vec(inner, 0..4)).prop_map(|(parent, children)| {
            children
                .into_iter()
                .fold(parent, |e, child| e.with_child(XmlNode::Element(child)))
        })
    })
}

fn back_and_forth(document: &XmlDocument) -> XmlDocument {
    let reparsed = XmlDocument::parse(&document.to_xml_string().unwrap()).unwrap();
    let text = to_dsl_text(&from_xml(&reparsed).unwrap(), DEFAULT_INDENT).unwrap();
    let tree = build_tree(tokenize(&text, &GrammarConfig::xaml()).unwrap()).unwrap();
    to_xml(&tree).unwrap()
}

#[test]
fn test_quoted_attribute_values() {
    let document = XmlDocument::new(vec![XmlNode::Element(
        Element::new(XName::local("A"))
            .with_attribute(XName::local("hash"), "#1")
            .with_attribute(XName::local("quote"), "it's")
            .with_attribute(XName::local("empty"), "")
            .with_child(XmlNode::Element(Element::new(XName::local("B")))),
    )]);
    assert_eq!(back_and_forth(&document), document);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn test_xml_survives_lessxaml(root in element()) {
        let document = XmlDocument::new(vec![XmlNode::Element(root)]);
        prop_assert_eq!(back_and_forth(&document), document);
    }
}
