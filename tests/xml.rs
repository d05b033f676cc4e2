use alog::formatter::xml::{format_xml, XmlError, XmlPrettyPrinter, EMPTY_XML, NULL_XML};
use std::error::Error;

fn pretty(xml: &str) -> Result<String, XmlError> {
    XmlPrettyPrinter::new(2).pretty_print(xml)
}

#[test]
fn indents_children_and_closes_text_inline() -> Result<(), Box<dyn Error>> {
    let out = pretty("<note><to>Tove</to><from>Jani</from><br/></note>")?;
    assert_eq!(
        out,
        "<note>\n  <to>Tove</to>\n  <from>Jani</from>\n  <br/>\n</note>\n"
    );
    Ok(())
}

#[test]
fn empty_elements_self_close() -> Result<(), Box<dyn Error>> {
    assert_eq!(pretty("<a></a>")?, "<a/>\n");
    assert_eq!(pretty("<a><b></b></a>")?, "<a>\n  <b/>\n</a>\n");
    Ok(())
}

#[test]
fn attributes_wrap_aligned_under_the_first() -> Result<(), Box<dyn Error>> {
    let out = pretty(r#"<root><item id="1" name="x" kind="y"/></root>"#)?;
    assert_eq!(
        out,
        "<root>\n  <item id=\"1\"\n        name=\"x\"\n        kind=\"y\"/>\n</root>\n"
    );
    Ok(())
}

#[test]
fn output_is_stable_when_reprinted() -> Result<(), Box<dyn Error>> {
    let once = pretty(
        r#"<?xml version="1.0"?>
        <order id="7" state="open">
            <!-- lines -->
            <line sku="A1">2</line>
            <line sku="B2"/>
        </order>"#,
    )?;
    assert_eq!(
        once,
        "<order id=\"7\"\n       state=\"open\">\n  <line sku=\"A1\">2</line>\n  <line sku=\"B2\"/>\n</order>\n"
    );
    assert_eq!(pretty(&once)?, once);
    Ok(())
}

#[test]
fn custom_indent() -> Result<(), Box<dyn Error>> {
    let out = XmlPrettyPrinter::new(4).pretty_print("<a><b><c/></b></a>")?;
    assert_eq!(out, "<a>\n    <b>\n        <c/>\n    </b>\n</a>\n");
    Ok(())
}

#[test]
fn text_is_escaped_and_cdata_kept() -> Result<(), Box<dyn Error>> {
    assert_eq!(pretty("<a>x &amp; y</a>")?, "<a>x &amp; y</a>\n");
    assert_eq!(pretty("<a><![CDATA[1 < 2]]></a>")?, "<a><![CDATA[1 < 2]]></a>\n");
    Ok(())
}

#[test]
fn namespaced_names_are_kept() -> Result<(), Box<dyn Error>> {
    let out = pretty(r#"<ns:a xmlns:ns="urn:x"><ns:b/></ns:a>"#)?;
    assert_eq!(out, "<ns:a xmlns:ns=\"urn:x\">\n  <ns:b/>\n</ns:a>\n");
    Ok(())
}

#[test]
fn structural_errors() {
    assert!(matches!(
        pretty("<a><b></a>"),
        Err(XmlError::MismatchedTag { ref expected, ref found }) if expected == "b" && found == "a"
    ));
    assert!(matches!(pretty("<a><b></b>"), Err(XmlError::UnclosedTag(ref name)) if name == "a"));
    assert!(pretty("</a>").is_err());
}

#[test]
fn bodies_report_problems_inline() {
    assert_eq!(format_xml(None, 2), NULL_XML);
    assert_eq!(format_xml(Some("  \n"), 2), EMPTY_XML);
    assert_eq!(format_xml(Some("<a/>"), 2), "XML:\n<a/>\n");
    assert!(format_xml(Some("<a><b></a>"), 2).starts_with("Invalid XML string: "));
}
