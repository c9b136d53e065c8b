//! MEI serializer
//!
//! Writes the arena tree back out with quick-xml. All namespace declarations
//! go on the root element. `xml:id` is always written first on each element,
//! followed by the stored attributes in order.

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use super::{MeiError, MeiResult};
use crate::models::{MeiDocument, NodeId};

/// Serialize a document to MEI text, indenting nested elements by `indent` spaces
pub fn write_mei(doc: &MeiDocument, indent: usize) -> MeiResult<String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', indent);
    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .map_err(xml_error)?;

    write_element(&mut writer, doc, doc.root(), true)?;

    String::from_utf8(writer.into_inner()).map_err(|e| MeiError::Xml(e.to_string()))
}

fn write_element(
    writer: &mut Writer<Vec<u8>>,
    doc: &MeiDocument,
    node_id: NodeId,
    is_root: bool,
) -> MeiResult<()> {
    let node = doc.node(node_id);
    let tag = node.name.as_tag();

    let mut start = BytesStart::new(tag);
    if is_root {
        for (prefix, uri) in &doc.namespaces {
            match prefix {
                Some(prefix) => start.push_attribute((format!("xmlns:{}", prefix).as_str(), uri.as_str())),
                None => start.push_attribute(("xmlns", uri.as_str())),
            }
        }
    }
    start.push_attribute(("xml:id", node.id.as_str()));
    for (key, value) in &node.attributes {
        start.push_attribute((key.as_str(), value.as_str()));
    }

    if node.children().is_empty() && node.text.is_none() {
        writer.write_event(Event::Empty(start)).map_err(xml_error)?;
        return Ok(());
    }

    writer.write_event(Event::Start(start)).map_err(xml_error)?;
    if let Some(text) = &node.text {
        writer
            .write_event(Event::Text(BytesText::new(text)))
            .map_err(xml_error)?;
    }
    for &child in node.children() {
        write_element(writer, doc, child, false)?;
    }
    writer
        .write_event(Event::End(BytesEnd::new(tag)))
        .map_err(xml_error)?;
    Ok(())
}

fn xml_error(err: quick_xml::Error) -> MeiError {
    MeiError::Xml(err.to_string())
}
