//! MEI parser
//!
//! Converts MEI XML into the arena tree using roxmltree. Every element becomes
//! a node; `xml:id` becomes the node id, and elements without one are given a
//! fresh id. Other attributes keep their order and namespace prefix. Direct
//! text content is kept; whitespace-only text (indentation) is dropped.
//!
//! Namespace declarations are hoisted onto the root so the writer can emit
//! them in one place. A prefix bound to two different URIs cannot be hoisted
//! and is rejected.

use roxmltree::Document as XmlDocument;

use super::{MeiError, MeiResult};
use crate::models::{MeiDocument, NodeId, NodeName};

const XML_NAMESPACE: &str = "http://www.w3.org/XML/1998/namespace";

/// Parse MEI text into a document tree
pub fn parse_mei(xml: &str) -> MeiResult<MeiDocument> {
    let xml_doc = XmlDocument::parse(xml).map_err(|e| MeiError::Xml(e.to_string()))?;
    let root = xml_doc.root_element();

    let root_name = NodeName::from_tag(&qualified_tag(&root));
    let mut doc = match root.attribute((XML_NAMESPACE, "id")) {
        Some(id) => MeiDocument::with_root(root_name, id)?,
        None => MeiDocument::new(root_name),
    };

    doc.namespaces = collect_namespaces(&root)?;

    let root_id = doc.root();
    copy_content(&mut doc, root_id, &root)?;
    for child in root.children().filter(|c| c.is_element()) {
        build(&mut doc, root_id, &child)?;
    }

    log::debug!("parsed MEI document with {} elements", doc.len());
    Ok(doc)
}

fn build(doc: &mut MeiDocument, parent: NodeId, element: &roxmltree::Node) -> MeiResult<()> {
    let name = NodeName::from_tag(&qualified_tag(element));
    let node = match element.attribute((XML_NAMESPACE, "id")) {
        Some(id) => doc.create_with_id(name, id)?,
        None => doc.create(name),
    };
    doc.append(parent, node)?;
    copy_content(doc, node, element)?;

    for child in element.children().filter(|c| c.is_element()) {
        build(doc, node, &child)?;
    }
    Ok(())
}

/// Copy attributes (other than `xml:id`) and text onto a node
fn copy_content(doc: &mut MeiDocument, node: NodeId, element: &roxmltree::Node) -> MeiResult<()> {
    for attr in element.attributes() {
        let key = match attr.namespace() {
            Some(XML_NAMESPACE) if attr.name() == "id" => continue,
            Some(XML_NAMESPACE) => format!("xml:{}", attr.name()),
            Some(uri) => match element.lookup_prefix(uri) {
                Some(prefix) if !prefix.is_empty() => format!("{}:{}", prefix, attr.name()),
                _ => {
                    return Err(MeiError::InvalidDocument(format!(
                        "attribute '{}' uses unbound namespace {}",
                        attr.name(),
                        uri
                    )))
                }
            },
            None => attr.name().to_string(),
        };
        doc.set_attribute(node, &key, attr.value());
    }

    let text: String = element
        .children()
        .filter(|c| c.is_text())
        .filter_map(|c| c.text())
        .collect();
    let trimmed = text.trim();
    if !trimmed.is_empty() {
        doc.node_mut(node).text = Some(trimmed.to_string());
    }
    Ok(())
}

/// Every namespace in scope anywhere below `root`, root declarations first
fn collect_namespaces(root: &roxmltree::Node) -> MeiResult<Vec<(Option<String>, String)>> {
    let mut namespaces: Vec<(Option<String>, String)> = Vec::new();
    for element in root.descendants().filter(|n| n.is_element()) {
        for ns in element.namespaces().filter(|ns| ns.name() != Some("xml")) {
            let prefix = ns.name().map(str::to_string);
            match namespaces.iter().find(|(p, _)| *p == prefix) {
                Some((_, uri)) if uri == ns.uri() => {}
                Some((_, uri)) => {
                    return Err(MeiError::InvalidDocument(format!(
                        "namespace prefix '{}' is bound to both {} and {}",
                        prefix.as_deref().unwrap_or(""),
                        uri,
                        ns.uri()
                    )))
                }
                None => namespaces.push((prefix, ns.uri().to_string())),
            }
        }
    }
    Ok(namespaces)
}

/// Element name with its prefix when it is outside the default namespace
fn qualified_tag(element: &roxmltree::Node) -> String {
    let tag = element.tag_name();
    let local = tag.name();
    let Some(uri) = tag.namespace() else {
        return local.to_string();
    };
    let default_ns = element.namespaces().find(|ns| ns.name().is_none()).map(|ns| ns.uri());
    if default_ns == Some(uri) {
        return local.to_string();
    }
    match element.lookup_prefix(uri) {
        Some(prefix) if !prefix.is_empty() => format!("{}:{}", prefix, local),
        _ => local.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = include_str!("../../tests/data/chant.mei");

    #[test]
    fn test_parse_fixture_structure() {
        let doc = parse_mei(FIXTURE).unwrap();

        assert_eq!(doc.id_of(doc.root()), "m-root");
        assert_eq!(doc.elements_by_name(&NodeName::Staff).len(), 2);
        assert_eq!(doc.elements_by_name(&NodeName::Zone).len(), 12);

        let note = doc.resolve("m-n2-note2").unwrap();
        assert_eq!(doc.attribute(note, "pname"), Some("d"));
        assert_eq!(doc.attribute(note, "oct"), Some("4"));
        assert_eq!(doc.attribute(note, "xml:id"), None);

        let title = doc.resolve("m-title").unwrap();
        assert_eq!(doc.node(title).text.as_deref(), Some("Salzinnes Antiphoner, folio 1r"));
    }

    #[test]
    fn test_parse_keeps_namespaces() {
        let doc = parse_mei(FIXTURE).unwrap();
        assert!(doc
            .namespaces
            .contains(&(None, "http://www.music-encoding.org/ns/mei".to_string())));
        assert!(doc
            .namespaces
            .contains(&(Some("xlink".to_string()), "http://www.w3.org/1999/xlink".to_string())));
    }

    #[test]
    fn test_inner_namespace_declarations_are_hoisted() {
        let xml = r#"<mei xmlns="http://www.music-encoding.org/ns/mei"><music><ref xmlns:xlink="http://www.w3.org/1999/xlink" xlink:href="x"/></music></mei>"#;
        let doc = parse_mei(xml).unwrap();

        assert_eq!(
            doc.namespaces,
            vec![
                (None, "http://www.music-encoding.org/ns/mei".to_string()),
                (Some("xlink".to_string()), "http://www.w3.org/1999/xlink".to_string()),
            ]
        );
        let reference = doc.first_by_name(&NodeName::Other("ref".to_string())).unwrap();
        assert_eq!(doc.attribute(reference, "xlink:href"), Some("x"));
    }

    #[test]
    fn test_conflicting_prefix_bindings_are_rejected() {
        let xml = r#"<mei xmlns:a="urn:one"><music xmlns:a="urn:two"/></mei>"#;
        assert!(matches!(parse_mei(xml), Err(MeiError::InvalidDocument(_))));
    }

    #[test]
    fn test_elements_without_ids_get_one() {
        let doc = parse_mei("<mei><music><layer/></music></mei>").unwrap();
        let layer = doc.first_by_name(&NodeName::Layer).unwrap();
        assert!(doc.id_of(layer).starts_with("m-"));
    }

    #[test]
    fn test_duplicate_ids_are_rejected() {
        let result = parse_mei(r#"<mei><note xml:id="a"/><note xml:id="a"/></mei>"#);
        assert!(matches!(result, Err(MeiError::Edit(_))));
    }

    #[test]
    fn test_malformed_xml() {
        assert!(matches!(parse_mei("<mei><layer></mei>"), Err(MeiError::Xml(_))));
    }
}
