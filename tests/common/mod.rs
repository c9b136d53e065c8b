//! Shared fixture and inspection helpers for the integration tests
#![allow(dead_code)]

use neume_editor_wasm::{parse_mei, BoundingBox, MeiDocument, NodeName};

/// Two staves of the Salzinnes antiphoner, folio 1r
pub const CHANT: &str = include_str!("../data/chant.mei");

pub fn load() -> MeiDocument {
    parse_mei(CHANT).expect("fixture parses")
}

pub fn bbox(x: i32) -> BoundingBox {
    BoundingBox::new(x, 100, x + 30, 140)
}

pub fn ids(doc: &MeiDocument, nodes: &[neume_editor_wasm::NodeId]) -> Vec<String> {
    nodes.iter().map(|&n| doc.id_of(n).to_string()).collect()
}

/// Ids of an element's direct children
pub fn child_ids(doc: &MeiDocument, id: &str) -> Vec<String> {
    let node = doc.resolve(id).expect("element exists");
    ids(doc, doc.children(node))
}

/// Ids of every note under an element, in document order
pub fn note_ids(doc: &MeiDocument, id: &str) -> Vec<String> {
    let node = doc.resolve(id).expect("element exists");
    ids(doc, &doc.descendants_by_name(node, &NodeName::Note))
}

/// `(n, layer content ids)` for every staff, in document order
pub fn staff_layout(doc: &MeiDocument) -> Vec<(String, Vec<String>)> {
    doc.elements_by_name(&NodeName::Staff)
        .into_iter()
        .map(|staff| {
            let n = doc.attribute(staff, "n").unwrap_or("").to_string();
            let content = doc
                .children_by_name(staff, &NodeName::Layer)
                .into_iter()
                .flat_map(|layer| ids(doc, doc.children(layer)))
                .collect();
            (n, content)
        })
        .collect()
}

/// Content ids of all layers, in document order
pub fn content_order(doc: &MeiDocument) -> Vec<String> {
    staff_layout(doc).into_iter().flat_map(|(_, content)| content).collect()
}

pub fn staff_numbers(doc: &MeiDocument) -> Vec<String> {
    staff_layout(doc).into_iter().map(|(n, _)| n).collect()
}

pub fn staff_def_numbers(doc: &MeiDocument) -> Vec<String> {
    doc.elements_by_name(&NodeName::StaffDef)
        .into_iter()
        .map(|def| doc.attribute(def, "n").unwrap_or("").to_string())
        .collect()
}

pub fn zone_count(doc: &MeiDocument) -> usize {
    doc.elements_by_name(&NodeName::Zone).len()
}

/// Every `facs` in the document names an existing zone
pub fn assert_no_dangling_facs(doc: &MeiDocument) {
    for name in [NodeName::Neume, NodeName::Division, NodeName::Clef, NodeName::Custos, NodeName::System] {
        for node in doc.elements_by_name(&name) {
            if doc.attribute(node, "facs").is_some() {
                assert!(doc.zone_of(node).is_some(), "dangling facs on '{}'", doc.id_of(node));
            }
        }
    }
}
