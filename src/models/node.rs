//! Node representation for the MEI document tree
//!
//! Element names are a closed enumeration for everything the editor reasons
//! about; anything else in the document is carried through as `Other` so the
//! store can write it back untouched.

use std::fmt;

/// Index of a node inside the document arena.
///
/// A `NodeId` is only a lookup key. Ownership of a node belongs to its parent's
/// child list; the parent link stored on each node is a back-reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

/// Element names the editing engine dispatches on
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NodeName {
    Neume,
    Nc,
    Note,
    Dot,
    Episema,
    Liquescent,
    Division,
    Clef,
    Custos,
    Zone,
    Surface,
    Section,
    Staff,
    Layer,
    StaffDef,
    StaffGrp,
    System,
    Sb,
    Page,
    /// Any element not listed above, kept verbatim
    Other(String),
}

/// Structural category of an element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeCategory {
    /// Elements that sit in a layer and may own a zone via `facs`
    Content,
    /// Elements nested inside a neume
    Component,
    /// Elements whose job is to hold other elements
    Container,
    /// Bounding boxes under `surface`
    Zone,
    /// Everything else
    Other,
}

impl NodeName {
    /// Parse an element local name
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "neume" => NodeName::Neume,
            "nc" => NodeName::Nc,
            "note" => NodeName::Note,
            "dot" => NodeName::Dot,
            "episema" => NodeName::Episema,
            "liquescent" => NodeName::Liquescent,
            "division" => NodeName::Division,
            "clef" => NodeName::Clef,
            "custos" => NodeName::Custos,
            "zone" => NodeName::Zone,
            "surface" => NodeName::Surface,
            "section" => NodeName::Section,
            "staff" => NodeName::Staff,
            "layer" => NodeName::Layer,
            "staffDef" => NodeName::StaffDef,
            "staffGrp" => NodeName::StaffGrp,
            "system" => NodeName::System,
            "sb" => NodeName::Sb,
            "page" => NodeName::Page,
            other => NodeName::Other(other.to_string()),
        }
    }

    /// The element name as written in MEI
    pub fn as_tag(&self) -> &str {
        match self {
            NodeName::Neume => "neume",
            NodeName::Nc => "nc",
            NodeName::Note => "note",
            NodeName::Dot => "dot",
            NodeName::Episema => "episema",
            NodeName::Liquescent => "liquescent",
            NodeName::Division => "division",
            NodeName::Clef => "clef",
            NodeName::Custos => "custos",
            NodeName::Zone => "zone",
            NodeName::Surface => "surface",
            NodeName::Section => "section",
            NodeName::Staff => "staff",
            NodeName::Layer => "layer",
            NodeName::StaffDef => "staffDef",
            NodeName::StaffGrp => "staffGrp",
            NodeName::System => "system",
            NodeName::Sb => "sb",
            NodeName::Page => "page",
            NodeName::Other(tag) => tag.as_str(),
        }
    }

    pub fn category(&self) -> NodeCategory {
        match self {
            NodeName::Neume
            | NodeName::Division
            | NodeName::Clef
            | NodeName::Custos
            | NodeName::Sb
            | NodeName::System => NodeCategory::Content,
            NodeName::Nc
            | NodeName::Note
            | NodeName::Dot
            | NodeName::Episema
            | NodeName::Liquescent => NodeCategory::Component,
            NodeName::Surface
            | NodeName::Section
            | NodeName::Staff
            | NodeName::Layer
            | NodeName::StaffGrp
            | NodeName::StaffDef
            | NodeName::Page => NodeCategory::Container,
            NodeName::Zone => NodeCategory::Zone,
            NodeName::Other(_) => NodeCategory::Other,
        }
    }
}

impl fmt::Display for NodeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_tag())
    }
}

/// One element of the document
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub name: NodeName,
    /// Value of `xml:id`
    pub id: String,
    /// Attributes other than `xml:id`, in document order
    pub attributes: Vec<(String, String)>,
    /// Direct character content, if any
    pub text: Option<String>,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
}

impl Node {
    pub fn new(name: NodeName, id: impl Into<String>) -> Self {
        Self {
            name,
            id: id.into(),
            attributes: Vec::new(),
            text: None,
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Set an attribute, keeping its position if it already exists
    pub fn set_attribute(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        match self.attributes.iter_mut().find(|(k, _)| k == key) {
            Some(slot) => slot.1 = value,
            None => self.attributes.push((key.to_string(), value)),
        }
    }

    pub fn remove_attribute(&mut self, key: &str) -> Option<String> {
        let pos = self.attributes.iter().position(|(k, _)| k == key)?;
        Some(self.attributes.remove(pos).1)
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn is(&self, name: &NodeName) -> bool {
        &self.name == name
    }
}
