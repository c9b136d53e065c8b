//! Arena-backed MEI document tree
//!
//! Nodes live in a slot vector and are addressed by [`NodeId`]. Each node
//! appears in exactly one parent's child list; re-parenting always detaches
//! from the old parent first. A separate index maps `xml:id` strings to slots
//! so ids coming from the client can be resolved.
//!
//! Detaching keeps a node (and its subtree) alive and resolvable so it can be
//! re-inserted elsewhere; removing discards the whole subtree.

use std::collections::HashMap;

use uuid::Uuid;

use super::node::{Node, NodeId, NodeName};
use crate::errors::{EditError, EditResult};

/// Mint a fresh element id in the `m-<uuid>` form used by MEI tooling
pub fn new_element_id() -> String {
    format!("m-{}", Uuid::new_v4())
}

/// An MEI document held in memory
#[derive(Debug, Clone)]
pub struct MeiDocument {
    nodes: Vec<Option<Node>>,
    index: HashMap<String, NodeId>,
    root: NodeId,
    /// Namespace declarations on the root element: (prefix, uri)
    pub namespaces: Vec<(Option<String>, String)>,
}

impl MeiDocument {
    /// Create a document with a bare root element
    pub fn new(root_name: NodeName) -> Self {
        let mut doc = Self {
            nodes: Vec::new(),
            index: HashMap::new(),
            root: NodeId(0),
            namespaces: Vec::new(),
        };
        doc.root = doc.create(root_name);
        doc
    }

    /// Create a document whose root carries the given id
    pub fn with_root(root_name: NodeName, root_id: &str) -> EditResult<Self> {
        let mut doc = Self {
            nodes: Vec::new(),
            index: HashMap::new(),
            root: NodeId(0),
            namespaces: Vec::new(),
        };
        doc.root = doc.create_with_id(root_name, root_id)?;
        Ok(doc)
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Number of live nodes, attached or not
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    // ------------------------------------------------------------------
    // Creation and lookup
    // ------------------------------------------------------------------

    /// Create a detached node with a freshly minted id
    pub fn create(&mut self, name: NodeName) -> NodeId {
        let mut id = new_element_id();
        while self.index.contains_key(&id) {
            id = new_element_id();
        }
        self.insert_slot(Node::new(name, id))
    }

    /// Create a detached node with a caller-supplied id
    pub fn create_with_id(&mut self, name: NodeName, id: &str) -> EditResult<NodeId> {
        if self.index.contains_key(id) {
            return Err(EditError::malformed(format!("duplicate element id '{}'", id)));
        }
        Ok(self.insert_slot(Node::new(name, id)))
    }

    fn insert_slot(&mut self, node: Node) -> NodeId {
        let slot = NodeId(self.nodes.len());
        self.index.insert(node.id.clone(), slot);
        self.nodes.push(Some(node));
        slot
    }

    /// Look up a live node
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0).and_then(|slot| slot.as_ref())
    }

    /// Access a node the engine is holding a handle to
    ///
    /// Handles are only produced by this tree, so a missing slot means the
    /// caller kept a handle across a removal. Operations resolve ids after
    /// any step that can remove nodes; the fallible mutators below check
    /// their handles with [`MeiDocument::live`] and return an error instead.
    pub fn node(&self, id: NodeId) -> &Node {
        match self.get(id) {
            Some(node) => node,
            None => panic!("node {:?} used after removal", id),
        }
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        match self.nodes.get_mut(id.0).and_then(|slot| slot.as_mut()) {
            Some(node) => node,
            None => panic!("node {:?} used after removal", id),
        }
    }

    /// Whether a handle still refers to a node that has not been removed
    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    /// Fail with `MalformedInput` if the handle was removed
    pub fn live(&self, id: NodeId) -> EditResult<NodeId> {
        if self.contains(id) {
            Ok(id)
        } else {
            Err(EditError::malformed(format!("element {:?} was removed earlier in this edit", id)))
        }
    }

    /// Resolve an `xml:id`
    pub fn find_by_id(&self, id: &str) -> Option<NodeId> {
        self.index.get(id).copied()
    }

    /// Resolve an `xml:id`, failing with `NotFound`
    pub fn resolve(&self, id: &str) -> EditResult<NodeId> {
        self.find_by_id(id).ok_or_else(|| EditError::not_found(id))
    }

    /// Resolve an `xml:id` that must name a specific element
    pub fn resolve_named(&self, id: &str, name: &NodeName) -> EditResult<NodeId> {
        let node = self.resolve(id)?;
        if self.node(node).is(name) {
            Ok(node)
        } else {
            Err(EditError::malformed(format!(
                "element '{}' is a <{}>, expected <{}>",
                id,
                self.node(node).name,
                name
            )))
        }
    }

    /// The `xml:id` of a node
    pub fn id_of(&self, node: NodeId) -> &str {
        &self.node(node).id
    }

    pub fn name_of(&self, node: NodeId) -> &NodeName {
        &self.node(node).name
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.node(node).parent
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        &self.node(node).children
    }

    pub fn attribute(&self, node: NodeId, key: &str) -> Option<&str> {
        self.node(node).attribute(key)
    }

    pub fn set_attribute(&mut self, node: NodeId, key: &str, value: impl Into<String>) {
        self.node_mut(node).set_attribute(key, value);
    }

    pub fn remove_attribute(&mut self, node: NodeId, key: &str) -> Option<String> {
        self.node_mut(node).remove_attribute(key)
    }

    // ------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------

    /// Direct children with the given name, in order
    pub fn children_by_name(&self, parent: NodeId, name: &NodeName) -> Vec<NodeId> {
        self.children(parent)
            .iter()
            .copied()
            .filter(|&c| self.node(c).is(name))
            .collect()
    }

    /// Descendants (excluding `node` itself) with the given name, in document order
    pub fn descendants_by_name(&self, node: NodeId, name: &NodeName) -> Vec<NodeId> {
        let mut found = Vec::new();
        let mut stack: Vec<NodeId> = self.children(node).iter().rev().copied().collect();
        while let Some(current) = stack.pop() {
            if self.node(current).is(name) {
                found.push(current);
            }
            stack.extend(self.children(current).iter().rev().copied());
        }
        found
    }

    /// All attached elements with the given name, in document order
    pub fn elements_by_name(&self, name: &NodeName) -> Vec<NodeId> {
        let mut found = Vec::new();
        if self.node(self.root).is(name) {
            found.push(self.root);
        }
        found.extend(self.descendants_by_name(self.root, name));
        found
    }

    pub fn first_by_name(&self, name: &NodeName) -> Option<NodeId> {
        self.elements_by_name(name).into_iter().next()
    }

    pub fn last_by_name(&self, name: &NodeName) -> Option<NodeId> {
        self.elements_by_name(name).into_iter().last()
    }

    /// The node's siblings including itself, in order
    pub fn peers(&self, node: NodeId) -> Vec<NodeId> {
        match self.parent(node) {
            Some(parent) => self.children(parent).to_vec(),
            None => vec![node],
        }
    }

    /// Siblings from `node` (inclusive) to the end of its parent
    pub fn following_peers(&self, node: NodeId) -> Vec<NodeId> {
        let peers = self.peers(node);
        match peers.iter().position(|&p| p == node) {
            Some(pos) => peers[pos..].to_vec(),
            None => Vec::new(),
        }
    }

    pub fn next_sibling(&self, node: NodeId) -> Option<NodeId> {
        let parent = self.parent(node)?;
        let siblings = self.children(parent);
        let pos = siblings.iter().position(|&c| c == node)?;
        siblings.get(pos + 1).copied()
    }

    /// Nearest ancestor (excluding `node`) with the given name
    pub fn ancestor_by_name(&self, node: NodeId, name: &NodeName) -> Option<NodeId> {
        let mut current = self.parent(node);
        while let Some(candidate) = current {
            if self.node(candidate).is(name) {
                return Some(candidate);
            }
            current = self.parent(candidate);
        }
        None
    }

    /// Whether the node is reachable from the root
    pub fn is_attached(&self, node: NodeId) -> bool {
        let mut current = node;
        loop {
            if current == self.root {
                return true;
            }
            match self.parent(current) {
                Some(parent) => current = parent,
                None => return false,
            }
        }
    }

    // ------------------------------------------------------------------
    // Mutation
    // ------------------------------------------------------------------

    /// Append `child` as the last child of `parent`
    pub fn append(&mut self, parent: NodeId, child: NodeId) -> EditResult<()> {
        self.live(parent)?;
        self.live(child)?;
        self.check_not_ancestor(child, parent)?;
        self.detach(child);
        self.node_mut(parent).children.push(child);
        self.node_mut(child).parent = Some(parent);
        Ok(())
    }

    /// Insert `child` into `parent` immediately before `anchor`
    pub fn insert_before(&mut self, parent: NodeId, anchor: NodeId, child: NodeId) -> EditResult<()> {
        self.insert_relative(parent, anchor, child, 0)
    }

    /// Insert `child` into `parent` immediately after `anchor`
    pub fn insert_after(&mut self, parent: NodeId, anchor: NodeId, child: NodeId) -> EditResult<()> {
        self.insert_relative(parent, anchor, child, 1)
    }

    fn insert_relative(
        &mut self,
        parent: NodeId,
        anchor: NodeId,
        child: NodeId,
        offset: usize,
    ) -> EditResult<()> {
        self.live(parent)?;
        self.live(anchor)?;
        self.live(child)?;
        if anchor == child {
            return Err(EditError::malformed(format!(
                "cannot insert '{}' relative to itself",
                self.id_of(child)
            )));
        }
        if self.parent(anchor) != Some(parent) {
            return Err(EditError::malformed(format!(
                "'{}' is not a child of '{}'",
                self.id_of(anchor),
                self.id_of(parent)
            )));
        }
        self.check_not_ancestor(child, parent)?;
        self.detach(child);
        let pos = self
            .children(parent)
            .iter()
            .position(|&c| c == anchor)
            .ok_or_else(|| EditError::not_found(self.id_of(anchor).to_string()))?;
        self.node_mut(parent).children.insert(pos + offset, child);
        self.node_mut(child).parent = Some(parent);
        Ok(())
    }

    /// Insert `child` before `anchor`, into whatever element owns `anchor`
    pub fn insert_before_node(&mut self, anchor: NodeId, child: NodeId) -> EditResult<()> {
        self.live(anchor)?;
        let parent = self.parent(anchor).ok_or_else(|| {
            EditError::malformed(format!("'{}' has no parent", self.id_of(anchor)))
        })?;
        self.insert_before(parent, anchor, child)
    }

    fn check_not_ancestor(&self, child: NodeId, parent: NodeId) -> EditResult<()> {
        let mut current = Some(parent);
        while let Some(node) = current {
            if node == child {
                return Err(EditError::malformed(format!(
                    "cannot place '{}' inside its own subtree",
                    self.id_of(child)
                )));
            }
            current = self.parent(node);
        }
        Ok(())
    }

    /// Unlink a node from its parent, keeping it alive for re-insertion
    ///
    /// A removed handle has nothing to unlink.
    pub fn detach(&mut self, node: NodeId) {
        let parent = match self.nodes.get_mut(node.0).and_then(|slot| slot.as_mut()) {
            Some(entry) => entry.parent.take(),
            None => None,
        };
        if let Some(parent) = parent {
            self.node_mut(parent).children.retain(|&c| c != node);
        }
    }

    /// Unlink a node and discard it together with its subtree
    pub fn remove(&mut self, node: NodeId) {
        self.detach(node);
        let mut stack = vec![node];
        while let Some(current) = stack.pop() {
            if let Some(removed) = self.nodes.get_mut(current.0).and_then(|slot| slot.take()) {
                self.index.remove(&removed.id);
                stack.extend(removed.children);
            }
        }
    }

    /// Run an edit on a scratch copy and keep the result only if it succeeds
    pub fn transact<T>(&mut self, edit: impl FnOnce(&mut MeiDocument) -> EditResult<T>) -> EditResult<T> {
        let mut scratch = self.clone();
        let value = edit(&mut scratch)?;
        *self = scratch;
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layer_with_three() -> (MeiDocument, NodeId, Vec<NodeId>) {
        let mut doc = MeiDocument::new(NodeName::Other("mei".to_string()));
        let layer = doc.create(NodeName::Layer);
        let root = doc.root();
        doc.append(root, layer).unwrap();
        let kids: Vec<NodeId> = (0..3)
            .map(|_| {
                let n = doc.create(NodeName::Neume);
                doc.append(layer, n).unwrap();
                n
            })
            .collect();
        (doc, layer, kids)
    }

    #[test]
    fn test_insert_before_and_after() {
        let (mut doc, layer, kids) = layer_with_three();
        let fresh = doc.create(NodeName::Division);
        doc.insert_before(layer, kids[1], fresh).unwrap();
        assert_eq!(doc.children(layer), &[kids[0], fresh, kids[1], kids[2]]);

        doc.insert_after(layer, kids[2], fresh).unwrap();
        assert_eq!(doc.children(layer), &[kids[0], kids[1], kids[2], fresh]);
        assert_eq!(doc.parent(fresh), Some(layer));
    }

    #[test]
    fn test_insert_before_foreign_anchor_fails() {
        let (mut doc, _layer, kids) = layer_with_three();
        let fresh = doc.create(NodeName::Nc);
        let result = doc.insert_before(kids[0], kids[1], fresh);
        assert!(matches!(result, Err(EditError::MalformedInput(_))));
    }

    #[test]
    fn test_reparent_never_duplicates() {
        let (mut doc, layer, kids) = layer_with_three();
        let other = doc.create(NodeName::Layer);
        let root = doc.root();
        doc.append(root, other).unwrap();
        doc.append(other, kids[0]).unwrap();

        assert_eq!(doc.children(layer), &[kids[1], kids[2]]);
        assert_eq!(doc.children(other), &[kids[0]]);
    }

    #[test]
    fn test_remove_discards_subtree() {
        let (mut doc, layer, kids) = layer_with_three();
        let nc = doc.create(NodeName::Nc);
        doc.append(kids[0], nc).unwrap();
        let nc_id = doc.id_of(nc).to_string();
        let neume_id = doc.id_of(kids[0]).to_string();

        doc.remove(kids[0]);
        assert!(doc.find_by_id(&nc_id).is_none());
        assert!(doc.find_by_id(&neume_id).is_none());
        assert_eq!(doc.children(layer).len(), 2);
    }

    #[test]
    fn test_detach_keeps_node_resolvable() {
        let (mut doc, layer, kids) = layer_with_three();
        let id = doc.id_of(kids[1]).to_string();
        doc.detach(kids[1]);
        assert_eq!(doc.find_by_id(&id), Some(kids[1]));
        assert!(!doc.is_attached(kids[1]));
        assert_eq!(doc.children(layer).len(), 2);
    }

    #[test]
    fn test_descendants_in_document_order() {
        let (mut doc, _layer, kids) = layer_with_three();
        let mut notes = Vec::new();
        for &neume in &kids[..2] {
            let nc = doc.create(NodeName::Nc);
            doc.append(neume, nc).unwrap();
            for _ in 0..2 {
                let note = doc.create(NodeName::Note);
                doc.append(nc, note).unwrap();
                notes.push(note);
            }
        }
        let root = doc.root();
        assert_eq!(doc.descendants_by_name(root, &NodeName::Note), notes);
        assert_eq!(doc.following_peers(kids[1]), vec![kids[1], kids[2]]);
    }

    #[test]
    fn test_cannot_insert_into_own_subtree() {
        let (mut doc, layer, kids) = layer_with_three();
        let result = doc.append(kids[0], layer);
        assert!(result.is_err());
    }

    #[test]
    fn test_removed_handles_are_rejected() {
        let (mut doc, layer, kids) = layer_with_three();
        let fresh = doc.create(NodeName::Division);
        doc.remove(kids[1]);

        assert!(!doc.contains(kids[1]));
        assert!(matches!(doc.insert_before_node(kids[1], fresh), Err(EditError::MalformedInput(_))));
        assert!(matches!(doc.append(kids[1], fresh), Err(EditError::MalformedInput(_))));
        assert!(matches!(doc.insert_after(layer, kids[1], fresh), Err(EditError::MalformedInput(_))));

        doc.remove(layer);
        assert!(matches!(doc.append(layer, fresh), Err(EditError::MalformedInput(_))));
        assert_eq!(doc.parent(fresh), None);

        doc.remove(kids[1]);
        assert_eq!(doc.children(doc.root()).len(), 0);
    }

    #[test]
    fn test_transact_rolls_back_on_error() {
        let (mut doc, layer, kids) = layer_with_three();
        let result: EditResult<()> = doc.transact(|d| {
            d.remove(kids[0]);
            Err(EditError::malformed("boom"))
        });
        assert!(result.is_err());
        assert_eq!(doc.children(layer).len(), 3);
    }
}
