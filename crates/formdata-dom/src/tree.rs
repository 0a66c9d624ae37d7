//! DOM Tree (arena-based allocation)
//!
//! Nodes live in a flat arena and never move; links are NodeId indices.
//! Detach unlinks a node from its parent but keeps it in the arena, so
//! ids held by observers stay usable after removal.

use crate::{Node, NodeId};

/// Arena-based element tree
#[derive(Debug)]
pub struct DomTree {
    nodes: Vec<Node>,
}

impl DomTree {
    /// Create a new tree holding only the document root
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::document()],
        }
    }

    /// The document root
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Get a node by ID
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0 as usize)
    }

    /// Get a mutable node by ID
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0 as usize)
    }

    /// Number of nodes in the arena (detached nodes included)
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if tree is empty
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Create a detached element node
    pub fn create_element(&mut self, tag_name: &str) -> NodeId {
        self.insert(Node::element(tag_name))
    }

    /// Create a detached text node
    pub fn create_text(&mut self, content: &str) -> NodeId {
        self.insert(Node::text(content))
    }

    fn insert(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Append `child` as the last child of `parent`, detaching it first if
    /// it is linked elsewhere.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        debug_assert!(parent != child, "node cannot be its own child");
        self.detach(child);

        let prev_last = self.nodes[parent.0 as usize].last_child;
        {
            let node = &mut self.nodes[child.0 as usize];
            node.parent = parent;
            node.prev_sibling = prev_last;
        }
        if prev_last.is_valid() {
            self.nodes[prev_last.0 as usize].next_sibling = child;
        } else {
            self.nodes[parent.0 as usize].first_child = child;
        }
        self.nodes[parent.0 as usize].last_child = child;
    }

    /// Unlink a node from its parent. No-op for detached nodes.
    pub fn detach(&mut self, id: NodeId) {
        let Some(node) = self.get(id) else { return };
        let (parent, prev, next) = (node.parent, node.prev_sibling, node.next_sibling);
        if !parent.is_valid() {
            return;
        }

        if prev.is_valid() {
            self.nodes[prev.0 as usize].next_sibling = next;
        } else {
            self.nodes[parent.0 as usize].first_child = next;
        }
        if next.is_valid() {
            self.nodes[next.0 as usize].prev_sibling = prev;
        } else {
            self.nodes[parent.0 as usize].last_child = prev;
        }

        let node = &mut self.nodes[id.0 as usize];
        node.parent = NodeId::NONE;
        node.prev_sibling = NodeId::NONE;
        node.next_sibling = NodeId::NONE;
    }

    /// Parent of a node, if attached
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id)
            .map(|n| n.parent)
            .filter(|p| p.is_valid())
    }

    /// Iterate direct children in order
    pub fn children(&self, parent: NodeId) -> Children<'_> {
        Children {
            tree: self,
            next: self.get(parent).map_or(NodeId::NONE, |n| n.first_child),
        }
    }

    /// Iterate descendants of `root` in document order (`root` excluded)
    pub fn descendants(&self, root: NodeId) -> Descendants<'_> {
        Descendants {
            tree: self,
            root,
            next: self.get(root).map_or(NodeId::NONE, |n| n.first_child),
        }
    }

    /// Iterate ancestors from the parent up to the document root
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            tree: self,
            next: self.get(id).map_or(NodeId::NONE, |n| n.parent),
        }
    }

    /// Whether `ancestor` contains `id` (strict: a node does not contain itself)
    pub fn contains(&self, ancestor: NodeId, id: NodeId) -> bool {
        self.ancestors(id).any(|a| a == ancestor)
    }

    /// Tag name of an element node
    pub fn tag_name(&self, id: NodeId) -> Option<&str> {
        self.get(id)
            .and_then(|n| n.as_element())
            .map(|e| e.tag_name.as_str())
    }

    /// Get an attribute value of an element node
    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        self.get(id).and_then(|n| n.as_element()).and_then(|e| e.attr(name))
    }

    /// Set an attribute on an element node
    pub fn set_attr(&mut self, id: NodeId, name: &str, value: &str) {
        if let Some(e) = self.get_mut(id).and_then(|n| n.as_element_mut()) {
            e.set_attr(name, value);
        }
    }

    /// Remove an attribute from an element node
    pub fn remove_attr(&mut self, id: NodeId, name: &str) {
        if let Some(e) = self.get_mut(id).and_then(|n| n.as_element_mut()) {
            e.attrs.remove_attribute(name);
        }
    }

    /// Check whether an element node carries an attribute
    pub fn has_attr(&self, id: NodeId, name: &str) -> bool {
        self.get(id)
            .and_then(|n| n.as_element())
            .is_some_and(|e| e.has_attr(name))
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over direct children
pub struct Children<'a> {
    tree: &'a DomTree,
    next: NodeId,
}

impl<'a> Iterator for Children<'a> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        if !self.next.is_valid() {
            return None;
        }
        let current = self.next;
        self.next = self.tree.get(current).map_or(NodeId::NONE, |n| n.next_sibling);
        Some(current)
    }
}

/// Pre-order iterator over descendants
pub struct Descendants<'a> {
    tree: &'a DomTree,
    root: NodeId,
    next: NodeId,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        if !self.next.is_valid() {
            return None;
        }
        let current = self.next;
        let node = self.tree.get(current)?;

        // first child, else next sibling, else climb toward root
        self.next = if node.first_child.is_valid() {
            node.first_child
        } else {
            let mut at = current;
            loop {
                if at == self.root {
                    break NodeId::NONE;
                }
                let n = &self.tree.nodes[at.0 as usize];
                if n.next_sibling.is_valid() {
                    break n.next_sibling;
                }
                if !n.parent.is_valid() {
                    break NodeId::NONE;
                }
                at = n.parent;
            }
        };
        Some(current)
    }
}

/// Iterator from parent up to the root
pub struct Ancestors<'a> {
    tree: &'a DomTree,
    next: NodeId,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        if !self.next.is_valid() {
            return None;
        }
        let current = self.next;
        self.next = self.tree.get(current).map_or(NodeId::NONE, |n| n.parent);
        Some(current)
    }
}
