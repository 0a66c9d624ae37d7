//! Tree Nodes
//!
//! Compact node representation: parent/sibling/child links by NodeId.

use crate::{NamedNodeMap, NodeId};

/// A single tree node
#[derive(Debug)]
pub struct Node {
    /// Parent node (NONE if detached or root)
    pub parent: NodeId,
    /// First child
    pub first_child: NodeId,
    /// Last child (for O(1) append)
    pub last_child: NodeId,
    /// Previous sibling
    pub prev_sibling: NodeId,
    /// Next sibling
    pub next_sibling: NodeId,
    /// Node-specific data
    pub data: NodeData,
}

impl Node {
    /// Create a document root node
    pub fn document() -> Self {
        Self::with_data(NodeData::Document)
    }

    /// Create a new element node
    pub fn element(tag_name: &str) -> Self {
        Self::with_data(NodeData::Element(ElementData::new(tag_name)))
    }

    /// Create a new text node
    pub fn text(content: impl Into<String>) -> Self {
        Self::with_data(NodeData::Text(TextData {
            content: content.into(),
        }))
    }

    fn with_data(data: NodeData) -> Self {
        Self {
            parent: NodeId::NONE,
            first_child: NodeId::NONE,
            last_child: NodeId::NONE,
            prev_sibling: NodeId::NONE,
            next_sibling: NodeId::NONE,
            data,
        }
    }

    /// Check if this is an element
    #[inline]
    pub fn is_element(&self) -> bool {
        matches!(self.data, NodeData::Element(_))
    }

    /// Get element data if this is an element
    #[inline]
    pub fn as_element(&self) -> Option<&ElementData> {
        match &self.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Get mutable element data
    #[inline]
    pub fn as_element_mut(&mut self) -> Option<&mut ElementData> {
        match &mut self.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Get text content if this is a text node
    #[inline]
    pub fn as_text(&self) -> Option<&str> {
        match &self.data {
            NodeData::Text(t) => Some(&t.content),
            _ => None,
        }
    }
}

/// Node-specific data
#[derive(Debug)]
pub enum NodeData {
    /// Document root
    Document,
    /// Element
    Element(ElementData),
    /// Text content
    Text(TextData),
}

/// Element-specific data
#[derive(Debug)]
pub struct ElementData {
    /// Tag name, lowercase
    pub tag_name: String,
    /// Attribute collection
    pub attrs: NamedNodeMap,
}

impl ElementData {
    pub fn new(tag_name: &str) -> Self {
        Self {
            tag_name: tag_name.to_ascii_lowercase(),
            attrs: NamedNodeMap::new(),
        }
    }

    /// Get an attribute value
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get_attribute(name)
    }

    /// Set an attribute
    pub fn set_attr(&mut self, name: &str, value: &str) {
        self.attrs.set_attribute(name, value);
    }

    /// Check if an attribute is present
    pub fn has_attr(&self, name: &str) -> bool {
        self.attrs.has_attribute(name)
    }
}

/// Text node data
#[derive(Debug)]
pub struct TextData {
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_node() {
        let node = Node::element("INPUT");
        assert!(node.is_element());
        assert_eq!(node.as_element().unwrap().tag_name, "input");
        assert!(!node.parent.is_valid());
    }

    #[test]
    fn test_text_node() {
        let node = Node::text("hello");
        assert!(!node.is_element());
        assert_eq!(node.as_text(), Some("hello"));
    }

    #[test]
    fn test_element_attrs() {
        let mut data = ElementData::new("input");
        data.set_attr("name", "q");
        assert_eq!(data.attr("name"), Some("q"));
        assert!(data.has_attr("name"));
        assert!(!data.has_attr("value"));
    }
}
