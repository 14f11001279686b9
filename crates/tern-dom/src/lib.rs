//! Document tree implementation for the tern viewer.
//!
//! This crate provides the arena-based tag tree produced by the markup
//! parser and consumed by the text renderer.
//!
//! # Design
//!
//! The tree uses arena allocation with [`NodeId`] indices for all
//! relationships, providing O(1) access and traversal without borrow
//! checker issues. This matters for the parser in particular: lenient
//! recovery splices not-yet-attached nodes into an ancestor found by
//! searching the open-node stack, which is awkward to express with owned
//! parent/child links but trivial with indices.

use std::collections::HashMap;

/// Map of attribute names to values for an element.
///
/// Keys are case-sensitive as written in the markup. A duplicated
/// attribute name overwrites the earlier occurrence (last write wins).
pub type AttributesMap = HashMap<String, AttrValue>;

/// A type-safe index into the document tree.
///
/// `NodeId` provides O(1) access to any node in the tree without
/// borrowing issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub usize);

impl NodeId {
    /// The root document node is always at index 0.
    pub const ROOT: NodeId = NodeId(0);
}

/// The value of a single attribute.
///
/// Markup allows both `name="value"` and bare boolean attributes such as
/// `disabled`; the two forms are kept distinct so the renderer can tell a
/// missing value apart from an empty one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrValue {
    /// An attribute with an explicit textual value.
    Value(String),
    /// A bare attribute with no value (`<input disabled>`).
    Flag,
}

impl AttrValue {
    /// Returns the textual value if this attribute has one.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Value(text) => Some(text.as_str()),
            Self::Flag => None,
        }
    }
}

/// Construction progress of an element while the parser holds it open.
///
/// The stage is meaningless once parsing completes: well-formed input
/// leaves every element in [`BuildStage::CollectingBody`], but malformed
/// input (an opening tag with no `>`) may leave earlier stages in the
/// final tree, and consumers must tolerate that.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildStage {
    /// The element was opened with `<` but has no name yet.
    Naming,
    /// The name is known; identifiers now parse as attributes.
    CollectingAttributes,
    /// The opening tag was completed with `>`; children may follow.
    CollectingBody,
}

/// A single node in the document tree.
#[derive(Debug, Clone)]
pub struct Node {
    /// What kind of node this is, with its payload.
    pub kind: NodeKind,
    /// The parent node, or `None` while unattached or for the root.
    pub parent: Option<NodeId>,
    /// Children in document order.
    pub children: Vec<NodeId>,
}

/// The payload of a node: the synthetic document root, a text leaf, or an
/// element.
#[derive(Debug, Clone)]
pub enum NodeKind {
    /// The synthetic root that owns all top-level nodes.
    Document,
    /// A raw text leaf. Not yet sanitized; whitespace and entity
    /// references are preserved exactly as tokenized.
    Text(String),
    /// A named element with attributes.
    Element(ElementData),
}

/// Element-specific data.
#[derive(Debug, Clone)]
pub struct ElementData {
    /// The tag name as written (case preserved).
    pub name: String,
    /// The element's attribute map.
    pub attributes: AttributesMap,
    /// Construction progress; see [`BuildStage`].
    pub stage: BuildStage,
    /// Whether this element is self-closing. Void elements never acquire
    /// children and are skipped when matching closing tags.
    pub void: bool,
}

impl ElementData {
    /// Create an element in the [`BuildStage::Naming`] stage with no name
    /// and no attributes, exactly as the parser allocates one on `<`.
    #[must_use]
    pub fn unnamed() -> Self {
        Self {
            name: String::new(),
            attributes: AttributesMap::new(),
            stage: BuildStage::Naming,
            void: false,
        }
    }

    /// Returns the textual value of an attribute, if present and not a
    /// bare flag.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).and_then(AttrValue::as_str)
    }
}

/// Arena-based document tree with O(1) node access.
///
/// All nodes live in a contiguous vector, addressed by [`NodeId`]. The
/// Document node is always at index 0. Nodes are allocated detached and
/// attached later with [`DocTree::append_child`]; the parser exploits
/// this to keep nodes on its open stack before their parent is known.
#[derive(Debug, Clone)]
pub struct DocTree {
    /// All nodes in the tree, indexed by `NodeId`.
    nodes: Vec<Node>,
}

impl DocTree {
    /// Create a new tree holding just the Document node.
    #[must_use]
    pub fn new() -> Self {
        DocTree {
            nodes: vec![Node {
                kind: NodeKind::Document,
                parent: None,
                children: Vec::new(),
            }],
        }
    }

    /// Get the root document node ID.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by its ID.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Get a mutable reference to a node by its ID.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0)
    }

    /// Get the number of nodes in the tree.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the tree is empty (it never is; the Document node always
    /// exists).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Allocate a new node and return its ID.
    ///
    /// The node is not yet attached to the tree.
    pub fn alloc(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            kind,
            parent: None,
            children: Vec::new(),
        });
        id
    }

    /// Append `child` as the last child of `parent`.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.nodes[parent.0].children.push(child);
        self.nodes[child.0].parent = Some(parent);
    }

    /// Get the parent of a node.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    /// Get all children of a node, in document order.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Get element data if this node is an element.
    #[must_use]
    pub fn as_element(&self, id: NodeId) -> Option<&ElementData> {
        self.get(id).and_then(|n| match &n.kind {
            NodeKind::Element(data) => Some(data),
            _ => None,
        })
    }

    /// Get mutable element data if this node is an element.
    pub fn as_element_mut(&mut self, id: NodeId) -> Option<&mut ElementData> {
        self.get_mut(id).and_then(|n| match &mut n.kind {
            NodeKind::Element(data) => Some(data),
            _ => None,
        })
    }

    /// Get text content if this node is a text leaf.
    #[must_use]
    pub fn as_text(&self, id: NodeId) -> Option<&str> {
        self.get(id).and_then(|n| match &n.kind {
            NodeKind::Text(s) => Some(s.as_str()),
            _ => None,
        })
    }

    /// Iterate over all ancestors of a node, from parent to root.
    pub fn ancestors(&self, id: NodeId) -> AncestorIterator<'_> {
        AncestorIterator {
            tree: self,
            current: self.parent(id),
        }
    }
}

impl Default for DocTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over ancestors of a node.
pub struct AncestorIterator<'a> {
    tree: &'a DocTree,
    current: Option<NodeId>,
}

impl<'a> Iterator for AncestorIterator<'a> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        self.current = self.tree.parent(id);
        Some(id)
    }
}
