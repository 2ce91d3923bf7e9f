//! Node tree produced by the mulga markup scanner.
//!
//! # Design
//!
//! The tree uses arena allocation with [`NodeId`] indices for all
//! relationships, providing O(1) access and traversal without borrow checker
//! issues. Children are stored in a `Vec` in document order, replacing the
//! hand-walked singly-linked lists (and their O(n²) append) the original
//! scanner grew out of.
//!
//! Parent links are plain indices: they can never dangle and never take part
//! in destruction. Dropping the tree drops every node exactly once, children
//! and all, regardless of how the document was nested.

/// A type-safe index into the node tree.
///
/// `NodeId` provides O(1) access to any node in the tree without borrowing
/// issues. Ids are only meaningful for the tree that allocated them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub usize);

impl NodeId {
    /// The synthetic document node is always at index 0.
    pub const ROOT: NodeId = NodeId(0);
}

/// One node in the arena.
///
/// Stores indices for parent/child/sibling relationships, enabling O(1)
/// traversal in any direction. Sibling links are maintained alongside the
/// parent's child list so document order can be walked either way.
#[derive(Debug, Clone)]
pub struct Node {
    /// What kind of node this is, plus its element payload if any.
    pub data: NodeData,

    /// The node's parent, or `None` for the document node.
    ///
    /// A navigation link only; never used for destruction.
    pub parent: Option<NodeId>,

    /// The node's children, in document order.
    pub children: Vec<NodeId>,

    /// The sibling immediately following this node under the same parent.
    pub next_sibling: Option<NodeId>,

    /// The sibling immediately preceding this node under the same parent.
    pub prev_sibling: Option<NodeId>,
}

/// The kind of a node.
#[derive(Debug, Clone)]
pub enum NodeData {
    /// The synthetic root that anchors every parse result. A document with
    /// several top-level elements keeps them all, in order, as children of
    /// this node.
    Document,
    /// A markup element scanned from a `<tag ...>` in the source.
    Element(ElementData),
}

/// Element payload: tag name, optional text content, and attributes.
#[derive(Debug, Clone)]
pub struct ElementData {
    /// The element name — the first word after `<`.
    ///
    /// An empty tag name is malformed input, but the scanner tolerates it
    /// structurally, so an empty string is representable here.
    pub tag: String,

    /// Text content directly between the opening and closing tag.
    ///
    /// `None` when the element had no text or when the only content was
    /// whitespace; whitespace-only runs are discarded by the scanner, never
    /// stored. When an element carries several non-blank text runs the last
    /// one wins.
    pub text: Option<String>,

    /// Attributes in source order.
    ///
    /// Keys need not be unique: the list is append-only and no deduplication
    /// is performed, so a repeated key appears once per occurrence.
    pub attributes: Vec<Attribute>,
}

impl ElementData {
    /// Create element data with the given tag, no text, and no attributes.
    #[must_use]
    pub const fn new(tag: String) -> Self {
        Self {
            tag,
            text: None,
            attributes: Vec::new(),
        }
    }

    /// Look up the value of the first attribute with the given key.
    ///
    /// Duplicate keys are kept in the list, so "first" is the occurrence
    /// earliest in source order.
    #[must_use]
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|attr| attr.key == key)
            .map(|attr| attr.value.as_str())
    }
}

/// A key/value attribute pair.
///
/// Both halves are non-empty by construction in the scanner: a fragment
/// missing either its key or its quoted value never reaches the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// The name left of the `=` sign, e.g. `x` in `x="20"`.
    pub key: String,
    /// The text between the quote marks right of the `=`, e.g. `20` in
    /// `x="20"`.
    pub value: String,
}

impl Attribute {
    /// Create a new attribute with the given key and value.
    #[must_use]
    pub const fn new(key: String, value: String) -> Self {
        Self { key, value }
    }
}

/// Arena-based node tree with O(1) node access and traversal.
///
/// All nodes live in one contiguous vector indexed by [`NodeId`]. The
/// document node at [`NodeId::ROOT`] is created up front and owns (directly
/// or transitively) every node allocated afterwards, so the whole parse
/// result is freed in one place when the tree is dropped.
#[derive(Debug, Clone)]
pub struct MarkupTree {
    /// All nodes in the tree, indexed by `NodeId`.
    nodes: Vec<Node>,
}

impl MarkupTree {
    /// Create a new tree holding just the document node.
    #[must_use]
    pub fn new() -> Self {
        let document = Node {
            data: NodeData::Document,
            parent: None,
            children: Vec::new(),
            next_sibling: None,
            prev_sibling: None,
        };
        MarkupTree {
            nodes: vec![document],
        }
    }

    /// Get the document node id.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by its id.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Get a mutable reference to a node by its id.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0)
    }

    /// Number of nodes in the tree, document node included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree is empty. Always false in practice: `new()` seeds
    /// the document node.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Allocate a new node and return its id.
    ///
    /// The node is not yet attached to the tree; call [`MarkupTree::append_child`]
    /// to link it in.
    pub fn alloc(&mut self, data: NodeData) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            data,
            parent: None,
            children: Vec::new(),
            next_sibling: None,
            prev_sibling: None,
        });
        id
    }

    /// Allocate a new element node with the given tag and return its id.
    pub fn alloc_element(&mut self, tag: String) -> NodeId {
        self.alloc(NodeData::Element(ElementData::new(tag)))
    }

    /// Append `child` as the last child of `parent`, updating the parent
    /// link, the child list, and the sibling links of the previous last
    /// child.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        // The current last child (if any) gains a next-sibling link.
        let prev_last_child = self.nodes[parent.0].children.last().copied();

        self.nodes[parent.0].children.push(child);
        self.nodes[child.0].parent = Some(parent);

        if let Some(prev_id) = prev_last_child {
            self.nodes[prev_id.0].next_sibling = Some(child);
            self.nodes[child.0].prev_sibling = Some(prev_id);
        }
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

    /// Get the first child of a node.
    #[must_use]
    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.children.first().copied())
    }

    /// Get the last child of a node.
    #[must_use]
    pub fn last_child(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.children.last().copied())
    }

    /// Get the next sibling of a node.
    #[must_use]
    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.next_sibling)
    }

    /// Get the previous sibling of a node.
    #[must_use]
    pub fn prev_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.prev_sibling)
    }

    /// Check if `descendant` sits anywhere below `ancestor`.
    #[must_use]
    pub fn is_descendant_of(&self, descendant: NodeId, ancestor: NodeId) -> bool {
        let mut current = self.parent(descendant);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    /// Iterate over all ancestors of a node, from parent to the document
    /// node.
    #[must_use]
    pub fn ancestors(&self, id: NodeId) -> AncestorIterator<'_> {
        AncestorIterator {
            tree: self,
            current: self.parent(id),
        }
    }

    /// Get element data if this node is an element.
    #[must_use]
    pub fn as_element(&self, id: NodeId) -> Option<&ElementData> {
        self.get(id).and_then(|n| match &n.data {
            NodeData::Element(data) => Some(data),
            NodeData::Document => None,
        })
    }

    /// Get mutable element data if this node is an element.
    pub fn as_element_mut(&mut self, id: NodeId) -> Option<&mut ElementData> {
        self.get_mut(id).and_then(|n| match &mut n.data {
            NodeData::Element(data) => Some(data),
            NodeData::Document => None,
        })
    }

    /// The document element: the first element child of the document node.
    ///
    /// This is the tree the caller usually wants after a parse. `None` when
    /// the input was empty or produced no elements at all.
    #[must_use]
    pub fn document_element(&self) -> Option<NodeId> {
        self.children(NodeId::ROOT)
            .iter()
            .find(|&&id| {
                matches!(
                    self.get(id).map(|n| &n.data),
                    Some(NodeData::Element(_))
                )
            })
            .copied()
    }
}

impl Default for MarkupTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over ancestors of a node.
pub struct AncestorIterator<'a> {
    tree: &'a MarkupTree,
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
