//! Arena-based document tree.
//!
//! All nodes live in one contiguous vector, addressed by [`NodeId`]
//! handles. A node's children are handles it exclusively owns; its parent
//! is a non-owning handle used only for contextual queries. The whole tree
//! is dropped together, and there is no reference counting and no way to
//! build a cycle through the construction API.
//!
//! The root is always an Article node, allocated by [`DocTree::new`].

use std::collections::HashMap;

/// Map of option names to values for a node.
pub type OptionsMap = HashMap<String, String>;

/// A type-safe index into the document tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub usize);

impl NodeId {
    /// The Article root is always at index 0.
    pub const ROOT: NodeId = NodeId(0);
}

/// Closed set of node kinds, matched exhaustively by the generator.
///
/// Kind-specific text payload lives inside the variant: a Title holds its
/// heading text, a Text node holds one raw fragment of paragraph content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// The document root. Exactly one per tree.
    Article,
    /// Heading text; no children.
    Title(String),
    /// Sectioning container.
    Sec,
    /// Paragraph; its children are an ordered sequence of inline content
    /// fragments (Text runs and inline formatting nodes).
    Para,
    Bold,
    Italic,
    Underline,
    Code,
    Math,
    /// A raw text run inside paragraph content.
    Text(String),
}

impl NodeKind {
    /// Stable name for diagnostics and statistics.
    pub const fn name(&self) -> &'static str {
        match self {
            NodeKind::Article => "article",
            NodeKind::Title(_) => "title",
            NodeKind::Sec => "sec",
            NodeKind::Para => "para",
            NodeKind::Bold => "bold",
            NodeKind::Italic => "italic",
            NodeKind::Underline => "underline",
            NodeKind::Code => "code",
            NodeKind::Math => "math",
            NodeKind::Text(_) => "text",
        }
    }
}

/// One arena slot.
#[derive(Debug, Clone)]
pub struct Node {
    pub kind: NodeKind,
    /// Non-owning back-reference; absent only at the root.
    pub parent: Option<NodeId>,
    /// Exclusively owned children, in document order.
    pub children: Vec<NodeId>,
    /// Option mapping; unset names read as the empty string.
    pub options: OptionsMap,
}

/// The document tree: an arena of nodes with an Article root.
#[derive(Debug, Clone)]
pub struct DocTree {
    nodes: Vec<Node>,
}

impl DocTree {
    /// Create a tree holding just the Article root.
    pub fn new() -> Self {
        DocTree {
            nodes: vec![Node {
                kind: NodeKind::Article,
                parent: None,
                children: Vec::new(),
                options: OptionsMap::new(),
            }],
        }
    }

    /// The Article root.
    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Number of nodes in the arena.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Allocate a detached node and return its handle.
    pub fn alloc(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            kind,
            parent: None,
            children: Vec::new(),
            options: OptionsMap::new(),
        });
        id
    }

    /// Append `child` as the last child of `parent` and set its parent
    /// back-reference, transferring ownership of the child's subtree.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.nodes[parent.0].children.push(child);
        self.nodes[child.0].parent = Some(parent);
    }

    /// Append text to a node.
    ///
    /// On Title and Text nodes this extends the payload in place. On
    /// containers it extends the trailing Text child if there is one, and
    /// otherwise appends a fresh Text fragment, so interleaved plain text
    /// and inline nodes keep their document order.
    pub fn append_text(&mut self, node: NodeId, text: &str) {
        if text.is_empty() {
            return;
        }
        match &mut self.nodes[node.0].kind {
            NodeKind::Title(s) | NodeKind::Text(s) => s.push_str(text),
            _ => {
                if let Some(&last) = self.nodes[node.0].children.last() {
                    if let NodeKind::Text(s) = &mut self.nodes[last.0].kind {
                        s.push_str(text);
                        return;
                    }
                }
                let fragment = self.alloc(NodeKind::Text(text.to_string()));
                self.append_child(node, fragment);
            }
        }
    }

    /// Set an option on a node. Setting the same name twice keeps the
    /// later value.
    pub fn set_option(&mut self, node: NodeId, name: &str, value: &str) {
        self.nodes[node.0]
            .options
            .insert(name.to_string(), value.to_string());
    }

    /// Read an option. An unset name reads as `""`, never an error.
    pub fn option(&self, node: NodeId, name: &str) -> &str {
        self.nodes[node.0]
            .options
            .get(name)
            .map(String::as_str)
            .unwrap_or("")
    }

    /// The node's discriminant, for external dispatch.
    #[inline]
    pub fn kind(&self, node: NodeId) -> &NodeKind {
        &self.nodes[node.0].kind
    }

    /// Non-owning parent handle; `None` only at the root.
    #[inline]
    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes[node.0].parent
    }

    /// Children in document order.
    #[inline]
    pub fn children(&self, node: NodeId) -> &[NodeId] {
        &self.nodes[node.0].children
    }

    /// All node handles in allocation order.
    pub fn ids(&self) -> impl Iterator<Item = NodeId> {
        (0..self.nodes.len()).map(NodeId)
    }

    /// Iterate over ancestors, from parent to root.
    pub fn ancestors(&self, node: NodeId) -> Ancestors<'_> {
        Ancestors {
            tree: self,
            current: self.parent(node),
        }
    }

    /// Nesting depth: 0 at the root.
    pub fn depth(&self, node: NodeId) -> usize {
        self.ancestors(node).count()
    }
}

impl Default for DocTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over the ancestors of a node.
pub struct Ancestors<'a> {
    tree: &'a DocTree,
    current: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        self.current = self.tree.parent(id);
        Some(id)
    }
}
