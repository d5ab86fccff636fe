//! Immutable snapshots of a page's element tree.
//!
//! A `Document` is an arena of element nodes stored in document order (a pre-order walk), so the
//! subtree of any node is a contiguous run of the arena. Each node carries its own full text
//! content, which makes the scanner's substring test a lookup rather than a walk. Ancestor and
//! descendant lookups are pure queries over the arena and never touch a live page.

use std::collections::HashMap;

/// Tag name given to the synthetic root node.
pub const ROOT_TAG: &str = "#document";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
/// Position of a node in its document's arena.
pub struct NodeId(usize);

impl NodeId {
    #[must_use]
    /// Arena index of the node, which is also its rank in document order.
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone)]
/// One element of the snapshot.
pub struct Node {
    tag: String,
    attributes: Vec<(String, String)>,
    classes: Vec<String>,
    text: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    subtree_end: usize,
}

impl Node {
    fn new(tag: String, attributes: Vec<(String, String)>, parent: Option<NodeId>) -> Self {
        let classes = attributes
            .iter()
            .find(|(name, _)| name == "class")
            .map(|(_, value)| class_tokens(value))
            .unwrap_or_default();
        Self {
            tag,
            attributes,
            classes,
            text: String::new(),
            parent,
            children: Vec::new(),
            subtree_end: 0,
        }
    }

    #[must_use]
    /// Lower-cased tag name, or [`ROOT_TAG`] for the root.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    #[must_use]
    /// Concatenated text of every descendant, in document order.
    pub fn text_content(&self) -> &str {
        &self.text
    }

    #[must_use]
    /// Value of the named attribute, if present.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(attr, _)| attr == name)
            .map(|(_, value)| value.as_str())
    }

    #[must_use]
    /// The element's `id` attribute.
    pub fn id(&self) -> Option<&str> {
        self.attribute("id")
    }

    #[must_use]
    /// Tokens of the `class` attribute.
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    #[must_use]
    /// Whether `class_name` is one of the element's classes.
    pub fn has_class(&self, class_name: &str) -> bool {
        self.classes.iter().any(|c| c == class_name)
    }

    #[must_use]
    /// The owning element, absent only for the root.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    #[must_use]
    /// Direct child elements in document order.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

fn class_tokens(class_attr: &str) -> Vec<String> {
    class_attr
        .split_whitespace()
        .map(ToOwned::to_owned)
        .collect()
}

#[derive(Debug, Clone)]
/// Immutable element tree of one page.
pub struct Document {
    nodes: Vec<Node>,
    id_index: HashMap<String, NodeId>,
}

impl Document {
    #[must_use]
    /// The synthetic root that owns every top-level element.
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    #[must_use]
    /// Number of nodes, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    /// True when the document holds nothing but its root.
    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    #[must_use]
    /// Looks up a node, returning `None` for ids from another document.
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Returns the node for `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not belong to this document.
    #[must_use]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    #[must_use]
    /// First element in document order carrying the given `id` attribute.
    pub fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.id_index.get(id).copied()
    }

    /// Elements whose tag is one of `tags`, in document order.
    pub fn elements_with_tags<'a, S: AsRef<str>>(
        &'a self,
        tags: &'a [S],
    ) -> impl Iterator<Item = NodeId> + 'a {
        self.nodes
            .iter()
            .enumerate()
            .skip(1)
            .filter(move |(_, node)| tags.iter().any(|t| t.as_ref() == node.tag))
            .map(|(i, _)| NodeId(i))
    }

    /// Strict ancestors of `id`, nearest first, ending at the root.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.get(id).and_then(Node::parent), move |&current| {
            self.get(current).and_then(Node::parent)
        })
    }

    /// Nearest strict ancestor of `id` satisfying `predicate`.
    ///
    /// The walk stops at the root; the root itself is never a candidate.
    pub fn nearest_ancestor<P>(&self, id: NodeId, predicate: P) -> Option<NodeId>
    where
        P: Fn(&Node) -> bool,
    {
        self.ancestors(id)
            .take_while(|&ancestor| ancestor != self.root())
            .find(|&ancestor| predicate(self.node(ancestor)))
    }

    /// First strict descendant of `id` in document order satisfying `predicate`.
    pub fn first_descendant<P>(&self, id: NodeId, predicate: P) -> Option<NodeId>
    where
        P: Fn(&Node) -> bool,
    {
        let node = self.get(id)?;
        (id.0 + 1..node.subtree_end)
            .map(NodeId)
            .find(|&candidate| predicate(self.node(candidate)))
    }
}

/// Incremental constructor for [`Document`].
///
/// Elements are opened and closed in document order; text appended while an element is open
/// becomes part of the text content of that element and of every open ancestor.
#[derive(Debug)]
pub struct DocumentBuilder {
    nodes: Vec<Node>,
    open: Vec<NodeId>,
}

impl Default for DocumentBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentBuilder {
    #[must_use]
    /// Starts a document holding only the root.
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new(ROOT_TAG.to_string(), Vec::new(), None)],
            open: vec![NodeId(0)],
        }
    }

    /// Opens a child element of the innermost open element.
    pub fn open_element(&mut self, tag: &str, attributes: Vec<(String, String)>) -> NodeId {
        let parent = self.current();
        let id = NodeId(self.nodes.len());
        self.nodes
            .push(Node::new(tag.to_ascii_lowercase(), attributes, Some(parent)));
        self.nodes[parent.0].children.push(id);
        self.open.push(id);
        id
    }

    /// Adds text to the innermost open element and all of its open ancestors.
    pub fn append_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        for id in &self.open {
            self.nodes[id.0].text.push_str(text);
        }
    }

    /// Closes the innermost open element. The root stays open until [`Self::finish`].
    pub fn close_element(&mut self) {
        if self.open.len() > 1 {
            if let Some(id) = self.open.pop() {
                self.nodes[id.0].subtree_end = self.nodes.len();
            }
        }
    }

    /// Closes anything still open and freezes the snapshot.
    #[must_use]
    pub fn finish(mut self) -> Document {
        while self.open.len() > 1 {
            self.close_element();
        }
        self.nodes[0].subtree_end = self.nodes.len();

        let mut id_index = HashMap::new();
        for (i, node) in self.nodes.iter().enumerate() {
            if let Some(id) = node.id() {
                id_index.entry(id.to_string()).or_insert(NodeId(i));
            }
        }

        Document {
            nodes: self.nodes,
            id_index,
        }
    }

    fn current(&self) -> NodeId {
        self.open.last().copied().unwrap_or(NodeId(0))
    }
}

#[cfg(test)]
#[path = "tests/document.rs"]
mod tests;
