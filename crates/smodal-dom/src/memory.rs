#![forbid(unsafe_code)]

//! Arena-backed in-memory document.
//!
//! `MemoryDom` keeps every live node in a hash map keyed by [`NodeId`].
//! Handles are never reused, so a stale id held after `remove_node` simply
//! stops resolving.
//!
//! # Example
//!
//! ```
//! use smodal_dom::{Dom, MemoryDom, Selector};
//!
//! let mut dom = MemoryDom::new();
//! let panel = dom.create_element("div", &["ui", "modal"]);
//! dom.set_attribute(panel, "id", "modal-1");
//! let body = dom.body();
//! dom.append_child(body, panel);
//!
//! assert_eq!(dom.query_by_id("modal-1"), Some(panel));
//! assert_eq!(dom.query_descendant(body, &Selector::any().class("modal")), Some(panel));
//! ```

use std::cell::RefCell;
use std::fmt;

use ahash::AHashMap;

use crate::{ActivationHandler, Dom, NodeId, Selector};

struct Node {
    tag: String,
    classes: Vec<String>,
    attributes: Vec<(String, String)>,
    text: String,
    children: Vec<NodeId>,
    parent: Option<NodeId>,
    activation: Option<ActivationHandler>,
}

impl Node {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            classes: Vec::new(),
            attributes: Vec::new(),
            text: String::new(),
            children: Vec::new(),
            parent: None,
            activation: None,
        }
    }

    fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    fn add_class(&mut self, class: &str) {
        if !self.classes.iter().any(|c| c == class) {
            self.classes.push(class.to_string());
        }
    }
}

/// Deterministic in-memory [`Dom`].
pub struct MemoryDom {
    nodes: AHashMap<NodeId, Node>,
    body: NodeId,
    next_id: u32,
}

impl Default for MemoryDom {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for MemoryDom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryDom")
            .field("nodes", &self.nodes.len())
            .field("body", &self.body)
            .finish()
    }
}

impl MemoryDom {
    /// Create a document holding only an empty `body`.
    pub fn new() -> Self {
        let body = NodeId::from_raw(1);
        let mut nodes = AHashMap::new();
        nodes.insert(body, Node::new("body"));
        Self {
            nodes,
            body,
            next_id: 2,
        }
    }

    /// Fire the activation handler of `node`.
    ///
    /// The document borrow is released before the handler runs, so the
    /// handler may freely mutate the same document. Returns `false` when the
    /// node has no handler.
    pub fn activate(dom: &RefCell<Self>, node: NodeId) -> bool {
        let handler = dom
            .borrow()
            .nodes
            .get(&node)
            .and_then(|n| n.activation.clone());
        match handler {
            Some(handler) => {
                handler();
                true
            }
            None => false,
        }
    }

    /// Number of live nodes, `body` included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Whether `node` is still live (mounted or detached).
    pub fn contains(&self, node: NodeId) -> bool {
        self.nodes.contains_key(&node)
    }

    /// Whether `node` is attached under `body`.
    pub fn is_mounted(&self, node: NodeId) -> bool {
        let mut cursor = Some(node);
        while let Some(id) = cursor {
            if id == self.body {
                return true;
            }
            cursor = self.nodes.get(&id).and_then(|n| n.parent);
        }
        false
    }

    /// Tag name (lowercase).
    pub fn tag(&self, node: NodeId) -> Option<&str> {
        self.nodes.get(&node).map(|n| n.tag.as_str())
    }

    /// Class list in insertion order.
    pub fn classes(&self, node: NodeId) -> &[String] {
        self.nodes
            .get(&node)
            .map(|n| n.classes.as_slice())
            .unwrap_or(&[])
    }

    /// Whether `node` carries `class`.
    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.classes(node).iter().any(|c| c == class)
    }

    /// Attribute value.
    pub fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        self.nodes.get(&node).and_then(|n| n.attribute(name))
    }

    /// The node's own text (children excluded).
    pub fn text(&self, node: NodeId) -> Option<&str> {
        self.nodes.get(&node).map(|n| n.text.as_str())
    }

    /// Own text followed by every descendant's text, in document order.
    pub fn text_content(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(node, &mut out);
        out
    }

    /// Parent of `node`, if attached.
    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(&node).and_then(|n| n.parent)
    }

    /// Whether an activation handler is wired on `node`.
    pub fn has_activation(&self, node: NodeId) -> bool {
        self.nodes
            .get(&node)
            .is_some_and(|n| n.activation.is_some())
    }

    fn collect_text(&self, node: NodeId, out: &mut String) {
        if let Some(n) = self.nodes.get(&node) {
            out.push_str(&n.text);
            for child in &n.children {
                self.collect_text(*child, out);
            }
        }
    }

    fn is_ancestor_or_self(&self, candidate: NodeId, node: NodeId) -> bool {
        let mut cursor = Some(node);
        while let Some(id) = cursor {
            if id == candidate {
                return true;
            }
            cursor = self.nodes.get(&id).and_then(|n| n.parent);
        }
        false
    }

    fn detach(&mut self, node: NodeId) {
        let parent = self.nodes.get_mut(&node).and_then(|n| n.parent.take());
        if let Some(parent) = parent
            && let Some(p) = self.nodes.get_mut(&parent)
        {
            p.children.retain(|c| *c != node);
        }
    }

    fn drop_subtree(&mut self, node: NodeId) {
        let mut pending = vec![node];
        while let Some(id) = pending.pop() {
            if let Some(n) = self.nodes.remove(&id) {
                pending.extend(n.children);
            }
        }
    }

    fn find_first(&self, root: NodeId, pred: &dyn Fn(&Node) -> bool) -> Option<NodeId> {
        let root = self.nodes.get(&root)?;
        // Preorder walk, children pushed in reverse so the leftmost pops first.
        let mut stack: Vec<NodeId> = root.children.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            let Some(node) = self.nodes.get(&id) else {
                continue;
            };
            if pred(node) {
                return Some(id);
            }
            stack.extend(node.children.iter().rev().copied());
        }
        None
    }
}

impl Dom for MemoryDom {
    fn body(&self) -> NodeId {
        self.body
    }

    fn create_element(&mut self, tag: &str, classes: &[&str]) -> NodeId {
        let id = NodeId::from_raw(self.next_id);
        self.next_id += 1;
        let mut node = Node::new(tag);
        for class in classes.iter().flat_map(|c| c.split_whitespace()) {
            node.add_class(class);
        }
        self.nodes.insert(id, node);
        id
    }

    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        let Some(n) = self.nodes.get_mut(&node) else {
            return;
        };
        match n.attributes.iter_mut().find(|(k, _)| k == name) {
            Some((_, v)) => *v = value.to_string(),
            None => n.attributes.push((name.to_string(), value.to_string())),
        }
    }

    fn set_text(&mut self, node: NodeId, text: &str) {
        if let Some(n) = self.nodes.get_mut(&node) {
            n.text = text.to_string();
        }
    }

    fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if !self.nodes.contains_key(&parent) || !self.nodes.contains_key(&child) {
            return;
        }
        if child == self.body {
            #[cfg(feature = "tracing")]
            tracing::warn!(?parent, "refusing to reparent body");
            return;
        }
        if self.is_ancestor_or_self(child, parent) {
            #[cfg(feature = "tracing")]
            tracing::warn!(?parent, ?child, "refusing to append node into its own subtree");
            return;
        }
        self.detach(child);
        if let Some(c) = self.nodes.get_mut(&child) {
            c.parent = Some(parent);
        }
        if let Some(p) = self.nodes.get_mut(&parent) {
            p.children.push(child);
        }
    }

    fn query_by_id(&self, id: &str) -> Option<NodeId> {
        self.find_first(self.body, &|n: &Node| n.attribute("id") == Some(id))
    }

    fn query_descendant(&self, root: NodeId, selector: &Selector) -> Option<NodeId> {
        self.find_first(root, &|n: &Node| {
            selector.matches(&n.tag, &n.classes, |name| n.attribute(name))
        })
    }

    fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.nodes
            .get(&node)
            .map(|n| n.children.clone())
            .unwrap_or_default()
    }

    fn clear_children(&mut self, node: NodeId) {
        let Some(n) = self.nodes.get_mut(&node) else {
            return;
        };
        let children = std::mem::take(&mut n.children);
        for child in children {
            self.drop_subtree(child);
        }
    }

    fn remove_node(&mut self, node: NodeId) {
        if node == self.body {
            return;
        }
        self.detach(node);
        self.drop_subtree(node);
        #[cfg(feature = "tracing")]
        tracing::trace!(?node, "node removed");
    }

    fn set_activation(&mut self, node: NodeId, handler: ActivationHandler) {
        if let Some(n) = self.nodes.get_mut(&node) {
            n.activation = Some(handler);
        }
    }
}
