#![forbid(unsafe_code)]

//! Document collaborator for smodal dialogs.
//!
//! The dialog engine never touches a browser directly. Everything it needs
//! from a document goes through the narrow [`Dom`] trait: create an element,
//! set an attribute or its text, append it, look nodes up, remove them, and
//! wire an activation handler.
//!
//! [`MemoryDom`] is a deterministic arena implementation. Hosts without a
//! browser drive it directly; tests inspect it after each operation.
//!
//! # Invariants
//!
//! - `query_by_id` only returns nodes that are attached under [`Dom::body`].
//! - `children` preserves append order.
//! - A removed node (and its subtree) is never returned by any query again.
//!
//! # Failure Modes
//!
//! - Operations on an unknown [`NodeId`] are silent no-ops.
//! - Appending a node to itself or to one of its descendants is ignored.

pub mod memory;
mod selector;

pub use memory::MemoryDom;
pub use selector::Selector;

use std::rc::Rc;

/// Opaque handle to a node owned by a [`Dom`] implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    /// Wrap a raw handle. Only meaningful to the `Dom` that issued it.
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Get the raw handle value.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

/// Handler fired when a control is activated (clicked or pressed).
pub type ActivationHandler = Rc<dyn Fn()>;

/// The document capabilities a dialog consumes.
///
/// No other document capability is used by the dialog engine, so a browser
/// binding only has to provide these.
pub trait Dom {
    /// The node mounted dialogs are appended to.
    fn body(&self) -> NodeId;

    /// Create a detached element with the given classes.
    fn create_element(&mut self, tag: &str, classes: &[&str]) -> NodeId;

    /// Set (or replace) an attribute.
    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str);

    /// Replace the node's own text.
    fn set_text(&mut self, node: NodeId, text: &str);

    /// Append `child` as the last child of `parent`, detaching it first.
    fn append_child(&mut self, parent: NodeId, child: NodeId);

    /// Find a mounted node by its `id` attribute.
    fn query_by_id(&self, id: &str) -> Option<NodeId>;

    /// First descendant of `root` (document order, root excluded) matching `selector`.
    fn query_descendant(&self, root: NodeId, selector: &Selector) -> Option<NodeId>;

    /// Direct children of `node` in order.
    fn children(&self, node: NodeId) -> Vec<NodeId>;

    /// Remove every child of `node`.
    fn clear_children(&mut self, node: NodeId);

    /// Detach `node` from its parent and drop its subtree.
    fn remove_node(&mut self, node: NodeId);

    /// Wire the activation handler for `node`, replacing any previous one.
    fn set_activation(&mut self, node: NodeId, handler: ActivationHandler);
}
