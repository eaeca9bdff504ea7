#![forbid(unsafe_code)]

//! Test harness for smodal dialogs.
//!
//! - [`RecordingPresenter`] stands in for the presentation widget. It keeps
//!   every launch so a test can inspect the [`BehaviorConfig`] and fire the
//!   relays the way a real widget would.
//! - [`parts`], [`button_titles`] and [`outline`] inspect a [`MemoryDom`]
//!   after an operation.
//! - [`fixture`] wires the three together.
//!
//! ```
//! use smodal_dialog::SettingsLayer;
//! use smodal_harness::{button_titles, fixture};
//!
//! let (dom, presenter, mut dialog) = fixture(SettingsLayer::new().title("Confirm?"));
//! dialog.confirm("Delete?", None);
//!
//! let anchor = dialog.anchor().unwrap();
//! assert_eq!(button_titles(&dom.borrow(), anchor), vec!["Ok", "Cancel"]);
//! assert!(presenter.last().unwrap().approve());
//! ```

use std::cell::{Cell, RefCell};
use std::fmt::Write as _;
use std::rc::Rc;

use smodal_dialog::dialog::PART_ATTRIBUTE;
use smodal_dialog::{BehaviorConfig, Dialog, ModalBehavior, Presenter, SettingsLayer};
use smodal_dom::{Dom, MemoryDom, NodeId};

/// Dialog type used throughout the harness.
pub type TestDialog = Dialog<MemoryDom, RecordingPresenter>;

// ============================================================================
// Presenter
// ============================================================================

/// One call to `attach_modal_behavior`.
#[derive(Debug, Clone)]
pub struct LaunchRecord {
    /// Anchor the behavior was attached to.
    pub anchor: NodeId,
    /// Configuration handed over by the dialog.
    pub config: BehaviorConfig,
    shows: Rc<Cell<u32>>,
}

impl LaunchRecord {
    /// How many times `show` was called on this behavior.
    pub fn show_count(&self) -> u32 {
        self.shows.get()
    }

    /// Fire the approve relay. Returns the relay's verdict.
    pub fn approve(&self) -> bool {
        tracing::trace!(anchor = ?self.anchor, "firing approve relay");
        (self.config.on_approve)()
    }

    /// Fire the deny relay. Returns the relay's verdict.
    pub fn deny(&self) -> bool {
        tracing::trace!(anchor = ?self.anchor, "firing deny relay");
        (self.config.on_deny)()
    }

    /// Fire the shown relay.
    pub fn shown(&self) {
        tracing::trace!(anchor = ?self.anchor, "firing shown relay");
        (self.config.on_show)()
    }

    /// Fire the hidden relay.
    pub fn hidden(&self) {
        tracing::trace!(anchor = ?self.anchor, "firing hidden relay");
        (self.config.on_hidden)()
    }

    /// Approve, then hide if the relay lets the widget proceed.
    pub fn approve_and_hide(&self) {
        if self.approve() {
            self.hidden();
        }
    }

    /// Deny, then hide if the relay lets the widget proceed.
    pub fn deny_and_hide(&self) {
        if self.deny() {
            self.hidden();
        }
    }
}

struct RecordedBehavior {
    shows: Rc<Cell<u32>>,
}

impl ModalBehavior for RecordedBehavior {
    fn show(&mut self) {
        self.shows.set(self.shows.get() + 1);
    }
}

/// Presenter that records launches instead of animating anything.
///
/// Clones share the same log, so a test keeps one clone and hands the other
/// to the dialog.
#[derive(Debug, Clone, Default)]
pub struct RecordingPresenter {
    log: Rc<RefCell<Vec<LaunchRecord>>>,
}

impl RecordingPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every launch so far, oldest first.
    pub fn launches(&self) -> Vec<LaunchRecord> {
        self.log.borrow().clone()
    }

    /// The most recent launch.
    pub fn last(&self) -> Option<LaunchRecord> {
        self.log.borrow().last().cloned()
    }

    pub fn launch_count(&self) -> usize {
        self.log.borrow().len()
    }
}

impl Presenter for RecordingPresenter {
    fn attach_modal_behavior(
        &mut self,
        anchor: NodeId,
        config: BehaviorConfig,
    ) -> Box<dyn ModalBehavior> {
        let shows = Rc::new(Cell::new(0));
        self.log.borrow_mut().push(LaunchRecord {
            anchor,
            config,
            shows: Rc::clone(&shows),
        });
        Box::new(RecordedBehavior { shows })
    }
}

/// A fresh document, a recording presenter and a dialog built with the
/// library defaults.
pub fn fixture(
    fixed: SettingsLayer,
) -> (Rc<RefCell<MemoryDom>>, RecordingPresenter, TestDialog) {
    let dom = Rc::new(RefCell::new(MemoryDom::new()));
    let presenter = RecordingPresenter::new();
    let dialog = Dialog::with_defaults(Rc::clone(&dom), presenter.clone(), fixed);
    (dom, presenter, dialog)
}

// ============================================================================
// DOM inspection
// ============================================================================

/// Skeleton parts of a dialog anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Parts {
    pub close: Option<NodeId>,
    pub header: Option<NodeId>,
    pub content: Option<NodeId>,
    pub actions: Option<NodeId>,
}

/// Locate the direct skeleton children of `anchor`.
pub fn parts(dom: &MemoryDom, anchor: NodeId) -> Parts {
    let mut out = Parts::default();
    for child in dom.children(anchor) {
        let slot = match dom.attribute(child, PART_ATTRIBUTE) {
            Some("close") => &mut out.close,
            Some("header") => &mut out.header,
            Some("content") => &mut out.content,
            Some("actions") => &mut out.actions,
            _ => continue,
        };
        slot.get_or_insert(child);
    }
    out
}

/// Number of close icons directly under `anchor`.
pub fn close_icon_count(dom: &MemoryDom, anchor: NodeId) -> usize {
    dom.children(anchor)
        .into_iter()
        .filter(|c| dom.attribute(*c, PART_ATTRIBUTE) == Some("close"))
        .count()
}

/// Controls rendered in the actions node of `anchor`.
pub fn buttons(dom: &MemoryDom, anchor: NodeId) -> Vec<NodeId> {
    parts(dom, anchor)
        .actions
        .map(|actions| dom.children(actions))
        .unwrap_or_default()
}

/// Titles of the controls rendered in the actions node of `anchor`.
pub fn button_titles(dom: &MemoryDom, anchor: NodeId) -> Vec<String> {
    buttons(dom, anchor)
        .into_iter()
        .map(|b| dom.text(b).unwrap_or_default().to_string())
        .collect()
}

/// Activate a rendered control as a click would.
pub fn click(dom: &RefCell<MemoryDom>, node: NodeId) -> bool {
    MemoryDom::activate(dom, node)
}

/// Indented text rendering of the subtree at `node`.
///
/// One line per element: `tag.class.class[attr=value] "text"`. Attributes
/// are listed in a stable order (`id` first, then the part marker, then the
/// button name attribute).
pub fn outline(dom: &MemoryDom, node: NodeId) -> String {
    let mut out = String::new();
    outline_into(dom, node, 0, &mut out);
    out
}

fn outline_into(dom: &MemoryDom, node: NodeId, depth: usize, out: &mut String) {
    let Some(tag) = dom.tag(node) else {
        return;
    };
    let _ = write!(out, "{:indent$}{tag}", "", indent = depth * 2);
    for class in dom.classes(node) {
        let _ = write!(out, ".{class}");
    }
    for name in ["id", PART_ATTRIBUTE, smodal_dialog::classes::DEFAULT_NAME_ATTRIBUTE] {
        if let Some(value) = dom.attribute(node, name) {
            let _ = write!(out, "[{name}={value}]");
        }
    }
    if let Some(text) = dom.text(node)
        && !text.is_empty()
    {
        let _ = write!(out, " {text:?}");
    }
    out.push('\n');
    for child in dom.children(node) {
        outline_into(dom, child, depth + 1, out);
    }
}
