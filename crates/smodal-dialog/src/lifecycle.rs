#![forbid(unsafe_code)]

//! Dialog lifecycle state machine.
//!
//! ```text
//! Constructed -> Configured <-> Presenting -> Resolved -> Hidden -> Configured
//! ```
//!
//! The presentation widget decides which events fire and in what order;
//! [`Lifecycle`] only records the transitions the relays report. Approve and
//! deny are not mutually exclusive here: a second resolution simply
//! overwrites the first.

use std::cell::Cell;

use crate::identity::DialogId;

/// Where a dialog is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DialogState {
    /// Anchor built, settings captured.
    Constructed,
    /// Idle and reusable.
    Configured,
    /// Handed to the presentation widget.
    Presenting,
    /// The user approved or denied.
    Resolved(Resolution),
    /// The hide transition completed.
    Hidden,
}

/// How a presentation was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resolution {
    Approved,
    Denied,
}

/// Which lifecycle event a callback is receiving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DialogEventKind {
    Approved,
    Denied,
    Shown,
    Hidden,
}

/// Payload passed to user callbacks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogEvent {
    /// The dialog that produced the event.
    pub instance_id: DialogId,
    /// What happened.
    pub kind: DialogEventKind,
}

#[cfg(test)]
impl DialogEvent {
    pub(crate) fn for_test() -> Self {
        let dom = smodal_dom::MemoryDom::new();
        Self {
            instance_id: crate::identity::allocate(&dom, "test-"),
            kind: DialogEventKind::Shown,
        }
    }
}

/// Shared lifecycle record, held by the dialog and by its relays.
#[derive(Debug)]
pub struct Lifecycle {
    instance_id: DialogId,
    state: Cell<DialogState>,
    last_resolution: Cell<Option<Resolution>>,
    presentations: Cell<u64>,
}

impl Lifecycle {
    /// Start in [`DialogState::Constructed`].
    pub fn new(instance_id: DialogId) -> Self {
        Self {
            instance_id,
            state: Cell::new(DialogState::Constructed),
            last_resolution: Cell::new(None),
            presentations: Cell::new(0),
        }
    }

    /// Current state.
    #[inline]
    pub fn state(&self) -> DialogState {
        self.state.get()
    }

    /// Resolution of the most recent presentation, if any.
    #[inline]
    pub fn last_resolution(&self) -> Option<Resolution> {
        self.last_resolution.get()
    }

    /// Number of times the dialog has been launched.
    #[inline]
    pub fn presentations(&self) -> u64 {
        self.presentations.get()
    }

    fn set(&self, next: DialogState) {
        let prev = self.state.replace(next);
        tracing::debug!(
            id = %self.instance_id,
            from = ?prev,
            to = ?next,
            "dialog state transition"
        );
    }

    pub(crate) fn configured(&self) {
        self.set(DialogState::Configured);
    }

    pub(crate) fn presenting(&self) {
        self.presentations.set(self.presentations.get() + 1);
        self.last_resolution.set(None);
        self.set(DialogState::Presenting);
    }

    pub(crate) fn resolved(&self, resolution: Resolution) {
        self.last_resolution.set(Some(resolution));
        self.set(DialogState::Resolved(resolution));
    }

    pub(crate) fn hidden(&self) {
        self.set(DialogState::Hidden);
    }

    pub(crate) fn event(&self, kind: DialogEventKind) -> DialogEvent {
        DialogEvent {
            instance_id: self.instance_id.clone(),
            kind,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lifecycle() -> Lifecycle {
        Lifecycle::new(DialogEvent::for_test().instance_id)
    }

    #[test]
    fn starts_constructed() {
        let lc = lifecycle();
        assert_eq!(lc.state(), DialogState::Constructed);
        assert_eq!(lc.presentations(), 0);
        assert_eq!(lc.last_resolution(), None);
    }

    #[test]
    fn full_cycle() {
        let lc = lifecycle();
        lc.configured();
        lc.presenting();
        assert_eq!(lc.state(), DialogState::Presenting);
        lc.resolved(Resolution::Approved);
        assert_eq!(lc.state(), DialogState::Resolved(Resolution::Approved));
        lc.hidden();
        assert_eq!(lc.state(), DialogState::Hidden);
        lc.configured();
        assert_eq!(lc.state(), DialogState::Configured);
        assert_eq!(lc.last_resolution(), Some(Resolution::Approved));
        assert_eq!(lc.presentations(), 1);
    }

    #[test]
    fn new_presentation_clears_last_resolution() {
        let lc = lifecycle();
        lc.presenting();
        lc.resolved(Resolution::Denied);
        lc.presenting();
        assert_eq!(lc.last_resolution(), None);
        assert_eq!(lc.presentations(), 2);
    }

    #[test]
    fn later_resolution_overwrites_earlier() {
        let lc = lifecycle();
        lc.presenting();
        lc.resolved(Resolution::Denied);
        lc.resolved(Resolution::Approved);
        assert_eq!(lc.last_resolution(), Some(Resolution::Approved));
    }

    #[test]
    fn events_carry_instance_id() {
        let lc = lifecycle();
        let event = lc.event(DialogEventKind::Hidden);
        assert_eq!(event.instance_id, lc.instance_id);
        assert_eq!(event.kind, DialogEventKind::Hidden);
    }
}
