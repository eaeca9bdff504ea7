#![forbid(unsafe_code)]

//! Seam to the external presentation widget.
//!
//! The widget owns transitions, the dimmer/blur backdrop and focus handling.
//! The dialog only hands it a [`BehaviorConfig`] for its anchor and asks the
//! returned [`ModalBehavior`] to show. The widget calls back through the four
//! relays in the config.

use std::fmt;
use std::rc::Rc;

use smodal_dom::NodeId;

use crate::transition::Transition;

/// Approve/deny relay. The return value tells the widget whether to go on
/// with its default action (hiding); dialogs always return `true`.
pub type DecisionRelay = Rc<dyn Fn() -> bool>;

/// Shown/hidden relay.
pub type NotifyRelay = Rc<dyn Fn()>;

/// Configuration handed to the presentation widget on launch.
#[derive(Clone)]
pub struct BehaviorConfig {
    pub transition: Transition,
    pub inverted: bool,
    pub blurring: bool,
    pub closable: bool,
    pub on_approve: DecisionRelay,
    pub on_deny: DecisionRelay,
    pub on_show: NotifyRelay,
    pub on_hidden: NotifyRelay,
}

impl fmt::Debug for BehaviorConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BehaviorConfig")
            .field("transition", &self.transition)
            .field("inverted", &self.inverted)
            .field("blurring", &self.blurring)
            .field("closable", &self.closable)
            .finish_non_exhaustive()
    }
}

/// Handle to modal behavior attached to one anchor.
pub trait ModalBehavior {
    /// Start the show transition.
    fn show(&mut self);
}

/// The presentation widget.
pub trait Presenter {
    /// Attach modal behavior to `anchor`.
    fn attach_modal_behavior(
        &mut self,
        anchor: NodeId,
        config: BehaviorConfig,
    ) -> Box<dyn ModalBehavior>;
}

impl<P: Presenter + ?Sized> Presenter for Box<P> {
    fn attach_modal_behavior(
        &mut self,
        anchor: NodeId,
        config: BehaviorConfig,
    ) -> Box<dyn ModalBehavior> {
        (**self).attach_modal_behavior(anchor, config)
    }
}
