#![forbid(unsafe_code)]

//! smodal public facade crate.
//!
//! Re-exports the dialog engine and its document seam, plus a prelude for
//! day-to-day usage.
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! use smodal::prelude::*;
//!
//! struct NoAnimation;
//!
//! impl ModalBehavior for NoAnimation {
//!     fn show(&mut self) {}
//! }
//!
//! struct Immediate;
//!
//! impl Presenter for Immediate {
//!     fn attach_modal_behavior(
//!         &mut self,
//!         _anchor: NodeId,
//!         config: BehaviorConfig,
//!     ) -> Box<dyn ModalBehavior> {
//!         (config.on_show)();
//!         Box::new(NoAnimation)
//!     }
//! }
//!
//! let dom = Rc::new(RefCell::new(MemoryDom::new()));
//! let mut dialog = Dialog::with_defaults(dom, Immediate, SettingsLayer::new().title("Confirm?"));
//! assert!(dialog.confirm("Delete?", None));
//! assert_eq!(dialog.buttons().len(), 2);
//! ```

// --- Document re-exports ---------------------------------------------------

pub use smodal_dom::{ActivationHandler, Dom, MemoryDom, NodeId, Selector};

// --- Dialog re-exports -----------------------------------------------------

pub use smodal_dialog::{
    ActivationContext, BehaviorConfig, ButtonDescriptor, ButtonsUpdate, CONFIRM_CANCEL_BUTTON,
    CONFIRM_OK_BUTTON, ClassMap, DEFAULT_ID_PREFIX, DEFAULT_OK_BUTTON, Dialog, DialogConfig,
    DialogEvent, DialogEventKind, DialogId, DialogState, ModalBehavior, Presenter, RenderMode,
    Resolution, Settings, SettingsLayer, Transition, UnknownTransition,
};

#[cfg(feature = "config")]
pub use smodal_dialog::ConfigError;

// --- Prelude ---------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        BehaviorConfig, ButtonDescriptor, ButtonsUpdate, Dialog, DialogConfig, DialogEvent, Dom,
        MemoryDom, ModalBehavior, NodeId, Presenter, SettingsLayer, Transition,
    };

    pub use crate::{dialog, dom};
}

pub use smodal_dialog as dialog;
pub use smodal_dom as dom;
