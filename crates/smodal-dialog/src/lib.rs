#![forbid(unsafe_code)]

//! Confirm/alert dialogs on top of a [`Dom`](smodal_dom::Dom).
//!
//! A [`Dialog`] builds its anchor once, then re-skins it for every `show` or
//! `confirm` call from three layers of settings (library defaults,
//! instance-fixed settings, call-time overrides). Buttons are described
//! declaratively with [`ButtonDescriptor`] and rendered through a
//! [`ClassMap`]. Transitions, the dimmer and focus handling belong to an
//! external widget reached through the [`Presenter`] seam.
//!
//! # Modules
//!
//! - [`identity`]: unique anchor ids.
//! - [`settings`]: the three-layer merge.
//! - [`button`]: descriptors and rendering.
//! - [`dialog`]: the controller.
//! - [`lifecycle`]: state machine driven by presenter relays.
//! - `config` (feature `config`): TOML/JSON loading.

pub mod button;
pub mod classes;
#[cfg(feature = "config")]
pub mod config;
pub mod dialog;
pub mod identity;
pub mod lifecycle;
pub mod presenter;
pub mod settings;
pub mod transition;

pub use button::{
    ActivationContext, ButtonAction, ButtonDescriptor, ButtonGuard, ButtonsUpdate,
    CONFIRM_CANCEL_BUTTON, CONFIRM_OK_BUTTON, DEFAULT_OK_BUTTON, RenderMode,
};
pub use classes::ClassMap;
#[cfg(feature = "config")]
pub use config::ConfigError;
pub use dialog::{Dialog, DialogConfig};
pub use identity::{DEFAULT_ID_PREFIX, DialogId};
pub use lifecycle::{DialogEvent, DialogEventKind, DialogState, Lifecycle, Resolution};
pub use presenter::{BehaviorConfig, DecisionRelay, ModalBehavior, NotifyRelay, Presenter};
pub use settings::{DialogCallback, Settings, SettingsLayer};
pub use transition::{Transition, UnknownTransition};
