#![forbid(unsafe_code)]

//! Layered dialog settings.
//!
//! Three layers feed every operation:
//!
//! 1. library defaults (a full [`Settings`] value),
//! 2. instance-fixed settings captured at construction (a [`SettingsLayer`]),
//! 3. call-time overrides passed to `show`/`confirm` (another layer).
//!
//! [`resolve`] merges them field by field, the higher layer winning. A field
//! present in a higher layer replaces the lower one wholesale; button lists
//! are never merged element-wise.

use std::fmt;
use std::rc::Rc;

use crate::button::{self, ButtonDescriptor};
use crate::lifecycle::DialogEvent;
use crate::transition::Transition;

/// User callback relayed from a lifecycle event.
pub type DialogCallback = Rc<dyn Fn(&DialogEvent)>;

/// Fully resolved settings for one operation.
#[derive(Clone)]
pub struct Settings {
    /// Header text.
    pub title: String,
    /// Show/hide transition.
    pub transition: Transition,
    /// Blur the page behind the dialog.
    pub blurring: bool,
    /// Inverted dimmer.
    pub inverted: bool,
    /// Whether the dialog may be dismissed without a button.
    pub closable: bool,
    /// Whether to render a close icon (only when also closable).
    pub close_icon: bool,
    /// Render no actions node at all.
    pub button_less: bool,
    /// Buttons used by `show`.
    pub default_buttons: Vec<ButtonDescriptor>,
    /// Buttons used by `confirm`.
    pub confirm_buttons: Vec<ButtonDescriptor>,
    /// Relayed on approve.
    pub on_accept: Option<DialogCallback>,
    /// Relayed on deny.
    pub on_reject: Option<DialogCallback>,
    /// Relayed once the dialog is hidden.
    pub on_hide: Option<DialogCallback>,
    /// Relayed once the dialog is shown.
    pub on_show: Option<DialogCallback>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            title: String::new(),
            transition: Transition::Scale,
            blurring: false,
            inverted: false,
            closable: true,
            close_icon: true,
            button_less: false,
            default_buttons: button::default_buttons(),
            confirm_buttons: button::confirm_buttons(),
            on_accept: None,
            on_reject: None,
            on_hide: None,
            on_show: None,
        }
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("title", &self.title)
            .field("transition", &self.transition)
            .field("blurring", &self.blurring)
            .field("inverted", &self.inverted)
            .field("closable", &self.closable)
            .field("close_icon", &self.close_icon)
            .field("button_less", &self.button_less)
            .field("default_buttons", &self.default_buttons)
            .field("confirm_buttons", &self.confirm_buttons)
            .field("on_accept", &self.on_accept.is_some())
            .field("on_reject", &self.on_reject.is_some())
            .field("on_hide", &self.on_hide.is_some())
            .field("on_show", &self.on_show.is_some())
            .finish()
    }
}

/// A partial settings layer. `None` means "not set in this layer".
#[derive(Clone, Default)]
pub struct SettingsLayer {
    pub title: Option<String>,
    pub transition: Option<Transition>,
    pub blurring: Option<bool>,
    pub inverted: Option<bool>,
    pub closable: Option<bool>,
    pub close_icon: Option<bool>,
    pub button_less: Option<bool>,
    pub default_buttons: Option<Vec<ButtonDescriptor>>,
    pub confirm_buttons: Option<Vec<ButtonDescriptor>>,
    pub on_accept: Option<DialogCallback>,
    pub on_reject: Option<DialogCallback>,
    pub on_hide: Option<DialogCallback>,
    pub on_show: Option<DialogCallback>,
}

impl fmt::Debug for SettingsLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SettingsLayer")
            .field("title", &self.title)
            .field("transition", &self.transition)
            .field("blurring", &self.blurring)
            .field("inverted", &self.inverted)
            .field("closable", &self.closable)
            .field("close_icon", &self.close_icon)
            .field("button_less", &self.button_less)
            .field("default_buttons", &self.default_buttons)
            .field("confirm_buttons", &self.confirm_buttons)
            .field("on_accept", &self.on_accept.is_some())
            .field("on_reject", &self.on_reject.is_some())
            .field("on_hide", &self.on_hide.is_some())
            .field("on_show", &self.on_show.is_some())
            .finish()
    }
}

impl SettingsLayer {
    /// An empty layer.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn transition(mut self, transition: Transition) -> Self {
        self.transition = Some(transition);
        self
    }

    pub fn blurring(mut self, blurring: bool) -> Self {
        self.blurring = Some(blurring);
        self
    }

    pub fn inverted(mut self, inverted: bool) -> Self {
        self.inverted = Some(inverted);
        self
    }

    pub fn closable(mut self, closable: bool) -> Self {
        self.closable = Some(closable);
        self
    }

    pub fn close_icon(mut self, close_icon: bool) -> Self {
        self.close_icon = Some(close_icon);
        self
    }

    pub fn button_less(mut self, button_less: bool) -> Self {
        self.button_less = Some(button_less);
        self
    }

    pub fn default_buttons(mut self, buttons: Vec<ButtonDescriptor>) -> Self {
        self.default_buttons = Some(buttons);
        self
    }

    pub fn confirm_buttons(mut self, buttons: Vec<ButtonDescriptor>) -> Self {
        self.confirm_buttons = Some(buttons);
        self
    }

    pub fn on_accept(mut self, callback: impl Fn(&DialogEvent) + 'static) -> Self {
        self.on_accept = Some(Rc::new(callback));
        self
    }

    pub fn on_reject(mut self, callback: impl Fn(&DialogEvent) + 'static) -> Self {
        self.on_reject = Some(Rc::new(callback));
        self
    }

    pub fn on_hide(mut self, callback: impl Fn(&DialogEvent) + 'static) -> Self {
        self.on_hide = Some(Rc::new(callback));
        self
    }

    pub fn on_show(mut self, callback: impl Fn(&DialogEvent) + 'static) -> Self {
        self.on_show = Some(Rc::new(callback));
        self
    }
}

macro_rules! overlay_fields {
    ($target:expr, $layer:expr; $($field:ident),+ $(,)?) => {
        $(
            if let Some(value) = &$layer.$field {
                $target.$field = value.clone();
            }
        )+
    };
}

macro_rules! overlay_callbacks {
    ($target:expr, $layer:expr; $($field:ident),+ $(,)?) => {
        $(
            if let Some(callback) = &$layer.$field {
                $target.$field = Some(Rc::clone(callback));
            }
        )+
    };
}

impl Settings {
    /// Overlay every field `layer` sets.
    pub fn apply(&mut self, layer: &SettingsLayer) {
        overlay_fields!(self, layer;
            title, transition, blurring, inverted, closable, close_icon, button_less,
            default_buttons, confirm_buttons,
        );
        overlay_callbacks!(self, layer; on_accept, on_reject, on_hide, on_show);
    }

    /// Copy of `self` with `layer` applied.
    #[must_use]
    pub fn with(&self, layer: &SettingsLayer) -> Self {
        let mut out = self.clone();
        out.apply(layer);
        out
    }
}

/// Effective settings: overrides > instance-fixed > defaults.
pub fn resolve(
    defaults: &Settings,
    fixed: &SettingsLayer,
    overrides: Option<&SettingsLayer>,
) -> Settings {
    let mut effective = defaults.with(fixed);
    if let Some(overrides) = overrides {
        effective.apply(overrides);
    }
    effective
}
