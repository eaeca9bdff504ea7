#![forbid(unsafe_code)]

//! Declarative button descriptors and their rendering into an actions node.
//!
//! A [`ButtonDescriptor`] describes one control before it exists. Rendering
//! walks an ordered list of descriptors and turns each into an element with
//! computed classes, an optional icon child, an optional name attribute and
//! an optional activation handler.
//!
//! # Render modes
//!
//! - **Semantic**: base marker + generic button class + mapped role classes,
//!   then any raw `css_class` tokens appended.
//! - **CSS-only**: the raw `css_class` starts with the base marker, so only
//!   its own tokens are applied. Roles and the generic button class are
//!   skipped.
//!
//! # Invariants
//!
//! - Descriptors render in the order given; one descriptor never affects
//!   its siblings.
//! - A guard returning `false` means no node is created and no handler is
//!   wired for that descriptor.
//! - Role tokens outside the [`ClassMap`] vocabulary are dropped.

use std::fmt;
use std::rc::Rc;

use smodal_dom::{Dom, NodeId};

use crate::classes::ClassMap;
use crate::identity::DialogId;

/// Name of the single button in the library's default button list.
pub const DEFAULT_OK_BUTTON: &str = "smodal-default-ok";
/// Name of the approving button in the library's confirm button list.
pub const CONFIRM_OK_BUTTON: &str = "smodal-confirm-ok";
/// Name of the denying button in the library's confirm button list.
pub const CONFIRM_CANCEL_BUTTON: &str = "smodal-confirm-cancel";

/// Context handed to a button's activation handler.
///
/// Captured once when the button is rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivationContext {
    /// The dialog the button belongs to.
    pub instance_id: DialogId,
    /// The rendered control.
    pub button: NodeId,
    /// The descriptor's name, if any.
    pub name: Option<String>,
}

/// Handler run when a rendered button is activated.
pub type ButtonAction = Rc<dyn Fn(&ActivationContext)>;

/// Predicate deciding whether a descriptor is rendered at all.
pub type ButtonGuard = Rc<dyn Fn(&ButtonDescriptor) -> bool>;

/// Declarative description of one action control.
#[derive(Clone, Default)]
pub struct ButtonDescriptor {
    /// Lookup name, see [`DEFAULT_OK_BUTTON`] and friends.
    pub name: Option<String>,
    /// Semantic role tokens, resolved through [`ClassMap::role`].
    pub action_types: Vec<String>,
    /// Raw class string.
    pub css_class: Option<String>,
    /// Icon classes; when set an icon child is attached.
    pub icon_class: Option<String>,
    /// Display text.
    pub title: String,
    /// Activation handler.
    pub action: Option<ButtonAction>,
    /// Render guard.
    pub check_before: Option<ButtonGuard>,
}

impl fmt::Debug for ButtonDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ButtonDescriptor")
            .field("name", &self.name)
            .field("action_types", &self.action_types)
            .field("css_class", &self.css_class)
            .field("icon_class", &self.icon_class)
            .field("title", &self.title)
            .field("action", &self.action.is_some())
            .field("check_before", &self.check_before.is_some())
            .finish()
    }
}

impl ButtonDescriptor {
    /// Create a descriptor with display text only.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Set the lookup name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Add a role token.
    pub fn role(mut self, role: impl Into<String>) -> Self {
        self.action_types.push(role.into());
        self
    }

    /// Set the raw class string.
    pub fn css_class(mut self, class: impl Into<String>) -> Self {
        self.css_class = Some(class.into());
        self
    }

    /// Set the icon classes.
    pub fn icon(mut self, class: impl Into<String>) -> Self {
        self.icon_class = Some(class.into());
        self
    }

    /// Set the activation handler.
    pub fn on_activate(mut self, action: impl Fn(&ActivationContext) + 'static) -> Self {
        self.action = Some(Rc::new(action));
        self
    }

    /// Set the render guard.
    pub fn check_before(mut self, guard: impl Fn(&ButtonDescriptor) -> bool + 'static) -> Self {
        self.check_before = Some(Rc::new(guard));
        self
    }

    /// How this descriptor will be rendered under `classes`.
    pub fn render_mode(&self, classes: &ClassMap) -> RenderMode {
        match &self.css_class {
            Some(raw) if classes.is_css_only(raw) => RenderMode::CssOnly,
            _ => RenderMode::Semantic,
        }
    }

    /// Classes the rendered control will carry, in application order.
    pub fn classes(&self, classes: &ClassMap) -> Vec<String> {
        let raw = self
            .css_class
            .as_deref()
            .unwrap_or_default()
            .split_whitespace();
        let mut out: Vec<String> = Vec::new();
        let mut push = |class: &str| {
            if !out.iter().any(|c| c == class) {
                out.push(class.to_string());
            }
        };
        if self.render_mode(classes) == RenderMode::Semantic {
            push(&classes.base);
            push(&classes.button);
            for role in self.action_types.iter().filter_map(|t| classes.role(t)) {
                push(role);
            }
        }
        for class in raw {
            push(class);
        }
        out
    }

    fn passes_guard(&self) -> bool {
        self.check_before.as_ref().is_none_or(|guard| guard(self))
    }
}

/// Whether role classes apply to a descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// Role classes plus raw classes.
    Semantic,
    /// Raw classes only.
    CssOnly,
}

/// The library's default button list: a single OK.
pub fn default_buttons() -> Vec<ButtonDescriptor> {
    vec![ButtonDescriptor::new("Ok").name(DEFAULT_OK_BUTTON).role("ok")]
}

/// The library's confirm button list: OK and Cancel.
pub fn confirm_buttons() -> Vec<ButtonDescriptor> {
    vec![
        ButtonDescriptor::new("Ok")
            .name(CONFIRM_OK_BUTTON)
            .role("positive")
            .css_class("right labeled icon")
            .icon("checkmark icon"),
        ButtonDescriptor::new("Cancel")
            .name(CONFIRM_CANCEL_BUTTON)
            .role("negative")
            .role("cancel"),
    ]
}

/// What to do with the controls of an actions node.
#[derive(Debug, Clone, Default)]
pub enum ButtonsUpdate {
    /// Clear and render this list.
    Replace(Vec<ButtonDescriptor>),
    /// Clear every control and render none.
    Clear,
    /// Leave the current controls untouched.
    #[default]
    Keep,
}

impl From<Vec<ButtonDescriptor>> for ButtonsUpdate {
    fn from(list: Vec<ButtonDescriptor>) -> Self {
        Self::Replace(list)
    }
}

impl From<&[ButtonDescriptor]> for ButtonsUpdate {
    fn from(list: &[ButtonDescriptor]) -> Self {
        Self::Replace(list.to_vec())
    }
}

impl From<Option<Vec<ButtonDescriptor>>> for ButtonsUpdate {
    fn from(list: Option<Vec<ButtonDescriptor>>) -> Self {
        list.map_or(Self::Clear, Self::Replace)
    }
}

/// Apply `update` to the children of `actions`.
///
/// Returns the controls created, in order. `Keep` leaves the node untouched
/// and returns nothing; `Clear` empties it.
pub fn render_buttons<D: Dom + ?Sized>(
    dom: &mut D,
    actions: NodeId,
    update: &ButtonsUpdate,
    instance_id: &DialogId,
    classes: &ClassMap,
) -> Vec<NodeId> {
    let list = match update {
        ButtonsUpdate::Keep => return Vec::new(),
        ButtonsUpdate::Clear => {
            dom.clear_children(actions);
            return Vec::new();
        }
        ButtonsUpdate::Replace(list) => list,
    };

    dom.clear_children(actions);
    list.iter()
        .filter_map(|descriptor| render_button(dom, actions, descriptor, instance_id, classes))
        .collect()
}

/// Render one descriptor into `actions`. Returns `None` when its guard rejects it.
pub fn render_button<D: Dom + ?Sized>(
    dom: &mut D,
    actions: NodeId,
    descriptor: &ButtonDescriptor,
    instance_id: &DialogId,
    classes: &ClassMap,
) -> Option<NodeId> {
    if !descriptor.passes_guard() {
        tracing::trace!(title = %descriptor.title, "button skipped by guard");
        return None;
    }

    let class_list = descriptor.classes(classes);
    let class_refs: Vec<&str> = class_list.iter().map(String::as_str).collect();
    let button = dom.create_element("div", &class_refs);
    dom.set_text(button, &descriptor.title);

    if let Some(icon) = &descriptor.icon_class {
        let marker = dom.create_element("i", &[icon.as_str()]);
        dom.append_child(button, marker);
    }

    if let Some(name) = &descriptor.name {
        dom.set_attribute(button, &classes.name_attribute, name);
    }

    if let Some(action) = &descriptor.action {
        wire_action(dom, button, Rc::clone(action), instance_id, descriptor.name.clone());
    }

    dom.append_child(actions, button);
    tracing::trace!(
        title = %descriptor.title,
        mode = ?descriptor.render_mode(classes),
        "button rendered"
    );
    Some(button)
}

/// Bind `action` to `button` with a context captured now.
pub(crate) fn wire_action<D: Dom + ?Sized>(
    dom: &mut D,
    button: NodeId,
    action: ButtonAction,
    instance_id: &DialogId,
    name: Option<String>,
) {
    let context = ActivationContext {
        instance_id: instance_id.clone(),
        button,
        name,
    };
    dom.set_activation(button, Rc::new(move || action(&context)));
}
