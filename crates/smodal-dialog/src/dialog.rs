#![forbid(unsafe_code)]

//! The dialog controller.
//!
//! A [`Dialog`] owns one anchor in the document. Construction builds the
//! skeleton once and mounts it under `body`:
//!
//! ```text
//! div.ui.modal#<id>
//!   i.close.icon      (only when closable and close_icon)
//!   div.header        title
//!   div.content       message paragraph
//!   div.actions       buttons (absent when button_less)
//! ```
//!
//! `show`/`confirm` resolve the effective settings, refresh the skeleton and
//! hand the anchor to the [`Presenter`], whose relays drive the
//! [`Lifecycle`](crate::lifecycle::Lifecycle).
//!
//! # Failure Modes
//!
//! - Every operation is a logged no-op when the anchor is no longer mounted.
//!   Mutators report this by returning `false`.
//! - `set_buttons` is a no-op while there is no actions node.
//!
//! # Example
//!
//! ```ignore
//! let dom = Rc::new(RefCell::new(MemoryDom::new()));
//! let mut dialog = Dialog::with_defaults(dom, presenter, SettingsLayer::new().title("Confirm?"));
//! dialog.confirm("Delete?", Some(&SettingsLayer::new().on_accept(|_| delete())));
//! ```

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use smodal_dom::{Dom, NodeId, Selector};

use crate::button::{self, ActivationContext, ButtonDescriptor, ButtonsUpdate};
use crate::classes::ClassMap;
use crate::identity::{self, DEFAULT_ID_PREFIX, DialogId};
use crate::lifecycle::{DialogEventKind, DialogState, Lifecycle, Resolution};
use crate::presenter::{BehaviorConfig, DecisionRelay, ModalBehavior, NotifyRelay, Presenter};
use crate::settings::{self, DialogCallback, Settings, SettingsLayer};

/// Attribute marking the skeleton parts of an anchor.
pub const PART_ATTRIBUTE: &str = "data-part";

/// Library-level configuration shared by dialogs: defaults, class
/// vocabulary and anchor id prefix.
#[derive(Debug, Clone)]
pub struct DialogConfig {
    /// Library default settings.
    pub defaults: Settings,
    /// Class vocabulary.
    pub classes: ClassMap,
    /// Prefix of allocated anchor ids.
    pub id_prefix: String,
}

impl Default for DialogConfig {
    fn default() -> Self {
        Self {
            defaults: Settings::default(),
            classes: ClassMap::default(),
            id_prefix: DEFAULT_ID_PREFIX.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Part {
    Close,
    Header,
    Content,
    Actions,
}

impl Part {
    const fn as_str(self) -> &'static str {
        match self {
            Part::Close => "close",
            Part::Header => "header",
            Part::Content => "content",
            Part::Actions => "actions",
        }
    }

    fn selector(self) -> Selector {
        Selector::any().attr(PART_ATTRIBUTE, self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PresentKind {
    Show,
    Confirm,
}

/// One modal dialog bound to an anchor in a shared document.
pub struct Dialog<D: Dom, P: Presenter> {
    id: DialogId,
    dom: Rc<RefCell<D>>,
    presenter: P,
    config: Rc<DialogConfig>,
    fixed: SettingsLayer,
    lifecycle: Rc<Lifecycle>,
    behavior: Option<Box<dyn ModalBehavior>>,
}

impl<D: Dom, P: Presenter> fmt::Debug for Dialog<D, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dialog")
            .field("id", &self.id)
            .field("state", &self.lifecycle.state())
            .field("fixed", &self.fixed)
            .finish_non_exhaustive()
    }
}

impl<D: Dom, P: Presenter> Dialog<D, P> {
    /// Build and mount a dialog.
    ///
    /// `fixed` is captured for the lifetime of the instance.
    pub fn new(
        dom: Rc<RefCell<D>>,
        presenter: P,
        config: Rc<DialogConfig>,
        fixed: SettingsLayer,
    ) -> Self {
        let initial = settings::resolve(&config.defaults, &fixed, None);
        let id = {
            let mut doc = dom.borrow_mut();
            let id = identity::allocate(&*doc, &config.id_prefix);
            let anchor = build_skeleton(&mut *doc, &id, &initial, &config.classes);
            let body = doc.body();
            doc.append_child(body, anchor);
            id
        };
        tracing::info!(id = %id, title = %initial.title, "dialog created");

        let lifecycle = Rc::new(Lifecycle::new(id.clone()));
        lifecycle.configured();

        Self {
            id,
            dom,
            presenter,
            config,
            fixed,
            lifecycle,
            behavior: None,
        }
    }

    /// Build with the library's default configuration.
    pub fn with_defaults(dom: Rc<RefCell<D>>, presenter: P, fixed: SettingsLayer) -> Self {
        Self::new(dom, presenter, Rc::new(DialogConfig::default()), fixed)
    }

    // --- Accessors ---

    /// Identifier of the anchor.
    #[inline]
    pub fn instance_id(&self) -> &DialogId {
        &self.id
    }

    /// Settings captured at construction.
    #[inline]
    pub fn fixed_settings(&self) -> &SettingsLayer {
        &self.fixed
    }

    /// Library configuration this dialog was built from.
    #[inline]
    pub fn config(&self) -> &DialogConfig {
        &self.config
    }

    /// Current lifecycle state.
    pub fn state(&self) -> DialogState {
        self.lifecycle.state()
    }

    /// How the most recent presentation was resolved.
    pub fn last_resolution(&self) -> Option<Resolution> {
        self.lifecycle.last_resolution()
    }

    /// Number of launches so far.
    pub fn presentations(&self) -> u64 {
        self.lifecycle.presentations()
    }

    /// The presentation widget.
    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    /// Behavior handle from the most recent launch.
    pub fn behavior_mut(&mut self) -> Option<&mut (dyn ModalBehavior + 'static)> {
        self.behavior.as_deref_mut()
    }

    /// The mounted anchor, if still present.
    pub fn anchor(&self) -> Option<NodeId> {
        self.dom.borrow().query_by_id(self.id.as_str())
    }

    /// Effective settings for an operation with `overrides`.
    pub fn effective_settings(&self, overrides: Option<&SettingsLayer>) -> Settings {
        settings::resolve(&self.config.defaults, &self.fixed, overrides)
    }

    /// Rendered controls of the actions node, in order.
    pub fn buttons(&self) -> Vec<NodeId> {
        let doc = self.dom.borrow();
        doc.query_by_id(self.id.as_str())
            .and_then(|anchor| doc.query_descendant(anchor, &Part::Actions.selector()))
            .map(|actions| doc.children(actions))
            .unwrap_or_default()
    }

    /// Rendered control named `name`.
    pub fn button(&self, name: &str) -> Option<NodeId> {
        let doc = self.dom.borrow();
        let anchor = doc.query_by_id(self.id.as_str())?;
        let actions = doc.query_descendant(anchor, &Part::Actions.selector())?;
        let selector = Selector::any().attr(self.config.classes.name_attribute.as_str(), name);
        doc.query_descendant(actions, &selector)
    }

    /// Attach `handler` to the rendered control named `name`, replacing its
    /// current handler. Returns `false` when no such control is rendered.
    ///
    /// Applies to the controls currently rendered only. Every presentation
    /// resets and re-renders the button list, so re-attach after each
    /// `show`/`confirm`.
    pub fn on_button(&self, name: &str, handler: impl Fn(&ActivationContext) + 'static) -> bool {
        let Some(node) = self.button(name) else {
            tracing::debug!(id = %self.id, name, "no rendered button with that name");
            return false;
        };
        button::wire_action(
            &mut *self.dom.borrow_mut(),
            node,
            Rc::new(handler),
            &self.id,
            Some(name.to_string()),
        );
        true
    }

    // --- Mutators ---

    /// Replace the header text.
    pub fn set_header(&self, text: &str) -> bool {
        self.with_anchor("set_header", |doc, anchor| {
            if let Some(header) = doc.query_descendant(anchor, &Part::Header.selector()) {
                doc.set_text(header, text);
            }
        })
    }

    /// Show or remove the close icon. The icon is present only when both
    /// flags are set.
    pub fn set_closable(&self, closable: bool, close_icon: bool) -> bool {
        let classes = &self.config.classes;
        self.with_anchor("set_closable", |doc, anchor| {
            if let Some(icon) = doc.query_descendant(anchor, &Part::Close.selector()) {
                doc.remove_node(icon);
            }
            if closable && close_icon {
                mount_close_icon(doc, anchor, classes);
            }
        })
    }

    /// Re-render the controls of the actions node.
    ///
    /// `ButtonsUpdate::Clear` empties it, `Keep` leaves it alone. A no-op
    /// while the dialog has no actions node.
    pub fn set_buttons(&self, buttons: impl Into<ButtonsUpdate>) -> bool {
        let update = buttons.into();
        let id = &self.id;
        let classes = &self.config.classes;
        self.with_anchor("set_buttons", |doc, anchor| {
            match doc.query_descendant(anchor, &Part::Actions.selector()) {
                Some(actions) => {
                    button::render_buttons(doc, actions, &update, id, classes);
                }
                None => tracing::debug!(id = %id, "no actions node, buttons ignored"),
            }
        })
    }

    /// Replace the content with a paragraph holding `message`.
    pub fn set_message(&self, message: &str) -> bool {
        self.with_anchor("set_message", |doc, anchor| {
            if let Some(content) = doc.query_descendant(anchor, &Part::Content.selector()) {
                doc.clear_children(content);
                let paragraph = doc.create_element("p", &[]);
                doc.set_text(paragraph, message);
                doc.append_child(content, paragraph);
            }
        })
    }

    /// Create or remove the actions node to match `settings.button_less`.
    ///
    /// An existing actions node is left untouched when buttons are wanted.
    pub fn set_actions(&self, settings: &Settings) -> bool {
        let id = &self.id;
        let classes = &self.config.classes;
        self.with_anchor("set_actions", |doc, anchor| {
            let existing = doc.query_descendant(anchor, &Part::Actions.selector());
            match (settings.button_less, existing) {
                (true, Some(actions)) => doc.remove_node(actions),
                (false, None) => {
                    mount_actions(doc, anchor, &settings.default_buttons, id, classes);
                }
                (true, None) | (false, Some(_)) => {}
            }
        })
    }

    /// Bring the skeleton in line with `settings` before a presentation.
    pub fn reset(&self, settings: &Settings) -> bool {
        if self.anchor().is_none() {
            tracing::debug!(id = %self.id, op = "reset", "anchor missing, skipped");
            return false;
        }
        self.set_closable(settings.closable, settings.close_icon);
        self.set_header(&settings.title);
        self.set_actions(settings);
        self.set_buttons(settings.default_buttons.as_slice());
        true
    }

    // --- Presentation ---

    /// Present `message` with the default buttons.
    pub fn show(&mut self, message: &str, overrides: Option<&SettingsLayer>) -> bool {
        self.present(PresentKind::Show, message, overrides)
    }

    /// Present `message` with the confirm buttons.
    pub fn confirm(&mut self, message: &str, overrides: Option<&SettingsLayer>) -> bool {
        self.present(PresentKind::Confirm, message, overrides)
    }

    /// [`show`](Self::show) that cannot be dismissed without a button.
    pub fn show_modal(&mut self, message: &str, overrides: Option<&SettingsLayer>) -> bool {
        let forced = force_modal(overrides);
        self.present(PresentKind::Show, message, Some(&forced))
    }

    /// [`confirm`](Self::confirm) that cannot be dismissed without a button.
    pub fn confirm_modal(&mut self, message: &str, overrides: Option<&SettingsLayer>) -> bool {
        let forced = force_modal(overrides);
        self.present(PresentKind::Confirm, message, Some(&forced))
    }

    fn present(
        &mut self,
        kind: PresentKind,
        message: &str,
        overrides: Option<&SettingsLayer>,
    ) -> bool {
        let settings = self.effective_settings(overrides);
        if !self.reset(&settings) {
            return false;
        }
        self.set_message(message);
        if !settings.button_less {
            let list = match kind {
                PresentKind::Show => &settings.default_buttons,
                PresentKind::Confirm => &settings.confirm_buttons,
            };
            self.set_buttons(list.as_slice());
        }
        self.launch(&settings)
    }

    /// Hand the anchor to the presentation widget and show it.
    pub fn launch(&mut self, settings: &Settings) -> bool {
        let Some(anchor) = self.anchor() else {
            tracing::debug!(id = %self.id, op = "launch", "anchor missing, skipped");
            return false;
        };

        self.lifecycle.presenting();
        let config = BehaviorConfig {
            transition: settings.transition,
            inverted: settings.inverted,
            blurring: settings.blurring,
            closable: settings.closable,
            on_approve: decision_relay(
                &self.lifecycle,
                Resolution::Approved,
                settings.on_accept.clone(),
            ),
            on_deny: decision_relay(
                &self.lifecycle,
                Resolution::Denied,
                settings.on_reject.clone(),
            ),
            on_show: shown_relay(&self.lifecycle, settings.on_show.clone()),
            on_hidden: hidden_relay(&self.lifecycle, settings.on_hide.clone()),
        };
        tracing::debug!(
            id = %self.id,
            transition = %settings.transition,
            closable = settings.closable,
            "launching dialog"
        );

        let mut behavior = self.presenter.attach_modal_behavior(anchor, config);
        behavior.show();
        self.behavior = Some(behavior);
        true
    }

    fn with_anchor(&self, op: &'static str, f: impl FnOnce(&mut D, NodeId)) -> bool {
        let mut doc = self.dom.borrow_mut();
        match doc.query_by_id(self.id.as_str()) {
            Some(anchor) => {
                f(&mut *doc, anchor);
                true
            }
            None => {
                tracing::debug!(id = %self.id, op, "anchor missing, skipped");
                false
            }
        }
    }
}

impl<D: Dom, P: Presenter> Drop for Dialog<D, P> {
    fn drop(&mut self) {
        let Ok(mut doc) = self.dom.try_borrow_mut() else {
            tracing::warn!(id = %self.id, "document busy, anchor left mounted");
            return;
        };
        if let Some(anchor) = doc.query_by_id(self.id.as_str()) {
            doc.remove_node(anchor);
            tracing::debug!(id = %self.id, "dialog anchor removed");
        }
    }
}

fn force_modal(overrides: Option<&SettingsLayer>) -> SettingsLayer {
    overrides
        .cloned()
        .unwrap_or_default()
        .closable(false)
        .close_icon(false)
}

fn decision_relay(
    lifecycle: &Rc<Lifecycle>,
    resolution: Resolution,
    callback: Option<DialogCallback>,
) -> DecisionRelay {
    let lifecycle = Rc::clone(lifecycle);
    let kind = match resolution {
        Resolution::Approved => DialogEventKind::Approved,
        Resolution::Denied => DialogEventKind::Denied,
    };
    Rc::new(move || {
        lifecycle.resolved(resolution);
        if let Some(callback) = &callback {
            callback(&lifecycle.event(kind));
        }
        true
    })
}

fn shown_relay(lifecycle: &Rc<Lifecycle>, callback: Option<DialogCallback>) -> NotifyRelay {
    let lifecycle = Rc::clone(lifecycle);
    Rc::new(move || {
        if let Some(callback) = &callback {
            callback(&lifecycle.event(DialogEventKind::Shown));
        }
    })
}

fn hidden_relay(lifecycle: &Rc<Lifecycle>, callback: Option<DialogCallback>) -> NotifyRelay {
    let lifecycle = Rc::clone(lifecycle);
    Rc::new(move || {
        lifecycle.hidden();
        if let Some(callback) = &callback {
            callback(&lifecycle.event(DialogEventKind::Hidden));
        }
        lifecycle.configured();
    })
}

fn mark<D: Dom + ?Sized>(dom: &mut D, node: NodeId, part: Part) {
    dom.set_attribute(node, PART_ATTRIBUTE, part.as_str());
}

fn mount_close_icon<D: Dom + ?Sized>(dom: &mut D, anchor: NodeId, classes: &ClassMap) {
    let icon = dom.create_element("i", &[classes.close_icon.as_str()]);
    mark(dom, icon, Part::Close);
    dom.append_child(anchor, icon);
}

fn mount_actions<D: Dom + ?Sized>(
    dom: &mut D,
    anchor: NodeId,
    buttons: &[ButtonDescriptor],
    id: &DialogId,
    classes: &ClassMap,
) -> NodeId {
    let actions = dom.create_element("div", &[classes.actions.as_str()]);
    mark(dom, actions, Part::Actions);
    button::render_buttons(dom, actions, &ButtonsUpdate::from(buttons), id, classes);
    dom.append_child(anchor, actions);
    actions
}

fn build_skeleton<D: Dom + ?Sized>(
    dom: &mut D,
    id: &DialogId,
    settings: &Settings,
    classes: &ClassMap,
) -> NodeId {
    let anchor = dom.create_element("div", &[classes.base.as_str(), classes.modal.as_str()]);
    dom.set_attribute(anchor, "id", id.as_str());

    if settings.closable && settings.close_icon {
        mount_close_icon(dom, anchor, classes);
    }

    let header = dom.create_element("div", &[classes.header.as_str()]);
    mark(dom, header, Part::Header);
    dom.set_text(header, &settings.title);
    dom.append_child(anchor, header);

    let content = dom.create_element("div", &[classes.content.as_str()]);
    mark(dom, content, Part::Content);
    dom.append_child(anchor, content);

    if !settings.button_less {
        mount_actions(dom, anchor, &settings.default_buttons, id, classes);
    }
    anchor
}
