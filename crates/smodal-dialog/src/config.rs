#![forbid(unsafe_code)]

//! Loading dialog configuration from TOML or JSON.
//!
//! Three things can be loaded:
//!
//! - [`DialogConfig`]: library defaults, class vocabulary and id prefix.
//! - [`SettingsLayer`]: a call-time override layer.
//! - [`ButtonsUpdate`]: a button payload for `Dialog::set_buttons`.
//!
//! Missing fields fall back to library defaults. Button descriptors loaded
//! from data carry no handlers; attach them in code (see
//! `Dialog::on_button`). Field names are snake_case, with camelCase aliases
//! accepted (`buttonLess`, `closeIcon`, `actionTypes`, ...).
//!
//! # Example
//!
//! ```toml
//! id_prefix = "confirm-"
//!
//! [defaults]
//! transition = "fade up"
//! closable = false
//!
//! [[defaults.confirm_buttons]]
//! title = "Delete"
//! name = "delete"
//! action_types = ["negative"]
//!
//! [classes]
//! base = "ui"
//! ```
//!
//! A `ButtonsUpdate` payload keeps the render asymmetry at the data
//! boundary: an array replaces the controls, `null` clears them, any other
//! value leaves them untouched.

use std::fmt;
use std::path::Path;

use serde::Deserialize;
use serde::de::{self, IgnoredAny, MapAccess, SeqAccess, Visitor};

use crate::button::{ButtonDescriptor, ButtonsUpdate};
use crate::classes::ClassMap;
use crate::dialog::DialogConfig;
use crate::identity::DEFAULT_ID_PREFIX;
use crate::settings::{Settings, SettingsLayer};
use crate::transition::{Transition, UnknownTransition};

/// Errors that can occur when loading dialog configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// I/O error reading a file.
    Io(std::io::Error),
    /// TOML parse error.
    Toml(toml::de::Error),
    /// JSON parse error.
    Json(serde_json::Error),
    /// A transition name outside the catalogue.
    UnknownTransition(UnknownTransition),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Toml(e) => write!(f, "TOML parse error: {e}"),
            Self::Json(e) => write!(f, "JSON parse error: {e}"),
            Self::UnknownTransition(e) => write!(f, "invalid settings: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Toml(e) => Some(e),
            Self::Json(e) => Some(e),
            Self::UnknownTransition(e) => Some(e),
        }
    }
}

impl From<UnknownTransition> for ConfigError {
    fn from(e: UnknownTransition) -> Self {
        Self::UnknownTransition(e)
    }
}

fn read(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(ConfigError::Io)
}

// ---------------------------------------------------------------------------
// Data shapes
// ---------------------------------------------------------------------------

/// A button as it appears in configuration data.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct ButtonEntry {
    name: Option<String>,
    #[serde(alias = "actionTypes")]
    action_types: Vec<String>,
    #[serde(alias = "cssClass")]
    css_class: Option<String>,
    #[serde(alias = "iconClass")]
    icon_class: Option<String>,
    title: String,
}

impl From<ButtonEntry> for ButtonDescriptor {
    fn from(entry: ButtonEntry) -> Self {
        ButtonDescriptor {
            name: entry.name,
            action_types: entry.action_types,
            css_class: entry.css_class,
            icon_class: entry.icon_class,
            title: entry.title,
            action: None,
            check_before: None,
        }
    }
}

fn descriptors(entries: Option<Vec<ButtonEntry>>) -> Option<Vec<ButtonDescriptor>> {
    entries.map(|list| list.into_iter().map(ButtonDescriptor::from).collect())
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct LayerEntry {
    title: Option<String>,
    transition: Option<String>,
    blurring: Option<bool>,
    inverted: Option<bool>,
    closable: Option<bool>,
    #[serde(alias = "closeIcon")]
    close_icon: Option<bool>,
    #[serde(alias = "buttonLess")]
    button_less: Option<bool>,
    #[serde(alias = "defaultButtons")]
    default_buttons: Option<Vec<ButtonEntry>>,
    #[serde(alias = "confirmButtons")]
    confirm_buttons: Option<Vec<ButtonEntry>>,
}

impl LayerEntry {
    fn into_layer(self) -> Result<SettingsLayer, ConfigError> {
        let transition = self
            .transition
            .as_deref()
            .map(str::parse::<Transition>)
            .transpose()?;
        Ok(SettingsLayer {
            title: self.title,
            transition,
            blurring: self.blurring,
            inverted: self.inverted,
            closable: self.closable,
            close_icon: self.close_icon,
            button_less: self.button_less,
            default_buttons: descriptors(self.default_buttons),
            confirm_buttons: descriptors(self.confirm_buttons),
            ..SettingsLayer::default()
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct ConfigFile {
    #[serde(alias = "idPrefix")]
    id_prefix: String,
    defaults: LayerEntry,
    classes: ClassMap,
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            id_prefix: DEFAULT_ID_PREFIX.to_string(),
            defaults: LayerEntry::default(),
            classes: ClassMap::default(),
        }
    }
}

impl ConfigFile {
    fn into_config(self) -> Result<DialogConfig, ConfigError> {
        let layer = self.defaults.into_layer()?;
        Ok(DialogConfig {
            defaults: Settings::default().with(&layer),
            classes: self.classes,
            id_prefix: self.id_prefix,
        })
    }
}

// ---------------------------------------------------------------------------
// Loaders
// ---------------------------------------------------------------------------

impl DialogConfig {
    /// Load from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile = toml::from_str(s).map_err(ConfigError::Toml)?;
        file.into_config()
    }

    /// Load from a TOML file on disk.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_str(&read(path.as_ref())?)
    }

    /// Load from a JSON string.
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile = serde_json::from_str(s).map_err(ConfigError::Json)?;
        file.into_config()
    }

    /// Load from a JSON file on disk.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_json_str(&read(path.as_ref())?)
    }
}

impl SettingsLayer {
    /// Load an override layer from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let entry: LayerEntry = toml::from_str(s).map_err(ConfigError::Toml)?;
        entry.into_layer()
    }

    /// Load an override layer from a TOML file on disk.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_str(&read(path.as_ref())?)
    }

    /// Load an override layer from a JSON string.
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let entry: LayerEntry = serde_json::from_str(s).map_err(ConfigError::Json)?;
        entry.into_layer()
    }

    /// Load an override layer from a JSON file on disk.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_json_str(&read(path.as_ref())?)
    }
}

impl ButtonsUpdate {
    /// Interpret a JSON button payload.
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(s).map_err(ConfigError::Json)
    }
}

// ---------------------------------------------------------------------------
// ButtonsUpdate payloads
// ---------------------------------------------------------------------------

struct UpdateVisitor;

impl<'de> Visitor<'de> for UpdateVisitor {
    type Value = ButtonsUpdate;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a list of buttons, null, or any other value")
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        let mut list = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(entry) = seq.next_element::<ButtonEntry>()? {
            list.push(ButtonDescriptor::from(entry));
        }
        Ok(ButtonsUpdate::Replace(list))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(ButtonsUpdate::Clear)
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(ButtonsUpdate::Clear)
    }

    fn visit_some<D: de::Deserializer<'de>>(self, d: D) -> Result<Self::Value, D::Error> {
        d.deserialize_any(self)
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        while map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {}
        Ok(ButtonsUpdate::Keep)
    }

    fn visit_bool<E: de::Error>(self, _: bool) -> Result<Self::Value, E> {
        Ok(ButtonsUpdate::Keep)
    }

    fn visit_i64<E: de::Error>(self, _: i64) -> Result<Self::Value, E> {
        Ok(ButtonsUpdate::Keep)
    }

    fn visit_u64<E: de::Error>(self, _: u64) -> Result<Self::Value, E> {
        Ok(ButtonsUpdate::Keep)
    }

    fn visit_f64<E: de::Error>(self, _: f64) -> Result<Self::Value, E> {
        Ok(ButtonsUpdate::Keep)
    }

    fn visit_str<E: de::Error>(self, _: &str) -> Result<Self::Value, E> {
        Ok(ButtonsUpdate::Keep)
    }
}

impl<'de> Deserialize<'de> for ButtonsUpdate {
    fn deserialize<D: de::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(UpdateVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    fn titles(list: &[ButtonDescriptor]) -> Vec<&str> {
        list.iter().map(|b| b.title.as_str()).collect()
    }

    #[test]
    fn empty_toml_gives_library_defaults() {
        let config = DialogConfig::from_toml_str("").unwrap();
        let default = DialogConfig::default();
        assert_eq!(config.id_prefix, DEFAULT_ID_PREFIX);
        assert_eq!(config.classes, default.classes);
        assert_eq!(format!("{:?}", config.defaults), format!("{:?}", default.defaults));
    }

    #[test]
    fn toml_overrides_selected_fields() {
        let config = DialogConfig::from_toml_str(
            r#"
            id_prefix = "confirm-"

            [defaults]
            title = "Heads up"
            transition = "fade up"
            closable = false

            [[defaults.confirm_buttons]]
            title = "Delete"
            name = "delete"
            action_types = ["negative"]

            [classes]
            header = "title"
            "#,
        )
        .unwrap();

        assert_eq!(config.id_prefix, "confirm-");
        assert_eq!(config.defaults.title, "Heads up");
        assert_eq!(config.defaults.transition, Transition::FadeUp);
        assert!(!config.defaults.closable);
        assert!(config.defaults.close_icon);
        assert_eq!(titles(&config.defaults.confirm_buttons), vec!["Delete"]);
        assert_eq!(titles(&config.defaults.default_buttons), vec!["Ok"]);
        assert_eq!(config.classes.header, "title");
        assert_eq!(config.classes.base, "ui");
    }

    #[test]
    fn json_accepts_camel_case_names() {
        let config = DialogConfig::from_json_str(
            r#"{
                "idPrefix": "x-",
                "defaults": {
                    "buttonLess": true,
                    "closeIcon": false,
                    "defaultButtons": [
                        {"title": "Got it", "actionTypes": ["ok"], "cssClass": "basic", "iconClass": "thumbs up icon"}
                    ]
                }
            }"#,
        )
        .unwrap();
        assert_eq!(config.id_prefix, "x-");
        assert!(config.defaults.button_less);
        assert!(!config.defaults.close_icon);
        let ok = &config.defaults.default_buttons[0];
        assert_eq!(ok.title, "Got it");
        assert_eq!(ok.action_types, vec!["ok"]);
        assert_eq!(ok.css_class.as_deref(), Some("basic"));
        assert_eq!(ok.icon_class.as_deref(), Some("thumbs up icon"));
        assert!(ok.action.is_none());
    }

    #[test]
    fn unknown_transition_is_reported() {
        let err = DialogConfig::from_toml_str("[defaults]\ntransition = \"wobble\"").unwrap_err();
        assert!(matches!(&err, ConfigError::UnknownTransition(UnknownTransition(name)) if name == "wobble"));
        assert!(err.to_string().contains("wobble"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn malformed_input_maps_to_parser_error() {
        assert!(matches!(
            DialogConfig::from_toml_str("id_prefix = ["),
            Err(ConfigError::Toml(_))
        ));
        assert!(matches!(
            DialogConfig::from_json_str("{"),
            Err(ConfigError::Json(_))
        ));
        assert!(matches!(
            SettingsLayer::from_json_str(r#"{"closable": "yes"}"#),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = DialogConfig::from_toml_file(dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
        assert!(err.to_string().starts_with("I/O error"));
    }

    #[test]
    fn loads_from_files() {
        let mut toml_file = tempfile::NamedTempFile::new().unwrap();
        writeln!(toml_file, "[defaults]\ninverted = true").unwrap();
        let config = DialogConfig::from_toml_file(toml_file.path()).unwrap();
        assert!(config.defaults.inverted);

        let mut json_file = tempfile::NamedTempFile::new().unwrap();
        write!(json_file, r#"{{"title": "From disk", "blurring": true}}"#).unwrap();
        let layer = SettingsLayer::from_json_file(json_file.path()).unwrap();
        assert_eq!(layer.title.as_deref(), Some("From disk"));
        assert_eq!(layer.blurring, Some(true));
        assert_eq!(layer.closable, None);
    }

    #[test]
    fn settings_layer_leaves_absent_fields_unset() {
        let layer = SettingsLayer::from_toml_str("transition = \"bounce\"").unwrap();
        assert_eq!(layer.transition, Some(Transition::Bounce));
        assert!(layer.title.is_none());
        assert!(layer.default_buttons.is_none());
        assert!(layer.on_accept.is_none());
    }

    #[test]
    fn buttons_payload_array_replaces() {
        let update = ButtonsUpdate::from_json_str(r#"[{"title": "A"}, {"title": "B"}]"#).unwrap();
        match update {
            ButtonsUpdate::Replace(list) => assert_eq!(titles(&list), vec!["A", "B"]),
            other => panic!("expected replace, got {other:?}"),
        }
    }

    #[test]
    fn buttons_payload_null_clears() {
        assert!(matches!(
            ButtonsUpdate::from_json_str("null").unwrap(),
            ButtonsUpdate::Clear
        ));
    }

    #[test]
    fn buttons_payload_other_values_keep() {
        for payload in ["true", "3", "-1", "2.5", r#""ok""#, r#"{"title": "A"}"#] {
            assert!(
                matches!(ButtonsUpdate::from_json_str(payload).unwrap(), ButtonsUpdate::Keep),
                "payload {payload}"
            );
        }
    }

    #[test]
    fn empty_array_replaces_with_nothing() {
        assert!(matches!(
            ButtonsUpdate::from_json_str("[]").unwrap(),
            ButtonsUpdate::Replace(list) if list.is_empty()
        ));
    }
}
