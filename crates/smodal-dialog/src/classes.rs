#![forbid(unsafe_code)]

//! Class vocabulary shared by every dialog built from one configuration.
//!
//! Class names are opaque tokens owned by the presentation layer. The engine
//! only needs to know which token marks the base framework, which tokens
//! name the skeleton sections, and how the closed set of button roles maps
//! to classes.

use std::collections::BTreeMap;

#[cfg(feature = "config")]
use serde::Deserialize;

/// Attribute carrying a button's name, used for lookups.
pub const DEFAULT_NAME_ATTRIBUTE: &str = "data-name";

/// Role tokens understood by default, each mapped to the same class name.
pub const DEFAULT_ROLES: [&str; 7] = [
    "ok", "positive", "approve", "negative", "deny", "cancel", "close",
];

/// Immutable class vocabulary.
///
/// `roles` is a closed vocabulary: a token missing from it is dropped when a
/// button is rendered, never passed through as a raw class.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "config", derive(Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct ClassMap {
    /// Base-framework marker. Also the leading token that makes a raw class
    /// string "CSS-only".
    pub base: String,
    /// Generic button class.
    pub button: String,
    /// Classes of the dialog anchor besides `base`.
    pub modal: String,
    /// Header section class.
    pub header: String,
    /// Content section class.
    pub content: String,
    /// Actions section class.
    pub actions: String,
    /// Close icon classes (whitespace separated).
    pub close_icon: String,
    /// Attribute storing a button's name.
    pub name_attribute: String,
    /// Role token -> class.
    pub roles: BTreeMap<String, String>,
}

impl Default for ClassMap {
    fn default() -> Self {
        Self {
            base: "ui".to_string(),
            button: "button".to_string(),
            modal: "modal".to_string(),
            header: "header".to_string(),
            content: "content".to_string(),
            actions: "actions".to_string(),
            close_icon: "close icon".to_string(),
            name_attribute: DEFAULT_NAME_ATTRIBUTE.to_string(),
            roles: DEFAULT_ROLES
                .iter()
                .map(|r| (r.to_string(), r.to_string()))
                .collect(),
        }
    }
}

impl ClassMap {
    /// Class for a role token, or `None` for tokens outside the vocabulary.
    pub fn role(&self, token: &str) -> Option<&str> {
        self.roles.get(token).map(String::as_str)
    }

    /// Whether a raw class string opts out of role classes.
    ///
    /// True when its first whitespace-separated token is the base marker.
    /// Matching is per class token, not per character: `"uikit button"` is
    /// not CSS-only, and leading whitespace is ignored, so `" ui button"` is.
    pub fn is_css_only(&self, raw: &str) -> bool {
        raw.split_whitespace().next() == Some(self.base.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_roles_map_to_themselves() {
        let classes = ClassMap::default();
        for role in DEFAULT_ROLES {
            assert_eq!(classes.role(role), Some(role));
        }
        assert_eq!(classes.role("labeled"), None);
    }

    #[test]
    fn css_only_detection_uses_leading_token() {
        let classes = ClassMap::default();
        assert!(classes.is_css_only("ui tiny green button"));
        assert!(classes.is_css_only("  ui button"));
        assert!(!classes.is_css_only("extra-pad"));
        assert!(!classes.is_css_only("uikit button"));
        assert!(!classes.is_css_only("tiny ui button"));
        assert!(!classes.is_css_only(""));
    }
}
