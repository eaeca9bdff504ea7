#![forbid(unsafe_code)]

//! Minimal element selectors: tag, classes and one attribute equality.

use std::fmt;

/// A compound selector such as `div.header` or `[data-name="ok"]`.
///
/// All parts are optional; an empty selector matches every element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selector {
    tag: Option<String>,
    classes: Vec<String>,
    attribute: Option<(String, String)>,
}

impl Selector {
    /// Selector matching any element.
    pub fn any() -> Self {
        Self::default()
    }

    /// Selector matching elements with the given tag.
    pub fn tag(tag: impl Into<String>) -> Self {
        Self {
            tag: Some(tag.into()),
            ..Self::default()
        }
    }

    /// Require a class. Whitespace-separated input adds each token.
    pub fn class(mut self, class: &str) -> Self {
        self.classes
            .extend(class.split_whitespace().map(str::to_string));
        self
    }

    /// Require an attribute with an exact value.
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attribute = Some((name.into(), value.into()));
        self
    }

    /// Test an element against this selector.
    pub fn matches<'a>(
        &self,
        tag: &str,
        classes: &[String],
        attribute: impl Fn(&str) -> Option<&'a str>,
    ) -> bool {
        if let Some(expected) = &self.tag
            && !expected.eq_ignore_ascii_case(tag)
        {
            return false;
        }
        if !self.classes.iter().all(|c| classes.contains(c)) {
            return false;
        }
        match &self.attribute {
            Some((name, value)) => attribute(name) == Some(value.as_str()),
            None => true,
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(tag) = &self.tag {
            f.write_str(tag)?;
        }
        for class in &self.classes {
            write!(f, ".{class}")?;
        }
        if let Some((name, value)) = &self.attribute {
            write!(f, "[{name}=\"{value}\"]")?;
        }
        if self.tag.is_none() && self.classes.is_empty() && self.attribute.is_none() {
            f.write_str("*")?;
        }
        Ok(())
    }
}
