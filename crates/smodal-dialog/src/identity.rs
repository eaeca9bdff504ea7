#![forbid(unsafe_code)]

//! Unique identifiers for dialog anchors.
//!
//! Each dialog is located in the document by an `id` attribute. Identifiers
//! are a random 128-bit token rendered as hex, with an optional prefix, and
//! are re-drawn until no mounted node already carries the same id.
//!
//! # Invariants
//!
//! - A returned identifier never matches the id of a node mounted at the
//!   time of the call.
//! - The identifier starts with the requested prefix.

use std::fmt;

use smodal_dom::Dom;
use uuid::Uuid;

/// Prefix used for dialog anchors unless configured otherwise.
pub const DEFAULT_ID_PREFIX: &str = "modal-";

/// Identifier of one dialog anchor.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DialogId(String);

impl DialogId {
    /// View as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DialogId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for DialogId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A fresh 128-bit token: grouped hex with the separators stripped.
fn random_token() -> String {
    Uuid::new_v4().simple().to_string()
}

/// Allocate an identifier that no mounted node currently uses.
pub fn allocate<D: Dom + ?Sized>(dom: &D, prefix: &str) -> DialogId {
    allocate_with(dom, prefix, random_token)
}

/// Allocate using a caller-supplied token source.
///
/// Keeps drawing tokens until `prefix + token` is free in `dom`.
pub fn allocate_with<D, F>(dom: &D, prefix: &str, mut next_token: F) -> DialogId
where
    D: Dom + ?Sized,
    F: FnMut() -> String,
{
    loop {
        let candidate = format!("{prefix}{}", next_token());
        if dom.query_by_id(&candidate).is_none() {
            return DialogId(candidate);
        }
        tracing::warn!(id = %candidate, "dialog id collision, drawing a new token");
    }
}
