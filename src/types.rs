//! Shared types used across the sizing engine.
//!
//! [`Transform`] travels from configuration through [`SizeSpec`](crate::size::SizeSpec)
//! into the source resolver, and [`SizingError`] is returned by every core
//! operation that can fail.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Errors raised by the sizing engine.
///
/// An unavailable source is deliberately *not* represented here: the
/// attribute builder omits that breakpoint instead of failing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SizingError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("Size list is empty")]
    EmptyCollection,
}

/// Extra transform parameters handed to the source resolver, e.g.
/// `quality = "auto:eco"` or `gravity = "face"`.
///
/// Keys are kept sorted so rendered URLs are deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Transform(BTreeMap<String, String>);

impl Transform {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a parameter, replacing any previous value.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Layer `overlay` on top of `self`. Keys in `overlay` win.
    pub fn merged(&self, overlay: &Transform) -> Transform {
        let mut merged = self.clone();
        for (key, value) in overlay.iter() {
            merged.insert(key, value);
        }
        merged
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Transform {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merged_overlay_wins() {
        let base = Transform::new().with("quality", "auto:eco").with("fetch_format", "auto");
        let overlay = Transform::new().with("quality", "80").with("gravity", "face");
        let merged = base.merged(&overlay);
        assert_eq!(merged.get("quality"), Some("80"));
        assert_eq!(merged.get("fetch_format"), Some("auto"));
        assert_eq!(merged.get("gravity"), Some("face"));
        // base untouched
        assert_eq!(base.get("quality"), Some("auto:eco"));
    }

    #[test]
    fn iteration_is_sorted_by_key() {
        let t: Transform = [("z", "1"), ("a", "2"), ("m", "3")].into_iter().collect();
        let keys: Vec<_> = t.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["a", "m", "z"]);
    }

    #[test]
    fn error_messages() {
        assert_eq!(SizingError::EmptyCollection.to_string(), "Size list is empty");
        assert_eq!(
            SizingError::InvalidConfiguration("bad".into()).to_string(),
            "Invalid configuration: bad"
        );
    }
}
