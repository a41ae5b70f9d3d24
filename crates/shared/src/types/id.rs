//! Typed keys for entity references.
//!
//! Projects are identified by their document name (e.g. `PROJ-0042`) in the
//! order-management system, not by a UUID.

use serde::{Deserialize, Serialize};

/// Unique key of a project.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectKey(String);

impl ProjectKey {
    /// Creates a key from a project document name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ProjectKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProjectKey {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ProjectKey {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl AsRef<str> for ProjectKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_key_display() {
        let key = ProjectKey::new("PROJ-0042");
        assert_eq!(key.to_string(), "PROJ-0042");
        assert_eq!(key.as_str(), "PROJ-0042");
    }

    #[test]
    fn test_project_key_conversions() {
        let from_str: ProjectKey = "PROJ-1".into();
        let from_string: ProjectKey = String::from("PROJ-1").into();
        assert_eq!(from_str, from_string);
        assert_eq!(from_str.as_ref(), "PROJ-1");
    }

    #[test]
    fn test_project_key_serializes_transparently() {
        let key = ProjectKey::new("PROJ-7");
        let json = serde_json::to_string(&key).unwrap();
        assert_eq!(json, "\"PROJ-7\"");

        let back: ProjectKey = serde_json::from_str(&json).unwrap();
        assert_eq!(back, key);
    }
}
