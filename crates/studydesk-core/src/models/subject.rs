//! Subject identifiers and catalog entries.

use std::{borrow::Borrow, fmt};

use serde::{Deserialize, Serialize};

/// Opaque identifier of a subject, unique within a [`crate::SubjectCatalog`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubjectId(String);

impl SubjectId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SubjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SubjectId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for SubjectId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Borrow<str> for SubjectId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// A school subject with its display attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    /// Catalog identifier, also accepted as a `#tag`
    pub id: SubjectId,

    /// Human readable name, also accepted as a `#tag` (case-insensitive)
    pub name: String,

    /// Display color as a hex string
    pub color: String,

    /// Icon glyph shown next to the subject
    pub icon: String,
}

impl Subject {
    pub fn new(id: &str, name: &str, color: &str, icon: &str) -> Self {
        Self {
            id: SubjectId::new(id),
            name: name.to_string(),
            color: color.to_string(),
            icon: icon.to_string(),
        }
    }

    /// Whether a lowercased `#tag` refers to this subject.
    pub fn matches_tag(&self, tag: &str) -> bool {
        self.id.as_str().to_lowercase() == tag || self.name.to_lowercase() == tag
    }
}
