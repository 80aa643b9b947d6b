//! Section records supplied by the host system

use crate::ids::SectionId;

/// A content section, as far as relationships need to know about it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// Section id in the host system
    pub id: SectionId,

    /// Display name
    pub name: String,

    /// URL-safe handle
    pub handle: String,
}

impl Section {
    /// Create a section record
    pub fn new(id: SectionId, name: impl Into<String>, handle: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            handle: handle.into(),
        }
    }
}
