//! Relationship record
//!
//! A relationship constrains how entries in two or more sections may be linked.
//! Fields are private; each setter applies the coercion rules for its field so
//! a record can be filled straight from loosely typed input (form fields, CLI
//! arguments) and then validated as a whole.

use crate::handle::create_handle;
use crate::ids::{RelationshipId, SectionId};
use crate::section::Section;
use crate::traits::SectionDirectory;

/// A named many-to-many constraint between sections
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relationship {
    id: Option<RelationshipId>,
    name: String,
    handle: String,
    min: Option<u32>,
    max: Option<u32>,
    sections: Vec<SectionId>,
}

impl Default for Relationship {
    fn default() -> Self {
        Self {
            id: None,
            name: String::new(),
            handle: String::new(),
            min: Some(0),
            max: Some(0),
            sections: Vec::new(),
        }
    }
}

impl Relationship {
    /// Create an empty, unsaved relationship
    ///
    /// Minimum and maximum start at 0 ("no minimum", "unlimited").
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a relationship from stored columns without re-deriving anything
    pub fn from_parts(
        id: RelationshipId,
        name: String,
        handle: String,
        min: u32,
        max: u32,
        sections: Vec<SectionId>,
    ) -> Self {
        Self {
            id: Some(id),
            name,
            handle,
            min: Some(min),
            max: Some(max),
            sections,
        }
    }

    /// Store-assigned id, `None` until the record has been added
    pub fn id(&self) -> Option<RelationshipId> {
        self.id
    }

    /// Display name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// URL-safe unique handle
    pub fn handle(&self) -> &str {
        &self.handle
    }

    /// Minimum link count, `Some(0)` meaning no minimum
    ///
    /// `None` when the last input could not be read as a number.
    pub fn min(&self) -> Option<u32> {
        self.min
    }

    /// Maximum link count, `Some(0)` meaning unlimited
    pub fn max(&self) -> Option<u32> {
        self.max
    }

    /// Associated sections, in the order they were given
    pub fn sections(&self) -> &[SectionId] {
        &self.sections
    }

    /// Set the id
    pub fn set_id(&mut self, id: RelationshipId) {
        self.id = Some(id);
    }

    /// Set the name
    ///
    /// When no handle has been set yet, the handle is derived from the name.
    /// An existing handle is never touched by a rename.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();

        if self.handle.trim().is_empty() {
            let derived = self.name.clone();
            self.set_handle(&derived);
        }
    }

    /// Set the handle, slugging the input
    pub fn set_handle(&mut self, handle: &str) {
        self.handle = create_handle(handle);
    }

    /// Make sure the handle is a slug, falling back to the name when blank
    pub fn ensure_handle(&mut self) {
        let source = if self.handle.trim().is_empty() {
            self.name.clone()
        } else {
            self.handle.clone()
        };
        self.set_handle(&source);
    }

    /// Set the minimum link count
    pub fn set_min(&mut self, min: u32) {
        self.min = Some(min);
    }

    /// Set the maximum link count
    pub fn set_max(&mut self, max: u32) {
        self.max = Some(max);
    }

    /// Set the minimum from text input; anything but a non-negative integer clears it
    pub fn set_min_input(&mut self, input: &str) {
        self.min = parse_count(input);
    }

    /// Set the maximum from text input; anything but a non-negative integer clears it
    pub fn set_max_input(&mut self, input: &str) {
        self.max = parse_count(input);
    }

    /// Replace the section set
    ///
    /// Non-positive ids are dropped and duplicates collapse onto their first
    /// occurrence.
    pub fn set_sections<I>(&mut self, ids: I)
    where
        I: IntoIterator<Item = i64>,
    {
        let mut sections: Vec<SectionId> = Vec::new();
        for section in ids.into_iter().filter_map(SectionId::new) {
            if !sections.contains(&section) {
                sections.push(section);
            }
        }
        self.sections = sections;
    }

    /// Replace the section set with a single section
    ///
    /// A non-positive id leaves the set empty.
    pub fn set_section(&mut self, id: i64) {
        self.set_sections([id]);
    }

    /// Replace the section set from comma or whitespace separated text
    ///
    /// Tokens that are not integers are dropped, same as non-positive ids.
    pub fn set_sections_input(&mut self, input: &str) {
        let ids: Vec<i64> = input
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter_map(|token| token.trim().parse().ok())
            .collect();
        self.set_sections(ids);
    }

    /// Look up the associated sections in a directory
    pub fn fetch_sections<D: SectionDirectory>(&self, directory: &D) -> Result<Vec<Section>, D::Error> {
        if self.sections.is_empty() {
            return Ok(Vec::new());
        }
        directory.fetch_sections(&self.sections)
    }

    /// Minimum as shown to editors
    pub fn min_label(&self) -> String {
        match self.min {
            Some(0) => "None".to_string(),
            Some(n) => n.to_string(),
            None => "-".to_string(),
        }
    }

    /// Maximum as shown to editors
    pub fn max_label(&self) -> String {
        match self.max {
            Some(0) => "Unlimited".to_string(),
            Some(n) => n.to_string(),
            None => "-".to_string(),
        }
    }
}

fn parse_count(input: &str) -> Option<u32> {
    input.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_record_defaults() {
        let relationship = Relationship::new();
        assert!(relationship.id().is_none());
        assert_eq!(relationship.min(), Some(0));
        assert_eq!(relationship.max(), Some(0));
        assert!(relationship.sections().is_empty());
    }

    #[test]
    fn test_name_derives_handle_once() {
        let mut relationship = Relationship::new();
        relationship.set_name("Blog Authors");
        assert_eq!(relationship.handle(), "blog-authors");

        relationship.set_name("Writers");
        assert_eq!(relationship.name(), "Writers");
        assert_eq!(relationship.handle(), "blog-authors");
    }

    #[test]
    fn test_set_handle_always_slugs() {
        let mut relationship = Relationship::new();
        relationship.set_name("Authors");
        relationship.set_handle("Article Authors!");
        assert_eq!(relationship.handle(), "article-authors");
    }

    #[test]
    fn test_blank_handle_is_rederived() {
        let mut relationship = Relationship::new();
        relationship.set_handle("   ");
        relationship.set_name("Tags");
        assert_eq!(relationship.handle(), "tags");
    }

    #[test]
    fn test_ensure_handle() {
        let mut relationship = Relationship::new();
        relationship.set_name("");
        relationship.set_name("Ignored");
        relationship.set_handle("");
        relationship.ensure_handle();
        assert_eq!(relationship.handle(), "ignored");

        relationship.set_handle("Custom Handle");
        relationship.ensure_handle();
        assert_eq!(relationship.handle(), "custom-handle");
    }

    #[test]
    fn test_sections_normalized() {
        let mut relationship = Relationship::new();
        relationship.set_sections([7, 3, 0, -2, 7, 5]);
        let ids: Vec<i64> = relationship.sections().iter().map(|s| s.value()).collect();
        assert_eq!(ids, vec![7, 3, 5]);
    }

    #[test]
    fn test_single_section() {
        let mut relationship = Relationship::new();
        relationship.set_section(4);
        assert_eq!(relationship.sections().len(), 1);

        relationship.set_section(0);
        assert!(relationship.sections().is_empty());
    }

    #[test]
    fn test_sections_from_text() {
        let mut relationship = Relationship::new();
        relationship.set_sections_input("3, 7 abc -1,,9");
        let ids: Vec<i64> = relationship.sections().iter().map(|s| s.value()).collect();
        assert_eq!(ids, vec![3, 7, 9]);
    }

    #[test]
    fn test_count_input() {
        let mut relationship = Relationship::new();
        relationship.set_min_input(" 2 ");
        relationship.set_max_input("many");
        assert_eq!(relationship.min(), Some(2));
        assert_eq!(relationship.max(), None);

        relationship.set_max_input("-1");
        assert_eq!(relationship.max(), None);
    }

    #[test]
    fn test_labels() {
        let mut relationship = Relationship::new();
        assert_eq!(relationship.min_label(), "None");
        assert_eq!(relationship.max_label(), "Unlimited");

        relationship.set_min(1);
        relationship.set_max(4);
        assert_eq!(relationship.min_label(), "1");
        assert_eq!(relationship.max_label(), "4");
    }
}
