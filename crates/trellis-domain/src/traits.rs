//! Trait definitions for external interactions
//!
//! These traits define the boundaries between domain logic and infrastructure.
//! Infrastructure implementations live in other crates.

use crate::{EntryId, LinkOutcome, Relationship, RelationshipId, RelationshipQuery, Section, SectionId};

/// Trait for storing and retrieving relationships
///
/// Implemented by the infrastructure layer (trellis-store)
pub trait RelationshipStore {
    /// Error type for store operations
    type Error;

    /// Create a new, unsaved relationship
    fn create(&self) -> Relationship {
        Relationship::new()
    }

    /// Persist a new relationship, assigning it a fresh id
    ///
    /// Any id already on the record is replaced.
    fn add(&mut self, relationship: &mut Relationship) -> Result<RelationshipId, Self::Error>;

    /// Overwrite a relationship and its section associations as one unit
    ///
    /// A row that does not exist yet is created under the record's id.
    fn edit(&mut self, relationship: &Relationship) -> Result<(), Self::Error>;

    /// Delete a relationship, its section associations and its entry links
    ///
    /// Returns whether a relationship with that id existed.
    fn delete(&mut self, id: RelationshipId) -> Result<bool, Self::Error>;

    /// List relationships
    fn fetch(&self, query: &RelationshipQuery) -> Result<Vec<Relationship>, Self::Error>;

    /// Get a relationship by id
    fn fetch_by_id(&self, id: RelationshipId) -> Result<Option<Relationship>, Self::Error>;

    /// Get a relationship by handle
    fn fetch_by_handle(&self, handle: &str) -> Result<Option<Relationship>, Self::Error>;

    /// Get every relationship that includes the section
    fn fetch_by_section_id(&self, section: SectionId) -> Result<Vec<Relationship>, Self::Error>;
}

/// Trait for storing links between entries
///
/// Implemented by the infrastructure layer (trellis-store)
pub trait EntryLinkStore {
    /// Error type for store operations
    type Error;

    /// Link two entries; linking an already linked pair is a no-op
    fn add_link(
        &mut self,
        relationship: RelationshipId,
        a: EntryId,
        b: EntryId,
    ) -> Result<LinkOutcome, Self::Error>;

    /// Remove every link of the relationship that involves the entry
    ///
    /// Returns the number of links removed.
    fn remove_all_links(&mut self, relationship: RelationshipId, entry: EntryId) -> Result<usize, Self::Error>;

    /// Every entry that appears in a link of the relationship
    fn get_entries(&self, relationship: RelationshipId) -> Result<Vec<EntryId>, Self::Error>;

    /// Entries linked to the given entry under the relationship
    fn get_entries_by_entry_id(
        &self,
        relationship: RelationshipId,
        entry: EntryId,
    ) -> Result<Vec<EntryId>, Self::Error>;
}

/// Trait for looking up sections in the host system
pub trait SectionDirectory {
    /// Error type for lookups
    type Error;

    /// Fetch sections by id, in the order given, skipping ids that are unknown
    fn fetch_sections(&self, ids: &[SectionId]) -> Result<Vec<Section>, Self::Error>;
}
