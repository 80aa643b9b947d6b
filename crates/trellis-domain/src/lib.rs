//! Trellis Domain Layer
//!
//! This crate contains the data model for section relationships: named rules
//! that say which content sections may be linked, and how many links an entry
//! may carry. It has ZERO external dependencies and defines the value objects,
//! validation rules and trait interfaces that the storage and CLI layers build on.
//!
//! ## Key Concepts
//!
//! - **Relationship**: a named min/max constraint spanning two or more sections
//! - **Handle**: the URL-safe, unique slug of a relationship
//! - **Section**: a content type in the host system, referenced by id
//! - **Entry link**: an undirected pairing of two entries under a relationship
//!
//! ## Architecture
//!
//! - No external crate dependencies
//! - Pure business logic only
//! - Infrastructure implementations live in other crates
//! - Trait definitions for all persistence interactions

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cache;
pub mod handle;
pub mod ids;
pub mod link;
pub mod query;
pub mod relationship;
pub mod section;
pub mod traits;
pub mod validation;

// Re-exports for convenience
pub use cache::{IdentityCache, NoCache, RelationshipCache};
pub use handle::create_handle;
pub use ids::{EntryId, RelationshipId, SectionId};
pub use link::{linked_entries, EntryLink, LinkOutcome};
pub use query::{RelationshipQuery, SortColumn, SortOrder};
pub use relationship::Relationship;
pub use section::Section;
pub use validation::{Field, FieldError, ValidationReport};
