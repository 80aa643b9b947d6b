//! Field validation for relationships
//!
//! Validation runs one field at a time. [`Relationship::validate_all`] checks
//! every field a save depends on and collects all failures, so an editor sees
//! every problem with their input at once. A failed check is a normal result,
//! never an error: the `Err` side only carries store failures from the handle
//! uniqueness lookup.

use crate::relationship::Relationship;
use crate::traits::RelationshipStore;
use std::fmt;

/// Fewest sections a relationship may span
pub const MIN_SECTIONS: usize = 2;

/// A validated relationship field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// Store-assigned id (required when editing)
    Id,
    /// Display name
    Name,
    /// Unique handle
    Handle,
    /// Minimum link count
    Min,
    /// Maximum link count
    Max,
    /// Associated sections
    Sections,
}

impl Field {
    /// Fields checked before a relationship is saved
    pub const SAVE: [Field; 5] = [Field::Name, Field::Handle, Field::Min, Field::Max, Field::Sections];

    /// Field name as used in input forms
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Id => "id",
            Field::Name => "name",
            Field::Handle => "handle",
            Field::Min => "min",
            Field::Max => "max",
            Field::Sections => "sections",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A failed field with the message to show for it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Failing field
    pub field: Field,

    /// Human-readable explanation
    pub message: String,
}

/// Every failing field of a relationship
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    errors: Vec<FieldError>,
}

impl ValidationReport {
    /// Whether every checked field passed
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Failures in the order the fields were checked
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// Message for a failing field, if it failed
    pub fn message_for(&self, field: Field) -> Option<&str> {
        self.errors
            .iter()
            .find(|error| error.field == field)
            .map(|error| error.message.as_str())
    }

    fn push(&mut self, field: Field, message: String) {
        self.errors.push(FieldError { field, message });
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .errors
            .iter()
            .map(|error| format!("{}: {}", error.field, error.message))
            .collect();
        f.write_str(&parts.join("; "))
    }
}

impl Relationship {
    /// Check a single field
    ///
    /// The handle check asks the store who owns the handle. It passes when
    /// nobody does, or when the owner is this record (same id). A record that
    /// has not been saved yet never matches an existing owner.
    pub fn validate<S: RelationshipStore>(&self, field: Field, store: &S) -> Result<bool, S::Error> {
        let valid = match field {
            Field::Id => self.id().is_some(),
            Field::Min => self.min().is_some(),
            Field::Max => self.max().is_some(),
            Field::Name => !self.name().trim().is_empty(),
            Field::Handle => {
                if self.handle().trim().is_empty() {
                    return Ok(false);
                }
                match store.fetch_by_handle(self.handle())? {
                    None => true,
                    Some(existing) => self.id().is_some() && existing.id() == self.id(),
                }
            }
            Field::Sections => self.sections().len() >= MIN_SECTIONS,
        };
        Ok(valid)
    }

    /// Check every field needed to save, collecting all failures
    pub fn validate_all<S: RelationshipStore>(&self, store: &S) -> Result<ValidationReport, S::Error> {
        let mut report = ValidationReport::default();

        for field in Field::SAVE {
            if !self.validate(field, store)? {
                report.push(field, self.failure_message(field));
            }
        }

        Ok(report)
    }

    fn failure_message(&self, field: Field) -> String {
        match field {
            Field::Handle if !self.handle().trim().is_empty() => {
                format!("A relationship with the handle '{}' already exists", self.handle())
            }
            Field::Id | Field::Name | Field::Handle => "This is a required field.".to_string(),
            Field::Min => "This is a required field. Set to '0' for no minimum.".to_string(),
            Field::Max => "This is a required field. Set to '0' for no maximum.".to_string(),
            Field::Sections => "A minimum of two sections are required.".to_string(),
        }
    }
}
