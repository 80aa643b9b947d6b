//! Identifier newtypes
//!
//! Every identifier in the model is a positive 64-bit integer assigned by
//! storage (relationships) or by the host system (sections and entries).
//! Wrapping them keeps a section id from being passed where an entry id is
//! expected.

use std::fmt;
use std::str::FromStr;

macro_rules! positive_id {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(i64);

        impl $name {
            /// Create an identifier, rejecting zero and negative values
            pub fn new(value: i64) -> Option<Self> {
                (value > 0).then_some(Self(value))
            }

            /// Wrap a raw value read back from storage
            ///
            /// Storage rows are trusted; callers handling user input should use [`Self::new`].
            pub fn from_value(value: i64) -> Self {
                Self(value)
            }

            /// Get the raw value
            pub fn value(&self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let value: i64 = s
                    .trim()
                    .parse()
                    .map_err(|e| format!("Invalid {} '{}': {}", $label, s, e))?;
                Self::new(value).ok_or_else(|| format!("{} must be positive, got {}", $label, value))
            }
        }
    };
}

positive_id!(
    /// Identifier of a relationship, assigned by the store on creation
    RelationshipId,
    "relationship id"
);

positive_id!(
    /// Identifier of a section in the host system
    SectionId,
    "section id"
);

positive_id!(
    /// Identifier of a content entry in the host system
    EntryId,
    "entry id"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_non_positive() {
        assert!(SectionId::new(0).is_none());
        assert!(SectionId::new(-4).is_none());
        assert_eq!(SectionId::new(3).map(|s| s.value()), Some(3));
    }

    #[test]
    fn test_parse() {
        let id: EntryId = " 42 ".parse().unwrap();
        assert_eq!(id.value(), 42);
        assert!("abc".parse::<EntryId>().is_err());
        assert!("0".parse::<RelationshipId>().is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(RelationshipId::from_value(7).to_string(), "7");
    }
}
