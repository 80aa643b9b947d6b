//! Entry links
//!
//! Links are undirected. The lower entry id is always stored on the left so
//! that linking A to B and B to A name the same row.

use crate::ids::{EntryId, RelationshipId};

/// An undirected pairing of two entries under a relationship
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntryLink {
    /// Relationship the link belongs to
    pub relationship_id: RelationshipId,

    /// Lower of the two entry ids
    pub left: EntryId,

    /// Higher of the two entry ids
    pub right: EntryId,
}

impl EntryLink {
    /// Create a link in canonical order
    pub fn new(relationship_id: RelationshipId, a: EntryId, b: EntryId) -> Self {
        Self {
            relationship_id,
            left: a.min(b),
            right: a.max(b),
        }
    }

    /// Whether the entry is either end of the link
    pub fn involves(&self, entry: EntryId) -> bool {
        self.left == entry || self.right == entry
    }

    /// The entry at the opposite end from `entry`, if it is an end at all
    pub fn other_side(&self, entry: EntryId) -> Option<EntryId> {
        if self.left == entry {
            Some(self.right)
        } else if self.right == entry {
            Some(self.left)
        } else {
            None
        }
    }
}

/// Entries on the far side of every link that involves `entry`
///
/// Links not involving the entry are skipped. The result is sorted and free of
/// duplicates; a self-link yields the entry itself.
pub fn linked_entries<I>(links: I, entry: EntryId) -> Vec<EntryId>
where
    I: IntoIterator<Item = EntryLink>,
{
    let mut entries: Vec<EntryId> = links
        .into_iter()
        .filter(|link| link.involves(entry))
        .filter_map(|link| link.other_side(entry))
        .collect();
    entries.sort();
    entries.dedup();
    entries
}

/// What adding a link did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkOutcome {
    /// A new row was written
    Created,

    /// The link was already present; nothing changed
    AlreadyLinked,
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn entry(id: i64) -> EntryId {
        EntryId::from_value(id)
    }

    #[test]
    fn test_other_side() {
        let link = EntryLink::new(RelationshipId::from_value(1), entry(10), entry(4));
        assert_eq!(link.left, entry(4));
        assert_eq!(link.other_side(entry(4)), Some(entry(10)));
        assert_eq!(link.other_side(entry(10)), Some(entry(4)));
        assert_eq!(link.other_side(entry(5)), None);
        assert!(link.involves(entry(10)));
        assert!(!link.involves(entry(5)));
    }

    #[test]
    fn test_linked_entries() {
        let relationship = RelationshipId::from_value(1);
        let links = vec![
            EntryLink::new(relationship, entry(9), entry(2)),
            EntryLink::new(relationship, entry(2), entry(5)),
            EntryLink::new(relationship, entry(5), entry(7)),
            EntryLink::new(relationship, entry(2), entry(2)),
        ];

        assert_eq!(linked_entries(links.clone(), entry(2)), vec![entry(2), entry(5), entry(9)]);
        assert_eq!(linked_entries(links.clone(), entry(7)), vec![entry(5)]);
        assert!(linked_entries(links, entry(4)).is_empty());
    }

    proptest! {
        #[test]
        fn prop_link_is_order_independent(a in 1i64..10_000, b in 1i64..10_000) {
            let relationship = RelationshipId::from_value(3);
            let forward = EntryLink::new(relationship, entry(a), entry(b));
            let backward = EntryLink::new(relationship, entry(b), entry(a));
            prop_assert_eq!(forward, backward);
            prop_assert!(forward.left <= forward.right);
        }
    }
}
