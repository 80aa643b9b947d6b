//! Entry link persistence

use crate::{SqliteStore, StoreError};
use rusqlite::params;
use trellis_domain::traits::EntryLinkStore;
use trellis_domain::{linked_entries, EntryId, EntryLink, LinkOutcome, RelationshipCache, RelationshipId};

impl<C: RelationshipCache> SqliteStore<C> {
    fn collect_entries(&self, sql: &str, relationship: RelationshipId) -> Result<Vec<EntryId>, StoreError> {
        let mut stmt = self.conn.prepare_cached(sql)?;

        let entries = stmt
            .query_map(params![relationship.value()], |row| row.get::<_, i64>(0))?
            .map(|id| id.map(EntryId::from_value))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(entries)
    }
}

impl<C: RelationshipCache> EntryLinkStore for SqliteStore<C> {
    type Error = StoreError;

    fn add_link(
        &mut self,
        relationship: RelationshipId,
        a: EntryId,
        b: EntryId,
    ) -> Result<LinkOutcome, Self::Error> {
        let link = EntryLink::new(relationship, a, b);

        // The unique key makes the existence check and the insert one statement
        let inserted = self.conn.execute(
            "INSERT INTO relationships_entries (relationship_id, left_entry_id, right_entry_id)
             VALUES (?1, ?2, ?3)
             ON CONFLICT(relationship_id, left_entry_id, right_entry_id) DO NOTHING",
            params![link.relationship_id.value(), link.left.value(), link.right.value()],
        )?;

        if inserted == 0 {
            tracing::debug!(relationship = %relationship, left = %link.left, right = %link.right, "Entries already linked");
            return Ok(LinkOutcome::AlreadyLinked);
        }

        tracing::info!(relationship = %relationship, left = %link.left, right = %link.right, "Entries linked");
        Ok(LinkOutcome::Created)
    }

    fn remove_all_links(&mut self, relationship: RelationshipId, entry: EntryId) -> Result<usize, Self::Error> {
        let removed = self.conn.execute(
            "DELETE FROM relationships_entries
             WHERE relationship_id = ?1
               AND (left_entry_id = ?2 OR right_entry_id = ?2)",
            params![relationship.value(), entry.value()],
        )?;

        tracing::info!(relationship = %relationship, entry = %entry, removed, "Entry links removed");
        Ok(removed)
    }

    fn get_entries(&self, relationship: RelationshipId) -> Result<Vec<EntryId>, Self::Error> {
        self.collect_entries(
            "SELECT left_entry_id FROM relationships_entries WHERE relationship_id = ?1
             UNION
             SELECT right_entry_id FROM relationships_entries WHERE relationship_id = ?1
             ORDER BY 1",
            relationship,
        )
    }

    fn get_entries_by_entry_id(
        &self,
        relationship: RelationshipId,
        entry: EntryId,
    ) -> Result<Vec<EntryId>, Self::Error> {
        let mut stmt = self.conn.prepare_cached(
            "SELECT left_entry_id, right_entry_id
             FROM relationships_entries
             WHERE relationship_id = ?1
               AND (left_entry_id = ?2 OR right_entry_id = ?2)",
        )?;

        let links = stmt
            .query_map(params![relationship.value(), entry.value()], |row| {
                Ok(EntryLink::new(
                    relationship,
                    EntryId::from_value(row.get(0)?),
                    EntryId::from_value(row.get(1)?),
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(linked_entries(links, entry))
    }
}
