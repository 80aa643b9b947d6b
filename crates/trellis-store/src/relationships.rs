//! Relationship persistence

use crate::{placeholders, SqliteStore, StoreError};
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row, Transaction};
use trellis_domain::traits::RelationshipStore;
use trellis_domain::{
    Relationship, RelationshipCache, RelationshipId, RelationshipQuery, SectionId, SortColumn,
};

const SELECT_RELATIONSHIPS: &str = r#"SELECT id, name, handle, "min", "max" FROM relationships"#;

/// A relationship row before its sections are loaded
struct RelationshipRow {
    id: RelationshipId,
    name: String,
    handle: String,
    min: u32,
    max: u32,
}

impl RelationshipRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: RelationshipId::from_value(row.get(0)?),
            name: row.get(1)?,
            handle: row.get(2)?,
            min: row.get(3)?,
            max: row.get(4)?,
        })
    }
}

impl<C: RelationshipCache> SqliteStore<C> {
    /// Attach section ids to fetched rows and remember the results in the cache
    fn hydrate(&self, rows: Vec<RelationshipRow>) -> Result<Vec<Relationship>, StoreError> {
        let mut relationships = Vec::with_capacity(rows.len());

        for row in rows {
            let sections = load_sections(&self.conn, row.id)?;
            let relationship =
                Relationship::from_parts(row.id, row.name, row.handle, row.min, row.max, sections);
            self.cache.insert(&relationship);
            relationships.push(relationship);
        }

        Ok(relationships)
    }

    fn fetch_one(&self, sql: &str, value: &dyn rusqlite::ToSql) -> Result<Option<Relationship>, StoreError> {
        let row = self
            .conn
            .query_row(sql, [value], RelationshipRow::from_row)
            .optional()?;

        match row {
            Some(row) => Ok(self.hydrate(vec![row])?.pop()),
            None => Ok(None),
        }
    }
}

/// Section ids of a relationship, in the order they were written
fn load_sections(conn: &Connection, id: RelationshipId) -> Result<Vec<SectionId>, StoreError> {
    let mut stmt = conn.prepare_cached(
        "SELECT section_id FROM relationships_sections WHERE relationship_id = ?1 ORDER BY id",
    )?;

    let sections = stmt
        .query_map(params![id.value()], |row| row.get::<_, i64>(0))?
        .map(|section| section.map(SectionId::from_value))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(sections)
}

/// Overwrite the row and rewrite the section set, inside the caller's transaction
fn write_relationship(
    tx: &Transaction<'_>,
    id: RelationshipId,
    relationship: &Relationship,
) -> Result<(), StoreError> {
    let min = relationship
        .min()
        .ok_or_else(|| StoreError::InvalidData("minimum is not a number".to_string()))?;
    let max = relationship
        .max()
        .ok_or_else(|| StoreError::InvalidData("maximum is not a number".to_string()))?;

    let updated = tx.execute(
        r#"UPDATE relationships SET name = ?2, handle = ?3, "min" = ?4, "max" = ?5 WHERE id = ?1"#,
        params![id.value(), relationship.name(), relationship.handle(), min, max],
    )?;
    if updated == 0 {
        tx.execute(
            r#"INSERT INTO relationships (id, name, handle, "min", "max") VALUES (?1, ?2, ?3, ?4, ?5)"#,
            params![id.value(), relationship.name(), relationship.handle(), min, max],
        )?;
    }

    tx.execute(
        "DELETE FROM relationships_sections WHERE relationship_id = ?1",
        params![id.value()],
    )?;

    let mut insert = tx.prepare_cached(
        "INSERT INTO relationships_sections (relationship_id, section_id) VALUES (?1, ?2)",
    )?;
    for section in relationship.sections() {
        insert.execute(params![id.value(), section.value()])?;
    }

    Ok(())
}

impl<C: RelationshipCache> RelationshipStore for SqliteStore<C> {
    type Error = StoreError;

    fn add(&mut self, relationship: &mut Relationship) -> Result<RelationshipId, Self::Error> {
        if let Some(existing) = relationship.id() {
            tracing::warn!(id = %existing, "Ignoring id on new relationship; a fresh one is assigned");
        }

        let tx = self.conn.transaction()?;

        // Reserve the id first so the association rows have something to point at
        tx.execute(
            "INSERT INTO relationships (name, handle) VALUES (?1, ?2)",
            params![relationship.name(), relationship.handle()],
        )?;
        let id = RelationshipId::from_value(tx.last_insert_rowid());

        write_relationship(&tx, id, relationship)?;
        tx.commit()?;

        self.cache.invalidate(id);
        relationship.set_id(id);

        tracing::info!(
            id = %id,
            handle = relationship.handle(),
            sections = relationship.sections().len(),
            "Relationship added"
        );
        Ok(id)
    }

    fn edit(&mut self, relationship: &Relationship) -> Result<(), Self::Error> {
        let id = relationship.id().ok_or(StoreError::MissingId)?;

        let tx = self.conn.transaction()?;
        write_relationship(&tx, id, relationship)?;
        tx.commit()?;

        self.cache.invalidate(id);

        tracing::info!(
            id = %id,
            handle = relationship.handle(),
            sections = relationship.sections().len(),
            "Relationship saved"
        );
        Ok(())
    }

    fn delete(&mut self, id: RelationshipId) -> Result<bool, Self::Error> {
        let tx = self.conn.transaction()?;

        let links = tx.execute(
            "DELETE FROM relationships_entries WHERE relationship_id = ?1",
            params![id.value()],
        )?;
        tx.execute(
            "DELETE FROM relationships_sections WHERE relationship_id = ?1",
            params![id.value()],
        )?;
        let rows = tx.execute("DELETE FROM relationships WHERE id = ?1", params![id.value()])?;

        tx.commit()?;
        self.cache.invalidate(id);

        if rows > 0 {
            tracing::info!(id = %id, links, "Relationship deleted");
        } else {
            tracing::debug!(id = %id, "No relationship to delete");
        }
        Ok(rows > 0)
    }

    fn fetch(&self, query: &RelationshipQuery) -> Result<Vec<Relationship>, Self::Error> {
        let mut sql = String::from(SELECT_RELATIONSHIPS);
        let mut ids: Vec<i64> = Vec::new();

        if let Some(filter) = &query.ids {
            if filter.is_empty() {
                return Ok(Vec::new());
            }
            ids = filter.iter().map(|id| id.value()).collect();
            sql.push_str(&format!(" WHERE id IN ({})", placeholders(ids.len())));
        }

        let column = match query.sort_column {
            SortColumn::Id => "id",
            SortColumn::Name => "name COLLATE NOCASE",
            SortColumn::Handle => "handle",
        };
        let order = query.sort_order.as_str();
        sql.push_str(&format!(" ORDER BY {column} {order}, id {order}"));

        tracing::debug!(sql = %sql, "Fetching relationships");

        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt
            .query_map(params_from_iter(ids.iter()), RelationshipRow::from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        self.hydrate(rows)
    }

    fn fetch_by_id(&self, id: RelationshipId) -> Result<Option<Relationship>, Self::Error> {
        if let Some(cached) = self.cache.get(id) {
            tracing::debug!(id = %id, "Relationship served from cache");
            return Ok(Some(cached));
        }

        let sql = format!("{SELECT_RELATIONSHIPS} WHERE id = ?1");
        self.fetch_one(&sql, &id.value())
    }

    fn fetch_by_handle(&self, handle: &str) -> Result<Option<Relationship>, Self::Error> {
        let sql = format!("{SELECT_RELATIONSHIPS} WHERE handle = ?1");
        self.fetch_one(&sql, &handle)
    }

    fn fetch_by_section_id(&self, section: SectionId) -> Result<Vec<Relationship>, Self::Error> {
        let mut stmt = self.conn.prepare(
            r#"SELECT r.id, r.name, r.handle, r."min", r."max"
               FROM relationships AS r
               JOIN relationships_sections AS rs ON rs.relationship_id = r.id
               WHERE rs.section_id = ?1
               ORDER BY r.name COLLATE NOCASE, r.id"#,
        )?;

        let rows = stmt
            .query_map(params![section.value()], RelationshipRow::from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        self.hydrate(rows)
    }
}
