//! Local section directory
//!
//! Relationships only store section ids. The host system owns the sections
//! themselves; this table mirrors the names and handles needed for display.

use crate::{placeholders, SqliteStore, StoreError};
use rusqlite::{params, params_from_iter, Row};
use std::collections::HashMap;
use trellis_domain::traits::SectionDirectory;
use trellis_domain::{RelationshipCache, Section, SectionId};

fn section_from_row(row: &Row<'_>) -> rusqlite::Result<Section> {
    Ok(Section::new(SectionId::from_value(row.get(0)?), row.get::<_, String>(1)?, row.get::<_, String>(2)?))
}

impl<C: RelationshipCache> SqliteStore<C> {
    /// Add or update a section in the directory
    pub fn register_section(&mut self, section: &Section) -> Result<(), StoreError> {
        self.conn.execute(
            "INSERT INTO sections (id, name, handle) VALUES (?1, ?2, ?3)
             ON CONFLICT(id) DO UPDATE SET name = excluded.name, handle = excluded.handle",
            params![section.id.value(), section.name, section.handle],
        )?;

        tracing::info!(id = %section.id, handle = %section.handle, "Section registered");
        Ok(())
    }

    /// Every section in the directory, by name
    pub fn list_sections(&self) -> Result<Vec<Section>, StoreError> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, handle FROM sections ORDER BY name COLLATE NOCASE, id")?;

        let sections = stmt
            .query_map([], section_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(sections)
    }
}

impl<C: RelationshipCache> SectionDirectory for SqliteStore<C> {
    type Error = StoreError;

    fn fetch_sections(&self, ids: &[SectionId]) -> Result<Vec<Section>, Self::Error> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let sql = format!(
            "SELECT id, name, handle FROM sections WHERE id IN ({})",
            placeholders(ids.len())
        );
        let mut stmt = self.conn.prepare(&sql)?;

        let mut found: HashMap<SectionId, Section> = stmt
            .query_map(params_from_iter(ids.iter().map(|id| id.value())), section_from_row)?
            .map(|section| section.map(|s| (s.id, s)))
            .collect::<Result<_, _>>()?;

        Ok(ids.iter().filter_map(|id| found.remove(id)).collect())
    }
}
