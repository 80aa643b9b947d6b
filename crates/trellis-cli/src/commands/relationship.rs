//! Relationship commands.

use super::parse_id;
use crate::cli::{CreateArgs, EditArgs, ListArgs, RelationshipAction};
use crate::error::{CliError, Result};
use crate::output::{Formatter, RelationshipListing};
use std::io::{self, Write};
use trellis_domain::traits::RelationshipStore;
use trellis_domain::{
    Relationship, RelationshipCache, RelationshipId, RelationshipQuery, SectionId, SortColumn, SortOrder,
};
use trellis_store::SqliteStore;

/// Execute a relationship action.
pub fn execute_relationship<C: RelationshipCache>(
    action: RelationshipAction,
    store: &mut SqliteStore<C>,
    formatter: &Formatter,
) -> Result<()> {
    match action {
        RelationshipAction::List(args) => {
            let relationships = list(&args, store)?;
            let listings = with_sections(relationships, store)?;
            println!("{}", formatter.format_relationships(&listings)?);
        }
        RelationshipAction::Show { relationship } => {
            let found = resolve(&relationship, store)?;
            let listings = with_sections(vec![found], store)?;
            println!("{}", formatter.format_relationships(&listings)?);
        }
        RelationshipAction::Create(args) => {
            let id = create(args, store)?;
            println!("{}", formatter.relationship_saved(id, "created"));
        }
        RelationshipAction::Edit(args) => {
            let id = edit(args, store)?;
            println!("{}", formatter.relationship_saved(id, "saved"));
        }
        RelationshipAction::Delete { ids, yes } => {
            let ids = ids
                .iter()
                .map(|id| parse_id::<RelationshipId>(id))
                .collect::<Result<Vec<_>>>()?;

            // Confirm deletion unless --yes is specified
            if !yes {
                println!("About to delete {} relationship(s) and all of their entry links:", ids.len());
                for id in &ids {
                    println!("  - {}", id);
                }
                print!("Continue? [y/N] ");
                io::stdout().flush()?;

                let mut response = String::new();
                io::stdin().read_line(&mut response)?;

                if !response.trim().eq_ignore_ascii_case("y") {
                    println!("{}", formatter.info("Operation cancelled"));
                    return Ok(());
                }
            }

            let deleted = delete(&ids, store)?;
            if deleted == ids.len() {
                println!("{}", formatter.success(&format!("Deleted {} relationship(s)", deleted)));
            } else {
                println!(
                    "{}",
                    formatter.warning(&format!(
                        "Deleted {} of {} relationship(s); the rest did not exist",
                        deleted,
                        ids.len()
                    ))
                );
            }
        }
    }

    Ok(())
}

fn list<C: RelationshipCache>(args: &ListArgs, store: &SqliteStore<C>) -> Result<Vec<Relationship>> {
    if let Some(section) = &args.section {
        let section: SectionId = parse_id(section)?;
        return Ok(store.fetch_by_section_id(section)?);
    }

    let mut query = RelationshipQuery::all().sorted(
        SortColumn::parse_or_default(&args.sort),
        SortOrder::parse_or_default(&args.order),
    );
    if let Some(ids) = &args.ids {
        let ids = ids
            .iter()
            .map(|id| parse_id::<RelationshipId>(id))
            .collect::<Result<Vec<_>>>()?;
        query = query.with_ids(ids);
    }

    Ok(store.fetch(&query)?)
}

/// Look a relationship up by id, then by handle.
///
/// Numeric handles are valid, so a number that matches no id is retried as a handle.
fn resolve<C: RelationshipCache>(key: &str, store: &SqliteStore<C>) -> Result<Relationship> {
    let key_trimmed = key.trim();
    let by_id = match key_trimmed.parse::<i64>().ok().and_then(RelationshipId::new) {
        Some(id) => store.fetch_by_id(id)?,
        None => None,
    };

    let found = match by_id {
        Some(relationship) => Some(relationship),
        None => store.fetch_by_handle(key_trimmed)?,
    };

    found.ok_or_else(|| CliError::NotFound(format!("relationship '{}'", key)))
}

fn with_sections<C: RelationshipCache>(
    relationships: Vec<Relationship>,
    store: &SqliteStore<C>,
) -> Result<Vec<RelationshipListing>> {
    relationships
        .into_iter()
        .map(|relationship| -> Result<RelationshipListing> {
            let sections = relationship.fetch_sections(store)?;
            Ok(RelationshipListing { relationship, sections })
        })
        .collect()
}

/// Normalize the handle and run every save check; nothing is written on failure.
fn check<C: RelationshipCache>(relationship: &mut Relationship, store: &SqliteStore<C>) -> Result<()> {
    relationship.ensure_handle();

    let report = relationship.validate_all(store)?;
    if !report.is_valid() {
        tracing::debug!(errors = report.errors().len(), "Relationship rejected");
        return Err(CliError::Validation(report));
    }
    Ok(())
}

fn create<C: RelationshipCache>(args: CreateArgs, store: &mut SqliteStore<C>) -> Result<RelationshipId> {
    let mut relationship = store.create();
    relationship.set_name(args.name);
    if let Some(handle) = &args.handle {
        relationship.set_handle(handle);
    }
    relationship.set_min_input(&args.min);
    relationship.set_max_input(&args.max);
    relationship.set_sections_input(&args.sections);

    check(&mut relationship, store)?;
    Ok(store.add(&mut relationship)?)
}

fn edit<C: RelationshipCache>(args: EditArgs, store: &mut SqliteStore<C>) -> Result<RelationshipId> {
    let id: RelationshipId = parse_id(&args.id)?;
    let mut relationship = store
        .fetch_by_id(id)?
        .ok_or_else(|| CliError::NotFound(format!("relationship {}", id)))?;

    if let Some(name) = args.name {
        relationship.set_name(name);
    }
    if let Some(handle) = &args.handle {
        relationship.set_handle(handle);
    }
    if let Some(min) = &args.min {
        relationship.set_min_input(min);
    }
    if let Some(max) = &args.max {
        relationship.set_max_input(max);
    }
    if let Some(sections) = &args.sections {
        relationship.set_sections_input(sections);
    }

    check(&mut relationship, store)?;
    store.edit(&relationship)?;
    Ok(id)
}

/// Delete each id, returning how many existed.
fn delete<C: RelationshipCache>(ids: &[RelationshipId], store: &mut SqliteStore<C>) -> Result<usize> {
    let mut deleted = 0;
    for id in ids {
        if store.delete(*id)? {
            deleted += 1;
        }
    }
    Ok(deleted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use trellis_domain::Field;

    fn store() -> SqliteStore {
        SqliteStore::new(":memory:").unwrap()
    }

    fn create_args(name: &str, sections: &str) -> CreateArgs {
        CreateArgs {
            name: name.to_string(),
            handle: None,
            min: "0".to_string(),
            max: "0".to_string(),
            sections: sections.to_string(),
        }
    }

    fn edit_args(id: RelationshipId) -> EditArgs {
        EditArgs {
            id: id.to_string(),
            name: None,
            handle: None,
            min: None,
            max: None,
            sections: None,
        }
    }

    #[test]
    fn test_create_derives_handle() {
        let mut store = store();
        let id = create(create_args("Related Articles", "1, 2"), &mut store).unwrap();

        let saved = store.fetch_by_id(id).unwrap().unwrap();
        assert_eq!(saved.handle(), "related-articles");
        assert_eq!(saved.sections().len(), 2);
    }

    #[test]
    fn test_create_reports_every_failure() {
        let mut store = store();
        let mut args = create_args("", "1");
        args.min = "lots".to_string();

        let err = create(args, &mut store).unwrap_err();
        match err {
            CliError::Validation(report) => {
                assert!(report.message_for(Field::Name).is_some());
                assert!(report.message_for(Field::Handle).is_some());
                assert!(report.message_for(Field::Min).is_some());
                assert!(report.message_for(Field::Sections).is_some());
                assert!(report.message_for(Field::Max).is_none());
            }
            other => panic!("Expected validation error, got {:?}", other),
        }
        assert!(store.fetch(&RelationshipQuery::all()).unwrap().is_empty());
    }

    #[test]
    fn test_create_rejects_duplicate_handle() {
        let mut store = store();
        create(create_args("Authors", "1,2"), &mut store).unwrap();

        let err = create(create_args("authors", "3,4"), &mut store).unwrap_err();
        match err {
            CliError::Validation(report) => {
                assert_eq!(
                    report.message_for(Field::Handle),
                    Some("A relationship with the handle 'authors' already exists")
                );
            }
            other => panic!("Expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_edit_keeps_own_handle() {
        let mut store = store();
        let id = create(create_args("Authors", "1,2"), &mut store).unwrap();

        let mut args = edit_args(id);
        args.max = Some("4".to_string());
        edit(args, &mut store).unwrap();

        let saved = store.fetch_by_id(id).unwrap().unwrap();
        assert_eq!(saved.max(), Some(4));
        assert_eq!(saved.handle(), "authors");
    }

    #[test]
    fn test_edit_missing_relationship() {
        let mut store = store();
        let err = edit(edit_args(RelationshipId::from_value(42)), &mut store).unwrap_err();
        assert!(matches!(err, CliError::NotFound(_)));
    }

    #[test]
    fn test_resolve_by_id_or_handle() {
        let mut store = store();
        let id = create(create_args("Tags", "1,2"), &mut store).unwrap();

        assert_eq!(resolve(&id.to_string(), &store).unwrap().id(), Some(id));
        assert_eq!(resolve("tags", &store).unwrap().id(), Some(id));
        assert!(matches!(resolve("missing", &store), Err(CliError::NotFound(_))));
        assert!(matches!(resolve("0", &store), Err(CliError::NotFound(_))));
    }

    #[test]
    fn test_resolve_numeric_handle() {
        let mut store = store();
        let id = create(create_args("2024", "1,2"), &mut store).unwrap();
        assert_eq!(id.value(), 1);

        let found = resolve("2024", &store).unwrap();
        assert_eq!(found.id(), Some(id));
        assert_eq!(found.handle(), "2024");

        // An id match wins over a handle match
        assert_eq!(resolve("1", &store).unwrap().id(), Some(id));
    }

    #[test]
    fn test_list_by_section_and_ids() {
        let mut store = store();
        let a = create(create_args("Beta", "1,2"), &mut store).unwrap();
        let b = create(create_args("Alpha", "2,3"), &mut store).unwrap();

        let by_section = ListArgs {
            sort: "name".to_string(),
            order: "asc".to_string(),
            ids: None,
            section: Some("1".to_string()),
        };
        let found = list(&by_section, &store).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id(), Some(a));

        let by_ids = ListArgs {
            sort: "bogus".to_string(),
            order: "desc".to_string(),
            ids: Some(vec![a.to_string(), b.to_string()]),
            section: None,
        };
        let names: Vec<String> = list(&by_ids, &store)
            .unwrap()
            .iter()
            .map(|r| r.name().to_string())
            .collect();
        assert_eq!(names, vec!["Beta", "Alpha"]);
    }

    #[test]
    fn test_delete_counts_existing() {
        let mut store = store();
        let id = create(create_args("Tags", "1,2"), &mut store).unwrap();

        let deleted = delete(&[id, RelationshipId::from_value(99)], &mut store).unwrap();
        assert_eq!(deleted, 1);
        assert!(store.fetch_by_id(id).unwrap().is_none());
    }
}
