//! Entry link commands.

use super::parse_id;
use crate::cli::LinkAction;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use trellis_domain::traits::{EntryLinkStore, RelationshipStore};
use trellis_domain::{EntryId, LinkOutcome, RelationshipCache, RelationshipId};
use trellis_store::SqliteStore;

/// Execute an entry link action.
pub fn execute_link<C: RelationshipCache>(
    action: LinkAction,
    store: &mut SqliteStore<C>,
    formatter: &Formatter,
) -> Result<()> {
    match action {
        LinkAction::Add { relationship, a, b } => {
            let relationship = existing(&relationship, store)?;
            let (a, b): (EntryId, EntryId) = (parse_id(&a)?, parse_id(&b)?);

            match store.add_link(relationship, a, b)? {
                LinkOutcome::Created => {
                    println!("{}", formatter.success(&format!("Linked entries {} and {}", a, b)))
                }
                LinkOutcome::AlreadyLinked => {
                    println!("{}", formatter.info(&format!("Entries {} and {} are already linked", a, b)))
                }
            }
        }
        LinkAction::Clear { relationship, entry } => {
            let relationship = existing(&relationship, store)?;
            let entry: EntryId = parse_id(&entry)?;

            let removed = store.remove_all_links(relationship, entry)?;
            println!(
                "{}",
                formatter.success(&format!("Removed {} link(s) of entry {}", removed, entry))
            );
        }
        LinkAction::List { relationship, entry } => {
            let relationship = existing(&relationship, store)?;
            let entries = match entry {
                Some(entry) => store.get_entries_by_entry_id(relationship, parse_id(&entry)?)?,
                None => store.get_entries(relationship)?,
            };
            println!("{}", formatter.format_entries(&entries)?);
        }
    }

    Ok(())
}

/// Parse a relationship id and make sure the relationship exists.
fn existing<C: RelationshipCache>(value: &str, store: &SqliteStore<C>) -> Result<RelationshipId> {
    let id: RelationshipId = parse_id(value)?;
    match store.fetch_by_id(id)? {
        Some(_) => Ok(id),
        None => Err(CliError::NotFound(format!("relationship {}", id))),
    }
}
