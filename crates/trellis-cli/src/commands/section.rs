//! Section directory commands.

use super::parse_id;
use crate::cli::SectionAction;
use crate::error::Result;
use crate::output::Formatter;
use trellis_domain::{create_handle, RelationshipCache, Section, SectionId};
use trellis_store::SqliteStore;

/// Execute a section directory action.
pub fn execute_section<C: RelationshipCache>(
    action: SectionAction,
    store: &mut SqliteStore<C>,
    formatter: &Formatter,
) -> Result<()> {
    match action {
        SectionAction::Add { id, name, handle } => {
            let id: SectionId = parse_id(&id)?;
            let handle = create_handle(handle.as_deref().unwrap_or(&name));
            let section = Section::new(id, name, handle);

            store.register_section(&section)?;
            println!("{}", formatter.success(&format!("Section {} registered as '{}'", id, section.handle)));
        }
        SectionAction::List => {
            let sections = store.list_sections()?;
            println!("{}", formatter.format_sections(&sections)?);
        }
    }

    Ok(())
}
