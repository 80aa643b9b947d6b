//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::{CliError, Result};
use colored::*;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};
use trellis_domain::{EntryId, Relationship, RelationshipId, Section, ValidationReport};

/// A relationship together with whatever of its sections the directory knows.
#[derive(Debug, Clone)]
pub struct RelationshipListing {
    /// The stored relationship
    pub relationship: Relationship,
    /// Resolved sections, in relationship order
    pub sections: Vec<Section>,
}

impl RelationshipListing {
    /// Name of each associated section, or `#id` when the directory has no entry for it.
    pub fn section_labels(&self) -> Vec<String> {
        self.relationship
            .sections()
            .iter()
            .map(|id| {
                self.sections
                    .iter()
                    .find(|section| section.id == *id)
                    .map(|section| section.name.clone())
                    .unwrap_or_else(|| format!("#{}", id))
            })
            .collect()
    }
}

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format relationships output.
    pub fn format_relationships(&self, listings: &[RelationshipListing]) -> Result<String> {
        match self.format {
            OutputFormat::Json => self.format_relationships_json(listings),
            OutputFormat::Table => self.format_relationships_table(listings),
            OutputFormat::Quiet => Ok(join_lines(
                listings.iter().filter_map(|listing| listing.relationship.id()),
            )),
        }
    }

    /// Format relationships as JSON.
    fn format_relationships_json(&self, listings: &[RelationshipListing]) -> Result<String> {
        let json: Vec<serde_json::Value> = listings
            .iter()
            .map(|listing| {
                let rel = &listing.relationship;
                let sections: Vec<serde_json::Value> = rel
                    .sections()
                    .iter()
                    .map(|id| {
                        let known = listing.sections.iter().find(|section| section.id == *id);
                        serde_json::json!({
                            "id": id.value(),
                            "name": known.map(|section| section.name.as_str()),
                            "handle": known.map(|section| section.handle.as_str()),
                        })
                    })
                    .collect();

                serde_json::json!({
                    "id": rel.id().map(|id| id.value()),
                    "name": rel.name(),
                    "handle": rel.handle(),
                    "min": rel.min(),
                    "max": rel.max(),
                    "sections": sections,
                })
            })
            .collect();

        Ok(serde_json::to_string_pretty(&json)?)
    }

    /// Format relationships as a table.
    fn format_relationships_table(&self, listings: &[RelationshipListing]) -> Result<String> {
        if listings.is_empty() {
            return Ok(self.colorize("No relationships found.", "yellow"));
        }

        let mut builder = Builder::default();
        builder.push_record(["ID", "Name", "Handle", "Sections", "Minimum", "Maximum"]);

        for listing in listings {
            let rel = &listing.relationship;
            builder.push_record([
                rel.id().map(|id| id.to_string()).unwrap_or_default(),
                rel.name().to_string(),
                rel.handle().to_string(),
                listing.section_labels().join(", "),
                rel.min_label(),
                rel.max_label(),
            ]);
        }

        Ok(render(builder))
    }

    /// Format linked entry ids.
    pub fn format_entries(&self, entries: &[EntryId]) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let ids: Vec<i64> = entries.iter().map(|entry| entry.value()).collect();
                Ok(serde_json::to_string_pretty(&ids)?)
            }
            OutputFormat::Quiet => Ok(join_lines(entries.iter())),
            OutputFormat::Table => {
                if entries.is_empty() {
                    return Ok(self.colorize("No linked entries.", "yellow"));
                }
                let mut builder = Builder::default();
                builder.push_record(["Entry"]);
                for entry in entries {
                    builder.push_record([entry.to_string()]);
                }
                Ok(render(builder))
            }
        }
    }

    /// Format the section directory.
    pub fn format_sections(&self, sections: &[Section]) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let json: Vec<serde_json::Value> = sections
                    .iter()
                    .map(|section| {
                        serde_json::json!({
                            "id": section.id.value(),
                            "name": section.name,
                            "handle": section.handle,
                        })
                    })
                    .collect();
                Ok(serde_json::to_string_pretty(&json)?)
            }
            OutputFormat::Quiet => Ok(join_lines(sections.iter().map(|section| section.id))),
            OutputFormat::Table => {
                if sections.is_empty() {
                    return Ok(self.colorize("No sections registered.", "yellow"));
                }
                let mut builder = Builder::default();
                builder.push_record(["ID", "Name", "Handle"]);
                for section in sections {
                    builder.push_record([section.id.to_string(), section.name.clone(), section.handle.clone()]);
                }
                Ok(render(builder))
            }
        }
    }

    /// Format every failing field of a validation report, one per line.
    pub fn validation_errors(&self, report: &ValidationReport) -> String {
        report
            .errors()
            .iter()
            .map(|error| self.error(&format!("{}: {}", error.field, error.message)))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Format a failed command for stderr.
    pub fn format_error(&self, error: &CliError) -> String {
        match error {
            CliError::Validation(report) => self.validation_errors(report),
            other => self.error(&format!("Error: {}", other)),
        }
    }

    /// Format a saved relationship result.
    pub fn relationship_saved(&self, id: RelationshipId, verb: &str) -> String {
        match self.format {
            OutputFormat::Quiet => id.to_string(),
            _ => self.success(&format!("Relationship {}: {}", verb, id)),
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}

fn render(builder: Builder) -> String {
    let mut table = builder.build();
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));
    table.to_string()
}

fn join_lines<T: ToString>(items: impl Iterator<Item = T>) -> String {
    items.map(|item| item.to_string()).collect::<Vec<_>>().join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use trellis_domain::SectionId;

    fn listing() -> RelationshipListing {
        let relationship = Relationship::from_parts(
            RelationshipId::from_value(7),
            "Related Articles".to_string(),
            "related-articles".to_string(),
            0,
            3,
            vec![SectionId::from_value(1), SectionId::from_value(9)],
        );
        RelationshipListing {
            relationship,
            sections: vec![Section::new(SectionId::from_value(1), "Articles", "articles")],
        }
    }

    #[test]
    fn test_table_format() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_relationships(&[listing()]).unwrap();
        assert!(output.contains("Minimum"));
        assert!(output.contains("related-articles"));
        assert!(output.contains("Articles, #9"));
        assert!(output.contains("None"));
    }

    #[test]
    fn test_json_format() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let output = formatter.format_relationships(&[listing()]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value[0]["id"], 7);
        assert_eq!(value[0]["max"], 3);
        assert_eq!(value[0]["sections"][0]["name"], "Articles");
        assert!(value[0]["sections"][1]["name"].is_null());
    }

    #[test]
    fn test_quiet_format() {
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        let output = formatter.format_relationships(&[listing()]).unwrap();
        assert_eq!(output, "7");
    }

    #[test]
    fn test_empty_relationships() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_relationships(&[]).unwrap();
        assert!(output.contains("No relationships found"));
    }

    #[test]
    fn test_entries_quiet() {
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        let entries = [EntryId::from_value(2), EntryId::from_value(5)];
        assert_eq!(formatter.format_entries(&entries).unwrap(), "2\n5");
    }

    #[test]
    fn test_error_output() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let output = formatter.format_error(&CliError::NotFound("relationship '9'".to_string()));
        assert_eq!(output, "✗ Error: Not found: relationship '9'");
    }

    #[test]
    fn test_colorize_disabled() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        assert_eq!(formatter.success("test"), "✓ test");
        assert_eq!(formatter.warning("test"), "⚠ test");
    }
}
