//! CLI command definitions and argument parsing.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Trellis CLI - Manage relationships between content sections and link their entries.
#[derive(Debug, Parser)]
#[command(name = "trellis")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Database file (overrides the configured one)
    #[arg(short, long, global = true, env = "TRELLIS_DATABASE")]
    pub database: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (IDs only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage relationships
    #[command(subcommand, alias = "rel")]
    Relationship(RelationshipAction),

    /// Manage entry links of a relationship
    #[command(subcommand)]
    Link(LinkAction),

    /// Manage the local section directory
    #[command(subcommand)]
    Section(SectionAction),

    /// Show or initialize the configuration file
    #[command(subcommand)]
    Config(ConfigAction),
}

/// Relationship actions.
#[derive(Debug, Subcommand)]
pub enum RelationshipAction {
    /// List relationships
    List(ListArgs),

    /// Show one relationship with its sections
    Show {
        /// Relationship id or handle
        relationship: String,
    },

    /// Create a relationship
    Create(CreateArgs),

    /// Edit an existing relationship
    Edit(EditArgs),

    /// Delete relationships together with their entry links
    Delete {
        /// Relationship ids
        #[arg(required = true)]
        ids: Vec<String>,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

/// Arguments for listing relationships.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Sort column (id, name, handle); unknown values sort by name
    #[arg(long, default_value = "name")]
    pub sort: String,

    /// Sort order (asc, desc); unknown values sort ascending
    #[arg(long, default_value = "asc")]
    pub order: String,

    /// Only these relationship ids (comma separated)
    #[arg(long, value_delimiter = ',')]
    pub ids: Option<Vec<String>>,

    /// Only relationships spanning this section
    #[arg(long, conflicts_with = "ids")]
    pub section: Option<String>,
}

/// Arguments for creating a relationship.
#[derive(Debug, Args)]
pub struct CreateArgs {
    /// Display name
    #[arg(short, long)]
    pub name: String,

    /// Handle; derived from the name when omitted
    #[arg(long)]
    pub handle: Option<String>,

    /// Minimum links per entry (0 for no minimum)
    #[arg(long, default_value = "0")]
    pub min: String,

    /// Maximum links per entry (0 for no maximum)
    #[arg(long, default_value = "0")]
    pub max: String,

    /// Section ids (comma or space separated)
    #[arg(short, long, default_value = "")]
    pub sections: String,
}

/// Arguments for editing a relationship. Omitted fields keep their value.
#[derive(Debug, Args)]
pub struct EditArgs {
    /// Relationship id
    pub id: String,

    /// New display name
    #[arg(short, long)]
    pub name: Option<String>,

    /// New handle
    #[arg(long)]
    pub handle: Option<String>,

    /// New minimum
    #[arg(long)]
    pub min: Option<String>,

    /// New maximum
    #[arg(long)]
    pub max: Option<String>,

    /// New section ids, replacing the current set
    #[arg(short, long)]
    pub sections: Option<String>,
}

/// Entry link actions.
#[derive(Debug, Subcommand)]
pub enum LinkAction {
    /// Link two entries under a relationship
    Add {
        /// Relationship id
        relationship: String,
        /// First entry id
        a: String,
        /// Second entry id
        b: String,
    },

    /// Remove every link of an entry under a relationship
    Clear {
        /// Relationship id
        relationship: String,
        /// Entry id
        entry: String,
    },

    /// List linked entries of a relationship
    List {
        /// Relationship id
        relationship: String,

        /// Only entries linked to this entry
        #[arg(short, long)]
        entry: Option<String>,
    },
}

/// Section directory actions.
#[derive(Debug, Subcommand)]
pub enum SectionAction {
    /// Register or rename a section
    Add {
        /// Section id from the host system
        id: String,
        /// Section name
        name: String,
        /// Section handle; derived from the name when omitted
        #[arg(long)]
        handle: Option<String>,
    },

    /// List registered sections
    List,
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration
    Show,

    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_create_command() {
        let cli = Cli::parse_from([
            "trellis",
            "relationship",
            "create",
            "--name",
            "Related Articles",
            "--sections",
            "1,2",
            "--max",
            "5",
        ]);
        match cli.command {
            Command::Relationship(RelationshipAction::Create(args)) => {
                assert_eq!(args.name, "Related Articles");
                assert_eq!(args.sections, "1,2");
                assert_eq!(args.min, "0");
                assert_eq!(args.max, "5");
                assert!(args.handle.is_none());
            }
            other => panic!("Expected Create command, got {:?}", other),
        }
    }

    #[test]
    fn test_list_defaults_and_ids() {
        let cli = Cli::parse_from(["trellis", "rel", "list", "--ids", "3,1"]);
        match cli.command {
            Command::Relationship(RelationshipAction::List(args)) => {
                assert_eq!(args.sort, "name");
                assert_eq!(args.order, "asc");
                assert_eq!(args.ids, Some(vec!["3".to_string(), "1".to_string()]));
            }
            other => panic!("Expected List command, got {:?}", other),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["trellis", "link", "list", "1", "-e", "4", "--format", "json", "-vv"]);
        assert!(matches!(cli.format, Some(CliFormat::Json)));
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Command::Link(LinkAction::List { relationship, entry }) => {
                assert_eq!(relationship, "1");
                assert_eq!(entry.as_deref(), Some("4"));
            }
            other => panic!("Expected Link List command, got {:?}", other),
        }
    }

    #[test]
    fn test_delete_requires_ids() {
        assert!(Cli::try_parse_from(["trellis", "relationship", "delete"]).is_err());
    }
}
