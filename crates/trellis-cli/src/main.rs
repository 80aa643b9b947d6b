//! Trellis CLI - Command-line interface for section relationships and entry links.

use clap::Parser;
use std::fs;
use std::path::Path;
use trellis_cli::commands;
use trellis_cli::config::OutputFormat;
use trellis_cli::{Cli, CliError, Command, Config, Formatter};
use trellis_domain::{IdentityCache, RelationshipCache};
use trellis_store::SqliteStore;

fn main() {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => fail(&Formatter::new(OutputFormat::Table, !cli.no_color), e),
    };

    // Determine output format
    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);

    let formatter = Formatter::new(format, config.color_enabled(cli.no_color));

    if let Err(e) = run(cli, &config, &formatter) {
        fail(&formatter, e);
    }
}

fn fail(formatter: &Formatter, error: CliError) -> ! {
    eprintln!("{}", formatter.format_error(&error));
    std::process::exit(1);
}

/// Log to stderr so table and JSON output on stdout stays clean.
fn setup_logging(verbosity: u8) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let level = match verbosity {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

fn run(cli: Cli, config: &Config, formatter: &Formatter) -> trellis_cli::Result<()> {
    if let Command::Config(action) = cli.command {
        return commands::execute_config(action, config, cli.config.as_deref(), formatter);
    }

    let database = cli.database.clone().unwrap_or_else(|| config.database.clone());
    prepare_database_dir(&database)?;
    tracing::debug!(database = %database.display(), cache = config.settings.identity_cache, "Opening store");

    if config.settings.identity_cache {
        let mut store = SqliteStore::with_cache(&database, IdentityCache::new())?;
        dispatch(cli.command, &mut store, formatter)
    } else {
        let mut store = SqliteStore::new(&database)?;
        dispatch(cli.command, &mut store, formatter)
    }
}

fn prepare_database_dir(database: &Path) -> trellis_cli::Result<()> {
    if let Some(parent) = database.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

fn dispatch<C: RelationshipCache>(
    command: Command,
    store: &mut SqliteStore<C>,
    formatter: &Formatter,
) -> trellis_cli::Result<()> {
    match command {
        Command::Relationship(action) => commands::execute_relationship(action, store, formatter),
        Command::Link(action) => commands::execute_link(action, store, formatter),
        Command::Section(action) => commands::execute_section(action, store, formatter),
        Command::Config(_) => Err(CliError::InvalidInput(
            "configuration commands do not use the store".to_string(),
        )),
    }
}
