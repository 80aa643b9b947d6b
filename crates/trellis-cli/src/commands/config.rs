//! Configuration commands.

use crate::cli::ConfigAction;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use std::path::Path;

/// Execute a configuration action.
pub fn execute_config(
    action: ConfigAction,
    config: &Config,
    explicit_path: Option<&Path>,
    formatter: &Formatter,
) -> Result<()> {
    match action {
        ConfigAction::Show => {
            println!("{}", config.to_toml()?);
        }
        ConfigAction::Init { force } => {
            let path = init(explicit_path, force)?;
            println!("{}", formatter.success(&format!("Configuration written to {}", path.display())));
        }
    }

    Ok(())
}

/// Write the default configuration, refusing to clobber an existing file unless forced.
fn init(explicit_path: Option<&Path>, force: bool) -> Result<std::path::PathBuf> {
    let path = Config::resolve_path(explicit_path)?;
    if path.exists() && !force {
        return Err(CliError::Config(format!(
            "{} already exists; pass --force to overwrite it",
            path.display()
        )));
    }

    Config::default().save(Some(&path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        init(Some(&path), false).unwrap();
        assert!(path.exists());

        assert!(matches!(init(Some(&path), false), Err(CliError::Config(_))));
        assert!(init(Some(&path), true).is_ok());
    }
}
