//! Command implementations.

pub mod config;
pub mod link;
pub mod relationship;
pub mod section;

pub use self::config::execute_config;
pub use self::link::execute_link;
pub use self::relationship::execute_relationship;
pub use self::section::execute_section;

use crate::error::{CliError, Result};
use std::str::FromStr;

/// Parse a positive id argument.
pub(crate) fn parse_id<T>(value: &str) -> Result<T>
where
    T: FromStr<Err = String>,
{
    value.parse().map_err(CliError::InvalidInput)
}

#[cfg(test)]
mod tests {
    use super::*;
    use trellis_domain::EntryId;

    #[test]
    fn test_parse_id() {
        let id: EntryId = parse_id(" 12 ").unwrap();
        assert_eq!(id.value(), 12);
    }

    #[test]
    fn test_parse_id_rejects_non_positive() {
        let err = parse_id::<EntryId>("0").unwrap_err();
        assert!(matches!(err, CliError::InvalidInput(msg) if msg.contains("must be positive")));
    }
}
