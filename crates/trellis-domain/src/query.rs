//! Listing parameters for relationships

use crate::ids::RelationshipId;

/// Column to order relationship listings by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortColumn {
    /// Store-assigned id
    Id,
    /// Display name
    #[default]
    Name,
    /// Handle
    Handle,
}

impl SortColumn {
    /// Parse a column name, falling back to [`SortColumn::Name`] for anything unknown
    pub fn parse_or_default(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "id" => Self::Id,
            "name" => Self::Name,
            "handle" => Self::Handle,
            _ => Self::default(),
        }
    }

    /// Column name as stored
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Name => "name",
            Self::Handle => "handle",
        }
    }
}

/// Direction of a relationship listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Ascending
    #[default]
    Asc,
    /// Descending
    Desc,
}

impl SortOrder {
    /// Parse a direction, falling back to [`SortOrder::Asc`] for anything unknown
    pub fn parse_or_default(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "asc" => Self::Asc,
            "desc" => Self::Desc,
            _ => Self::default(),
        }
    }

    /// SQL keyword
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// Criteria for listing relationships
#[derive(Debug, Clone, Default)]
pub struct RelationshipQuery {
    /// Restrict to these ids; `None` lists everything
    pub ids: Option<Vec<RelationshipId>>,

    /// Ordering column
    pub sort_column: SortColumn,

    /// Ordering direction
    pub sort_order: SortOrder,
}

impl RelationshipQuery {
    /// List every relationship, by name ascending
    pub fn all() -> Self {
        Self::default()
    }

    /// Restrict the listing to the given ids
    pub fn with_ids(mut self, ids: Vec<RelationshipId>) -> Self {
        self.ids = Some(ids);
        self
    }

    /// Order by the given column and direction
    pub fn sorted(mut self, column: SortColumn, order: SortOrder) -> Self {
        self.sort_column = column;
        self.sort_order = order;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let query = RelationshipQuery::all();
        assert!(query.ids.is_none());
        assert_eq!(query.sort_column, SortColumn::Name);
        assert_eq!(query.sort_order, SortOrder::Asc);
    }

    #[test]
    fn test_parse_known_values() {
        assert_eq!(SortColumn::parse_or_default("HANDLE"), SortColumn::Handle);
        assert_eq!(SortColumn::parse_or_default("id"), SortColumn::Id);
        assert_eq!(SortOrder::parse_or_default("Desc"), SortOrder::Desc);
    }

    #[test]
    fn test_unknown_values_fall_back() {
        assert_eq!(SortColumn::parse_or_default("name; drop table"), SortColumn::Name);
        assert_eq!(SortColumn::parse_or_default(""), SortColumn::Name);
        assert_eq!(SortOrder::parse_or_default("sideways"), SortOrder::Asc);
    }
}
