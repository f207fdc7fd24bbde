//! User interactions with the table, as named operations.
//!
//! | Operation       | Parameters                    | Table operation         |
//! |-----------------|-------------------------------|-------------------------|
//! | `filter`        | `field`, `value`              | `set_*_filter`          |
//! | `sort`          | `column`, `direction`         | `set_sort`              |
//! | `toggle`        | `column`                      | `toggle_sort`           |
//! | `clear-sort`    |                               | `clear_sort`            |
//! | `clear-filters` |                               | `clear_all_filters`     |

use std::fmt;

use super::{
    query::{CATEGORY_KEY, NAME_KEY, SPORT_KEY, query_value},
    sort::{ColumnId, SortDirection},
};

/// One state-changing interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Interaction {
    SetName(String),
    SetCategory(String),
    SetSport(String),
    Sort(ColumnId, SortDirection),
    ToggleSort(ColumnId),
    ClearSort,
    ClearFilters,
}

impl Interaction {
    /// Parse operation `op` with its parameters from `query`.
    ///
    /// Returns `None` for an unknown operation or a missing or invalid
    /// parameter. A non-sortable column is accepted; the table ignores it.
    pub fn parse(op: &str, query: &str) -> Option<Self> {
        let column = || query_value(query, "column").and_then(|id| ColumnId::from_id(&id));

        match op {
            "filter" => {
                let value = query_value(query, "value").unwrap_or_default();
                match query_value(query, "field")?.as_str() {
                    NAME_KEY => Some(Self::SetName(value)),
                    CATEGORY_KEY => Some(Self::SetCategory(value)),
                    SPORT_KEY => Some(Self::SetSport(value)),
                    _ => None,
                }
            }
            "sort" => {
                let direction = query_value(query, "direction")?.parse().ok()?;
                Some(Self::Sort(column()?, direction))
            }
            "toggle" => Some(Self::ToggleSort(column()?)),
            "clear-sort" => Some(Self::ClearSort),
            "clear-filters" => Some(Self::ClearFilters),
            _ => None,
        }
    }

    /// Operation name, as accepted by [`Interaction::parse`].
    pub const fn op(&self) -> &'static str {
        match self {
            Self::SetName(_) | Self::SetCategory(_) | Self::SetSport(_) => "filter",
            Self::Sort(..) => "sort",
            Self::ToggleSort(_) => "toggle",
            Self::ClearSort => "clear-sort",
            Self::ClearFilters => "clear-filters",
        }
    }
}

impl fmt::Display for Interaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SetName(v) => write!(f, "filter {NAME_KEY}={v:?}"),
            Self::SetCategory(v) => write!(f, "filter {CATEGORY_KEY}={v:?}"),
            Self::SetSport(v) => write!(f, "filter {SPORT_KEY}={v:?}"),
            Self::Sort(column, direction) => write!(f, "sort {column}:{}", direction.as_str()),
            Self::ToggleSort(column) => write!(f, "toggle {column}"),
            Self::ClearSort | Self::ClearFilters => f.write_str(self.op()),
        }
    }
}
