//! Column filters.
//!
//! | Filter     | Match                          |
//! |------------|--------------------------------|
//! | `name`     | case-insensitive substring     |
//! | `category` | exact                          |
//! | `sport`    | exact                          |
//!
//! An empty value disables its filter. Active filters combine with AND.

use crate::data::Resource;

/// Filter values owned by the table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FilterState {
    pub name: String,
    pub category: String,
    pub sport: String,
}

impl FilterState {
    /// Build the predicate for the current values.
    pub fn predicate(&self) -> FilterPredicate<'_> {
        FilterPredicate {
            name: (!self.name.is_empty()).then(|| self.name.to_lowercase()),
            category: (!self.category.is_empty()).then_some(self.category.as_str()),
            sport: (!self.sport.is_empty()).then_some(self.sport.as_str()),
        }
    }
}

/// Active predicates derived from a [`FilterState`].
///
/// The name needle is lowercased once so matching a row only lowercases the row.
#[derive(Debug)]
pub struct FilterPredicate<'a> {
    name: Option<String>,
    category: Option<&'a str>,
    sport: Option<&'a str>,
}

impl FilterPredicate<'_> {
    pub fn matches(&self, resource: &Resource) -> bool {
        self.name
            .as_deref()
            .is_none_or(|needle| resource.name.to_lowercase().contains(needle))
            && self.category.is_none_or(|c| resource.category == c)
            && self.sport.is_none_or(|s| resource.sport == s)
    }
}
