//! Query-string encoding of the table state.
//!
//! ```text
//! ?name=<substring>&category=<exact>&sport=<exact>&sort=<columnId>:<asc|desc>
//! ```
//!
//! Absent keys mean "inactive", unknown keys are ignored and a malformed `sort`
//! falls back to no sort. [`serialize_query`] and [`parse_query`] are inverses
//! for every state the table can reach.

use std::borrow::Cow;

use super::{
    filter::FilterState,
    sort::{SortDirective, SortState},
};

/// Query keys.
pub const NAME_KEY: &str = "name";
pub const CATEGORY_KEY: &str = "category";
pub const SPORT_KEY: &str = "sport";
pub const SORT_KEY: &str = "sort";

/// Combined filter and sort state, the unit persisted in the URL.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct TableState {
    pub filters: FilterState,
    pub sort: SortState,
}

/// Parse a query string, with or without the leading `?`.
pub fn parse_query(query: &str) -> TableState {
    let mut state = TableState::default();

    for (key, value) in pairs(query) {
        match &*key {
            NAME_KEY => state.filters.name = value.into_owned(),
            CATEGORY_KEY => state.filters.category = value.into_owned(),
            SPORT_KEY => state.filters.sport = value.into_owned(),
            SORT_KEY => state.sort = SortState(SortDirective::parse(&value)),
            _ => {}
        }
    }

    state
}

/// Decoded value of `key`, the last one when repeated.
pub fn query_value(query: &str, key: &str) -> Option<String> {
    pairs(query)
        .filter(|(k, _)| k == key)
        .last()
        .map(|(_, value)| value.into_owned())
}

/// Decoded `(key, value)` pairs in order. A bare key has an empty value.
fn pairs(query: &str) -> impl Iterator<Item = (Cow<'_, str>, Cow<'_, str>)> {
    let query = query.strip_prefix('?').unwrap_or(query);
    query.split('&').filter(|p| !p.is_empty()).map(|pair| {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        (decode_component(key), decode_component(value))
    })
}

/// Serialize non-empty filters and the sort directive, without a leading `?`.
///
/// Returns an empty string for the default state.
pub fn serialize_query(state: &TableState) -> String {
    let filters = &state.filters;
    let mut pairs: Vec<String> = [
        (NAME_KEY, &filters.name),
        (CATEGORY_KEY, &filters.category),
        (SPORT_KEY, &filters.sport),
    ]
    .into_iter()
    .filter(|(_, value)| !value.is_empty())
    .map(|(key, value)| format!("{key}={}", urlencoding::encode(value)))
    .collect();

    // Column ids and directions are plain ASCII, no escaping needed.
    if let Some(directive) = state.sort.directive() {
        pairs.push(format!("{SORT_KEY}={directive}"));
    }

    pairs.join("&")
}

/// `href` for a query: `?<query>`, or `?` alone to clear the current one.
pub fn to_href(query: &str) -> String {
    format!("?{query}")
}

/// Decode a form-urlencoded component (`+` is a space).
///
/// Invalid UTF-8 escapes are replaced rather than rejected.
fn decode_component(raw: &str) -> Cow<'_, str> {
    if !raw.contains(['+', '%']) {
        return Cow::Borrowed(raw);
    }
    let spaced = raw.replace('+', " ");
    let decoded = urlencoding::decode_binary(spaced.as_bytes());
    Cow::Owned(String::from_utf8_lossy(&decoded).into_owned())
}

// ============================================================================
// Tests
// ============================================================================
