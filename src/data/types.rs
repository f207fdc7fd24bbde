//! Resource record.

use serde::{Deserialize, Serialize};

/// One catalog entry shown as a table row.
///
/// Unknown fields in the data file are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub name: String,
    pub category: String,
    pub sport: String,
    /// Absolute `http(s)` URL, rendered as an outbound link.
    pub url: String,
    #[serde(default)]
    pub description: String,
}

impl Resource {
    /// Whether `url` is an absolute `http://` or `https://` URL with a host.
    pub fn has_absolute_url(&self) -> bool {
        ["https://", "http://"]
            .iter()
            .find_map(|scheme| self.url.strip_prefix(scheme))
            .and_then(|rest| rest.split(['/', '?', '#']).next())
            .is_some_and(|host| !host.is_empty() && !host.contains(char::is_whitespace))
    }
}
