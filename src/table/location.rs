//! Browser location abstraction.
//!
//! The table reads the query string once on mount and replaces it after every
//! state change. Replacing never adds a history entry, so back/forward does not
//! step through filter changes.

/// A location whose query string can be read and replaced in place.
pub trait Location {
    /// Current query string, without the leading `?`.
    fn query(&self) -> String;

    /// Replace the query string of the current history entry.
    fn replace_query(&mut self, query: &str);
}

impl<L: Location + ?Sized> Location for &mut L {
    fn query(&self) -> String {
        (**self).query()
    }

    fn replace_query(&mut self, query: &str) {
        (**self).replace_query(query)
    }
}

/// In-memory location, one per dev server request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryLocation {
    path: String,
    query: String,
}

impl MemoryLocation {
    pub fn new(path: impl Into<String>, query: impl Into<String>) -> Self {
        let query = query.into();
        Self {
            path: path.into(),
            query: query.strip_prefix('?').map(str::to_owned).unwrap_or(query),
        }
    }

    /// Split a request target such as `/index.html?sort=name:asc`.
    pub fn from_request_url(url: &str) -> Self {
        match url.split_once('?') {
            Some((path, query)) => Self::new(path, query),
            None => Self::new(url, ""),
        }
    }

    /// `path` plus `?query` when the query is non-empty.
    pub fn href(&self) -> String {
        if self.query.is_empty() {
            self.path.clone()
        } else {
            format!("{}?{}", self.path, self.query)
        }
    }
}

impl Location for MemoryLocation {
    fn query(&self) -> String {
        self.query.clone()
    }

    fn replace_query(&mut self, query: &str) {
        self.query = query.to_owned();
    }
}
