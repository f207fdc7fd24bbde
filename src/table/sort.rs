//! Single-column sort directive and its toggle cycle.

use std::{cmp::Ordering, fmt, str::FromStr};

use crate::data::Resource;

// ============================================================================
// Columns
// ============================================================================

/// Columns of the resource table, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnId {
    Name,
    Category,
    Sport,
    Description,
    Link,
}

impl ColumnId {
    /// All columns in display order.
    pub const ALL: [ColumnId; 5] = [
        Self::Name,
        Self::Category,
        Self::Sport,
        Self::Description,
        Self::Link,
    ];

    /// Stable id used in the `sort` query parameter.
    pub const fn id(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Category => "category",
            Self::Sport => "sport",
            Self::Description => "description",
            Self::Link => "url",
        }
    }

    /// Header label.
    pub const fn header(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Category => "Category",
            Self::Sport => "Sport",
            Self::Description => "Description",
            Self::Link => "Link",
        }
    }

    /// Whether clicking the header toggles sorting on this column.
    pub const fn is_sortable(self) -> bool {
        !matches!(self, Self::Link)
    }

    /// Cell value of `resource` for this column.
    pub fn value(self, resource: &Resource) -> &str {
        match self {
            Self::Name => &resource.name,
            Self::Category => &resource.category,
            Self::Sport => &resource.sport,
            Self::Description => &resource.description,
            Self::Link => &resource.url,
        }
    }

    /// Look up a column by its query id.
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|column| column.id() == id)
    }
}

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

// ============================================================================
// Direction
// ============================================================================

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    /// Query encoding: `asc` / `desc`.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ascending => "asc",
            Self::Descending => "desc",
        }
    }

    /// Indicator glyph shown next to the active header.
    pub const fn glyph(self) -> &'static str {
        match self {
            Self::Ascending => "▲",
            Self::Descending => "▼",
        }
    }

    /// `aria-sort` attribute value.
    pub const fn aria(self) -> &'static str {
        match self {
            Self::Ascending => "ascending",
            Self::Descending => "descending",
        }
    }

    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Ascending => ordering,
            Self::Descending => ordering.reverse(),
        }
    }
}

impl FromStr for SortDirection {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(Self::Ascending),
            "desc" => Ok(Self::Descending),
            _ => Err(()),
        }
    }
}

// ============================================================================
// Sort State
// ============================================================================

/// The single active `(column, direction)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SortDirective {
    pub column: ColumnId,
    pub direction: SortDirection,
}

impl SortDirective {
    pub const fn new(column: ColumnId, direction: SortDirection) -> Self {
        Self { column, direction }
    }

    /// Parse `<columnId>:<asc|desc>`.
    ///
    /// Returns `None` for anything malformed, including non-sortable columns.
    pub fn parse(s: &str) -> Option<Self> {
        let (column, direction) = s.split_once(':')?;
        let column = ColumnId::from_id(column).filter(|c| c.is_sortable())?;
        let direction = direction.parse().ok()?;
        Some(Self::new(column, direction))
    }

    /// Compare two resources under this directive.
    pub fn compare(&self, a: &Resource, b: &Resource) -> Ordering {
        self.direction
            .apply(self.column.value(a).cmp(self.column.value(b)))
    }
}

impl fmt::Display for SortDirective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.column.id(), self.direction.as_str())
    }
}

/// Sort state owned by the table. `None` keeps insertion order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct SortState(pub Option<SortDirective>);

impl SortState {
    pub const fn unsorted() -> Self {
        Self(None)
    }

    pub const fn by(column: ColumnId, direction: SortDirection) -> Self {
        Self(Some(SortDirective::new(column, direction)))
    }

    pub const fn directive(&self) -> Option<SortDirective> {
        self.0
    }

    /// Direction of `column` if it is the active sort column.
    pub fn direction_of(&self, column: ColumnId) -> Option<SortDirection> {
        self.0
            .filter(|d| d.column == column)
            .map(|d| d.direction)
    }

    /// State after clicking the header of `column`.
    ///
    /// Unsorted or another column → ascending, ascending → descending,
    /// descending → unsorted. Non-sortable columns leave the state as is.
    pub fn toggled(self, column: ColumnId) -> Self {
        if !column.is_sortable() {
            return self;
        }
        match self.direction_of(column) {
            None => Self::by(column, SortDirection::Ascending),
            Some(SortDirection::Ascending) => Self::by(column, SortDirection::Descending),
            Some(SortDirection::Descending) => Self::unsorted(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn resource(name: &str) -> Resource {
        Resource {
            name: name.into(),
            category: "Sports".into(),
            sport: "Basketball".into(),
            url: "https://example.com".into(),
            description: String::new(),
        }
    }

    #[test]
    fn test_column_ids_round_trip() {
        for column in ColumnId::ALL {
            assert_eq!(ColumnId::from_id(column.id()), Some(column));
        }
        assert_eq!(ColumnId::from_id("status"), None);
    }

    #[test]
    fn test_link_is_not_sortable() {
        assert!(!ColumnId::Link.is_sortable());
        assert!(ColumnId::Name.is_sortable());
        assert!(ColumnId::Description.is_sortable());
    }

    #[test]
    fn test_directive_parse() {
        assert_eq!(
            SortDirective::parse("name:desc"),
            Some(SortDirective::new(ColumnId::Name, SortDirection::Descending))
        );
        assert_eq!(
            SortDirective::parse("sport:asc"),
            Some(SortDirective::new(ColumnId::Sport, SortDirection::Ascending))
        );
    }

    #[test]
    fn test_directive_parse_malformed() {
        for raw in ["", "name", "name:", ":asc", "name:up", "value:asc", "url:asc", "name:asc:x"] {
            assert_eq!(SortDirective::parse(raw), None, "accepted `{raw}`");
        }
    }

    #[test]
    fn test_directive_display() {
        let directive = SortDirective::new(ColumnId::Category, SortDirection::Ascending);
        assert_eq!(directive.to_string(), "category:asc");
    }

    #[test]
    fn test_toggle_cycle() {
        let state = SortState::unsorted().toggled(ColumnId::Name);
        assert_eq!(state, SortState::by(ColumnId::Name, SortDirection::Ascending));

        let state = state.toggled(ColumnId::Name);
        assert_eq!(state, SortState::by(ColumnId::Name, SortDirection::Descending));

        let state = state.toggled(ColumnId::Name);
        assert_eq!(state, SortState::unsorted());
    }

    #[test]
    fn test_toggle_other_column_resets_to_ascending() {
        let state = SortState::by(ColumnId::Name, SortDirection::Descending);
        let state = state.toggled(ColumnId::Sport);

        assert_eq!(state, SortState::by(ColumnId::Sport, SortDirection::Ascending));
        assert_eq!(state.direction_of(ColumnId::Name), None);
    }

    #[test]
    fn test_toggle_link_is_noop() {
        let state = SortState::by(ColumnId::Name, SortDirection::Ascending);
        assert_eq!(state.toggled(ColumnId::Link), state);
    }

    #[test]
    fn test_compare_respects_direction() {
        let a = resource("Alpha");
        let b = resource("Beta");

        let asc = SortDirective::new(ColumnId::Name, SortDirection::Ascending);
        let desc = SortDirective::new(ColumnId::Name, SortDirection::Descending);

        assert_eq!(asc.compare(&a, &b), Ordering::Less);
        assert_eq!(desc.compare(&a, &b), Ordering::Greater);
        assert_eq!(asc.compare(&a, &a), Ordering::Equal);
    }
}
