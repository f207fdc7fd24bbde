//! Filterable, sortable resource table with URL-synchronized state.
//!
//! # Data Flow
//!
//! ```text
//!   Location::query() ──► parse_query() ──► TableState
//!                          (mount only)         │
//!                                               ▼
//!   ResourceStore ──────────────────────► visible_rows() ──► render
//!                                               ▲
//!   apply(Interaction) / set_* / toggle_sort ───┘
//!            │
//!            └──► serialize_query() ──► Location::replace_query()
//! ```
//!
//! The location is read once, on mount. Afterwards the table only writes it,
//! replacing the current entry instead of pushing a new one.

mod filter;
mod interaction;
mod location;
mod query;
mod sort;

pub use filter::FilterState;
pub use interaction::Interaction;
pub use location::{Location, MemoryLocation};
pub use query::{TableState, parse_query, query_value, serialize_query, to_href};
pub use sort::{ColumnId, SortDirection, SortState};

use std::{cell::RefCell, rc::Rc};

use crate::data::{Resource, ResourceStore};

/// Visible row indices cached for the exact state they were computed from.
#[derive(Debug)]
struct RowMemo {
    state: TableState,
    rows: Rc<[usize]>,
}

/// The resource table component.
///
/// `L` is the browser location. A table mounted without one (static
/// pre-rendering) starts from the default state and never writes a URL.
#[derive(Debug)]
pub struct ResourceTable<L: Location = MemoryLocation> {
    store: ResourceStore,
    state: TableState,
    location: Option<L>,
    memo: RefCell<Option<RowMemo>>,
}

impl ResourceTable<MemoryLocation> {
    /// Mount without a browser context.
    pub fn detached(store: ResourceStore) -> Self {
        Self::mount(store, None)
    }
}

impl<L: Location> ResourceTable<L> {
    /// Mount the table, seeding state from the location's query string.
    ///
    /// Mounting never rewrites the location.
    pub fn mount(store: ResourceStore, location: Option<L>) -> Self {
        let state = location
            .as_ref()
            .map(|loc| parse_query(&loc.query()))
            .unwrap_or_default();

        Self {
            store,
            state,
            location,
            memo: RefCell::new(None),
        }
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    pub fn filters(&self) -> &FilterState {
        &self.state.filters
    }

    pub fn sort(&self) -> SortState {
        self.state.sort
    }

    pub fn into_location(self) -> Option<L> {
        self.location
    }

    pub fn categories(&self) -> &[String] {
        self.store.categories()
    }

    pub fn sports(&self) -> &[String] {
        self.store.sports()
    }

    /// Number of rows in the source collection.
    pub fn total_count(&self) -> usize {
        self.store.len()
    }

    /// Number of rows passing the current filters.
    pub fn row_count(&self) -> usize {
        self.visible_indices().len()
    }

    /// Serialized query for the current state.
    pub fn query(&self) -> String {
        serialize_query(&self.state)
    }

    /// Query the location would hold after `interaction`.
    ///
    /// The interaction runs on a scratch table mounted from the current
    /// query, so this table and its location are left untouched.
    pub fn query_after(&self, interaction: Interaction) -> String {
        let location = MemoryLocation::new("", self.query());
        let mut scratch = ResourceTable::mount(self.store.clone(), Some(location));
        scratch.apply(interaction);
        scratch
            .into_location()
            .map(|location| location.query())
            .unwrap_or_default()
    }

    /// Query the URL would carry after toggling `column`.
    pub fn query_with_toggled(&self, column: ColumnId) -> String {
        self.query_after(Interaction::ToggleSort(column))
    }

    /// Query the URL would carry after clearing all filters.
    pub fn query_without_filters(&self) -> String {
        self.query_after(Interaction::ClearFilters)
    }

    // ------------------------------------------------------------------------
    // Rows
    // ------------------------------------------------------------------------

    /// Indices into the store of the visible rows, in display order.
    ///
    /// Recomputed only when the filter/sort state differs from the cached one.
    pub fn visible_indices(&self) -> Rc<[usize]> {
        if let Some(memo) = self.memo.borrow().as_ref()
            && memo.state == self.state
        {
            return Rc::clone(&memo.rows);
        }

        let rows: Rc<[usize]> = compute_rows(self.store.resources(), &self.state).into();
        *self.memo.borrow_mut() = Some(RowMemo {
            state: self.state.clone(),
            rows: Rc::clone(&rows),
        });
        rows
    }

    /// The visible rows with their source index, in display order.
    pub fn visible_rows(&self) -> Vec<(usize, &Resource)> {
        let resources = self.store.resources();
        self.visible_indices()
            .iter()
            .map(|&i| (i, &resources[i]))
            .collect()
    }

    /// Every row with its source index and visibility.
    ///
    /// Visible rows come first in display order, hidden rows follow in
    /// insertion order, so a client can re-filter the rendered markup
    /// without another request.
    pub fn rows_with_visibility(&self) -> Vec<(usize, &Resource, bool)> {
        let resources = self.store.resources();
        let visible = self.visible_rows();

        let mut shown = vec![false; resources.len()];
        for &(i, _) in &visible {
            shown[i] = true;
        }

        let hidden = resources
            .iter()
            .enumerate()
            .filter(|&(i, _)| !shown[i])
            .map(|(i, r)| (i, r, false));

        visible
            .into_iter()
            .map(|(i, r)| (i, r, true))
            .chain(hidden)
            .collect()
    }

    // ------------------------------------------------------------------------
    // Operations
    // ------------------------------------------------------------------------

    pub fn set_name_filter(&mut self, value: impl Into<String>) {
        let value = value.into();
        self.update(|state| state.filters.name = value);
    }

    pub fn set_category_filter(&mut self, value: impl Into<String>) {
        let value = value.into();
        self.update(|state| state.filters.category = value);
    }

    pub fn set_sport_filter(&mut self, value: impl Into<String>) {
        let value = value.into();
        self.update(|state| state.filters.sport = value);
    }

    /// Sort by `column`. Ignored for columns that are not sortable.
    pub fn set_sort(&mut self, column: ColumnId, direction: SortDirection) {
        if column.is_sortable() {
            self.update(|state| state.sort = SortState::by(column, direction));
        }
    }

    /// Header click: unsorted → ascending → descending → unsorted.
    pub fn toggle_sort(&mut self, column: ColumnId) {
        self.update(|state| state.sort = state.sort.toggled(column));
    }

    pub fn clear_sort(&mut self) {
        self.update(|state| state.sort = SortState::unsorted());
    }

    /// Reset all three filters in one update. Sorting is kept.
    pub fn clear_all_filters(&mut self) {
        self.update(|state| state.filters = FilterState::default());
    }

    /// Dispatch an interaction to the matching operation.
    pub fn apply(&mut self, interaction: Interaction) {
        match interaction {
            Interaction::SetName(value) => self.set_name_filter(value),
            Interaction::SetCategory(value) => self.set_category_filter(value),
            Interaction::SetSport(value) => self.set_sport_filter(value),
            Interaction::Sort(column, direction) => self.set_sort(column, direction),
            Interaction::ToggleSort(column) => self.toggle_sort(column),
            Interaction::ClearSort => self.clear_sort(),
            Interaction::ClearFilters => self.clear_all_filters(),
        }
    }

    /// Apply a state change and rewrite the location if anything changed.
    fn update(&mut self, change: impl FnOnce(&mut TableState)) {
        let before = self.state.clone();
        change(&mut self.state);

        if self.state != before
            && let Some(location) = self.location.as_mut()
        {
            location.replace_query(&serialize_query(&self.state));
        }
    }
}

/// Filter then stable-sort; unsorted keeps insertion order.
fn compute_rows(resources: &[Resource], state: &TableState) -> Vec<usize> {
    let predicate = state.filters.predicate();
    let mut rows: Vec<usize> = resources
        .iter()
        .enumerate()
        .filter(|(_, r)| predicate.matches(r))
        .map(|(i, _)| i)
        .collect();

    if let Some(directive) = state.sort.directive() {
        rows.sort_by(|&a, &b| directive.compare(&resources[a], &resources[b]));
    }

    rows
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// Location that records every replaced query.
    #[derive(Debug, Clone, Default)]
    struct RecordingLocation {
        query: String,
        writes: Rc<RefCell<Vec<String>>>,
    }

    impl RecordingLocation {
        fn new(query: &str) -> Self {
            Self {
                query: query.into(),
                ..Self::default()
            }
        }

        fn writes(&self) -> Vec<String> {
            self.writes.borrow().clone()
        }
    }

    impl Location for RecordingLocation {
        fn query(&self) -> String {
            self.query.clone()
        }

        fn replace_query(&mut self, query: &str) {
            self.query = query.into();
            self.writes.borrow_mut().push(query.into());
        }
    }

    fn resource(name: &str, category: &str, sport: &str) -> Resource {
        Resource {
            name: name.into(),
            category: category.into(),
            sport: sport.into(),
            url: format!("https://example.com/{}", name.to_lowercase().replace(' ', "-")),
            description: format!("{name} data"),
        }
    }

    /// The ten records of the sample dataset.
    fn sample_store() -> ResourceStore {
        ResourceStore::new(vec![
            resource("Basketball Analytics", "Sports", "Basketball"),
            resource("Football Metrics", "Sports", "Football"),
            resource("Baseball Stats", "Sports", "Baseball"),
            resource("Soccer Analysis", "Sports", "Soccer"),
            resource("Tennis Tracker", "Sports", "Tennis"),
            resource("Hockey Data", "Sports", "Hockey"),
            resource("Golf Performance", "Sports", "Golf"),
            resource("Swimming Records", "Sports", "Swimming"),
            resource("Track & Field", "Sports", "Track"),
            resource("Volleyball Stats", "Sports", "Volleyball"),
        ])
    }

    fn mixed_store() -> ResourceStore {
        ResourceStore::new(vec![
            resource("Beta Board", "Sports", "Soccer"),
            resource("Aim Lab", "Esports", "Valorant"),
            resource("Alpha Stats", "Sports", "Basketball"),
            resource("Replay Parser", "Esports", "Dota"),
            resource("Court Vision", "Sports", "Basketball"),
        ])
    }

    fn names<L: Location>(table: &ResourceTable<L>) -> Vec<String> {
        table.visible_rows().iter().map(|(_, r)| r.name.clone()).collect()
    }

    fn recorded(query: &str) -> (ResourceTable<RecordingLocation>, RecordingLocation) {
        let location = RecordingLocation::new(query);
        let table = ResourceTable::mount(mixed_store(), Some(location.clone()));
        (table, location)
    }

    #[test]
    fn test_detached_mount_defaults() {
        let table = ResourceTable::detached(sample_store());

        assert_eq!(table.filters(), &FilterState::default());
        assert_eq!(table.sort(), SortState::unsorted());
        assert_eq!(table.row_count(), 10);
        assert_eq!(table.total_count(), 10);
        assert!(table.into_location().is_none());
    }

    #[test]
    fn test_unsorted_keeps_insertion_order() {
        let table = ResourceTable::detached(mixed_store());
        assert_eq!(
            names(&table),
            ["Beta Board", "Aim Lab", "Alpha Stats", "Replay Parser", "Court Vision"]
        );
    }

    #[test]
    fn test_name_filter_basket_scenario() {
        let mut table = ResourceTable::detached(sample_store());
        table.set_name_filter("basket");

        assert_eq!(names(&table), ["Basketball Analytics"]);
        assert_eq!(table.row_count(), 1);
        assert_eq!(table.total_count(), 10);
    }

    #[test]
    fn test_mount_from_query_scenario() {
        let location = MemoryLocation::new("/", "?category=Sports&sort=name:desc");
        let table = ResourceTable::mount(mixed_store(), Some(location));

        assert_eq!(table.filters().category, "Sports");
        assert_eq!(names(&table), ["Court Vision", "Beta Board", "Alpha Stats"]);
    }

    #[test]
    fn test_mount_does_not_rewrite_location() {
        let (table, location) = recorded("sort=bogus&utm=1");

        assert_eq!(table.sort(), SortState::unsorted());
        assert!(location.writes().is_empty());
        assert_eq!(table.into_location().unwrap().query(), "sort=bogus&utm=1");
    }

    #[test]
    fn test_filters_and_together() {
        let mut table = ResourceTable::detached(mixed_store());
        table.set_category_filter("Sports");
        table.set_sport_filter("Basketball");
        table.set_name_filter("vision");

        assert_eq!(names(&table), ["Court Vision"]);
    }

    #[test]
    fn test_visible_rows_equal_predicate_subset() {
        let store = mixed_store();
        let triples = [
            ("", "", ""),
            ("a", "", ""),
            ("", "Esports", ""),
            ("", "", "Basketball"),
            ("st", "Sports", ""),
            ("zzz", "", ""),
            ("", "Sports", "Valorant"),
        ];

        for (name, category, sport) in triples {
            let mut table = ResourceTable::detached(store.clone());
            table.set_name_filter(name);
            table.set_category_filter(category);
            table.set_sport_filter(sport);

            let filters = table.filters().clone();
            let expected: Vec<_> = store
                .resources()
                .iter()
                .enumerate()
                .filter(|(_, r)| filters.predicate().matches(r))
                .collect();
            assert_eq!(table.visible_rows(), expected, "filters {filters:?}");
        }
    }

    #[test]
    fn test_sort_orders_by_column() {
        let mut table = ResourceTable::detached(mixed_store());

        for column in [ColumnId::Name, ColumnId::Category, ColumnId::Sport, ColumnId::Description] {
            table.set_sort(column, SortDirection::Ascending);
            let values: Vec<_> = table.visible_rows().iter().map(|(_, r)| column.value(r).to_owned()).collect();
            assert!(values.windows(2).all(|w| w[0] <= w[1]), "{column} asc: {values:?}");

            table.set_sort(column, SortDirection::Descending);
            let values: Vec<_> = table.visible_rows().iter().map(|(_, r)| column.value(r).to_owned()).collect();
            assert!(values.windows(2).all(|w| w[0] >= w[1]), "{column} desc: {values:?}");
        }
    }

    #[test]
    fn test_sort_is_stable() {
        let mut table = ResourceTable::detached(mixed_store());
        table.set_sort(ColumnId::Category, SortDirection::Ascending);

        // Ties keep insertion order
        assert_eq!(
            names(&table),
            ["Aim Lab", "Replay Parser", "Beta Board", "Alpha Stats", "Court Vision"]
        );
    }

    #[test]
    fn test_set_sort_ignores_link_column() {
        let mut table = ResourceTable::detached(mixed_store());
        table.set_sort(ColumnId::Link, SortDirection::Ascending);
        assert_eq!(table.sort(), SortState::unsorted());
    }

    #[test]
    fn test_toggle_sort_semantics() {
        let mut table = ResourceTable::detached(mixed_store());

        table.toggle_sort(ColumnId::Name);
        assert_eq!(table.sort().direction_of(ColumnId::Name), Some(SortDirection::Ascending));

        table.toggle_sort(ColumnId::Name);
        assert_eq!(table.sort().direction_of(ColumnId::Name), Some(SortDirection::Descending));

        table.toggle_sort(ColumnId::Sport);
        assert_eq!(table.sort().direction_of(ColumnId::Sport), Some(SortDirection::Ascending));
        assert_eq!(table.sort().direction_of(ColumnId::Name), None);

        table.toggle_sort(ColumnId::Sport);
        table.toggle_sort(ColumnId::Sport);
        assert_eq!(table.sort(), SortState::unsorted());
    }

    #[test]
    fn test_clear_all_filters_keeps_sort() {
        let (mut table, location) = recorded("name=a&category=Sports&sport=Soccer&sort=name:asc");
        assert_eq!(table.row_count(), 1);

        table.clear_all_filters();

        assert_eq!(table.filters(), &FilterState::default());
        assert_eq!(table.sort(), SortState::by(ColumnId::Name, SortDirection::Ascending));
        assert_eq!(
            names(&table),
            ["Aim Lab", "Alpha Stats", "Beta Board", "Court Vision", "Replay Parser"]
        );
        // One combined write, not one per filter
        assert_eq!(location.writes(), ["sort=name:asc"]);
    }

    #[test]
    fn test_every_change_replaces_location() {
        let (mut table, location) = recorded("");

        table.set_name_filter("a");
        table.set_category_filter("Esports");
        table.toggle_sort(ColumnId::Sport);
        table.set_name_filter("");
        table.clear_sort();

        assert_eq!(
            location.writes(),
            [
                "name=a",
                "name=a&category=Esports",
                "name=a&category=Esports&sort=sport:asc",
                "category=Esports&sort=sport:asc",
                "category=Esports",
            ]
        );
        assert_eq!(table.into_location().unwrap().query(), "category=Esports");
    }

    #[test]
    fn test_unchanged_value_does_not_rewrite() {
        let (mut table, location) = recorded("name=a");
        table.set_name_filter("a");
        table.clear_sort();
        table.set_sort(ColumnId::Link, SortDirection::Descending);

        assert!(location.writes().is_empty());
    }

    #[test]
    fn test_location_matches_state_after_each_change() {
        let (mut table, location) = recorded("");
        let steps = [
            Interaction::SetName("Stats & More".into()),
            Interaction::SetSport("Basketball".into()),
            Interaction::ToggleSort(ColumnId::Description),
            Interaction::ToggleSort(ColumnId::Description),
            Interaction::ClearFilters,
        ];

        for step in steps {
            table.apply(step);
            let written = location.writes().last().cloned().unwrap_or_default();
            let from_url = parse_query(&written);
            assert_eq!(from_url.filters, *table.filters());
            assert_eq!(from_url.sort, table.sort());
        }
    }

    #[test]
    fn test_apply_dispatches_every_interaction() {
        let mut table = ResourceTable::detached(mixed_store());

        table.apply(Interaction::SetCategory("Sports".into()));
        table.apply(Interaction::SetSport("Basketball".into()));
        table.apply(Interaction::Sort(ColumnId::Name, SortDirection::Descending));
        assert_eq!(names(&table), ["Court Vision", "Alpha Stats"]);
        assert_eq!(table.query(), "category=Sports&sport=Basketball&sort=name:desc");

        table.apply(Interaction::ClearSort);
        table.apply(Interaction::ClearFilters);
        assert_eq!(table.query(), "");
        assert_eq!(table.row_count(), 5);
    }

    #[test]
    fn test_memo_reused_until_state_changes() {
        let mut table = ResourceTable::detached(mixed_store());

        let first = table.visible_indices();
        let second = table.visible_indices();
        assert!(Rc::ptr_eq(&first, &second));

        table.set_name_filter("a");
        let third = table.visible_indices();
        assert!(!Rc::ptr_eq(&second, &third));

        // Returning to the cached state's values recomputes, never serves stale rows
        table.set_name_filter("");
        assert_eq!(&*table.visible_indices(), &*first);
    }

    #[test]
    fn test_empty_store() {
        let mut table = ResourceTable::detached(ResourceStore::default());
        table.set_name_filter("anything");

        assert_eq!(table.row_count(), 0);
        assert_eq!(table.total_count(), 0);
        assert!(table.categories().is_empty());
        assert!(table.rows_with_visibility().is_empty());
    }

    #[test]
    fn test_rows_with_visibility() {
        let location = MemoryLocation::new("/", "category=Esports&sort=name:desc");
        let table = ResourceTable::mount(mixed_store(), Some(location));

        let rows: Vec<_> = table
            .rows_with_visibility()
            .into_iter()
            .map(|(i, r, shown)| (i, r.name.as_str(), shown))
            .collect();
        assert_eq!(
            rows,
            [
                (3, "Replay Parser", true),
                (1, "Aim Lab", true),
                (0, "Beta Board", false),
                (2, "Alpha Stats", false),
                (4, "Court Vision", false),
            ]
        );
    }

    #[test]
    fn test_hrefs_for_interactions() {
        let (table, location) = recorded("category=Sports&sort=name:asc");

        assert_eq!(table.query(), "category=Sports&sort=name:asc");
        assert_eq!(table.query_with_toggled(ColumnId::Name), "category=Sports&sort=name:desc");
        assert_eq!(table.query_with_toggled(ColumnId::Sport), "category=Sports&sort=sport:asc");
        assert_eq!(table.query_with_toggled(ColumnId::Link), "category=Sports&sort=name:asc");
        assert_eq!(table.query_without_filters(), "sort=name:asc");
        assert_eq!(
            table.query_after(Interaction::SetName("vision".into())),
            "name=vision&category=Sports&sort=name:asc"
        );

        // Previews never touch the mounted table or its location
        assert_eq!(table.query(), "category=Sports&sort=name:asc");
        assert!(location.writes().is_empty());
    }
}
