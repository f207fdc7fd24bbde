//! Resource table markup.
//!
//! Every interaction is a plain link or GET form carrying the next query
//! string, so the table works without scripts. The embedded client script
//! reads the same state from `location.search` and applies it in place.
//!
//! Every record is rendered. Rows outside the current state carry `hidden`,
//! and each row has its source index and cell values as `data-*`
//! attributes, so the client can filter and reorder without a request:
//!
//! ```text
//! <tr data-index="2" data-name=".." data-category=".." data-sport=".." data-description=".." [hidden]>
//! ```

use std::fmt::Write;

use crate::{
    table::{ColumnId, Location, ResourceTable, to_href},
    utils::html::escape,
};

/// Glyph on the clear-filters link.
const CLEAR_GLYPH: &str = "×";

/// Render the filter controls, table and row count.
pub fn render_table<L: Location>(table: &ResourceTable<L>) -> String {
    let mut html = String::with_capacity(4096 + table.total_count() * 256);

    html.push_str(r#"<div class="resource-table" data-resource-table>"#);
    render_filters(&mut html, table);

    html.push_str(r#"<div class="table-scroll"><table class="table">"#);
    render_head(&mut html, table);
    render_body(&mut html, table);
    html.push_str("</table></div>");

    let _ = write!(
        html,
        r#"<div class="info" data-row-count>{}</div>"#,
        count_label(table.row_count(), table.total_count())
    );
    html.push_str("</div>");
    html
}

/// "Showing X of Y rows".
pub fn count_label(visible: usize, total: usize) -> String {
    format!("Showing {visible} of {total} rows")
}

// ============================================================================
// Filters
// ============================================================================

fn render_filters<L: Location>(html: &mut String, table: &ResourceTable<L>) {
    let filters = table.filters();

    html.push_str(r#"<form class="filters" method="get" data-filter-form>"#);
    let _ = write!(
        html,
        r#"<input type="search" name="name" class="filter-input" placeholder="Filter by name..." aria-label="Filter by name" value="{}">"#,
        escape(&filters.name)
    );
    render_select(html, "category", "All categories", table.categories(), &filters.category);
    render_select(html, "sport", "All sports", table.sports(), &filters.sport);

    if let Some(directive) = table.sort().directive() {
        let _ = write!(html, r#"<input type="hidden" name="sort" value="{directive}">"#);
    }

    html.push_str(r#"<noscript><button type="submit" class="filter-apply">Apply</button></noscript>"#);
    let _ = write!(
        html,
        r#"<a class="clear-filters" href="{}" data-replace>{CLEAR_GLYPH} Clear filters</a>"#,
        escape(&to_href(&table.query_without_filters()))
    );
    html.push_str("</form>");
}

/// A select whose selected option reflects `current`.
///
/// A value missing from `options` (e.g. typed into the URL) is still shown.
fn render_select(html: &mut String, name: &str, all_label: &str, options: &[String], current: &str) {
    let _ = write!(
        html,
        r#"<select name="{name}" class="filter-select" aria-label="Filter by {name}">"#
    );
    let _ = write!(
        html,
        r#"<option value=""{}>{all_label}</option>"#,
        selected(current.is_empty())
    );

    let missing = !current.is_empty() && !options.iter().any(|o| o == current);
    let extra = missing.then_some(current);

    for option in options.iter().map(String::as_str).chain(extra) {
        let value = escape(option);
        let _ = write!(
            html,
            r#"<option value="{value}"{}>{value}</option>"#,
            selected(option == current)
        );
    }
    html.push_str("</select>");
}

const fn selected(is_selected: bool) -> &'static str {
    if is_selected { " selected" } else { "" }
}

// ============================================================================
// Head & Body
// ============================================================================

fn render_head<L: Location>(html: &mut String, table: &ResourceTable<L>) {
    let sort = table.sort();

    html.push_str("<thead><tr>");
    for column in ColumnId::ALL {
        let direction = sort.direction_of(column);
        match direction {
            Some(d) => {
                let _ = write!(html, r#"<th aria-sort="{}">"#, d.aria());
            }
            None => html.push_str("<th>"),
        }

        if column.is_sortable() {
            let _ = write!(
                html,
                r#"<a class="sortable" href="{}" data-column="{column}" data-replace>{}"#,
                escape(&to_href(&table.query_with_toggled(column))),
                column.header()
            );
            if let Some(d) = direction {
                let _ = write!(html, r#"<span class="sort-indicator"> {}</span>"#, d.glyph());
            }
            html.push_str("</a>");
        } else {
            html.push_str(column.header());
        }
        html.push_str("</th>");
    }
    html.push_str("</tr></thead>");
}

fn render_body<L: Location>(html: &mut String, table: &ResourceTable<L>) {
    html.push_str("<tbody>");
    for (index, resource, visible) in table.rows_with_visibility() {
        let _ = write!(html, r#"<tr data-index="{index}""#);
        for column in ColumnId::ALL.into_iter().filter(|c| c.is_sortable()) {
            let _ = write!(html, r#" data-{column}="{}""#, escape(column.value(resource)));
        }
        html.push_str(if visible { ">" } else { " hidden>" });

        for column in ColumnId::ALL {
            let value = escape(column.value(resource));
            match column {
                ColumnId::Link => {
                    let _ = write!(
                        html,
                        r#"<td><a href="{value}" target="_blank" rel="noopener noreferrer">{value}</a></td>"#
                    );
                }
                _ => {
                    let _ = write!(html, "<td>{value}</td>");
                }
            }
        }
        html.push_str("</tr>");
    }
    html.push_str("</tbody>");
}

// ============================================================================
// Tests
// ============================================================================
