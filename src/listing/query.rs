use serde_json::{json, Value};

use super::params::{PageParams, RoomFilter};
use super::types::{SortDirection, SqlQuery};

/// Builds the two statements behind every listing endpoint: a COUNT under
/// the accumulated filter and the page slice itself. One builder serves all
/// three entity types; handlers declare which fields mean what.
///
/// Column names only ever come from whitelists inside this crate, never from
/// client input; client values always travel as bind parameters.
pub struct ListingQuery {
    table: &'static str,
    conditions: Vec<String>,
    params: Vec<Value>,
    sort_column: String,
    sort_direction: SortDirection,
    page: PageParams,
}

impl ListingQuery {
    pub fn new(table: &'static str, page: PageParams) -> Self {
        Self {
            table,
            conditions: vec![],
            params: vec![],
            sort_column: "created_at".to_string(),
            sort_direction: SortDirection::Desc,
            page,
        }
    }

    fn next_placeholder(&mut self, value: Value) -> String {
        self.params.push(value);
        format!("${}", self.params.len())
    }

    /// Exact-equality filter, skipped when the value is absent or empty.
    pub fn eq(mut self, column: &'static str, value: Option<&str>) -> Self {
        if let Some(v) = non_empty(value) {
            let p = self.next_placeholder(json!(v));
            self.conditions.push(format!("\"{}\" = {}", column, p));
        }
        self
    }

    /// Boolean flag filter: only `"true"` activates it, anything else is a
    /// no-op (matching the original dropdowns, where unchecked means "all").
    pub fn flag_true(mut self, column: &'static str, value: Option<&str>) -> Self {
        if value == Some("true") {
            self.conditions.push(format!("\"{}\" = TRUE", column));
        }
        self
    }

    /// Explicit boolean filter with a default when the parameter is absent.
    /// Blogs list as published unless `published=false` is requested.
    pub fn flag_default(mut self, column: &'static str, value: Option<&str>, default: bool) -> Self {
        let wanted = match value {
            Some("false") => false,
            Some("true") => true,
            _ => default,
        };
        let p = self.next_placeholder(json!(wanted));
        self.conditions.push(format!("\"{}\" = {}", column, p));
        self
    }

    /// Case-insensitive substring search OR-composed over a fixed field set.
    /// No tokenization and no ranking; membership in the OR clause is the
    /// whole contract.
    pub fn search(mut self, columns: &[&'static str], term: Option<&str>) -> Self {
        if let Some(term) = non_empty(term) {
            let pattern = format!("%{}%", escape_like(term));
            let p = self.next_placeholder(json!(pattern));
            let clause = columns
                .iter()
                .map(|c| format!("\"{}\" ILIKE {}", c, p))
                .collect::<Vec<_>>()
                .join(" OR ");
            self.conditions.push(format!("({})", clause));
        }
        self
    }

    /// Single-column case-insensitive substring filter (property location).
    pub fn ilike(mut self, column: &'static str, value: Option<&str>) -> Self {
        if let Some(v) = non_empty(value) {
            let pattern = format!("%{}%", escape_like(v));
            let p = self.next_placeholder(json!(pattern));
            self.conditions.push(format!("\"{}\" ILIKE {}", column, p));
        }
        self
    }

    /// Inclusive numeric range; each bound applies only when provided and
    /// parsable. Unparsable bounds are dropped rather than coerced to zero.
    pub fn range(mut self, column: &'static str, min: Option<&str>, max: Option<&str>) -> Self {
        if let Some(min) = parse_i64(min) {
            let p = self.next_placeholder(json!(min));
            self.conditions.push(format!("\"{}\" >= {}", column, p));
        }
        if let Some(max) = parse_i64(max) {
            let p = self.next_placeholder(json!(max));
            self.conditions.push(format!("\"{}\" <= {}", column, p));
        }
        self
    }

    /// Dropdown filter with "Any"/"N+" sentinels (bedrooms, bathrooms).
    pub fn rooms(mut self, column: &'static str, value: Option<&str>) -> Self {
        match RoomFilter::parse(value) {
            RoomFilter::None => {}
            RoomFilter::AtLeast(n) => {
                let p = self.next_placeholder(json!(n));
                self.conditions.push(format!("\"{}\" >= {}", column, p));
            }
            RoomFilter::Exactly(n) => {
                let p = self.next_placeholder(json!(n));
                self.conditions.push(format!("\"{}\" = {}", column, p));
            }
        }
        self
    }

    /// Sort by a whitelisted column; anything off the whitelist falls back
    /// to `created_at` rather than erroring the request.
    pub fn sort(
        mut self,
        sort_by: Option<&str>,
        sort_order: Option<&str>,
        whitelist: &[&'static str],
    ) -> Self {
        if let Some(requested) = non_empty(sort_by) {
            if let Some(col) = whitelist.iter().find(|c| **c == requested) {
                self.sort_column = (*col).to_string();
            }
        }
        self.sort_direction = SortDirection::parse(sort_order);
        self
    }

    fn where_clause(&self) -> String {
        if self.conditions.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", self.conditions.join(" AND "))
        }
    }

    /// COUNT(*) under the same filter as the page slice.
    pub fn count_sql(&self) -> SqlQuery {
        SqlQuery {
            sql: format!(
                "SELECT COUNT(*) AS count FROM \"{}\"{}",
                self.table,
                self.where_clause()
            ),
            params: self.params.clone(),
        }
    }

    /// The page slice: filter, whitelisted sort, LIMIT/OFFSET.
    pub fn page_sql(&self) -> SqlQuery {
        SqlQuery {
            sql: format!(
                "SELECT * FROM \"{}\"{} ORDER BY \"{}\" {} LIMIT {} OFFSET {}",
                self.table,
                self.where_clause(),
                self.sort_column,
                self.sort_direction.to_sql(),
                self.page.limit,
                self.page.offset()
            ),
            params: self.params.clone(),
        }
    }

    pub fn page_params(&self) -> PageParams {
        self.page
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

fn parse_i64(value: Option<&str>) -> Option<i64> {
    non_empty(value).and_then(|s| s.parse::<i64>().ok())
}

/// Escape LIKE wildcards so a search for "50%" matches literally.
fn escape_like(term: &str) -> String {
    term.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}
