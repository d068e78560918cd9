use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn to_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }

    /// Anything other than an explicit "asc" sorts descending, newest first.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some(s) if s.eq_ignore_ascii_case("asc") => SortDirection::Asc,
            _ => SortDirection::Desc,
        }
    }
}

/// A rendered SQL statement plus its bind parameters.
#[derive(Debug, Clone)]
pub struct SqlQuery {
    pub sql: String,
    pub params: Vec<Value>,
}

/// Pagination metadata returned alongside every listing. `total` comes from
/// an independent COUNT under the same filter, so it is always consistent
/// with the page slice.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct Pagination {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub pages: i64,
}

impl Pagination {
    pub fn new(page: i64, limit: i64, total: i64) -> Self {
        let pages = if limit > 0 {
            (total + limit - 1) / limit
        } else {
            0
        };
        Self {
            page,
            limit,
            total,
            pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pages_is_ceiling_of_total_over_limit() {
        assert_eq!(Pagination::new(1, 12, 0).pages, 0);
        assert_eq!(Pagination::new(1, 12, 12).pages, 1);
        assert_eq!(Pagination::new(1, 12, 13).pages, 2);
        assert_eq!(Pagination::new(1, 20, 59).pages, 3);
    }

    #[test]
    fn sort_direction_defaults_to_desc() {
        assert_eq!(SortDirection::parse(None), SortDirection::Desc);
        assert_eq!(SortDirection::parse(Some("desc")), SortDirection::Desc);
        assert_eq!(SortDirection::parse(Some("ASC")), SortDirection::Asc);
        assert_eq!(SortDirection::parse(Some("sideways")), SortDirection::Desc);
    }
}
