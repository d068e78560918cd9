use crate::config;

/// Resolved page/limit pair. Raw query strings parse with explicit defaults
/// and bounds instead of silently falling through on garbage input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageParams {
    pub page: i64,
    pub limit: i64,
}

impl PageParams {
    pub fn resolve(page: Option<&str>, limit: Option<&str>, default_limit: i64) -> Self {
        let max_limit = config::config().pagination.max_limit;
        Self::resolve_with_max(page, limit, default_limit, max_limit)
    }

    pub fn resolve_with_max(
        page: Option<&str>,
        limit: Option<&str>,
        default_limit: i64,
        max_limit: i64,
    ) -> Self {
        let page = parse_positive(page).unwrap_or(1);
        let limit = parse_positive(limit)
            .unwrap_or(default_limit)
            .min(max_limit);
        Self { page, limit }
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.limit
    }
}

fn parse_positive(raw: Option<&str>) -> Option<i64> {
    raw.and_then(|s| s.trim().parse::<i64>().ok())
        .filter(|n| *n >= 1)
}

/// Bedroom/bathroom dropdown values. `"Any"` and unparsable input mean no
/// filter; a trailing `+` ("5+", "4+") means greater-or-equal; a bare
/// integer is exact equality.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RoomFilter {
    None,
    AtLeast(i64),
    Exactly(i64),
}

impl RoomFilter {
    pub fn parse(raw: Option<&str>) -> Self {
        let raw = match raw.map(str::trim) {
            Some(s) if !s.is_empty() && !s.eq_ignore_ascii_case("any") => s,
            _ => return RoomFilter::None,
        };

        if let Some(prefix) = raw.strip_suffix('+') {
            return match prefix.parse::<i64>() {
                Ok(n) => RoomFilter::AtLeast(n),
                Err(_) => RoomFilter::None,
            };
        }

        match raw.parse::<i64>() {
            Ok(n) => RoomFilter::Exactly(n),
            Err(_) => RoomFilter::None,
        }
    }
}
