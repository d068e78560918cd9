use serde_json::Value;
use sqlx::{self, postgres::PgArguments, FromRow, PgPool, Row};

use crate::database::manager::DatabaseError;
use crate::listing::{ListingQuery, Pagination};

/// Runs a [`ListingQuery`] against the pool: an independent COUNT first,
/// then the page slice, so the returned pagination metadata always agrees
/// with the filter.
pub async fn fetch_page<T>(
    pool: &PgPool,
    query: &ListingQuery,
) -> Result<(Vec<T>, Pagination), DatabaseError>
where
    T: for<'r> FromRow<'r, sqlx::postgres::PgRow> + Send + Unpin,
{
    let count_sql = query.count_sql();
    let mut count_query = sqlx::query(&count_sql.sql);
    for p in count_sql.params.iter() {
        count_query = bind_param_query(count_query, p);
    }
    let row = count_query.fetch_one(pool).await?;
    let total: i64 = row.try_get("count")?;

    let page_sql = query.page_sql();
    let mut page_query = sqlx::query_as::<_, T>(&page_sql.sql);
    for p in page_sql.params.iter() {
        page_query = bind_param_query_as(page_query, p);
    }
    let rows = page_query.fetch_all(pool).await?;

    let page = query.page_params();
    Ok((rows, Pagination::new(page.page, page.limit, total)))
}

fn bind_param_query<'q>(
    q: sqlx::query::Query<'q, sqlx::Postgres, PgArguments>,
    v: &'q Value,
) -> sqlx::query::Query<'q, sqlx::Postgres, PgArguments> {
    match v {
        Value::Null => {
            let none: Option<String> = None;
            q.bind(none)
        }
        Value::Bool(b) => q.bind(*b),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                q.bind(i)
            } else if let Some(f) = n.as_f64() {
                q.bind(f)
            } else {
                q.bind(n.to_string())
            }
        }
        Value::String(s) => q.bind(s),
        // Listing filters only ever bind scalars.
        other => q.bind(other.to_string()),
    }
}

fn bind_param_query_as<'q, O>(
    q: sqlx::query::QueryAs<'q, sqlx::Postgres, O, PgArguments>,
    v: &'q Value,
) -> sqlx::query::QueryAs<'q, sqlx::Postgres, O, PgArguments>
where
    O: for<'r> FromRow<'r, sqlx::postgres::PgRow>,
{
    match v {
        Value::Null => {
            let none: Option<String> = None;
            q.bind(none)
        }
        Value::Bool(b) => q.bind(*b),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                q.bind(i)
            } else if let Some(f) = n.as_f64() {
                q.bind(f)
            } else {
                q.bind(n.to_string())
            }
        }
        Value::String(s) => q.bind(s),
        other => q.bind(other.to_string()),
    }
}
