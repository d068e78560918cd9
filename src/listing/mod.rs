pub mod params;
pub mod query;
pub mod types;

pub use params::PageParams;
pub use query::ListingQuery;
pub use types::{Pagination, SortDirection, SqlQuery};
