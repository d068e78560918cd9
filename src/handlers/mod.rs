// HTTP route handlers, one module per resource.
pub mod auth;
pub mod blogs;
pub mod dashboard;
pub mod inquiries;
pub mod properties;
pub mod upload;

use uuid::Uuid;

use crate::error::ApiError;

/// Path ids arrive as strings; anything that is not a UUID is a client
/// error, not a lookup miss.
pub(crate) fn parse_id(raw: &str, message: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::bad_request(message))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_id_is_bad_request() {
        assert!(parse_id("123e4567-e89b-12d3-a456-426614174000", "Invalid id").is_ok());
        let err = parse_id("not-a-uuid", "Invalid property ID").unwrap_err();
        assert_eq!(err.status_code(), axum::http::StatusCode::BAD_REQUEST);
        assert_eq!(err.message(), "Invalid property ID");
    }
}
