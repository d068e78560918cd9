use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use serde_json::json;

use crate::listing::Pagination;

/// Wrapper for API responses that adds the `{success, data, pagination?,
/// message?}` envelope every endpoint shares.
#[derive(Debug)]
pub struct ApiResponse<T: Serialize> {
    data: Option<T>,
    pagination: Option<Pagination>,
    message: Option<String>,
    status_code: StatusCode,
}

impl<T: Serialize> ApiResponse<T> {
    /// Successful 200 response with data
    pub fn success(data: T) -> Self {
        Self {
            data: Some(data),
            pagination: None,
            message: None,
            status_code: StatusCode::OK,
        }
    }

    /// 201 Created response
    pub fn created(data: T) -> Self {
        Self {
            status_code: StatusCode::CREATED,
            ..Self::success(data)
        }
    }

    /// Listing response: data plus pagination metadata
    pub fn paginated(data: T, pagination: Pagination) -> Self {
        Self {
            pagination: Some(pagination),
            ..Self::success(data)
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Success response carrying only a message (deletes, status updates)
    pub fn message(message: impl Into<String>) -> ApiResponse<()> {
        ApiResponse {
            data: None,
            pagination: None,
            message: Some(message.into()),
            status_code: StatusCode::OK,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let mut envelope = json!({ "success": true });

        if let Some(data) = self.data {
            match serde_json::to_value(&data) {
                Ok(value) => {
                    envelope["data"] = value;
                }
                Err(e) => {
                    tracing::error!("Failed to serialize response data: {}", e);
                    return (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        Json(json!({
                            "success": false,
                            "message": "Internal server error"
                        })),
                    )
                        .into_response();
                }
            }
        }
        if let Some(pagination) = self.pagination {
            // Pagination is plain-old-data; serialization cannot fail.
            envelope["pagination"] = json!(pagination);
        }
        if let Some(message) = self.message {
            envelope["message"] = json!(message);
        }

        (self.status_code, Json(envelope)).into_response()
    }
}

pub type ApiResult<T> = Result<ApiResponse<T>, crate::error::ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json<T: Serialize>(resp: ApiResponse<T>) -> (StatusCode, serde_json::Value) {
        let response = resp.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn success_envelope_has_data() {
        let (status, body) = body_json(ApiResponse::success(json!({"id": 1}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["id"], 1);
        assert!(body.get("pagination").is_none());
    }

    #[tokio::test]
    async fn paginated_envelope_includes_metadata() {
        let pagination = Pagination::new(2, 12, 25);
        let (_, body) = body_json(ApiResponse::paginated(json!([1, 2]), pagination)).await;
        assert_eq!(body["pagination"]["page"], 2);
        assert_eq!(body["pagination"]["pages"], 3);
        assert_eq!(body["pagination"]["total"], 25);
    }

    #[tokio::test]
    async fn created_sets_201() {
        let (status, _) = body_json(ApiResponse::created(json!({}))).await;
        assert_eq!(status, StatusCode::CREATED);
    }

    #[tokio::test]
    async fn message_only_response() {
        let (status, body) = body_json(ApiResponse::<()>::message("Property deleted successfully")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["message"], "Property deleted successfully");
        assert!(body.get("data").is_none());
    }
}
