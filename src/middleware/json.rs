use axum::extract::{FromRequest, Request};
use axum::{async_trait, Json};
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// JSON body extractor whose rejection speaks the API's error envelope.
/// The framework's own rejection answers malformed bodies in plain text;
/// every failure here becomes a `{success:false, message}` 400 instead.
pub struct ApiJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(ApiJson(value)),
            Err(rejection) => Err(ApiError::bad_request(rejection.body_text())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::StatusCode;
    use serde_json::Value;

    fn json_request(body: &'static str) -> Request {
        Request::builder()
            .method("POST")
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn malformed_body_is_an_enveloped_bad_request() {
        let err = ApiJson::<Value>::from_request(json_request("{not json"), &())
            .await
            .map(|_| ())
            .unwrap_err();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);

        let body = err.to_json();
        assert_eq!(body["success"], false);
        assert!(body["message"].is_string());
    }

    #[tokio::test]
    async fn missing_content_type_is_also_enveloped() {
        let req = Request::builder()
            .method("POST")
            .body(Body::from(r#"{"ok":true}"#))
            .unwrap();
        let err = ApiJson::<Value>::from_request(req, &())
            .await
            .map(|_| ())
            .unwrap_err();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn valid_body_deserializes() {
        let ApiJson(value) =
            ApiJson::<Value>::from_request(json_request(r#"{"name":"A"}"#), &())
                .await
                .unwrap();
        assert_eq!(value["name"], "A");
    }
}
