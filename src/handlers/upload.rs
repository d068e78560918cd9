use axum::extract::Multipart;
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::media;
use crate::middleware::{AdminUser, ApiResponse, ApiResult};

/// POST /api/upload (admin) — multipart form with a `file` part and an
/// optional `folder` override. The buffer is forwarded as-is; no resizing
/// or format checks happen on this side.
pub async fn upload(_admin: AdminUser, mut multipart: Multipart) -> ApiResult<Value> {
    let mut file: Option<(Vec<u8>, String)> = None;
    let mut folder: Option<String> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        ApiError::bad_request(format!("Malformed multipart request: {}", e))
    })? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("file") => {
                let filename = field.file_name().unwrap_or("upload").to_string();
                let data = field.bytes().await.map_err(|e| {
                    ApiError::bad_request(format!("Failed to read file: {}", e))
                })?;
                file = Some((data.to_vec(), filename));
            }
            Some("folder") => {
                folder = field
                    .text()
                    .await
                    .ok()
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty());
            }
            _ => {}
        }
    }

    let (data, filename) = file.ok_or_else(|| ApiError::bad_request("No file provided"))?;
    let result = media::upload_image(data, &filename, folder.as_deref()).await?;

    Ok(ApiResponse::success(json!({
        "url": result.secure_url,
        "publicId": result.public_id,
        "width": result.width,
        "height": result.height,
    }))
    .with_message("File uploaded successfully"))
}
