use chrono::Utc;
use serde::Deserialize;
use sha2::{Digest, Sha256};
use thiserror::Error;
use tracing::error;

use crate::config;

/// Upload API host; the cloud name and resource type complete the path.
const UPLOAD_BASE: &str = "https://api.cloudinary.com/v1_1";

#[derive(Debug, Error)]
pub enum MediaError {
    #[error("Media provider credentials not configured")]
    NotConfigured,

    #[error("No file provided")]
    MissingFile,

    #[error("File of {size} bytes exceeds maximum of {max}")]
    FileTooLarge { size: usize, max: usize },

    #[error("Provider request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Provider rejected upload ({status}): {body}")]
    Provider { status: u16, body: String },
}

/// Provider response for a stored image.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadResult {
    pub public_id: String,
    pub secure_url: String,
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub height: u32,
    #[serde(default)]
    pub format: String,
    #[serde(default)]
    pub bytes: u64,
}

/// Forward a file buffer to the image host and return its public URL and
/// identifier. No retry and no chunking; a provider failure fails the
/// request.
pub async fn upload_image(
    data: Vec<u8>,
    filename: &str,
    folder: Option<&str>,
) -> Result<UploadResult, MediaError> {
    let media = &config::config().media;
    // Payload checks answer before the credential check: an empty or
    // oversized file is the client's problem whether or not the provider
    // is configured.
    if data.is_empty() {
        return Err(MediaError::MissingFile);
    }
    if data.len() > media.max_upload_bytes {
        return Err(MediaError::FileTooLarge {
            size: data.len(),
            max: media.max_upload_bytes,
        });
    }
    if media.cloud_name.is_empty() || media.api_key.is_empty() || media.api_secret.is_empty() {
        return Err(MediaError::NotConfigured);
    }

    let folder = folder.unwrap_or(&media.default_folder).to_string();
    let timestamp = Utc::now().timestamp().to_string();
    let signature = sign_request(
        &[("folder", &folder), ("timestamp", &timestamp)],
        &media.api_secret,
    );

    let part = reqwest::multipart::Part::bytes(data).file_name(filename.to_string());
    let form = reqwest::multipart::Form::new()
        .part("file", part)
        .text("api_key", media.api_key.clone())
        .text("timestamp", timestamp)
        .text("folder", folder)
        .text("signature", signature);

    let url = format!("{}/{}/image/upload", UPLOAD_BASE, media.cloud_name);
    let response = reqwest::Client::new().post(&url).multipart(form).send().await?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        error!("Image upload rejected by provider ({}): {}", status, body);
        return Err(MediaError::Provider {
            status: status.as_u16(),
            body,
        });
    }

    Ok(response.json::<UploadResult>().await?)
}

/// SHA-256 signature over the alphabetically ordered parameter string with
/// the API secret appended, hex encoded, per the provider's signing scheme.
fn sign_request(params: &[(&str, &str)], api_secret: &str) -> String {
    let payload = signing_payload(params, api_secret);
    let digest = Sha256::digest(payload.as_bytes());
    hex_encode(&digest)
}

fn signing_payload(params: &[(&str, &str)], api_secret: &str) -> String {
    let mut sorted: Vec<&(&str, &str)> = params.iter().collect();
    sorted.sort_by_key(|(k, _)| *k);
    let joined = sorted
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&");
    format!("{}{}", joined, api_secret)
}

fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}
