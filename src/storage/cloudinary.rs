use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::Utc;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use sha1::{Digest, Sha1};
use uuid::Uuid;

use crate::config::CloudinaryConfig;
use crate::storage::MediaStore;

// Image handling is delegated to the host: it enforces the allowed formats
// and applies the delivery transformation.
const ALLOWED_FORMATS: &str = "jpg,png,jpeg,webp";
const TRANSFORMATION: &str = "q_auto/f_auto";

/// Client for the media host's signed upload API.
pub struct CloudinaryClient {
    http: reqwest::Client,
    cloud_name: String,
    api_key: String,
    api_secret: String,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: String,
}

impl CloudinaryClient {
    pub fn new(config: CloudinaryConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            cloud_name: config.cloud_name,
            api_key: config.api_key,
            api_secret: config.api_secret,
        }
    }

    fn upload_url(&self) -> String {
        format!(
            "https://api.cloudinary.com/v1_1/{}/image/upload",
            self.cloud_name
        )
    }
}

#[async_trait]
impl MediaStore for CloudinaryClient {
    async fn upload_image(&self, folder: &str, filename: &str, data: Vec<u8>) -> Result<String> {
        let public_id = Uuid::new_v4().to_string();
        let timestamp = Utc::now().timestamp().to_string();

        let params = [
            ("allowed_formats", ALLOWED_FORMATS),
            ("folder", folder),
            ("public_id", public_id.as_str()),
            ("timestamp", timestamp.as_str()),
            ("transformation", TRANSFORMATION),
        ];
        let signature = sign(&params, &self.api_secret);

        let mut form = Form::new()
            .part("file", Part::bytes(data).file_name(filename.to_string()))
            .text("api_key", self.api_key.clone())
            .text("signature", signature);
        for (key, value) in params {
            form = form.text(key, value.to_string());
        }

        let response = self.http.post(self.upload_url()).multipart(form).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow!("media host returned {status}: {body}"));
        }

        let upload: UploadResponse = response.json().await?;
        tracing::info!(
            "Uploaded image: folder={}, public_id={}, url={}",
            folder,
            public_id,
            upload.secure_url
        );

        Ok(upload.secure_url)
    }
}

/// Signature base string: parameters sorted by key and joined as
/// `key=value` pairs with `&`. `file` and `api_key` are never signed.
fn string_to_sign(params: &[(&str, &str)]) -> String {
    let mut sorted: Vec<&(&str, &str)> = params.iter().collect();
    sorted.sort_by_key(|(key, _)| *key);
    sorted
        .iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join("&")
}

fn sign(params: &[(&str, &str)], api_secret: &str) -> String {
    let mut hasher = Sha1::new();
    hasher.update(string_to_sign(params).as_bytes());
    hasher.update(api_secret.as_bytes());
    hex::encode(hasher.finalize())
}
