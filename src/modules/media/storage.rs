use bytes::Bytes;

use crate::api::error;

/// Bucket-scoped object storage.
#[async_trait::async_trait]
pub trait ObjectStore {
    /// Uploads (overwriting any existing object) and returns the public URL.
    async fn upload(
        &self,
        path: &str,
        data: Bytes,
        content_type: &str,
    ) -> Result<String, error::SystemError>;

    fn public_url(&self, path: &str) -> String;
}

/// Client for the hosted storage REST API.
#[derive(Clone)]
pub struct StorageClient {
    base_url: String,
    api_key: String,
    bucket: String,
    http_client: reqwest::Client,
}

impl StorageClient {
    pub fn new(base_url: &str, api_key: &str, bucket: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            bucket: bucket.to_string(),
            http_client: reqwest::Client::new(),
        }
    }

    fn object_url(&self, path: &str) -> String {
        format!("{}/storage/v1/object/{}/{}", self.base_url, self.bucket, path)
    }
}

#[async_trait::async_trait]
impl ObjectStore for StorageClient {
    async fn upload(
        &self,
        path: &str,
        data: Bytes,
        content_type: &str,
    ) -> Result<String, error::SystemError> {
        self.http_client
            .post(self.object_url(path))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("apikey", &self.api_key)
            .header("Content-Type", content_type)
            .header("x-upsert", "true")
            .body(data)
            .send()
            .await?
            .error_for_status()?;

        Ok(self.public_url(path))
    }

    fn public_url(&self, path: &str) -> String {
        format!("{}/storage/v1/object/public/{}/{}", self.base_url, self.bucket, path)
    }
}
