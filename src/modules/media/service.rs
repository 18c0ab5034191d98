use std::sync::Arc;

use crate::{
    api::error,
    modules::media::{
        model::{UploadConfig, UploadedFile},
        processor::ImageProcessor,
        storage::ObjectStore,
    },
};

#[derive(Clone)]
pub struct MediaService {
    store: Arc<dyn ObjectStore + Send + Sync>,
    processor: ImageProcessor,
    config: UploadConfig,
}

impl MediaService {
    pub fn new(
        store: Arc<dyn ObjectStore + Send + Sync>,
        processor: ImageProcessor,
        config: UploadConfig,
    ) -> Self {
        Self { store, processor, config }
    }

    pub fn with_defaults(store: Arc<dyn ObjectStore + Send + Sync>) -> Self {
        Self::new(store, ImageProcessor::default(), UploadConfig::default())
    }

    pub fn upload_config(&self) -> &UploadConfig {
        &self.config
    }

    fn validate_file(&self, file: &UploadedFile) -> Result<(), error::SystemError> {
        if file.bytes.len() > self.config.max_file_size {
            return Err(error::SystemError::bad_request(format!(
                "File '{}' exceeds maximum allowed size of {} bytes",
                file.original_name, self.config.max_file_size
            )));
        }

        if !self.config.allowed_mime_types.iter().any(|m| m == &file.mime_type) {
            return Err(error::SystemError::bad_request(format!(
                "File type '{}' is not allowed",
                file.mime_type
            )));
        }

        Ok(())
    }

    /// Object path for the `index`-th image of a post. The file name is
    /// percent-encoded so the public URL stays valid.
    pub fn object_path(timestamp_millis: i64, index: usize, original_name: &str) -> String {
        let name = original_name.replace(['/', '\\'], "_");
        format!("posts/{timestamp_millis}_{index}_{}", urlencoding::encode(&name))
    }

    /// Processes and uploads the images of one post, returning their public URLs.
    ///
    /// Only the first `max_files` files are considered. Size and type are
    /// checked for all of them before any work starts; a file that then fails
    /// to decode or upload is skipped.
    pub async fn upload_post_images(
        &self,
        files: Vec<UploadedFile>,
    ) -> Result<Vec<String>, error::SystemError> {
        let files: Vec<UploadedFile> = files.into_iter().take(self.config.max_files).collect();
        for file in &files {
            self.validate_file(file)?;
        }

        let mut urls = Vec::with_capacity(files.len());
        for (index, file) in files.into_iter().enumerate() {
            let processed = match self.processor.process_async(file.bytes).await {
                Ok(p) => p,
                Err(e) => {
                    log::warn!("Skipping image '{}': {:?}", file.original_name, e);
                    continue;
                }
            };

            let path = Self::object_path(
                chrono::Utc::now().timestamp_millis(),
                index,
                &file.original_name,
            );
            match self.store.upload(&path, processed.data, "image/jpeg").await {
                Ok(url) => urls.push(url),
                Err(e) => log::warn!("Failed to upload image '{}': {:?}", path, e),
            }
        }

        Ok(urls)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::{png_bytes, MemoryObjectStore};
    use bytes::Bytes;

    fn file(name: &str, mime: &str, bytes: Bytes) -> UploadedFile {
        UploadedFile { original_name: name.into(), mime_type: mime.into(), bytes }
    }

    #[test]
    fn object_path_layout() {
        assert_eq!(MediaService::object_path(1700000000000, 2, "salon.png"), "posts/1700000000000_2_salon.png");
        assert_eq!(MediaService::object_path(1, 0, "a/b.png"), "posts/1_0_a_b.png");
        assert_eq!(
            MediaService::object_path(1, 1, "ma photo #1?.png"),
            "posts/1_1_ma%20photo%20%231%3F.png"
        );
        assert_eq!(MediaService::object_path(1, 2, "séjour.jpg"), "posts/1_2_s%C3%A9jour.jpg");
    }

    #[tokio::test]
    async fn uploads_at_most_four_images() {
        let store = MemoryObjectStore::default();
        let svc = MediaService::with_defaults(Arc::new(store.clone()));
        let files = (0..6)
            .map(|i| file(&format!("p{i}.png"), "image/png", Bytes::from(png_bytes(40, 20))))
            .collect();

        let urls = svc.upload_post_images(files).await.unwrap();
        assert_eq!(urls.len(), 4);
        assert!(urls[3].contains("_3_p3.png"));
        assert_eq!(store.objects().len(), 4);
    }

    #[tokio::test]
    async fn undecodable_files_are_skipped() {
        let store = MemoryObjectStore::default();
        let svc = MediaService::with_defaults(Arc::new(store.clone()));
        let files = vec![
            file("broken.jpg", "image/jpeg", Bytes::from_static(b"nope")),
            file("ok.png", "image/png", Bytes::from(png_bytes(10, 10))),
        ];

        let urls = svc.upload_post_images(files).await.unwrap();
        assert_eq!(urls.len(), 1);
        assert!(urls[0].ends_with("_1_ok.png"));
    }

    #[tokio::test]
    async fn rejects_non_images_and_oversized_files() {
        let svc = MediaService::with_defaults(Arc::new(MemoryObjectStore::default()));

        let err = svc
            .upload_post_images(vec![file("cv.pdf", "application/pdf", Bytes::from_static(b"%PDF"))])
            .await
            .unwrap_err();
        assert!(matches!(err, error::SystemError::BadRequest(_)));

        let huge = Bytes::from(vec![0u8; 10 * 1024 * 1024 + 1]);
        let err = svc.upload_post_images(vec![file("big.png", "image/png", huge)]).await.unwrap_err();
        assert!(matches!(err, error::SystemError::BadRequest(_)));
    }
}
