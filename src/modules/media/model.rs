use bytes::Bytes;

/// Limits applied to uploaded post images before any decoding happens.
#[derive(Debug, Clone)]
pub struct UploadConfig {
    pub max_file_size: usize,
    pub allowed_mime_types: Vec<String>,
    pub max_files: usize,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_file_size: 10 * 1024 * 1024,
            allowed_mime_types: vec![
                "image/jpeg".to_string(),
                "image/png".to_string(),
                "image/gif".to_string(),
                "image/webp".to_string(),
            ],
            max_files: crate::constants::MAX_IMAGES_PER_POST,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ImageConfig {
    pub max_width: u32,
    pub max_height: u32,
    pub quality: u8,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self { max_width: 1200, max_height: 800, quality: 80 }
    }
}

/// One file part of a photo post, as read from the multipart body.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub original_name: String,
    pub mime_type: String,
    pub bytes: Bytes,
}

#[derive(Debug)]
pub struct ProcessedImage {
    pub data: Bytes,
    pub width: u32,
    pub height: u32,
}
