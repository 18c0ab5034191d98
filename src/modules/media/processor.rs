use bytes::Bytes;
use image::{codecs::jpeg::JpegEncoder, imageops::FilterType, DynamicImage, GenericImageView};
use tracing::debug;

use crate::{
    api::error,
    modules::media::model::{ImageConfig, ProcessedImage},
};

#[derive(Debug, Clone, Default)]
pub struct ImageProcessor {
    config: ImageConfig,
}

impl ImageProcessor {
    /// Target size fitting inside the configured box, aspect ratio kept.
    /// Images already inside the box keep their size.
    pub fn fit_dimensions(&self, width: u32, height: u32) -> (u32, u32) {
        let (max_w, max_h) = (self.config.max_width, self.config.max_height);
        if width <= max_w && height <= max_h {
            return (width, height);
        }

        let ratio = f64::min(max_w as f64 / width as f64, max_h as f64 / height as f64);
        let w = (width as f64 * ratio).round() as u32;
        let h = (height as f64 * ratio).round() as u32;
        (w.max(1), h.max(1))
    }

    /// Decodes, downscales and re-encodes as JPEG. CPU bound; see [`Self::process_async`].
    pub fn process(&self, data: &[u8]) -> Result<ProcessedImage, error::SystemError> {
        let img = image::load_from_memory(data)?;
        let (orig_w, orig_h) = img.dimensions();
        let (width, height) = self.fit_dimensions(orig_w, orig_h);

        let img = if (width, height) == (orig_w, orig_h) {
            img
        } else {
            img.resize_exact(width, height, FilterType::Triangle)
        };

        let data = self.encode_jpeg(&img)?;
        debug!(orig_w, orig_h, width, height, size = data.len(), "post image processed");

        Ok(ProcessedImage { data, width, height })
    }

    pub async fn process_async(&self, data: Bytes) -> Result<ProcessedImage, error::SystemError> {
        let processor = self.clone();
        tokio::task::spawn_blocking(move || processor.process(&data)).await?
    }

    fn encode_jpeg(&self, img: &DynamicImage) -> Result<Bytes, error::SystemError> {
        let mut buf = Vec::new();
        let mut encoder = JpegEncoder::new_with_quality(&mut buf, self.config.quality);
        encoder.encode_image(&img.to_rgb8())?;
        Ok(Bytes::from(buf))
    }
}
