use std::io::Cursor;

use ::image::imageops::FilterType;
use ::image::ImageFormat;

use crate::errors::ImageError;

pub const THUMBNAIL_WIDTH: u32 = 120;
pub const THUMBNAIL_HEIGHT: u32 = 160;

/// Turns an uploaded picture into the stored thumbnail.
pub trait ImageProcessor: Send + Sync {
    fn resize(&self, bytes: &[u8], width: u32, height: u32) -> Result<Vec<u8>, ImageError>;
}

/// Scales to the exact target size, ignoring aspect ratio, and encodes PNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct PngThumbnailer;

impl ImageProcessor for PngThumbnailer {
    fn resize(&self, bytes: &[u8], width: u32, height: u32) -> Result<Vec<u8>, ImageError> {
        let img = ::image::load_from_memory(bytes).map_err(ImageError::Decode)?;
        let resized = img.resize_exact(width, height, FilterType::Triangle);

        let mut buffer = Vec::new();
        resized
            .write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)
            .map_err(ImageError::Encode)?;
        Ok(buffer)
    }
}
