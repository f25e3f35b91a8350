//! Image decoding.
//!
//! Frames only ever ask for "decode this path"; the `ImageDecoder` trait is
//! the seam that lets tests count and fake those calls.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use image::{GenericImageView, ImageError};
use thiserror::Error;

/// Extensions the codec is built with (drop highlight only; any path is accepted)
pub const SUPPORTED_IMAGE_EXTENSIONS: &[&str] =
    &["jpg", "jpeg", "png", "webp", "gif", "bmp", "ico", "tiff", "tif"];

/// Default cap on texture side length; larger images are downscaled for
/// display but keep their intrinsic dimensions for fitting.
pub const DEFAULT_MAX_TEXTURE_SIDE: u32 = 4096;

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("image not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("unsupported image format {}: {}", .0.display(), .1)]
    Unsupported(PathBuf, String),
    #[error("corrupt image data in {}: {}", .0.display(), .1)]
    Corrupt(PathBuf, String),
    #[error("failed to read {}: {}", .0.display(), .1)]
    Io(PathBuf, #[source] std::io::Error),
}

/// Check if a file has a supported image extension
pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| SUPPORTED_IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// A decoded bitmap ready for upload
#[derive(Clone)]
pub struct DecodedImage {
    pub path: PathBuf,
    /// Intrinsic pixel size of the source file
    pub width: u32,
    pub height: u32,
    /// RGBA8 pixels, possibly downscaled to `pixel_size`
    pub pixels: Arc<[u8]>,
    pub pixel_size: [usize; 2],
}

impl DecodedImage {
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn size_vec2(&self) -> egui::Vec2 {
        egui::vec2(self.width as f32, self.height as f32)
    }
}

impl std::fmt::Debug for DecodedImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DecodedImage")
            .field("path", &self.path)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("pixel_size", &self.pixel_size)
            .finish()
    }
}

/// Codec service: path in, bitmap with known dimensions out
pub trait ImageDecoder {
    fn decode(&self, path: &Path) -> Result<DecodedImage, DecodeError>;
}

/// Decoder backed by the `image` crate
#[derive(Debug, Clone)]
pub struct FileDecoder {
    max_texture_side: u32,
}

impl Default for FileDecoder {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_TEXTURE_SIDE)
    }
}

impl FileDecoder {
    pub fn new(max_texture_side: u32) -> Self {
        Self { max_texture_side }
    }
}

impl ImageDecoder for FileDecoder {
    fn decode(&self, path: &Path) -> Result<DecodedImage, DecodeError> {
        use image::imageops::FilterType;

        let img = image::open(path).map_err(|e| classify(path, e))?;
        let (width, height) = img.dimensions();

        let img = if self.max_texture_side > 0
            && (width > self.max_texture_side || height > self.max_texture_side)
        {
            // Preserve aspect ratio; `resize` interprets (max_width, max_height).
            img.resize(self.max_texture_side, self.max_texture_side, FilterType::Triangle)
        } else {
            img
        };

        let rgba = img.to_rgba8();
        let (tex_w, tex_h) = rgba.dimensions();

        Ok(DecodedImage {
            path: path.to_path_buf(),
            width,
            height,
            pixels: rgba.into_raw().into(),
            pixel_size: [tex_w as usize, tex_h as usize],
        })
    }
}

fn classify(path: &Path, err: ImageError) -> DecodeError {
    match err {
        ImageError::IoError(io) if io.kind() == std::io::ErrorKind::NotFound => {
            DecodeError::NotFound(path.to_path_buf())
        }
        ImageError::IoError(io) => DecodeError::Io(path.to_path_buf(), io),
        ImageError::Unsupported(e) => DecodeError::Unsupported(path.to_path_buf(), e.to_string()),
        other => DecodeError::Corrupt(path.to_path_buf(), other.to_string()),
    }
}
