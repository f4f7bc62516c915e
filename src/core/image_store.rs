use std::path::Path;

use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};

use crate::config::config::{PLACEHOLDER_HEIGHT, PLACEHOLDER_RGBA, PLACEHOLDER_WIDTH};
use crate::core::decoder;
use crate::core::error::ViewerError;

/// Tightly packed RGBA8 pixels, row stride `width * 4`.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelBuffer {
    image: RgbaImage,
}

impl PixelBuffer {
    pub const CHANNELS: usize = 4;

    /// Solid magenta stand-in for images that fail to decode.
    pub fn placeholder() -> Self {
        Self::from(RgbaImage::from_pixel(
            PLACEHOLDER_WIDTH,
            PLACEHOLDER_HEIGHT,
            Rgba(PLACEHOLDER_RGBA),
        ))
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    pub fn row_stride(&self) -> usize {
        self.width() as usize * Self::CHANNELS
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.image.as_raw()
    }

    /// Triangle-filtered copy at `width` x `height`; each channel, alpha
    /// included, is filtered independently with edge clamping.
    fn resampled(&self, width: u32, height: u32) -> Self {
        if (width, height) == self.dimensions() {
            return self.clone();
        }
        Self::from(imageops::resize(&self.image, width, height, FilterType::Triangle))
    }
}

impl From<RgbaImage> for PixelBuffer {
    fn from(image: RgbaImage) -> Self {
        Self { image }
    }
}

/// The decoded image of one window and its display-sized copy.
///
/// `display` is `None` while the window shows the original at native size.
/// Resizing always starts from `original`, never from a previous resize.
pub struct ImageStore {
    original: PixelBuffer,
    display: Option<PixelBuffer>,
    failed: bool,
    revision: u64,
}

impl ImageStore {
    pub fn new() -> Self {
        Self {
            original: PixelBuffer::placeholder(),
            display: None,
            failed: false,
            revision: 0,
        }
    }

    pub fn load(&mut self, path: &Path) -> Result<&PixelBuffer, ViewerError> {
        // Release the old buffers before decoding the next image.
        self.display = None;
        self.revision += 1;

        match decoder::decode(path) {
            Ok(buffer) => {
                self.original = buffer;
                self.failed = false;
                Ok(&self.original)
            }
            Err(err) if err.is_fatal() => Err(err),
            Err(err) => {
                self.original = PixelBuffer::placeholder();
                self.failed = true;
                Err(err)
            }
        }
    }

    pub fn resize_to(&mut self, width: u32, height: u32) -> &PixelBuffer {
        if self.failed {
            return self.display();
        }
        if width == 0 || height == 0 {
            tracing::debug!(width, height, "ignoring resize to an empty surface");
            return self.display();
        }
        if self.display().dimensions() == (width, height) {
            return self.display();
        }

        self.display = if self.original.dimensions() == (width, height) {
            None
        } else {
            Some(self.original.resampled(width, height))
        };
        self.revision += 1;
        self.display()
    }

    /// The buffer to present: the resized copy if there is one.
    pub fn display(&self) -> &PixelBuffer {
        self.display.as_ref().unwrap_or(&self.original)
    }

    pub fn original(&self) -> &PixelBuffer {
        &self.original
    }

    pub fn is_failed(&self) -> bool {
        self.failed
    }

    /// Bumped whenever `display()` may have changed.
    pub fn revision(&self) -> u64 {
        self.revision
    }
}

impl Default for ImageStore {
    fn default() -> Self {
        Self::new()
    }
}
