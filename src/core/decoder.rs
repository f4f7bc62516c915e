use std::path::Path;

use image::error::LimitErrorKind;
use image::{ImageError, ImageReader};

use crate::core::error::ViewerError;
use crate::core::image_format::SupportedFormat;
use crate::core::image_store::PixelBuffer;

/// Decodes `path` into an RGBA8 buffer.
///
/// The format is sniffed from the file content first; the extension is only
/// consulted when sniffing fails, so a PNG saved as `.jpg` still opens.
pub fn decode(path: &Path) -> Result<PixelBuffer, ViewerError> {
    let decode_error = |source: ImageError| classify(path, source);

    let reader = ImageReader::open(path).map_err(|e| decode_error(ImageError::IoError(e)))?;
    let mut reader = reader
        .with_guessed_format()
        .map_err(|e| decode_error(ImageError::IoError(e)))?;

    if reader.format().is_none() {
        if let Some(format) = SupportedFormat::from_path(path).and_then(|f| f.decoder_format()) {
            reader.set_format(format);
        }
    }

    let img = reader.decode().map_err(decode_error)?;
    tracing::debug!(
        path = %path.display(),
        width = img.width(),
        height = img.height(),
        "decoded image"
    );

    Ok(PixelBuffer::from(img.to_rgba8()))
}

fn classify(path: &Path, source: ImageError) -> ViewerError {
    match &source {
        ImageError::Limits(limit) if matches!(limit.kind(), LimitErrorKind::InsufficientMemory) => {
            ViewerError::OutOfMemory {
                path: path.to_path_buf(),
            }
        }
        _ => ViewerError::Decode {
            path: path.to_path_buf(),
            source,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};
    use std::fs;

    #[test]
    fn decodes_png_content_regardless_of_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("really-a-png.gif");
        RgbaImage::from_pixel(3, 2, Rgba([1, 2, 3, 4]))
            .save_with_format(&path, image::ImageFormat::Png)
            .unwrap();

        let buffer = decode(&path).unwrap();

        assert_eq!((buffer.width(), buffer.height()), (3, 2));
        assert_eq!(&buffer.as_bytes()[..4], &[1, 2, 3, 4]);
    }

    #[test]
    fn garbage_is_a_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.png");
        fs::write(&path, b"definitely not an image").unwrap();

        let err = decode(&path).unwrap_err();
        assert!(matches!(err, ViewerError::Decode { .. }));
        assert!(!err.is_fatal());
    }

    #[test]
    fn missing_file_is_a_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = decode(&dir.path().join("nope.png")).unwrap_err();
        assert!(matches!(err, ViewerError::Decode { .. }));
    }

    #[test]
    fn insufficient_memory_is_fatal() {
        let limit = image::error::LimitError::from_kind(LimitErrorKind::InsufficientMemory);
        let err = classify(Path::new("huge.png"), ImageError::Limits(limit));
        assert!(err.is_fatal());
    }
}
