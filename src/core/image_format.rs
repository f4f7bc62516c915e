use std::path::Path;

/// Formats the viewer recognises by file extension.
///
/// Not every recognised format has a decoder; `Psd` and `Pic` files are listed
/// and browsed but fall back to the placeholder when opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupportedFormat {
    Jpeg,
    Png,
    Bmp,
    Tga,
    Psd,
    Gif,
    Hdr,
    Pic,
    Pnm,
}

impl SupportedFormat {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "jpg" | "jpeg" => Some(SupportedFormat::Jpeg),
            "png" => Some(SupportedFormat::Png),
            "bmp" => Some(SupportedFormat::Bmp),
            "tga" => Some(SupportedFormat::Tga),
            "psd" => Some(SupportedFormat::Psd),
            "gif" => Some(SupportedFormat::Gif),
            "hdr" => Some(SupportedFormat::Hdr),
            "pic" => Some(SupportedFormat::Pic),
            "pnm" | "pgm" => Some(SupportedFormat::Pnm),
            _ => None,
        }
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }

    pub fn is_supported(path: &Path) -> bool {
        Self::from_path(path).is_some()
    }

    /// The `image` crate decoder used when content sniffing can't tell.
    pub fn decoder_format(self) -> Option<image::ImageFormat> {
        match self {
            SupportedFormat::Jpeg => Some(image::ImageFormat::Jpeg),
            SupportedFormat::Png => Some(image::ImageFormat::Png),
            SupportedFormat::Bmp => Some(image::ImageFormat::Bmp),
            SupportedFormat::Tga => Some(image::ImageFormat::Tga),
            SupportedFormat::Gif => Some(image::ImageFormat::Gif),
            SupportedFormat::Hdr => Some(image::ImageFormat::Hdr),
            SupportedFormat::Pnm => Some(image::ImageFormat::Pnm),
            SupportedFormat::Psd | SupportedFormat::Pic => None,
        }
    }

    pub fn supported_extensions() -> &'static [&'static str] {
        &[
            "jpg", "jpeg", "png", "bmp", "tga", "psd", "gif", "hdr", "pic", "pnm", "pgm",
        ]
    }
}
