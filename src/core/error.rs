use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ViewerError {
    #[error("{path}: not a supported image")]
    UnsupportedExtension { path: PathBuf },

    #[error("failed to decode {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("failed to open directory {path}: {source}")]
    DirectoryOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("out of memory decoding {path}")]
    OutOfMemory { path: PathBuf },
}

impl ViewerError {
    /// Whether the process can keep running after this error.
    pub fn is_fatal(&self) -> bool {
        matches!(self, ViewerError::OutOfMemory { .. })
    }
}
