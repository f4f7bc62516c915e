use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::error::ViewerError;
use crate::core::image_format::SupportedFormat;

/// A command-line path split into the directory to browse and the file in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPath {
    pub directory: PathBuf,
    pub filename: OsString,
    pub supported: bool,
}

impl ResolvedPath {
    pub fn path(&self) -> PathBuf {
        self.directory.join(&self.filename)
    }

    pub fn into_supported(self) -> Result<Self, ViewerError> {
        if self.supported {
            Ok(self)
        } else {
            Err(ViewerError::UnsupportedExtension { path: self.path() })
        }
    }
}

pub struct PathResolver;

impl PathResolver {
    /// Never fails: unsupported extensions, missing files and non-files come
    /// back with `supported == false`.
    pub fn resolve(path: &Path) -> ResolvedPath {
        let is_file = fs::metadata(path).map(|m| m.is_file()).unwrap_or(false);

        // Only the directory is canonicalized. The file keeps the name it was
        // opened under, so a symlink is browsed among its own siblings.
        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let directory = if is_file {
            fs::canonicalize(&parent).unwrap_or(parent)
        } else {
            parent
        };
        let filename = path.file_name().map(OsString::from).unwrap_or_default();
        let supported = is_file && SupportedFormat::is_supported(path);

        if !supported {
            tracing::debug!(path = %path.display(), is_file, "path is not a supported image");
        }

        ResolvedPath {
            directory,
            filename,
            supported,
        }
    }
}
