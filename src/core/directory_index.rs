use std::ffi::{OsStr, OsString};
use std::fs;
use std::path::Path;

use crate::core::error::ViewerError;
use crate::core::image_format::SupportedFormat;

/// Supported image filenames of one directory in ordinal byte order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectoryListing {
    filenames: Vec<OsString>,
}

impl DirectoryListing {
    pub fn len(&self) -> usize {
        self.filenames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filenames.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&OsStr> {
        self.filenames.get(index).map(OsString::as_os_str)
    }
}

pub struct DirectoryIndex;

impl DirectoryIndex {
    /// Lists the directory, or returns an empty listing if it can't be opened.
    pub fn build(directory: &Path) -> DirectoryListing {
        Self::try_build(directory).unwrap_or_else(|err| {
            tracing::warn!(error = %err, "directory listing unavailable, navigation disabled");
            DirectoryListing::default()
        })
    }

    pub fn try_build(directory: &Path) -> Result<DirectoryListing, ViewerError> {
        let entries = fs::read_dir(directory).map_err(|source| ViewerError::DirectoryOpen {
            path: directory.to_path_buf(),
            source,
        })?;

        // DirEntry::file_type does not follow symlinks, so links are skipped.
        let mut filenames: Vec<OsString> = entries
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().map(|t| t.is_file()).unwrap_or(false))
            .map(|entry| entry.file_name())
            .filter(|name| SupportedFormat::is_supported(Path::new(name)))
            .collect();

        filenames.sort_by(|a, b| a.as_encoded_bytes().cmp(b.as_encoded_bytes()));

        tracing::debug!(
            directory = %directory.display(),
            images = filenames.len(),
            "built directory listing"
        );
        Ok(DirectoryListing { filenames })
    }

    pub fn locate(listing: &DirectoryListing, filename: &OsStr) -> Option<usize> {
        listing.filenames.iter().position(|name| name == filename)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(dir: &Path, name: &str) {
        fs::write(dir.join(name), b"").unwrap();
    }

    fn names(listing: &DirectoryListing) -> Vec<String> {
        (0..listing.len())
            .filter_map(|index| listing.get(index))
            .map(|n| n.to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn keeps_only_supported_extensions_in_ordinal_order() {
        let dir = tempfile::tempdir().unwrap();
        for name in [
            "b.jpg", "a.png", "c.gif", "readme.txt", "img10.jpg", "img2.jpg", "UP.JPG",
            "noext", "scan.PGM",
        ] {
            touch(dir.path(), name);
        }

        let listing = DirectoryIndex::build(dir.path());

        assert_eq!(
            names(&listing),
            ["UP.JPG", "a.png", "b.jpg", "c.gif", "img10.jpg", "img2.jpg", "scan.PGM"]
        );
    }

    #[test]
    fn directories_are_excluded() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("folder.png")).unwrap();
        touch(dir.path(), "real.png");

        assert_eq!(names(&DirectoryIndex::build(dir.path())), ["real.png"]);
    }

    #[cfg(unix)]
    #[test]
    fn symlinks_are_excluded() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "target.png");
        std::os::unix::fs::symlink(dir.path().join("target.png"), dir.path().join("link.png"))
            .unwrap();

        assert_eq!(names(&DirectoryIndex::build(dir.path())), ["target.png"]);
    }

    #[test]
    fn repeated_builds_are_stable() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["z.bmp", "m.tga", "a.hdr", "Q.psd"] {
            touch(dir.path(), name);
        }

        let first = DirectoryIndex::build(dir.path());
        let second = DirectoryIndex::build(dir.path());
        assert_eq!(first, second);
    }

    #[test]
    fn missing_directory_yields_empty_listing() {
        let dir = tempfile::tempdir().unwrap();
        let gone = dir.path().join("gone");

        assert!(DirectoryIndex::build(&gone).is_empty());
        assert!(matches!(
            DirectoryIndex::try_build(&gone),
            Err(ViewerError::DirectoryOpen { .. })
        ));
    }

    #[test]
    fn locate_finds_exact_name_only() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["a.png", "b.jpg", "c.gif"] {
            touch(dir.path(), name);
        }
        let listing = DirectoryIndex::build(dir.path());

        assert_eq!(DirectoryIndex::locate(&listing, OsStr::new("b.jpg")), Some(1));
        assert_eq!(DirectoryIndex::locate(&listing, OsStr::new("B.JPG")), None);
        assert_eq!(DirectoryIndex::locate(&listing, OsStr::new("d.png")), None);
    }
}
