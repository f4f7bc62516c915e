use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::config::config::{EdgePolicy, ViewerConfig, PLACEHOLDER_HEIGHT, PLACEHOLDER_WIDTH};
use crate::core::directory_index::{DirectoryIndex, DirectoryListing};
use crate::core::error::ViewerError;
use crate::core::image_store::ImageStore;
use crate::core::path_resolver::ResolvedPath;
use crate::ui::surface::RenderSurface;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Previous,
    Next,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// The directory has not been listed yet.
    Idle,
    Browsing,
    /// The placeholder is on screen.
    Failed,
}

/// Cursor position after one step, or `None` when there is nothing to visit.
pub fn step(cursor: usize, len: usize, direction: Direction, policy: EdgePolicy) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let cursor = cursor.min(len - 1);
    let next = match (direction, policy) {
        (Direction::Next, EdgePolicy::Wrap) => (cursor + 1) % len,
        (Direction::Previous, EdgePolicy::Wrap) => (cursor + len - 1) % len,
        (Direction::Next, EdgePolicy::Clamp) => (cursor + 1).min(len - 1),
        (Direction::Previous, EdgePolicy::Clamp) => cursor.saturating_sub(1),
    };
    Some(next)
}

/// Where a window is within its directory.
#[derive(Debug)]
pub struct NavigationState {
    directory: PathBuf,
    filename: OsString,
    listing: Option<DirectoryListing>,
    cursor: usize,
    load_failed: bool,
}

impl NavigationState {
    pub fn new(directory: PathBuf, filename: OsString) -> Self {
        Self {
            directory,
            filename,
            listing: None,
            cursor: 0,
            load_failed: false,
        }
    }

    /// Lists the directory on first use and seeds the cursor from the open
    /// file. Returns the listing length.
    fn ensure_listing(&mut self) -> usize {
        if let Some(listing) = &self.listing {
            return listing.len();
        }

        let listing = DirectoryIndex::build(&self.directory);
        self.cursor = DirectoryIndex::locate(&listing, &self.filename).unwrap_or_else(|| {
            tracing::debug!(
                filename = %Path::new(&self.filename).display(),
                "open file not in listing, starting from the first image"
            );
            0
        });
        let len = listing.len();
        self.listing = Some(listing);
        len
    }

    pub fn filename(&self) -> &OsString {
        &self.filename
    }

    pub fn listing(&self) -> Option<&DirectoryListing> {
        self.listing.as_ref()
    }

    pub fn cursor(&self) -> Option<usize> {
        self.listing.as_ref().map(|_| self.cursor)
    }

    pub fn phase(&self) -> Phase {
        if self.load_failed {
            Phase::Failed
        } else if self.listing.is_none() {
            Phase::Idle
        } else {
            Phase::Browsing
        }
    }
}

/// The per-window browsing state machine.
pub struct NavigationController {
    state: NavigationState,
    store: ImageStore,
    policy: EdgePolicy,
    animate_resize: bool,
    /// Last reported drawable size in pixels.
    surface_px: Option<(u32, u32)>,
}

impl NavigationController {
    /// Decodes the initial image. Unlike later navigation, a decode failure
    /// here is returned instead of showing the placeholder.
    pub fn open(resolved: &ResolvedPath, config: &ViewerConfig) -> Result<Self, ViewerError> {
        let mut store = ImageStore::new();
        store.load(&resolved.path())?;

        Ok(Self {
            state: NavigationState::new(resolved.directory.clone(), resolved.filename.clone()),
            store,
            policy: config.edge_policy,
            animate_resize: config.animate_resize,
            surface_px: None,
        })
    }

    /// Handles a navigation key. Only a fatal error is returned; decode
    /// failures switch to the placeholder.
    pub fn navigate(
        &mut self,
        direction: Direction,
        surface: &mut dyn RenderSurface,
    ) -> Result<(), ViewerError> {
        let len = self.state.ensure_listing();
        let Some(next) = step(self.state.cursor, len, direction, self.policy) else {
            tracing::debug!(directory = %self.state.directory.display(), "no images to navigate to");
            return Ok(());
        };

        let Some(filename) = self
            .state
            .listing
            .as_ref()
            .and_then(|listing| listing.get(next))
            .map(OsString::from)
        else {
            return Ok(());
        };
        self.state.cursor = next;
        // The cursor can land on its own slot while the open file is gone
        // from the listing, so compare names rather than positions.
        if filename == self.state.filename {
            return Ok(());
        }
        let path = self.state.directory.join(&filename);
        self.state.filename = filename;

        let was_failed = self.state.load_failed;
        match self.store.load(&path) {
            Ok(buffer) => {
                let (width, height) = buffer.dimensions();
                tracing::info!(path = %path.display(), width, height, "showing image");
                self.state.load_failed = false;
                if was_failed {
                    surface.set_resizable(true);
                }
                surface.set_frame_size(width, height, self.animate_resize);
                // The window may already have the requested size and then
                // reports no resize, so fit the new image to it now.
                if let Some((surface_width, surface_height)) = self.surface_px {
                    self.store.resize_to(surface_width, surface_height);
                }
            }
            Err(err) if err.is_fatal() => return Err(err),
            Err(err) => {
                tracing::warn!(error = %err, "showing placeholder");
                self.state.load_failed = true;
                surface.set_resizable(false);
                surface.set_frame_size(PLACEHOLDER_WIDTH, PLACEHOLDER_HEIGHT, self.animate_resize);
            }
        }
        Ok(())
    }

    pub fn on_resized(&mut self, width: u32, height: u32) {
        self.surface_px = Some((width, height));
        if self.state.phase() == Phase::Failed {
            return;
        }
        self.store.resize_to(width, height);
    }

    pub fn on_redraw_requested(&self, surface: &mut dyn RenderSurface) {
        surface.present(self.store.display(), self.store.revision());
    }

    /// Re-applies window properties to a surface that has lost them.
    pub fn restore(&self, surface: &mut dyn RenderSurface) {
        let (width, height) = self.store.original().dimensions();
        surface.set_resizable(!self.state.load_failed);
        surface.set_frame_size(width, height, false);
    }

    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    pub fn store(&self) -> &ImageStore {
        &self.store
    }

    pub fn current_path(&self) -> PathBuf {
        self.state.directory.join(&self.state.filename)
    }
}
