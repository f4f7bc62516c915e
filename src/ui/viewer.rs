use std::process;

use eframe::egui;
use egui::{ViewportBuilder, ViewportCommand, ViewportId};

use crate::config::config::EXIT_FAILURE;
use crate::core::error::ViewerError;
use crate::ui::navigation_manager::{Direction, NavigationController};
use crate::ui::surface::{EguiSurface, SurfaceState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    Close,
    Navigate(Direction),
}

/// Escape and Q close the window, J goes back, K goes forward.
pub fn command_for_key(key: egui::Key) -> Option<KeyCommand> {
    match key {
        egui::Key::Escape | egui::Key::Q => Some(KeyCommand::Close),
        egui::Key::J => Some(KeyCommand::Navigate(Direction::Previous)),
        egui::Key::K => Some(KeyCommand::Navigate(Direction::Next)),
        _ => None,
    }
}

/// One borderless image window and everything it owns.
pub struct ImageWindow {
    serial: usize,
    title: String,
    texture_name: String,
    builder: ViewportBuilder,
    controller: NavigationController,
    surface: SurfaceState,
    surface_size: Option<[u32; 2]>,
}

impl ImageWindow {
    pub fn new(serial: usize, controller: NavigationController) -> Self {
        let title = window_title(&controller);
        let (width, height) = controller.store().original().dimensions();
        let builder = ViewportBuilder::default()
            .with_title(title.clone())
            .with_inner_size([width as f32, height as f32])
            .with_min_inner_size([1.0, 1.0])
            .with_decorations(false)
            .with_resizable(true);

        Self {
            serial,
            title,
            texture_name: format!("image-window-{serial}"),
            builder,
            controller,
            surface: SurfaceState::default(),
            surface_size: None,
        }
    }

    pub fn viewport_builder(&self) -> ViewportBuilder {
        self.builder.clone()
    }

    pub fn viewport_id(&self) -> ViewportId {
        ViewportId::from_hash_of(("image-window", self.serial))
    }

    /// Runs one frame for this window. Returns true when it should close.
    pub fn update(&mut self, ctx: &egui::Context) -> bool {
        let mut close = ctx.input(|i| i.viewport().close_requested());

        for key in released_keys(ctx) {
            match command_for_key(key) {
                Some(KeyCommand::Close) => close = true,
                Some(KeyCommand::Navigate(direction)) => self.navigate(ctx, direction),
                None => {}
            }
        }

        let size = surface_size_px(ctx);
        if self.surface_size != Some(size) {
            self.surface_size = Some(size);
            self.controller.on_resized(size[0], size[1]);
        }

        self.surface.tick(ctx);
        let mut surface = EguiSurface::new(ctx, &mut self.surface, &self.texture_name);
        self.controller.on_redraw_requested(&mut surface);

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE.fill(egui::Color32::BLACK))
            .show(ctx, |ui| {
                self.surface.paint(ui);
                let response = ui.interact(ui.max_rect(), ui.id().with("drag"), egui::Sense::drag());
                if response.drag_started() {
                    ctx.send_viewport_cmd(ViewportCommand::StartDrag);
                }
            });

        close
    }

    /// Takes over the root viewport after the previous root window closed.
    pub fn adopt_root(&mut self, ctx: &egui::Context) {
        self.surface = SurfaceState::default();
        self.surface_size = None;
        ctx.send_viewport_cmd(ViewportCommand::Title(self.title.clone()));
        let mut surface = EguiSurface::new(ctx, &mut self.surface, &self.texture_name);
        self.controller.restore(&mut surface);
    }

    fn navigate(&mut self, ctx: &egui::Context, direction: Direction) {
        let mut surface = EguiSurface::new(ctx, &mut self.surface, &self.texture_name);
        if let Err(err) = self.controller.navigate(direction, &mut surface) {
            terminate(&err);
        }
        tracing::debug!(?direction, phase = ?self.controller.phase(), "navigated");

        let title = window_title(&self.controller);
        if title != self.title {
            ctx.send_viewport_cmd(ViewportCommand::Title(title.clone()));
            self.title = title;
        }
    }
}

/// The file name, plus its position once the directory has been listed.
fn window_title(controller: &NavigationController) -> String {
    let name = controller
        .current_path()
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let state = controller.state();
    match (state.cursor(), state.listing()) {
        (Some(cursor), Some(listing)) if !listing.is_empty() => {
            format!("{name} ({}/{})", cursor + 1, listing.len())
        }
        _ => name,
    }
}

fn released_keys(ctx: &egui::Context) -> Vec<egui::Key> {
    ctx.input(|i| {
        i.events
            .iter()
            .filter_map(|event| match event {
                egui::Event::Key {
                    key,
                    pressed: false,
                    ..
                } => Some(*key),
                _ => None,
            })
            .collect()
    })
}

fn surface_size_px(ctx: &egui::Context) -> [u32; 2] {
    let size = ctx.screen_rect().size() * ctx.pixels_per_point();
    [size.x.round().max(0.0) as u32, size.y.round().max(0.0) as u32]
}

fn terminate(err: &ViewerError) -> ! {
    tracing::error!(error = %err, "cannot continue");
    process::exit(EXIT_FAILURE.into());
}

/// What a frame's closures did to the window list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WindowsChange {
    Unchanged,
    /// The root window closed and the next one takes over its viewport.
    Promoted,
    Quit,
}

/// Drops the secondary windows listed in `closed` (by serial), then the root
/// window when `close_root` is set.
fn close_windows(
    windows: &mut Vec<ImageWindow>,
    closed: &[usize],
    close_root: bool,
) -> WindowsChange {
    if let Some(root_serial) = windows.first().map(|w| w.serial) {
        windows.retain(|w| w.serial == root_serial || !closed.contains(&w.serial));
    }
    if !close_root {
        return WindowsChange::Unchanged;
    }
    if windows.len() <= 1 {
        windows.clear();
        return WindowsChange::Quit;
    }
    windows.remove(0);
    WindowsChange::Promoted
}

/// All open image windows. The first one lives in the root viewport.
pub struct ImageViewerApp {
    windows: Vec<ImageWindow>,
}

impl ImageViewerApp {
    pub fn new(windows: Vec<ImageWindow>) -> Self {
        Self { windows }
    }

    fn run_frame(&mut self, ctx: &egui::Context) {
        let Some((root, others)) = self.windows.split_first_mut() else {
            ctx.send_viewport_cmd(ViewportCommand::Close);
            return;
        };

        let close_root = root.update(ctx);

        let mut closed = Vec::new();
        for window in others.iter_mut() {
            let id = window.viewport_id();
            let builder = window.viewport_builder();
            if ctx.show_viewport_immediate(id, builder, |ctx, _class| window.update(ctx)) {
                closed.push(window.serial);
            }
        }

        self.apply_closures(ctx, &closed, close_root);
    }

    fn apply_closures(&mut self, ctx: &egui::Context, closed: &[usize], close_root: bool) {
        match close_windows(&mut self.windows, closed, close_root) {
            WindowsChange::Unchanged => {}
            WindowsChange::Promoted => {
                // Keep the root viewport alive for the promoted window.
                if ctx.input(|i| i.viewport().close_requested()) {
                    ctx.send_viewport_cmd(ViewportCommand::CancelClose);
                }
                self.windows[0].adopt_root(ctx);
                tracing::debug!(remaining = self.windows.len(), "promoted next window to root");
            }
            WindowsChange::Quit => ctx.send_viewport_cmd(ViewportCommand::Close),
        }
    }
}

impl eframe::App for ImageViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.run_frame(ctx);
    }
}
