use egui::{ColorImage, Context, TextureHandle, TextureOptions, Vec2, ViewportCommand};

use crate::config::config::FRAME_ANIMATION_SECS;
use crate::core::image_store::PixelBuffer;

/// The drawable window as seen by the navigation core.
pub trait RenderSurface {
    /// Shows `buffer` (RGBA8, stride `width * 4`). `revision` changes whenever
    /// the buffer content may have changed.
    fn present(&mut self, buffer: &PixelBuffer, revision: u64);
    fn set_resizable(&mut self, resizable: bool);
    /// Requests a new window content size, one logical point per image pixel.
    fn set_frame_size(&mut self, width: u32, height: u32, animated: bool);
}

struct FrameAnimation {
    from: Vec2,
    to: Vec2,
    started: f64,
}

/// Per-window egui resources that outlive a single frame.
#[derive(Default)]
pub struct SurfaceState {
    texture: Option<TextureHandle>,
    revision: Option<u64>,
    size_px: [u32; 2],
    animation: Option<FrameAnimation>,
}

impl SurfaceState {
    /// Advances an animated frame change by one frame.
    pub fn tick(&mut self, ctx: &Context) {
        let Some(animation) = &self.animation else {
            return;
        };
        let now = ctx.input(|i| i.time);
        let t = ((now - animation.started) / FRAME_ANIMATION_SECS).clamp(0.0, 1.0) as f32;
        let eased = 1.0 - (1.0 - t) * (1.0 - t);
        ctx.send_viewport_cmd(ViewportCommand::InnerSize(
            animation.from + (animation.to - animation.from) * eased,
        ));

        if t >= 1.0 {
            self.animation = None;
        } else {
            ctx.request_repaint();
        }
    }

    /// Paints the presented buffer at its native pixel size, centred in `ui`.
    pub fn paint(&self, ui: &mut egui::Ui) {
        let Some(texture) = &self.texture else {
            return;
        };
        let ppp = ui.ctx().pixels_per_point();
        let size = Vec2::new(self.size_px[0] as f32, self.size_px[1] as f32) / ppp;
        let rect = egui::Rect::from_center_size(ui.max_rect().center(), size);
        ui.painter().image(
            texture.id(),
            rect,
            egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
            egui::Color32::WHITE,
        );
    }
}

/// `RenderSurface` backed by the egui viewport currently being updated.
pub struct EguiSurface<'a> {
    ctx: &'a Context,
    state: &'a mut SurfaceState,
    texture_name: &'a str,
}

impl<'a> EguiSurface<'a> {
    pub fn new(ctx: &'a Context, state: &'a mut SurfaceState, texture_name: &'a str) -> Self {
        Self {
            ctx,
            state,
            texture_name,
        }
    }
}

impl RenderSurface for EguiSurface<'_> {
    fn present(&mut self, buffer: &PixelBuffer, revision: u64) {
        if self.state.revision == Some(revision) && self.state.texture.is_some() {
            return;
        }

        debug_assert_eq!(
            buffer.as_bytes().len(),
            buffer.row_stride() * buffer.height() as usize
        );
        let size = [buffer.width() as usize, buffer.height() as usize];
        let image = ColorImage::from_rgba_unmultiplied(size, buffer.as_bytes());
        match &mut self.state.texture {
            Some(texture) => texture.set(image, TextureOptions::LINEAR),
            None => {
                self.state.texture =
                    Some(self.ctx.load_texture(self.texture_name, image, TextureOptions::LINEAR));
            }
        }
        self.state.revision = Some(revision);
        self.state.size_px = [buffer.width(), buffer.height()];
    }

    fn set_resizable(&mut self, resizable: bool) {
        tracing::debug!(resizable, "window resizability changed");
        self.ctx.send_viewport_cmd(ViewportCommand::Resizable(resizable));
    }

    fn set_frame_size(&mut self, width: u32, height: u32, animated: bool) {
        let target = Vec2::new(width as f32, height as f32);

        if animated {
            self.state.animation = Some(FrameAnimation {
                from: self.ctx.screen_rect().size(),
                to: target,
                started: self.ctx.input(|i| i.time),
            });
            self.ctx.request_repaint();
        } else {
            self.state.animation = None;
            self.ctx.send_viewport_cmd(ViewportCommand::InnerSize(target));
        }
    }
}
