use crate::cli::Args;

pub const APP_NAME: &str = "meh";

pub const PLACEHOLDER_WIDTH: u32 = 640;
pub const PLACEHOLDER_HEIGHT: u32 = 480;
pub const PLACEHOLDER_RGBA: [u8; 4] = [255, 0, 255, 255];

/// No argument was a decodable image, or the viewer could not continue.
pub const EXIT_FAILURE: u8 = 1;

/// Duration of an animated window frame change, in seconds.
pub const FRAME_ANIMATION_SECS: f64 = 0.2;

/// What stepping past either end of the directory listing does.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EdgePolicy {
    /// Continue from the other end.
    #[default]
    Wrap,
    /// Stay on the first or last image.
    Clamp,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewerConfig {
    pub edge_policy: EdgePolicy,
    pub animate_resize: bool,
    pub single_window: bool,
}

impl From<&Args> for ViewerConfig {
    fn from(args: &Args) -> Self {
        Self {
            edge_policy: if args.clamp {
                EdgePolicy::Clamp
            } else {
                EdgePolicy::Wrap
            },
            animate_resize: args.animate,
            single_window: args.single,
        }
    }
}
