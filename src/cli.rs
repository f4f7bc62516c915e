use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "meh", version, about = "Minimal borderless image viewer")]
pub struct Args {
    /// Images to open; each valid one gets its own window.
    #[arg(value_name = "PATH")]
    pub paths: Vec<PathBuf>,

    /// Open only the first valid image.
    #[arg(long)]
    pub single: bool,

    /// Stop at the first and last image instead of wrapping around.
    #[arg(long)]
    pub clamp: bool,

    /// Animate window size changes when switching images.
    #[arg(long, env = "MEH_ANIMATE_RESIZE")]
    pub animate: bool,
}

pub fn parse() -> Args {
    Args::parse()
}
