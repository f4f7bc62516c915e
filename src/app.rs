use std::process::ExitCode;

use crate::cli::Args;
use crate::config::config::*;
use crate::core::error::ViewerError;
use crate::core::image_format::SupportedFormat;
use crate::core::path_resolver::PathResolver;
use crate::ui::navigation_manager::NavigationController;
use crate::ui::viewer::{ImageViewerApp, ImageWindow};

pub fn run(args: Args) -> ExitCode {
    let config = ViewerConfig::from(&args);

    let windows = match open_windows(&args, &config) {
        Ok(windows) => windows,
        Err(err) => {
            tracing::error!(error = %err, "cannot continue");
            return ExitCode::from(EXIT_FAILURE);
        }
    };
    let Some(first) = windows.first() else {
        tracing::error!("no supported image to show");
        return ExitCode::from(EXIT_FAILURE);
    };

    let options = eframe::NativeOptions {
        viewport: first.viewport_builder(),
        ..Default::default()
    };
    tracing::info!(windows = windows.len(), "starting viewer");

    let result = eframe::run_native(
        APP_NAME,
        options,
        Box::new(move |_cc| Ok(Box::new(ImageViewerApp::new(windows)))),
    );

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "failed to run the window system");
            ExitCode::from(EXIT_FAILURE)
        }
    }
}

/// Decodes every argument that names a supported image. Unusable arguments
/// are skipped; only a fatal error aborts startup.
fn open_windows(args: &Args, config: &ViewerConfig) -> Result<Vec<ImageWindow>, ViewerError> {
    let mut windows = Vec::new();

    for path in &args.paths {
        let resolved = match PathResolver::resolve(path).into_supported() {
            Ok(resolved) => resolved,
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    supported = ?SupportedFormat::supported_extensions(),
                    "skipping argument"
                );
                continue;
            }
        };

        match NavigationController::open(&resolved, config) {
            Ok(controller) => windows.push(ImageWindow::new(windows.len(), controller)),
            Err(err) if err.is_fatal() => return Err(err),
            Err(err) => {
                tracing::warn!(error = %err, "skipping argument");
                continue;
            }
        }

        if config.single_window {
            break;
        }
    }

    Ok(windows)
}
