//! Render command implementation and helpers

use std::path::PathBuf;
use std::process::ExitCode;

use crate::canvas::Canvas;
use crate::config::{
    load_config, merge_cli_overrides, CliOverrides, ConfigError, DisplayConfig, DisplayShape,
};
use crate::context::ShadowContext;
use crate::face::{FaceScene, WatchFace};
use crate::output::{output_path, save_canvas};
use crate::surface::Surface;

use super::{EXIT_ERROR, EXIT_INVALID_ARGS, EXIT_SUCCESS};

/// Arguments of `pxlshade render` after flag parsing
#[derive(Debug, Clone)]
pub struct RenderArgs {
    pub config: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub time: String,
    pub angle: Option<i32>,
    pub shape: Option<DisplayShape>,
    pub width: Option<u16>,
    pub height: Option<u16>,
    pub battery: u8,
    pub bluetooth: bool,
    pub intro: u8,
    pub scale: Option<u8>,
    pub antialiased: Option<bool>,
}

/// Execute the render command
pub fn run_render(args: &RenderArgs) -> ExitCode {
    let (hours, minutes) = match parse_time(&args.time) {
        Some(t) => t,
        None => {
            eprintln!("Error: Invalid time '{}'. Use HH:MM (e.g., '10:10')", args.time);
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
    };

    let config = match load_config(args.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };
    let overrides = CliOverrides {
        shape: args.shape,
        width: args.width,
        height: args.height,
        angle_degrees: args.angle,
        scale: args.scale,
        antialiased: args.antialiased,
    };
    let config = match merge_cli_overrides(config, &overrides) {
        Ok(c) => c,
        Err(e @ ConfigError::Validation(_)) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let mut canvas = canvas_for(&config.display);
    canvas.set_antialiased(config.render.antialiased);
    let mut shadows = ShadowContext::with_settings(config.engine.cast_settings());
    let face = WatchFace::new(config.face.clone());
    let scene = FaceScene {
        hours,
        minutes,
        bluetooth: args.bluetooth,
        battery_percent: args.battery,
        intro_percent: args.intro,
    };

    let rendered = match face.render(&mut canvas, &mut shadows, &scene, config.light.angle_degrees) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };
    tracing::info!(
        time = %args.time,
        lightened = rendered.stats.lightened,
        darkened = rendered.stats.darkened,
        shadowed = rendered.stats.shadowed,
        "rendered face"
    );

    let path = output_path("face", args.output.as_deref());
    if let Err(e) = save_canvas(&canvas, &path, config.render.scale) {
        eprintln!("Error: Failed to save '{}': {}", path.display(), e);
        return ExitCode::from(EXIT_ERROR);
    }
    println!("Saved: {}", path.display());

    if let Err(e) = shadows.teardown() {
        eprintln!("Error: {}", e);
        return ExitCode::from(EXIT_ERROR);
    }
    ExitCode::from(EXIT_SUCCESS)
}

/// Frame buffer matching the configured display.
fn canvas_for(display: &DisplayConfig) -> Canvas {
    match display.shape {
        DisplayShape::Rect => Canvas::rect(display.width, display.height),
        DisplayShape::Round => Canvas::round(display.width),
    }
}

/// Parse `HH:MM` into hours (0..24) and minutes (0..60).
fn parse_time(s: &str) -> Option<(u8, u8)> {
    let (h, m) = s.trim().split_once(':')?;
    let hours: u8 = h.parse().ok()?;
    let minutes: u8 = m.parse().ok()?;
    (hours < 24 && minutes < 60).then_some((hours, minutes))
}
