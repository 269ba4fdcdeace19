//! Swatch command implementation

use std::path::Path;
use std::process::ExitCode;

use crate::output::{output_path, save_canvas};
use crate::swatch::render_swatch;

use super::{EXIT_ERROR, EXIT_SUCCESS};

/// Execute the swatch command
pub fn run_swatch(output: Option<&Path>, scale: u8) -> ExitCode {
    let canvas = render_swatch();
    let path = output_path("swatch", output);
    if let Err(e) = save_canvas(&canvas, &path, scale) {
        eprintln!("Error: Failed to save '{}': {}", path.display(), e);
        return ExitCode::from(EXIT_ERROR);
    }
    println!("Saved: {}", path.display());
    ExitCode::from(EXIT_SUCCESS)
}
