//! pxlshade - command-line renderer for shaded watch faces

use std::process::ExitCode;

use pixelshade::cli;

fn main() -> ExitCode {
    cli::run()
}
