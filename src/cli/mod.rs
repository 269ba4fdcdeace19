//! Command-line interface implementation
//!
//! This module provides the CLI entry point and dispatches to submodules
//! for specific command implementations.

mod render;
mod swatch;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::Level;
use tracing_subscriber::EnvFilter;

use crate::config::DisplayShape;

pub(crate) const EXIT_SUCCESS: u8 = 0;
pub(crate) const EXIT_ERROR: u8 = 1;
pub(crate) const EXIT_INVALID_ARGS: u8 = 2;

/// pxlshade - shade palette-indexed displays and render them to PNG
#[derive(Parser)]
#[command(name = "pxlshade")]
#[command(about = "Render shaded watch faces and shading-table swatches to PNG")]
#[command(version)]
pub struct Cli {
    /// Log engine activity (same as RUST_LOG=debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Display outline accepted on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ShapeArg {
    Rect,
    Round,
}

impl From<ShapeArg> for DisplayShape {
    fn from(shape: ShapeArg) -> Self {
        match shape {
            ShapeArg::Rect => DisplayShape::Rect,
            ShapeArg::Round => DisplayShape::Round,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render the analog watch face with cast shadows
    Render {
        /// Config file (default: nearest pxlshade.toml)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output file or directory (default: face.png)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Time shown on the face, HH:MM
        #[arg(short, long, default_value = "10:10")]
        time: String,

        /// Light direction in degrees (0 = towards +x, 90 = down)
        #[arg(long, allow_hyphen_values = true)]
        angle: Option<i32>,

        /// Display outline
        #[arg(long, value_enum)]
        shape: Option<ShapeArg>,

        /// Display width (diameter for round displays)
        #[arg(long)]
        width: Option<u16>,

        /// Display height
        #[arg(long)]
        height: Option<u16>,

        /// Battery charge driving the hour hand color
        #[arg(long, default_value = "100", value_parser = clap::value_parser!(u8).range(0..=100))]
        battery: u8,

        /// Hide the 12 o'clock dot as if the phone were disconnected
        #[arg(long)]
        no_bluetooth: bool,

        /// Intro animation progress (100 = hands at full length)
        #[arg(long, default_value = "100", value_parser = clap::value_parser!(u8).range(0..=100))]
        intro: u8,

        /// Scale factor for output
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=16))]
        scale: Option<u8>,

        /// Disable antialiasing of the visible shapes
        #[arg(long)]
        no_aa: bool,
    },

    /// Render the 64-color shading table as darker | base | lighter cells
    Swatch {
        /// Output file or directory (default: swatch.png)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Scale factor for output
        #[arg(long, default_value = "4", value_parser = clap::value_parser!(u8).range(1..=16))]
        scale: u8,
    },
}

/// Install the stderr log subscriber. `RUST_LOG` refines the default level.
fn init_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .try_init();
}

/// Run the CLI application
pub fn run() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Render {
            config,
            output,
            time,
            angle,
            shape,
            width,
            height,
            battery,
            no_bluetooth,
            intro,
            scale,
            no_aa,
        } => render::run_render(&render::RenderArgs {
            config,
            output,
            time,
            angle,
            shape: shape.map(DisplayShape::from),
            width,
            height,
            battery,
            bluetooth: !no_bluetooth,
            intro,
            scale,
            antialiased: if no_aa { Some(false) } else { None },
        }),
        Commands::Swatch { output, scale } => swatch::run_swatch(output.as_deref(), scale),
    }
}
