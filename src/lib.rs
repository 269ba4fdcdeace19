//! pixelshade - cast shadows and self-shading on palette-indexed displays
//!
//! This library provides functionality to:
//! - Register shadow-casting objects with inner and outer heights
//! - Record object silhouettes in an identity buffer alongside the frame buffer
//! - Lighten, darken and shadow the visible frame for a given light direction
//! - Address both rectangular and round (per-row windowed) displays
//! - Render the demo watch face and shading swatch to PNG

pub mod addressing;
pub mod canvas;
pub mod cast;
pub mod cli;
pub mod config;
pub mod context;
pub mod face;
pub mod identity;
pub mod output;
pub mod palette;
pub mod registry;
pub mod shapes;
pub mod surface;
pub mod swatch;
pub mod trig;
