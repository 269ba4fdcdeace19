//! Visual check of the shading table.
//!
//! Lays the 64 opaque colors out in a grid, four per row. Each cell shows
//! the darker neighbour, the color itself and the lighter neighbour side by
//! side.

use crate::canvas::Canvas;
use crate::palette::{PaletteColor, BASE_COLOR_COUNT};

pub const SWATCH_COLUMNS: usize = 4;
pub const SWATCH_ROWS: usize = BASE_COLOR_COUNT / SWATCH_COLUMNS;

/// Width of one of the three stripes in a cell.
pub const STRIPE_WIDTH: u16 = 8;
pub const CELL_HEIGHT: u16 = 8;
/// Transparent gap between cells.
pub const GUTTER: u16 = 2;

const CELL_WIDTH: u16 = STRIPE_WIDTH * 3;

/// Pixel size of the swatch canvas.
pub fn swatch_size() -> (u16, u16) {
    (
        SWATCH_COLUMNS as u16 * (CELL_WIDTH + GUTTER),
        SWATCH_ROWS as u16 * (CELL_HEIGHT + GUTTER),
    )
}

/// Top-left pixel of the cell for base color `index`.
pub fn cell_origin(index: usize) -> (i32, i32) {
    let col = (index % SWATCH_COLUMNS) as i32;
    let row = (index / SWATCH_COLUMNS) as i32;
    (col * i32::from(CELL_WIDTH + GUTTER), row * i32::from(CELL_HEIGHT + GUTTER))
}

/// Paint every table entry onto a fresh canvas.
pub fn render_swatch() -> Canvas {
    let (width, height) = swatch_size();
    let mut canvas = Canvas::rect(width, height);
    let stripe = i32::from(STRIPE_WIDTH);
    let cell_height = i32::from(CELL_HEIGHT);

    for index in 0..BASE_COLOR_COUNT {
        let base = PaletteColor::from_base(index as u8);
        let (x, y) = cell_origin(index);
        for (i, color) in [base.darker(), base, base.lighter()].into_iter().enumerate() {
            canvas.fill_rect(x + stripe * i as i32, y, stripe, cell_height, color);
        }
    }
    tracing::debug!(width, height, "rendered shading swatch");
    canvas
}
