//! Software frame buffer implementing [`Surface`].
//!
//! A `Canvas` stores one palette byte per visible pixel, either as a
//! rectangle with a fixed row stride or as a round display with packed
//! per-row windows. Shapes are filled through [`crate::shapes`]; when
//! antialiasing is on, each shape's fringe is blended with what is already
//! there.

use crate::addressing::{round_rows, Offset, RowLayout, RowWindow};
use crate::palette::PaletteColor;
use crate::shapes::{rasterize_disc, rasterize_rect, rasterize_thick_line, Coverage};
use crate::surface::{FrameInfo, PixelFormat, Surface};
use image::{Rgba, RgbaImage};

/// In-memory display.
#[derive(Debug, Clone)]
pub struct Canvas {
    info: FrameInfo,
    windows: Option<Vec<RowWindow>>,
    layout: RowLayout,
    data: Vec<u8>,
    antialiased: bool,
}

impl Canvas {
    /// Rectangular display with tightly packed rows.
    pub fn rect(width: u16, height: u16) -> Self {
        Self::with_stride(width, height, width)
    }

    /// Rectangular display whose rows are `bytes_per_row` apart.
    pub fn with_stride(width: u16, height: u16, bytes_per_row: u16) -> Self {
        let bytes_per_row = bytes_per_row.max(width);
        let info = FrameInfo { width, height, bytes_per_row, format: PixelFormat::Indexed8 };
        let layout =
            RowLayout::uniform(usize::from(width), usize::from(height), usize::from(bytes_per_row));
        Self::from_parts(info, None, layout)
    }

    /// Round display of the given diameter.
    pub fn round(diameter: u16) -> Self {
        let rows = round_rows(diameter);
        let info = FrameInfo {
            width: diameter,
            height: diameter,
            bytes_per_row: diameter,
            format: PixelFormat::Indexed8Circular,
        };
        let layout = RowLayout::windowed(usize::from(diameter), rows.clone());
        Self::from_parts(info, Some(rows), layout)
    }

    fn from_parts(info: FrameInfo, windows: Option<Vec<RowWindow>>, layout: RowLayout) -> Self {
        let data = vec![PaletteColor::CLEAR.argb(); layout.storage_len()];
        Self { info, windows, layout, data, antialiased: true }
    }

    pub fn width(&self) -> u16 {
        self.info.width
    }

    pub fn height(&self) -> u16 {
        self.info.height
    }

    /// Addressing used by this canvas.
    pub fn layout(&self) -> &RowLayout {
        &self.layout
    }

    /// Color at `(x, y)` in the current draw target, `None` outside the display.
    pub fn pixel(&self, x: i32, y: i32) -> Option<PaletteColor> {
        self.index(x, y).map(|i| PaletteColor::from_argb(self.data[i]))
    }

    /// Write one pixel; returns `false` when `(x, y)` is not visible.
    pub fn set_pixel(&mut self, x: i32, y: i32, color: PaletteColor) -> bool {
        match self.index(x, y) {
            Some(i) => {
                self.data[i] = color.argb();
                true
            }
            None => false,
        }
    }

    /// Fill every visible pixel.
    pub fn fill(&mut self, color: PaletteColor) {
        for row in 0..self.layout.height() {
            let Some(columns) = self.layout.columns(row) else { continue };
            for col in columns {
                if let Some(i) = self.layout.index_of(row, col, Offset::ZERO) {
                    self.data[i] = color.argb();
                }
            }
        }
    }

    /// Fill an axis-aligned rectangle. Never antialiased.
    pub fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: PaletteColor) {
        for (px, py) in rasterize_rect(x, y, w, h) {
            self.set_pixel(px, py, color);
        }
    }

    /// Fill a circle of `radius` around `center`.
    pub fn fill_circle(&mut self, center: (i32, i32), radius: i32, color: PaletteColor) {
        let coverage = rasterize_disc(center.0, center.1, radius);
        self.paint(&coverage, color);
    }

    /// Stroke a line `width` pixels wide with round caps.
    pub fn draw_line(&mut self, from: (i32, i32), to: (i32, i32), width: u8, color: PaletteColor) {
        let coverage = rasterize_thick_line(from, to, width);
        self.paint(&coverage, color);
    }

    fn paint(&mut self, coverage: &Coverage, color: PaletteColor) {
        for &(x, y) in &coverage.solid {
            self.set_pixel(x, y, color);
        }
        if self.antialiased {
            for &(x, y) in &coverage.fringe {
                if let Some(existing) = self.pixel(x, y) {
                    self.set_pixel(x, y, existing.blend(color));
                }
            }
        }
    }

    /// Render the current draw target as RGBA. Pixels outside the display
    /// shape are transparent.
    pub fn to_image(&self) -> RgbaImage {
        let mut image = RgbaImage::from_pixel(
            u32::from(self.info.width),
            u32::from(self.info.height),
            Rgba([0, 0, 0, 0]),
        );
        for (x, y, pixel) in image.enumerate_pixels_mut() {
            if let Some(color) = self.pixel(x as i32, y as i32) {
                *pixel = color.to_rgba();
            }
        }
        image
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 {
            return None;
        }
        self.layout.index_of(y as usize, x as usize, Offset::ZERO)
    }
}

impl Surface for Canvas {
    fn frame_info(&self) -> FrameInfo {
        self.info
    }

    fn row_windows(&self) -> Option<Vec<RowWindow>> {
        self.windows.clone()
    }

    fn swap_target(&mut self, buffer: Vec<u8>) -> Vec<u8> {
        debug_assert_eq!(buffer.len(), self.data.len(), "draw target size mismatch");
        std::mem::replace(&mut self.data, buffer)
    }

    fn target(&self) -> &[u8] {
        &self.data
    }

    fn target_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    fn antialiased(&self) -> bool {
        self.antialiased
    }

    fn set_antialiased(&mut self, enabled: bool) {
        self.antialiased = enabled;
    }
}
