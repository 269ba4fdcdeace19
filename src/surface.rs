//! The drawable surface the shading core works against.
//!
//! The core never draws shapes itself. It only needs to read the surface's
//! geometry, swap the buffer that draw calls land in, toggle antialiasing,
//! and read/write pixels of the visible buffer during the casting pass.

use crate::addressing::{RowLayout, RowWindow};

/// Pixel storage format of a frame buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PixelFormat {
    /// One palette byte per pixel, constant row stride.
    Indexed8,
    /// One palette byte per pixel, per-row windows packed back to back.
    Indexed8Circular,
}

/// Geometry of a frame buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameInfo {
    pub width: u16,
    pub height: u16,
    pub bytes_per_row: u16,
    pub format: PixelFormat,
}

impl std::fmt::Display for FrameInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{} ({:?}, {} bytes/row)", self.width, self.height, self.format, self.bytes_per_row)
    }
}

/// A frame buffer whose draw target can be substituted.
pub trait Surface {
    /// Geometry of the visible frame buffer.
    fn frame_info(&self) -> FrameInfo;

    /// Per-row windows for non-rectangular displays, `None` for rectangular ones.
    fn row_windows(&self) -> Option<Vec<RowWindow>>;

    /// Install `buffer` as the draw target and hand back the previous one.
    ///
    /// `buffer` must have the same length as the current target.
    fn swap_target(&mut self, buffer: Vec<u8>) -> Vec<u8>;

    /// Bytes of the current draw target.
    fn target(&self) -> &[u8];

    /// Mutable bytes of the current draw target.
    ///
    /// Must be at least [`RowLayout::storage_len`] of [`Surface::row_layout`]
    /// bytes long; shorter targets are rejected by the shading context.
    fn target_mut(&mut self) -> &mut [u8];

    fn antialiased(&self) -> bool;

    fn set_antialiased(&mut self, enabled: bool);

    /// Addressing strategy for this surface.
    fn row_layout(&self) -> RowLayout {
        let info = self.frame_info();
        RowLayout::detect(
            usize::from(info.width),
            usize::from(info.height),
            usize::from(info.bytes_per_row),
            self.row_windows(),
        )
    }
}
