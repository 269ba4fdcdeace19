//! Pixel addressing for rectangular and non-rectangular displays.
//!
//! A display is described by a [`RowLayout`], chosen once when a buffer is
//! set up. Rectangular displays use a constant row stride; round displays
//! keep a [`RowWindow`] per row because both the visible column range and the
//! storage offset of each row differ.

use std::ops::RangeInclusive;

/// Signed 2D pixel offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Offset {
    pub dx: i32,
    pub dy: i32,
}

impl Offset {
    pub const ZERO: Self = Self { dx: 0, dy: 0 };

    pub const fn new(dx: i32, dy: i32) -> Self {
        Self { dx, dy }
    }

    /// Same offset pointing the other way.
    pub const fn reversed(self) -> Self {
        Self { dx: -self.dx, dy: -self.dy }
    }

    pub const fn is_zero(self) -> bool {
        self.dx == 0 && self.dy == 0
    }
}

/// Visible column range of one display row and where it lives in storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowWindow {
    /// First visible column.
    pub min_x: u16,
    /// Last visible column (inclusive).
    pub max_x: u16,
    /// Storage index of the pixel at `min_x`.
    pub start: usize,
}

impl RowWindow {
    /// Number of visible pixels in the row.
    ///
    /// An inverted window (`min_x > max_x`) is empty.
    pub fn len(&self) -> usize {
        if self.is_empty() {
            0
        } else {
            usize::from(self.max_x - self.min_x) + 1
        }
    }

    pub fn is_empty(&self) -> bool {
        self.min_x > self.max_x
    }

    pub fn columns(&self) -> RangeInclusive<usize> {
        usize::from(self.min_x)..=usize::from(self.max_x)
    }

    fn contains(&self, col: i32) -> bool {
        col >= i32::from(self.min_x) && col <= i32::from(self.max_x)
    }
}

/// How logical `(row, col)` coordinates map to linear storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowLayout {
    /// Every row spans `0..width` and starts `stride` bytes after the previous one.
    Uniform { width: usize, height: usize, stride: usize },
    /// Per-row windows, one entry per display row.
    Windowed { width: usize, rows: Vec<RowWindow> },
}

impl RowLayout {
    /// Rectangular layout with a constant stride.
    pub fn uniform(width: usize, height: usize, stride: usize) -> Self {
        debug_assert!(stride >= width, "row stride smaller than width");
        Self::Uniform { width, height, stride }
    }

    /// Layout from precomputed row windows.
    pub fn windowed(width: usize, rows: Vec<RowWindow>) -> Self {
        Self::Windowed { width, rows }
    }

    /// Pick a strategy: windowed when the surface reports row windows,
    /// uniform otherwise.
    pub fn detect(width: usize, height: usize, stride: usize, rows: Option<Vec<RowWindow>>) -> Self {
        match rows {
            Some(rows) => Self::windowed(width, rows),
            None => Self::uniform(width, height, stride),
        }
    }

    /// Display width in pixels (widest row for windowed layouts).
    pub fn width(&self) -> usize {
        match self {
            Self::Uniform { width, .. } | Self::Windowed { width, .. } => *width,
        }
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        match self {
            Self::Uniform { height, .. } => *height,
            Self::Windowed { rows, .. } => rows.len(),
        }
    }

    /// Bytes of storage a buffer with this layout needs.
    pub fn storage_len(&self) -> usize {
        match self {
            Self::Uniform { height, stride, .. } => height * stride,
            Self::Windowed { rows, .. } => {
                rows.iter().map(|w| w.start + w.len()).max().unwrap_or(0)
            }
        }
    }

    /// Visible columns of `row`, or `None` past the last row.
    pub fn columns(&self, row: usize) -> Option<RangeInclusive<usize>> {
        match self {
            Self::Uniform { width, height, .. } => {
                (row < *height && *width > 0).then(|| 0..=width - 1)
            }
            Self::Windowed { rows, .. } => rows.get(row).map(RowWindow::columns),
        }
    }

    /// Storage index of `(row, col) + offset`, or `None` when the target is
    /// outside the visible region of its row.
    #[inline]
    pub fn index_of(&self, row: usize, col: usize, offset: Offset) -> Option<usize> {
        let y = i32::try_from(row).ok()?.checked_add(offset.dy)?;
        let x = i32::try_from(col).ok()?.checked_add(offset.dx)?;
        if y < 0 || x < 0 {
            return None;
        }
        let (y, x) = (y as usize, x as usize);
        match self {
            Self::Uniform { width, height, stride } => {
                (y < *height && x < *width).then(|| y * stride + x)
            }
            Self::Windowed { rows, .. } => {
                let window = rows.get(y)?;
                window.contains(x as i32).then(|| window.start + (x - usize::from(window.min_x)))
            }
        }
    }

    /// Whether `(row, col)` is a visible pixel.
    pub fn contains(&self, row: usize, col: usize) -> bool {
        self.index_of(row, col, Offset::ZERO).is_some()
    }

    /// Visible pixel count.
    pub fn pixel_count(&self) -> usize {
        match self {
            Self::Uniform { width, height, .. } => width * height,
            Self::Windowed { rows, .. } => rows.iter().map(RowWindow::len).sum(),
        }
    }
}

/// Row windows for a circular display of the given diameter, rows packed
/// back to back in storage.
///
/// A pixel is visible when its center lies inside the circle inscribed in
/// the `diameter x diameter` square.
pub fn round_rows(diameter: u16) -> Vec<RowWindow> {
    let d = i64::from(diameter);
    let mut rows = Vec::with_capacity(usize::from(diameter));
    let mut start = 0usize;
    for y in 0..d {
        // doubled coordinates keep pixel centers integral
        let dy = 2 * y + 1 - d;
        let reach = d * d - dy * dy;
        let mut min_x = d;
        let mut max_x = -1;
        for x in 0..d {
            let dx = 2 * x + 1 - d;
            if dx * dx <= reach {
                min_x = min_x.min(x);
                max_x = max_x.max(x);
            }
        }
        if max_x < min_x {
            // degenerate tiny displays: keep the center column
            min_x = d / 2;
            max_x = d / 2;
        }
        let window = RowWindow { min_x: min_x as u16, max_x: max_x as u16, start };
        start += window.len();
        rows.push(window);
    }
    rows
}
