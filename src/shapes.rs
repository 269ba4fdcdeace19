//! Shape rasterization primitives for pixel-perfect rendering.
//!
//! Each shape rasterizes to a set of integer `(x, y)` pixel coordinates.
//! Round shapes also expose a one-pixel fringe just outside the solid body,
//! which the canvas blends into when antialiasing is on.

use std::collections::HashSet;

/// Solid pixels of a shape plus its antialiasing fringe.
///
/// The two sets never overlap.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Coverage {
    pub solid: HashSet<(i32, i32)>,
    pub fringe: HashSet<(i32, i32)>,
}

impl Coverage {
    fn from_parts(solid: HashSet<(i32, i32)>, mut fringe: HashSet<(i32, i32)>) -> Self {
        fringe.retain(|p| !solid.contains(p));
        Self { solid, fringe }
    }
}

/// Rasterize a line using Bresenham's line algorithm.
///
/// # Examples
///
/// ```
/// use pixelshade::shapes::rasterize_line;
///
/// let pixels = rasterize_line((0, 0), (3, 3));
/// assert_eq!(pixels.len(), 4);
/// assert!(pixels.contains(&(0, 0)));
/// assert!(pixels.contains(&(3, 3)));
/// ```
pub fn rasterize_line(p0: (i32, i32), p1: (i32, i32)) -> HashSet<(i32, i32)> {
    let mut pixels = HashSet::new();

    let (mut x0, mut y0) = p0;
    let (x1, y1) = p1;

    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        pixels.insert((x0, y0));

        if x0 == x1 && y0 == y1 {
            break;
        }

        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }

    pixels
}

/// Rasterize a filled rectangle with top-left corner `(x, y)` and size `(w, h)`.
///
/// # Examples
///
/// ```
/// use pixelshade::shapes::rasterize_rect;
///
/// let pixels = rasterize_rect(0, 0, 3, 2);
/// assert_eq!(pixels.len(), 6);
/// assert!(pixels.contains(&(2, 1)));
/// ```
pub fn rasterize_rect(x: i32, y: i32, w: i32, h: i32) -> HashSet<(i32, i32)> {
    let mut pixels = HashSet::new();

    if w <= 0 || h <= 0 {
        return pixels;
    }

    for dy in 0..h {
        for dx in 0..w {
            pixels.insert((x + dx, y + dy));
        }
    }

    pixels
}

/// Rasterize a filled disc centered on `(cx, cy)`.
///
/// A pixel is solid when its squared distance to the center is at most
/// `radius²`; the fringe holds pixels up to `(radius + 1)²`.
///
/// # Examples
///
/// ```
/// use pixelshade::shapes::rasterize_disc;
///
/// let disc = rasterize_disc(5, 5, 2);
/// assert!(disc.solid.contains(&(5, 5)));
/// assert!(disc.solid.contains(&(7, 5)));
/// assert!(!disc.solid.contains(&(7, 7)));
/// ```
pub fn rasterize_disc(cx: i32, cy: i32, radius: i32) -> Coverage {
    let mut solid = HashSet::new();
    let mut fringe = HashSet::new();

    if radius < 0 {
        return Coverage::default();
    }

    // i64 so large radii don't overflow when squared
    let r = i64::from(radius);
    let inner = r * r;
    let outer = (r + 1) * (r + 1);
    let reach = radius + 1;

    for dy in -reach..=reach {
        for dx in -reach..=reach {
            let d = i64::from(dx) * i64::from(dx) + i64::from(dy) * i64::from(dy);
            if d <= inner {
                solid.insert((cx + dx, cy + dy));
            } else if d <= outer {
                fringe.insert((cx + dx, cy + dy));
            }
        }
    }

    Coverage::from_parts(solid, fringe)
}

/// Rasterize a line stroked with round caps.
///
/// The stroke is the union of discs of diameter `width` stamped along the
/// Bresenham path between the two points.
pub fn rasterize_thick_line(p0: (i32, i32), p1: (i32, i32), width: u8) -> Coverage {
    let path = rasterize_line(p0, p1);
    if width <= 1 {
        return Coverage::from_parts(path, HashSet::new());
    }

    let radius = i32::from(width / 2);
    let mut solid = HashSet::new();
    let mut fringe = HashSet::new();
    for &(x, y) in &path {
        let stamp = rasterize_disc(x, y, radius);
        solid.extend(stamp.solid);
        fringe.extend(stamp.fringe);
    }

    Coverage::from_parts(solid, fringe)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_horizontal() {
        let pixels = rasterize_line((0, 0), (4, 0));
        assert_eq!(pixels.len(), 5);
        for x in 0..=4 {
            assert!(pixels.contains(&(x, 0)));
        }
    }

    #[test]
    fn test_line_single_point() {
        let pixels = rasterize_line((3, 3), (3, 3));
        assert_eq!(pixels.len(), 1);
    }

    #[test]
    fn test_rect_empty_for_non_positive_size() {
        assert!(rasterize_rect(0, 0, 0, 5).is_empty());
        assert!(rasterize_rect(0, 0, 5, -1).is_empty());
    }

    #[test]
    fn test_disc_radius_zero_is_single_pixel() {
        let disc = rasterize_disc(2, 2, 0);
        assert_eq!(disc.solid.len(), 1);
        assert!(disc.solid.contains(&(2, 2)));
    }

    #[test]
    fn test_disc_extent() {
        let disc = rasterize_disc(0, 0, 4);
        assert!(disc.solid.contains(&(4, 0)));
        assert!(disc.solid.contains(&(0, -4)));
        assert!(!disc.solid.contains(&(5, 0)));
        assert!(disc.fringe.contains(&(5, 0)));
        assert!(disc.solid.is_disjoint(&disc.fringe));
    }

    #[test]
    fn test_thick_line_fringe_does_not_overlap_body() {
        let stroke = rasterize_thick_line((0, 0), (10, 4), 5);
        assert!(stroke.solid.contains(&(0, 0)));
        assert!(stroke.solid.contains(&(10, 4)));
        assert!(stroke.solid.contains(&(0, 2)));
        assert!(stroke.solid.is_disjoint(&stroke.fringe));
        assert!(!stroke.fringe.is_empty());
    }

    #[test]
    fn test_thin_line_has_no_fringe() {
        let stroke = rasterize_thick_line((0, 0), (5, 0), 1);
        assert_eq!(stroke.solid.len(), 6);
        assert!(stroke.fringe.is_empty());
    }
}
