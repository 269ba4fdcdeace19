//! PNG export of canvases

use image::imageops::FilterType;
use image::RgbaImage;
use std::io;
use std::path::{Path, PathBuf};

use crate::canvas::Canvas;

/// Error type for output operations
#[derive(Debug)]
pub enum OutputError {
    /// IO error during file operations
    Io(io::Error),
    /// Image encoding error
    Image(image::ImageError),
}

impl std::fmt::Display for OutputError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputError::Io(e) => write!(f, "IO error: {}", e),
            OutputError::Image(e) => write!(f, "Image error: {}", e),
        }
    }
}

impl std::error::Error for OutputError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            OutputError::Io(e) => Some(e),
            OutputError::Image(e) => Some(e),
        }
    }
}

impl From<io::Error> for OutputError {
    fn from(e: io::Error) -> Self {
        OutputError::Io(e)
    }
}

impl From<image::ImageError> for OutputError {
    fn from(e: image::ImageError) -> Self {
        OutputError::Image(e)
    }
}

/// Save an RGBA image to a PNG file, creating parent directories.
pub fn save_png(image: &RgbaImage, path: &Path) -> Result<(), OutputError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }

    image.save(path)?;
    tracing::debug!(path = %path.display(), width = image.width(), height = image.height(), "wrote png");
    Ok(())
}

/// Scale image by integer factor using nearest-neighbor interpolation.
///
/// Keeps display pixels crisp. A factor of 0 or 1 returns the image as is.
pub fn scale_image(image: RgbaImage, factor: u8) -> RgbaImage {
    if factor <= 1 {
        return image;
    }
    let (w, h) = image.dimensions();
    let new_w = w * factor as u32;
    let new_h = h * factor as u32;
    image::imageops::resize(&image, new_w, new_h, FilterType::Nearest)
}

/// Render `canvas`, upscale it and write it as PNG.
pub fn save_canvas(canvas: &Canvas, path: &Path, scale: u8) -> Result<(), OutputError> {
    save_png(&scale_image(canvas.to_image(), scale), path)
}

/// Where a render lands when no `-o` was given: `<name>.png` in the
/// working directory. A directory argument gets `<name>.png` inside it.
pub fn output_path(name: &str, output_arg: Option<&Path>) -> PathBuf {
    let file_name = format!("{}.png", name);
    match output_arg {
        None => PathBuf::from(file_name),
        Some(path) if path.is_dir() || path.to_string_lossy().ends_with('/') => {
            path.join(file_name)
        }
        Some(path) => path.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::PaletteColor;
    use image::Rgba;
    use tempfile::tempdir;

    #[test]
    fn test_output_path_default() {
        assert_eq!(output_path("face", None), PathBuf::from("face.png"));
    }

    #[test]
    fn test_output_path_explicit_file() {
        let path = output_path("face", Some(Path::new("out/clock.png")));
        assert_eq!(path, PathBuf::from("out/clock.png"));
    }

    #[test]
    fn test_output_path_directory() {
        let dir = tempdir().unwrap();
        let path = output_path("swatch", Some(dir.path()));
        assert_eq!(path, dir.path().join("swatch.png"));

        let path = output_path("swatch", Some(Path::new("renders/")));
        assert_eq!(path, PathBuf::from("renders/swatch.png"));
    }

    #[test]
    fn test_save_png_creates_parent_dirs() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested/dirs/test.png");

        let image = RgbaImage::new(1, 1);
        assert!(save_png(&image, &path).is_ok());
        assert!(path.exists());
    }

    #[test]
    fn test_scale_image_factor_one_returns_original() {
        let mut image = RgbaImage::new(2, 2);
        image.put_pixel(1, 1, Rgba([255, 255, 0, 255]));

        let scaled = scale_image(image, 1);
        assert_eq!(scaled.dimensions(), (2, 2));
        assert_eq!(*scaled.get_pixel(1, 1), Rgba([255, 255, 0, 255]));
    }

    #[test]
    fn test_scale_image_factor_three() {
        let mut image = RgbaImage::new(2, 1);
        image.put_pixel(0, 0, Rgba([255, 0, 0, 255]));
        image.put_pixel(1, 0, Rgba([0, 0, 0, 0]));

        let scaled = scale_image(image, 3);
        assert_eq!(scaled.dimensions(), (6, 3));
        for y in 0..3 {
            for x in 0..3 {
                assert_eq!(*scaled.get_pixel(x, y), Rgba([255, 0, 0, 255]));
                assert_eq!(*scaled.get_pixel(x + 3, y), Rgba([0, 0, 0, 0]));
            }
        }
    }

    #[test]
    fn test_save_canvas_round_trips_colors() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("canvas.png");

        let mut canvas = Canvas::rect(4, 2);
        canvas.fill(PaletteColor::RED);
        canvas.set_pixel(3, 1, PaletteColor::BLUE);
        save_canvas(&canvas, &path, 2).unwrap();

        let loaded = image::open(&path).unwrap().to_rgba8();
        assert_eq!(loaded.dimensions(), (8, 4));
        assert_eq!(*loaded.get_pixel(0, 0), Rgba([255, 0, 0, 255]));
        assert_eq!(*loaded.get_pixel(7, 3), Rgba([0, 0, 255, 255]));
    }

    #[test]
    fn test_round_canvas_corners_are_transparent() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("round.png");

        let mut canvas = Canvas::round(20);
        canvas.fill(PaletteColor::WHITE);
        save_canvas(&canvas, &path, 1).unwrap();

        let loaded = image::open(&path).unwrap().to_rgba8();
        assert_eq!(*loaded.get_pixel(0, 0), Rgba([0, 0, 0, 0]));
        assert_eq!(*loaded.get_pixel(10, 10), Rgba([255, 255, 255, 255]));
    }
}
