//! Shared fixtures for the integration tests

use image::{Rgb, RgbImage};
use std::path::{Path, PathBuf};

/// Write a colored test pattern with a filled square, so that every
/// operation (contours and edges included) has structure to work on
pub fn write_pattern_image(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let path = dir.join(name);
    let (x0, y0) = (width / 4, height / 4);
    let (x1, y1) = (width * 3 / 4, height * 3 / 4);
    let image = RgbImage::from_fn(width, height, |x, y| {
        if (x0..x1).contains(&x) && (y0..y1).contains(&y) {
            Rgb([230, 220, 210])
        } else {
            Rgb([
                ((x * 97) % 100) as u8,
                ((y * 53) % 100) as u8,
                (((x + y) * 31) % 100) as u8,
            ])
        }
    });
    image.save(&path).expect("Failed to write fixture image");
    path
}

/// The full catalog, in canonical order
#[allow(dead_code)]
pub const ALL_TASKS: [&str; 13] = [
    "split",
    "LUT",
    "adaptiveThreshold",
    "blur",
    "Canny",
    "cvtColor",
    "boxFilter",
    "dilate",
    "erode",
    "findContours",
    "GaussianBlur",
    "resize",
    "stackBlur",
];

/// Whether `line` is a non-negative decimal with exactly three fractional digits
#[allow(dead_code)]
pub fn is_timing_line(line: &str) -> bool {
    match line.split_once('.') {
        Some((whole, frac)) => {
            !whole.is_empty()
                && whole.bytes().all(|b| b.is_ascii_digit())
                && frac.len() == 3
                && frac.bytes().all(|b| b.is_ascii_digit())
        },
        None => false,
    }
}
