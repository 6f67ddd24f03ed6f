//! Image operations backend abstraction
//!
//! Every decode, setup derivation and measured primitive a benchmark unit
//! performs goes through [`ImageOps`], so alternative implementations (or a
//! recording double in tests) can be swapped in without touching the units.

use crate::error::Result;
use image::{GrayImage, RgbImage};
use std::path::Path;

/// 256-entry per-sample lookup table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupTable {
    entries: [u8; 256],
}

impl LookupTable {
    /// Build a table by evaluating `map` for every byte value
    pub fn from_fn<F: Fn(u8) -> u8>(map: F) -> Self {
        let mut entries = [0u8; 256];
        for (i, entry) in entries.iter_mut().enumerate() {
            *entry = map(i as u8);
        }
        Self { entries }
    }

    /// `table[i] = 255 - i`
    pub fn inversion() -> Self {
        Self::from_fn(|v| 255 - v)
    }

    #[inline]
    pub fn get(&self, value: u8) -> u8 {
        self.entries[usize::from(value)]
    }
}

/// Rectangular structuring element anchored at its center
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StructuringElement {
    width: u32,
    height: u32,
}

impl StructuringElement {
    /// Build a `width × height` rectangle; zero extents are raised to 1
    pub fn rectangle(width: u32, height: u32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }
}

/// Ordered corner points of one outer border, straight runs collapsed
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Contour {
    pub points: Vec<(i32, i32)>,
}

/// Trait for image operation backends
///
/// Measured primitives return plain values: a failure inside one is an
/// unrecoverable fault of the backend and panics.
pub trait ImageOps {
    /// Short backend identifier used in logs
    fn name(&self) -> &'static str;

    /// Decode an image as 3-channel color
    ///
    /// # Errors
    /// - File missing, unreadable, unsupported, or decodes to an empty buffer
    fn load_color(&self, path: &Path) -> Result<RgbImage>;

    /// Decode an image as single-channel grayscale
    ///
    /// # Errors
    /// - File missing, unreadable, unsupported, or decodes to an empty buffer
    fn load_grayscale(&self, path: &Path) -> Result<GrayImage>;

    /// Build a lookup table from a per-value mapping
    fn build_lut(&self, map: &dyn Fn(u8) -> u8) -> LookupTable {
        LookupTable::from_fn(map)
    }

    /// Build a rectangular structuring element
    fn structuring_element(&self, width: u32, height: u32) -> StructuringElement {
        StructuringElement::rectangle(width, height)
    }

    /// Fixed binary threshold: `value > thresh ? 255 : 0`
    fn threshold(&self, gray: &GrayImage, thresh: u8) -> GrayImage;

    /// Split into one plane per channel
    fn split(&self, image: &RgbImage) -> Vec<GrayImage>;

    /// Apply a lookup table to every sample in place
    fn apply_lut(&self, image: &mut RgbImage, lut: &LookupTable);

    /// Adaptive mean threshold with binary output
    fn adaptive_threshold(
        &self,
        gray: &GrayImage,
        max_value: u8,
        block_size: u32,
        constant: i32,
    ) -> GrayImage;

    /// Normalized box blur with a `ksize × ksize` kernel
    fn blur(&self, image: &RgbImage, ksize: u32) -> RgbImage;

    /// Same-depth normalized box filter with a `ksize × ksize` kernel
    fn box_filter(&self, image: &RgbImage, ksize: u32) -> RgbImage;

    /// Canny edge detection
    fn canny(&self, gray: &GrayImage, low_threshold: f32, high_threshold: f32) -> GrayImage;

    /// Color to grayscale conversion with BT.601 weights
    fn cvt_color(&self, image: &RgbImage) -> GrayImage;

    /// Morphological dilation
    fn dilate(&self, image: &RgbImage, element: &StructuringElement) -> RgbImage;

    /// Morphological erosion
    fn erode(&self, image: &RgbImage, element: &StructuringElement) -> RgbImage;

    /// Outermost borders of a binary image (non-zero is foreground)
    fn find_contours(&self, binary: &GrayImage) -> Vec<Contour>;

    /// Gaussian blur with a `ksize × ksize` kernel; `sigma <= 0` derives it from `ksize`
    fn gaussian_blur(&self, image: &RgbImage, ksize: u32, sigma: f32) -> RgbImage;

    /// Bilinear resample to the given dimensions
    fn resize(&self, image: &RgbImage, width: u32, height: u32) -> RgbImage;

    /// Stack blur with the given radius
    fn stack_blur(&self, image: &RgbImage, radius: u32) -> RgbImage;
}
