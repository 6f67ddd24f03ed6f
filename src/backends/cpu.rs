//! Pure Rust CPU backend
//!
//! Decoding and resampling come from the `image` crate. Edge detection,
//! binarization and border following come from `imageproc`. The blur family,
//! morphology, luma conversion and adaptive thresholding use the kernels in
//! [`super::filters`].

use super::filters::{self, Border, Layout, MorphOp};
use crate::{
    error::Result,
    ops::{Contour, ImageOps, LookupTable, StructuringElement},
    services::ImageIOService,
};
use image::{imageops::FilterType, GrayImage, Luma, RgbImage};
use imageproc::{
    contours::BorderType,
    contrast::{self, ThresholdType},
};
use std::path::Path;

/// Default backend used by the CLI
#[derive(Debug, Clone, Copy, Default)]
pub struct CpuBackend;

impl CpuBackend {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn convolve(image: &RgbImage, kernel: &[f32]) -> RgbImage {
        let data = filters::convolve_separable(
            image.as_raw(),
            Layout::of(image),
            kernel,
            Border::Reflect101,
        );
        filters::rebuild(image.width(), image.height(), data)
    }

    fn morph(image: &RgbImage, element: &StructuringElement, op: MorphOp) -> RgbImage {
        let data = filters::morphology(image.as_raw(), Layout::of(image), *element, op);
        filters::rebuild(image.width(), image.height(), data)
    }

    fn luma(image: &RgbImage) -> GrayImage {
        filters::rebuild(image.width(), image.height(), filters::luma_bt601(image.as_raw()))
    }
}

impl ImageOps for CpuBackend {
    fn name(&self) -> &'static str {
        "cpu"
    }

    fn load_color(&self, path: &Path) -> Result<RgbImage> {
        ImageIOService::load_color(path)
    }

    fn load_grayscale(&self, path: &Path) -> Result<GrayImage> {
        ImageIOService::load_color(path).map(|image| Self::luma(&image))
    }

    fn threshold(&self, gray: &GrayImage, thresh: u8) -> GrayImage {
        contrast::threshold(gray, thresh, ThresholdType::Binary)
    }

    fn split(&self, image: &RgbImage) -> Vec<GrayImage> {
        let (width, height) = image.dimensions();
        (0..3)
            .map(|channel| {
                GrayImage::from_fn(width, height, |x, y| Luma([image.get_pixel(x, y)[channel]]))
            })
            .collect()
    }

    fn apply_lut(&self, image: &mut RgbImage, lut: &LookupTable) {
        for sample in image.iter_mut() {
            *sample = lut.get(*sample);
        }
    }

    fn adaptive_threshold(
        &self,
        gray: &GrayImage,
        max_value: u8,
        block_size: u32,
        constant: i32,
    ) -> GrayImage {
        let data = filters::adaptive_mean_threshold(
            gray.as_raw(),
            Layout::of(gray),
            max_value,
            block_size,
            constant,
        );
        filters::rebuild(gray.width(), gray.height(), data)
    }

    fn blur(&self, image: &RgbImage, ksize: u32) -> RgbImage {
        self.box_filter(image, ksize)
    }

    fn box_filter(&self, image: &RgbImage, ksize: u32) -> RgbImage {
        Self::convolve(image, &filters::box_kernel(ksize))
    }

    fn canny(&self, gray: &GrayImage, low_threshold: f32, high_threshold: f32) -> GrayImage {
        imageproc::edges::canny(gray, low_threshold, high_threshold)
    }

    fn cvt_color(&self, image: &RgbImage) -> GrayImage {
        Self::luma(image)
    }

    fn dilate(&self, image: &RgbImage, element: &StructuringElement) -> RgbImage {
        Self::morph(image, element, MorphOp::Dilate)
    }

    fn erode(&self, image: &RgbImage, element: &StructuringElement) -> RgbImage {
        Self::morph(image, element, MorphOp::Erode)
    }

    /// Outermost borders only, each reduced to its direction-change points
    fn find_contours(&self, binary: &GrayImage) -> Vec<Contour> {
        imageproc::contours::find_contours::<i32>(binary)
            .into_iter()
            .filter(|contour| {
                matches!(contour.border_type, BorderType::Outer) && contour.parent.is_none()
            })
            .map(|contour| {
                let points: Vec<(i32, i32)> = contour.points.iter().map(|p| (p.x, p.y)).collect();
                filters::approximate_simple(&points)
            })
            .collect()
    }

    fn gaussian_blur(&self, image: &RgbImage, ksize: u32, sigma: f32) -> RgbImage {
        Self::convolve(image, &filters::gaussian_kernel_1d(ksize, sigma))
    }

    fn resize(&self, image: &RgbImage, width: u32, height: u32) -> RgbImage {
        image::imageops::resize(image, width, height, FilterType::Triangle)
    }

    fn stack_blur(&self, image: &RgbImage, radius: u32) -> RgbImage {
        let data = filters::stack_blur(image.as_raw(), Layout::of(image), radius);
        filters::rebuild(image.width(), image.height(), data)
    }
}
