//! Test utilities and a recording backend for testing the harness
//!
//! `RecordingOps` delegates the actual pixel work to [`CpuBackend`] and logs
//! every call, so tests can check the exact call sequence of a unit. An
//! optional per-call sleep makes the number of timed calls observable.

use super::cpu::CpuBackend;
use crate::{
    error::{BenchError, Result},
    ops::{Contour, ImageOps, LookupTable, StructuringElement},
};
use image::{GrayImage, RgbImage};
use instant::Duration;
use std::path::Path;
use std::sync::{Arc, Mutex};

/// Recording backend for testing
#[derive(Debug, Clone, Default)]
pub struct RecordingOps {
    inner: CpuBackend,
    /// Call history for verification in tests
    call_history: Arc<Mutex<Vec<String>>>,
    /// Sleep injected into every recorded call
    call_delay: Option<Duration>,
    /// Whether to simulate decode failure
    should_fail_decode: bool,
}

impl RecordingOps {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a backend whose calls each sleep for `delay`
    #[must_use]
    pub fn with_call_delay(delay: Duration) -> Self {
        Self {
            call_delay: Some(delay),
            ..Self::default()
        }
    }

    /// Create a backend that fails every decode
    #[must_use]
    pub fn new_failing_decode() -> Self {
        Self {
            should_fail_decode: true,
            ..Self::default()
        }
    }

    /// Get the call history for verification in tests
    pub fn get_call_history(&self) -> Vec<String> {
        self.call_history.lock().unwrap().clone()
    }

    /// Clear the call history
    pub fn clear_call_history(&self) {
        self.call_history.lock().unwrap().clear();
    }

    /// Record a method call for testing verification
    fn record_call(&self, method: &str) {
        if let Ok(mut history) = self.call_history.lock() {
            history.push(method.to_string());
        }
        if let Some(delay) = self.call_delay {
            std::thread::sleep(delay);
        }
    }

    fn check_decode(&self, path: &Path) -> Result<()> {
        if self.should_fail_decode {
            return Err(BenchError::image_load(path, "simulated decode failure"));
        }
        Ok(())
    }
}

impl ImageOps for RecordingOps {
    fn name(&self) -> &'static str {
        "recording"
    }

    fn load_color(&self, path: &Path) -> Result<RgbImage> {
        self.record_call("load_color");
        self.check_decode(path)?;
        self.inner.load_color(path)
    }

    fn load_grayscale(&self, path: &Path) -> Result<GrayImage> {
        self.record_call("load_grayscale");
        self.check_decode(path)?;
        self.inner.load_grayscale(path)
    }

    fn build_lut(&self, map: &dyn Fn(u8) -> u8) -> LookupTable {
        self.record_call("build_lut");
        self.inner.build_lut(map)
    }

    fn structuring_element(&self, width: u32, height: u32) -> StructuringElement {
        self.record_call("structuring_element");
        self.inner.structuring_element(width, height)
    }

    fn threshold(&self, gray: &GrayImage, thresh: u8) -> GrayImage {
        self.record_call("threshold");
        self.inner.threshold(gray, thresh)
    }

    fn split(&self, image: &RgbImage) -> Vec<GrayImage> {
        self.record_call("split");
        self.inner.split(image)
    }

    fn apply_lut(&self, image: &mut RgbImage, lut: &LookupTable) {
        self.record_call("apply_lut");
        self.inner.apply_lut(image, lut);
    }

    fn adaptive_threshold(
        &self,
        gray: &GrayImage,
        max_value: u8,
        block_size: u32,
        constant: i32,
    ) -> GrayImage {
        self.record_call("adaptive_threshold");
        self.inner
            .adaptive_threshold(gray, max_value, block_size, constant)
    }

    fn blur(&self, image: &RgbImage, ksize: u32) -> RgbImage {
        self.record_call("blur");
        self.inner.blur(image, ksize)
    }

    fn box_filter(&self, image: &RgbImage, ksize: u32) -> RgbImage {
        self.record_call("box_filter");
        self.inner.box_filter(image, ksize)
    }

    fn canny(&self, gray: &GrayImage, low_threshold: f32, high_threshold: f32) -> GrayImage {
        self.record_call("canny");
        self.inner.canny(gray, low_threshold, high_threshold)
    }

    fn cvt_color(&self, image: &RgbImage) -> GrayImage {
        self.record_call("cvt_color");
        self.inner.cvt_color(image)
    }

    fn dilate(&self, image: &RgbImage, element: &StructuringElement) -> RgbImage {
        self.record_call("dilate");
        self.inner.dilate(image, element)
    }

    fn erode(&self, image: &RgbImage, element: &StructuringElement) -> RgbImage {
        self.record_call("erode");
        self.inner.erode(image, element)
    }

    fn find_contours(&self, binary: &GrayImage) -> Vec<Contour> {
        self.record_call("find_contours");
        self.inner.find_contours(binary)
    }

    fn gaussian_blur(&self, image: &RgbImage, ksize: u32, sigma: f32) -> RgbImage {
        self.record_call("gaussian_blur");
        self.inner.gaussian_blur(image, ksize, sigma)
    }

    fn resize(&self, image: &RgbImage, width: u32, height: u32) -> RgbImage {
        self.record_call("resize");
        self.inner.resize(image, width, height)
    }

    fn stack_blur(&self, image: &RgbImage, radius: u32) -> RgbImage {
        self.record_call("stack_blur");
        self.inner.stack_blur(image, radius)
    }
}

/// Write a small gradient PNG into `dir` and return its path
pub fn write_test_image(dir: &Path, width: u32, height: u32) -> std::path::PathBuf {
    let path = dir.join(format!("input_{}x{}.png", width, height));
    let image = RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([
            ((x * 255) / width.max(1)) as u8,
            ((y * 255) / height.max(1)) as u8,
            (((x + y) * 127) / (width + height).max(1)) as u8,
        ])
    });
    image.save(&path).unwrap();
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_records_calls_in_order() {
        let dir = tempdir().unwrap();
        let path = write_test_image(dir.path(), 8, 8);
        let ops = RecordingOps::new();

        let image = ops.load_color(&path).unwrap();
        let _ = ops.blur(&image, 3);
        assert_eq!(ops.get_call_history(), vec!["load_color", "blur"]);

        ops.clear_call_history();
        assert!(ops.get_call_history().is_empty());
    }

    #[test]
    fn test_failing_decode() {
        let dir = tempdir().unwrap();
        let path = write_test_image(dir.path(), 4, 4);
        let ops = RecordingOps::new_failing_decode();
        let err = ops.load_color(&path).unwrap_err();
        assert!(matches!(err, BenchError::ImageLoad { .. }));
    }

    #[test]
    fn test_clones_share_history() {
        let ops = RecordingOps::new();
        let clone = ops.clone();
        let _ = clone.build_lut(&|v: u8| v);
        assert_eq!(ops.get_call_history(), vec!["build_lut"]);
    }

    #[test]
    fn test_call_delay_applies_to_every_call() {
        let delay = Duration::from_millis(5);
        let ops = RecordingOps::with_call_delay(delay);
        let start = instant::Instant::now();
        let _ = ops.build_lut(&|v: u8| v);
        let _ = ops.structuring_element(3, 3);
        assert!(start.elapsed() >= delay * 2);
    }
}
