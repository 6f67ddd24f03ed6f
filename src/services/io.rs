//! Image decode service
//!
//! Keeps file access out of the benchmark units so that decoding is always
//! part of the untimed setup phase.

use crate::error::{BenchError, Result};
use image::{DynamicImage, RgbImage};
use std::path::Path;

/// Service for loading benchmark input images
pub struct ImageIOService;

impl ImageIOService {
    /// Load an image from a file path
    ///
    /// Extension-based format detection is tried first, then content-based
    /// detection on the raw bytes.
    ///
    /// # Errors
    /// - `BenchError::ImageLoad` when the file is missing, unreadable, in an
    ///   unsupported format, or decodes to an empty buffer
    ///
    /// # Examples
    /// ```rust,no_run
    /// use imgop_bench::services::ImageIOService;
    ///
    /// let image = ImageIOService::load_image("input.jpg")?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn load_image<P: AsRef<Path>>(path: P) -> Result<DynamicImage> {
        let path_ref = path.as_ref();

        if !path_ref.is_file() {
            return Err(BenchError::image_load(path_ref, "file does not exist"));
        }

        let image = match image::open(path_ref) {
            Ok(img) => img,
            Err(e) => {
                log::debug!(
                    "Extension-based loading failed for {}: {}. Attempting content-based detection.",
                    path_ref.display(),
                    e
                );

                let data = std::fs::read(path_ref)
                    .map_err(|io_err| BenchError::image_load(path_ref, io_err.to_string()))?;

                image::load_from_memory(&data).map_err(|content_err| {
                    BenchError::image_load(
                        path_ref,
                        format!(
                            "extension error: {}; content error: {} ({} bytes)",
                            e,
                            content_err,
                            data.len()
                        ),
                    )
                })?
            },
        };

        if image.width() == 0 || image.height() == 0 {
            return Err(BenchError::image_load(path_ref, "decoded image is empty"));
        }

        log::debug!(
            "Decoded {} ({}x{}, {:?})",
            path_ref.display(),
            image.width(),
            image.height(),
            image.color()
        );
        Ok(image)
    }

    /// Load an image as 3-channel 8-bit color
    pub fn load_color<P: AsRef<Path>>(path: P) -> Result<RgbImage> {
        Self::load_image(path).map(|image| image.to_rgb8())
    }

}
