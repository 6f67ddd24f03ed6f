//! Configuration shared by every benchmark unit

use crate::error::{BenchError, Result};
use serde::{Deserialize, Serialize};

/// Kernel extent used by the size-parameterized operations
/// (`blur`, `boxFilter`, `GaussianBlur`, `stackBlur`)
pub const BLUR_SIZE: u32 = 11;

/// Largest accepted blur kernel extent
pub const MAX_BLUR_SIZE: u32 = 4095;

/// Target dimensions of the `resize` task
pub const RESIZE_TARGET: (u32, u32) = (2000, 2000);

/// Operation parameters for a single benchmark invocation
///
/// One value is built at startup and handed by reference to the unit that
/// runs; nothing mutates it afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchConfig {
    /// Kernel width and height for the blur family (odd, 1..=4095)
    pub blur_size: u32,
    /// Output dimensions of the resize task
    pub resize_width: u32,
    pub resize_height: u32,
    /// Canny hysteresis thresholds
    pub canny_low: f32,
    pub canny_high: f32,
    /// Neighbourhood size of the adaptive mean threshold (odd, > 1)
    pub adaptive_block_size: u32,
    /// Constant subtracted from the neighbourhood mean
    pub adaptive_constant: i32,
    /// Binarisation threshold applied before contour extraction
    pub binarize_threshold: u8,
    /// Rectangular structuring element extent for dilate/erode
    pub morph_kernel_size: u32,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            blur_size: BLUR_SIZE,
            resize_width: RESIZE_TARGET.0,
            resize_height: RESIZE_TARGET.1,
            canny_low: 50.0,
            canny_high: 150.0,
            adaptive_block_size: 11,
            adaptive_constant: 2,
            binarize_threshold: 127,
            morph_kernel_size: 3,
        }
    }
}

impl BenchConfig {
    /// Create a builder for custom parameters
    pub fn builder() -> BenchConfigBuilder {
        BenchConfigBuilder::default()
    }

    /// Radius of the stack blur derived from `blur_size`
    pub fn stack_blur_radius(&self) -> u32 {
        self.blur_size / 2
    }

    /// Validate configuration parameters
    ///
    /// # Errors
    /// - Even or zero kernel sizes, or a blur size above [`MAX_BLUR_SIZE`]
    /// - Zero resize target
    /// - Canny low threshold above the high threshold
    pub fn validate(&self) -> Result<()> {
        if self.blur_size == 0 || self.blur_size % 2 == 0 || self.blur_size > MAX_BLUR_SIZE {
            return Err(BenchError::config_value_error(
                "blur size",
                self.blur_size,
                "odd, 1..=4095",
            ));
        }

        if self.adaptive_block_size < 3 || self.adaptive_block_size % 2 == 0 {
            return Err(BenchError::config_value_error(
                "adaptive threshold block size",
                self.adaptive_block_size,
                "odd, >= 3",
            ));
        }

        if self.resize_width == 0 || self.resize_height == 0 {
            return Err(BenchError::invalid_config(format!(
                "Resize target must be non-empty, got {}x{}",
                self.resize_width, self.resize_height
            )));
        }

        if self.canny_low > self.canny_high {
            return Err(BenchError::invalid_config(format!(
                "Canny low threshold {} exceeds high threshold {}",
                self.canny_low, self.canny_high
            )));
        }

        if self.morph_kernel_size == 0 {
            return Err(BenchError::config_value_error(
                "morphology kernel size",
                self.morph_kernel_size,
                ">= 1",
            ));
        }

        Ok(())
    }
}

/// Builder for [`BenchConfig`]
#[derive(Debug, Default)]
pub struct BenchConfigBuilder {
    config: BenchConfig,
}

impl BenchConfigBuilder {
    /// Set blur kernel extent
    #[must_use]
    pub fn blur_size(mut self, size: u32) -> Self {
        self.config.blur_size = size;
        self
    }

    /// Set resize target
    #[must_use]
    pub fn resize_target(mut self, width: u32, height: u32) -> Self {
        self.config.resize_width = width;
        self.config.resize_height = height;
        self
    }

    /// Set Canny thresholds
    #[must_use]
    pub fn canny_thresholds(mut self, low: f32, high: f32) -> Self {
        self.config.canny_low = low;
        self.config.canny_high = high;
        self
    }

    /// Set adaptive threshold block size and constant
    #[must_use]
    pub fn adaptive_threshold(mut self, block_size: u32, constant: i32) -> Self {
        self.config.adaptive_block_size = block_size;
        self.config.adaptive_constant = constant;
        self
    }

    /// Set binarisation threshold used before contour extraction
    #[must_use]
    pub fn binarize_threshold(mut self, threshold: u8) -> Self {
        self.config.binarize_threshold = threshold;
        self
    }

    /// Set structuring element extent
    #[must_use]
    pub fn morph_kernel_size(mut self, size: u32) -> Self {
        self.config.morph_kernel_size = size;
        self
    }

    /// Build and validate the configuration
    pub fn build(self) -> Result<BenchConfig> {
        let config = self.config;
        config.validate()?;
        Ok(config)
    }
}
