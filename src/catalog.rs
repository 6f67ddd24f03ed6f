//! The fixed catalog of benchmark units
//!
//! Every unit decodes and prepares its input inside the setup closure and
//! issues exactly one backend call inside the measured closure of
//! [`measure_single_call`].

use crate::{
    config::BenchConfig,
    error::Result,
    ops::ImageOps,
    timing::{measure_single_call, TimingSample},
};
use std::fmt;
use std::path::Path;

/// Signature shared by every unit
pub type UnitFn = fn(&dyn ImageOps, &BenchConfig, &Path) -> Result<TimingSample>;

/// A named single-operation timing routine
#[derive(Clone, Copy)]
pub struct BenchmarkUnit {
    name: &'static str,
    description: &'static str,
    run: UnitFn,
}

impl BenchmarkUnit {
    pub const fn new(name: &'static str, description: &'static str, run: UnitFn) -> Self {
        Self {
            name,
            description,
            run,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn description(&self) -> &'static str {
        self.description
    }

    /// Decode, prepare, time the operation once
    ///
    /// # Errors
    /// - `BenchError::ImageLoad` when the input cannot be decoded; nothing is
    ///   timed in that case
    pub fn run(&self, ops: &dyn ImageOps, config: &BenchConfig, path: &Path) -> Result<TimingSample> {
        (self.run)(ops, config, path)
    }
}

impl fmt::Debug for BenchmarkUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BenchmarkUnit")
            .field("name", &self.name)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

/// All supported tasks, in canonical order
pub const CATALOG: [BenchmarkUnit; 13] = [
    BenchmarkUnit::new("split", "split a color image into channel planes", bench_split),
    BenchmarkUnit::new("LUT", "apply a 256-entry inversion lookup table", bench_lut),
    BenchmarkUnit::new(
        "adaptiveThreshold",
        "adaptive mean threshold on a grayscale decode",
        bench_adaptive_threshold,
    ),
    BenchmarkUnit::new("blur", "normalized box blur", bench_blur),
    BenchmarkUnit::new("Canny", "Canny edge detection on grayscale", bench_canny),
    BenchmarkUnit::new("cvtColor", "color to grayscale conversion", bench_cvt_color),
    BenchmarkUnit::new("boxFilter", "same-depth normalized box filter", bench_box_filter),
    BenchmarkUnit::new("dilate", "dilation with a rectangular element", bench_dilate),
    BenchmarkUnit::new("erode", "erosion with a rectangular element", bench_erode),
    BenchmarkUnit::new(
        "findContours",
        "external contours of a binarized image",
        bench_find_contours,
    ),
    BenchmarkUnit::new("GaussianBlur", "Gaussian blur, sigma from kernel size", bench_gaussian_blur),
    BenchmarkUnit::new("resize", "bilinear resize to the fixed target", bench_resize),
    BenchmarkUnit::new("stackBlur", "stack blur", bench_stack_blur),
];

fn bench_split(ops: &dyn ImageOps, _config: &BenchConfig, path: &Path) -> Result<TimingSample> {
    measure_single_call(|| ops.load_color(path), |src| ops.split(&src))
}

fn bench_lut(ops: &dyn ImageOps, _config: &BenchConfig, path: &Path) -> Result<TimingSample> {
    measure_single_call(
        || {
            let src = ops.load_color(path)?;
            let lut = ops.build_lut(&|v: u8| 255 - v);
            Ok((src, lut))
        },
        |(mut src, lut)| {
            ops.apply_lut(&mut src, &lut);
            src
        },
    )
}

fn bench_adaptive_threshold(
    ops: &dyn ImageOps,
    config: &BenchConfig,
    path: &Path,
) -> Result<TimingSample> {
    measure_single_call(
        || ops.load_grayscale(path),
        |gray| {
            ops.adaptive_threshold(
                &gray,
                u8::MAX,
                config.adaptive_block_size,
                config.adaptive_constant,
            )
        },
    )
}

fn bench_blur(ops: &dyn ImageOps, config: &BenchConfig, path: &Path) -> Result<TimingSample> {
    measure_single_call(|| ops.load_color(path), |src| ops.blur(&src, config.blur_size))
}

fn bench_canny(ops: &dyn ImageOps, config: &BenchConfig, path: &Path) -> Result<TimingSample> {
    measure_single_call(
        || {
            let src = ops.load_color(path)?;
            Ok(ops.cvt_color(&src))
        },
        |gray| ops.canny(&gray, config.canny_low, config.canny_high),
    )
}

fn bench_cvt_color(ops: &dyn ImageOps, _config: &BenchConfig, path: &Path) -> Result<TimingSample> {
    measure_single_call(|| ops.load_color(path), |src| ops.cvt_color(&src))
}

fn bench_box_filter(ops: &dyn ImageOps, config: &BenchConfig, path: &Path) -> Result<TimingSample> {
    measure_single_call(
        || ops.load_color(path),
        |src| ops.box_filter(&src, config.blur_size),
    )
}

fn bench_dilate(ops: &dyn ImageOps, config: &BenchConfig, path: &Path) -> Result<TimingSample> {
    measure_single_call(
        || {
            let src = ops.load_color(path)?;
            let kernel =
                ops.structuring_element(config.morph_kernel_size, config.morph_kernel_size);
            Ok((src, kernel))
        },
        |(src, kernel)| ops.dilate(&src, &kernel),
    )
}

fn bench_erode(ops: &dyn ImageOps, config: &BenchConfig, path: &Path) -> Result<TimingSample> {
    measure_single_call(
        || {
            let src = ops.load_color(path)?;
            let kernel =
                ops.structuring_element(config.morph_kernel_size, config.morph_kernel_size);
            Ok((src, kernel))
        },
        |(src, kernel)| ops.erode(&src, &kernel),
    )
}

fn bench_find_contours(
    ops: &dyn ImageOps,
    config: &BenchConfig,
    path: &Path,
) -> Result<TimingSample> {
    measure_single_call(
        || {
            let src = ops.load_color(path)?;
            let gray = ops.cvt_color(&src);
            Ok(ops.threshold(&gray, config.binarize_threshold))
        },
        |binary| ops.find_contours(&binary),
    )
}

fn bench_gaussian_blur(
    ops: &dyn ImageOps,
    config: &BenchConfig,
    path: &Path,
) -> Result<TimingSample> {
    measure_single_call(
        || ops.load_color(path),
        |src| ops.gaussian_blur(&src, config.blur_size, 0.0),
    )
}

fn bench_resize(ops: &dyn ImageOps, config: &BenchConfig, path: &Path) -> Result<TimingSample> {
    measure_single_call(
        || ops.load_color(path),
        |src| ops.resize(&src, config.resize_width, config.resize_height),
    )
}

fn bench_stack_blur(ops: &dyn ImageOps, config: &BenchConfig, path: &Path) -> Result<TimingSample> {
    measure_single_call(
        || ops.load_color(path),
        |src| ops.stack_blur(&src, config.stack_blur_radius()),
    )
}
