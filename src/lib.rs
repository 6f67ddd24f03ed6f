#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::uninlined_format_args)]

//! # Image Operation Micro-Benchmark
//!
//! A single-call latency harness for a fixed catalog of image-processing
//! primitives. Each invocation decodes one input image, prepares any derived
//! inputs, and times exactly one call of the selected operation.
//!
//! ## Features
//!
//! - **Fixed Catalog**: 13 tasks (`split`, `LUT`, `adaptiveThreshold`, `blur`,
//!   `Canny`, `cvtColor`, `boxFilter`, `dilate`, `erode`, `findContours`,
//!   `GaussianBlur`, `resize`, `stackBlur`)
//! - **Setup Exclusion**: decoding and derived inputs are never timed
//! - **Pluggable Backends**: every primitive goes through [`ImageOps`]
//! - **CLI Integration**: optional command-line interface (enable with `cli` feature)
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use imgop_bench::{BenchmarkRunner, CpuBackend};
//! use std::path::Path;
//!
//! let runner = BenchmarkRunner::new(Box::new(CpuBackend::new()));
//! let sample = runner.run("GaussianBlur", Path::new("input.jpg"))?;
//! println!("{}", sample);
//! # Ok::<(), imgop_bench::BenchError>(())
//! ```
//!
//! ### Feature Flags
//!
//! - `cli` (default): command-line interface and tracing subscriber
//! - `webp-support` (default): WebP input decoding
//!
//! ### Library-Only Usage
//!
//! ```toml
//! [dependencies]
//! imgop-bench = { version = "0.0.1", default-features = false }
//! ```

pub mod backends;
pub mod catalog;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod error;
pub mod ops;
pub mod registry;
pub mod runner;
pub mod services;
pub mod timing;
#[cfg(feature = "cli")]
pub mod tracing_config;

// Public API exports
pub use backends::CpuBackend;
pub use catalog::{BenchmarkUnit, UnitFn, CATALOG};
pub use config::{BenchConfig, BenchConfigBuilder, BLUR_SIZE, RESIZE_TARGET};
pub use error::{BenchError, Result};
pub use ops::{Contour, ImageOps, LookupTable, StructuringElement};
pub use registry::TaskRegistry;
pub use runner::BenchmarkRunner;
pub use services::ImageIOService;
pub use timing::{measure_single_call, TimingSample};

#[cfg(feature = "cli")]
pub use tracing_config::{init_cli_tracing, TracingConfig};
