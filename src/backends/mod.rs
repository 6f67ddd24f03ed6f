//! Backend implementations of the image operations
//!
//! - CPU backend (pure Rust, `image` + `imageproc` plus local kernels)

pub mod cpu;
pub(crate) mod filters;

// Test utilities for backend testing
#[cfg(test)]
pub mod test_utils;

pub use self::cpu::CpuBackend;
