//! Single-call measurement around one image operation

use crate::error::Result;
use instant::{Duration, Instant};
use std::fmt;

/// Elapsed time of one measured call
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct TimingSample {
    elapsed_ms: f64,
}

impl TimingSample {
    /// Build a sample from a monotonic clock span
    pub fn from_duration(elapsed: Duration) -> Self {
        Self {
            elapsed_ms: elapsed.as_secs_f64() * 1000.0,
        }
    }

    /// Elapsed milliseconds, never negative
    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed_ms
    }
}

impl fmt::Display for TimingSample {
    /// Fixed-point milliseconds with three fractional digits
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}", self.elapsed_ms)
    }
}

/// Run `setup` untimed, then time exactly one call of `operation`
///
/// The operation output is kept alive until the clock has stopped so that
/// neither the optimizer nor deallocation leaks into the measured span.
///
/// # Errors
/// Whatever `setup` returns; the operation is never attempted in that case.
pub fn measure_single_call<I, O, S, F>(setup: S, operation: F) -> Result<TimingSample>
where
    S: FnOnce() -> Result<I>,
    F: FnOnce(I) -> O,
{
    let input = setup()?;

    let start = Instant::now();
    let output = std::hint::black_box(operation(std::hint::black_box(input)));
    let elapsed = start.elapsed();

    drop(output);
    Ok(TimingSample::from_duration(elapsed))
}
