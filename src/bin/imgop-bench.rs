//! Image operation micro-benchmark CLI
//!
//! Runs one image-processing primitive once and prints its elapsed
//! milliseconds.

#[cfg(feature = "cli")]
use imgop_bench::cli;

#[cfg(feature = "cli")]
fn main() -> std::process::ExitCode {
    cli::main()
}

#[cfg(not(feature = "cli"))]
fn main() {
    panic!("CLI feature not enabled. Please rebuild with --features cli");
}
