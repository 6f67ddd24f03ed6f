//! Service layer separating file access from benchmark logic

pub mod io;

pub use io::ImageIOService;
