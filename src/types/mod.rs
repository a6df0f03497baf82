mod cluster_count;
mod error;
mod image;
mod palette;

pub use cluster_count::*;
pub use error::*;
pub use image::*;
pub use palette::*;
