//! A library for image color quantization by minimum spanning tree clustering.
//!
//! `quantree` reduces the number of colors in an image to a target count `k`:
//!
//! 1. The image's distinct colors are extracted into a palette
//!    (see [`dedup`]); palette indices are graph node ids.
//! 2. A minimum spanning tree is built over the complete graph of the
//!    palette, weighted by Euclidean RGB distance (see [`mst`]).
//! 3. The `k - 1` heaviest tree edges are cut and the remaining connected
//!    components become the color clusters (see [`cluster`]).
//! 4. Every pixel is replaced with the mean color of its cluster
//!    (see [`color_map`]).
//!
//! The heaviest tree edges are exactly the largest color gaps, so this is
//! single-linkage clustering: colors separated by a wide gap end up in
//! different clusters, while runs of similar colors collapse into one.
//!
//! The easiest way to get started is the [`Pipeline`] builder:
//!
//! ```
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use palette::Srgb;
//! use quantree::{ImageBuf, Pipeline};
//!
//! let pixels = vec![
//!     Srgb::new(0u8, 0, 0),
//!     Srgb::new(255, 255, 255),
//!     Srgb::new(0, 0, 0),
//!     Srgb::new(255, 255, 255),
//! ];
//! let image = ImageBuf::new(2, 2, pixels)?;
//!
//! let quantized = Pipeline::new()
//!     .cluster_count(2u32.try_into()?)
//!     .input_image(image.as_ref())
//!     .quantize()?;
//!
//! // black and white are their own cluster centroids
//! assert_eq!(quantized.image(), &image);
//! assert_eq!(quantized.distinct_colors(), 2);
//! # Ok(())
//! # }
//! ```
//!
//! Besides the quantized image, a run reports two metrics: the number of
//! distinct colors in the input and the total weight of the spanning tree.
//!
//! # Features
//!
//! - `image` (default): conversions between the image types in this crate and
//!   [`image::RgbImage`].
//! - `threads` (default): parallel pixel remapping backed by [`rayon`].

mod api;
mod types;

pub mod cluster;
pub mod color_map;
pub mod dedup;
pub mod mst;
pub mod smooth;

pub use api::*;
pub use types::*;

#[cfg(test)]
pub(crate) mod tests {
    use crate::{ImageBuf, PaletteBuf};
    use palette::Srgb;

    pub fn srgb(red: u8, green: u8, blue: u8) -> Srgb<u8> {
        Srgb::new(red, green, blue)
    }

    pub fn image_of(width: u32, height: u32, pixels: &[(u8, u8, u8)]) -> ImageBuf<Srgb<u8>> {
        let pixels = pixels.iter().map(|&(r, g, b)| srgb(r, g, b)).collect();
        ImageBuf::new(width, height, pixels).unwrap()
    }

    /// Build a palette directly from distinct colors, bypassing an image scan.
    pub fn palette_of(colors: &[(u8, u8, u8)]) -> PaletteBuf<Srgb<u8>> {
        let colors: Vec<Srgb<u8>> = colors.iter().map(|&(r, g, b)| srgb(r, g, b)).collect();
        PaletteBuf::new_unchecked(colors)
    }
}
