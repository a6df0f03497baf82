//! Map the colors of an image to their cluster's centroid.

use crate::{PaletteBuf, cluster::Clusters, dedup::color_index};
use palette::Srgb;
#[cfg(feature = "threads")]
use rayon::prelude::*;

/// The number of entries in the dense color lookup table, one per (r, g, b)
/// triple.
const TABLE_LEN: usize = 256 * 256 * 256;

/// The table entry for a color that was not in the palette.
const NO_CLUSTER: u32 = u32::MAX;

/// A color map replacing each original image color with its cluster centroid.
///
/// Consists of the centroid palette (one color per cluster, indexed by
/// cluster id) and a dense table over all 256³ channel triples yielding the
/// cluster id of each original palette color. Looking up a pixel is a single
/// table read, at the price of sizing the table to the full color cube rather
/// than the palette.
#[derive(Clone)]
pub struct ClusterColorMap {
    /// The centroid of each cluster, indexed by cluster id.
    centroids: Vec<Srgb<u8>>,
    /// Cluster ids addressed by [`color_index`]; [`NO_CLUSTER`] marks colors
    /// absent from the palette.
    table: Box<[u32]>,
}

impl ClusterColorMap {
    /// Build the color map for `clusters` over `palette`.
    ///
    /// Each cluster's centroid is the per-channel integer mean of its member
    /// palette colors, truncated toward zero. While summing, every member
    /// color's channel triple is recorded in the lookup table as belonging to
    /// the cluster.
    #[allow(clippy::cast_possible_truncation)]
    #[must_use]
    pub fn new(clusters: &Clusters, palette: &PaletteBuf<Srgb<u8>>) -> Self {
        let mut table = vec![NO_CLUSTER; TABLE_LEN].into_boxed_slice();
        let mut centroids = Vec::with_capacity(clusters.len());
        for (id, members) in clusters.iter().enumerate() {
            let (mut red, mut green, mut blue) = (0u64, 0u64, 0u64);
            for &node in members {
                let color = palette[node];
                red += u64::from(color.red);
                green += u64::from(color.green);
                blue += u64::from(color.blue);
                table[color_index(color)] = id as u32;
            }
            let size = members.len() as u64;
            centroids.push(Srgb::new(
                (red / size) as u8,
                (green / size) as u8,
                (blue / size) as u8,
            ));
        }
        Self { centroids, table }
    }

    /// Returns the centroid palette, indexed by cluster id.
    #[inline]
    pub fn palette(&self) -> &[Srgb<u8>] {
        &self.centroids
    }

    /// Returns the centroid palette as a [`Vec`].
    #[must_use]
    #[inline]
    pub fn into_palette(self) -> Vec<Srgb<u8>> {
        self.centroids
    }

    /// Returns the centroid that replaces the given original color.
    ///
    /// # Panics
    ///
    /// Panics if `color` was not in the palette the map was built over. The
    /// palette covers every color of the input image, so a miss means the
    /// palette and the image have diverged; it is never coerced to a default
    /// color.
    #[must_use]
    pub fn centroid_for(&self, color: Srgb<u8>) -> Srgb<u8> {
        let id = self.table[color_index(color)];
        assert_ne!(
            id, NO_CLUSTER,
            "color ({}, {}, {}) is missing from the cluster table",
            color.red, color.green, color.blue,
        );
        self.centroids[id as usize]
    }

    /// Replace each pixel with its cluster's centroid.
    ///
    /// # Panics
    ///
    /// Panics if a pixel's color was not in the palette the map was built
    /// over; see [`centroid_for`](ClusterColorMap::centroid_for).
    #[must_use]
    pub fn map_to_colors(&self, pixels: &[Srgb<u8>]) -> Vec<Srgb<u8>> {
        pixels.iter().map(|&pixel| self.centroid_for(pixel)).collect()
    }

    /// Replace each pixel with its cluster's centroid, in parallel.
    ///
    /// The mapping of an individual pixel is pure, so the output is identical
    /// to [`map_to_colors`](ClusterColorMap::map_to_colors).
    ///
    /// # Panics
    ///
    /// Panics if a pixel's color was not in the palette the map was built
    /// over; see [`centroid_for`](ClusterColorMap::centroid_for).
    #[cfg(feature = "threads")]
    #[must_use]
    pub fn map_to_colors_par(&self, pixels: &[Srgb<u8>]) -> Vec<Srgb<u8>> {
        pixels
            .par_iter()
            .map(|&pixel| self.centroid_for(pixel))
            .collect()
    }
}

impl std::fmt::Debug for ClusterColorMap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClusterColorMap")
            .field("centroids", &self.centroids)
            .finish_non_exhaustive()
    }
}
