use crate::{
    ClusterCount, EmptyImageError, ImageBuf, ImageRef, cluster::Clusters,
    color_map::ClusterColorMap, dedup, mst::SpanningTree, smooth::GaussianSmoothing,
};
use palette::Srgb;

/// A builder struct to specify image quantization options.
///
/// # Examples
///
/// First, specify any options you want:
/// ```
/// # fn main() -> Result<(), quantree::ClusterCountFromIntError> {
/// use quantree::{Pipeline, smooth::GaussianSmoothing};
///
/// let pipeline = Pipeline::new()
///     .cluster_count(32u32.try_into()?)
///     .smoothing(GaussianSmoothing::new(5, 1.0))
///     .parallel(true);
/// # Ok(())
/// # }
/// ```
///
/// Then, provide the input image and run the pipeline:
/// ```
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use palette::Srgb;
/// use quantree::{ImageBuf, Pipeline};
///
/// let image = ImageBuf::from_pixel(16, 16, Srgb::new(200u8, 10, 10)).unwrap();
///
/// let quantized = Pipeline::new()
///     .cluster_count(8u32.try_into()?)
///     .input_image(image.as_ref())
///     .quantize()?;
///
/// assert_eq!(quantized.image().dimensions(), image.dimensions());
/// assert_eq!(quantized.distinct_colors(), 1);
/// assert_eq!(quantized.mst_cost(), 0.0);
/// # Ok(())
/// # }
/// ```
#[must_use]
#[derive(Debug, Clone, PartialEq)]
pub struct Pipeline {
    /// The target number of color clusters.
    k: ClusterCount,
    /// An optional Gaussian smoothing pass applied before quantization.
    smoothing: Option<GaussianSmoothing>,
    /// Whether to remap pixels in parallel.
    #[cfg(feature = "threads")]
    parallel: bool,
}

impl Pipeline {
    /// Create a new [`Pipeline`] with default options.
    pub fn new() -> Self {
        Self {
            k: ClusterCount::DEFAULT,
            smoothing: None,
            #[cfg(feature = "threads")]
            parallel: false,
        }
    }

    /// Sets the target number of color clusters, which is the (maximum)
    /// number of colors in the output image.
    ///
    /// A count greater than the number of distinct colors in the input is
    /// clamped, in which case the output reproduces the input exactly.
    ///
    /// The default cluster count is [`ClusterCount::DEFAULT`].
    #[inline]
    pub fn cluster_count(mut self, k: ClusterCount) -> Self {
        self.k = k;
        self
    }

    /// Sets the Gaussian smoothing to apply to the image before quantization.
    ///
    /// Smoothing reduces the number of distinct colors, which in turn shrinks
    /// the graph the spanning tree is built over. To disable smoothing,
    /// provide `None`.
    ///
    /// The default value is `None`.
    #[inline]
    pub fn smoothing(mut self, smoothing: impl Into<Option<GaussianSmoothing>>) -> Self {
        self.smoothing = smoothing.into();
        self
    }

    /// Sets whether to remap pixels across multiple threads.
    ///
    /// Remapping a pixel is a pure table lookup, so the output does not
    /// depend on this option.
    ///
    /// The default value is `false`.
    #[cfg(feature = "threads")]
    #[inline]
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Specify the input image, ready to be quantized.
    #[inline]
    pub fn input_image(self, image: ImageRef<'_, Srgb<u8>>) -> PipelineWithImageInput<'_> {
        PipelineWithImageInput { options: self, image }
    }
}

impl Default for Pipeline {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

/// A [`Pipeline`] paired with an input image, ready to be quantized.
#[must_use]
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineWithImageInput<'a> {
    /// The options to use when quantizing the image.
    options: Pipeline,
    /// The input image.
    image: ImageRef<'a, Srgb<u8>>,
}

impl PipelineWithImageInput<'_> {
    /// Runs the pipeline and returns the [`Quantized`] result.
    ///
    /// The input image is left untouched; the quantized pixels land in a new
    /// buffer of the same dimensions. Each stage consumes the previous
    /// stage's output: distinct colors, spanning tree, clusters, centroids,
    /// remap.
    ///
    /// # Errors
    ///
    /// Returns an error if the input image has zero pixels. No partial output
    /// is produced on error.
    pub fn quantize(self) -> Result<Quantized, EmptyImageError> {
        let Self { options, image } = self;

        let smoothed = options.smoothing.map(|smoothing| smoothing.smooth(image));
        let input = smoothed.as_ref().map_or(image, ImageBuf::as_ref);

        let palette = dedup::distinct_colors(input).ok_or(EmptyImageError)?;
        let distinct_colors = palette.num_colors();

        let tree = SpanningTree::of_palette(&palette);
        let mst_cost = tree.cost();

        let clusters = Clusters::from_tree(&tree, options.k);
        let color_map = ClusterColorMap::new(&clusters, &palette);

        #[cfg(feature = "threads")]
        let image = if options.parallel {
            input.map_ref(|pixels| color_map.map_to_colors_par(pixels))
        } else {
            input.map_ref(|pixels| color_map.map_to_colors(pixels))
        };
        #[cfg(not(feature = "threads"))]
        let image = input.map_ref(|pixels| color_map.map_to_colors(pixels));

        Ok(Quantized {
            image,
            palette: color_map.into_palette(),
            distinct_colors,
            mst_cost,
        })
    }
}

/// The output of a quantization run.
#[derive(Debug, Clone, PartialEq)]
pub struct Quantized {
    /// The quantized image.
    image: ImageBuf<Srgb<u8>>,
    /// The centroid of each cluster, indexed by cluster id.
    palette: Vec<Srgb<u8>>,
    /// The number of distinct colors in the input.
    distinct_colors: u32,
    /// The total weight of the minimum spanning tree.
    mst_cost: f64,
}

impl Quantized {
    /// Returns the quantized image.
    #[inline]
    pub fn image(&self) -> &ImageBuf<Srgb<u8>> {
        &self.image
    }

    /// Returns the quantized image, consuming the result.
    #[must_use]
    #[inline]
    pub fn into_image(self) -> ImageBuf<Srgb<u8>> {
        self.image
    }

    /// Returns the palette of cluster centroids used in the output image.
    #[inline]
    pub fn palette(&self) -> &[Srgb<u8>] {
        &self.palette
    }

    /// Returns the number of distinct colors found in the input image.
    #[inline]
    pub fn distinct_colors(&self) -> u32 {
        self.distinct_colors
    }

    /// Returns the total weight of the minimum spanning tree over the
    /// distinct colors.
    #[inline]
    pub fn mst_cost(&self) -> f64 {
        self.mst_cost
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::*;

    fn k(value: u32) -> ClusterCount {
        ClusterCount::new(value).unwrap()
    }

    #[test]
    fn empty_image_is_an_error() {
        let result = Pipeline::new().input_image(ImageRef::default()).quantize();
        assert_eq!(result.unwrap_err(), EmptyImageError);
    }

    #[test]
    fn black_and_white_checkerboard_survives_k2() {
        let image = image_of(
            2,
            2,
            &[(0, 0, 0), (255, 255, 255), (0, 0, 0), (255, 255, 255)],
        );
        let quantized = Pipeline::new()
            .cluster_count(k(2))
            .input_image(image.as_ref())
            .quantize()
            .unwrap();

        assert_eq!(quantized.distinct_colors(), 2);
        assert_eq!(quantized.palette().len(), 2);
        assert_eq!(quantized.image(), &image);
    }

    #[test]
    fn near_blacks_merge_into_their_mean() {
        let image = image_of(3, 1, &[(10, 10, 10), (20, 20, 20), (200, 200, 200)]);
        let quantized = Pipeline::new()
            .cluster_count(k(2))
            .input_image(image.as_ref())
            .quantize()
            .unwrap();

        assert_eq!(quantized.distinct_colors(), 3);
        let expected = image_of(3, 1, &[(15, 15, 15), (15, 15, 15), (200, 200, 200)]);
        assert_eq!(quantized.image(), &expected);
    }

    #[test]
    fn k_of_one_floods_the_image_with_the_palette_mean() {
        let image = image_of(2, 2, &[(0, 0, 0), (10, 0, 0), (0, 0, 0), (50, 0, 0)]);
        let quantized = Pipeline::new()
            .cluster_count(k(1))
            .input_image(image.as_ref())
            .quantize()
            .unwrap();

        // distinct colors are (0,0,0), (10,0,0), (50,0,0): mean red 60/3 = 20
        let expected = image_of(2, 2, &[(20, 0, 0); 4]);
        assert_eq!(quantized.image(), &expected);
        assert_eq!(quantized.palette(), &[srgb(20, 0, 0)]);
    }

    #[test]
    fn k_at_or_above_distinct_colors_reproduces_the_input() {
        let image = image_of(
            3,
            2,
            &[
                (1, 2, 3),
                (4, 5, 6),
                (1, 2, 3),
                (90, 80, 70),
                (4, 5, 6),
                (200, 100, 0),
            ],
        );
        for count in [4, 5, 100] {
            let quantized = Pipeline::new()
                .cluster_count(k(count))
                .input_image(image.as_ref())
                .quantize()
                .unwrap();
            assert_eq!(quantized.distinct_colors(), 4);
            assert_eq!(quantized.palette().len(), 4);
            assert_eq!(quantized.image(), &image);
        }
    }

    #[test]
    fn quantizing_twice_with_the_same_k_is_idempotent() {
        let image = image_of(
            4,
            1,
            &[(10, 10, 10), (14, 14, 14), (120, 130, 140), (250, 250, 250)],
        );
        let once = Pipeline::new()
            .cluster_count(k(2))
            .input_image(image.as_ref())
            .quantize()
            .unwrap();
        let twice = Pipeline::new()
            .cluster_count(k(2))
            .input_image(once.image().as_ref())
            .quantize()
            .unwrap();
        assert_eq!(twice.image(), once.image());
    }

    #[test]
    fn cluster_count_is_reported_through_the_palette() {
        let colors: Vec<(u8, u8, u8)> = (0..10u8).map(|i| (i * 25, 0, 255 - i * 25)).collect();
        let image = image_of(10, 1, &colors);
        for count in 1..=10 {
            let quantized = Pipeline::new()
                .cluster_count(k(count))
                .input_image(image.as_ref())
                .quantize()
                .unwrap();
            assert_eq!(quantized.palette().len() as u32, count);
        }
    }

    #[test]
    fn smoothing_runs_before_quantization() {
        let image = image_of(4, 4, &[(100, 100, 100); 16]);
        let smoothing = GaussianSmoothing::new(3, 1.0).unwrap();

        // quantizing with smoothing enabled must match smoothing by hand and
        // then quantizing: the palette and metrics describe the smoothed image
        let expected_input = smoothing.smooth(image.as_ref());
        let expected = Pipeline::new()
            .cluster_count(k(4))
            .input_image(expected_input.as_ref())
            .quantize()
            .unwrap();
        let actual = Pipeline::new()
            .cluster_count(k(4))
            .smoothing(smoothing)
            .input_image(image.as_ref())
            .quantize()
            .unwrap();
        assert_eq!(actual, expected);
        assert_eq!(actual.image().dimensions(), (4, 4));
    }

    #[cfg(feature = "threads")]
    #[test]
    fn parallel_remap_matches_serial_remap() {
        let colors: Vec<(u8, u8, u8)> = (0..64u8).map(|i| (i * 4, i, 255 - i)).collect();
        let image = image_of(8, 8, &colors);
        let serial = Pipeline::new()
            .cluster_count(k(5))
            .input_image(image.as_ref())
            .quantize()
            .unwrap();
        let parallel = Pipeline::new()
            .cluster_count(k(5))
            .parallel(true)
            .input_image(image.as_ref())
            .quantize()
            .unwrap();
        assert_eq!(serial, parallel);
    }
}
