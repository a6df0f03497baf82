//! Optional Gaussian pre-smoothing of the input image.
//!
//! Smoothing an image before quantization merges speckles of near-identical
//! colors, which shrinks the distinct-color count and with it the graph the
//! spanning tree is built over.

use crate::{ImageBuf, ImageRef};
use palette::Srgb;

/// A separable 1D Gaussian smoothing filter.
///
/// The kernel weights are `exp(-y² / 2σ²)` for `y` in `-half..=half`,
/// normalized to sum to one. An even `filter_size` is bumped up by one so
/// the kernel always has a center tap. The filter runs as a vertical pass
/// followed by a horizontal pass; taps falling outside the image are skipped,
/// so edge pixels are slightly darkened rather than mirrored or clamped.
///
/// # Examples
///
/// ```
/// # use quantree::smooth::GaussianSmoothing;
/// let smoothing = GaussianSmoothing::new(5, 1.2).unwrap();
/// assert_eq!(GaussianSmoothing::new(5, 0.0), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaussianSmoothing {
    /// The kernel size in taps; always odd.
    filter_size: u32,
    /// The Gaussian standard deviation.
    sigma: f64,
}

impl GaussianSmoothing {
    /// Create a new [`GaussianSmoothing`] filter.
    ///
    /// Returns `None` if `filter_size` is zero or `sigma` is not a positive,
    /// finite number.
    #[must_use]
    pub fn new(filter_size: u32, sigma: f64) -> Option<Self> {
        if filter_size == 0 || !sigma.is_finite() || sigma <= 0.0 {
            return None;
        }
        // force an odd kernel size
        let filter_size = if filter_size % 2 == 0 {
            filter_size + 1
        } else {
            filter_size
        };
        Some(Self { filter_size, sigma })
    }

    /// Returns the (odd) kernel size in taps.
    #[inline]
    pub fn filter_size(&self) -> u32 {
        self.filter_size
    }

    /// Returns the Gaussian standard deviation.
    #[inline]
    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    /// Returns the normalized kernel weights.
    fn kernel(&self) -> Vec<f64> {
        let half = i64::from(self.filter_size / 2);
        let mut weights: Vec<f64> = (-half..=half)
            .map(|y| {
                let y = y as f64;
                (-(y * y) / (2.0 * self.sigma * self.sigma)).exp()
            })
            .collect();
        let sum: f64 = weights.iter().sum();
        for weight in &mut weights {
            *weight /= sum;
        }
        weights
    }

    /// Smooth an image, returning a new buffer of the same dimensions.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    #[must_use]
    pub fn smooth(&self, image: ImageRef<'_, Srgb<u8>>) -> ImageBuf<Srgb<u8>> {
        let (width, height) = image.dimensions();
        let (width, height) = (width as usize, height as usize);
        let pixels = image.as_slice();
        let kernel = self.kernel();
        let half = (self.filter_size / 2) as i64;

        // vertical pass, accumulating in double precision
        let mut vertical = vec![[0.0f64; 3]; pixels.len()];
        for x in 0..width {
            for y in 0..height {
                let mut sum = [0.0f64; 3];
                for (tap, weight) in kernel.iter().enumerate() {
                    let yy = y as i64 + tap as i64 - half;
                    if yy < 0 || yy >= height as i64 {
                        continue;
                    }
                    let pixel = pixels[yy as usize * width + x];
                    sum[0] += weight * f64::from(pixel.red);
                    sum[1] += weight * f64::from(pixel.green);
                    sum[2] += weight * f64::from(pixel.blue);
                }
                vertical[y * width + x] = sum;
            }
        }

        // horizontal pass over the vertical result, truncating to bytes
        let mut smoothed = Vec::with_capacity(pixels.len());
        for y in 0..height {
            for x in 0..width {
                let mut sum = [0.0f64; 3];
                for (tap, weight) in kernel.iter().enumerate() {
                    let xx = x as i64 + tap as i64 - half;
                    if xx < 0 || xx >= width as i64 {
                        continue;
                    }
                    let pixel = vertical[y * width + xx as usize];
                    sum[0] += weight * pixel[0];
                    sum[1] += weight * pixel[1];
                    sum[2] += weight * pixel[2];
                }
                smoothed.push(Srgb::new(sum[0] as u8, sum[1] as u8, sum[2] as u8));
            }
        }

        ImageBuf::new_unchecked(image.width(), image.height(), smoothed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::*;

    #[test]
    fn invalid_parameters_are_rejected() {
        assert_eq!(GaussianSmoothing::new(0, 1.0), None);
        assert_eq!(GaussianSmoothing::new(3, 0.0), None);
        assert_eq!(GaussianSmoothing::new(3, -1.0), None);
        assert_eq!(GaussianSmoothing::new(3, f64::NAN), None);
        assert_eq!(GaussianSmoothing::new(3, f64::INFINITY), None);
    }

    #[test]
    fn even_filter_sizes_become_odd() {
        let smoothing = GaussianSmoothing::new(4, 1.0).unwrap();
        assert_eq!(smoothing.filter_size(), 5);
        let smoothing = GaussianSmoothing::new(7, 1.0).unwrap();
        assert_eq!(smoothing.filter_size(), 7);
    }

    #[test]
    fn kernel_is_normalized_and_symmetric() {
        let kernel = GaussianSmoothing::new(5, 1.5).unwrap().kernel();
        assert_eq!(kernel.len(), 5);
        let sum: f64 = kernel.iter().sum();
        assert!((sum - 1.0).abs() < 1e-12);
        assert_eq!(kernel[0], kernel[4]);
        assert_eq!(kernel[1], kernel[3]);
        assert!(kernel[2] > kernel[1]);
    }

    #[test]
    fn interior_of_a_uniform_image_is_unchanged() {
        let image = image_of(5, 5, &[(100, 150, 200); 25]);
        let smoothing = GaussianSmoothing::new(3, 1.0).unwrap();
        let smoothed = smoothing.smooth(image.as_ref());
        assert_eq!(smoothed.dimensions(), (5, 5));
        // the center pixel has a full kernel on both passes; allow the final
        // truncation to lose at most one step per channel
        let center = smoothed.as_slice()[2 * 5 + 2];
        assert!(center.red >= 99 && center.red <= 100, "red was {}", center.red);
        assert!(center.green >= 149 && center.green <= 150);
        assert!(center.blue >= 199 && center.blue <= 200);
    }

    #[test]
    fn single_tap_kernel_is_identity() {
        let image = image_of(3, 2, &[(1, 2, 3), (4, 5, 6), (7, 8, 9), (10, 11, 12), (13, 14, 15), (16, 17, 18)]);
        let smoothing = GaussianSmoothing::new(1, 2.0).unwrap();
        let smoothed = smoothing.smooth(image.as_ref());
        assert_eq!(smoothed, image);
    }
}
