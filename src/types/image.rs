use std::{error::Error, fmt};

/// The error returned when an [`ImageBuf`] or [`ImageRef`] failed to be created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreateImageError {
    /// The provided image width.
    pub(crate) width: u32,
    /// The provided image height.
    pub(crate) height: u32,
    /// The number of pixels in the provided buffer.
    pub(crate) length: usize,
}

impl fmt::Display for CreateImageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self { width, height, length } = *self;
        if width.checked_mul(height).is_some() {
            write!(
                f,
                "image dimensions of ({width}, {height}) do not match the buffer length of {length}"
            )
        } else {
            write!(
                f,
                "image dimensions of ({width}, {height}) overflow the supported number of pixels"
            )
        }
    }
}

impl Error for CreateImageError {}

/// An owned image backed by a [`Vec`] of pixels in row-major order.
///
/// The length of the pixel buffer is guaranteed to match `width * height`,
/// and `width * height` is guaranteed to fit in a `u32`.
///
/// Use [`as_ref`](ImageBuf::as_ref) to get a borrowed [`ImageRef`], which is
/// what the [`Pipeline`](crate::Pipeline) takes as input.
///
/// # Examples
///
/// ```
/// # use quantree::{ImageBuf, CreateImageError};
/// # use palette::Srgb;
/// # fn main() -> Result<(), CreateImageError> {
/// let (width, height) = (64, 64);
/// let pixels = vec![Srgb::new(0u8, 0, 0); (width * height) as usize];
/// let image = ImageBuf::new(width, height, pixels)?;
/// assert_eq!(image.dimensions(), (64, 64));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageBuf<Color> {
    /// The width of the image.
    width: u32,
    /// The height of the image.
    height: u32,
    /// The pixels in row-major order.
    pixels: Vec<Color>,
}

/// A borrowed image backed by a slice of pixels in row-major order.
///
/// Like [`ImageBuf`], the length of the pixel slice is guaranteed to match
/// `width * height`. See [`ImageBuf`] for the owned variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageRef<'a, Color> {
    /// The width of the image.
    width: u32,
    /// The height of the image.
    height: u32,
    /// The pixels in row-major order.
    pixels: &'a [Color],
}

impl<Color> ImageBuf<Color> {
    /// Create a new [`ImageBuf`] from a width, a height, and a pixel buffer.
    ///
    /// # Errors
    ///
    /// Returns an error if `width * height` does not match the length of
    /// `pixels` or overflows a `u32`.
    pub fn new(width: u32, height: u32, pixels: Vec<Color>) -> Result<Self, CreateImageError> {
        if width.checked_mul(height).map(|len| len as usize) == Some(pixels.len()) {
            Ok(Self::new_unchecked(width, height, pixels))
        } else {
            Err(CreateImageError { width, height, length: pixels.len() })
        }
    }

    /// Create a new [`ImageBuf`] without validating invariants.
    #[inline]
    pub(crate) fn new_unchecked(width: u32, height: u32, pixels: Vec<Color>) -> Self {
        debug_assert_eq!(
            width.checked_mul(height).map(|len| len as usize),
            Some(pixels.len())
        );
        Self { width, height, pixels }
    }

    /// Create a new [`ImageBuf`] by repeating a single pixel.
    ///
    /// Returns `None` if `width * height` overflows a `u32`.
    #[must_use]
    pub fn from_pixel(width: u32, height: u32, pixel: Color) -> Option<Self>
    where
        Color: Clone,
    {
        let len = width.checked_mul(height)?;
        Some(Self::new_unchecked(width, height, vec![pixel; len as usize]))
    }

    /// Returns the width and height of the image.
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Returns the number of pixels in the image.
    #[allow(clippy::cast_possible_truncation)]
    #[inline]
    pub fn num_pixels(&self) -> u32 {
        self.pixels.len() as u32
    }

    /// Returns whether the image has zero pixels.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Returns the pixels as a flat slice in row-major order.
    #[inline]
    pub fn as_slice(&self) -> &[Color] {
        &self.pixels
    }

    /// Borrow an [`ImageBuf`] as an [`ImageRef`].
    #[inline]
    pub fn as_ref(&self) -> ImageRef<'_, Color> {
        ImageRef::new_unchecked(self.width, self.height, &self.pixels)
    }

    /// Returns the underlying pixel buffer.
    #[must_use]
    #[inline]
    pub fn into_pixels(self) -> Vec<Color> {
        self.pixels
    }
}

impl<Color> Default for ImageBuf<Color> {
    #[inline]
    fn default() -> Self {
        Self::new_unchecked(0, 0, Vec::new())
    }
}

impl<'a, Color> ImageRef<'a, Color> {
    /// Create a new [`ImageRef`] from a width, a height, and a pixel slice.
    ///
    /// # Errors
    ///
    /// Returns an error if `width * height` does not match the length of
    /// `pixels` or overflows a `u32`.
    pub fn new(width: u32, height: u32, pixels: &'a [Color]) -> Result<Self, CreateImageError> {
        if width.checked_mul(height).map(|len| len as usize) == Some(pixels.len()) {
            Ok(Self::new_unchecked(width, height, pixels))
        } else {
            Err(CreateImageError { width, height, length: pixels.len() })
        }
    }

    /// Create a new [`ImageRef`] without validating invariants.
    #[inline]
    pub(crate) fn new_unchecked(width: u32, height: u32, pixels: &'a [Color]) -> Self {
        debug_assert_eq!(
            width.checked_mul(height).map(|len| len as usize),
            Some(pixels.len())
        );
        Self { width, height, pixels }
    }

    /// Returns the width and height of the image.
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Returns the width of the image.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the height of the image.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns the number of pixels in the image.
    #[allow(clippy::cast_possible_truncation)]
    #[inline]
    pub fn num_pixels(&self) -> u32 {
        self.pixels.len() as u32
    }

    /// Returns whether the image has zero pixels.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Returns the pixels as a flat slice in row-major order.
    #[inline]
    pub fn as_slice(&self) -> &[Color] {
        self.pixels
    }

    /// Clone the pixels into an owned [`ImageBuf`].
    #[must_use]
    pub fn to_owned(&self) -> ImageBuf<Color>
    where
        Color: Clone,
    {
        ImageBuf::new_unchecked(self.width, self.height, self.pixels.to_vec())
    }

    /// Map the whole pixel slice to a new pixel buffer of the same length,
    /// keeping the image dimensions.
    ///
    /// `mapping` takes the whole slice rather than one pixel at a time to
    /// allow batch or parallel mappings.
    ///
    /// # Panics
    ///
    /// Panics if `mapping` returns a buffer with a different length than the
    /// original pixel slice.
    #[must_use]
    pub fn map_ref<NewColor>(
        &self,
        mapping: impl FnOnce(&[Color]) -> Vec<NewColor>,
    ) -> ImageBuf<NewColor> {
        let pixels = mapping(self.pixels);
        assert_eq!(pixels.len(), self.pixels.len());
        ImageBuf::new_unchecked(self.width, self.height, pixels)
    }
}

impl<Color> Default for ImageRef<'_, Color> {
    #[inline]
    fn default() -> Self {
        Self::new_unchecked(0, 0, &[])
    }
}

#[cfg(feature = "image")]
mod image_integration {
    use super::{CreateImageError, ImageBuf, ImageRef};
    use image::RgbImage;
    use palette::{
        Srgb,
        cast::{ComponentsAs as _, ComponentsInto as _, IntoComponents as _},
    };

    impl From<ImageBuf<Srgb<u8>>> for RgbImage {
        #[allow(clippy::expect_used)]
        fn from(image: ImageBuf<Srgb<u8>>) -> Self {
            let (width, height) = image.dimensions();
            let buf: Vec<u8> = image.into_pixels().into_components();
            RgbImage::from_raw(width, height, buf).expect("buffer length matches the dimensions")
        }
    }

    impl TryFrom<RgbImage> for ImageBuf<Srgb<u8>> {
        type Error = CreateImageError;

        fn try_from(image: RgbImage) -> Result<Self, Self::Error> {
            let (width, height) = image.dimensions();
            if let Some(len) = width.checked_mul(height) {
                let mut buf = image.into_raw();
                buf.truncate(len as usize * 3);
                let pixels: Vec<Srgb<u8>> = buf.components_into();
                Ok(Self::new_unchecked(width, height, pixels))
            } else {
                Err(CreateImageError {
                    width,
                    height,
                    length: image.as_raw().len() / 3,
                })
            }
        }
    }

    impl<'a> TryFrom<&'a RgbImage> for ImageRef<'a, Srgb<u8>> {
        type Error = CreateImageError;

        fn try_from(image: &'a RgbImage) -> Result<Self, Self::Error> {
            let (width, height) = image.dimensions();
            let len = width.checked_mul(height).ok_or(CreateImageError {
                width,
                height,
                length: image.as_raw().len() / 3,
            })?;
            let pixels: &[Srgb<u8>] = image.as_raw()[..len as usize * 3].components_as();
            Ok(Self::new_unchecked(width, height, pixels))
        }
    }
}
