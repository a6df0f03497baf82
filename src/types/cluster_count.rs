use std::{error::Error, fmt, num::NonZeroU32};

/// The error returned when attempting to convert zero into a [`ClusterCount`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClusterCountFromIntError(pub(crate) ());

impl fmt::Display for ClusterCountFromIntError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a cluster count must be at least 1")
    }
}

impl Error for ClusterCountFromIntError {}

/// The target number of color clusters, k.
///
/// This is a newtype wrapper around [`NonZeroU32`], so a cluster count of zero
/// can never reach the quantization pipeline. There is no upper bound; a count
/// greater than the number of distinct colors in the image is clamped down to
/// one cluster per distinct color when the spanning tree is split.
///
/// # Examples
///
/// ```
/// # use std::num::NonZeroU32;
/// # use quantree::{ClusterCount, ClusterCountFromIntError};
/// # fn main() -> Result<(), ClusterCountFromIntError> {
/// let k: ClusterCount = 16u32.try_into()?;
/// assert_eq!(k.as_u32(), 16);
/// assert_eq!(ClusterCount::new(0), None);
/// assert_eq!(ClusterCount::from(NonZeroU32::MIN), ClusterCount::MIN);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct ClusterCount(NonZeroU32);

impl ClusterCount {
    /// The smallest possible cluster count, which is `1`.
    pub const MIN: Self = Self(NonZeroU32::MIN);

    /// The cluster count used by [`Pipeline::new`](crate::Pipeline::new),
    /// which is `256`.
    #[allow(clippy::unwrap_used)] // const evaluated
    pub const DEFAULT: Self = Self(NonZeroU32::new(256).unwrap());

    /// Create a [`ClusterCount`] from a `u32`, returning `None` for zero.
    #[must_use]
    #[inline]
    pub const fn new(value: u32) -> Option<Self> {
        match NonZeroU32::new(value) {
            Some(value) => Some(Self(value)),
            None => None,
        }
    }

    /// Returns a [`ClusterCount`] as a [`NonZeroU32`].
    #[inline]
    pub const fn as_nz_u32(&self) -> NonZeroU32 {
        self.0
    }

    /// Returns a [`ClusterCount`] as a `u32`.
    #[inline]
    pub const fn as_u32(&self) -> u32 {
        self.0.get()
    }

    /// Returns a [`ClusterCount`] as a `usize`.
    #[inline]
    pub const fn as_usize(&self) -> usize {
        self.as_u32() as usize
    }
}

impl From<NonZeroU32> for ClusterCount {
    #[inline]
    fn from(value: NonZeroU32) -> Self {
        Self(value)
    }
}

impl TryFrom<u32> for ClusterCount {
    type Error = ClusterCountFromIntError;

    #[inline]
    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value).ok_or(ClusterCountFromIntError(()))
    }
}

impl TryFrom<usize> for ClusterCount {
    type Error = ClusterCountFromIntError;

    #[inline]
    fn try_from(value: usize) -> Result<Self, Self::Error> {
        let value = u32::try_from(value).map_err(|_| ClusterCountFromIntError(()))?;
        value.try_into()
    }
}

impl fmt::Display for ClusterCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
