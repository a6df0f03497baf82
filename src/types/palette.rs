use std::ops::Index;

/// An ordered palette of distinct colors.
///
/// The position of a color in the palette is its node id in the complete graph
/// that the spanning tree is built over, so the order of entries is
/// significant: it is the order in which the colors were first seen while
/// scanning the image (see [`dedup::distinct_colors`](crate::dedup::distinct_colors)).
///
/// Invariants: the palette is never empty, and no two entries are equal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaletteBuf<Color>(Vec<Color>);

impl<Color> PaletteBuf<Color> {
    /// Create a new [`PaletteBuf`] without checking that the colors are
    /// distinct.
    #[inline]
    pub(crate) fn new_unchecked(colors: Vec<Color>) -> Self {
        debug_assert!(!colors.is_empty());
        Self(colors)
    }

    /// Returns the number of colors in the palette.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns the number of colors in the palette as a `u32`.
    ///
    /// The palette is derived from an image with at most `u32::MAX` pixels,
    /// so its length always fits.
    #[allow(clippy::cast_possible_truncation)]
    #[inline]
    pub fn num_colors(&self) -> u32 {
        self.0.len() as u32
    }

    /// Returns whether the palette is empty. Always `false` for a palette
    /// produced by this crate.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the colors as a slice, ordered by node id.
    #[inline]
    pub fn as_slice(&self) -> &[Color] {
        &self.0
    }

    /// Returns an iterator over the colors in node id order.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Color> {
        self.0.iter()
    }

    /// Returns the underlying [`Vec`] of colors.
    #[must_use]
    #[inline]
    pub fn into_vec(self) -> Vec<Color> {
        self.0
    }
}

impl<Color> Index<usize> for PaletteBuf<Color> {
    type Output = Color;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl<Color> Index<u32> for PaletteBuf<Color> {
    type Output = Color;

    #[inline]
    fn index(&self, index: u32) -> &Self::Output {
        &self.0[index as usize]
    }
}

impl<'a, Color> IntoIterator for &'a PaletteBuf<Color> {
    type Item = &'a Color;
    type IntoIter = std::slice::Iter<'a, Color>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
