//! Deduplicate an image's pixels into an ordered [`PaletteBuf`] of distinct colors.

use crate::{ImageRef, PaletteBuf};
use bitvec::vec::BitVec;
use palette::Srgb;

/// A byte-sized radix.
const RADIX: usize = u8::MAX as usize + 1;

/// Returns the index of a color in a dense lookup over all (r, g, b) triples.
#[inline]
pub(crate) fn color_index(color: Srgb<u8>) -> usize {
    usize::from(color.red) * RADIX * RADIX
        + usize::from(color.green) * RADIX
        + usize::from(color.blue)
}

/// Extract the distinct colors of an image in first-seen order.
///
/// The index of each color in the returned palette is its node id, so the
/// scan order of the image (row-major) determines the node numbering.
/// A dense presence bitmask over all 256³ channel triples makes the
/// "seen before" test O(1) per pixel.
///
/// Returns `None` if the image has zero pixels; any non-empty image produces
/// a valid palette, including a singleton palette for a uniform image.
///
/// # Examples
///
/// ```
/// # use quantree::{dedup, ImageBuf};
/// # use palette::Srgb;
/// let pixels = vec![
///     Srgb::new(255u8, 0, 0),
///     Srgb::new(0, 0, 255),
///     Srgb::new(255, 0, 0),
/// ];
/// let image = ImageBuf::new(3, 1, pixels).unwrap();
/// let palette = dedup::distinct_colors(image.as_ref()).unwrap();
/// assert_eq!(palette.as_slice(), &[Srgb::new(255, 0, 0), Srgb::new(0, 0, 255)]);
/// ```
#[must_use]
pub fn distinct_colors(image: ImageRef<'_, Srgb<u8>>) -> Option<PaletteBuf<Srgb<u8>>> {
    if image.is_empty() {
        return None;
    }

    let mut seen: BitVec = BitVec::repeat(false, RADIX * RADIX * RADIX);
    let mut colors = Vec::new();
    for &color in image.as_slice() {
        let index = color_index(color);
        if !seen[index] {
            seen.set(index, true);
            colors.push(color);
        }
    }
    Some(PaletteBuf::new_unchecked(colors))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::*;

    #[test]
    fn empty_image_has_no_palette() {
        assert_eq!(distinct_colors(ImageRef::default()), None);
    }

    #[test]
    fn uniform_image_gives_singleton_palette() {
        let image = image_of(4, 4, &[(7, 7, 7); 16]);
        let palette = distinct_colors(image.as_ref()).unwrap();
        assert_eq!(palette.as_slice(), &[srgb(7, 7, 7)]);
    }

    #[test]
    fn node_ids_follow_first_seen_order() {
        let image = image_of(
            3,
            2,
            &[
                (200, 0, 0),
                (0, 200, 0),
                (200, 0, 0),
                (0, 0, 200),
                (0, 200, 0),
                (200, 0, 0),
            ],
        );
        let palette = distinct_colors(image.as_ref()).unwrap();
        assert_eq!(
            palette.as_slice(),
            &[srgb(200, 0, 0), srgb(0, 200, 0), srgb(0, 0, 200)]
        );
    }

    #[test]
    fn channel_triples_are_distinguished() {
        // (1, 0, 0) and (0, 1, 0) and (0, 0, 1) must not collide in the bitmask
        let image = image_of(4, 1, &[(1, 0, 0), (0, 1, 0), (0, 0, 1), (0, 0, 1)]);
        let palette = distinct_colors(image.as_ref()).unwrap();
        assert_eq!(palette.len(), 3);
    }
}
