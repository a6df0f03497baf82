use std::{error::Error, fmt};

/// The error returned when a pipeline is run on an image with zero pixels.
///
/// Quantization needs at least one pixel to derive a palette from, so an empty
/// image is rejected before any work begins and no partial output is produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmptyImageError;

impl fmt::Display for EmptyImageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("the input image has zero pixels")
    }
}

impl Error for EmptyImageError {}
