//! Coordinate space marker types.
//!
//! Zero-sized types used as type parameters so that pixel coordinates read
//! from a CCPD filename can never be mixed up with normalized YOLO values.

use std::fmt;

/// Marker type for pixel coordinates (absolute values).
///
/// CCPD encodes boxes as integer pixel positions with (0, 0) at the
/// top-left corner of the image.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pixel {}

/// Marker type for normalized coordinates (0.0 to 1.0).
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub enum Normalized {}

impl fmt::Debug for Pixel {
    fn fmt(&self, _: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {}
    }
}

impl fmt::Debug for Normalized {
    fn fmt(&self, _: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {}
    }
}
