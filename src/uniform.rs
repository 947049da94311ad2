//! Uniform quantization: fixed-width bins determined purely by bit depth.

use crate::BitDepth;

/// Quantizes one channel value to the center of its fixed-width bin.
///
/// The value range is divided into `2^bits` equal bins of width `256 / 2^bits`
/// and the input is replaced by its bin's center. A depth of 8 bits returns
/// the value unchanged. Stateless and `O(1)`; chroma shifting for YUV inputs
/// is handled by the caller.
///
/// # Examples
/// ```
/// # use bitquant::{uniform, BitDepth};
/// // one bit leaves two bins with centers 64 and 192
/// assert_eq!(uniform::quantize(0, BitDepth::from_clamped(1)), 64);
/// assert_eq!(uniform::quantize(255, BitDepth::from_clamped(1)), 192);
/// assert_eq!(uniform::quantize(77, BitDepth::IDENTITY), 77);
/// ```
#[must_use]
pub fn quantize(value: u8, depth: BitDepth) -> u8 {
    if depth.is_identity() {
        return value;
    }

    let levels = depth.levels();
    let step = 256 / levels;
    let index = u16::from(value) / step;
    let center = index * step + step / 2;

    #[allow(clippy::cast_possible_truncation)]
    {
        center.min(255) as u8
    }
}
