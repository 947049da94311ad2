//! Contains the supported color spaces and the RGB/YUV transforms.

use palette::Srgb;

/// The set of color spaces in which quantization can be performed.
///
/// [`ColorSpace::Rgb`] quantizes the stored channel values directly.
/// [`ColorSpace::Yuv`] converts each pixel to luma/chroma first, quantizes
/// there, and converts back; chroma channels are offset by [`CHROMA_SHIFT`]
/// around the quantizer so they share the red/green/blue value domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorSpace {
    /// Quantize red, green, and blue directly.
    Rgb,
    /// Quantize luma and the two chroma components.
    Yuv,
}

/// The offset applied to chroma components to map them into the unsigned
/// `[0, 255]` domain before quantization, and removed afterwards.
pub const CHROMA_SHIFT: f64 = 128.0;

/// Converts a pixel to its luma/chroma representation `[y, u, v]`.
///
/// The components are real-valued and unclamped; `u` and `v` may be negative.
pub fn rgb_to_yuv(rgb: Srgb<u8>) -> [f64; 3] {
    let r = f64::from(rgb.red);
    let g = f64::from(rgb.green);
    let b = f64::from(rgb.blue);

    [
        0.299 * r + 0.587 * g + 0.114 * b,
        -0.147 * r - 0.289 * g + 0.436 * b,
        0.615 * r - 0.515 * g - 0.100 * b,
    ]
}

/// Converts a luma/chroma triple back to a pixel, rounding each channel and
/// clamping it into `[0, 255]`.
///
/// The reconstruction matrix is not an exact inverse of [`rgb_to_yuv`], so a
/// round trip through both functions is lossy even without quantization.
pub fn yuv_to_rgb([y, u, v]: [f64; 3]) -> Srgb<u8> {
    /// Rounds one reconstructed channel and clamps it to the `u8` domain.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn channel(value: f64) -> u8 {
        value.round().clamp(0.0, 255.0) as u8
    }

    Srgb::new(
        channel(y + 1.1398 * v),
        channel(y - 0.3946 * u - 0.5806 * v),
        channel(y + 2.0321 * u),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gray_has_no_chroma() {
        let [y, u, v] = rgb_to_yuv(Srgb::new(128, 128, 128));
        assert!((y - 128.0).abs() < 1e-9);
        assert!(u.abs() < 1e-9);
        assert!(v.abs() < 1e-9);
    }

    #[test]
    fn gray_round_trips_within_rounding() {
        for value in [0u8, 1, 64, 128, 200, 255] {
            let gray = Srgb::new(value, value, value);
            assert_eq!(yuv_to_rgb(rgb_to_yuv(gray)), gray);
        }
    }

    #[test]
    fn luma_weights_sum_to_one() {
        let [y, _, _] = rgb_to_yuv(Srgb::new(255, 255, 255));
        assert!((y - 255.0).abs() < 1e-9);
    }

    #[test]
    fn chroma_can_be_negative() {
        // pure red has positive v and negative u
        let [_, u, v] = rgb_to_yuv(Srgb::new(255, 0, 0));
        assert!(u < 0.0);
        assert!(v > 0.0);
    }

    #[test]
    fn reconstruction_clamps_out_of_range_values() {
        assert_eq!(yuv_to_rgb([300.0, 0.0, 0.0]), Srgb::new(255, 255, 255));
        assert_eq!(yuv_to_rgb([-20.0, 0.0, 0.0]), Srgb::new(0, 0, 0));
    }
}
