//! Contains the distortion metric used to score quantized images.

use crate::PixelBuffer;

/// Computes the mean squared error between two images of identical
/// dimensions.
///
/// The squared per-channel differences are summed over every pixel and
/// divided by `width * height * 3`. Pure function; neither buffer is
/// modified.
///
/// # Panics
/// Panics if the two buffers differ in width or height. A mismatch is a
/// caller error, not a recoverable condition, so it fails fast rather than
/// truncating or padding.
///
/// # Examples
/// ```
/// # use bitquant::{mse, PixelBuffer};
/// # use palette::Srgb;
/// # fn main() -> Result<(), bitquant::DimensionMismatch> {
/// let a = PixelBuffer::new(1, 1, vec![Srgb::new(10, 20, 30)])?;
/// let b = PixelBuffer::new(1, 1, vec![Srgb::new(11, 22, 33)])?;
/// assert_eq!(mse(&a, &a), 0.0);
/// assert_eq!(mse(&a, &b), (1.0 + 4.0 + 9.0) / 3.0);
/// # Ok(())
/// # }
/// ```
#[must_use]
pub fn mse(a: &PixelBuffer, b: &PixelBuffer) -> f64 {
    assert!(
        a.width() == b.width() && a.height() == b.height(),
        "dimension mismatch: {}x{} vs {}x{}",
        a.width(),
        a.height(),
        b.width(),
        b.height(),
    );

    /// The squared difference between two channel values.
    fn squared_diff(a: u8, b: u8) -> u64 {
        let diff = i64::from(a) - i64::from(b);
        #[allow(clippy::cast_sign_loss)]
        {
            (diff * diff) as u64
        }
    }

    let sum: u64 = a
        .pixels()
        .iter()
        .zip(b.pixels())
        .map(|(a, b)| {
            squared_diff(a.red, b.red) + squared_diff(a.green, b.green) + squared_diff(a.blue, b.blue)
        })
        .sum();

    #[allow(clippy::cast_precision_loss)]
    {
        sum as f64 / (a.num_pixels() * 3) as f64
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::tests::*;
    use palette::Srgb;

    #[test]
    fn identical_images_have_zero_error() {
        let image = test_image(8, 8);
        assert_eq!(mse(&image, &image), 0.0);
    }

    #[test]
    fn known_difference() {
        let a = PixelBuffer::new(2, 1, vec![Srgb::new(0, 0, 0), Srgb::new(10, 10, 10)]).unwrap();
        let b = PixelBuffer::new(2, 1, vec![Srgb::new(3, 0, 0), Srgb::new(10, 10, 14)]).unwrap();
        assert_eq!(mse(&a, &b), (9.0 + 16.0) / 6.0);
    }

    #[test]
    fn error_is_symmetric_and_non_negative() {
        let a = test_image(8, 8);
        let b = gray_ramp(8, 8);
        assert!(mse(&a, &b) >= 0.0);
        assert_eq!(mse(&a, &b), mse(&b, &a));
    }

    #[test]
    #[should_panic(expected = "dimension mismatch")]
    fn dimension_mismatch_fails_fast() {
        let a = test_image(2, 2);
        let b = test_image(2, 3);
        let _ = mse(&a, &b);
    }
}
