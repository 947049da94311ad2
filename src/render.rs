//! Contains the side-by-side comparison renderer.

use crate::PixelBuffer;
use image::RgbImage;

/// Composes two images into one, `left` on the left and `right` on the
/// right, for visual comparison.
///
/// The canvas is as tall as the taller input and as wide as both inputs
/// together; any uncovered area is left black.
#[must_use]
pub fn side_by_side(left: &PixelBuffer, right: &PixelBuffer) -> RgbImage {
    let width = left.width() + right.width();
    let height = left.height().max(right.height());

    let mut canvas = RgbImage::new(width, height);
    blit(&mut canvas, left, 0);
    blit(&mut canvas, right, left.width());
    canvas
}

/// Copies an image onto the canvas with the given horizontal offset.
#[allow(clippy::cast_possible_truncation)]
fn blit(canvas: &mut RgbImage, image: &PixelBuffer, x_offset: u32) {
    for (i, pixel) in image.pixels().iter().enumerate() {
        let x = x_offset + i as u32 % image.width();
        let y = i as u32 / image.width();
        canvas.put_pixel(x, y, image::Rgb([pixel.red, pixel.green, pixel.blue]));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::*;

    #[test]
    fn canvas_spans_both_images() {
        let left = test_image(4, 3);
        let right = test_image(2, 5);

        let canvas = side_by_side(&left, &right);
        assert_eq!(canvas.width(), 6);
        assert_eq!(canvas.height(), 5);
    }

    #[test]
    fn contents_land_left_and_right() {
        let left = gray_ramp(2, 2);
        let right = test_image(2, 2);

        let canvas = side_by_side(&left, &right);
        for y in 0..2 {
            for x in 0..2 {
                let l = left.pixels()[(y * 2 + x) as usize];
                assert_eq!(canvas.get_pixel(x, y).0, [l.red, l.green, l.blue]);

                let r = right.pixels()[(y * 2 + x) as usize];
                assert_eq!(canvas.get_pixel(x + 2, y).0, [r.red, r.green, r.blue]);
            }
        }
    }

    #[test]
    fn uncovered_area_is_black() {
        let left = test_image(1, 1);
        let right = test_image(1, 3);

        let canvas = side_by_side(&left, &right);
        assert_eq!(canvas.get_pixel(0, 2).0, [0, 0, 0]);
    }
}
