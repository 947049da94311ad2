//! Contains the quantization pipeline that drives the per-pixel work.

use crate::{
    adaptive::BinTable,
    colorspace::{rgb_to_yuv, yuv_to_rgb, CHROMA_SHIFT},
    uniform, BitAllocation, ColorSpace, PixelBuffer,
};
use palette::Srgb;

/// The set of supported binning strategies.
///
/// See the descriptions on each enum variant for more information.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantizeMethod {
    /// Fixed-width bins determined purely by bit depth.
    ///
    /// See the [`uniform`] module for more details.
    Uniform,
    /// Equal-population bins derived from the image's value distribution.
    ///
    /// See the [`adaptive`](crate::adaptive) module for more details.
    Adaptive,
}

/// Quantizes an image with the given color space, method, and per-channel
/// bit depths, returning a fresh output buffer of the same dimensions.
///
/// The source buffer is never mutated. In [`ColorSpace::Rgb`] the stored
/// channel values are quantized directly; in [`ColorSpace::Yuv`] each pixel
/// is converted to luma/chroma, quantized there (chroma offset by
/// [`CHROMA_SHIFT`] around the quantizer), and converted back with clamping.
///
/// # Examples
/// ```
/// # use bitquant::{quantize, BitAllocation, ColorSpace, PixelBuffer, QuantizeMethod};
/// # use palette::Srgb;
/// # fn main() -> Result<(), bitquant::DimensionMismatch> {
/// let image = PixelBuffer::new(1, 1, vec![Srgb::new(200, 31, 76)])?;
/// let bits = BitAllocation::from_clamped(1, 1, 1);
///
/// let out = quantize(&image, ColorSpace::Rgb, QuantizeMethod::Uniform, bits);
/// assert_eq!(out.pixels()[0], Srgb::new(192, 64, 64));
/// # Ok(())
/// # }
/// ```
#[must_use]
pub fn quantize(
    image: &PixelBuffer,
    colorspace: ColorSpace,
    method: QuantizeMethod,
    bits: BitAllocation,
) -> PixelBuffer {
    match (colorspace, method) {
        (ColorSpace::Rgb, QuantizeMethod::Uniform) => uniform_rgb(image, bits),
        (ColorSpace::Yuv, QuantizeMethod::Uniform) => uniform_yuv(image, bits),
        (ColorSpace::Rgb, QuantizeMethod::Adaptive) => adaptive_rgb(image, bits),
        (ColorSpace::Yuv, QuantizeMethod::Adaptive) => adaptive_yuv(image, bits),
    }
}

/// Rounds a luma or shifted-chroma component into the quantizer's `u8` domain.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn round_component(value: f64) -> u8 {
    value.round() as u8
}

/// Truncates a luma or shifted-chroma component into the sample domain.
///
/// Adaptive sample building and lookup truncate rather than round, so both
/// sides of the table agree on the integer form of each component.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn truncate_component(value: f64) -> u8 {
    value as u8
}

/// Applies a bin table where one exists, passing the value through otherwise.
fn lookup(table: &Option<BinTable>, value: u8) -> u8 {
    table.as_ref().map_or(value, |table| table.apply(value))
}

/// Quantizes each RGB channel directly with fixed-width bins.
fn uniform_rgb(image: &PixelBuffer, bits: BitAllocation) -> PixelBuffer {
    let [q1, q2, q3] = bits.channels();

    let pixels = image
        .pixels()
        .iter()
        .map(|&p| {
            Srgb::new(
                uniform::quantize(p.red, q1),
                uniform::quantize(p.green, q2),
                uniform::quantize(p.blue, q3),
            )
        })
        .collect();

    PixelBuffer::new_unchecked(image.width(), image.height(), pixels)
}

/// Converts to YUV, quantizes each component with fixed-width bins, and
/// converts back.
fn uniform_yuv(image: &PixelBuffer, bits: BitAllocation) -> PixelBuffer {
    let [q1, q2, q3] = bits.channels();

    let pixels = image
        .pixels()
        .iter()
        .map(|&p| {
            let [y, u, v] = rgb_to_yuv(p);

            let yq = f64::from(uniform::quantize(round_component(y), q1));
            let uq = f64::from(uniform::quantize(round_component(u + CHROMA_SHIFT), q2))
                - CHROMA_SHIFT;
            let vq = f64::from(uniform::quantize(round_component(v + CHROMA_SHIFT), q3))
                - CHROMA_SHIFT;

            yuv_to_rgb([yq, uq, vq])
        })
        .collect();

    PixelBuffer::new_unchecked(image.width(), image.height(), pixels)
}

/// Builds a bin table per RGB channel from the whole image, then remaps
/// every pixel through the tables.
fn adaptive_rgb(image: &PixelBuffer, bits: BitAllocation) -> PixelBuffer {
    let [q1, q2, q3] = bits.channels();

    let reds = image.pixels().iter().map(|p| p.red).collect();
    let greens = image.pixels().iter().map(|p| p.green).collect();
    let blues = image.pixels().iter().map(|p| p.blue).collect();

    let red_table = BinTable::compute(reds, q1);
    let green_table = BinTable::compute(greens, q2);
    let blue_table = BinTable::compute(blues, q3);

    let pixels = image
        .pixels()
        .iter()
        .map(|&p| {
            Srgb::new(
                lookup(&red_table, p.red),
                lookup(&green_table, p.green),
                lookup(&blue_table, p.blue),
            )
        })
        .collect();

    PixelBuffer::new_unchecked(image.width(), image.height(), pixels)
}

/// Builds a bin table per YUV component from the whole image, then remaps
/// every pixel through the tables and converts back to RGB.
fn adaptive_yuv(image: &PixelBuffer, bits: BitAllocation) -> PixelBuffer {
    let [q1, q2, q3] = bits.channels();

    let mut lumas = Vec::with_capacity(image.num_pixels());
    let mut us = Vec::with_capacity(image.num_pixels());
    let mut vs = Vec::with_capacity(image.num_pixels());
    for &p in image.pixels() {
        let [y, u, v] = rgb_to_yuv(p);
        lumas.push(truncate_component(y));
        us.push(truncate_component(u + CHROMA_SHIFT));
        vs.push(truncate_component(v + CHROMA_SHIFT));
    }

    let luma_table = BinTable::compute(lumas, q1);
    let u_table = BinTable::compute(us, q2);
    let v_table = BinTable::compute(vs, q3);

    let pixels = image
        .pixels()
        .iter()
        .map(|&p| {
            let [y, u, v] = rgb_to_yuv(p);

            let yq = f64::from(lookup(&luma_table, truncate_component(y)));
            let uq =
                f64::from(lookup(&u_table, truncate_component(u + CHROMA_SHIFT))) - CHROMA_SHIFT;
            let vq =
                f64::from(lookup(&v_table, truncate_component(v + CHROMA_SHIFT))) - CHROMA_SHIFT;

            yuv_to_rgb([yq, uq, vq])
        })
        .collect();

    PixelBuffer::new_unchecked(image.width(), image.height(), pixels)
}
