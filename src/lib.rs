//! A library for reduced bit-depth image quantization and distortion reporting.
//!
//! `bitquant` requantizes 8-bit RGB images down to a chosen number of bits per
//! channel, either directly in RGB or through a luma/chroma YUV transform, and
//! scores the result against the original with mean squared error. Two binning
//! strategies are available: uniform fixed-width bins, and adaptive
//! equal-population bins derived from the image's own value distribution.
//!
//! # Features
//! To reduce dependencies and compile times, `bitquant` has several `cargo`
//! features that can be turned off or on:
//! - `threads`: exposes a parallel version of the sweep driver via [`rayon`].
//! - `image`: enables integration with the [`image`] crate and the
//!   side-by-side comparison renderer.
//! - `cli`: builds the `bitquant` command line tool.
//!
//! # Quantizing an image
//! The entry point is [`quantize`], which takes the source buffer, a
//! [`ColorSpace`], a [`QuantizeMethod`], and a per-channel [`BitAllocation`]:
//! ```
//! # use bitquant::{mse, quantize, BitAllocation, ColorSpace, PixelBuffer, QuantizeMethod};
//! # use palette::Srgb;
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let pixels = vec![Srgb::new(12u8, 200, 97); 16];
//! let image = PixelBuffer::new(4, 4, pixels)?;
//!
//! let bits = BitAllocation::from_clamped(3, 2, 3);
//! let quantized = quantize(&image, ColorSpace::Yuv, QuantizeMethod::Uniform, bits);
//! let distortion = mse(&image, &quantized);
//! assert!(distortion >= 0.0);
//! # Ok(())
//! # }
//! ```
//!
//! To compare every way of splitting a total bit budget across the three
//! channels, see [`sweep`] (or [`sweep_par`] with the `threads` feature).

#![deny(unsafe_code, unsafe_op_in_unsafe_fn)]
#![warn(
    clippy::pedantic,
    clippy::cargo,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::todo,
    clippy::unimplemented,
    clippy::unwrap_used,
    clippy::unwrap_in_result,
    clippy::expect_used,
    clippy::unneeded_field_pattern,
    clippy::rest_pat_in_fully_bound_structs,
    clippy::unnecessary_self_imports,
    clippy::str_to_string,
    clippy::string_to_string,
    clippy::string_slice,
    missing_docs,
    clippy::missing_docs_in_private_items,
    rustdoc::all,
    clippy::float_cmp_const,
    clippy::lossy_float_literal
)]
#![allow(
    clippy::doc_markdown,
    clippy::module_name_repetitions,
    clippy::many_single_char_names,
    clippy::missing_panics_doc,
    clippy::unreadable_literal,
    clippy::wildcard_imports
)]

mod colorspace;
mod metric;
mod pipeline;
mod raw;
mod sweep;
mod types;

pub mod adaptive;
pub mod uniform;

#[cfg(feature = "image")]
mod render;

pub use colorspace::*;
pub use metric::*;
pub use pipeline::*;
pub use raw::*;
pub use sweep::*;
pub use types::*;

#[cfg(feature = "image")]
pub use render::*;

/// The frame width of the raw planar input files (CIF resolution).
pub const CIF_WIDTH: u32 = 352;

/// The frame height of the raw planar input files (CIF resolution).
pub const CIF_HEIGHT: u32 = 288;

#[cfg(test)]
pub(crate) mod tests {
    //! Shared helpers for the per-module test suites.

    use crate::PixelBuffer;
    use palette::Srgb;
    use rand::{Rng, SeedableRng};
    use rand_xoshiro::Xoroshiro128PlusPlus;

    /// A deterministic pseudo-random image with the given dimensions.
    pub fn test_image(width: u32, height: u32) -> PixelBuffer {
        let mut rng = Xoroshiro128PlusPlus::seed_from_u64(0);
        let pixels = (0..width as usize * height as usize)
            .map(|_| Srgb::new(rng.gen(), rng.gen(), rng.gen()))
            .collect();
        PixelBuffer::new_unchecked(width, height, pixels)
    }

    /// A gray image cycling through every luma value.
    pub fn gray_ramp(width: u32, height: u32) -> PixelBuffer {
        #[allow(clippy::cast_possible_truncation)]
        let pixels = (0..width as usize * height as usize)
            .map(|i| {
                let v = (i % 256) as u8;
                Srgb::new(v, v, v)
            })
            .collect();
        PixelBuffer::new_unchecked(width, height, pixels)
    }
}
