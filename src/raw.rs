//! Contains the loader for headerless planar RGB files.
//!
//! A frame is `width * height` red bytes, then the same number of green
//! bytes, then blue bytes, with no header. Files may contain more than one
//! frame's worth of data; only the first frame is read.

use crate::PixelBuffer;
use palette::Srgb;
use std::{
    error::Error,
    fmt::Display,
    fs::File,
    io::{self, BufReader, Read},
    path::Path,
};

/// An error type for failures while reading a raw planar image.
#[derive(Debug)]
pub enum RawReadError {
    /// The underlying reader failed.
    Io(io::Error),
    /// The input ended before a full frame was read.
    Truncated {
        /// The number of bytes one frame requires.
        expected: usize,
        /// The number of bytes actually available.
        actual: usize,
    },
}

impl Display for RawReadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "failed to read image: {err}"),
            Self::Truncated { expected, actual } => {
                write!(f, "truncated frame: expected {expected} bytes but found {actual}")
            }
        }
    }
}

impl Error for RawReadError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Truncated { .. } => None,
        }
    }
}

impl From<io::Error> for RawReadError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

/// Reads one planar frame of the given dimensions from a reader.
///
/// Bytes beyond the first frame are left unread. The returned buffer is
/// complete by construction; the quantization core performs no further
/// validation on it.
///
/// # Errors
/// Returns [`RawReadError::Truncated`] if the reader yields fewer than
/// `width * height * 3` bytes, or [`RawReadError::Io`] if it fails outright.
pub fn read_planar(
    reader: impl Read,
    width: u32,
    height: u32,
) -> Result<PixelBuffer, RawReadError> {
    let plane = width as usize * height as usize;
    let frame = plane * 3;

    let mut bytes = Vec::with_capacity(frame);
    reader.take(frame as u64).read_to_end(&mut bytes)?;
    if bytes.len() < frame {
        return Err(RawReadError::Truncated { expected: frame, actual: bytes.len() });
    }

    let pixels = (0..plane)
        .map(|i| Srgb::new(bytes[i], bytes[plane + i], bytes[2 * plane + i]))
        .collect();

    Ok(PixelBuffer::new_unchecked(width, height, pixels))
}

/// Reads one planar frame of the given dimensions from a file.
///
/// # Errors
/// See [`read_planar`]; opening the file may also fail with
/// [`RawReadError::Io`].
pub fn load_planar(
    path: impl AsRef<Path>,
    width: u32,
    height: u32,
) -> Result<PixelBuffer, RawReadError> {
    let file = File::open(path)?;
    read_planar(BufReader::new(file), width, height)
}
