//! Image decode and JPEG encode through in-memory buffers.
//!
//! Reads go file → byte buffer → [`image::load_from_memory`], writes go
//! raster → JPEG bytes in a `Vec<u8>` → file. Paths are only ever handed
//! to `std::fs` as [`Path`] values, so names that are not representable in
//! the platform's narrow code page still round-trip, and the decoder picks
//! the format from the file contents rather than trusting the extension.

use std::{fs, path::Path};

use image::{RgbImage, codecs::jpeg::JpegEncoder};

use crate::error::StrideError;

/// A decoded 8-bit RGB bitmap.
///
/// Decoding always produces three channels: alpha is dropped and only the
/// first frame (GIF) or page (TIFF) is kept.
pub type Raster = RgbImage;

/// JPEG quality on the usual 0–100 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct JpegQuality(u8);

impl JpegQuality {
    /// Quality used when none is specified.
    pub const DEFAULT: JpegQuality = JpegQuality(95);

    /// Validate a quality value.
    ///
    /// # Errors
    ///
    /// Returns [`StrideError::InvalidQuality`] if `value > 100`.
    pub fn new(value: u32) -> Result<Self, StrideError> {
        u8::try_from(value)
            .ok()
            .filter(|quality| *quality <= 100)
            .map(JpegQuality)
            .ok_or(StrideError::InvalidQuality(value))
    }

    /// The raw value.
    pub fn get(self) -> u8 {
        self.0
    }
}

impl Default for JpegQuality {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Read the file at `path` and decode it as a color image.
///
/// # Errors
///
/// - [`StrideError::FileRead`] if the file cannot be read.
/// - [`StrideError::EmptyFile`] if it contains no bytes.
/// - [`StrideError::ImageDecode`] if the bytes are not a supported image.
pub fn read_image<P: AsRef<Path>>(path: P) -> Result<Raster, StrideError> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|source| StrideError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    if bytes.is_empty() {
        return Err(StrideError::EmptyFile {
            path: path.to_path_buf(),
        });
    }
    decode_image(path, &bytes)
}

/// Decode an in-memory image. `path` is only used for error context.
pub fn decode_image(path: &Path, bytes: &[u8]) -> Result<Raster, StrideError> {
    image::load_from_memory(bytes)
        .map(|image| image.into_rgb8())
        .map_err(|source| StrideError::ImageDecode {
            path: path.to_path_buf(),
            source,
        })
}

/// Encode `raster` as a baseline JPEG.
///
/// A quality of 0 is encoded as 1, the lowest value the encoder accepts.
///
/// # Errors
///
/// Returns [`StrideError::JpegEncode`] if the encoder rejects the raster
/// (for example, a side longer than 65535 pixels).
pub fn encode_jpeg(raster: &Raster, quality: JpegQuality) -> Result<Vec<u8>, StrideError> {
    let mut buffer = Vec::new();
    let mut encoder = JpegEncoder::new_with_quality(&mut buffer, quality.get().max(1));
    encoder
        .encode_image(raster)
        .map_err(StrideError::JpegEncode)?;
    Ok(buffer)
}

/// Write already-encoded bytes to `path`, replacing any existing file.
///
/// # Errors
///
/// Returns [`StrideError::FileWrite`] on any I/O failure.
pub fn write_bytes<P: AsRef<Path>>(path: P, bytes: &[u8]) -> Result<(), StrideError> {
    let path = path.as_ref();
    fs::write(path, bytes).map_err(|source| StrideError::FileWrite {
        path: path.to_path_buf(),
        source,
    })
}

/// Encode `raster` as JPEG and write it to `path`.
///
/// Returns the number of bytes written.
pub fn save_jpeg<P: AsRef<Path>>(
    path: P,
    raster: &Raster,
    quality: JpegQuality,
) -> Result<usize, StrideError> {
    let bytes = encode_jpeg(raster, quality)?;
    write_bytes(path, &bytes)?;
    Ok(bytes.len())
}
