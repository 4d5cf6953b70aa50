//! Error types for the `stridecut` crate.
//!
//! This module defines [`StrideError`], the unified error type returned by
//! every fallible operation in the crate. Variants carry the offending path
//! and the upstream cause so that a single reported line is enough to
//! diagnose a skipped item.

use std::{io::Error as IoError, path::PathBuf};

use ffmpeg_next::Error as FfmpegError;
use image::ImageError;
use thiserror::Error;

/// The unified error type for all `stridecut` operations.
///
/// Errors fall into four groups. Configuration errors
/// ([`InvalidInterval`](StrideError::InvalidInterval),
/// [`InvalidQuality`](StrideError::InvalidQuality)) and missing input roots
/// ([`DirectoryNotFound`](StrideError::DirectoryNotFound),
/// [`NotADirectory`](StrideError::NotADirectory)) abort a run. Per-item
/// errors (read, decode, encode, write) and per-video open errors are
/// reported by the batch drivers and the pass continues with the next item.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StrideError {
    /// A sampling interval of zero or less was provided.
    #[error("Interval must be greater than zero (got {0})")]
    InvalidInterval(i64),

    /// A JPEG quality outside `0..=100` was provided.
    #[error("JPEG quality must be between 0 and 100 (got {0})")]
    InvalidQuality(u32),

    /// The scan root does not exist.
    #[error("Input directory does not exist: {}", path.display())]
    DirectoryNotFound {
        /// The root that was passed to the enumerator.
        path: PathBuf,
    },

    /// The scan root exists but is not a directory.
    #[error("Input path is not a directory: {}", path.display())]
    NotADirectory {
        /// The root that was passed to the enumerator.
        path: PathBuf,
    },

    /// A source file could not be read into memory.
    #[error("Failed to read {}: {source}", path.display())]
    FileRead {
        /// The file being read.
        path: PathBuf,
        /// Underlying I/O error.
        source: IoError,
    },

    /// A source file was read successfully but contained no bytes.
    #[error("File is empty: {}", path.display())]
    EmptyFile {
        /// The empty file.
        path: PathBuf,
    },

    /// A source file's bytes could not be decoded as an image.
    #[error("Failed to decode image {}: {source}", path.display())]
    ImageDecode {
        /// The file whose contents failed to decode.
        path: PathBuf,
        /// Error reported by the `image` crate.
        source: ImageError,
    },

    /// A raster could not be encoded as JPEG.
    #[error("Failed to encode JPEG: {0}")]
    JpegEncode(#[source] ImageError),

    /// Encoded bytes, or a directory for them, could not be written.
    #[error("Failed to write {}: {source}", path.display())]
    FileWrite {
        /// The target path.
        path: PathBuf,
        /// Underlying I/O error.
        source: IoError,
    },

    /// The video file could not be opened for decoding.
    #[error("Failed to open video file at {}: {reason}", path.display())]
    VideoOpen {
        /// Path that was passed to [`VideoSession::open`](crate::VideoSession::open).
        path: PathBuf,
        /// Underlying reason the open failed.
        reason: String,
    },

    /// The file does not contain a video stream.
    #[error("No video stream found in file")]
    NoVideoStream,

    /// A video frame could not be decoded or converted.
    #[error("Failed to decode video frame: {0}")]
    VideoDecodeError(String),

    /// An error originating from the FFmpeg libraries.
    #[error("FFmpeg error: {0}")]
    FfmpegError(String),

    /// An I/O error that is not tied to a single item.
    #[error("I/O error: {0}")]
    IoError(#[from] IoError),
}

impl StrideError {
    /// Returns `true` for errors caused by invalid settings rather than by
    /// the filesystem or the media itself.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            StrideError::InvalidInterval(_) | StrideError::InvalidQuality(_)
        )
    }
}

impl From<FfmpegError> for StrideError {
    fn from(error: FfmpegError) -> Self {
        StrideError::FfmpegError(error.to_string())
    }
}
