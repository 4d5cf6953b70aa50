//! Internal utility functions.
//!
//! Pixel-plane copying for decoded video frames and the path arithmetic the
//! drivers share.

use std::{
    fs,
    path::{Path, PathBuf},
};

use ffmpeg_next::{Rational, frame::Video as VideoFrame};

use crate::error::StrideError;

/// Copy an RGB24 frame into a tightly-packed buffer.
///
/// FFmpeg frames frequently carry per-row padding (stride > width × 3);
/// the padding is stripped so the result can go straight into
/// [`image::RgbImage::from_raw`].
pub(crate) fn frame_to_rgb_buffer(video_frame: &VideoFrame, width: u32, height: u32) -> Vec<u8> {
    let stride = video_frame.stride(0);
    let row_bytes = (width as usize) * 3;
    let data = video_frame.data(0);

    if stride == row_bytes {
        data[..row_bytes * (height as usize)].to_vec()
    } else {
        let mut buffer = Vec::with_capacity(row_bytes * (height as usize));
        for row in 0..(height as usize) {
            let row_start = row * stride;
            buffer.extend_from_slice(&data[row_start..row_start + row_bytes]);
        }
        buffer
    }
}

/// Frames per second from a stream rate, or `0.0` if the rate is unset.
pub(crate) fn rate_to_fps(rate: Rational) -> f64 {
    if rate.denominator() != 0 && rate.numerator() > 0 {
        rate.numerator() as f64 / rate.denominator() as f64
    } else {
        0.0
    }
}

/// `output_dir/<relative path with its extension replaced by .jpg>`.
///
/// Only the last extension is replaced: `a.b.png` becomes `a.b.jpg`.
pub(crate) fn jpeg_target(output_dir: &Path, relative_path: &Path) -> PathBuf {
    output_dir.join(relative_path).with_extension("jpg")
}

/// `<prefix>_NNNNNN.jpg` with a six-digit zero-padded index.
pub(crate) fn frame_file_name(prefix: &str, index: u64) -> String {
    format!("{prefix}_{index:06}.jpg")
}

/// Create the directory that will hold `target`, if it has one.
pub(crate) fn ensure_parent_dir(target: &Path) -> Result<(), StrideError> {
    match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            fs::create_dir_all(parent).map_err(|source| StrideError::FileWrite {
                path: parent.to_path_buf(),
                source,
            })
        }
        _ => Ok(()),
    }
}
