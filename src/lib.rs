//! # stridecut
//!
//! Batch media preparation: convert image trees to JPEG, keep every Nth
//! image of a tree, and cut every Nth frame out of one video or a folder of
//! videos.
//!
//! Images are decoded with the [`image`](https://crates.io/crates/image)
//! crate; videos are decoded with FFmpeg through
//! [`ffmpeg-next`](https://crates.io/crates/ffmpeg-next). Every written file
//! is a JPEG.
//!
//! ## Quick Start
//!
//! ### Convert a Tree of Images
//!
//! ```no_run
//! use stridecut::PassOptions;
//!
//! let summary = stridecut::convert_images("scans", "scans_jpg", &PassOptions::new()).unwrap();
//! println!("{} of {} images converted", summary.saved, summary.discovered);
//! ```
//!
//! ### Keep Every Third Image
//!
//! ```no_run
//! use stridecut::{Interval, PassOptions};
//!
//! let interval = Interval::new(3).unwrap();
//! stridecut::sample_images("shots", "picked", interval, &PassOptions::new()).unwrap();
//! ```
//!
//! ### Cut Frames from Videos
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use stridecut::{Interval, PassOptions, TerminalReporter};
//!
//! let options = PassOptions::new().with_reporter(Arc::new(TerminalReporter::new(false)));
//!
//! // frames/frame_000000.jpg, frames/frame_000010.jpg, ...
//! stridecut::extract_video("clip.mp4", "frames", Interval::new(10).unwrap(), &options).unwrap();
//!
//! // frames/<stem>_000000.jpg for every video under clips/
//! stridecut::extract_videos("clips", "frames", Interval::new(25).unwrap(), &options).unwrap();
//! ```
//!
//! ## Behavior
//!
//! - **Deterministic order**: files are enumerated recursively and sorted by
//!   relative path, so the same tree always yields the same selection.
//! - **Stride sampling**: an [`Interval`] of `n` keeps positions
//!   `0, n, 2n, …`, for files and frames alike.
//! - **Skip, don't abort**: unreadable images, unopenable videos and failed
//!   writes are reported through a [`Reporter`] and the pass continues.
//!   Only bad settings and a missing input directory stop a run.
//! - **Nothing found, nothing written**: an input tree without matching
//!   files is reported and no output directory is created.

#[doc(hidden)]
pub mod cli;
pub mod codec;
pub mod config;
pub mod convert;
pub mod enumerate;
pub mod error;
pub mod extensions;
pub mod extract;
pub mod ffmpeg;
pub mod frames;
pub mod progress;
pub mod report;
pub mod sample;
pub mod sampler;
pub mod session;
pub mod summary;
mod utilities;

pub use codec::{JpegQuality, Raster, decode_image, encode_jpeg, read_image, save_jpeg, write_bytes};
pub use config::PassOptions;
pub use convert::convert_images;
pub use enumerate::{FileEntry, enumerate_files};
pub use error::StrideError;
pub use extensions::{ExtensionSet, IMAGE_EXTENSIONS, MediaClass, VIDEO_EXTENSIONS};
pub use extract::{extract_video, extract_videos};
pub use ffmpeg::{FfmpegLogLevel, get_ffmpeg_log_level, set_ffmpeg_log_level};
pub use frames::{FrameNaming, extract_frames};
pub use progress::{OperationType, ProgressCallback, ProgressInfo};
pub use report::{Event, LogReporter, Reporter, Severity, TerminalReporter};
pub use sample::sample_images;
pub use sampler::{Interval, Stride, StrideExt};
pub use session::{VideoInfo, VideoSession};
pub use summary::{RunSummary, VideoBatchSummary, VideoSummary};
