//! Stride-based frame extraction from one video.
//!
//! [`extract_frames`] opens a [`VideoSession`], walks every frame in
//! presentation order and writes the frames picked by the [`Interval`] as
//! JPEG files named by [`FrameNaming`]. It never fails: an unopenable
//! video, an unwritable frame or a decode error half-way through are all
//! reported as events and reflected in the returned [`VideoSummary`].

use std::path::Path;

use crate::{
    codec,
    config::PassOptions,
    error::StrideError,
    progress::{OperationType, ProgressTracker},
    report::Event,
    sampler::Interval,
    session::VideoSession,
    summary::VideoSummary,
};

/// How written frames are named.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameNaming {
    /// `frame_NNNNNN.jpg`.
    Sequential,
    /// `<stem>_NNNNNN.jpg`, where the stem is the source file name without
    /// its extension.
    SourceStem,
}

impl FrameNaming {
    /// File name for the frame at `index` of `source`.
    pub fn file_name(&self, source: &Path, index: u64) -> String {
        match self {
            FrameNaming::Sequential => crate::utilities::frame_file_name("frame", index),
            FrameNaming::SourceStem => {
                let stem = source
                    .file_stem()
                    .map(|stem| stem.to_string_lossy())
                    .unwrap_or_default();
                crate::utilities::frame_file_name(&stem, index)
            }
        }
    }
}

/// Write every `interval`-th frame of `video_path` into `output_dir`.
///
/// `output_dir` must already exist. Frame indices count decoded frames from
/// 0; the loop ends only at end of stream.
pub fn extract_frames(
    video_path: &Path,
    output_dir: &Path,
    interval: Interval,
    naming: &FrameNaming,
    options: &PassOptions,
) -> VideoSummary {
    let mut summary = VideoSummary::new(video_path);

    let mut session = match VideoSession::open(video_path) {
        Ok(session) => session,
        Err(error) => {
            options.emit(Event::VideoOpenFailed {
                path: video_path,
                error: &error,
            });
            options.emit(Event::VideoFinished(&summary));
            return summary;
        }
    };
    summary.opened = true;

    let mut progress = ProgressTracker::new(
        options.progress.clone(),
        OperationType::FrameExtraction,
        session.info().estimated_frames,
        options.batch_size,
    );

    loop {
        match session.grab() {
            Ok(true) => {}
            Ok(false) => break,
            Err(error) => {
                summary.interrupted = true;
                options.emit(Event::VideoInterrupted {
                    path: video_path,
                    frames_seen: summary.frames_seen,
                    error: &error,
                });
                break;
            }
        }

        let index = summary.frames_seen;
        summary.frames_seen += 1;
        progress.advance();

        if !interval.selects(index) {
            continue;
        }

        let target = output_dir.join(naming.file_name(video_path, index));
        match save_current_frame(&mut session, &target, options) {
            Ok(()) => {
                summary.frames_saved += 1;
                options.emit(Event::FrameSaved {
                    index,
                    target: &target,
                });
            }
            Err(error) => {
                summary.write_failures += 1;
                options.emit(Event::FrameSkipped {
                    index,
                    target: &target,
                    error: &error,
                });
            }
        }
    }

    progress.finish();
    drop(session);

    options.emit(Event::VideoFinished(&summary));
    summary
}

fn save_current_frame(
    session: &mut VideoSession,
    target: &Path,
    options: &PassOptions,
) -> Result<(), StrideError> {
    let raster = session.retrieve()?;
    codec::save_jpeg(target, &raster, options.quality)?;
    Ok(())
}
