//! Video drivers: one file, or a folder of files.
//!
//! # Example
//!
//! ```no_run
//! use stridecut::{Interval, PassOptions};
//!
//! let options = PassOptions::new();
//! let one = stridecut::extract_video("clip.mp4", "frames", Interval::new(10)?, &options)?;
//! println!("{} of {} frames saved", one.frames_saved, one.frames_seen);
//!
//! let all = stridecut::extract_videos("clips", "frames", Interval::new(25)?, &options)?;
//! println!("{} frames saved", all.total_saved());
//! # Ok::<(), stridecut::StrideError>(())
//! ```

use std::{fs, path::Path, sync::Arc};

use crate::{
    config::PassOptions,
    enumerate::enumerate_files,
    error::StrideError,
    extensions::MediaClass,
    frames::{FrameNaming, extract_frames},
    progress::{NoOpProgress, OperationType, ProgressTracker},
    report::Event,
    sampler::Interval,
    summary::{VideoBatchSummary, VideoSummary},
};

/// Save every `interval`-th frame of one video as `frame_NNNNNN.jpg` in
/// `output_dir`.
///
/// An unopenable video is not an error: it is reported, and the summary
/// comes back with `opened == false` and zero counts.
///
/// # Errors
///
/// Returns [`StrideError::FileWrite`] if `output_dir` cannot be created.
pub fn extract_video<P, Q>(
    video_path: P,
    output_dir: Q,
    interval: Interval,
    options: &PassOptions,
) -> Result<VideoSummary, StrideError>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let output_dir = output_dir.as_ref();
    create_output_dir(output_dir)?;
    Ok(extract_frames(
        video_path.as_ref(),
        output_dir,
        interval,
        &FrameNaming::Sequential,
        options,
    ))
}

/// Run [`extract_video`]'s loop over every video under `input_dir`, writing
/// `<stem>_NNNNNN.jpg` files into the flat `output_dir`.
///
/// Videos are processed in enumeration order; one that fails to open is
/// reported and contributes no frames. The output directory is only
/// created when at least one video is found.
///
/// # Errors
///
/// - [`StrideError::DirectoryNotFound`] / [`StrideError::NotADirectory`]
///   if `input_dir` is missing.
/// - [`StrideError::FileWrite`] if `output_dir` cannot be created.
pub fn extract_videos<P, Q>(
    input_dir: P,
    output_dir: Q,
    interval: Interval,
    options: &PassOptions,
) -> Result<VideoBatchSummary, StrideError>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let input_dir = input_dir.as_ref();
    let output_dir = output_dir.as_ref();
    let videos = enumerate_files(input_dir, &options.video_extensions)?;
    let mut summary = VideoBatchSummary::default();

    if videos.is_empty() {
        options.emit(Event::NothingFound {
            root: input_dir,
            class: MediaClass::Video,
        });
        return Ok(summary);
    }

    create_output_dir(output_dir)?;

    // Per-frame progress belongs to the single-video loop; the batch
    // reports per video.
    let per_video = options.clone().with_progress(Arc::new(NoOpProgress));
    let mut progress = ProgressTracker::new(
        options.progress.clone(),
        OperationType::VideoBatch,
        Some(videos.len() as u64),
        1,
    );

    for video in &videos {
        summary.videos.push(extract_frames(
            &video.path,
            output_dir,
            interval,
            &FrameNaming::SourceStem,
            &per_video,
        ));
        progress.advance();
    }

    progress.finish();
    options.emit(Event::VideoBatchFinished {
        summary: &summary,
        output_dir,
    });
    Ok(summary)
}

fn create_output_dir(output_dir: &Path) -> Result<(), StrideError> {
    fs::create_dir_all(output_dir).map_err(|source| StrideError::FileWrite {
        path: output_dir.to_path_buf(),
        source,
    })
}
