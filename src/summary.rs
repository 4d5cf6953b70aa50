//! Aggregate counts produced by the batch drivers.

use std::path::{Path, PathBuf};

use crate::sampler::Interval;

/// Counts for one image pass (conversion or sampling).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Stride used to pick items; [`Interval::EVERY`] for conversion.
    pub interval: Interval,
    /// Files found by the enumerator.
    pub discovered: u64,
    /// Files picked by the stride.
    pub selected: u64,
    /// Files written successfully.
    pub saved: u64,
    /// Selected files that were skipped because of an error.
    pub failed: u64,
}

impl RunSummary {
    pub(crate) fn new(interval: Interval, discovered: u64) -> Self {
        Self {
            interval,
            discovered,
            selected: 0,
            saved: 0,
            failed: 0,
        }
    }

    /// Returns `true` if at least one selected item failed.
    pub fn is_partial(&self) -> bool {
        self.failed > 0
    }
}

/// Counts for one video.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoSummary {
    /// The video that was processed.
    pub source: PathBuf,
    /// Whether a decode session could be opened at all.
    pub opened: bool,
    /// Frames decoded before end of stream.
    pub frames_seen: u64,
    /// Frames written as JPEG.
    pub frames_saved: u64,
    /// Selected frames that could not be converted or written.
    pub write_failures: u64,
    /// Whether decoding stopped on an error instead of end of stream.
    pub interrupted: bool,
}

impl VideoSummary {
    pub(crate) fn new(source: &Path) -> Self {
        Self {
            source: source.to_path_buf(),
            opened: false,
            frames_seen: 0,
            frames_saved: 0,
            write_failures: 0,
            interrupted: false,
        }
    }

    /// File name of the source, for display.
    pub fn display_name(&self) -> String {
        self.source
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.source.display().to_string())
    }

    /// Returns `true` if anything about this video went wrong.
    pub fn is_partial(&self) -> bool {
        !self.opened || self.write_failures > 0 || self.interrupted
    }
}

/// Counts for a folder of videos.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VideoBatchSummary {
    /// One entry per enumerated video, in enumeration order.
    pub videos: Vec<VideoSummary>,
}

impl VideoBatchSummary {
    /// Frames written across all videos.
    pub fn total_saved(&self) -> u64 {
        self.videos.iter().map(|video| video.frames_saved).sum()
    }

    /// Frames decoded across all videos.
    pub fn total_frames(&self) -> u64 {
        self.videos.iter().map(|video| video.frames_seen).sum()
    }

    /// Videos that could not be opened.
    pub fn unopened(&self) -> usize {
        self.videos.iter().filter(|video| !video.opened).count()
    }

    /// Returns `true` if any video is partial.
    pub fn is_partial(&self) -> bool {
        self.videos.iter().any(VideoSummary::is_partial)
    }
}
