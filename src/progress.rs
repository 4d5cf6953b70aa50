//! Progress reporting.
//!
//! This module provides [`ProgressCallback`] for monitoring a pass and
//! [`ProgressInfo`] for the snapshot delivered to it. Callbacks observe;
//! they cannot stop a pass.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use stridecut::{PassOptions, ProgressCallback, ProgressInfo};
//!
//! struct PrintProgress;
//!
//! impl ProgressCallback for PrintProgress {
//!     fn on_progress(&self, info: &ProgressInfo) {
//!         if let Some(pct) = info.percentage {
//!             println!("[{:?}] {pct:.1}% complete", info.operation);
//!         }
//!     }
//! }
//!
//! let options = PassOptions::new().with_progress(Arc::new(PrintProgress));
//! let summary = stridecut::convert_images("in", "out", &options)?;
//! # Ok::<(), stridecut::StrideError>(())
//! ```

use std::{
    sync::Arc,
    time::{Duration, Instant},
};

/// The kind of pass currently running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum OperationType {
    /// Converting every image in a tree to JPEG.
    ImageConversion,
    /// Saving every Nth image of a tree.
    ImageSampling,
    /// Saving every Nth frame of one video.
    FrameExtraction,
    /// Running frame extraction over a folder of videos.
    VideoBatch,
}

/// A snapshot of pass progress.
///
/// Delivered to [`ProgressCallback::on_progress`] every
/// [`batch_size`](crate::PassOptions::with_batch_size) items.
#[derive(Debug, Clone)]
pub struct ProgressInfo {
    /// What kind of work is being performed.
    pub operation: OperationType,
    /// How many items (files, frames or videos) have been processed.
    pub current: u64,
    /// Total items expected, if known ahead of time. For a single video
    /// this is an estimate derived from duration and frame rate.
    pub total: Option<u64>,
    /// Completion percentage (0.0 – 100.0), if `total` is known.
    pub percentage: Option<f32>,
    /// Wall-clock time elapsed since the pass started.
    pub elapsed: Duration,
    /// Estimated time remaining, based on current throughput.
    pub estimated_remaining: Option<Duration>,
}

/// Trait for receiving progress updates during a pass.
///
/// Implementations must be [`Send`] and [`Sync`] so that one callback can be
/// shared between passes through an [`Arc`].
pub trait ProgressCallback: Send + Sync {
    /// Called at regular intervals during a pass.
    fn on_progress(&self, info: &ProgressInfo);
}

/// Discards all progress notifications. The default.
pub(crate) struct NoOpProgress;

impl ProgressCallback for NoOpProgress {
    fn on_progress(&self, _info: &ProgressInfo) {}
}

/// Tracks timing for one pass and fires the callback.
pub(crate) struct ProgressTracker {
    callback: Arc<dyn ProgressCallback>,
    operation: OperationType,
    total: Option<u64>,
    current: u64,
    batch_size: u64,
    start_time: Instant,
    items_since_last_report: u64,
}

impl ProgressTracker {
    pub(crate) fn new(
        callback: Arc<dyn ProgressCallback>,
        operation: OperationType,
        total: Option<u64>,
        batch_size: u64,
    ) -> Self {
        Self {
            callback,
            operation,
            total,
            current: 0,
            batch_size: batch_size.max(1),
            start_time: Instant::now(),
            items_since_last_report: 0,
        }
    }

    /// Record one processed item.
    pub(crate) fn advance(&mut self) {
        self.current += 1;
        self.items_since_last_report += 1;

        if self.items_since_last_report >= self.batch_size {
            self.report();
            self.items_since_last_report = 0;
        }
    }

    /// Emit a final report. Estimated totals are pinned to the real count.
    pub(crate) fn finish(&mut self) {
        if self.total.is_some_and(|total| total != self.current) {
            self.total = Some(self.current);
        }
        self.report();
    }

    fn report(&self) {
        let elapsed = self.start_time.elapsed();

        let percentage = self
            .total
            .filter(|&t| t > 0)
            .map(|t| ((self.current as f32 / t as f32) * 100.0).min(100.0));

        let estimated_remaining = if self.current > 0 {
            self.total.map(|t| {
                let remaining = t.saturating_sub(self.current);
                elapsed.mul_f64(remaining as f64 / self.current as f64)
            })
        } else {
            None
        };

        let info = ProgressInfo {
            operation: self.operation,
            current: self.current,
            total: self.total,
            percentage,
            elapsed,
            estimated_remaining,
        };

        self.callback.on_progress(&info);
    }
}
