//! User-facing reporting.
//!
//! Drivers never print. Everything a user should see (skipped files,
//! per-video results, final counts) is emitted as an [`Event`] to a
//! [`Reporter`] chosen by the caller. [`LogReporter`] forwards events to
//! the `log` facade and is the default; [`TerminalReporter`] writes colored
//! lines to the console and is what the binaries install.

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    path::Path,
};

use colored::Colorize;

use crate::{
    error::StrideError,
    extensions::MediaClass,
    progress::OperationType,
    summary::{RunSummary, VideoBatchSummary, VideoSummary},
};

/// How important an event is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    /// Per-item traces, hidden unless asked for.
    Debug,
    /// Summaries and notices.
    Info,
    /// An item or video was skipped.
    Warning,
}

/// Something a driver wants the user to know about.
#[derive(Debug)]
#[non_exhaustive]
pub enum Event<'a> {
    /// The enumerator found nothing to do.
    NothingFound {
        /// The scanned root.
        root: &'a Path,
        /// What was being looked for.
        class: MediaClass,
    },
    /// An image was written.
    ImageSaved {
        /// Source file.
        source: &'a Path,
        /// Written JPEG.
        target: &'a Path,
    },
    /// An image was skipped.
    ImageSkipped {
        /// Source file.
        source: &'a Path,
        /// JPEG that would have been written.
        target: &'a Path,
        /// Why it was skipped.
        error: &'a StrideError,
    },
    /// An image pass finished.
    ImagePassFinished {
        /// Conversion or sampling.
        operation: OperationType,
        /// Final counts.
        summary: &'a RunSummary,
        /// Root of the written tree.
        output_dir: &'a Path,
    },
    /// A video could not be opened; it contributes no frames.
    VideoOpenFailed {
        /// The video.
        path: &'a Path,
        /// Why opening failed.
        error: &'a StrideError,
    },
    /// A selected frame was written.
    FrameSaved {
        /// Frame position in the stream.
        index: u64,
        /// Written JPEG.
        target: &'a Path,
    },
    /// A selected frame could not be converted or written.
    FrameSkipped {
        /// Frame position in the stream.
        index: u64,
        /// JPEG that would have been written.
        target: &'a Path,
        /// Why it was skipped.
        error: &'a StrideError,
    },
    /// Decoding stopped early; frames already written are kept.
    VideoInterrupted {
        /// The video.
        path: &'a Path,
        /// Frames decoded before the failure.
        frames_seen: u64,
        /// The decode failure.
        error: &'a StrideError,
    },
    /// One video finished.
    VideoFinished(&'a VideoSummary),
    /// A folder of videos finished.
    VideoBatchFinished {
        /// Per-video results.
        summary: &'a VideoBatchSummary,
        /// Flat directory the frames were written to.
        output_dir: &'a Path,
    },
}

impl Event<'_> {
    /// The event's severity.
    pub fn severity(&self) -> Severity {
        match self {
            Event::ImageSaved { .. } | Event::FrameSaved { .. } => Severity::Debug,
            Event::NothingFound { .. }
            | Event::ImagePassFinished { .. }
            | Event::VideoFinished(_)
            | Event::VideoBatchFinished { .. } => Severity::Info,
            Event::ImageSkipped { .. }
            | Event::VideoOpenFailed { .. }
            | Event::FrameSkipped { .. }
            | Event::VideoInterrupted { .. } => Severity::Warning,
        }
    }
}

impl Display for Event<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Event::NothingFound { root, class } => {
                write!(f, "未在 {} 找到{}文件。", root.display(), class.label())
            }
            Event::ImageSaved { source, target } => {
                write!(f, "{} -> {}", source.display(), target.display())
            }
            Event::ImageSkipped {
                source,
                target,
                error,
            } => match error {
                StrideError::FileRead { .. } | StrideError::EmptyFile { .. } => {
                    write!(f, "无法读取图片 {}: {error}", source.display())
                }
                StrideError::ImageDecode { .. } => {
                    write!(f, "解码图片失败 {}: {error}", source.display())
                }
                _ => write!(f, "保存 JPEG 失败 {}: {error}", target.display()),
            },
            Event::ImagePassFinished {
                operation,
                summary,
                output_dir,
            } => {
                if *operation == OperationType::ImageSampling {
                    write!(
                        f,
                        "按间隔 {} 抽取图片: 已保存 {} / {} 张到 {}",
                        summary.interval,
                        summary.saved,
                        summary.discovered,
                        output_dir.display()
                    )?;
                } else {
                    write!(
                        f,
                        "已完成 {} 张图片的格式转换，{} 张保存为 JPG 至 {}",
                        summary.discovered,
                        summary.saved,
                        output_dir.display()
                    )?;
                }
                if summary.failed > 0 {
                    write!(f, " (失败 {} 张)", summary.failed)?;
                }
                Ok(())
            }
            Event::VideoOpenFailed { path, error } => {
                write!(f, "无法打开视频文件: {} ({error})", path.display())
            }
            Event::FrameSaved { index, target } => {
                write!(f, "帧 {index} -> {}", target.display())
            }
            Event::FrameSkipped {
                index,
                target,
                error,
            } => write!(f, "保存图片失败 {} (帧 {index}): {error}", target.display()),
            Event::VideoInterrupted {
                path,
                frames_seen,
                error,
            } => write!(
                f,
                "视频 {} 在第 {frames_seen} 帧后解码中断: {error}",
                path.display()
            ),
            Event::VideoFinished(summary) => write!(
                f,
                "视频 {}: 总帧数 {}, 已保存 {} 张图片",
                summary.display_name(),
                summary.frames_seen,
                summary.frames_saved
            ),
            Event::VideoBatchFinished {
                summary,
                output_dir,
            } => write!(
                f,
                "共处理 {} 个视频，保存图片总数: {} (输出目录 {})",
                summary.videos.len(),
                summary.total_saved(),
                output_dir.display()
            ),
        }
    }
}

/// Receives events from the drivers.
///
/// Implementations must be [`Send`] and [`Sync`] so that one reporter can be
/// shared through an [`Arc`](std::sync::Arc) in [`PassOptions`](crate::PassOptions).
pub trait Reporter: Send + Sync {
    /// Called once per event, in the order events happen.
    fn report(&self, event: &Event<'_>);
}

/// Forwards events to the `log` crate at the matching level.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogReporter;

impl Reporter for LogReporter {
    fn report(&self, event: &Event<'_>) {
        match event.severity() {
            Severity::Debug => log::debug!("{event}"),
            Severity::Info => log::info!("{event}"),
            Severity::Warning => log::warn!("{event}"),
        }
    }
}

/// Writes events to the console.
///
/// Summaries go to stdout; warnings go to stderr behind a yellow `警告:`
/// marker. Debug events are printed only when `verbose` is set.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalReporter {
    verbose: bool,
}

impl TerminalReporter {
    /// Create a reporter; `verbose` enables per-item lines.
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }
}

impl Reporter for TerminalReporter {
    fn report(&self, event: &Event<'_>) {
        match event.severity() {
            Severity::Debug => {
                if self.verbose {
                    eprintln!("{}", event.to_string().dimmed());
                }
            }
            Severity::Info => println!("{event}"),
            Severity::Warning => {
                eprintln!("{} {}", "警告:".yellow().bold(), event.to_string().yellow())
            }
        }
    }
}
