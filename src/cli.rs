//! Plumbing shared by the bundled binaries. Not part of the library API.
//!
//! Each tool parses its own required flags and flattens [`CommonArgs`] for
//! the optional ones; [`CommonArgs::pass_options`] turns those into
//! [`PassOptions`] wired to the terminal, and [`finish`] maps the outcome
//! to an exit status.

use std::{error::Error, process, sync::Arc};

use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};

use crate::{
    codec::JpegQuality,
    config::PassOptions,
    ffmpeg::{FfmpegLogLevel, set_ffmpeg_log_level},
    progress::{ProgressCallback, ProgressInfo},
    report::{Event, Reporter, TerminalReporter},
};

/// Exit status for a run where some items failed under `--strict`.
///
/// Distinct from 1 (fatal error) and from 2, which clap uses for usage
/// errors such as a missing flag.
pub const EXIT_PARTIAL: i32 = 3;

/// Optional flags every tool accepts.
#[derive(Debug, Args, Clone)]
pub struct CommonArgs {
    /// JPEG quality for written images (0-100).
    #[arg(long, default_value_t = 95)]
    pub quality: u32,

    /// Print a line for every saved file.
    #[arg(long)]
    pub verbose: bool,

    /// Show a progress bar on stderr.
    #[arg(long)]
    pub progress: bool,

    /// Exit with status 3 if any file or video was skipped.
    #[arg(long)]
    pub strict: bool,
}

/// Extra flags for the video tools.
#[derive(Debug, Args, Clone)]
pub struct FfmpegArgs {
    /// FFmpeg log level (quiet, panic, fatal, error, warning, info, verbose, debug, trace).
    #[arg(long = "log_level", default_value_t = FfmpegLogLevel::Error)]
    pub log_level: FfmpegLogLevel,
}

impl FfmpegArgs {
    /// Apply the requested FFmpeg verbosity.
    pub fn apply(&self) {
        set_ffmpeg_log_level(self.log_level);
    }
}

impl CommonArgs {
    /// Build pass options that report to the terminal.
    ///
    /// Returns the progress bar as well, so the caller can clear it once
    /// the pass is over.
    ///
    /// # Errors
    ///
    /// Returns an error if `--quality` is out of range.
    pub fn pass_options(&self) -> Result<(PassOptions, Option<ProgressBar>), Box<dyn Error>> {
        let quality = JpegQuality::new(self.quality)?;
        let reporter = TerminalReporter::new(self.verbose);
        let options = PassOptions::new().with_quality(quality);

        if !self.progress {
            return Ok((options.with_reporter(Arc::new(reporter)), None));
        }

        let bar = ProgressBar::new(0);
        let style =
            ProgressStyle::with_template("{spinner:.green} {bar:40.cyan/blue} {pos}/{len} {msg}")?;
        bar.set_style(style.progress_chars("##-"));

        let options = options
            .with_reporter(Arc::new(SuspendingReporter {
                inner: reporter,
                bar: bar.clone(),
            }))
            .with_progress(Arc::new(BarProgress { bar: bar.clone() }));
        Ok((options, Some(bar)))
    }
}

/// Feeds [`ProgressInfo`] into an `indicatif` bar.
struct BarProgress {
    bar: ProgressBar,
}

impl ProgressCallback for BarProgress {
    fn on_progress(&self, info: &ProgressInfo) {
        let length = info.total.unwrap_or(info.current).max(info.current);
        self.bar.set_length(length);
        self.bar.set_position(info.current);
    }
}

/// Hides the bar while a line is printed so the two do not interleave.
struct SuspendingReporter {
    inner: TerminalReporter,
    bar: ProgressBar,
}

impl Reporter for SuspendingReporter {
    fn report(&self, event: &Event<'_>) {
        self.bar.suspend(|| self.inner.report(event));
    }
}

/// Exit the process according to the outcome of `run`.
///
/// `Ok(partial)` exits 0, or [`EXIT_PARTIAL`] when `partial` and `strict`
/// are both set; `Err` prints `error: …` and exits 1.
pub fn finish(result: Result<bool, Box<dyn Error>>, strict: bool) -> ! {
    match result {
        Ok(partial) if partial && strict => process::exit(EXIT_PARTIAL),
        Ok(_) => process::exit(0),
        Err(error) => {
            eprintln!("error: {error}");
            process::exit(1);
        }
    }
}
