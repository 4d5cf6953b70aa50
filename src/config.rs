//! Pass configuration.
//!
//! [`PassOptions`] is a builder that threads the JPEG quality, the
//! recognized extension sets, the reporter and the progress callback
//! through the drivers without widening every function signature.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use stridecut::{ExtensionSet, JpegQuality, PassOptions, TerminalReporter};
//!
//! let options = PassOptions::new()
//!     .with_quality(JpegQuality::new(90)?)
//!     .with_image_extensions(ExtensionSet::new(["png", "webp"]))
//!     .with_reporter(Arc::new(TerminalReporter::new(false)));
//! # Ok::<(), stridecut::StrideError>(())
//! ```

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    sync::Arc,
};

use crate::{
    codec::JpegQuality,
    extensions::ExtensionSet,
    progress::{NoOpProgress, ProgressCallback},
    report::{Event, LogReporter, Reporter},
};

/// Settings shared by every driver.
///
/// A default-constructed value writes quality-95 JPEGs, recognizes the
/// default image and video extensions, reports through the `log` crate and
/// discards progress.
#[derive(Clone)]
pub struct PassOptions {
    pub(crate) quality: JpegQuality,
    pub(crate) image_extensions: ExtensionSet,
    pub(crate) video_extensions: ExtensionSet,
    pub(crate) reporter: Arc<dyn Reporter>,
    pub(crate) progress: Arc<dyn ProgressCallback>,
    /// How often to fire the progress callback (every N items).
    pub(crate) batch_size: u64,
}

impl Debug for PassOptions {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("PassOptions")
            .field("quality", &self.quality.get())
            .field("image_extensions", &self.image_extensions.to_string())
            .field("video_extensions", &self.video_extensions.to_string())
            .field("batch_size", &self.batch_size)
            .finish_non_exhaustive()
    }
}

impl Default for PassOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl PassOptions {
    /// Create options with default settings.
    pub fn new() -> Self {
        Self {
            quality: JpegQuality::DEFAULT,
            image_extensions: ExtensionSet::images(),
            video_extensions: ExtensionSet::videos(),
            reporter: Arc::new(LogReporter),
            progress: Arc::new(NoOpProgress),
            batch_size: 1,
        }
    }

    /// Set the JPEG quality for every written file.
    #[must_use]
    pub fn with_quality(mut self, quality: JpegQuality) -> Self {
        self.quality = quality;
        self
    }

    /// Replace the set of extensions treated as images.
    #[must_use]
    pub fn with_image_extensions(mut self, extensions: ExtensionSet) -> Self {
        self.image_extensions = extensions;
        self
    }

    /// Replace the set of extensions treated as videos.
    #[must_use]
    pub fn with_video_extensions(mut self, extensions: ExtensionSet) -> Self {
        self.video_extensions = extensions;
        self
    }

    /// Send events to `reporter` instead of the `log` crate.
    #[must_use]
    pub fn with_reporter(mut self, reporter: Arc<dyn Reporter>) -> Self {
        self.reporter = reporter;
        self
    }

    /// Attach a progress callback.
    #[must_use]
    pub fn with_progress(mut self, callback: Arc<dyn ProgressCallback>) -> Self {
        self.progress = callback;
        self
    }

    /// Set how often the progress callback fires.
    ///
    /// A value of 1 means every item; 10 means every 10th item.
    /// Clamped to a minimum of 1.
    #[must_use]
    pub fn with_batch_size(mut self, size: u64) -> Self {
        self.batch_size = size.max(1);
        self
    }

    /// The configured JPEG quality.
    pub fn quality(&self) -> JpegQuality {
        self.quality
    }

    /// The configured image extensions.
    pub fn image_extensions(&self) -> &ExtensionSet {
        &self.image_extensions
    }

    /// The configured video extensions.
    pub fn video_extensions(&self) -> &ExtensionSet {
        &self.video_extensions
    }

    pub(crate) fn emit(&self, event: Event<'_>) {
        self.reporter.report(&event);
    }
}
