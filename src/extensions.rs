//! Recognized file extensions per media class.
//!
//! [`ExtensionSet`] is the one place that decides whether a file belongs to
//! a pass. The enumerator receives a set by value, so callers can swap the
//! defaults for their own list without touching the walk itself.

use std::{
    collections::BTreeSet,
    fmt::{Display, Formatter, Result as FmtResult},
    path::Path,
};

/// Default extensions for still images.
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "tif", "tiff", "gif"];

/// Default extensions for video containers.
pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "avi", "mov", "mkv", "flv", "wmv", "mpeg", "mpg"];

/// The kind of media a pass works on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaClass {
    /// Still images.
    Image,
    /// Video files.
    Video,
}

impl MediaClass {
    /// The default extension set for this class.
    pub fn default_extensions(self) -> ExtensionSet {
        match self {
            MediaClass::Image => ExtensionSet::new(IMAGE_EXTENSIONS.iter().copied()),
            MediaClass::Video => ExtensionSet::new(VIDEO_EXTENSIONS.iter().copied()),
        }
    }

    /// Noun used in console messages.
    pub fn label(self) -> &'static str {
        match self {
            MediaClass::Image => "图片",
            MediaClass::Video => "视频",
        }
    }
}

/// A case-insensitive set of file extensions.
///
/// Entries are stored lowercased and without a leading dot, so `".JPG"`,
/// `"jpg"` and `"Jpg"` all name the same extension.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExtensionSet {
    extensions: BTreeSet<String>,
}

impl ExtensionSet {
    /// Build a set from any list of extensions, with or without dots.
    pub fn new<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let extensions = extensions
            .into_iter()
            .map(|ext| normalize(ext.as_ref()))
            .filter(|ext| !ext.is_empty())
            .collect();
        Self { extensions }
    }

    /// Default image extensions (`jpg jpeg png bmp tif tiff gif`).
    pub fn images() -> Self {
        MediaClass::Image.default_extensions()
    }

    /// Default video extensions (`mp4 avi mov mkv flv wmv mpeg mpg`).
    pub fn videos() -> Self {
        MediaClass::Video.default_extensions()
    }

    /// Whether `extension` (dot optional, any case) is in the set.
    pub fn contains(&self, extension: &str) -> bool {
        self.extensions.contains(&normalize(extension))
    }

    /// Whether the file at `path` has a recognized extension.
    ///
    /// Files without an extension never match.
    pub fn matches(&self, path: &Path) -> bool {
        path.extension()
            .is_some_and(|ext| self.contains(&ext.to_string_lossy()))
    }

    /// Number of extensions in the set.
    pub fn len(&self) -> usize {
        self.extensions.len()
    }

    /// Returns `true` if the set matches nothing.
    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty()
    }

    /// Iterate the normalized extensions in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.extensions.iter().map(String::as_str)
    }
}

impl Display for ExtensionSet {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let mut first = true;
        for ext in &self.extensions {
            if !first {
                f.write_str(" ")?;
            }
            write!(f, ".{ext}")?;
            first = false;
        }
        Ok(())
    }
}

fn normalize(extension: &str) -> String {
    extension.trim().trim_start_matches('.').to_lowercase()
}
