//! Deterministic file discovery.
//!
//! [`enumerate_files`] walks a directory tree and returns the files whose
//! extension is in an [`ExtensionSet`], ordered by their path relative to
//! the scan root. Stride sampling selects items by position, so the order
//! must not depend on the order the operating system happens to list
//! directory entries in.
//!
//! # Example
//!
//! ```no_run
//! use stridecut::{ExtensionSet, enumerate_files};
//!
//! let files = enumerate_files("photos", &ExtensionSet::images())?;
//! for entry in &files {
//!     println!("{}", entry.relative_path.display());
//! }
//! # Ok::<(), stridecut::StrideError>(())
//! ```

use std::{
    ffi::OsString,
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use walkdir::{DirEntry, WalkDir};

use crate::{error::StrideError, extensions::ExtensionSet};

/// One discovered file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// Path usable for I/O (the scan root joined with `relative_path`).
    pub path: PathBuf,
    /// Path relative to the scan root.
    pub relative_path: PathBuf,
}

/// Recursively list the files under `root` whose extension is in
/// `extensions`.
///
/// The result is sorted by the relative path string, compared code point by
/// code point; two scans of an unchanged tree return the same list.
/// Symbolic links to files are listed under the link's own name; links to
/// directories are not descended into. Entries that cannot be
/// read (permission errors, races with deletion) are skipped with a
/// `log::warn!`.
///
/// # Errors
///
/// - [`StrideError::DirectoryNotFound`] if `root` does not exist.
/// - [`StrideError::NotADirectory`] if `root` is not a directory.
/// - [`StrideError::IoError`] if the root's metadata cannot be read.
pub fn enumerate_files<P: AsRef<Path>>(
    root: P,
    extensions: &ExtensionSet,
) -> Result<Vec<FileEntry>, StrideError> {
    let root = root.as_ref();
    ensure_directory(root)?;

    log::debug!(
        "Scanning {} for extensions [{}]",
        root.display(),
        extensions
    );

    let mut entries = Vec::new();
    for result in WalkDir::new(root).follow_links(false) {
        let entry = match result {
            Ok(entry) => entry,
            Err(error) => {
                log::warn!("Skipping unreadable entry under {}: {error}", root.display());
                continue;
            }
        };

        if !is_file_or_file_link(&entry) || !extensions.matches(entry.path()) {
            continue;
        }

        let Ok(relative_path) = entry.path().strip_prefix(root) else {
            continue;
        };
        entries.push(FileEntry {
            relative_path: relative_path.to_path_buf(),
            path: entry.path().to_path_buf(),
        });
    }

    entries.sort_by_cached_key(sort_key);
    log::debug!("Found {} matching file(s) under {}", entries.len(), root.display());
    Ok(entries)
}

// With `follow_links(false)` a link reports its own file type, so the
// target has to be checked separately. Dangling links are dropped.
fn is_file_or_file_link(entry: &DirEntry) -> bool {
    entry.file_type().is_file() || (entry.path_is_symlink() && entry.path().is_file())
}

fn ensure_directory(root: &Path) -> Result<(), StrideError> {
    match fs::metadata(root) {
        Ok(metadata) if metadata.is_dir() => Ok(()),
        Ok(_) => Err(StrideError::NotADirectory {
            path: root.to_path_buf(),
        }),
        Err(error) if error.kind() == ErrorKind::NotFound => Err(StrideError::DirectoryNotFound {
            path: root.to_path_buf(),
        }),
        Err(error) => Err(StrideError::IoError(error)),
    }
}

// Non-UTF-8 names collapse under lossy conversion, so the raw OS string
// breaks ties.
fn sort_key(entry: &FileEntry) -> (String, OsString) {
    (
        entry.relative_path.to_string_lossy().into_owned(),
        entry.relative_path.as_os_str().to_owned(),
    )
}
