//! Image tree → JPEG tree.
//!
//! [`convert_images`] re-encodes every recognized image under an input
//! directory as a JPEG under the output directory, keeping the relative
//! layout and swapping the extension for `.jpg`. The per-item work is
//! shared with [`sample_images`](crate::sample_images), which is the same
//! pass restricted to every Nth file.
//!
//! # Example
//!
//! ```no_run
//! use stridecut::PassOptions;
//!
//! let summary = stridecut::convert_images("scans", "scans_jpg", &PassOptions::new())?;
//! println!("{} / {} converted", summary.saved, summary.discovered);
//! # Ok::<(), stridecut::StrideError>(())
//! ```

use std::{fs, path::Path};

use crate::{
    codec,
    config::PassOptions,
    enumerate::enumerate_files,
    error::StrideError,
    extensions::MediaClass,
    progress::{OperationType, ProgressTracker},
    report::Event,
    sampler::{Interval, StrideExt},
    summary::RunSummary,
};

/// Convert every image under `input_dir` to JPEG under `output_dir`.
///
/// `a/b.png` is written to `output_dir/a/b.jpg`; directories are created as
/// needed. Unreadable, corrupt or unwritable files are reported and
/// skipped. When no image is found, nothing is created.
///
/// # Errors
///
/// - [`StrideError::DirectoryNotFound`] / [`StrideError::NotADirectory`]
///   if `input_dir` is missing.
/// - [`StrideError::FileWrite`] if `output_dir` cannot be created.
pub fn convert_images<P, Q>(
    input_dir: P,
    output_dir: Q,
    options: &PassOptions,
) -> Result<RunSummary, StrideError>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    run_image_pass(
        OperationType::ImageConversion,
        input_dir.as_ref(),
        output_dir.as_ref(),
        Interval::EVERY,
        options,
    )
}

/// Enumerate, pick by stride, transcode, report.
pub(crate) fn run_image_pass(
    operation: OperationType,
    input_dir: &Path,
    output_dir: &Path,
    interval: Interval,
    options: &PassOptions,
) -> Result<RunSummary, StrideError> {
    let entries = enumerate_files(input_dir, &options.image_extensions)?;
    let mut summary = RunSummary::new(interval, entries.len() as u64);

    if entries.is_empty() {
        options.emit(Event::NothingFound {
            root: input_dir,
            class: MediaClass::Image,
        });
        return Ok(summary);
    }

    fs::create_dir_all(output_dir).map_err(|source| StrideError::FileWrite {
        path: output_dir.to_path_buf(),
        source,
    })?;

    let mut progress = ProgressTracker::new(
        options.progress.clone(),
        operation,
        Some(interval.selected_count(summary.discovered)),
        options.batch_size,
    );

    for (_, entry) in entries.iter().stride(interval) {
        summary.selected += 1;
        let target = crate::utilities::jpeg_target(output_dir, &entry.relative_path);

        match transcode_to_jpeg(&entry.path, &target, options) {
            Ok(()) => {
                summary.saved += 1;
                options.emit(Event::ImageSaved {
                    source: &entry.path,
                    target: &target,
                });
            }
            Err(error) => {
                summary.failed += 1;
                options.emit(Event::ImageSkipped {
                    source: &entry.path,
                    target: &target,
                    error: &error,
                });
            }
        }
        progress.advance();
    }

    progress.finish();
    options.emit(Event::ImagePassFinished {
        operation,
        summary: &summary,
        output_dir,
    });
    Ok(summary)
}

// The target directory is created only once the source has decoded, so a
// bad file does not leave an empty directory behind.
fn transcode_to_jpeg(source: &Path, target: &Path, options: &PassOptions) -> Result<(), StrideError> {
    let raster = codec::read_image(source)?;
    crate::utilities::ensure_parent_dir(target)?;
    codec::save_jpeg(target, &raster, options.quality)?;
    Ok(())
}
