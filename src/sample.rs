//! Every Nth image of a tree → JPEG tree.

use std::path::Path;

use crate::{
    config::PassOptions, convert::run_image_pass, error::StrideError,
    progress::OperationType, sampler::Interval, summary::RunSummary,
};

/// Save every `interval`-th image under `input_dir` as JPEG under
/// `output_dir`.
///
/// Images are numbered in enumeration order (sorted relative path) and the
/// ones at positions `0, n, 2n, …` are re-encoded to the mirrored path with
/// a `.jpg` extension. Since `interval` is already an [`Interval`], an
/// invalid stride is rejected by [`Interval::new`] before anything is
/// scanned.
///
/// # Errors
///
/// Same as [`convert_images`](crate::convert_images).
///
/// # Example
///
/// ```no_run
/// use stridecut::{Interval, PassOptions};
///
/// let summary = stridecut::sample_images("shots", "picked", Interval::new(3)?, &PassOptions::new())?;
/// println!("{} / {}", summary.saved, summary.discovered);
/// # Ok::<(), stridecut::StrideError>(())
/// ```
pub fn sample_images<P, Q>(
    input_dir: P,
    output_dir: Q,
    interval: Interval,
    options: &PassOptions,
) -> Result<RunSummary, StrideError>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    run_image_pass(
        OperationType::ImageSampling,
        input_dir.as_ref(),
        output_dir.as_ref(),
        interval,
        options,
    )
}
