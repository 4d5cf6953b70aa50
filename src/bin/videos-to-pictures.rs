use std::{error::Error, path::PathBuf};

use clap::Parser;
use stridecut::{
    Interval,
    cli::{self, CommonArgs, FfmpegArgs},
};

/// Save every Nth frame of every video under a directory as
/// <stem>_NNNNNN.jpg in one flat output directory.
#[derive(Debug, Parser)]
#[command(
    name = "videos-to-pictures",
    version,
    after_help = "Example:\n  videos-to-pictures --input_dir clips --output_dir frames --interval 25 --progress"
)]
struct Cli {
    /// Directory to scan recursively for videos.
    #[arg(long = "input_dir")]
    input_dir: PathBuf,

    /// Directory the frames of all videos are written to.
    #[arg(long = "output_dir")]
    output_dir: PathBuf,

    /// Keep frames 0, N, 2N, ... of each video.
    #[arg(long, allow_negative_numbers = true)]
    interval: i64,

    #[command(flatten)]
    ffmpeg: FfmpegArgs,

    #[command(flatten)]
    common: CommonArgs,
}

fn run(cli: Cli) -> Result<bool, Box<dyn Error>> {
    let interval = Interval::new(cli.interval)?;
    cli.ffmpeg.apply();
    let (options, bar) = cli.common.pass_options()?;
    let summary = stridecut::extract_videos(&cli.input_dir, &cli.output_dir, interval, &options);
    if let Some(bar) = bar {
        bar.finish_and_clear();
    }
    Ok(summary?.is_partial())
}

fn main() {
    let cli = Cli::parse();
    let strict = cli.common.strict;
    cli::finish(run(cli), strict);
}
