use std::{error::Error, path::PathBuf};

use clap::Parser;
use stridecut::{
    Interval,
    cli::{self, CommonArgs, FfmpegArgs},
};

/// Save every Nth frame of one video as frame_NNNNNN.jpg.
#[derive(Debug, Parser)]
#[command(
    name = "video-to-pictures",
    version,
    after_help = "Example:\n  video-to-pictures --video_path clip.mp4 --output_dir frames --interval 25"
)]
struct Cli {
    /// The video to decode.
    #[arg(long = "video_path")]
    video_path: PathBuf,

    /// Directory the frames are written to.
    #[arg(long = "output_dir")]
    output_dir: PathBuf,

    /// Keep frames 0, N, 2N, ...
    #[arg(long, default_value_t = 10, allow_negative_numbers = true)]
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
    let summary = stridecut::extract_video(&cli.video_path, &cli.output_dir, interval, &options);
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
