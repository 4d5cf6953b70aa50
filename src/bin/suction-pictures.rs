use std::{error::Error, path::PathBuf};

use clap::Parser;
use stridecut::{
    Interval,
    cli::{self, CommonArgs},
};

/// Keep every Nth image of a directory tree, re-encoded as JPEG.
#[derive(Debug, Parser)]
#[command(
    name = "suction-pictures",
    version,
    after_help = "Example:\n  suction-pictures --input_dir shots --output_dir picked --interval 3"
)]
struct Cli {
    /// Directory to scan recursively for images.
    #[arg(long = "input_dir")]
    input_dir: PathBuf,

    /// Directory the selected images are written to.
    #[arg(long = "output_dir")]
    output_dir: PathBuf,

    /// Keep images 0, N, 2N, ... in sorted path order.
    #[arg(long, allow_negative_numbers = true)]
    interval: i64,

    #[command(flatten)]
    common: CommonArgs,
}

fn run(cli: Cli) -> Result<bool, Box<dyn Error>> {
    let interval = Interval::new(cli.interval)?;
    let (options, bar) = cli.common.pass_options()?;
    let summary = stridecut::sample_images(&cli.input_dir, &cli.output_dir, interval, &options);
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
