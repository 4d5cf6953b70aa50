use std::{error::Error, path::PathBuf};

use clap::Parser;
use stridecut::cli::{self, CommonArgs};

/// Convert every image under a directory to JPEG, mirroring the tree.
#[derive(Debug, Parser)]
#[command(
    name = "imgs-format-conversion",
    version,
    after_help = "Example:\n  imgs-format-conversion --input_dir scans --output_dir scans_jpg --quality 90"
)]
struct Cli {
    /// Directory to scan recursively for images.
    #[arg(long = "input_dir")]
    input_dir: PathBuf,

    /// Directory the JPEG tree is written to.
    #[arg(long = "output_dir")]
    output_dir: PathBuf,

    #[command(flatten)]
    common: CommonArgs,
}

fn run(cli: Cli) -> Result<bool, Box<dyn Error>> {
    let (options, bar) = cli.common.pass_options()?;
    let summary = stridecut::convert_images(&cli.input_dir, &cli.output_dir, &options);
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
