//! CLI argument definitions using clap.

use std::path::PathBuf;

use clap::Parser;
use tof_core::models::FrameRate;

/// TimingOffset - detect whether Web and BD sources align based on video keyframes
#[derive(Parser, Debug)]
#[command(
    name = "timing-offset",
    author,
    version,
    about = "Detect whether two video sources are frame aligned based on keyframes",
    long_about = "Compares keyframe positions of two renditions of the same video and reports,\n\
                  section by section, whether they are aligned or by how many frames one is\n\
                  shifted against the other.\n\n\
                  Each side may be a video file, an L-SMASH Works index (.lwi), a keyframe\n\
                  format file, or a directory of such files matched by episode number."
)]
pub struct Cli {
    /// The clip to compare against (file or directory)
    pub left: PathBuf,

    /// The clip to compare (file or directory)
    pub right: PathBuf,

    /// Path to a TOML configuration file
    #[arg(short, long, env = "TIMING_OFFSET_CONFIG")]
    pub config: Option<PathBuf>,

    /// Frame rate used to print timestamps, e.g. 24000/1001
    #[arg(long, value_name = "NUM/DEN")]
    pub fps: Option<FrameRate>,

    /// Print one JSON report per pair instead of text
    #[arg(long)]
    pub json: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Increase logging verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all log output except errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}
