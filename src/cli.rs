//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::Parser;

use tunefetch_core::parser::AudioMode;

/// Download audio for a list of links and search phrases.
///
/// Each input line is either a video link or a phrase to search for. Lines
/// are processed one at a time; a failed item never stops the rest.
#[derive(Parser, Debug)]
#[command(name = "tunefetch")]
#[command(author, version, about)]
pub struct Args {
    /// Links or search phrases (one item each). Read from stdin when omitted.
    #[arg(value_name = "INPUT")]
    pub inputs: Vec<String>,

    /// Folder to save audio files into
    #[arg(short = 'o', long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Playlist CSV export to queue, with its metadata embedded into the files
    #[arg(long, value_name = "FILE")]
    pub csv: Option<PathBuf>,

    /// Audio flavor appended to search phrases (official, raw, clean)
    #[arg(short = 'm', long, value_name = "MODE")]
    pub mode: Option<AudioMode>,

    /// Path to the yt-dlp binary
    #[arg(long, value_name = "PATH")]
    pub ytdlp_path: Option<PathBuf>,

    /// Path to ffmpeg (binary or containing folder) for audio conversion
    #[arg(long, value_name = "PATH")]
    pub ffmpeg_path: Option<PathBuf>,

    /// Do not write ID3 tags to downloaded files
    #[arg(long)]
    pub no_tag: bool,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,
}
