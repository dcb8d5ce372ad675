use clap::Parser;
use std::path::PathBuf;

use peakscope::report::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "peakscope", about = "Power-of-two FFT spectrum and peak analyzer")]
pub struct Cli {
    /// Input audio file (WAV, MP3, FLAC, OGG)
    pub input: PathBuf,

    /// Samples per transform (power of two, at least 4)
    #[arg(short = 'n', long, default_value_t = 4096)]
    pub sample_count: usize,

    /// Number of strongest bins to report per frame
    #[arg(short = 'k', long, default_value_t = 5)]
    pub top_n: usize,

    /// Treat a stereo file as I (left) and Q (right) channels
    #[arg(long)]
    pub iq: bool,

    /// Write the report here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Report format: text or json
    #[arg(long, default_value = "text")]
    pub format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Config file (defaults to peakscope.toml or the user config dir)
    #[arg(long)]
    pub config: Option<PathBuf>,
}
