//! ShortX CLI
//!
//! Short-form vertical video production pipeline: candidate segment
//! selection and 9:16 clip export, montage assembly, and subtitle
//! generation, all delegating media work to external tools.
//!
//! # Usage
//!
//! ```bash
//! shortx ingest --input long.mp4 --out clips/ --min 12 --max 45 --top 10
//! shortx montage --clip clips/clip01.mp4 --voice voice.wav --music bed.mp3 \
//!     --srt clip01.srt --title "Breathe with the Ocean" --out final.mp4
//! shortx subtitles --clip clips/clip01.mp4 --srt clip01.srt --mode from-text \
//!     --text "One. Two. Three."
//! ```

use anyhow::Result;
use clap::Parser;

use shortx_cli::cli::{commands, Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr; stdout carries progress lines and JSON output.
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Ingest(args) => commands::ingest(args).await,
        Commands::Montage(args) => commands::montage(args).await,
        Commands::Subtitles(args) => commands::subtitles(args).await,
    }
}
