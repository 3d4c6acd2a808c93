//! Command-line interface

pub mod args;
pub mod commands;

use clap::{Parser, Subcommand};

pub use args::{IngestArgs, MontageArgs, SubtitlesArgs};

/// ShortX short-form vertical video pipeline
#[derive(Parser, Debug)]
#[command(name = "shortx", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Ingest a long video and export top-scoring vertical clips
    Ingest(IngestArgs),
    /// Assemble a clip + narration + music + subtitles into a final short
    Montage(MontageArgs),
    /// Generate an SRT subtitle file for a clip
    Subtitles(SubtitlesArgs),
}
