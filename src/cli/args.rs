//! Command-line argument definitions

use std::path::PathBuf;

use clap::Args;

use crate::engine::filters::OverlayPosition;
use crate::subtitles::GenerateMode;

/// Arguments for the ingest command
#[derive(Args, Debug)]
pub struct IngestArgs {
    /// Input video file
    #[arg(long)]
    pub input: PathBuf,

    /// Output directory for exported clips
    #[arg(long)]
    pub out: PathBuf,

    /// Minimum clip duration (seconds)
    #[arg(long = "min", default_value_t = 12)]
    pub min_s: u32,

    /// Maximum clip duration (seconds)
    #[arg(long = "max", default_value_t = 45)]
    pub max_s: u32,

    /// Number of top clips to select
    #[arg(long = "top", default_value_t = 10)]
    pub top_k: usize,

    /// Fix the scoring jitter seed for reproducible selection
    #[arg(long)]
    pub seed: Option<u64>,

    /// Show what would be created without exporting
    #[arg(long)]
    pub dry_run: bool,

    /// Print a machine-readable JSON summary
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the montage command
#[derive(Args, Debug)]
pub struct MontageArgs {
    /// Base vertical video clip
    #[arg(long)]
    pub clip: PathBuf,

    /// Output final video path
    #[arg(long)]
    pub out: PathBuf,

    /// Narration audio (wav)
    #[arg(long)]
    pub voice: Option<PathBuf>,

    /// Background music track
    #[arg(long)]
    pub music: Option<PathBuf>,

    /// Subtitles to burn in (UTF-8 SRT)
    #[arg(long)]
    pub srt: Option<PathBuf>,

    /// On-screen title (lower-third)
    #[arg(long)]
    pub title: Option<String>,

    /// Watermark logo (PNG)
    #[arg(long)]
    pub watermark: Option<PathBuf>,

    /// Output frame rate (default: 30)
    #[arg(long)]
    pub fps: Option<u32>,

    /// H.264 CRF quality (default: 20)
    #[arg(long)]
    pub crf: Option<u8>,

    /// H.264 preset (default: veryfast)
    #[arg(long)]
    pub preset: Option<String>,

    /// Target loudness in LUFS (default: -14.0)
    #[arg(long)]
    pub target_lufs: Option<f64>,

    /// Voice gain in dB (default: 0.0)
    #[arg(long)]
    pub voice_gain: Option<f64>,

    /// Music gain in dB (default: -10.0)
    #[arg(long)]
    pub music_gain: Option<f64>,

    /// Ducking threshold in dB (default: -20.0)
    #[arg(long)]
    pub duck_threshold: Option<f64>,

    /// Ducking ratio (default: 8.0)
    #[arg(long)]
    pub duck_ratio: Option<f64>,

    /// Ducking attack time in seconds (default: 0.02)
    #[arg(long)]
    pub duck_attack: Option<f64>,

    /// Ducking release time in seconds (default: 0.30)
    #[arg(long)]
    pub duck_release: Option<f64>,

    /// Subtitle font size (default: 36)
    #[arg(long)]
    pub sub_font_size: Option<u32>,

    /// Subtitle vertical margin in pixels (default: 64)
    #[arg(long)]
    pub sub_margin: Option<u32>,

    /// Subtitle outline width (default: 2)
    #[arg(long)]
    pub sub_outline: Option<u32>,

    /// Do not burn subtitles into the video
    #[arg(long)]
    pub no_burn: bool,

    /// Font file; its stem overrides the subtitle font name
    #[arg(long)]
    pub font: Option<PathBuf>,

    /// Title position
    #[arg(long, value_enum, default_value_t = OverlayPosition::BottomLeft)]
    pub title_pos: OverlayPosition,

    /// Watermark position
    #[arg(long = "wm-pos", value_enum, default_value_t = OverlayPosition::BottomRight)]
    pub wm_pos: OverlayPosition,

    /// Write JSON metadata to a file ("-" for stdout)
    #[arg(long)]
    pub json: Option<PathBuf>,

    /// TOML file overriding the render defaults
    #[arg(long, env = "SHORTX_CONFIG")]
    pub config: Option<PathBuf>,

    /// Overwrite an existing output file
    #[arg(long)]
    pub force: bool,

    /// Minimal output (warnings and errors only)
    #[arg(long)]
    pub quiet: bool,
}

/// Arguments for the subtitles command
#[derive(Args, Debug)]
pub struct SubtitlesArgs {
    /// Input video clip
    #[arg(long)]
    pub clip: PathBuf,

    /// Output SRT file
    #[arg(long)]
    pub srt: PathBuf,

    /// Generation mode
    #[arg(long, value_enum)]
    pub mode: GenerateMode,

    /// Text content for from-text mode
    #[arg(long)]
    pub text: Option<String>,

    /// Text file for from-text mode
    #[arg(long)]
    pub text_file: Option<PathBuf>,

    /// Whisper model for from-audio mode
    #[arg(long, default_value = "small")]
    pub whisper_model: String,

    /// Maximum characters per line
    #[arg(long, default_value_t = 84)]
    pub max_chars: usize,

    /// Maximum lines per subtitle
    #[arg(long, default_value_t = 2)]
    pub max_lines: usize,

    /// Minimum subtitle duration (seconds)
    #[arg(long = "min-dur", default_value_t = 1.6)]
    pub min_dur: f64,

    /// Overwrite an existing SRT file
    #[arg(long)]
    pub force: bool,
}
