//! ShortX CLI Library
//!
//! A command-line pipeline for short-form vertical video production:
//! candidate segment selection and 9:16 clip export, montage assembly with
//! voice-first audio mixing, and SRT subtitle generation. All media work is
//! delegated to external tools (ffmpeg, ffprobe, whisper); this crate builds
//! the invocations and degrades to placeholder artifacts when a tool is
//! unavailable.

pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod output;
pub mod planner;
pub mod probe;
pub mod subtitles;

// Re-export commonly used types
pub use engine::export::{ClipExport, ExportConfig};
pub use engine::montage::{MontageOutcome, MontageRequest, MontageSettings};
pub use error::{ShortxError, ShortxResult};
pub use planner::{Segment, Window};
