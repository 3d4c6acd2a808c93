//! External media tool boundary
//!
//! Argument assembly for ffmpeg plus the runner that invokes it. Stages in
//! this module never let a tool failure escape as a crash: the export and
//! montage stages convert failures into placeholder artifacts.

pub mod command;
pub mod export;
pub mod filters;
pub mod montage;

pub use command::{FfmpegCommand, ToolRunner, DEFAULT_TOOL_TIMEOUT_SECS};
