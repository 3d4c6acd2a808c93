//! SRT subtitle generation

pub mod generator;
pub mod srt;

pub use generator::{GenerateMode, SubtitleLayout};
pub use srt::SrtEvent;
