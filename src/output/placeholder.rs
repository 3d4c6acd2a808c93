//! Placeholder artifact writers
//!
//! When the external media tool is unavailable or fails, the pipeline writes
//! a text file at the intended output path instead of crashing. The file
//! records what would have been rendered and the captured error, so callers
//! can tell it apart from a real render by content inspection.

use std::fs;
use std::io;
use std::path::Path;

use crate::planner::Window;

/// Placeholder for a single exported vertical clip.
pub fn write_clip_placeholder(
    path: &Path,
    source: &Path,
    window: &Window,
    error: &str,
) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let body = format!(
        "# Placeholder video file\n\
         # Original: {}\n\
         # Start: {}s, End: {}s, Duration: {}s\n\
         # Would be: 1080x1920 vertical video\n\
         # Error: {}\n",
        source.display(),
        window.start,
        window.end,
        window.duration(),
        error
    );
    fs::write(path, body)
}

/// Placeholder for a failed montage composition.
#[allow(clippy::too_many_arguments)]
pub fn write_montage_placeholder(
    path: &Path,
    clip: &Path,
    voice: Option<&Path>,
    music: Option<&Path>,
    srt: Option<&Path>,
    title: Option<&str>,
    watermark: Option<&Path>,
    error: &str,
) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let display_opt = |p: Option<&Path>| {
        p.map(|p| p.display().to_string())
            .unwrap_or_else(|| "None".to_string())
    };
    let body = format!(
        "# Placeholder composition file\n\
         # Input: {}\n\
         # Voice: {}\n\
         # Music: {}\n\
         # Subtitles: {}\n\
         # Title: {}\n\
         # Watermark: {}\n\
         # Would be: Final composed 9:16 video (1080x1920, H.264 + AAC)\n\
         # Error: {}\n",
        clip.display(),
        display_opt(voice),
        display_opt(music),
        display_opt(srt),
        title.unwrap_or("None"),
        display_opt(watermark),
        error
    );
    fs::write(path, body)
}
