//! Export stage: materialize selected windows as vertical clips

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{info, warn};

use crate::engine::command::{FfmpegCommand, ToolRunner};
use crate::engine::filters;
use crate::error::ShortxResult;
use crate::output::placeholder;
use crate::planner::Window;

/// Encoder settings for exported clips.
#[derive(Debug, Clone)]
pub struct ExportConfig {
    pub fps: u32,
    pub crf: u8,
    pub preset: String,
    /// ffmpeg executable; overridable so tests can force the fallback path.
    pub ffmpeg_program: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            fps: 30,
            crf: 20,
            preset: "veryfast".to_string(),
            ffmpeg_program: "ffmpeg".to_string(),
        }
    }
}

/// Outcome of one clip export. A failed render still produces a file (the
/// placeholder), so the batch result is a plain list rather than a Result
/// per clip.
#[derive(Debug, Clone, Serialize)]
pub struct ClipExport {
    pub path: PathBuf,
    pub window: Window,
    pub rendered: bool,
    pub error: Option<String>,
}

/// Export each selected window as a 9:16 clip under `out_dir`, named
/// `clip01.mp4`, `clip02.mp4`, ... in selection order. Tool failures are
/// absorbed per clip: a placeholder is written and the batch continues.
pub async fn export_vertical_clips(
    input: &Path,
    windows: &[Window],
    out_dir: &Path,
    config: &ExportConfig,
) -> ShortxResult<Vec<ClipExport>> {
    fs::create_dir_all(out_dir)?;

    let runner = ToolRunner::new(&config.ffmpeg_program);
    let mut exports = Vec::with_capacity(windows.len());

    for (idx, window) in windows.iter().enumerate() {
        let out_path = out_dir.join(format!("clip{:02}.mp4", idx + 1));
        let cmd = build_clip_command(input, &out_path, window, config);

        match runner.run(&cmd.build_args()).await {
            Ok(()) => {
                info!(
                    "Exported {} ({:.1}s-{:.1}s)",
                    out_path.display(),
                    window.start,
                    window.end
                );
                exports.push(ClipExport {
                    path: out_path,
                    window: *window,
                    rendered: true,
                    error: None,
                });
            }
            Err(e) => {
                let message = e.to_string();
                warn!(
                    "ffmpeg failed for clip {}: {}. Creating placeholder file: {}",
                    idx + 1,
                    message,
                    out_path.display()
                );
                placeholder::write_clip_placeholder(&out_path, input, window, &message)?;
                exports.push(ClipExport {
                    path: out_path,
                    window: *window,
                    rendered: false,
                    error: Some(message),
                });
            }
        }
    }

    Ok(exports)
}

/// Build the ffmpeg invocation for one vertical clip.
fn build_clip_command(
    input: &Path,
    out_path: &Path,
    window: &Window,
    config: &ExportConfig,
) -> FfmpegCommand {
    let duration = (window.end - window.start).max(0.1);

    FfmpegCommand::new(out_path)
        .seek(window.start)
        .read_duration(duration)
        .input(input)
        .video_filter(filters::vertical_filter(config.fps))
        .video_codec("libx264")
        .preset(&config.preset)
        .crf(config.crf)
        .audio_codec("aac")
        .audio_bitrate("192k")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clip_command_seeks_crops_and_encodes() {
        let window = Window {
            start: 12.0,
            end: 42.0,
            score: 1.0,
        };
        let cmd = build_clip_command(
            Path::new("in.mp4"),
            Path::new("clip01.mp4"),
            &window,
            &ExportConfig::default(),
        );
        let args = cmd.build_args();
        let joined = args.join(" ");
        assert!(joined.contains("-ss 12.000"));
        assert!(joined.contains("-t 30.000"));
        assert!(joined.contains("scale=-2:1920,crop=1080:1920,fps=30"));
        assert!(joined.contains("-c:v libx264"));
        assert!(joined.contains("-b:a 192k"));
    }

    #[test]
    fn degenerate_window_still_reads_a_sliver() {
        let window = Window {
            start: 5.0,
            end: 5.0,
            score: 0.0,
        };
        let cmd = build_clip_command(
            Path::new("in.mp4"),
            Path::new("clip01.mp4"),
            &window,
            &ExportConfig::default(),
        );
        assert!(cmd.build_args().join(" ").contains("-t 0.100"));
    }
}
