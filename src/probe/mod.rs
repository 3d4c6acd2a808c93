//! Media duration probing
//!
//! Thin wrapper around ffprobe. Probing is best-effort: any failure (tool
//! missing, non-zero exit, unparseable output) falls back to a caller-chosen
//! duration with a warning, so the pipeline keeps working on machines
//! without ffprobe installed.

use std::path::Path;
use std::process::Stdio;

use tokio::process::Command;
use tracing::{debug, warn};

use crate::error::{ShortxError, ShortxResult};

/// Fallback duration when probing a full source video fails.
pub const VIDEO_FALLBACK_SECS: f64 = 600.0;

/// Fallback duration when probing a single exported clip fails.
pub const CLIP_FALLBACK_SECS: f64 = 30.0;

/// Fallback bit rate when probing a rendered output fails.
pub const BITRATE_FALLBACK_KBPS: u64 = 2000;

/// Container duration probe backed by an external tool.
#[derive(Debug, Clone)]
pub struct DurationProbe {
    program: String,
}

impl DurationProbe {
    pub fn new() -> Self {
        Self {
            program: "ffprobe".to_string(),
        }
    }

    /// Use a different probe executable (tests point this at a missing
    /// program to exercise the fallback path).
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Probe the container duration in seconds, falling back to
    /// `fallback_secs` on any failure.
    pub async fn duration_seconds(&self, path: &Path, fallback_secs: f64) -> f64 {
        match self.try_probe(path).await {
            Ok(duration) => {
                debug!("Probed {}: {:.3}s", path.display(), duration);
                duration
            }
            Err(e) => {
                warn!(
                    "Could not probe duration of {}, assuming {:.0} seconds: {}",
                    path.display(),
                    fallback_secs,
                    e
                );
                fallback_secs
            }
        }
    }

    /// Probe the container bit rate in kilobits per second, falling back to
    /// `fallback_kbps` on any failure.
    pub async fn bit_rate_kbps(&self, path: &Path, fallback_kbps: u64) -> u64 {
        match self.try_probe_bit_rate(path).await {
            Ok(kbps) => {
                debug!("Probed {}: {}k", path.display(), kbps);
                kbps
            }
            Err(e) => {
                warn!(
                    "Could not probe bit rate of {}, assuming {}k: {}",
                    path.display(),
                    fallback_kbps,
                    e
                );
                fallback_kbps
            }
        }
    }

    async fn try_probe(&self, path: &Path) -> ShortxResult<f64> {
        let raw = self.probe_format_entry(path, "duration").await?;
        raw.parse::<f64>().map_err(|_| ShortxError::ProbeError {
            message: format!("unparseable duration output: {raw:?}"),
        })
    }

    async fn try_probe_bit_rate(&self, path: &Path) -> ShortxResult<u64> {
        let raw = self.probe_format_entry(path, "bit_rate").await?;
        raw.parse::<u64>()
            .map(|bps| bps / 1000)
            .map_err(|_| ShortxError::ProbeError {
                message: format!("unparseable bit rate output: {raw:?}"),
            })
    }

    /// Run ffprobe for a single `format=` entry and return its trimmed value.
    async fn probe_format_entry(&self, path: &Path, entry: &str) -> ShortxResult<String> {
        which::which(&self.program).map_err(|_| ShortxError::ToolMissing {
            tool: self.program.clone(),
        })?;

        let output = Command::new(&self.program)
            .args(["-v", "error", "-show_entries"])
            .arg(format!("format={entry}"))
            .args(["-of", "default=noprint_wrappers=1:nokey=1"])
            .arg(path)
            .stdin(Stdio::null())
            .output()
            .await?;

        if !output.status.success() {
            return Err(ShortxError::ToolFailed {
                tool: self.program.clone(),
                exit_code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

impl Default for DurationProbe {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_probe_tool_falls_back() {
        let probe = DurationProbe::with_program("ffprobe-definitely-not-installed");
        let duration = probe
            .duration_seconds(Path::new("video.mp4"), VIDEO_FALLBACK_SECS)
            .await;
        assert_eq!(duration, VIDEO_FALLBACK_SECS);
    }

    #[tokio::test]
    async fn missing_probe_tool_falls_back_for_bit_rate() {
        let probe = DurationProbe::with_program("ffprobe-definitely-not-installed");
        let kbps = probe
            .bit_rate_kbps(Path::new("final.mp4"), BITRATE_FALLBACK_KBPS)
            .await;
        assert_eq!(kbps, BITRATE_FALLBACK_KBPS);
    }

    #[tokio::test]
    async fn fallback_is_per_call_site() {
        let probe = DurationProbe::with_program("ffprobe-definitely-not-installed");
        let duration = probe
            .duration_seconds(Path::new("clip01.mp4"), CLIP_FALLBACK_SECS)
            .await;
        assert_eq!(duration, CLIP_FALLBACK_SECS);
    }
}
