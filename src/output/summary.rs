//! Machine-readable run summaries

use std::path::PathBuf;

use serde::Serialize;

/// One exported clip in the ingest summary.
#[derive(Debug, Clone, Serialize)]
pub struct ClipSummary {
    pub filename: String,
    pub start_sec: f64,
    pub end_sec: f64,
    pub duration_sec: f64,
    pub score: f64,
    /// False when the external tool failed and a placeholder was written.
    pub rendered: bool,
}

/// JSON summary emitted by `shortx ingest --json`.
#[derive(Debug, Clone, Serialize)]
pub struct IngestSummary {
    pub input: PathBuf,
    pub output_dir: PathBuf,
    pub clips: Vec<ClipSummary>,
    pub elapsed_sec: f64,
}

/// Input half of the montage metadata record.
#[derive(Debug, Clone, Serialize)]
pub struct MontageInputs {
    pub clip: PathBuf,
    pub voice: Option<PathBuf>,
    pub music: Option<PathBuf>,
    pub srt: Option<PathBuf>,
    pub title: Option<String>,
    pub watermark: Option<PathBuf>,
}

/// Output half of the montage metadata record.
#[derive(Debug, Clone, Serialize)]
pub struct MontageOutput {
    pub path: PathBuf,
    pub duration_sec: f64,
    pub fps: u32,
    pub crf: u8,
    /// Probed container bit rate, e.g. `"2000k"`.
    pub bitrate: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct MontageAudio {
    pub target_lufs: f64,
    pub true_peak_db: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct MontageSubs {
    pub events: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct MontageTimings {
    pub elapsed_sec: f64,
    pub render_time: String,
}

/// Metadata record emitted by `shortx montage --json`.
#[derive(Debug, Clone, Serialize)]
pub struct MontageMetadata {
    #[serde(rename = "in")]
    pub inputs: MontageInputs,
    pub out: MontageOutput,
    pub audio: MontageAudio,
    pub subs: MontageSubs,
    pub timings: MontageTimings,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn montage_metadata_serializes_inputs_under_in_key() {
        let metadata = MontageMetadata {
            inputs: MontageInputs {
                clip: PathBuf::from("clip01.mp4"),
                voice: None,
                music: None,
                srt: None,
                title: Some("Hello".to_string()),
                watermark: None,
            },
            out: MontageOutput {
                path: PathBuf::from("final.mp4"),
                duration_sec: 30.0,
                fps: 30,
                crf: 20,
                bitrate: "2000k".to_string(),
            },
            audio: MontageAudio {
                target_lufs: -14.0,
                true_peak_db: -1.5,
            },
            subs: MontageSubs { events: 4 },
            timings: MontageTimings {
                elapsed_sec: 1.25,
                render_time: "2026-01-01 00:00:00".to_string(),
            },
        };

        let json: serde_json::Value = serde_json::to_value(&metadata).unwrap();
        assert_eq!(json["in"]["clip"], "clip01.mp4");
        assert_eq!(json["out"]["bitrate"], "2000k");
        assert_eq!(json["subs"]["events"], 4);
        assert_eq!(json["audio"]["target_lufs"], -14.0);
    }
}
