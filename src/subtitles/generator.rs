//! Subtitle generation: external transcription or timed text distribution

use std::path::Path;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::engine::command::ToolRunner;
use crate::error::ShortxResult;
use crate::subtitles::srt::{self, SrtEvent};

/// Span assumed for the placeholder event when transcription fails.
const PLACEHOLDER_SPAN_SECS: f64 = 30.0;

/// How subtitles are produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GenerateMode {
    /// Transcribe the clip's audio with the external transcription tool.
    FromAudio,
    /// Distribute supplied text evenly across the clip duration.
    FromText,
}

/// Text layout bounds for generated events.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubtitleLayout {
    pub max_chars: usize,
    pub max_lines: usize,
    pub min_duration_secs: f64,
}

impl Default for SubtitleLayout {
    fn default() -> Self {
        Self {
            max_chars: 84,
            max_lines: 2,
            min_duration_secs: 1.6,
        }
    }
}

/// Split `text` into sentences and divide `duration` evenly across them.
/// Timecodes are strictly increasing and non-overlapping; the last event's
/// end is clamped to `duration`. Empty fragments are discarded, so text with
/// no sentence content yields no events.
pub fn events_from_text(text: &str, duration: f64, layout: &SubtitleLayout) -> Vec<SrtEvent> {
    let sentences: Vec<&str> = text
        .split(['.', '!', '?'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();
    if sentences.is_empty() {
        return Vec::new();
    }

    let slot = duration / sentences.len() as f64;
    if slot < layout.min_duration_secs {
        warn!(
            "Average subtitle duration {:.2}s is below the {:.2}s minimum; text may be hard to read",
            slot, layout.min_duration_secs
        );
    }

    sentences
        .iter()
        .enumerate()
        .map(|(i, sentence)| SrtEvent {
            start: i as f64 * slot,
            end: ((i + 1) as f64 * slot).min(duration),
            text: wrap_text(sentence, layout),
        })
        .collect()
}

/// Greedy word wrap to at most `max_lines` lines of `max_chars`; overflow
/// words stay on the final line rather than being dropped.
fn wrap_text(text: &str, layout: &SubtitleLayout) -> String {
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let candidate_len = if current.is_empty() {
            word.len()
        } else {
            current.len() + 1 + word.len()
        };
        if candidate_len > layout.max_chars
            && !current.is_empty()
            && lines.len() + 1 < layout.max_lines
        {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }

    lines.join("\n")
}

/// Transcribe the clip with the external transcription tool, writing an SRT
/// next to `srt_path`'s stem. On any failure a single placeholder event
/// covering an assumed 30-second span is written instead.
pub async fn generate_from_audio(
    clip_path: &Path,
    srt_path: &Path,
    model: &str,
    program: &str,
) -> ShortxResult<bool> {
    let runner = ToolRunner::new(program);

    let mut args = vec![clip_path.to_string_lossy().to_string()];
    args.extend(["--model".to_string(), model.to_string()]);
    args.extend(["--output_format".to_string(), "srt".to_string()]);
    if let Some(parent) = srt_path.parent() {
        args.extend([
            "--output_dir".to_string(),
            parent.to_string_lossy().to_string(),
        ]);
    }
    if let Some(stem) = srt_path.file_stem() {
        args.extend([
            "--output_name".to_string(),
            stem.to_string_lossy().to_string(),
        ]);
    }

    match runner.run(&args).await {
        Ok(()) => {
            info!("Transcribed {} to {}", clip_path.display(), srt_path.display());
            Ok(true)
        }
        Err(e) => {
            warn!(
                "{} not available ({}), creating placeholder subtitles",
                program, e
            );
            write_placeholder(srt_path)?;
            Ok(false)
        }
    }
}

/// Single-event placeholder SRT.
pub fn write_placeholder(srt_path: &Path) -> ShortxResult<()> {
    debug!("Writing placeholder SRT: {}", srt_path.display());
    srt::write_events(
        srt_path,
        &[SrtEvent {
            start: 0.0,
            end: PLACEHOLDER_SPAN_SECS,
            text: "Audio transcription placeholder".to_string(),
        }],
    )?;
    Ok(())
}
