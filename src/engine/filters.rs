//! FFmpeg filter-graph builders
//!
//! String assembly for the vertical crop, subtitle burn-in, overlay, and
//! audio mixing filters. Everything here is pure; the montage and export
//! stages compose these into complete invocations.

use std::path::Path;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Target vertical frame.
pub const TARGET_WIDTH: u32 = 1080;
pub const TARGET_HEIGHT: u32 = 1920;

/// Scale to 1920 tall, then center-crop to 1080x1920.
/// TODO: subject-tracking crop instead of center crop.
pub const FILTER_VERTICAL: &str = "scale=-2:1920,crop=1080:1920";

/// Corner anchor for title and watermark overlays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OverlayPosition {
    BottomLeft,
    BottomRight,
    TopLeft,
    TopRight,
}

/// Subtitle burn-in styling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubtitleStyle {
    pub font_size: u32,
    pub margin_v: u32,
    pub outline: u32,
    pub font_name: Option<String>,
}

impl Default for SubtitleStyle {
    fn default() -> Self {
        Self {
            font_size: 36,
            margin_v: 64,
            outline: 2,
            font_name: None,
        }
    }
}

/// Sidechain ducking parameters (music compressed against narration).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DuckSettings {
    pub threshold_db: f64,
    pub ratio: f64,
    pub attack_secs: f64,
    pub release_secs: f64,
}

impl Default for DuckSettings {
    fn default() -> Self {
        Self {
            threshold_db: -20.0,
            ratio: 8.0,
            attack_secs: 0.02,
            release_secs: 0.30,
        }
    }
}

/// Vertical scale/crop with a constant-rate fps filter appended.
pub fn vertical_filter(fps: u32) -> String {
    format!("{FILTER_VERTICAL},fps={fps}")
}

/// Subtitle burn-in filter with ASS style overrides.
pub fn subtitle_burn_filter(srt_path: &Path, style: &SubtitleStyle) -> String {
    let mut force_style = format!(
        "FontSize={},PrimaryColour=&Hffffff,OutlineColour=&H000000,Outline={},MarginV={}",
        style.font_size, style.outline, style.margin_v
    );
    if let Some(font_name) = &style.font_name {
        force_style.push_str(&format!(",FontName={font_name}"));
    }
    format!(
        "subtitles={}:force_style='{}'",
        escape_filter_value(&srt_path.to_string_lossy()),
        force_style
    )
}

/// Lower-third title overlay, shown for the first 1.5 seconds.
pub fn title_overlay_filter(title: &str, position: OverlayPosition) -> String {
    let pos = match position {
        OverlayPosition::BottomLeft => "x=64:y=h-th-64",
        OverlayPosition::BottomRight => "x=w-tw-64:y=h-th-64",
        OverlayPosition::TopLeft => "x=64:y=64",
        OverlayPosition::TopRight => "x=w-tw-64:y=64",
    };
    format!(
        "drawtext=text='{}':fontsize=48:fontcolor=white:box=1:boxcolor=black@0.7:boxborderw=8:{}:enable='between(t,0,1.5)'",
        escape_filter_value(title),
        pos
    )
}

/// Watermark overlay chains: scale the logo to 10% size, then composite it
/// onto `video_label`, writing `out_label`.
pub fn watermark_overlay_chains(
    watermark_input: usize,
    video_label: &str,
    out_label: &str,
    position: OverlayPosition,
) -> Vec<String> {
    let pos = match position {
        OverlayPosition::BottomLeft => "x=24:y=H-h-24",
        OverlayPosition::BottomRight => "x=W-w-24:y=H-h-24",
        OverlayPosition::TopLeft => "x=24:y=24",
        OverlayPosition::TopRight => "x=W-w-24:y=24",
    };
    vec![
        format!("[{watermark_input}:v]scale=iw*0.1:ih*0.1[wm]"),
        format!("[{video_label}][wm]overlay={pos}[{out_label}]"),
    ]
}

/// Voice-first audio mix. Returns labeled filter chains ending in `[aout]`:
/// narration and music are gained independently, music is sidechain-ducked
/// against narration when both are present, and the final mix is loudness
/// normalized to `target_lufs` (fixed TP -1.5 dB and LRA 11 ceilings).
pub fn audio_mix_chains(
    voice_input: Option<usize>,
    music_input: Option<usize>,
    voice_gain_db: f64,
    music_gain_db: f64,
    duck: &DuckSettings,
    target_lufs: f64,
) -> Vec<String> {
    let mut chains = Vec::new();

    match (voice_input, music_input) {
        (Some(v), Some(m)) => {
            chains.push(format!("[{v}:a]volume={voice_gain_db}dB[voice]"));
            chains.push(format!("[{m}:a]volume={music_gain_db}dB[music]"));
            // sidechaincompress consumes its key input, so split the voice
            chains.push("[voice]asplit=2[voice_mix][voice_key]".to_string());
            chains.push(format!(
                "[music][voice_key]sidechaincompress=threshold={:.6}:ratio={}:attack={}:release={}[ducked]",
                db_to_linear(duck.threshold_db),
                duck.ratio,
                duck.attack_secs * 1000.0,
                duck.release_secs * 1000.0,
            ));
            chains.push(
                "[voice_mix][ducked]amix=inputs=2:duration=first:dropout_transition=2[mix]"
                    .to_string(),
            );
        }
        (Some(v), None) => {
            chains.push(format!("[{v}:a]volume={voice_gain_db}dB[mix]"));
        }
        (None, Some(m)) => {
            chains.push(format!("[{m}:a]volume={music_gain_db}dB[mix]"));
        }
        (None, None) => {
            // keep the clip's own track at unity gain
            chains.push("[0:a]volume=0dB[mix]".to_string());
        }
    }

    chains.push(format!("[mix]loudnorm=I={target_lufs}:TP=-1.5:LRA=11[aout]"));
    chains
}

/// Convert a decibel threshold to the linear amplitude ffmpeg expects.
fn db_to_linear(db: f64) -> f64 {
    10f64.powf(db / 20.0)
}

/// Escape characters that terminate or delimit filter arguments.
fn escape_filter_value(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('\'', "\\'")
        .replace(':', "\\:")
        .replace(',', "\\,")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn vertical_filter_scales_then_crops() {
        let filter = vertical_filter(30);
        assert_eq!(filter, "scale=-2:1920,crop=1080:1920,fps=30");
    }

    #[test]
    fn subtitle_filter_carries_style_overrides() {
        let style = SubtitleStyle {
            font_size: 40,
            margin_v: 80,
            outline: 3,
            font_name: Some("Inter".to_string()),
        };
        let filter = subtitle_burn_filter(Path::new("subs.srt"), &style);
        assert!(filter.starts_with("subtitles=subs.srt:force_style="));
        assert!(filter.contains("FontSize=40"));
        assert!(filter.contains("MarginV=80"));
        assert!(filter.contains("FontName=Inter"));
    }

    #[test]
    fn title_filter_escapes_quotes_and_positions() {
        let filter = title_overlay_filter("It's here", OverlayPosition::TopRight);
        assert!(filter.contains("text='It\\'s here'"));
        assert!(filter.contains("x=w-tw-64:y=64"));
    }

    #[test]
    fn ducked_mix_splits_voice_and_normalizes() {
        let chains =
            audio_mix_chains(Some(1), Some(2), -3.0, -10.0, &DuckSettings::default(), -14.0);
        let graph = chains.join(";");
        assert!(graph.contains("asplit"));
        assert!(graph.contains("sidechaincompress"));
        assert!(graph.contains("amix=inputs=2"));
        assert!(graph.ends_with("loudnorm=I=-14:TP=-1.5:LRA=11[aout]"));
    }

    #[test]
    fn threshold_is_converted_to_linear() {
        let chains = audio_mix_chains(
            Some(1),
            Some(2),
            0.0,
            -10.0,
            &DuckSettings::default(),
            -14.0,
        );
        let sidechain = chains.iter().find(|c| c.contains("sidechaincompress")).unwrap();
        // -20 dB == 0.1 linear
        assert!(sidechain.contains("threshold=0.100000"));
        assert!(sidechain.contains("attack=20"));
        assert!(sidechain.contains("release=300"));
    }

    #[test]
    fn solo_and_passthrough_mixes_skip_ducking() {
        let voice_only = audio_mix_chains(Some(1), None, 0.0, -10.0, &DuckSettings::default(), -14.0);
        assert_eq!(voice_only.len(), 2);
        assert!(voice_only[0].contains("[1:a]volume=0dB[mix]"));

        let neither = audio_mix_chains(None, None, 0.0, -10.0, &DuckSettings::default(), -14.0);
        assert!(neither[0].contains("[0:a]volume=0dB[mix]"));
    }
}
