//! Montage stage: assemble clip + narration + music + subtitles + overlays
//! into one social-ready vertical short via a single ffmpeg invocation.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::{info, warn};

use crate::engine::command::{FfmpegCommand, ToolRunner};
use crate::engine::filters::{self, DuckSettings, OverlayPosition, SubtitleStyle};
use crate::error::{ShortxError, ShortxResult};
use crate::output::placeholder;
use crate::output::summary::{
    MontageAudio, MontageInputs, MontageMetadata, MontageOutput, MontageSubs, MontageTimings,
};
use crate::probe::{DurationProbe, BITRATE_FALLBACK_KBPS, CLIP_FALLBACK_SECS};
use crate::subtitles::srt;

/// Render configuration for the montage stage.
#[derive(Debug, Clone)]
pub struct MontageSettings {
    pub fps: u32,
    pub crf: u8,
    pub preset: String,
    pub target_lufs: f64,
    pub voice_gain_db: f64,
    pub music_gain_db: f64,
    pub duck: DuckSettings,
    pub subtitle_style: SubtitleStyle,
    pub burn_subtitles: bool,
    pub title_position: OverlayPosition,
    pub watermark_position: OverlayPosition,
    pub ffmpeg_program: String,
    pub ffprobe_program: String,
}

impl Default for MontageSettings {
    fn default() -> Self {
        Self {
            fps: 30,
            crf: 20,
            preset: "veryfast".to_string(),
            target_lufs: -14.0,
            voice_gain_db: 0.0,
            music_gain_db: -10.0,
            duck: DuckSettings::default(),
            subtitle_style: SubtitleStyle::default(),
            burn_subtitles: true,
            title_position: OverlayPosition::BottomLeft,
            watermark_position: OverlayPosition::BottomRight,
            ffmpeg_program: "ffmpeg".to_string(),
            ffprobe_program: "ffprobe".to_string(),
        }
    }
}

/// One montage job: the base clip plus optional narration, music, subtitle,
/// title, and watermark inputs.
#[derive(Debug, Clone)]
pub struct MontageRequest {
    pub clip: PathBuf,
    pub out: PathBuf,
    pub voice: Option<PathBuf>,
    pub music: Option<PathBuf>,
    pub srt: Option<PathBuf>,
    pub title: Option<String>,
    pub watermark: Option<PathBuf>,
    pub force: bool,
    pub settings: MontageSettings,
}

/// What the stage did. Tool failure degrades to a placeholder file rather
/// than an error; only missing required inputs abort.
#[derive(Debug)]
pub enum MontageOutcome {
    /// Output rendered; metadata describes it.
    Rendered(Box<MontageMetadata>),
    /// Output already existed and `force` was not set; nothing touched.
    Skipped,
    /// ffmpeg unavailable or failed; a placeholder was written instead.
    Placeholder { error: String },
}

/// Run one montage job end to end.
pub async fn run_montage(request: &MontageRequest) -> ShortxResult<MontageOutcome> {
    let started = Instant::now();

    if !request.clip.exists() {
        return Err(ShortxError::InputFileNotFound {
            path: request.clip.display().to_string(),
        });
    }

    // Idempotency: a cheap existence check, never a partial re-render.
    if request.out.exists() && !request.force {
        info!(
            "Output file exists: {} (use --force to overwrite)",
            request.out.display()
        );
        return Ok(MontageOutcome::Skipped);
    }

    if let Some(parent) = request.out.parent() {
        fs::create_dir_all(parent)?;
    }

    let voice = present_optional(request.voice.as_deref(), "voice");
    let music = present_optional(request.music.as_deref(), "music");
    let srt_path = present_optional(request.srt.as_deref(), "subtitle");
    let watermark = present_optional(request.watermark.as_deref(), "watermark");

    let cmd = build_montage_command(request, voice, music, srt_path, watermark);
    let runner = ToolRunner::new(&request.settings.ffmpeg_program);

    match runner.run(&cmd.build_args()).await {
        Ok(()) => {
            let metadata = build_metadata(request, srt_path, started.elapsed().as_secs_f64()).await;
            Ok(MontageOutcome::Rendered(Box::new(metadata)))
        }
        Err(e) => {
            let message = e.to_string();
            warn!(
                "ffmpeg failed: {}. Creating placeholder composition file: {}",
                message,
                request.out.display()
            );
            placeholder::write_montage_placeholder(
                &request.out,
                &request.clip,
                voice,
                music,
                srt_path,
                request.title.as_deref(),
                watermark,
                &message,
            )?;
            Ok(MontageOutcome::Placeholder { error: message })
        }
    }
}

/// Optional inputs that do not exist on disk are treated as absent.
fn present_optional<'a>(path: Option<&'a Path>, role: &str) -> Option<&'a Path> {
    match path {
        Some(p) if p.exists() => Some(p),
        Some(p) => {
            warn!("{} file {} not found, ignoring", role, p.display());
            None
        }
        None => None,
    }
}

/// Assemble the single ffmpeg invocation: inputs in clip/voice/music/
/// watermark order, one filter_complex graph for video compositing and the
/// voice-first audio mix, then the encode settings.
fn build_montage_command(
    request: &MontageRequest,
    voice: Option<&Path>,
    music: Option<&Path>,
    srt_path: Option<&Path>,
    watermark: Option<&Path>,
) -> FfmpegCommand {
    let settings = &request.settings;

    let mut cmd = FfmpegCommand::new(&request.out);
    cmd.push_input(&request.clip);
    let voice_input = voice.map(|p| cmd.push_input(p));
    let music_input = music.map(|p| cmd.push_input(p));
    let watermark_input = watermark.map(|p| cmd.push_input(p));

    // Fixed compositing order: scale/crop, subtitles, title, watermark.
    let mut video_steps = vec![filters::FILTER_VERTICAL.to_string()];
    if let Some(srt) = srt_path {
        if settings.burn_subtitles {
            video_steps.push(filters::subtitle_burn_filter(srt, &settings.subtitle_style));
        }
    }
    if let Some(title) = &request.title {
        video_steps.push(filters::title_overlay_filter(title, settings.title_position));
    }

    let mut chains = Vec::new();
    if let Some(wm_input) = watermark_input {
        chains.push(format!("[0:v]{}[vbase]", video_steps.join(",")));
        chains.extend(filters::watermark_overlay_chains(
            wm_input,
            "vbase",
            "vout",
            settings.watermark_position,
        ));
    } else {
        chains.push(format!("[0:v]{}[vout]", video_steps.join(",")));
    }

    chains.extend(filters::audio_mix_chains(
        voice_input,
        music_input,
        settings.voice_gain_db,
        settings.music_gain_db,
        &settings.duck,
        settings.target_lufs,
    ));

    cmd.filter_complex(chains.join(";"))
        .map("[vout]")
        .map("[aout]")
        .video_codec("libx264")
        .preset(&settings.preset)
        .crf(settings.crf)
        .audio_codec("aac")
        .audio_bitrate("192k")
        .frame_rate(settings.fps)
        .pixel_format("yuv420p")
}

/// Describe the rendered output: real probed duration and bit rate and real
/// subtitle event count, not assumptions.
async fn build_metadata(
    request: &MontageRequest,
    srt_path: Option<&Path>,
    elapsed_sec: f64,
) -> MontageMetadata {
    let probe = DurationProbe::with_program(&request.settings.ffprobe_program);
    let duration_sec = probe
        .duration_seconds(&request.out, CLIP_FALLBACK_SECS)
        .await;
    let bit_rate_kbps = probe
        .bit_rate_kbps(&request.out, BITRATE_FALLBACK_KBPS)
        .await;

    let events = srt_path
        .map(|p| srt::count_events(p).unwrap_or(0))
        .unwrap_or(0);

    MontageMetadata {
        inputs: MontageInputs {
            clip: request.clip.clone(),
            voice: request.voice.clone(),
            music: request.music.clone(),
            srt: request.srt.clone(),
            title: request.title.clone(),
            watermark: request.watermark.clone(),
        },
        out: MontageOutput {
            path: request.out.clone(),
            duration_sec,
            fps: request.settings.fps,
            crf: request.settings.crf,
            bitrate: format!("{bit_rate_kbps}k"),
        },
        audio: MontageAudio {
            target_lufs: request.settings.target_lufs,
            true_peak_db: -1.5,
        },
        subs: MontageSubs { events },
        timings: MontageTimings {
            elapsed_sec,
            render_time: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(clip: &Path, out: &Path) -> MontageRequest {
        MontageRequest {
            clip: clip.to_path_buf(),
            out: out.to_path_buf(),
            voice: None,
            music: None,
            srt: None,
            title: None,
            watermark: None,
            force: false,
            settings: MontageSettings::default(),
        }
    }

    #[test]
    fn command_maps_video_and_mixed_audio() {
        let req = request(Path::new("clip01.mp4"), Path::new("final.mp4"));
        let cmd = build_montage_command(&req, None, None, None, None);
        let joined = cmd.build_args().join(" ");
        assert!(joined.contains("[0:v]scale=-2:1920,crop=1080:1920[vout]"));
        assert!(joined.contains("[0:a]volume=0dB[mix]"));
        assert!(joined.contains("-map [vout] -map [aout]"));
        assert!(joined.contains("-pix_fmt yuv420p"));
    }

    #[test]
    fn command_orders_inputs_clip_voice_music_watermark() {
        let mut req = request(Path::new("clip01.mp4"), Path::new("final.mp4"));
        req.title = Some("Hello".to_string());
        let cmd = build_montage_command(
            &req,
            Some(Path::new("voice.wav")),
            Some(Path::new("music.mp3")),
            None,
            Some(Path::new("logo.png")),
        );
        let args = cmd.build_args();
        let inputs: Vec<&String> = args
            .iter()
            .enumerate()
            .filter(|(i, _)| *i > 0 && args[i - 1] == "-i")
            .map(|(_, a)| a)
            .collect();
        assert_eq!(inputs, ["clip01.mp4", "voice.wav", "music.mp3", "logo.png"]);

        let joined = args.join(" ");
        // voice is input 1, music input 2, watermark input 3
        assert!(joined.contains("[1:a]volume=0dB[voice]"));
        assert!(joined.contains("[2:a]volume=-10dB[music]"));
        assert!(joined.contains("[3:v]scale=iw*0.1:ih*0.1[wm]"));
        assert!(joined.contains("drawtext"));
    }

    #[tokio::test]
    async fn missing_clip_is_a_fatal_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let req = request(&dir.path().join("nope.mp4"), &dir.path().join("out.mp4"));
        let err = run_montage(&req).await.unwrap_err();
        assert!(matches!(err, ShortxError::InputFileNotFound { .. }));
    }

    #[tokio::test]
    async fn existing_output_is_skipped_without_force() {
        let dir = tempfile::TempDir::new().unwrap();
        let clip = dir.path().join("clip.mp4");
        let out = dir.path().join("out.mp4");
        fs::write(&clip, b"clip").unwrap();
        fs::write(&out, b"already rendered").unwrap();

        let req = request(&clip, &out);
        let outcome = run_montage(&req).await.unwrap();
        assert!(matches!(outcome, MontageOutcome::Skipped));
        assert_eq!(fs::read(&out).unwrap(), b"already rendered");
    }

    #[tokio::test]
    async fn metadata_falls_back_to_declared_targets() {
        let mut req = request(Path::new("clip01.mp4"), Path::new("final.mp4"));
        req.settings.ffprobe_program = "ffprobe-definitely-not-installed".to_string();

        let metadata = build_metadata(&req, None, 1.25).await;
        assert_eq!(metadata.out.duration_sec, CLIP_FALLBACK_SECS);
        assert_eq!(metadata.out.bitrate, "2000k");
        assert_eq!(metadata.subs.events, 0);
    }

    #[tokio::test]
    async fn tool_failure_writes_placeholder() {
        let dir = tempfile::TempDir::new().unwrap();
        let clip = dir.path().join("clip.mp4");
        let out = dir.path().join("out.mp4");
        fs::write(&clip, b"clip").unwrap();

        let mut req = request(&clip, &out);
        req.settings.ffmpeg_program = "ffmpeg-definitely-not-installed".to_string();

        let outcome = run_montage(&req).await.unwrap();
        assert!(matches!(outcome, MontageOutcome::Placeholder { .. }));
        let body = fs::read_to_string(&out).unwrap();
        assert!(body.starts_with("# Placeholder composition file"));
    }
}
