//! Command implementations

use std::fs;
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

use crate::cli::args::{IngestArgs, MontageArgs, SubtitlesArgs};
use crate::config::RenderDefaults;
use crate::engine::export::{self, ExportConfig};
use crate::engine::filters::{DuckSettings, SubtitleStyle};
use crate::engine::montage::{self, MontageOutcome, MontageRequest, MontageSettings};
use crate::error::ShortxError;
use crate::output::summary::{ClipSummary, IngestSummary};
use crate::planner::scenes::{self, DEFAULT_SCENE_SECS};
use crate::planner::scoring::WindowScorer;
use crate::planner::{self, Window};
use crate::probe::{DurationProbe, CLIP_FALLBACK_SECS, VIDEO_FALLBACK_SECS};
use crate::subtitles::generator::{self, GenerateMode, SubtitleLayout};
use crate::subtitles::srt;

/// Execute the ingest command: probe, split, window, score, select, export.
pub async fn ingest(args: IngestArgs) -> Result<()> {
    let started = Instant::now();
    info!("Starting ingest operation");

    println!("Input: {}", args.input.display());
    println!("Output: {}", args.out.display());
    println!(
        "Duration: {}-{}s, top {} clips",
        args.min_s, args.max_s, args.top_k
    );

    if !args.input.exists() {
        return Err(ShortxError::InputFileNotFound {
            path: args.input.display().to_string(),
        }
        .into());
    }
    if args.min_s == 0 || args.min_s > args.max_s {
        return Err(ShortxError::InvalidArgument {
            message: format!(
                "clip duration bounds must satisfy 0 < min <= max (got {}-{})",
                args.min_s, args.max_s
            ),
        }
        .into());
    }

    fs::create_dir_all(&args.out).context("Failed to create output directory")?;

    println!("Detecting scenes...");
    let probe = DurationProbe::new();
    let duration = probe
        .duration_seconds(&args.input, VIDEO_FALLBACK_SECS)
        .await;
    let scene_list = scenes::split_scenes(duration, DEFAULT_SCENE_SECS);
    println!("Found {} scenes", scene_list.len());

    println!("Selecting top segments...");
    let windows = select_windows(&args, &scene_list);
    println!("Selected {} segments", windows.len());

    if args.dry_run {
        println!("Dry run - would create:");
        for (i, w) in windows.iter().enumerate() {
            println!(
                "  clip{:02}.mp4: {:.1}s-{:.1}s (score: {:.2})",
                i + 1,
                w.start,
                w.end,
                w.score
            );
        }
        return Ok(());
    }

    println!("Exporting vertical clips...");
    let exports =
        export::export_vertical_clips(&args.input, &windows, &args.out, &ExportConfig::default())
            .await?;

    let elapsed = started.elapsed().as_secs_f64();
    println!("Completed in {elapsed:.1}s");

    if args.json {
        let summary = IngestSummary {
            input: args.input.clone(),
            output_dir: args.out.clone(),
            clips: exports
                .iter()
                .map(|e| ClipSummary {
                    filename: e
                        .path
                        .file_name()
                        .map(|n| n.to_string_lossy().to_string())
                        .unwrap_or_default(),
                    start_sec: e.window.start,
                    end_sec: e.window.end,
                    duration_sec: e.window.duration(),
                    score: e.window.score,
                    rendered: e.rendered,
                })
                .collect(),
            elapsed_sec: elapsed,
        };
        println!("{}", serde_json::to_string_pretty(&summary)?);
    }

    info!("Ingest operation completed");
    Ok(())
}

/// Run the selection pipeline with either a seeded or a thread RNG.
fn select_windows(args: &IngestArgs, scene_list: &[planner::Segment]) -> Vec<Window> {
    let min_s = f64::from(args.min_s);
    let max_s = f64::from(args.max_s);
    match args.seed {
        Some(seed) => {
            let mut scorer = WindowScorer::with_rng(StdRng::seed_from_u64(seed));
            planner::select_top_windows(&args.input, scene_list, min_s, max_s, args.top_k, &mut scorer)
        }
        None => {
            let mut scorer = WindowScorer::new();
            planner::select_top_windows(&args.input, scene_list, min_s, max_s, args.top_k, &mut scorer)
        }
    }
}

/// Execute the montage command.
pub async fn montage(args: MontageArgs) -> Result<()> {
    info!("Starting montage operation");

    let defaults =
        RenderDefaults::load(args.config.as_deref()).context("Failed to load render defaults")?;

    let settings = MontageSettings {
        fps: args.fps.unwrap_or(defaults.fps),
        crf: args.crf.unwrap_or(defaults.crf),
        preset: args.preset.clone().unwrap_or(defaults.preset),
        target_lufs: args.target_lufs.unwrap_or(defaults.target_lufs),
        voice_gain_db: args.voice_gain.unwrap_or(defaults.voice_gain_db),
        music_gain_db: args.music_gain.unwrap_or(defaults.music_gain_db),
        duck: DuckSettings {
            threshold_db: args.duck_threshold.unwrap_or(defaults.duck_threshold_db),
            ratio: args.duck_ratio.unwrap_or(defaults.duck_ratio),
            attack_secs: args.duck_attack.unwrap_or(defaults.duck_attack_secs),
            release_secs: args.duck_release.unwrap_or(defaults.duck_release_secs),
        },
        subtitle_style: SubtitleStyle {
            font_size: args.sub_font_size.unwrap_or(defaults.sub_font_size),
            margin_v: args.sub_margin.unwrap_or(defaults.sub_margin),
            outline: args.sub_outline.unwrap_or(defaults.sub_outline),
            font_name: args
                .font
                .as_ref()
                .and_then(|p| p.file_stem())
                .map(|s| s.to_string_lossy().to_string()),
        },
        burn_subtitles: !args.no_burn,
        title_position: args.title_pos,
        watermark_position: args.wm_pos,
        ..MontageSettings::default()
    };

    if !args.quiet {
        println!("Assembling social-ready short...");
        println!("Input: {}", args.clip.display());
        println!("Output: {}", args.out.display());
        println!("Voice: {}", display_optional(args.voice.as_deref()));
        println!("Music: {}", display_optional(args.music.as_deref()));
        println!("Subtitles: {}", display_optional(args.srt.as_deref()));
        println!("Title: {}", args.title.as_deref().unwrap_or("None"));
        println!("Watermark: {}", display_optional(args.watermark.as_deref()));
    }

    let request = MontageRequest {
        clip: args.clip.clone(),
        out: args.out.clone(),
        voice: args.voice.clone(),
        music: args.music.clone(),
        srt: args.srt.clone(),
        title: args.title.clone(),
        watermark: args.watermark.clone(),
        force: args.force,
        settings,
    };

    if !args.quiet {
        println!("Composing final short...");
    }

    match montage::run_montage(&request).await? {
        MontageOutcome::Skipped => {
            if !args.quiet {
                println!(
                    "Output file exists: {} (use --force to overwrite)",
                    args.out.display()
                );
            }
        }
        MontageOutcome::Rendered(metadata) => {
            if !args.quiet {
                println!("Completed in {:.1}s", metadata.timings.elapsed_sec);
                println!("Output: {}", args.out.display());
            }
            if let Some(json_path) = &args.json {
                let json = serde_json::to_string_pretty(&metadata)?;
                if json_path == Path::new("-") {
                    println!("{json}");
                } else {
                    fs::write(json_path, json).context("Failed to write JSON metadata")?;
                    if !args.quiet {
                        println!("JSON metadata: {}", json_path.display());
                    }
                }
            }
        }
        MontageOutcome::Placeholder { .. } => {
            if !args.quiet {
                println!("Created placeholder: {}", args.out.display());
            }
        }
    }

    info!("Montage operation completed");
    Ok(())
}

/// Execute the subtitles command.
pub async fn subtitles(args: SubtitlesArgs) -> Result<()> {
    info!("Starting subtitles operation");

    if !args.clip.exists() {
        return Err(ShortxError::InputFileNotFound {
            path: args.clip.display().to_string(),
        }
        .into());
    }

    if args.srt.exists() && !args.force {
        println!(
            "Subtitle file exists: {} (use --force to overwrite)",
            args.srt.display()
        );
        return Ok(());
    }

    let layout = SubtitleLayout {
        max_chars: args.max_chars,
        max_lines: args.max_lines,
        min_duration_secs: args.min_dur,
    };

    match args.mode {
        GenerateMode::FromAudio => {
            generator::generate_from_audio(&args.clip, &args.srt, &args.whisper_model, "whisper")
                .await?;
        }
        GenerateMode::FromText => {
            let text = match (&args.text_file, &args.text) {
                (Some(file), _) => fs::read_to_string(file)
                    .with_context(|| format!("Failed to read text file {}", file.display()))?
                    .trim()
                    .to_string(),
                (None, Some(text)) => text.clone(),
                (None, None) => {
                    return Err(ShortxError::InvalidArgument {
                        message: "--text or --text-file is required for from-text mode".to_string(),
                    }
                    .into())
                }
            };

            let probe = DurationProbe::new();
            let duration = probe.duration_seconds(&args.clip, CLIP_FALLBACK_SECS).await;
            let events = generator::events_from_text(&text, duration, &layout);
            if events.is_empty() {
                return Err(ShortxError::InvalidArgument {
                    message: "supplied text contains no sentences".to_string(),
                }
                .into());
            }
            srt::write_events(&args.srt, &events)?;
            println!(
                "Wrote {} subtitle events to {}",
                events.len(),
                args.srt.display()
            );
        }
    }

    info!("Subtitles operation completed");
    Ok(())
}

fn display_optional(path: Option<&Path>) -> String {
    path.map(|p| p.display().to_string())
        .unwrap_or_else(|| "None".to_string())
}
