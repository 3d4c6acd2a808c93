//! Segment selection pipeline
//!
//! Scene splitting, candidate windowing, scoring, and top-k selection. The
//! stages are pure functions over `(start, end)` ranges so the whole plan can
//! be computed before any export work happens.

pub mod scenes;
pub mod scoring;
pub mod selector;
pub mod windows;

use std::path::Path;

use rand::Rng;
use serde::Serialize;

use crate::planner::scoring::WindowScorer;

/// A scene-level time range in seconds, produced contiguous and
/// non-overlapping by the scene splitter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Segment {
    pub start: f64,
    pub end: f64,
}

impl Segment {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

/// A candidate clip window. `score` is 0.0 at generation time and populated
/// by the scorer; start/end never change after generation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Window {
    pub start: f64,
    pub end: f64,
    pub score: f64,
}

impl Window {
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

/// Slice scenes into candidate windows, score them, and return the `top_k`
/// best windows with durations in `[min_s, max_s]`.
pub fn select_top_windows<R: Rng>(
    input: &Path,
    scenes: &[Segment],
    min_s: f64,
    max_s: f64,
    top_k: usize,
    scorer: &mut WindowScorer<R>,
) -> Vec<Window> {
    let candidates = windows::slice_into_windows(scenes, min_s, max_s);
    let scored: Vec<Window> = candidates
        .into_iter()
        .map(|w| Window {
            score: scorer.score(input, &w),
            ..w
        })
        .collect();
    selector::select_top_k(scored, top_k)
}
