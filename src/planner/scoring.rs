//! Window scoring
//!
//! Placeholder heuristic: desirability is proportional to window duration
//! with a small uniform jitter so equal-length windows do not tie exactly.
//! TODO: replace with motion energy / color variance analysis of the frames
//! inside the window.

use std::path::Path;

use rand::rngs::ThreadRng;
use rand::Rng;

use crate::planner::Window;

/// Score per second of window duration.
pub const SCORE_PER_SECOND: f64 = 0.1;

/// Jitter bounds applied to every score.
pub const JITTER_MIN: f64 = 0.8;
pub const JITTER_MAX: f64 = 1.2;

/// Scores candidate windows. The RNG is injected so callers can pin the
/// jitter (seeded runs, tests); production uses the thread RNG.
pub struct WindowScorer<R: Rng> {
    rng: R,
}

impl WindowScorer<ThreadRng> {
    pub fn new() -> Self {
        Self {
            rng: rand::thread_rng(),
        }
    }
}

impl Default for WindowScorer<ThreadRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> WindowScorer<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    /// Score a single window. Depends only on the window itself, never on
    /// other windows; always non-negative.
    pub fn score(&mut self, _input: &Path, window: &Window) -> f64 {
        let base = SCORE_PER_SECOND * window.duration();
        let jitter = self.rng.gen_range(JITTER_MIN..=JITTER_MAX);
        base * jitter
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::path::Path;

    fn window(start: f64, end: f64) -> Window {
        Window {
            start,
            end,
            score: 0.0,
        }
    }

    #[test]
    fn score_stays_within_jitter_band() {
        let mut scorer = WindowScorer::with_rng(StdRng::seed_from_u64(7));
        let input = Path::new("video.mp4");
        for _ in 0..100 {
            let score = scorer.score(input, &window(0.0, 20.0));
            assert!(score >= SCORE_PER_SECOND * 20.0 * JITTER_MIN);
            assert!(score <= SCORE_PER_SECOND * 20.0 * JITTER_MAX);
        }
    }

    #[test]
    fn score_is_non_negative_for_degenerate_windows() {
        let mut scorer = WindowScorer::with_rng(StdRng::seed_from_u64(1));
        let score = scorer.score(Path::new("video.mp4"), &window(5.0, 5.0));
        assert_eq!(score, 0.0);
    }

    #[test]
    fn longer_windows_outscore_shorter_ones_beyond_jitter() {
        let mut scorer = WindowScorer::with_rng(StdRng::seed_from_u64(42));
        let input = Path::new("video.mp4");
        // 45s at minimum jitter still beats 12s at maximum jitter
        let long = scorer.score(input, &window(0.0, 45.0));
        let short = scorer.score(input, &window(0.0, 12.0));
        assert!(long > short);
    }

    #[test]
    fn seeded_scoring_is_reproducible() {
        let input = Path::new("video.mp4");
        let mut a = WindowScorer::with_rng(StdRng::seed_from_u64(99));
        let mut b = WindowScorer::with_rng(StdRng::seed_from_u64(99));
        for i in 0..10 {
            let w = window(i as f64, i as f64 + 15.0);
            assert_eq!(a.score(input, &w), b.score(input, &w));
        }
    }
}
