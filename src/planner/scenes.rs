//! Scene splitting
//!
//! Real scene detection (histogram diffs, PySceneDetect-style content
//! analysis) is out of scope; the splitter partitions the probed duration
//! into fixed-width segments instead.

use crate::planner::Segment;

/// Default scene width in seconds.
pub const DEFAULT_SCENE_SECS: f64 = 30.0;

/// Partition `[0, duration)` into contiguous segments of `scene_secs` width.
/// The final segment is clamped to `duration`, so it may be shorter; an exact
/// multiple produces no trailing empty segment.
pub fn split_scenes(duration: f64, scene_secs: f64) -> Vec<Segment> {
    let mut segments = Vec::new();
    if duration <= 0.0 || scene_secs <= 0.0 {
        return segments;
    }

    let mut start = 0.0;
    while start < duration {
        let end = (start + scene_secs).min(duration);
        segments.push(Segment::new(start, end));
        start += scene_secs;
    }

    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_95s_into_30s_segments() {
        let segments = split_scenes(95.0, 30.0);
        assert_eq!(
            segments,
            vec![
                Segment::new(0.0, 30.0),
                Segment::new(30.0, 60.0),
                Segment::new(60.0, 90.0),
                Segment::new(90.0, 95.0),
            ]
        );
    }

    #[test]
    fn covers_duration_without_gaps_or_overlaps() {
        let segments = split_scenes(123.4, 30.0);
        assert!((segments[0].start - 0.0).abs() < f64::EPSILON);
        for pair in segments.windows(2) {
            assert_eq!(pair[0].end, pair[1].start);
        }
        assert_eq!(segments.last().unwrap().end, 123.4);
    }

    #[test]
    fn exact_multiple_has_no_empty_tail() {
        let segments = split_scenes(90.0, 30.0);
        assert_eq!(segments.len(), 3);
        assert_eq!(segments.last().unwrap().end, 90.0);
    }

    #[test]
    fn short_duration_yields_single_segment() {
        let segments = split_scenes(12.0, 30.0);
        assert_eq!(segments, vec![Segment::new(0.0, 12.0)]);
    }

    #[test]
    fn non_positive_duration_yields_nothing() {
        assert!(split_scenes(0.0, 30.0).is_empty());
        assert!(split_scenes(-5.0, 30.0).is_empty());
    }
}
