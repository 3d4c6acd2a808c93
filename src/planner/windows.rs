//! Candidate window generation

use crate::planner::{Segment, Window};

/// Slice each segment into overlapping candidate windows with durations in
/// `[min_s, max_s]`. Neighbouring windows within a segment overlap by 50%
/// (stride = half the minimum duration). Output order is generation order:
/// segment order, then increasing start time. That order is the tie-break
/// for the later stable sort.
pub fn slice_into_windows(scenes: &[Segment], min_s: f64, max_s: f64) -> Vec<Window> {
    let mut out = Vec::new();

    for segment in scenes {
        if segment.duration() <= 0.0 {
            continue;
        }

        // 50% overlap; a stride of zero would never advance the cursor
        let mut stride = (min_s / 2.0).floor();
        if stride <= 0.0 {
            stride = 1.0;
        }

        let mut cursor = segment.start;
        while cursor + min_s <= segment.end {
            let window_end = (cursor + max_s).min(segment.end);
            if window_end - cursor >= min_s {
                out.push(Window {
                    start: cursor,
                    end: window_end,
                    score: 0.0,
                });
            }
            cursor += stride;
        }
    }

    out
}
