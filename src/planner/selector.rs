//! Top-k window selection

use crate::planner::Window;

/// Rank scored windows by descending score and keep the first `top_k`. The
/// sort is stable, so equal scores keep their generation order. `top_k` of
/// zero yields an empty result; fewer candidates than `top_k` yields all of
/// them.
pub fn select_top_k(mut windows: Vec<Window>, top_k: usize) -> Vec<Window> {
    windows.sort_by(|a, b| b.score.total_cmp(&a.score));
    windows.truncate(top_k);
    windows
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window(start: f64, end: f64, score: f64) -> Window {
        Window { start, end, score }
    }

    #[test]
    fn returns_highest_scores_in_descending_order() {
        let windows = vec![
            window(0.0, 20.0, 1.5),
            window(10.0, 30.0, 3.0),
            window(20.0, 40.0, 2.2),
            window(30.0, 50.0, 0.4),
        ];
        let selected = select_top_k(windows, 2);
        assert_eq!(selected.len(), 2);
        assert_eq!(selected[0].score, 3.0);
        assert_eq!(selected[1].score, 2.2);
    }

    #[test]
    fn cardinality_is_min_of_top_k_and_candidates() {
        let windows = vec![window(0.0, 20.0, 1.0), window(10.0, 30.0, 2.0)];
        assert_eq!(select_top_k(windows.clone(), 10).len(), 2);
        assert_eq!(select_top_k(windows, 0).len(), 0);
    }

    #[test]
    fn scores_are_non_increasing() {
        let windows: Vec<Window> = (0..20)
            .map(|i| window(i as f64, i as f64 + 10.0, ((i * 7) % 13) as f64))
            .collect();
        let selected = select_top_k(windows, 20);
        for pair in selected.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }

    #[test]
    fn equal_scores_keep_generation_order() {
        let windows = vec![
            window(0.0, 20.0, 1.0),
            window(10.0, 30.0, 1.0),
            window(20.0, 40.0, 1.0),
        ];
        let selected = select_top_k(windows, 3);
        assert_eq!(selected[0].start, 0.0);
        assert_eq!(selected[1].start, 10.0);
        assert_eq!(selected[2].start, 20.0);
    }
}
