//! SRT file model and formatting

use std::fs;
use std::io;
use std::path::Path;

/// One subtitle event. Indices are 1-based in the written file.
#[derive(Debug, Clone, PartialEq)]
pub struct SrtEvent {
    pub start: f64,
    pub end: f64,
    pub text: String,
}

/// Format seconds as an SRT timestamp (`HH:MM:SS,mmm`).
pub fn format_timestamp(seconds: f64) -> String {
    let hours = (seconds / 3600.0) as u32;
    let minutes = ((seconds % 3600.0) / 60.0) as u32;
    let secs = (seconds % 60.0) as u32;
    let millis = (((seconds % 1.0) * 1000.0).round() as u32).min(999);

    format!("{hours:02}:{minutes:02}:{secs:02},{millis:03}")
}

/// Write events as a UTF-8 SRT file.
pub fn write_events(path: &Path, events: &[SrtEvent]) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut body = String::new();
    for (i, event) in events.iter().enumerate() {
        body.push_str(&format!(
            "{}\n{} --> {}\n{}\n\n",
            i + 1,
            format_timestamp(event.start),
            format_timestamp(event.end),
            event.text
        ));
    }
    fs::write(path, body)
}

/// Count the events in an SRT file by its timing lines.
pub fn count_events(path: &Path) -> io::Result<usize> {
    let content = fs::read_to_string(path)?;
    Ok(content.lines().filter(|l| l.contains(" --> ")).count())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn timestamps_are_zero_padded() {
        assert_eq!(format_timestamp(0.0), "00:00:00,000");
        assert_eq!(format_timestamp(3.0), "00:00:03,000");
        assert_eq!(format_timestamp(61.5), "00:01:01,500");
        assert_eq!(format_timestamp(3661.042), "01:01:01,042");
    }

    #[test]
    fn written_file_round_trips_through_count() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("subs.srt");
        let events = vec![
            SrtEvent {
                start: 0.0,
                end: 3.0,
                text: "First".to_string(),
            },
            SrtEvent {
                start: 3.0,
                end: 6.0,
                text: "Second".to_string(),
            },
        ];

        write_events(&path, &events).unwrap();

        let body = fs::read_to_string(&path).unwrap();
        assert!(body.starts_with("1\n00:00:00,000 --> 00:00:03,000\nFirst\n"));
        assert_eq!(count_events(&path).unwrap(), 2);
    }
}
