use crate::error::{CoreError, Result};
use crate::lyrics::LyricLine;

/// Parsed LRC file: ID tags plus synced lines in ascending time order
#[derive(Debug, Clone, Default)]
pub struct LrcFile {
    pub metadata: LrcMetadata,
    pub lines: Vec<LyricLine>,
}

/// LRC metadata from ID tags
#[derive(Debug, Clone, Default)]
pub struct LrcMetadata {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub offset_ms: i64, // can be negative
}

impl LrcFile {
    /// Parse LRC text.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::LrcParseError`] when the input has no timestamped
    /// lines, since unsynced lyrics cannot drive the lyrics panel.
    pub fn parse(input: &str) -> Result<Self> {
        let mut metadata = LrcMetadata::default();
        let mut lines = Vec::new();

        for line in input.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            if let Some((tag, value)) = parse_id_tag(line) {
                match tag.to_lowercase().as_str() {
                    "ti" => metadata.title = Some(value),
                    "ar" => metadata.artist = Some(value),
                    "al" => metadata.album = Some(value),
                    "offset" => {
                        if let Ok(offset) = value.parse::<i64>() {
                            metadata.offset_ms = offset;
                        }
                    }
                    _ => {}
                }
                continue;
            }

            if let Some(parsed) = parse_lyric_line(line) {
                lines.extend(parsed);
            }
        }

        if lines.is_empty() {
            return Err(CoreError::LrcParseError {
                reason: "no timestamped lines".to_string(),
            });
        }

        if metadata.offset_ms != 0 {
            // A positive offset makes lyrics appear sooner
            #[allow(clippy::cast_precision_loss)]
            let shift = metadata.offset_ms as f64 / 1000.0;
            for line in &mut lines {
                line.time = (line.time - shift).max(0.0);
            }
        }

        // Multi-timestamp lines are emitted out of order
        lines.sort_by(|a, b| a.time.total_cmp(&b.time));

        Ok(Self { metadata, lines })
    }
}

/// Parse an ID tag like [ti:Title] or [ar:Artist]
fn parse_id_tag(line: &str) -> Option<(String, String)> {
    if !line.starts_with('[') {
        return None;
    }

    let end = line.find(']')?;
    let content = &line[1..end];
    let (tag, value) = content.split_once(':')?;

    // A numeric tag is a timestamp, not an ID tag
    if tag.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }

    Some((tag.to_string(), value.trim().to_string()))
}

/// Parse a lyric line like [00:12.34]Hello or [00:12.34][00:15.67]Same lyrics
fn parse_lyric_line(line: &str) -> Option<Vec<LyricLine>> {
    let mut remaining = line;
    let mut timestamps = Vec::new();

    while remaining.starts_with('[') {
        let Some(end) = remaining.find(']') else {
            break;
        };
        let Some(time) = parse_timestamp(&remaining[1..end]) else {
            break;
        };
        timestamps.push(time);
        remaining = &remaining[end + 1..];
    }

    if timestamps.is_empty() {
        return None;
    }

    let text = remaining.trim();
    Some(
        timestamps
            .into_iter()
            .map(|time| LyricLine::new(time, text))
            .collect(),
    )
}

/// Parse "mm:ss.xx", "mm:ss" or "mm:ss:xx" (hundredths) into seconds
fn parse_timestamp(s: &str) -> Option<f64> {
    let parts: Vec<&str> = s.trim().split(':').collect();

    match parts.as_slice() {
        [minutes, seconds] => {
            let minutes: u32 = minutes.parse().ok()?;
            let seconds: f64 = seconds.parse().ok()?;
            (seconds.is_finite() && seconds >= 0.0).then(|| f64::from(minutes).mul_add(60.0, seconds))
        }
        [minutes, seconds, hundredths] => {
            let minutes: u32 = minutes.parse().ok()?;
            let seconds: u32 = seconds.parse().ok()?;
            let hundredths: u32 = hundredths.parse().ok()?;
            Some(f64::from(minutes).mul_add(60.0, f64::from(seconds)) + f64::from(hundredths) / 100.0)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_time(actual: f64, expected: f64) {
        assert!((actual - expected).abs() < 1e-6, "expected {expected}, got {actual}");
    }

    #[test]
    fn test_parse_simple_lrc() {
        let result = LrcFile::parse("[00:12.34]Hello world").unwrap();
        assert_eq!(result.lines.len(), 1);
        assert_time(result.lines[0].time, 12.34);
        assert_eq!(result.lines[0].text, "Hello world");
    }

    #[test]
    fn test_parse_multiple_lines() {
        let input = r"
[00:05.00]First line
[00:10.00]Second line
[01:15.50]Third line
";
        let result = LrcFile::parse(input).unwrap();
        assert_eq!(result.lines.len(), 3);
        assert_eq!(result.lines[1].text, "Second line");
        assert_time(result.lines[2].time, 75.5);
    }

    #[test]
    fn test_parse_id_tags() {
        let input = r"
[ti:Song Title]
[ar:Artist Name]
[al:Album Name]
[00:05.00]Lyrics here
";
        let result = LrcFile::parse(input).unwrap();
        assert_eq!(result.metadata.title.as_deref(), Some("Song Title"));
        assert_eq!(result.metadata.artist.as_deref(), Some("Artist Name"));
        assert_eq!(result.metadata.album.as_deref(), Some("Album Name"));
    }

    #[test]
    fn test_parse_offset() {
        let input = "[offset:500]\n[00:10.00]Test";
        let result = LrcFile::parse(input).unwrap();
        assert_time(result.lines[0].time, 9.5);
    }

    #[test]
    fn test_parse_negative_offset() {
        let input = "[offset:-500]\n[00:10.00]Test";
        let result = LrcFile::parse(input).unwrap();
        assert_time(result.lines[0].time, 10.5);
    }

    #[test]
    fn test_offset_never_goes_negative() {
        let input = "[offset:2000]\n[00:01.00]Early";
        let result = LrcFile::parse(input).unwrap();
        assert_time(result.lines[0].time, 0.0);
    }

    #[test]
    fn test_parse_multi_timestamp_line_sorted() {
        let input = "[00:15.00][00:05.00]Chorus\n[00:10.00]Verse";
        let result = LrcFile::parse(input).unwrap();
        let texts: Vec<_> = result.lines.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec!["Chorus", "Verse", "Chorus"]);
        assert_time(result.lines[0].time, 5.0);
        assert_time(result.lines[2].time, 15.0);
    }

    #[test]
    fn test_alternative_timestamp_format() {
        let result = LrcFile::parse("[00:12:34]Hello world").unwrap();
        assert_time(result.lines[0].time, 12.34);
    }

    #[test]
    fn test_empty_text_line_kept() {
        // Instrumental breaks are timestamped lines with no text
        let result = LrcFile::parse("[00:01.00]Hi\n[00:04.00]").unwrap();
        assert_eq!(result.lines.len(), 2);
        assert_eq!(result.lines[1].text, "");
    }

    #[test]
    fn test_unsynced_input_rejected() {
        let err = LrcFile::parse("just some words\nno timestamps").unwrap_err();
        assert!(matches!(err, CoreError::LrcParseError { .. }));
    }
}
