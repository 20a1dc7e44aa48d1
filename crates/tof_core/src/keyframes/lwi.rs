//! L-SMASH Works index caches (`.lwi`).
//!
//! Each video frame entry carries a `Key=` field on its own line; only those
//! lines matter here.

use crate::models::KeyframeSignal;

use super::types::{KeyframeError, KeyframeResult};

const KEY_PREFIX: &str = "Key=";

/// Parse per-frame keyframe markers from an index cache.
///
/// One marker per `Key=` line, in file order. The digit after `Key=` is the
/// flag (non-zero means keyframe).
pub fn parse_lwi(content: &str) -> KeyframeResult<KeyframeSignal> {
    content
        .lines()
        .enumerate()
        .filter_map(|(number, line)| {
            line.strip_prefix(KEY_PREFIX)
                .map(|value| (number + 1, value))
        })
        .map(|(line, value)| {
            value
                .chars()
                .next()
                .and_then(|c| c.to_digit(10))
                .map(|digit| digit != 0)
                .ok_or_else(|| KeyframeError::MalformedIndex {
                    line,
                    message: format!("expected a digit after '{}', got '{}'", KEY_PREFIX, value),
                })
        })
        .collect::<KeyframeResult<Vec<bool>>>()
        .map(KeyframeSignal::new)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "<LSMASHWorksIndexVersion=0.0.3.0>\n\
        <LibavReaderIndexFile=14>\n\
        Index=0,POS=0,PTS=0,DTS=-2,EDI=0\n\
        Key=1,Pic=1,POC=0,Repeat=1,Field=0\n\
        Index=0,POS=1200,PTS=1,DTS=-1,EDI=0\n\
        Key=0,Pic=3,POC=4,Repeat=1,Field=0\n\
        Index=0,POS=2400,PTS=2,DTS=0,EDI=0\n\
        Key=0,Pic=3,POC=2,Repeat=1,Field=0\n\
        Index=0,POS=3600,PTS=3,DTS=1,EDI=0\n\
        Key=1,Pic=1,POC=0,Repeat=1,Field=0\n";

    #[test]
    fn parses_key_lines_in_order() {
        let signal = parse_lwi(SAMPLE).unwrap();
        assert_eq!(signal.as_slice(), &[true, false, false, true]);
    }

    #[test]
    fn ignores_other_lines() {
        let signal = parse_lwi("<LSMASHWorksIndexVersion=0.0.3.0>\nKeyframes=2\nfoo\n").unwrap();
        assert!(signal.is_empty());
    }

    #[test]
    fn rejects_non_digit_flag() {
        let err = parse_lwi("Key=1\nKey=x\n").unwrap_err();
        assert!(matches!(err, KeyframeError::MalformedIndex { line: 2, .. }));
    }
}
