//! Keyframe-format text files.
//!
//! ```text
//! # keyframe format v1
//! fps 0
//! 0
//! 120
//! 251
//! ```

/// Parse the keyframe indices of a keyframe-format file.
///
/// Header lines (`#...`, `fps...`), blank lines and anything that is not a
/// non-negative integer are skipped. Surrounding whitespace and a leading
/// `+` are accepted.
pub fn parse_keyframe_format(content: &str) -> Vec<usize> {
    content
        .lines()
        .filter(|line| !line.starts_with('#') && !line.starts_with("fps"))
        .filter_map(|line| line.trim().parse::<usize>().ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_indices_after_header() {
        let content = "# keyframe format v1\nfps 0\n0\n120\n251\n";
        assert_eq!(parse_keyframe_format(content), vec![0, 120, 251]);
    }

    #[test]
    fn skips_junk_lines() {
        let content = "fps 23.976\n\n0\nabc\n  \n48\r\n-5\n\u{fffd}12\n96\n# trailing comment";
        assert_eq!(parse_keyframe_format(content), vec![0, 48, 96]);
    }

    #[test]
    fn accepts_indented_and_signed_indices() {
        assert_eq!(parse_keyframe_format("fps 0\n 12\n+24\n\t36 \n"), vec![12, 24, 36]);
    }

    #[test]
    fn empty_file_has_no_keyframes() {
        assert!(parse_keyframe_format("").is_empty());
        assert!(parse_keyframe_format("# keyframe format v1\n").is_empty());
    }
}
