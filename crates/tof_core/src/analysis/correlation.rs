//! Sliding-window keyframe overlap counting.
//!
//! Pure functions - no I/O, no side effects.

use std::ops::Range;

use crate::models::{AnalysisSection, KeyframeSignal};

use super::{shifts, SEARCH_RADIUS, SHIFT_COUNT};

/// Raw overlap counts for every candidate shift of one section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShiftScores {
    counts: [u32; SHIFT_COUNT],
}

impl ShiftScores {
    /// Wrap precomputed counts, indexed by `shift + SEARCH_RADIUS`.
    pub fn from_counts(counts: [u32; SHIFT_COUNT]) -> Self {
        Self { counts }
    }

    /// Count for a shift, `None` outside the search radius.
    pub fn count(&self, shift: i32) -> Option<u32> {
        shift_index(shift).map(|i| self.counts[i])
    }

    /// All counts, ascending by shift.
    pub fn counts(&self) -> &[u32] {
        &self.counts
    }

    /// `(shift, count)` pairs, ascending by shift.
    pub fn iter(&self) -> impl Iterator<Item = (i32, u32)> + '_ {
        shifts().zip(self.counts.iter().copied())
    }
}

/// Matching left and right frame ranges compared for one shift.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShiftWindows {
    pub left: Range<usize>,
    pub right: Range<usize>,
}

impl ShiftWindows {
    /// Number of frames compared.
    pub fn len(&self) -> usize {
        self.left.len()
    }

    pub fn is_empty(&self) -> bool {
        self.left.is_empty()
    }
}

/// Map a shift to its position in the score array.
fn shift_index(shift: i32) -> Option<usize> {
    if shift.abs() > SEARCH_RADIUS {
        return None;
    }
    Some((shift + SEARCH_RADIUS) as usize)
}

/// Compute the compared windows for one shift.
///
/// For a negative shift the right window starts at `start + shift` (clipped
/// at frame 0) and the left window is aligned to the section end. For a
/// non-negative shift the right window is clipped at `right_len` and the
/// left window is aligned to the section start. Both windows always have
/// the same length.
///
/// The section must lie within the left signal. Returns `None` when the
/// windows would be empty, which near array boundaries can happen for
/// sections not much longer than the search radius.
pub fn window_bounds(
    section: &AnalysisSection,
    shift: i32,
    right_len: usize,
) -> Option<ShiftWindows> {
    let start = section.start as i64;
    let end = section.end as i64;
    let shift = shift as i64;
    let right_len = right_len as i64;

    let (right_start, right_end) = if shift < 0 {
        ((start + shift).max(0), (end + shift).min(right_len))
    } else {
        (start + shift, (end + shift).min(right_len))
    };

    let window_len = right_end - right_start;
    if window_len <= 0 {
        return None;
    }

    let left_start = if shift < 0 { end - window_len } else { start };
    let left = left_start as usize..(left_start + window_len) as usize;
    let right = right_start as usize..right_end as usize;

    Some(ShiftWindows { left, right })
}

/// Count positions where both windows hold a keyframe.
fn overlap_count(left: &[bool], right: &[bool]) -> u32 {
    left.iter()
        .zip(right)
        .filter(|&(&l, &r)| l && r)
        .count() as u32
}

/// Score every candidate shift for one section.
///
/// The section must lie within `[0, min(left.len(), right.len()))`.
/// Shifts whose windows are empty score 0.
pub fn score_section(
    left: &KeyframeSignal,
    right: &KeyframeSignal,
    section: &AnalysisSection,
) -> ShiftScores {
    let left = left.as_slice();
    let right = right.as_slice();
    let mut counts = [0u32; SHIFT_COUNT];

    for (slot, shift) in counts.iter_mut().zip(shifts()) {
        let Some(windows) = window_bounds(section, shift, right.len()) else {
            continue;
        };
        match (left.get(windows.left.clone()), right.get(windows.right.clone())) {
            (Some(l), Some(r)) => *slot = overlap_count(l, r),
            _ => {
                tracing::debug!(
                    "Section {} shift {} window outside signal bounds, scoring 0",
                    section.index,
                    shift
                );
            }
        }
    }

    ShiftScores { counts }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(start: usize, end: usize) -> AnalysisSection {
        AnalysisSection {
            index: 0,
            start,
            end,
        }
    }

    fn signal_with(len: usize, keyframes: &[usize]) -> KeyframeSignal {
        KeyframeSignal::from_indices(len, keyframes).0
    }

    #[test]
    fn negative_shift_aligns_left_to_section_end() {
        let windows = window_bounds(&section(1000, 2000), -100, 5000).unwrap();
        assert_eq!(windows.right, 900..1900);
        assert_eq!(windows.left, 1000..2000);

        // Clipped at frame 0
        let windows = window_bounds(&section(0, 1000), -240, 5000).unwrap();
        assert_eq!(windows.right, 0..760);
        assert_eq!(windows.left, 240..1000);
    }

    #[test]
    fn positive_shift_clips_at_right_end() {
        let windows = window_bounds(&section(4000, 5000), 100, 5000).unwrap();
        assert_eq!(windows.right, 4100..5000);
        assert_eq!(windows.left, 4000..4900);

        let windows = window_bounds(&section(0, 1000), 0, 5000).unwrap();
        assert_eq!(windows.left, windows.right);
        assert_eq!(windows.len(), 1000);
    }

    #[test]
    fn windows_always_match_in_length() {
        let sec = section(100, 700);
        for shift in shifts() {
            if let Some(windows) = window_bounds(&sec, shift, 700) {
                assert_eq!(windows.left.len(), windows.right.len());
                assert!(windows.left.end <= 700);
                assert!(windows.right.end <= 700);
                assert!(!windows.is_empty());
            }
        }
    }

    #[test]
    fn tiny_section_yields_empty_windows() {
        // Section smaller than the search radius at the start of the signal
        let sec = section(0, 50);
        assert!(window_bounds(&sec, -100, 481).is_none());
        assert!(window_bounds(&sec, -50, 481).is_none());
        assert!(window_bounds(&sec, -49, 481).is_some());

        // Section at the end of the right signal
        let sec = section(431, 481);
        assert!(window_bounds(&sec, 50, 481).is_none());
        assert!(window_bounds(&sec, 240, 481).is_none());
    }

    #[test]
    fn scores_identical_signals_peak_at_zero() {
        let keyframes = [10, 200, 431, 700, 999];
        let left = signal_with(1200, &keyframes);
        let right = left.clone();

        let scores = score_section(&left, &right, &section(0, 1200));
        assert_eq!(scores.count(0), Some(5));
        let best = scores.iter().max_by_key(|&(_, c)| c).unwrap();
        assert_eq!(best, (0, 5));
    }

    #[test]
    fn scores_shifted_signal_at_shift() {
        let keyframes = [10, 200, 431, 700, 999];
        let shifted: Vec<usize> = keyframes.iter().map(|k| k + 37).collect();
        let left = signal_with(1200, &keyframes);
        let right = signal_with(1200, &shifted);

        let scores = score_section(&left, &right, &section(0, 1200));
        assert_eq!(scores.count(37), Some(5));
        assert_eq!(scores.count(0), Some(0));
        assert_eq!(scores.count(-37), Some(0));
    }

    #[test]
    fn scores_negative_shift() {
        let keyframes = [300, 520, 777, 1010];
        let shifted: Vec<usize> = keyframes.iter().map(|k| k - 120).collect();
        let left = signal_with(1200, &keyframes);
        let right = signal_with(1200, &shifted);

        let scores = score_section(&left, &right, &section(0, 1200));
        assert_eq!(scores.count(-120), Some(4));
    }

    #[test]
    fn short_section_at_lower_bound_does_not_panic() {
        let left = signal_with(481, &[0, 100, 480]);
        let right = signal_with(481, &[0, 100, 480]);

        let scores = score_section(&left, &right, &section(0, 481));
        assert_eq!(scores.counts().len(), SHIFT_COUNT);
        assert_eq!(scores.count(0), Some(3));
    }

    #[test]
    fn section_shorter_than_radius_does_not_panic() {
        let left = signal_with(600, &[560, 590]);
        let right = signal_with(600, &[560, 590]);

        let scores = score_section(&left, &right, &section(550, 600));
        assert_eq!(scores.count(0), Some(2));
        assert_eq!(scores.count(240), Some(0));
    }

    #[test]
    fn count_outside_radius_is_none() {
        let scores = ShiftScores::from_counts([0; SHIFT_COUNT]);
        assert_eq!(scores.count(241), None);
        assert_eq!(scores.count(-241), None);
        assert_eq!(scores.count(-240), Some(0));
    }
}
