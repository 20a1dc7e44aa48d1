//! Keyframe signal types.

use serde::{Deserialize, Serialize};

/// Dense per-frame keyframe markers over `[0, len)`.
///
/// `true` at index `i` marks frame `i` as a keyframe. Built once from a
/// loader's output and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyframeSignal {
    markers: Vec<bool>,
}

impl KeyframeSignal {
    /// Wrap per-frame markers.
    pub fn new(markers: Vec<bool>) -> Self {
        Self { markers }
    }

    /// Build a signal of `len` frames with the given keyframe indices set.
    ///
    /// Returns the signal and the number of indices that fell outside
    /// `[0, len)` and were dropped.
    pub fn from_indices(len: usize, indices: &[usize]) -> (Self, usize) {
        let mut markers = vec![false; len];
        let mut dropped = 0;
        for &index in indices {
            match markers.get_mut(index) {
                Some(marker) => *marker = true,
                None => dropped += 1,
            }
        }
        (Self { markers }, dropped)
    }

    /// Number of frames in the signal.
    pub fn len(&self) -> usize {
        self.markers.len()
    }

    /// Check if the signal covers no frames.
    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    /// Per-frame markers as a slice.
    pub fn as_slice(&self) -> &[bool] {
        &self.markers
    }

    /// Whether `frame` is a keyframe. Out-of-range frames are not.
    pub fn is_keyframe(&self, frame: usize) -> bool {
        self.markers.get(frame).copied().unwrap_or(false)
    }

    /// Number of keyframes in the signal.
    pub fn keyframe_count(&self) -> usize {
        self.markers.iter().filter(|&&m| m).count()
    }

    /// Indices of all keyframes, ascending.
    pub fn keyframe_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.markers
            .iter()
            .enumerate()
            .filter_map(|(i, &m)| m.then_some(i))
    }
}

impl From<Vec<bool>> for KeyframeSignal {
    fn from(markers: Vec<bool>) -> Self {
        Self::new(markers)
    }
}

impl FromIterator<bool> for KeyframeSignal {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Keyframe data as produced by a loader, before normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyframeSource {
    /// One marker per frame (index caches, decoded video).
    Dense(KeyframeSignal),
    /// Ascending keyframe indices only (keyframe-format text files).
    /// The total frame count is unknown.
    Sparse(Vec<usize>),
}

impl KeyframeSource {
    /// Number of keyframes in this source.
    pub fn keyframe_count(&self) -> usize {
        match self {
            KeyframeSource::Dense(signal) => signal.keyframe_count(),
            KeyframeSource::Sparse(indices) => indices.len(),
        }
    }
}

/// Left (reference) and right (compared) signals for one source pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyframePair {
    pub left: KeyframeSignal,
    pub right: KeyframeSignal,
}

impl KeyframePair {
    pub fn new(left: KeyframeSignal, right: KeyframeSignal) -> Self {
        Self { left, right }
    }

    /// Length of the frame range both signals cover.
    pub fn usable_len(&self) -> usize {
        self.left.len().min(self.right.len())
    }

    /// Absolute difference between the two signal lengths.
    pub fn length_difference(&self) -> usize {
        self.left.len().abs_diff(self.right.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_indices_sets_markers() {
        let (signal, dropped) = KeyframeSignal::from_indices(8, &[0, 3, 7]);
        assert_eq!(dropped, 0);
        assert_eq!(signal.len(), 8);
        assert_eq!(signal.keyframe_indices().collect::<Vec<_>>(), vec![0, 3, 7]);
    }

    #[test]
    fn from_indices_drops_out_of_range() {
        let (signal, dropped) = KeyframeSignal::from_indices(5, &[1, 5, 9]);
        assert_eq!(dropped, 2);
        assert_eq!(signal.keyframe_count(), 1);
        assert!(signal.is_keyframe(1));
        assert!(!signal.is_keyframe(5));
    }

    #[test]
    fn pair_lengths() {
        let pair = KeyframePair::new(
            KeyframeSignal::new(vec![false; 1000]),
            KeyframeSignal::new(vec![false; 1080]),
        );
        assert_eq!(pair.usable_len(), 1000);
        assert_eq!(pair.length_difference(), 80);
    }
}
