//! Reconcile two keyframe representations into dense signals.

use crate::models::{KeyframePair, KeyframeSignal, KeyframeSource};

/// Normalize a left/right pair of loader outputs into a dense signal pair.
///
/// - Dense sides are kept as they are.
/// - A sparse side paired with a dense side is inflated to the dense length.
/// - Two sparse sides are both inflated to `max(last index) + 1`.
///
/// Sparse indices are not validated. Any that land outside the inflated
/// domain are dropped with a warning.
pub fn normalize(left: KeyframeSource, right: KeyframeSource) -> KeyframePair {
    let (left, right) = match (left, right) {
        (KeyframeSource::Dense(left), KeyframeSource::Dense(right)) => (left, right),
        (KeyframeSource::Dense(left), KeyframeSource::Sparse(right)) => {
            let right = inflate(&right, left.len(), "right");
            (left, right)
        }
        (KeyframeSource::Sparse(left), KeyframeSource::Dense(right)) => {
            let left = inflate(&left, right.len(), "left");
            (left, right)
        }
        (KeyframeSource::Sparse(left), KeyframeSource::Sparse(right)) => {
            let len = sparse_domain(&left).max(sparse_domain(&right));
            (inflate(&left, len, "left"), inflate(&right, len, "right"))
        }
    };
    KeyframePair::new(left, right)
}

/// Smallest domain holding every index of an ascending sparse list.
fn sparse_domain(indices: &[usize]) -> usize {
    indices.last().map_or(0, |&last| last + 1)
}

fn inflate(indices: &[usize], len: usize, side: &str) -> KeyframeSignal {
    let (signal, dropped) = KeyframeSignal::from_indices(len, indices);
    if dropped > 0 {
        tracing::warn!(
            "Dropped {} {} keyframe(s) beyond frame {}",
            dropped,
            side,
            len
        );
    }
    signal
}
