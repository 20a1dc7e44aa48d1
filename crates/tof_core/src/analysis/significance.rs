//! Per-section standardization and classification of shift scores.
//!
//! All functions are pure except `classify`, which consumes the run's
//! one-shot ambiguity note when it reports an ambiguous section.

use crate::models::{OffsetCandidate, SectionFinding};

use super::correlation::ShiftScores;
use super::run::AnalysisRun;
use super::{shifts, PRIMARY_THRESHOLD, SECONDARY_THRESHOLD};

/// Standardize counts to zero mean and unit population standard deviation.
///
/// Returns `None` when every count is identical, since no shift can then
/// stand out.
pub fn standardize(counts: &[u32]) -> Option<Vec<f64>> {
    if counts.is_empty() {
        return None;
    }

    let n = counts.len() as f64;
    let mean = counts.iter().map(|&c| c as f64).sum::<f64>() / n;
    let variance = counts
        .iter()
        .map(|&c| (c as f64 - mean).powi(2))
        .sum::<f64>()
        / n;
    let std_dev = variance.sqrt();

    if std_dev == 0.0 || !std_dev.is_finite() {
        return None;
    }

    Some(counts.iter().map(|&c| (c as f64 - mean) / std_dev).collect())
}

/// Shifts whose z-score exceeds `threshold`, ascending by shift.
fn candidates_above(z_scores: &[f64], threshold: f64) -> Vec<OffsetCandidate> {
    shifts()
        .zip(z_scores.iter().copied())
        .filter(|&(_, z)| z > threshold)
        .map(|(shift, z_score)| OffsetCandidate { shift, z_score })
        .collect()
}

/// Classify one section's shift scores.
///
/// 1. No shift above the primary threshold: weak candidates above the
///    secondary threshold give `WeakSignal`, otherwise `Inconclusive`.
/// 2. Exactly one: shift 0 is `Aligned`, anything else `SingleCandidate`.
/// 3. More than one: `Ambiguous`, with the run's next ambiguity note.
///
/// Zero-variance scores are `Inconclusive`.
pub fn classify(run: &mut AnalysisRun, scores: &ShiftScores) -> SectionFinding {
    let Some(z_scores) = standardize(scores.counts()) else {
        return SectionFinding::Inconclusive;
    };

    let mut significant = candidates_above(&z_scores, PRIMARY_THRESHOLD);

    match significant.len() {
        0 => {
            let weak = candidates_above(&z_scores, SECONDARY_THRESHOLD);
            if weak.is_empty() {
                SectionFinding::Inconclusive
            } else {
                SectionFinding::WeakSignal { candidates: weak }
            }
        }
        1 => {
            let candidate = significant.remove(0);
            if candidate.shift == 0 {
                SectionFinding::Aligned
            } else {
                SectionFinding::SingleCandidate { candidate }
            }
        }
        _ => SectionFinding::Ambiguous {
            candidates: significant,
            note: run.next_ambiguity_note(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{SEARCH_RADIUS, SHIFT_COUNT};
    use crate::models::AmbiguityNote;

    /// Scores with `value` at the given shifts and 0 everywhere else.
    fn scores_with(shifts: &[i32], value: u32) -> ShiftScores {
        let mut counts = [0u32; SHIFT_COUNT];
        for &shift in shifts {
            counts[(shift + SEARCH_RADIUS) as usize] = value;
        }
        ShiftScores::from_counts(counts)
    }

    #[test]
    fn standardize_uses_population_std_dev() {
        let z = standardize(&[1, 3]).unwrap();
        assert!((z[0] + 1.0).abs() < 1e-12);
        assert!((z[1] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn standardize_rejects_zero_variance() {
        assert!(standardize(&[4; 481]).is_none());
        assert!(standardize(&[]).is_none());
    }

    #[test]
    fn single_peak_at_zero_is_aligned() {
        let mut run = AnalysisRun::new();
        assert_eq!(classify(&mut run, &scores_with(&[0], 40)), SectionFinding::Aligned);
    }

    #[test]
    fn single_peak_elsewhere_is_candidate() {
        let mut run = AnalysisRun::new();
        match classify(&mut run, &scores_with(&[-24], 40)) {
            SectionFinding::SingleCandidate { candidate } => {
                assert_eq!(candidate.shift, -24);
                // One spike among 481: z = sqrt(480)
                assert!((candidate.z_score - 480f64.sqrt()).abs() < 1e-9);
            }
            other => panic!("expected single candidate, got {:?}", other),
        }
    }

    #[test]
    fn flat_scores_are_inconclusive() {
        let mut run = AnalysisRun::new();
        assert_eq!(classify(&mut run, &scores_with(&[], 0)), SectionFinding::Inconclusive);

        let flat = ShiftScores::from_counts([7; SHIFT_COUNT]);
        assert_eq!(classify(&mut run, &flat), SectionFinding::Inconclusive);
    }

    #[test]
    fn broad_scores_are_inconclusive() {
        // 40 equal spikes: z = sqrt(441/40) ~ 3.32
        let spikes: Vec<i32> = (0..40).map(|i| i * 12 - 240).collect();
        let mut run = AnalysisRun::new();
        assert_eq!(classify(&mut run, &scores_with(&spikes, 3)), SectionFinding::Inconclusive);
    }

    #[test]
    fn moderate_scores_are_weak_signal() {
        // 20 equal spikes: z = sqrt(461/20) ~ 4.80
        let spikes: Vec<i32> = (0..20).map(|i| i * 24 - 228).collect();
        let mut run = AnalysisRun::new();
        match classify(&mut run, &scores_with(&spikes, 2)) {
            SectionFinding::WeakSignal { candidates } => {
                assert_eq!(candidates.len(), 20);
                assert_eq!(candidates[0].shift, -228);
                assert!(candidates.iter().all(|c| c.z_score > 4.0 && c.z_score <= 5.0));
            }
            other => panic!("expected weak signal, got {:?}", other),
        }
        assert_eq!(run.ambiguous_sections(), 0);
    }

    #[test]
    fn several_peaks_are_ambiguous_with_one_shot_note() {
        let mut run = AnalysisRun::new();
        let scores = scores_with(&[0, 48, 96], 30);

        match classify(&mut run, &scores) {
            SectionFinding::Ambiguous { candidates, note } => {
                let shifts: Vec<i32> = candidates.iter().map(|c| c.shift).collect();
                assert_eq!(shifts, vec![0, 48, 96]);
                assert_eq!(note, AmbiguityNote::Extended);
            }
            other => panic!("expected ambiguous, got {:?}", other),
        }

        match classify(&mut run, &scores) {
            SectionFinding::Ambiguous { note, .. } => assert_eq!(note, AmbiguityNote::Brief),
            other => panic!("expected ambiguous, got {:?}", other),
        }
    }
}
