//! Pair-level report assembly.

use crate::models::{
    AnalysisSection, KeyframePair, KeyframeSignal, LengthMismatch, PairAnalysis, PairReport,
    SectionReport,
};

use super::correlation::score_section;
use super::run::AnalysisRun;
use super::sections::plan_sections;
use super::significance::classify;
use super::LENGTH_TOLERANCE;

/// Score and classify a single section.
pub fn analyze_section(
    run: &mut AnalysisRun,
    left: &KeyframeSignal,
    right: &KeyframeSignal,
    section: AnalysisSection,
) -> SectionReport {
    let scores = score_section(left, right, &section);
    let finding = classify(run, &scores);

    tracing::debug!(
        "Section {} [{}, {}): {:?}",
        section.index,
        section.start,
        section.end,
        finding
    );

    SectionReport { section, finding }
}

/// Analyze one normalized left/right pair.
///
/// Adds a length advisory when the signals differ by more than
/// `LENGTH_TOLERANCE` frames, then analyzes every section of the usable
/// overlap in order. Overlaps shorter than `MIN_USABLE_LEN` are reported as
/// unsupported without any section analysis.
pub fn analyze_pair(run: &mut AnalysisRun, pair: &KeyframePair) -> PairReport {
    let left_len = pair.left.len();
    let right_len = pair.right.len();
    let usable_len = pair.usable_len();
    let difference = pair.length_difference();

    let length_mismatch = (difference > LENGTH_TOLERANCE).then_some(LengthMismatch {
        left_len,
        right_len,
    });
    if length_mismatch.is_some() {
        tracing::warn!(
            "Left and right differ in length by {} frames ({} vs {})",
            difference,
            left_len,
            right_len
        );
    }

    let analysis = match plan_sections(usable_len) {
        None => {
            tracing::warn!(
                "Usable overlap of {} frames is too short to analyze",
                usable_len
            );
            PairAnalysis::Unsupported { usable_len }
        }
        Some(sections) => {
            tracing::debug!(
                "Analyzing {} frames in {} section(s)",
                usable_len,
                sections.len()
            );
            let sections = sections
                .into_iter()
                .map(|section| analyze_section(run, &pair.left, &pair.right, section))
                .collect();
            PairAnalysis::Sections { sections }
        }
    };

    let report = PairReport {
        left_len,
        right_len,
        length_mismatch,
        analysis,
    };

    tracing::info!(
        "Pair analyzed: {} section(s), {} finding(s), aligned: {}",
        report.sections().len(),
        report.findings().count(),
        report.is_aligned()
    );

    report
}
