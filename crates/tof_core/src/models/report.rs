//! Structured analysis results.
//!
//! The analysis never formats text. Everything a renderer needs is carried
//! in these types, which also serialize to JSON for machine consumers.

use serde::{Deserialize, Serialize};

/// Half-open frame range `[start, end)` analyzed independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisSection {
    /// Section index (0-based, chronological).
    pub index: usize,
    /// First frame of the section.
    pub start: usize,
    /// One past the last frame of the section.
    pub end: usize,
}

impl AnalysisSection {
    /// Number of frames in the section.
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Check if the section covers no frames.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A candidate frame shift with its standardized score.
///
/// A positive shift means the right source runs late: right frame `i + shift`
/// matches left frame `i`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OffsetCandidate {
    /// Shift in frames, within the search radius.
    pub shift: i32,
    /// Z-score of the overlap count within its section.
    pub z_score: f64,
}

/// Which explanation accompanies an ambiguous finding.
///
/// Only the first ambiguous finding of a run gets the long explanation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AmbiguityNote {
    Extended,
    Brief,
}

impl AmbiguityNote {
    /// Human-readable explanation.
    pub fn text(&self) -> &'static str {
        match self {
            AmbiguityNote::Extended => {
                "This is likely due to timing changing in the middle of the section, \
                 for example earlier parts following one offset and later parts another. \
                 It may also be coincidence, especially when one offset scores far higher \
                 than all the others."
            }
            AmbiguityNote::Brief => {
                "This may be due to timing changing in the middle of the section, or coincidence."
            }
        }
    }
}

/// Outcome of classifying one section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SectionFinding {
    /// Shift 0 is the only significant shift.
    Aligned,
    /// Exactly one non-zero shift is significant.
    SingleCandidate { candidate: OffsetCandidate },
    /// Several shifts are significant at once.
    Ambiguous {
        candidates: Vec<OffsetCandidate>,
        note: AmbiguityNote,
    },
    /// Nothing passed either threshold.
    Inconclusive,
    /// Nothing passed the primary threshold, but some shifts passed the secondary one.
    WeakSignal { candidates: Vec<OffsetCandidate> },
}

impl SectionFinding {
    pub fn is_aligned(&self) -> bool {
        matches!(self, SectionFinding::Aligned)
    }

    /// Candidates carried by this finding, if any.
    pub fn candidates(&self) -> &[OffsetCandidate] {
        match self {
            SectionFinding::SingleCandidate { candidate } => std::slice::from_ref(candidate),
            SectionFinding::Ambiguous { candidates, .. }
            | SectionFinding::WeakSignal { candidates } => candidates,
            SectionFinding::Aligned | SectionFinding::Inconclusive => &[],
        }
    }
}

/// Finding for one section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionReport {
    pub section: AnalysisSection,
    pub finding: SectionFinding,
}

/// Advisory raised when the two sources differ noticeably in length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LengthMismatch {
    pub left_len: usize,
    pub right_len: usize,
}

impl LengthMismatch {
    /// Absolute length difference in frames.
    pub fn difference(&self) -> usize {
        self.left_len.abs_diff(self.right_len)
    }
}

/// Section analysis outcome for a pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PairAnalysis {
    /// Usable overlap too short to analyze.
    Unsupported { usable_len: usize },
    /// Section findings in chronological order.
    Sections { sections: Vec<SectionReport> },
}

/// Complete report for one left/right pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairReport {
    pub left_len: usize,
    pub right_len: usize,
    pub length_mismatch: Option<LengthMismatch>,
    pub analysis: PairAnalysis,
}

impl PairReport {
    /// Section reports, empty when the pair is unsupported.
    pub fn sections(&self) -> &[SectionReport] {
        match &self.analysis {
            PairAnalysis::Sections { sections } => sections,
            PairAnalysis::Unsupported { .. } => &[],
        }
    }

    pub fn is_unsupported(&self) -> bool {
        matches!(self.analysis, PairAnalysis::Unsupported { .. })
    }

    /// Whether sections were analyzed and every one of them is aligned.
    pub fn sections_aligned(&self) -> bool {
        !self.is_unsupported() && self.sections().iter().all(|s| s.finding.is_aligned())
    }

    /// No differences detected: no length advisory and every section aligned.
    pub fn is_aligned(&self) -> bool {
        self.length_mismatch.is_none() && self.sections_aligned()
    }

    /// Section reports that are not `Aligned`.
    pub fn findings(&self) -> impl Iterator<Item = &SectionReport> {
        self.sections().iter().filter(|s| !s.finding.is_aligned())
    }
}
