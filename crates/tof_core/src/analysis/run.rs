//! Explicit per-run analysis state.

use serde::{Deserialize, Serialize};

use crate::models::AmbiguityNote;

/// State shared by every pair analyzed in one run.
///
/// Tracks whether the extended ambiguity explanation has been issued. The
/// first ambiguous section of the run gets it; later ones get the brief note.
/// Create one per batch and pass it by `&mut` to each analysis call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisRun {
    extended_note_pending: bool,
    ambiguous_sections: usize,
}

impl AnalysisRun {
    pub fn new() -> Self {
        Self {
            extended_note_pending: true,
            ambiguous_sections: 0,
        }
    }

    /// Return to the start-of-run state.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Note to attach to the next ambiguous finding.
    ///
    /// Returns `Extended` exactly once per run, `Brief` afterwards.
    pub fn next_ambiguity_note(&mut self) -> AmbiguityNote {
        self.ambiguous_sections += 1;
        if std::mem::replace(&mut self.extended_note_pending, false) {
            AmbiguityNote::Extended
        } else {
            AmbiguityNote::Brief
        }
    }

    /// Number of ambiguous sections seen so far in this run.
    pub fn ambiguous_sections(&self) -> usize {
        self.ambiguous_sections
    }
}

impl Default for AnalysisRun {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extended_note_only_once() {
        let mut run = AnalysisRun::new();
        assert_eq!(run.next_ambiguity_note(), AmbiguityNote::Extended);
        assert_eq!(run.next_ambiguity_note(), AmbiguityNote::Brief);
        assert_eq!(run.next_ambiguity_note(), AmbiguityNote::Brief);
        assert_eq!(run.ambiguous_sections(), 3);
    }

    #[test]
    fn reset_restores_extended_note() {
        let mut run = AnalysisRun::new();
        run.next_ambiguity_note();
        run.reset();
        assert_eq!(run.ambiguous_sections(), 0);
        assert_eq!(run.next_ambiguity_note(), AmbiguityNote::Extended);
    }
}
