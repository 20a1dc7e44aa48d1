//! Keyframe offset analysis.
//!
//! # Architecture
//!
//! The pipeline is a chain of pure functions plus one piece of explicit
//! run state:
//!
//! 1. **Normalization** (`normalize`): turn two loader outputs into dense
//!    signals over comparable frame domains.
//!
//! 2. **Sectioning** (`sections`): split the usable overlap into contiguous
//!    sections so a timing change partway through a source stays visible.
//!
//! 3. **Correlation** (`correlation`): count overlapping keyframes for every
//!    shift in `-240..=240` within one section.
//!
//! 4. **Significance** (`significance`): standardize the counts and classify
//!    the section.
//!
//! 5. **Aggregation** (`aggregate`): length advisory plus the per-section
//!    findings, in order.
//!
//! `AnalysisRun` carries the only mutable state: whether the long ambiguity
//! explanation has been handed out yet. Create one per batch.
//!
//! # Usage
//!
//! ```
//! use tof_core::analysis::{analyze_pair, normalize, AnalysisRun};
//! use tof_core::models::{KeyframeSignal, KeyframeSource};
//!
//! let left = KeyframeSource::Sparse(vec![0, 120, 500, 730]);
//! let right = KeyframeSource::Dense(KeyframeSignal::new(vec![false; 1000]));
//! let pair = normalize(left, right);
//!
//! let mut run = AnalysisRun::new();
//! let report = analyze_pair(&mut run, &pair);
//! assert_eq!(report.sections().len(), 1);
//! ```

mod aggregate;
mod correlation;
mod normalize;
mod run;
mod sections;
mod significance;

pub use aggregate::{analyze_pair, analyze_section};
pub use correlation::{score_section, window_bounds, ShiftScores, ShiftWindows};
pub use normalize::normalize;
pub use run::AnalysisRun;
pub use sections::{plan_sections, section_count};
pub use significance::{classify, standardize};

/// Largest shift searched in either direction, in frames.
pub const SEARCH_RADIUS: i32 = 240;

/// Number of candidate shifts (`-SEARCH_RADIUS..=SEARCH_RADIUS`).
pub const SHIFT_COUNT: usize = 2 * SEARCH_RADIUS as usize + 1;

/// Shortest usable overlap that can be analyzed.
pub const MIN_USABLE_LEN: usize = SHIFT_COUNT;

/// Frames per section before another section is added.
pub const REFERENCE_SECTION_LEN: usize = 5754;

/// Z-score a shift must exceed to be significant.
pub const PRIMARY_THRESHOLD: f64 = 5.0;

/// Z-score a shift must exceed to be reported as a weak candidate.
pub const SECONDARY_THRESHOLD: f64 = 4.0;

/// Length difference in frames above which a pair gets a length advisory.
pub const LENGTH_TOLERANCE: usize = 72;

/// All candidate shifts, ascending.
pub fn shifts() -> impl Iterator<Item = i32> {
    -SEARCH_RADIUS..=SEARCH_RADIUS
}
