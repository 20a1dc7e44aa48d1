//! Core data models used throughout the library.
//!
//! - `keyframes`: dense keyframe signals and the raw representations loaders produce
//! - `frame_rate`: rational frame rate used to turn frame indices into timestamps
//! - `report`: structured per-section and per-pair analysis results

mod frame_rate;
mod keyframes;
mod report;

pub use frame_rate::{FrameRate, FrameRateParseError};
pub use keyframes::{KeyframePair, KeyframeSignal, KeyframeSource};
pub use report::{
    AmbiguityNote, AnalysisSection, LengthMismatch, OffsetCandidate, PairAnalysis, PairReport,
    SectionFinding, SectionReport,
};
