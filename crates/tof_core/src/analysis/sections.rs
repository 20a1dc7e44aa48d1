//! Section planning over the usable overlap.
//!
//! Pure functions - no I/O, deterministic output.

use crate::models::AnalysisSection;

use super::{MIN_USABLE_LEN, REFERENCE_SECTION_LEN};

/// Number of sections for a usable length, or `None` if it is too short.
pub fn section_count(usable_len: usize) -> Option<usize> {
    if usable_len < MIN_USABLE_LEN {
        return None;
    }
    Some((usable_len / REFERENCE_SECTION_LEN).max(1))
}

/// Split `[0, usable_len)` into contiguous analysis sections.
///
/// Every section but the last spans `usable_len / count` frames; the last
/// one extends to `usable_len` so no frames are dropped.
///
/// # Returns
/// `None` when the overlap is shorter than the shift search space.
pub fn plan_sections(usable_len: usize) -> Option<Vec<AnalysisSection>> {
    let count = section_count(usable_len)?;
    let section_len = usable_len / count;

    let sections = (0..count)
        .map(|index| AnalysisSection {
            index,
            start: index * section_len,
            end: if index + 1 == count {
                usable_len
            } else {
                (index + 1) * section_len
            },
        })
        .collect();

    Some(sections)
}
