//! TimingOffset Core - keyframe based frame offset detection.
//!
//! Compares the keyframe positions of two renditions of the same video and
//! reports, section by section, whether they are frame aligned or by how
//! many frames one is shifted against the other.
//!
//! This crate contains all logic with no terminal dependencies. The
//! `analysis` module is pure; `keyframes` and `jobs` do the file I/O.

pub mod analysis;
pub mod config;
pub mod jobs;
pub mod keyframes;
pub mod logging;
pub mod models;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_returns_value() {
        assert!(!version().is_empty());
    }
}
