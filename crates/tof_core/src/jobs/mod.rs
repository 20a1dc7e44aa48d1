//! Source discovery and left/right pairing.
//!
//! Each side of a comparison is either a single file or a directory of
//! episodes. Files in a directory are matched by the episode number embedded
//! in their names.

mod discovery;

pub use discovery::{
    collect_sources, episode_key, pair_sources, DiscoveryError, DiscoveryResult, SourcePair,
};
