//! Episode discovery and pairing.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;
use thiserror::Error;

use crate::keyframes::{detect_kind, KeyframeError, SourceKind};

/// Errors that can occur while discovering sources.
#[derive(Error, Debug)]
pub enum DiscoveryError {
    #[error("Path \"{0}\" is neither a file nor a directory")]
    NotFound(PathBuf),

    #[error("Failed to read directory {path}: {source}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to inspect source: {0}")]
    Inspect(#[from] KeyframeError),

    #[error("No episode files recognised in either input")]
    NoSources,

    #[error(
        "Number of files differs: {} on the left {:?}, {} on the right {:?}",
        .left.len(),
        .left,
        .right.len(),
        .right
    )]
    CountMismatch { left: Vec<String>, right: Vec<String> },
}

/// Result type for discovery operations.
pub type DiscoveryResult<T> = Result<T, DiscoveryError>;

/// A left/right pair of source files to compare.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SourcePair {
    /// Episode number found in the left file name, if any.
    pub episode: Option<f64>,
    pub left: PathBuf,
    pub right: PathBuf,
}

/// Two digits, optionally followed by `.N`, not embedded in a longer token.
///
/// `E` may precede the number (`E01`) and `v` may follow it (`01v2`).
fn episode_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?:^|[^a-z0-9A-DF-Z])([0-9]{2}(?:\.[0-9])?)(?:$|[^a-uw-z0-9A-Z])")
            .expect("episode pattern is valid")
    })
}

/// Extract the episode number embedded in a file name.
pub fn episode_key(file_name: &str) -> Option<f64> {
    episode_pattern()
        .captures(file_name)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Grouping key for an episode number (tenths).
fn group_key(episode: f64) -> u32 {
    (episode * 10.0).round() as u32
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default()
}

/// Pick the preferred file among several for the same episode.
///
/// Keyframe-format lists win over index caches, which win over video.
/// Among videos the largest file wins.
fn choose_preferred(candidates: &[PathBuf], video_size_threshold: u64) -> DiscoveryResult<PathBuf> {
    let mut best: Option<(SourceKind, u64, &PathBuf)> = None;

    for path in candidates {
        let kind = detect_kind(path, video_size_threshold)?;
        let size = fs::metadata(path)
            .map_err(|e| KeyframeError::io(path, e))?
            .len();

        let better = match best {
            None => true,
            Some((best_kind, best_size, _)) => {
                kind < best_kind || (kind == best_kind && kind == SourceKind::Video && size > best_size)
            }
        };
        if better {
            best = Some((kind, size, path));
        }
    }

    best.map(|(_, _, path)| path.clone())
        .ok_or(DiscoveryError::NoSources)
}

/// Expand a path into the ordered list of source files it designates.
///
/// A file yields itself. A directory yields one file per episode number
/// found in its file names, ordered by episode.
pub fn collect_sources(path: &Path, video_size_threshold: u64) -> DiscoveryResult<Vec<PathBuf>> {
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }
    if !path.is_dir() {
        return Err(DiscoveryError::NotFound(path.to_path_buf()));
    }

    let read_dir = |source| DiscoveryError::ReadDir {
        path: path.to_path_buf(),
        source,
    };

    let mut entries: Vec<PathBuf> = fs::read_dir(path)
        .map_err(read_dir)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<Result<_, _>>()
        .map_err(read_dir)?;
    entries.sort();

    let mut episodes: BTreeMap<u32, Vec<PathBuf>> = BTreeMap::new();
    for entry in entries.into_iter().filter(|p| p.is_file()) {
        if let Some(episode) = episode_key(&file_name(&entry)) {
            episodes.entry(group_key(episode)).or_default().push(entry);
        }
    }

    let mut sources = Vec::with_capacity(episodes.len());
    for candidates in episodes.values() {
        let chosen = match candidates.as_slice() {
            [only] => only.clone(),
            _ => choose_preferred(candidates, video_size_threshold)?,
        };
        sources.push(chosen);
    }

    tracing::debug!("Found {} episode(s) in {}", sources.len(), path.display());

    Ok(sources)
}

/// Pair the sources of a left and a right input, in episode order.
pub fn pair_sources(
    left: &Path,
    right: &Path,
    video_size_threshold: u64,
) -> DiscoveryResult<Vec<SourcePair>> {
    let left = collect_sources(left, video_size_threshold)?;
    let right = collect_sources(right, video_size_threshold)?;

    if left.len() != right.len() {
        return Err(DiscoveryError::CountMismatch {
            left: left.iter().map(|p| file_name(p)).collect(),
            right: right.iter().map(|p| file_name(p)).collect(),
        });
    }
    if left.is_empty() {
        return Err(DiscoveryError::NoSources);
    }

    let pairs: Vec<SourcePair> = left
        .into_iter()
        .zip(right)
        .map(|(left, right)| SourcePair {
            episode: episode_key(&file_name(&left)),
            left,
            right,
        })
        .collect();

    tracing::info!("Discovered {} pair(s)", pairs.len());

    Ok(pairs)
}
