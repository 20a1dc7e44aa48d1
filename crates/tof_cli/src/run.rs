//! Batch comparison of every discovered source pair.

use anyhow::{Context, Result};
use console::Term;
use serde_json::json;
use tof_core::analysis::{analyze_pair, normalize, AnalysisRun};
use tof_core::config::{Settings, SourceSettings};
use tof_core::jobs::{pair_sources, SourcePair};
use tof_core::keyframes::{load_keyframes, KeyframeResult};
use tof_core::models::{FrameRate, PairReport};
use tracing::{debug, error, info};

use crate::cli::Cli;
use crate::render::{Renderer, ALIGNED_MESSAGE};

/// Counts collected over one batch.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BatchSummary {
    /// Pairs analyzed successfully.
    pub compared: usize,
    /// Pairs with something worth reporting.
    pub reported: usize,
    /// Pairs whose keyframes could not be loaded.
    pub failed: usize,
}

/// Report for one pair plus the frame rate its sources reported.
struct Comparison {
    report: PairReport,
    probed_rate: Option<FrameRate>,
}

fn compare_pair(
    analysis_run: &mut AnalysisRun,
    pair: &SourcePair,
    sources: &SourceSettings,
) -> KeyframeResult<Comparison> {
    let left = load_keyframes(&pair.left, sources)?;
    let right = load_keyframes(&pair.right, sources)?;
    debug!(
        left_kind = %left.kind,
        right_kind = %right.kind,
        "Loaded keyframes"
    );

    let probed_rate = right.frame_rate.or(left.frame_rate);
    let signals = normalize(left.source, right.source);
    let report = analyze_pair(analysis_run, &signals);

    Ok(Comparison { report, probed_rate })
}

/// Frame rate used for timestamps: probed, then `--fps`, then config.
fn effective_frame_rate(
    probed: Option<FrameRate>,
    cli_rate: Option<FrameRate>,
    settings: &Settings,
) -> FrameRate {
    probed
        .or(cli_rate)
        .unwrap_or_else(|| settings.display.frame_rate())
}

/// Compare every pair found under `cli.left` and `cli.right`.
///
/// Discovery errors abort the batch. A pair whose keyframes fail to load is
/// logged and counted in [`BatchSummary::failed`], and the batch continues.
pub fn run(cli: &Cli, settings: &Settings) -> Result<BatchSummary> {
    let pairs = pair_sources(
        &cli.left,
        &cli.right,
        settings.sources.video_size_threshold,
    )
    .context("Failed to pair left and right sources")?;
    info!(pairs = pairs.len(), "Discovered source pairs");

    let mut analysis_run = AnalysisRun::new();
    let mut summary = BatchSummary::default();
    let term = Term::stdout();

    for pair in &pairs {
        info!(
            left = %pair.left.display(),
            right = %pair.right.display(),
            "Comparing pair"
        );

        let progress = if cli.json {
            None
        } else {
            Renderer::progress(pair)
        };
        if let Some(line) = &progress {
            term.write_line(line)?;
        }

        let result = compare_pair(&mut analysis_run, pair, &settings.sources);

        // Replaced by the pair header or nothing at all
        if progress.is_some() && term.is_term() {
            term.clear_last_lines(1)?;
        }

        let comparison = match result {
            Ok(comparison) => comparison,
            Err(e) => {
                error!(
                    left = %pair.left.display(),
                    right = %pair.right.display(),
                    "Failed to load keyframes: {}",
                    e
                );
                if cli.json {
                    println!(
                        "{}",
                        json!({
                            "episode": pair.episode,
                            "left": pair.left,
                            "right": pair.right,
                            "error": e.to_string(),
                        })
                    );
                }
                summary.failed += 1;
                continue;
            }
        };

        summary.compared += 1;
        let report = &comparison.report;
        if !report.is_aligned() {
            summary.reported += 1;
        }

        if cli.json {
            println!(
                "{}",
                json!({
                    "episode": pair.episode,
                    "left": pair.left,
                    "right": pair.right,
                    "report": report,
                })
            );
            continue;
        }

        let frame_rate = effective_frame_rate(comparison.probed_rate, cli.fps, settings);
        let renderer = Renderer::new(frame_rate);
        if let Some(text) = renderer.report(report) {
            println!("{}", renderer.pair_header(pair));
            print!("{}", text);
            println!();
        }
    }

    if !cli.json && summary.compared > 0 && summary.reported == 0 {
        println!("{}", ALIGNED_MESSAGE);
    }

    info!(
        compared = summary.compared,
        reported = summary.reported,
        failed = summary.failed,
        "Batch finished"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn probed_rate_wins_over_flag_and_config() {
        let settings = Settings::default();
        let probed = FrameRate::new(25, 1);
        let flag = FrameRate::new(30000, 1001);

        assert_eq!(effective_frame_rate(probed, flag, &settings), FrameRate { num: 25, den: 1 });
        assert_eq!(
            effective_frame_rate(None, flag, &settings),
            FrameRate { num: 30000, den: 1001 }
        );
        assert_eq!(
            effective_frame_rate(None, None, &settings),
            FrameRate::NTSC_FILM
        );
    }
}
