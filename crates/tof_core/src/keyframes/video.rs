//! Keyframe probing for video files using ffprobe.
//!
//! Reads packet flags of the first video stream and turns them into one
//! marker per frame in presentation order.

use std::path::Path;
use std::process::Command;

use serde_json::Value;

use crate::models::{FrameRate, KeyframeSignal};

use super::types::{KeyframeError, KeyframeResult};

/// Keyframes and frame rate read from a video stream.
#[derive(Debug, Clone)]
pub struct ProbedVideo {
    pub signal: KeyframeSignal,
    pub frame_rate: Option<FrameRate>,
}

/// Probe a video file's keyframes with ffprobe.
///
/// # Arguments
/// * `path` - Video file to probe
/// * `ffprobe` - ffprobe executable name or path
pub fn probe_video(path: &Path, ffprobe: &str) -> KeyframeResult<ProbedVideo> {
    if !path.exists() {
        return Err(KeyframeError::SourceNotFound(path.to_path_buf()));
    }

    let mut cmd = Command::new(ffprobe);
    cmd.arg("-v")
        .arg("error")
        .arg("-select_streams")
        .arg("v:0")
        .arg("-show_entries")
        .arg("packet=pts_time,flags:stream=r_frame_rate")
        .arg("-of")
        .arg("json")
        .arg(path);

    tracing::debug!("Running ffprobe: {:?}", cmd);

    let output = cmd.output().map_err(|e| KeyframeError::ProbeFailed {
        tool: ffprobe.to_string(),
        message: format!("failed to run: {}", e),
    })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(KeyframeError::ProbeFailed {
            tool: ffprobe.to_string(),
            message: format!(
                "exit code {}: {}",
                output.status.code().unwrap_or(-1),
                stderr.trim()
            ),
        });
    }

    let json: Value = serde_json::from_slice(&output.stdout)
        .map_err(|e| KeyframeError::ProbeOutput(e.to_string()))?;

    let probed = parse_probe_json(&json)?;

    tracing::debug!(
        "Probed {} frames ({} keyframes) from {}",
        probed.signal.len(),
        probed.signal.keyframe_count(),
        path.display()
    );

    Ok(probed)
}

/// Parse ffprobe's JSON packet listing.
///
/// Packets are ordered by presentation timestamp; packets without a usable
/// timestamp are skipped. A packet is a keyframe when its flags contain `K`.
pub fn parse_probe_json(json: &Value) -> KeyframeResult<ProbedVideo> {
    let packets = json
        .get("packets")
        .and_then(|p| p.as_array())
        .ok_or_else(|| KeyframeError::ProbeOutput("no packets in output".to_string()))?;

    let mut frames: Vec<(f64, bool)> = Vec::with_capacity(packets.len());
    let mut skipped = 0usize;

    for packet in packets {
        let pts = packet
            .get("pts_time")
            .and_then(|t| t.as_str())
            .and_then(|t| t.parse::<f64>().ok())
            .filter(|t| t.is_finite());

        let Some(pts) = pts else {
            skipped += 1;
            continue;
        };

        let is_key = packet
            .get("flags")
            .and_then(|f| f.as_str())
            .is_some_and(|f| f.contains('K'));

        frames.push((pts, is_key));
    }

    if skipped > 0 {
        tracing::debug!("Skipped {} packet(s) without timestamps", skipped);
    }

    frames.sort_by(|a, b| a.0.total_cmp(&b.0));

    let frame_rate = json
        .get("streams")
        .and_then(|s| s.as_array())
        .and_then(|s| s.first())
        .and_then(|s| s.get("r_frame_rate"))
        .and_then(|r| r.as_str())
        .and_then(|r| r.parse::<FrameRate>().ok());

    Ok(ProbedVideo {
        signal: frames.into_iter().map(|(_, key)| key).collect(),
        frame_rate,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn orders_packets_by_timestamp() {
        let output = json!({
            "packets": [
                { "pts_time": "0.000000", "flags": "K__" },
                { "pts_time": "0.125125", "flags": "___" },
                { "pts_time": "0.041708", "flags": "___" },
                { "pts_time": "0.083417", "flags": "K__" },
            ],
            "streams": [{ "r_frame_rate": "24000/1001" }]
        });

        let probed = parse_probe_json(&output).unwrap();
        assert_eq!(probed.signal.as_slice(), &[true, false, true, false]);
        assert_eq!(probed.frame_rate, Some(FrameRate::NTSC_FILM));
    }

    #[test]
    fn skips_packets_without_timestamp() {
        let output = json!({
            "packets": [
                { "pts_time": "N/A", "flags": "K__" },
                { "pts_time": "0.0", "flags": "K_" },
                { "flags": "K_" },
            ],
            "streams": [{ "r_frame_rate": "0/0" }]
        });

        let probed = parse_probe_json(&output).unwrap();
        assert_eq!(probed.signal.len(), 1);
        assert_eq!(probed.frame_rate, None);
    }

    #[test]
    fn missing_packets_is_an_error() {
        let err = parse_probe_json(&json!({ "streams": [] })).unwrap_err();
        assert!(matches!(err, KeyframeError::ProbeOutput(_)));
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = probe_video(Path::new("/nonexistent/episode01.mkv"), "ffprobe").unwrap_err();
        assert!(matches!(err, KeyframeError::SourceNotFound(_)));
    }
}
