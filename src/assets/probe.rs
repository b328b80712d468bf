use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::Context as _;
use rayon::prelude::*;

use crate::foundation::error::{ReelError, ReelResult};

/// Stream and container facts reported by `ffprobe`.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct MediaInfo {
    /// Probed file.
    pub path: PathBuf,
    /// Container duration, when reported.
    pub duration_sec: Option<f64>,
    /// Width of the first video stream.
    pub width: Option<u32>,
    /// Height of the first video stream.
    pub height: Option<u32>,
    /// At least one video stream is present.
    pub has_video: bool,
    /// At least one audio stream is present.
    pub has_audio: bool,
}

#[derive(serde::Deserialize)]
struct ProbeStream {
    codec_type: Option<String>,
    width: Option<u32>,
    height: Option<u32>,
}

#[derive(serde::Deserialize)]
struct ProbeFormat {
    duration: Option<String>,
}

#[derive(serde::Deserialize)]
struct ProbeOut {
    #[serde(default)]
    streams: Vec<ProbeStream>,
    format: Option<ProbeFormat>,
}

/// Raw `ffprobe -show_format -show_streams` JSON for a file.
pub fn probe_json(path: &Path) -> ReelResult<String> {
    let out = Command::new("ffprobe")
        .args([
            "-v",
            "error",
            "-print_format",
            "json",
            "-show_format",
            "-show_streams",
        ])
        .arg(path)
        .output()
        .context("failed to run ffprobe")?;
    if !out.status.success() {
        return Err(ReelError::render(
            "probe",
            out.status.to_string(),
            format!(
                "'{}': {}",
                path.display(),
                String::from_utf8_lossy(&out.stderr).trim()
            ),
        ));
    }
    String::from_utf8(out.stdout).map_err(|e| ReelError::serde(format!("ffprobe output: {e}")))
}

/// Probe one file.
#[tracing::instrument]
pub fn probe_media(path: &Path) -> ReelResult<MediaInfo> {
    parse_probe_json(path, &probe_json(path)?)
}

/// Probe several files concurrently; results keep input order.
pub fn probe_all(paths: &[PathBuf]) -> Vec<ReelResult<MediaInfo>> {
    paths.par_iter().map(|p| probe_media(p)).collect()
}

/// Interpret `ffprobe` JSON output.
pub fn parse_probe_json(path: &Path, json: &str) -> ReelResult<MediaInfo> {
    let parsed: ProbeOut = serde_json::from_str(json)
        .map_err(|e| ReelError::serde(format!("ffprobe json parse failed: {e}")))?;

    let video = parsed
        .streams
        .iter()
        .find(|s| s.codec_type.as_deref() == Some("video"));
    let duration_sec = parsed
        .format
        .and_then(|f| f.duration)
        .and_then(|d| d.trim().parse::<f64>().ok())
        .filter(|d| d.is_finite() && *d >= 0.0);

    Ok(MediaInfo {
        path: path.to_path_buf(),
        duration_sec,
        width: video.and_then(|s| s.width),
        height: video.and_then(|s| s.height),
        has_video: video.is_some(),
        has_audio: parsed
            .streams
            .iter()
            .any(|s| s.codec_type.as_deref() == Some("audio")),
    })
}

/// Version banner of the installed `ffprobe`.
pub fn engine_version() -> ReelResult<String> {
    let out = Command::new("ffprobe")
        .arg("-version")
        .output()
        .context("failed to run ffprobe (is it installed and on PATH?)")?;
    if !out.status.success() {
        return Err(ReelError::render(
            "version",
            out.status.to_string(),
            String::from_utf8_lossy(&out.stderr).trim(),
        ));
    }
    Ok(String::from_utf8_lossy(&out.stdout).into_owned())
}

#[cfg(test)]
#[path = "../../tests/unit/assets/probe.rs"]
mod tests;
