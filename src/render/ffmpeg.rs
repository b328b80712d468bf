use std::io::Read as _;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use anyhow::Context as _;

use crate::compile::plan::RenderPlan;
use crate::encode::ffmpeg::FfmpegJob;
use crate::foundation::error::{ReelError, ReelResult};
use crate::render::engine::{RenderEngine, RenderOutput};

/// Returns `true` if `ffmpeg` is available on PATH.
pub fn is_ffmpeg_on_path() -> bool {
    program_responds("ffmpeg")
}

/// Returns `true` if `ffprobe` is available on PATH.
pub fn is_ffprobe_on_path() -> bool {
    program_responds("ffprobe")
}

fn program_responds(program: &str) -> bool {
    Command::new(program)
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

/// Create the parent directory of `path` if needed.
pub fn ensure_parent_dir(path: &Path) -> ReelResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

/// Engine that spawns the system `ffmpeg`.
///
/// Each execution gets a fresh temporary work directory for concat lists; it is removed when the
/// run finishes, successful or not.
#[derive(Clone, Debug)]
pub struct FfmpegEngine {
    program: PathBuf,
}

impl Default for FfmpegEngine {
    fn default() -> Self {
        Self::new("ffmpeg")
    }
}

impl FfmpegEngine {
    /// Use a specific `ffmpeg` binary.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Run an already serialized job. Side files must already exist.
    pub fn run_job(&self, job: &FfmpegJob) -> ReelResult<()> {
        let mut child = Command::new(&self.program)
            .args(&job.args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .with_context(|| {
                format!(
                    "failed to spawn '{}' (is it installed and on PATH?)",
                    self.program.display()
                )
            })?;

        let mut stderr = child
            .stderr
            .take()
            .ok_or_else(|| anyhow::anyhow!("failed to open ffmpeg stderr (unexpected)"))?;
        let stderr_drain = std::thread::spawn(move || {
            let mut bytes = Vec::new();
            stderr.read_to_end(&mut bytes)?;
            Ok::<_, std::io::Error>(bytes)
        });

        let status = child.wait().context("failed to wait for ffmpeg to finish")?;
        let stderr_bytes = stderr_drain
            .join()
            .map_err(|_| anyhow::anyhow!("ffmpeg stderr drain thread panicked"))?
            .context("ffmpeg stderr read failed")?;

        if !status.success() {
            let stderr = String::from_utf8_lossy(&stderr_bytes);
            tracing::warn!(label = %job.label, %status, "ffmpeg failed");
            return Err(ReelError::render(
                job.label.clone(),
                status.to_string(),
                stderr.trim(),
            ));
        }
        Ok(())
    }
}

impl RenderEngine for FfmpegEngine {
    fn name(&self) -> &'static str {
        "ffmpeg"
    }

    #[tracing::instrument(skip_all, fields(label = %plan.label, output = %output.display()))]
    fn execute(&self, plan: &RenderPlan, output: &Path) -> ReelResult<RenderOutput> {
        ensure_parent_dir(output)?;
        let work = tempfile::Builder::new()
            .prefix("reelkit-")
            .tempdir()
            .context("failed to create render work directory")?;

        let job = FfmpegJob::from_plan(plan, output, work.path())?;
        for side in &job.side_files {
            std::fs::write(&side.path, &side.contents)
                .with_context(|| format!("failed to write '{}'", side.path.display()))?;
        }

        tracing::debug!(args = ?job.args, "spawning ffmpeg");
        let started = std::time::Instant::now();
        self.run_job(&job)?;
        tracing::info!(elapsed_ms = started.elapsed().as_millis() as u64, "render finished");

        RenderOutput::for_plan(plan, output)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/ffmpeg.rs"]
mod tests;
