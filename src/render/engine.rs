use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::compile::plan::{Container, RenderPlan};
use crate::encode::ffmpeg::FfmpegJob;
use crate::foundation::error::{ReelError, ReelResult};

/// What a successful render produced.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct RenderOutput {
    /// Written file.
    pub path: PathBuf,
    /// Output container.
    pub container: Container,
    /// MIME type to serve the file with.
    pub mime_type: &'static str,
    /// Fingerprint of the executed plan.
    pub plan_fingerprint: String,
}

impl RenderOutput {
    /// Describe the output of `plan` written to `path`.
    pub fn for_plan(plan: &RenderPlan, path: &Path) -> ReelResult<Self> {
        Ok(Self {
            path: path.to_path_buf(),
            container: plan.output.container,
            mime_type: plan.output.container.mime_type(),
            plan_fingerprint: plan.fingerprint()?,
        })
    }
}

/// Executes render plans.
///
/// Implementations own everything after planning: side files, processes, cleanup. A failure
/// inside the engine is reported as [`ReelError::Render`], never as a planning error.
pub trait RenderEngine: Send + Sync {
    /// Short engine name for logs.
    fn name(&self) -> &'static str;

    /// Run `plan`, writing the result to `output`.
    fn execute(&self, plan: &RenderPlan, output: &Path) -> ReelResult<RenderOutput>;
}

/// Engine that serializes plans and records the jobs without running anything.
#[derive(Debug)]
pub struct RecordingEngine {
    work_dir: PathBuf,
    jobs: Mutex<Vec<FfmpegJob>>,
}

impl Default for RecordingEngine {
    fn default() -> Self {
        Self::new("/tmp/reelkit-recording")
    }
}

impl RecordingEngine {
    /// Record jobs as if side files were written under `work_dir`.
    pub fn new(work_dir: impl Into<PathBuf>) -> Self {
        Self {
            work_dir: work_dir.into(),
            jobs: Mutex::new(Vec::new()),
        }
    }

    /// Jobs recorded so far, in execution order.
    pub fn jobs(&self) -> ReelResult<Vec<FfmpegJob>> {
        self.jobs
            .lock()
            .map(|jobs| jobs.clone())
            .map_err(|_| ReelError::Other(anyhow::anyhow!("recording engine lock poisoned")))
    }
}

impl RenderEngine for RecordingEngine {
    fn name(&self) -> &'static str {
        "recording"
    }

    fn execute(&self, plan: &RenderPlan, output: &Path) -> ReelResult<RenderOutput> {
        let job = FfmpegJob::from_plan(plan, output, &self.work_dir)?;
        self.jobs
            .lock()
            .map_err(|_| ReelError::Other(anyhow::anyhow!("recording engine lock poisoned")))?
            .push(job);
        RenderOutput::for_plan(plan, output)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/engine.rs"]
mod tests;
