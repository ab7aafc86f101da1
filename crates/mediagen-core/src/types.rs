//! Core types for mediagen
//!
//! Defines the fundamental types of an orchestration run:
//! - Job specifications and their payloads
//! - Per-job execution outcomes
//! - The run summary consumed by the reporter

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Stable job identifier.
///
/// The id doubles as the output filename stem (`bgm`, `start`, ...), so it
/// stays human-readable in logs and in fallback instructions.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct JobId(String);

impl JobId {
    /// Create a job id from a filename stem.
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the id as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for JobId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for JobId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for JobId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

/// Backend variant a job dispatches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JobKind {
    /// Executed by a goal-directed browser agent; artifact lands in the
    /// browser's download folder.
    InteractiveTask,
    /// Executed by a direct synthesis API call; bytes come back in hand.
    DirectSynthesis,
}

/// Job payload, per backend variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobPayload {
    /// Free-text instruction for the interactive agent.
    Interactive {
        /// Natural-language instruction embedded into the agent task.
        instruction: String,
        /// Extension the downloaded artifact is expected to carry (no dot).
        expected_extension: String,
    },
    /// Structured input for the synthesis API.
    Synthesis {
        /// Text to synthesize.
        text: String,
        /// Voice identifier understood by the synthesis service.
        voice_id: String,
        /// Model identifier understood by the synthesis service.
        model_id: String,
        /// Output encoding selector (e.g. `mp3_44100_128`).
        output_format: String,
    },
}

/// One unit of requested asset generation.
///
/// Inert description only; execution state lives in [`ExecutionOutcome`].
/// Invariant: `target_path` is inside the asset directory, which the
/// orchestrator creates before any job runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobSpec {
    /// Stable identifier (output filename stem).
    pub id: JobId,
    /// Which backend variant executes this job.
    pub kind: JobKind,
    /// Variant-specific input.
    pub payload: JobPayload,
    /// Canonical destination for the produced artifact.
    pub target_path: PathBuf,
}

impl JobSpec {
    /// Create an interactive (browser-agent) job.
    #[inline]
    #[must_use]
    pub fn interactive(
        id: impl Into<JobId>,
        instruction: impl Into<String>,
        expected_extension: impl Into<String>,
        target_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            id: id.into(),
            kind: JobKind::InteractiveTask,
            payload: JobPayload::Interactive {
                instruction: instruction.into(),
                expected_extension: expected_extension.into(),
            },
            target_path: target_path.into(),
        }
    }

    /// Create a direct-synthesis job.
    #[inline]
    #[must_use]
    pub fn synthesis(
        id: impl Into<JobId>,
        text: impl Into<String>,
        voice_id: impl Into<String>,
        model_id: impl Into<String>,
        output_format: impl Into<String>,
        target_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            id: id.into(),
            kind: JobKind::DirectSynthesis,
            payload: JobPayload::Synthesis {
                text: text.into(),
                voice_id: voice_id.into(),
                model_id: model_id.into(),
                output_format: output_format.into(),
            },
            target_path: target_path.into(),
        }
    }

    /// Expected artifact extension for interactive jobs, if any.
    #[inline]
    #[must_use]
    pub fn expected_extension(&self) -> Option<&str> {
        match &self.payload {
            JobPayload::Interactive {
                expected_extension, ..
            } => Some(expected_extension),
            JobPayload::Synthesis { .. } => None,
        }
    }
}

/// Result of executing one job. Created once, immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionOutcome {
    /// Job this outcome belongs to.
    pub job_id: JobId,
    /// Whether the artifact reached its canonical path.
    pub succeeded: bool,
    /// Failure description, present iff `succeeded` is false.
    pub error_message: Option<String>,
    /// Size of the written artifact in bytes, present iff succeeded.
    pub resolved_bytes_size: Option<u64>,
}

impl ExecutionOutcome {
    /// Successful outcome with the written artifact size.
    #[inline]
    #[must_use]
    pub fn success(job_id: JobId, resolved_bytes_size: u64) -> Self {
        Self {
            job_id,
            succeeded: true,
            error_message: None,
            resolved_bytes_size: Some(resolved_bytes_size),
        }
    }

    /// Failed outcome carrying the error description.
    #[inline]
    #[must_use]
    pub fn failure(job_id: JobId, error_message: impl Into<String>) -> Self {
        Self {
            job_id,
            succeeded: false,
            error_message: Some(error_message.into()),
            resolved_bytes_size: None,
        }
    }
}

/// Aggregate of one orchestration run. Never persisted across runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Number of jobs attempted.
    pub total: usize,
    /// Number of jobs whose artifact reached its canonical path.
    pub succeeded_count: usize,
    /// Failures in job-list order: (job id, error message).
    pub failures: Vec<(JobId, String)>,
}

impl RunSummary {
    /// Whether every job succeeded.
    #[inline]
    #[must_use]
    pub fn all_succeeded(&self) -> bool {
        self.succeeded_count == self.total
    }
}

/// Directory configuration shared by the orchestrator and resolver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetDirs {
    /// Canonical asset output directory (created idempotently per run).
    pub asset_dir: PathBuf,
    /// Browser download folder scanned for externally-left artifacts.
    pub downloads_dir: PathBuf,
}

impl AssetDirs {
    /// Create a directory configuration.
    #[inline]
    #[must_use]
    pub fn new(asset_dir: impl Into<PathBuf>, downloads_dir: impl Into<PathBuf>) -> Self {
        Self {
            asset_dir: asset_dir.into(),
            downloads_dir: downloads_dir.into(),
        }
    }

    /// Canonical path for a job's artifact inside the asset directory.
    #[inline]
    #[must_use]
    pub fn target_for(&self, file_name: impl AsRef<Path>) -> PathBuf {
        self.asset_dir.join(file_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interactive_job_carries_extension() {
        let job = JobSpec::interactive("bgm", "generate a track", "mp3", "/tmp/assets/bgm.mp3");
        assert_eq!(job.kind, JobKind::InteractiveTask);
        assert_eq!(job.expected_extension(), Some("mp3"));
    }

    #[test]
    fn synthesis_job_has_no_extension() {
        let job = JobSpec::synthesis(
            "start",
            "Ready, Go!",
            "voice-1",
            "model-1",
            "mp3_44100_128",
            "/tmp/assets/start.mp3",
        );
        assert_eq!(job.kind, JobKind::DirectSynthesis);
        assert_eq!(job.expected_extension(), None);
    }

    #[test]
    fn outcome_constructors() {
        let ok = ExecutionOutcome::success(JobId::new("bgm"), 42);
        assert!(ok.succeeded);
        assert_eq!(ok.resolved_bytes_size, Some(42));
        assert!(ok.error_message.is_none());

        let bad = ExecutionOutcome::failure(JobId::new("bgm"), "agent failed");
        assert!(!bad.succeeded);
        assert_eq!(bad.error_message.as_deref(), Some("agent failed"));
        assert!(bad.resolved_bytes_size.is_none());
    }

    #[test]
    fn asset_dirs_target_for() {
        let dirs = AssetDirs::new("/tmp/assets", "/home/u/Downloads");
        assert_eq!(
            dirs.target_for("bgm.mp3"),
            PathBuf::from("/tmp/assets/bgm.mp3")
        );
    }
}
