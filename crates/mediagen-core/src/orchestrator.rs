//! Orchestrator
//!
//! The only component that depends on all the others. Drives the job list
//! strictly sequentially: dispatch to the matching backend, resolve the
//! artifact, write it to the canonical path, record an outcome. Per-job
//! failures never abort the run; after a successful preflight the run
//! always attempts every job and returns exactly one outcome per job, in
//! job-list order.

use crate::backend::{BackendResult, GenerationBackend};
use crate::error::GenerationError;
use crate::reporter::ResultReporter;
use crate::resolver::ArtifactResolver;
use crate::types::{ExecutionOutcome, JobSpec, RunSummary};
use std::fs;
use std::path::PathBuf;

/// Sequential asset-generation driver.
pub struct Orchestrator {
    asset_dir: PathBuf,
    resolver: ArtifactResolver,
    backends: Vec<Box<dyn GenerationBackend>>,
}

impl Orchestrator {
    /// Create an orchestrator writing artifacts into `asset_dir`.
    #[inline]
    #[must_use]
    pub fn new(asset_dir: impl Into<PathBuf>, resolver: ArtifactResolver) -> Self {
        Self {
            asset_dir: asset_dir.into(),
            resolver,
            backends: Vec::new(),
        }
    }

    /// Register a backend. Dispatch matches on [`GenerationBackend::kind`].
    #[inline]
    #[must_use]
    pub fn with_backend(mut self, backend: Box<dyn GenerationBackend>) -> Self {
        self.backends.push(backend);
        self
    }

    /// Canonical asset directory.
    #[inline]
    #[must_use]
    pub fn asset_dir(&self) -> &PathBuf {
        &self.asset_dir
    }

    /// Execute every job and return one outcome per job, in order.
    ///
    /// # Errors
    /// Only preflight failures (missing credential) and an uncreatable
    /// asset directory error out here, both before any job runs. After
    /// that, per-job errors are captured in the outcomes.
    pub async fn execute_all(
        &self,
        jobs: &[JobSpec],
    ) -> Result<Vec<ExecutionOutcome>, GenerationError> {
        // Detect precondition failures once, before any backend is invoked.
        for backend in &self.backends {
            backend.preflight().await?;
        }

        fs::create_dir_all(&self.asset_dir)?;
        tracing::info!(dir = %self.asset_dir.display(), jobs = jobs.len(), "starting generation run");

        let mut outcomes = Vec::with_capacity(jobs.len());
        for job in jobs {
            let outcome = self.execute_job(job).await;
            if let Some(message) = &outcome.error_message {
                tracing::warn!(job = %job.id, error = %message, "job failed");
            }
            outcomes.push(outcome);
        }

        Ok(outcomes)
    }

    /// Execute every job and summarize.
    pub async fn run(&self, jobs: &[JobSpec]) -> Result<RunSummary, GenerationError> {
        let outcomes = self.execute_all(jobs).await?;
        Ok(ResultReporter::summarize(&outcomes))
    }

    /// Execute one job, converting every error into a failed outcome.
    async fn execute_job(&self, job: &JobSpec) -> ExecutionOutcome {
        let Some(backend) = self.backends.iter().find(|b| b.kind() == job.kind) else {
            return failure_with_guidance(job, format!("no backend registered for {:?}", job.kind));
        };

        match backend.execute(job).await {
            Ok(BackendResult::Bytes(bytes)) => {
                let size = bytes.len() as u64;
                match fs::write(&job.target_path, &bytes) {
                    Ok(()) => {
                        tracing::info!(job = %job.id, path = %job.target_path.display(), bytes = size, "artifact written");
                        ExecutionOutcome::success(job.id.clone(), size)
                    }
                    Err(err) => {
                        failure_with_guidance(job, format!("writing artifact failed: {err}"))
                    }
                }
            }
            Ok(BackendResult::ExternalArtifact) => self.resolve_external(job),
            Err(err) => failure_with_guidance(job, err),
        }
    }

    /// Pull an externally-left artifact into the canonical path.
    fn resolve_external(&self, job: &JobSpec) -> ExecutionOutcome {
        let Some(extension) = job.expected_extension() else {
            return failure_with_guidance(
                job,
                "external artifact signalled for a job without an expected extension",
            );
        };

        match self.resolver.resolve_into(extension, &job.target_path) {
            Ok(Some(size)) => ExecutionOutcome::success(job.id.clone(), size),
            Ok(None) => failure_with_guidance(
                job,
                GenerationError::ArtifactNotFound {
                    extension: extension.to_string(),
                },
            ),
            Err(err) => failure_with_guidance(job, err),
        }
    }
}

/// Failed outcome whose message ends with the manual-placement
/// instruction naming the job's canonical path. Every failure class goes
/// through here so the reporter's fallback block always tells the
/// operator exactly which file to populate by hand.
fn failure_with_guidance(job: &JobSpec, message: impl std::fmt::Display) -> ExecutionOutcome {
    ExecutionOutcome::failure(
        job.id.clone(),
        format!(
            "{message}; place the file manually at {}",
            job.target_path.display()
        ),
    )
}
