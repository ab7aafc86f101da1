//! Generation backend seam
//!
//! A backend knows how to execute exactly one job and either hands the
//! artifact bytes back directly or signals that the artifact was left
//! somewhere external (the browser's download folder) for the resolver
//! to find.

use crate::error::GenerationError;
use crate::types::{JobKind, JobSpec};
use bytes::Bytes;

/// What a backend produced for one job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendResult {
    /// Artifact bytes in hand; the orchestrator writes them to the
    /// job's target path.
    Bytes(Bytes),
    /// Artifact was left in an external location the backend cannot
    /// report; the orchestrator must run the artifact resolver.
    ExternalArtifact,
}

/// Polymorphic generation backend.
///
/// Implementations must be object safe: the orchestrator dispatches on
/// [`JobKind`] over a list of boxed backends.
#[async_trait::async_trait]
pub trait GenerationBackend: Send + Sync {
    /// Job kind this backend executes.
    fn kind(&self) -> JobKind;

    /// Validate preconditions once, before any job runs.
    ///
    /// A [`GenerationError::Configuration`] here short-circuits the whole
    /// run with zero outcomes.
    async fn preflight(&self) -> Result<(), GenerationError> {
        Ok(())
    }

    /// Execute one job to completion.
    ///
    /// Errors returned here are recovered at the orchestrator boundary
    /// and become failed outcomes; they never abort the run.
    async fn execute(&self, job: &JobSpec) -> Result<BackendResult, GenerationError>;
}
