//! Error types for mediagen-core
//!
//! The taxonomy mirrors how failures propagate:
//! - `Configuration` is fatal and aborts a run before any job starts
//! - `Backend` and `ArtifactNotFound` are recovered at the orchestrator
//!   boundary and become failed [`crate::ExecutionOutcome`]s

/// Main generation error type.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    /// Precondition failure (e.g. missing credential). Aborts the run
    /// before any backend is invoked.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A backend failed to execute its job (agent task failed, network or
    /// API error). Recovered per job; never aborts the run.
    #[error("backend execution failed: {0}")]
    Backend(String),

    /// The downloads directory held no file with the expected extension.
    #[error("no downloaded file matching extension \"{extension}\"")]
    ArtifactNotFound {
        /// Extension that was scanned for (no dot).
        extension: String,
    },

    /// Filesystem error while writing or copying an artifact.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// The bounded wait on an interactive job elapsed.
    #[error("interactive task timed out after {duration_secs}s")]
    Timeout {
        /// Configured bound in seconds.
        duration_secs: u64,
    },
}

impl GenerationError {
    /// Whether this error aborts the whole run rather than one job.
    #[inline]
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }

    /// Convenience constructor for backend failures.
    #[inline]
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend(message.into())
    }

    /// Convenience constructor for configuration failures.
    #[inline]
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }
}
