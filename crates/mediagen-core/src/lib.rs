//! mediagen-core: asset-generation orchestration
//!
//! Given a declarative list of generation jobs and backends capable of
//! executing one job each, this crate:
//! - drives execution strictly sequentially
//! - tracks per-job success/failure independently
//! - resolves each job's output into a deterministic on-disk location,
//!   even when the backend leaves its artifact somewhere it cannot
//!   report (a browser's default download folder)
//!
//! # Example
//!
//! ```rust,ignore
//! use mediagen_core::{ArtifactResolver, JobSpec, Orchestrator, ResultReporter};
//!
//! # async fn example(backend: Box<dyn mediagen_core::GenerationBackend>) -> Result<(), mediagen_core::GenerationError> {
//! let resolver = ArtifactResolver::new("/home/user/Downloads");
//! let orchestrator = Orchestrator::new("assets", resolver).with_backend(backend);
//!
//! let jobs = vec![JobSpec::interactive(
//!     "bgm",
//!     "open the music site and generate a track",
//!     "mp3",
//!     "assets/bgm.mp3",
//! )];
//! let outcomes = orchestrator.execute_all(&jobs).await?;
//! let summary = ResultReporter::summarize(&outcomes);
//! ResultReporter::emit(&outcomes, &summary);
//! # Ok(())
//! # }
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

// Core modules
pub mod backend;
pub mod error;
pub mod interactive;
pub mod orchestrator;
pub mod reporter;
pub mod resolver;
pub mod synthesis;
pub mod types;

// Re-exports for convenience
pub use backend::{BackendResult, GenerationBackend};
pub use error::GenerationError;
pub use interactive::{AgentReport, BrowserSession, InteractiveAgent, InteractiveAgentBackend};
pub use orchestrator::Orchestrator;
pub use reporter::ResultReporter;
pub use resolver::ArtifactResolver;
pub use synthesis::{ByteChunkStream, DirectSynthesisBackend, SpeechSynthesizer};
pub use types::{AssetDirs, ExecutionOutcome, JobId, JobKind, JobPayload, JobSpec, RunSummary};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with mediagen-core
    pub use crate::{
        ArtifactResolver, BackendResult, ExecutionOutcome, GenerationBackend, GenerationError,
        JobId, JobKind, JobSpec, Orchestrator, ResultReporter, RunSummary,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
