//! Interactive agent backend
//!
//! Delegates a job to an external, goal-directed browser agent. The agent's
//! reasoning and retry logic are opaque; the only contract is that it
//! eventually returns a completion report or an error. The artifact lands
//! wherever the browser decided to download it, so execution always yields
//! [`BackendResult::ExternalArtifact`] and the resolver takes over.

use crate::backend::{BackendResult, GenerationBackend};
use crate::error::GenerationError;
use crate::types::{JobKind, JobPayload, JobSpec};
use std::time::Duration;

/// Completion report returned by an interactive agent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentReport {
    /// Free-text summary of what the agent did.
    pub summary: String,
}

impl AgentReport {
    /// Create a report from a summary string.
    #[inline]
    #[must_use]
    pub fn new(summary: impl Into<String>) -> Self {
        Self {
            summary: summary.into(),
        }
    }
}

/// A live browser session held for the duration of one agent task.
///
/// `close` is the graceful release path and is called exactly once per
/// execution, on success and failure alike. Implementations must also
/// release the underlying resource on `Drop` (e.g. kill-on-drop for a
/// child process), because a cancelled execution drops the session
/// without reaching `close`. A leaked browser process is the single most
/// damaging failure mode here.
#[async_trait::async_trait]
pub trait BrowserSession: Send {
    /// Gracefully release the browser.
    async fn close(&mut self) -> Result<(), GenerationError>;
}

/// External goal-directed automation agent operating a browser.
#[async_trait::async_trait]
pub trait InteractiveAgent: Send + Sync {
    /// Concrete session type this agent drives.
    type Session: BrowserSession;

    /// Open a fresh browser session.
    async fn open_session(&self) -> Result<Self::Session, GenerationError>;

    /// Run one natural-language task to completion in the given session.
    ///
    /// Blocks (suspends) until the agent reports completion or fails.
    async fn run(
        &self,
        task: &str,
        session: &mut Self::Session,
    ) -> Result<AgentReport, GenerationError>;
}

/// Backend executing [`JobKind::InteractiveTask`] jobs through an
/// [`InteractiveAgent`].
#[derive(Debug)]
pub struct InteractiveAgentBackend<A: InteractiveAgent> {
    agent: A,
    completion_phrase: String,
    timeout: Option<Duration>,
}

impl<A: InteractiveAgent> InteractiveAgentBackend<A> {
    /// Create a backend over the given agent. The wait on the agent is
    /// unbounded unless [`Self::with_timeout`] is applied.
    #[inline]
    #[must_use]
    pub fn new(agent: A) -> Self {
        Self {
            agent,
            completion_phrase: "generation completed".to_string(),
            timeout: None,
        }
    }

    /// Literal phrase the agent is asked to report when done.
    #[inline]
    #[must_use]
    pub fn with_completion_phrase(mut self, phrase: impl Into<String>) -> Self {
        self.completion_phrase = phrase.into();
        self
    }

    /// Bound the per-job wait on the agent. Elapsing the bound fails the
    /// job with [`GenerationError::Timeout`]; the session is still closed.
    #[inline]
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the full task string handed to the agent.
    fn compose_task(&self, instruction: &str) -> String {
        format!(
            "{instruction}\n\nWhen you are done, report \"{}\".",
            self.completion_phrase
        )
    }

    async fn run_agent(
        &self,
        task: &str,
        session: &mut A::Session,
    ) -> Result<AgentReport, GenerationError> {
        match self.timeout {
            Some(bound) => match tokio::time::timeout(bound, self.agent.run(task, session)).await {
                Ok(result) => result,
                Err(_) => Err(GenerationError::Timeout {
                    duration_secs: bound.as_secs(),
                }),
            },
            None => self.agent.run(task, session).await,
        }
    }
}

#[async_trait::async_trait]
impl<A: InteractiveAgent> GenerationBackend for InteractiveAgentBackend<A> {
    fn kind(&self) -> JobKind {
        JobKind::InteractiveTask
    }

    async fn execute(&self, job: &JobSpec) -> Result<BackendResult, GenerationError> {
        let JobPayload::Interactive { instruction, .. } = &job.payload else {
            return Err(GenerationError::backend(format!(
                "job {} is not an interactive task",
                job.id
            )));
        };

        let task = self.compose_task(instruction);
        tracing::info!(job = %job.id, "starting interactive agent task");

        let mut session = self.agent.open_session().await?;
        let run = self.run_agent(&task, &mut session).await;

        // Close on both paths before inspecting the agent result.
        if let Err(close_err) = session.close().await {
            tracing::warn!(job = %job.id, error = %close_err, "browser session close failed");
        }

        match run {
            Ok(report) => {
                tracing::info!(job = %job.id, report = %report.summary, "agent reported completion");
                Ok(BackendResult::ExternalArtifact)
            }
            Err(err) => {
                tracing::warn!(
                    job = %job.id,
                    error = %err,
                    "agent task failed; place the file manually at {}",
                    job.target_path.display()
                );
                Err(err)
            }
        }
    }
}
