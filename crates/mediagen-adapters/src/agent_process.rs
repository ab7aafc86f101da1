//! Child-process agent runner
//!
//! Runs an external browser-automation agent as a child process: the task
//! text goes to the agent's stdin, its stdout becomes the completion
//! report. The process is the browser session; `kill_on_drop` guarantees
//! the session cannot outlive a cancelled run.

use mediagen_core::interactive::{AgentReport, BrowserSession, InteractiveAgent};
use mediagen_core::GenerationError;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::{Child, Command};

/// [`InteractiveAgent`] that delegates to an external agent command.
#[derive(Debug, Clone)]
pub struct ProcessAgent {
    program: String,
    args: Vec<String>,
}

impl ProcessAgent {
    /// Agent command to spawn per session.
    #[inline]
    #[must_use]
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Append an argument to the agent command.
    #[inline]
    #[must_use]
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }
}

/// One live agent process.
///
/// `run` consumes the child to collect its output; a session that was
/// never run (or whose run was cancelled before completion) is killed by
/// `close`, and by the kernel-side `kill_on_drop` if `close` is skipped.
#[derive(Debug)]
pub struct ProcessSession {
    child: Option<Child>,
}

#[async_trait::async_trait]
impl BrowserSession for ProcessSession {
    async fn close(&mut self) -> Result<(), GenerationError> {
        if let Some(mut child) = self.child.take() {
            tracing::warn!("agent process still running at close; killing");
            child
                .kill()
                .await
                .map_err(|e| GenerationError::backend(format!("killing agent failed: {e}")))?;
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl InteractiveAgent for ProcessAgent {
    type Session = ProcessSession;

    async fn open_session(&self) -> Result<Self::Session, GenerationError> {
        let child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                GenerationError::backend(format!("spawning agent {:?} failed: {e}", self.program))
            })?;

        tracing::debug!(program = %self.program, pid = ?child.id(), "agent process spawned");
        Ok(ProcessSession { child: Some(child) })
    }

    async fn run(
        &self,
        task: &str,
        session: &mut Self::Session,
    ) -> Result<AgentReport, GenerationError> {
        let mut child = session
            .child
            .take()
            .ok_or_else(|| GenerationError::backend("agent session already consumed"))?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| GenerationError::backend("agent stdin unavailable"))?;
        stdin
            .write_all(task.as_bytes())
            .await
            .map_err(|e| GenerationError::backend(format!("writing task to agent failed: {e}")))?;
        // EOF on stdin tells the agent the task text is complete.
        drop(stdin);

        let output = child
            .wait_with_output()
            .await
            .map_err(|e| GenerationError::backend(format!("waiting for agent failed: {e}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(GenerationError::backend(format!(
                "agent exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        let report = String::from_utf8_lossy(&output.stdout).trim().to_string();
        Ok(AgentReport::new(report))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(unix)]
    #[tokio::test]
    async fn run_feeds_task_and_reports_stdout() {
        let agent = ProcessAgent::new("cat");
        let mut session = agent.open_session().await.unwrap();
        let report = agent.run("open the site and download", &mut session).await.unwrap();
        assert_eq!(report.summary, "open the site and download");
        session.close().await.unwrap();
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn nonzero_exit_is_a_backend_error() {
        let agent = ProcessAgent::new("sh").arg("-c").arg("echo lost >&2; exit 3");
        let mut session = agent.open_session().await.unwrap();
        let err = agent.run("task", &mut session).await.unwrap_err();
        assert!(matches!(err, GenerationError::Backend(_)));
        assert!(err.to_string().contains("lost"));
        session.close().await.unwrap();
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn close_kills_an_unconsumed_session() {
        let agent = ProcessAgent::new("sleep").arg("30");
        let mut session = agent.open_session().await.unwrap();
        // Never run; close must reap the process instead of leaking it.
        session.close().await.unwrap();
        assert!(session.child.is_none());
    }

    #[tokio::test]
    async fn spawn_failure_is_a_backend_error() {
        let agent = ProcessAgent::new("/nonexistent/agent-binary");
        let err = agent.open_session().await.unwrap_err();
        assert!(matches!(err, GenerationError::Backend(_)));
    }
}
