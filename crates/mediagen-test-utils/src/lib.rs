//! Testing utilities for the mediagen workspace
//!
//! Shared fakes: a scripted interactive agent with a close-counting
//! browser session, and a scripted speech synthesizer.

#![allow(missing_docs)]

use bytes::Bytes;
use futures::stream;
use mediagen_core::interactive::{AgentReport, BrowserSession, InteractiveAgent};
use mediagen_core::synthesis::{ByteChunkStream, SpeechSynthesizer};
use mediagen_core::GenerationError;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Shared counter recording how often a fake browser session was closed.
#[derive(Debug, Clone, Default)]
pub struct CloseCounter(Arc<AtomicUsize>);

impl CloseCounter {
    pub fn closes(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }

    fn bump(&self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

/// Fake browser session that counts close calls.
#[derive(Debug)]
pub struct CountingSession {
    counter: CloseCounter,
}

#[async_trait::async_trait]
impl BrowserSession for CountingSession {
    async fn close(&mut self) -> Result<(), GenerationError> {
        self.counter.bump();
        Ok(())
    }
}

#[derive(Debug, Clone)]
enum AgentBehavior {
    Succeed(String),
    Fail(String),
    Hang,
}

/// Scripted interactive agent: succeeds with a fixed report, fails with a
/// fixed message, or hangs forever (for timeout tests). Every opened
/// session reports its close through the shared [`CloseCounter`].
#[derive(Debug)]
pub struct ScriptedAgent {
    behavior: AgentBehavior,
    counter: CloseCounter,
    tasks_seen: Arc<std::sync::Mutex<Vec<String>>>,
}

impl ScriptedAgent {
    pub fn succeeding(report: impl Into<String>, counter: CloseCounter) -> Self {
        Self {
            behavior: AgentBehavior::Succeed(report.into()),
            counter,
            tasks_seen: Arc::default(),
        }
    }

    pub fn failing(message: impl Into<String>, counter: CloseCounter) -> Self {
        Self {
            behavior: AgentBehavior::Fail(message.into()),
            counter,
            tasks_seen: Arc::default(),
        }
    }

    pub fn hanging(counter: CloseCounter) -> Self {
        Self {
            behavior: AgentBehavior::Hang,
            counter,
            tasks_seen: Arc::default(),
        }
    }

    /// Task strings this agent was asked to run, in order.
    pub fn tasks_seen(&self) -> Vec<String> {
        self.tasks_seen.lock().expect("tasks mutex poisoned").clone()
    }
}

#[async_trait::async_trait]
impl InteractiveAgent for ScriptedAgent {
    type Session = CountingSession;

    async fn open_session(&self) -> Result<Self::Session, GenerationError> {
        Ok(CountingSession {
            counter: self.counter.clone(),
        })
    }

    async fn run(
        &self,
        task: &str,
        _session: &mut Self::Session,
    ) -> Result<AgentReport, GenerationError> {
        self.tasks_seen
            .lock()
            .expect("tasks mutex poisoned")
            .push(task.to_string());

        match &self.behavior {
            AgentBehavior::Succeed(report) => Ok(AgentReport::new(report.clone())),
            AgentBehavior::Fail(message) => Err(GenerationError::backend(message.clone())),
            AgentBehavior::Hang => futures::future::pending().await,
        }
    }
}

#[derive(Debug, Clone)]
enum SynthScript {
    Chunks(Vec<Vec<u8>>),
    Fail(String),
}

/// Scripted speech synthesizer keyed by input text.
///
/// Unscripted texts echo their bytes back as a single chunk. Credentials
/// are present unless [`Self::without_credentials`] is applied.
#[derive(Debug, Default)]
pub struct ScriptedSynthesizer {
    scripts: HashMap<String, SynthScript>,
    missing_credentials: bool,
}

impl ScriptedSynthesizer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_chunks(mut self, text: impl Into<String>, chunks: Vec<Vec<u8>>) -> Self {
        self.scripts.insert(text.into(), SynthScript::Chunks(chunks));
        self
    }

    #[must_use]
    pub fn with_failure(mut self, text: impl Into<String>, message: impl Into<String>) -> Self {
        self.scripts.insert(text.into(), SynthScript::Fail(message.into()));
        self
    }

    #[must_use]
    pub fn without_credentials(mut self) -> Self {
        self.missing_credentials = true;
        self
    }
}

#[async_trait::async_trait]
impl SpeechSynthesizer for ScriptedSynthesizer {
    async fn preflight(&self) -> Result<(), GenerationError> {
        if self.missing_credentials {
            return Err(GenerationError::configuration(
                "synthesis API key is not set",
            ));
        }
        Ok(())
    }

    async fn convert(
        &self,
        _voice_id: &str,
        text: &str,
        _model_id: &str,
        _output_format: &str,
    ) -> Result<ByteChunkStream, GenerationError> {
        match self.scripts.get(text) {
            Some(SynthScript::Fail(message)) => Err(GenerationError::backend(message.clone())),
            Some(SynthScript::Chunks(chunks)) => {
                let items: Vec<Result<Bytes, GenerationError>> =
                    chunks.iter().map(|c| Ok(Bytes::from(c.clone()))).collect();
                Ok(Box::pin(stream::iter(items)))
            }
            None => {
                let echoed: Vec<Result<Bytes, GenerationError>> =
                    vec![Ok(Bytes::from(text.as_bytes().to_vec()))];
                Ok(Box::pin(stream::iter(echoed)))
            }
        }
    }
}
