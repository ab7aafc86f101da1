//! Direct synthesis backend
//!
//! Issues one synchronous request per job to a speech-synthesis API and
//! concatenates the returned byte chunks in arrival order. The credential
//! check is a preflight concern: a missing API key aborts the whole run
//! before any job executes, it is never a per-job failure.

use crate::backend::{BackendResult, GenerationBackend};
use crate::error::GenerationError;
use crate::types::{JobKind, JobPayload, JobSpec};
use bytes::{Bytes, BytesMut};
use futures::StreamExt;
use std::pin::Pin;

/// Lazy, finite, single-pass stream of artifact byte chunks.
pub type ByteChunkStream =
    Pin<Box<dyn futures::Stream<Item = Result<Bytes, GenerationError>> + Send>>;

/// External speech-synthesis capability.
#[async_trait::async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Validate credentials once, before any job runs.
    async fn preflight(&self) -> Result<(), GenerationError> {
        Ok(())
    }

    /// Convert one text to audio, returned as a chunk stream.
    async fn convert(
        &self,
        voice_id: &str,
        text: &str,
        model_id: &str,
        output_format: &str,
    ) -> Result<ByteChunkStream, GenerationError>;
}

/// Backend executing [`JobKind::DirectSynthesis`] jobs through a
/// [`SpeechSynthesizer`].
#[derive(Debug)]
pub struct DirectSynthesisBackend<S: SpeechSynthesizer> {
    synthesizer: S,
}

impl<S: SpeechSynthesizer> DirectSynthesisBackend<S> {
    /// Create a backend over the given synthesizer.
    #[inline]
    #[must_use]
    pub fn new(synthesizer: S) -> Self {
        Self { synthesizer }
    }
}

#[async_trait::async_trait]
impl<S: SpeechSynthesizer> GenerationBackend for DirectSynthesisBackend<S> {
    fn kind(&self) -> JobKind {
        JobKind::DirectSynthesis
    }

    async fn preflight(&self) -> Result<(), GenerationError> {
        self.synthesizer.preflight().await
    }

    async fn execute(&self, job: &JobSpec) -> Result<BackendResult, GenerationError> {
        let JobPayload::Synthesis {
            text,
            voice_id,
            model_id,
            output_format,
        } = &job.payload
        else {
            return Err(GenerationError::backend(format!(
                "job {} is not a synthesis task",
                job.id
            )));
        };

        tracing::info!(job = %job.id, voice = %voice_id, "synthesizing \"{text}\"");

        let mut chunks = self
            .synthesizer
            .convert(voice_id, text, model_id, output_format)
            .await?;

        let mut buf = BytesMut::new();
        while let Some(chunk) = chunks.next().await {
            buf.extend_from_slice(&chunk?);
        }

        tracing::debug!(job = %job.id, bytes = buf.len(), "synthesis complete");
        Ok(BackendResult::Bytes(buf.freeze()))
    }
}
