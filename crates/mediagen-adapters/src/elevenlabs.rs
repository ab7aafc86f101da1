//! ElevenLabs-compatible speech synthesis client
//!
//! One POST per conversion; the response body streams back as byte
//! chunks. The API key is validated in `preflight`, never per job.

use futures::TryStreamExt;
use mediagen_core::synthesis::ByteChunkStream;
use mediagen_core::{GenerationError, SpeechSynthesizer};

/// Environment variable holding the API key.
pub const API_KEY_VAR: &str = "ELEVENLABS_API_KEY";

const DEFAULT_BASE_URL: &str = "https://api.elevenlabs.io";

/// HTTP [`SpeechSynthesizer`] against the ElevenLabs text-to-speech API.
#[derive(Debug, Clone)]
pub struct ElevenLabsSynthesizer {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl ElevenLabsSynthesizer {
    /// Create a client with the given API key (or `None` when absent).
    #[inline]
    #[must_use]
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key,
        }
    }

    /// Create a client from the `ELEVENLABS_API_KEY` environment variable.
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(std::env::var(API_KEY_VAR).ok())
    }

    /// Override the service base URL (tests, self-hosted gateways).
    #[inline]
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Conversion endpoint for a voice and output format.
    fn endpoint(&self, voice_id: &str, output_format: &str) -> String {
        format!(
            "{}/v1/text-to-speech/{voice_id}?output_format={output_format}",
            self.base_url
        )
    }

    fn api_key(&self) -> Result<&str, GenerationError> {
        match self.api_key.as_deref() {
            Some(key) if !key.is_empty() => Ok(key),
            _ => Err(GenerationError::configuration(format!(
                "{API_KEY_VAR} is not set; add {API_KEY_VAR}=your_api_key_here to your .env file"
            ))),
        }
    }
}

#[async_trait::async_trait]
impl SpeechSynthesizer for ElevenLabsSynthesizer {
    async fn preflight(&self) -> Result<(), GenerationError> {
        self.api_key().map(|_| ())
    }

    async fn convert(
        &self,
        voice_id: &str,
        text: &str,
        model_id: &str,
        output_format: &str,
    ) -> Result<ByteChunkStream, GenerationError> {
        let key = self.api_key()?;
        let url = self.endpoint(voice_id, output_format);
        tracing::debug!(%url, %model_id, "requesting synthesis");

        let response = self
            .client
            .post(&url)
            .header("xi-api-key", key)
            .json(&serde_json::json!({
                "text": text,
                "model_id": model_id,
            }))
            .send()
            .await
            .map_err(|e| GenerationError::backend(format!("synthesis request failed: {e}")))?
            .error_for_status()
            .map_err(|e| GenerationError::backend(format!("synthesis request rejected: {e}")))?;

        let stream = response
            .bytes_stream()
            .map_err(|e| GenerationError::backend(format!("synthesis stream failed: {e}")));
        Ok(Box::pin(stream))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_embeds_voice_and_format() {
        let synth = ElevenLabsSynthesizer::new(Some("k".into()))
            .with_base_url("http://localhost:9999");
        assert_eq!(
            synth.endpoint("21m00Tcm4TlvDq8ikWAM", "mp3_44100_128"),
            "http://localhost:9999/v1/text-to-speech/21m00Tcm4TlvDq8ikWAM?output_format=mp3_44100_128"
        );
    }

    #[tokio::test]
    async fn preflight_rejects_missing_key_with_remediation() {
        let synth = ElevenLabsSynthesizer::new(None);
        let err = synth.preflight().await.unwrap_err();
        assert!(matches!(err, GenerationError::Configuration(_)));
        assert!(err.to_string().contains(API_KEY_VAR));
        assert!(err.to_string().contains(".env"));
    }

    #[tokio::test]
    async fn preflight_rejects_empty_key() {
        let synth = ElevenLabsSynthesizer::new(Some(String::new()));
        assert!(synth.preflight().await.is_err());
    }

    #[tokio::test]
    async fn preflight_accepts_present_key() {
        let synth = ElevenLabsSynthesizer::new(Some("key".into()));
        assert!(synth.preflight().await.is_ok());
    }

    #[tokio::test]
    async fn convert_against_unreachable_host_is_a_backend_error() {
        let synth = ElevenLabsSynthesizer::new(Some("key".into()))
            .with_base_url("http://127.0.0.1:1");
        // Not `unwrap_err`: the Ok side (a boxed stream) has no Debug impl.
        let err = match synth.convert("v", "hello", "m", "mp3_44100_128").await {
            Err(err) => err,
            Ok(_) => panic!("expected convert to fail"),
        };
        assert!(matches!(err, GenerationError::Backend(_)));
    }
}
