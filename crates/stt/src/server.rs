use secrecy::ExposeSecret as _;

use crate::{
    error::SttError,
    provider::{SttProvider, deepgram::DeepgramProvider},
    request::TranscriptionForm,
    types::{TranscriptionRequest, TranscriptionResult},
};

/// STT server owning the configured provider
pub struct Server {
    provider: Box<dyn SttProvider>,
    default_model: String,
    endpoint_path: String,
}

impl Server {
    /// Validate a raw form into a dispatchable request
    pub(crate) fn build_request(&self, form: TranscriptionForm) -> crate::error::Result<TranscriptionRequest> {
        form.into_request(&self.default_model)
    }

    /// Dispatch exactly one vendor call and normalize the outcome
    pub(crate) async fn transcribe(&self, request: TranscriptionRequest) -> crate::error::Result<TranscriptionResult> {
        self.provider.transcribe(request).await
    }

    /// Route the transcription endpoint is mounted at
    pub fn endpoint_path(&self) -> &str {
        &self.endpoint_path
    }
}

/// Builder for constructing the STT server from configuration
pub(crate) struct SttServerBuilder<'a> {
    config: &'a verbatim_config::Config,
}

impl<'a> SttServerBuilder<'a> {
    pub fn new(config: &'a verbatim_config::Config) -> Self {
        Self { config }
    }

    pub fn build(self) -> crate::error::Result<Server> {
        let stt = &self.config.stt;

        let api_key = stt
            .api_key
            .clone()
            .filter(|key| !key.expose_secret().is_empty())
            .ok_or_else(|| SttError::Config("Deepgram API key is required".to_string()))?;

        let timeout = stt.request_timeout_seconds.map(std::time::Duration::from_secs);

        tracing::debug!(
            default_model = %stt.default_model,
            endpoint = %stt.endpoint_path,
            "initializing Deepgram STT provider"
        );

        Ok(Server {
            provider: Box::new(DeepgramProvider::new(api_key, stt.base_url.clone(), timeout)),
            default_model: stt.default_model.clone(),
            endpoint_path: stt.endpoint_path.clone(),
        })
    }
}
