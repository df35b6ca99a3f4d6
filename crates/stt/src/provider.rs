pub(crate) mod deepgram;

use async_trait::async_trait;

use crate::types::{TranscriptionRequest, TranscriptionResult};

/// Trait for STT provider implementations
#[async_trait]
pub(crate) trait SttProvider: Send + Sync {
    /// Transcribe audio and normalize the vendor response
    async fn transcribe(&self, request: TranscriptionRequest) -> crate::error::Result<TranscriptionResult>;
}
