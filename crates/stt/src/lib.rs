#![allow(
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_const_for_fn,
    clippy::module_name_repetitions
)]

//! Transcription request normalizer
//!
//! The single linear pipeline behind the transcription endpoint:
//! validate the form, map feature flags onto typed vendor options,
//! dispatch exactly one Deepgram call (URL or upload, never both), and
//! reshape the vendor response into the stable output contract. Any
//! failure exits through one catch-all conversion to the shared error
//! envelope.

mod error;
mod features;
mod http_client;
mod provider;
mod request;
mod server;
mod types;

use std::sync::Arc;

use axum::{Json, Router, extract::State, routing::post};

pub use error::{Result, SttError};
pub use features::{FeatureFlag, TranscribeOptions};
pub use server::Server;
pub use types::{AudioSource, ResultMetadata, TranscriptionRequest, TranscriptionResult, WordEntry};
use request::ExtractForm;
use server::SttServerBuilder;

/// Build the STT server from configuration
///
/// # Errors
///
/// Returns an error if no Deepgram API key is configured
pub fn build_server(config: &verbatim_config::Config) -> anyhow::Result<Arc<Server>> {
    let server = Arc::new(
        SttServerBuilder::new(config)
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to initialize STT server: {e}"))?,
    );
    Ok(server)
}

/// Create the endpoint router for transcription
pub fn endpoint_router(server: &Server) -> Router<Arc<Server>> {
    Router::new().route(server.endpoint_path(), post(transcribe))
}

/// Handle transcription requests
async fn transcribe(
    State(server): State<Arc<Server>>,
    ExtractForm(form): ExtractForm,
) -> Result<Json<TranscriptionResult>> {
    let request = server.build_request(form)?;

    tracing::debug!(model = %request.model, "transcription requested");

    let response = server.transcribe(request).await?;

    tracing::debug!("transcription complete");

    Ok(Json(response))
}
