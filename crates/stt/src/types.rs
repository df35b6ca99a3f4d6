use serde::Serialize;

use crate::features::TranscribeOptions;

/// Where the audio comes from
///
/// Exactly one source survives validation; a request can never dispatch
/// both a URL and an upload.
#[derive(Debug)]
pub enum AudioSource {
    /// Publicly reachable audio URL, forwarded to the vendor as-is
    Url(String),
    /// Uploaded file, fully buffered in memory
    Upload {
        bytes: Vec<u8>,
        mime_type: String,
    },
}

/// A validated transcription request, ready for dispatch
#[derive(Debug)]
pub struct TranscriptionRequest {
    pub source: AudioSource,
    /// Model identifier (e.g. "nova-3" or "nova-2")
    pub model: String,
    /// Legacy model tier (e.g. "enhanced"), forwarded only when supplied
    pub tier: Option<String>,
    pub options: TranscribeOptions,
}

/// One recognized word with timing and confidence
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WordEntry {
    pub word: String,
    /// Offset of the word start, in seconds
    pub start: f64,
    /// Offset of the word end, in seconds
    pub end: f64,
    /// Recognition confidence in [0, 1]
    pub confidence: f64,
    pub punctuated_word: String,
}

/// Normalized transcription response
#[derive(Debug, Serialize)]
pub struct TranscriptionResult {
    /// Full transcript text; empty string when the vendor returned none
    pub transcript: String,
    /// Words in spoken order
    pub words: Vec<WordEntry>,
    pub metadata: ResultMetadata,
    /// Audio duration in seconds, present only when the vendor reported
    /// a positive value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
}

/// Request metadata echoed back to the caller
#[derive(Debug, Serialize)]
pub struct ResultMetadata {
    /// UUID of the vendor model that ran, when reported
    pub model_uuid: Option<String>,
    /// Vendor request id for support lookups
    pub request_id: Option<String>,
    /// The model that was *requested*, not necessarily the one used
    pub model_name: String,
}
