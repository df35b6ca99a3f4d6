use async_trait::async_trait;
use indexmap::IndexMap;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};

use crate::{
    error::SttError,
    http_client::http_client,
    types::{AudioSource, ResultMetadata, TranscriptionRequest, TranscriptionResult, WordEntry},
};

use super::SttProvider;

const DEFAULT_DEEPGRAM_API_URL: &str = "https://api.deepgram.com/v1";

/// Deepgram prerecorded transcription provider
pub struct DeepgramProvider {
    client: Client,
    base_url: String,
    api_key: SecretString,
    request_timeout: Option<std::time::Duration>,
}

impl DeepgramProvider {
    pub fn new(api_key: SecretString, base_url: Option<String>, request_timeout: Option<std::time::Duration>) -> Self {
        let client = http_client();
        let base_url = base_url.unwrap_or_else(|| DEFAULT_DEEPGRAM_API_URL.to_string());

        Self {
            client,
            base_url,
            api_key,
            request_timeout,
        }
    }
}

/// Wire shape of Deepgram's prerecorded response, reduced to the fields
/// the normalizer projects
#[derive(Debug, Default, serde::Deserialize)]
pub(crate) struct DeepgramResponse {
    #[serde(default)]
    pub metadata: Option<DeepgramMetadata>,
    #[serde(default)]
    pub results: DeepgramResults,
}

#[derive(Debug, Default, serde::Deserialize)]
pub(crate) struct DeepgramMetadata {
    #[serde(default)]
    pub request_id: Option<String>,
    /// Keyed by model UUID; the first key identifies the model that ran
    #[serde(default)]
    pub model_info: IndexMap<String, serde_json::Value>,
    #[serde(default)]
    pub duration: Option<f64>,
}

#[derive(Debug, Default, serde::Deserialize)]
pub(crate) struct DeepgramResults {
    #[serde(default)]
    pub channels: Vec<DeepgramChannel>,
}

#[derive(Debug, Default, serde::Deserialize)]
pub(crate) struct DeepgramChannel {
    #[serde(default)]
    pub alternatives: Vec<DeepgramAlternative>,
}

#[derive(Debug, Default, serde::Deserialize)]
pub(crate) struct DeepgramAlternative {
    #[serde(default)]
    pub transcript: String,
    #[serde(default)]
    pub words: Vec<DeepgramWord>,
}

#[derive(Debug, serde::Deserialize)]
pub(crate) struct DeepgramWord {
    pub word: String,
    pub start: f64,
    pub end: f64,
    pub confidence: f64,
    #[serde(default)]
    pub punctuated_word: Option<String>,
}

/// Reshape a vendor response into the stable output contract
///
/// Projects the first channel's first alternative. A structurally empty
/// response is a vendor contract violation, not a user error.
pub(crate) fn normalize(response: DeepgramResponse, model_name: &str) -> crate::error::Result<TranscriptionResult> {
    let alternative = response
        .results
        .channels
        .into_iter()
        .next()
        .and_then(|channel| channel.alternatives.into_iter().next())
        .ok_or(SttError::EmptyResult)?;

    let words = alternative
        .words
        .into_iter()
        .map(|w| WordEntry {
            punctuated_word: w.punctuated_word.unwrap_or_else(|| w.word.clone()),
            word: w.word,
            start: w.start,
            end: w.end,
            confidence: w.confidence,
        })
        .collect();

    let metadata = response.metadata.unwrap_or_default();

    Ok(TranscriptionResult {
        transcript: alternative.transcript,
        words,
        metadata: ResultMetadata {
            model_uuid: metadata.model_info.keys().next().cloned(),
            request_id: metadata.request_id,
            model_name: model_name.to_string(),
        },
        duration: metadata.duration.filter(|d| *d > 0.0),
    })
}

#[async_trait]
impl SttProvider for DeepgramProvider {
    async fn transcribe(&self, request: TranscriptionRequest) -> crate::error::Result<TranscriptionResult> {
        let url = format!("{}/listen", self.base_url);

        let mut query: Vec<(&str, String)> = vec![("model", request.model.clone())];
        if let Some(tier) = &request.tier {
            query.push(("tier", tier.clone()));
        }
        query.extend(request.options.query_pairs());

        let builder = match request.source {
            AudioSource::Url(audio_url) => {
                tracing::debug!(model = %request.model, "Deepgram transcription request for URL source");
                self.client.post(&url).json(&serde_json::json!({ "url": audio_url }))
            }
            AudioSource::Upload { bytes, mime_type } => {
                tracing::debug!(
                    model = %request.model,
                    bytes = bytes.len(),
                    %mime_type,
                    "Deepgram transcription request for uploaded file"
                );
                self.client
                    .post(&url)
                    .header(http::header::CONTENT_TYPE, mime_type)
                    .body(bytes)
            }
        };

        let mut builder = builder
            .query(&query)
            .header(http::header::AUTHORIZATION, format!("Token {}", self.api_key.expose_secret()));

        if let Some(timeout) = self.request_timeout {
            builder = builder.timeout(timeout);
        }

        let response = builder.send().await.map_err(|e| {
            tracing::error!("Deepgram request failed: {e}");
            SttError::Connection(e.to_string())
        })?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());

            tracing::error!("Deepgram API error ({status}): {error_text}");

            return Err(SttError::ProviderApi {
                status: status.as_u16(),
                message: error_text,
            });
        }

        let result: DeepgramResponse = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse Deepgram response: {e}");
            SttError::MalformedResponse(e.to_string())
        })?;

        tracing::debug!("Deepgram transcription complete");

        normalize(result, &request.model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(text: &str, start: f64, end: f64) -> DeepgramWord {
        DeepgramWord {
            word: text.to_string(),
            start,
            end,
            confidence: 0.98,
            punctuated_word: Some(format!("{text}.")),
        }
    }

    fn response_with(alternative: DeepgramAlternative, metadata: Option<DeepgramMetadata>) -> DeepgramResponse {
        DeepgramResponse {
            metadata,
            results: DeepgramResults {
                channels: vec![DeepgramChannel {
                    alternatives: vec![alternative],
                }],
            },
        }
    }

    #[test]
    fn words_survive_in_order_with_all_fields() {
        let response = response_with(
            DeepgramAlternative {
                transcript: "hello world again".to_string(),
                words: vec![word("hello", 0.0, 0.4), word("world", 0.4, 0.9), word("again", 0.9, 1.3)],
            },
            None,
        );

        let result = normalize(response, "nova-3").unwrap();

        assert_eq!(result.words.len(), 3);
        assert_eq!(result.words[0], WordEntry {
            word: "hello".to_string(),
            start: 0.0,
            end: 0.4,
            confidence: 0.98,
            punctuated_word: "hello.".to_string(),
        });
        assert_eq!(result.words[2].word, "again");
    }

    #[test]
    fn empty_transcript_is_empty_string() {
        let response = response_with(DeepgramAlternative::default(), None);

        let result = normalize(response, "nova-3").unwrap();
        assert_eq!(result.transcript, "");
        assert!(result.words.is_empty());
    }

    #[test]
    fn structurally_empty_response_is_an_error() {
        let response = DeepgramResponse::default();
        assert!(matches!(normalize(response, "nova-3"), Err(SttError::EmptyResult)));

        let no_alternatives = DeepgramResponse {
            metadata: None,
            results: DeepgramResults {
                channels: vec![DeepgramChannel { alternatives: vec![] }],
            },
        };
        assert!(matches!(normalize(no_alternatives, "nova-3"), Err(SttError::EmptyResult)));
    }

    #[test]
    fn model_uuid_is_first_model_info_key() {
        let mut model_info = IndexMap::new();
        model_info.insert("uuid-first".to_string(), serde_json::json!({"name": "general"}));
        model_info.insert("uuid-second".to_string(), serde_json::json!({"name": "other"}));

        let response = response_with(DeepgramAlternative::default(), Some(DeepgramMetadata {
            request_id: Some("req-1".to_string()),
            model_info,
            duration: Some(12.5),
        }));

        let result = normalize(response, "nova-2").unwrap();
        assert_eq!(result.metadata.model_uuid.as_deref(), Some("uuid-first"));
        assert_eq!(result.metadata.request_id.as_deref(), Some("req-1"));
        assert_eq!(result.metadata.model_name, "nova-2");
        assert_eq!(result.duration, Some(12.5));
    }

    #[test]
    fn duration_present_only_when_positive() {
        for (reported, expected) in [(Some(0.0), None), (Some(-1.0), None), (None, None), (Some(3.2), Some(3.2))] {
            let response = response_with(DeepgramAlternative::default(), Some(DeepgramMetadata {
                request_id: None,
                model_info: IndexMap::new(),
                duration: reported,
            }));

            assert_eq!(normalize(response, "nova-3").unwrap().duration, expected);
        }
    }

    #[test]
    fn missing_punctuated_word_falls_back_to_word() {
        let response = response_with(
            DeepgramAlternative {
                transcript: "hi".to_string(),
                words: vec![DeepgramWord {
                    word: "hi".to_string(),
                    start: 0.0,
                    end: 0.2,
                    confidence: 1.0,
                    punctuated_word: None,
                }],
            },
            None,
        );

        let result = normalize(response, "nova-3").unwrap();
        assert_eq!(result.words[0].punctuated_word, "hi");
    }

    #[test]
    fn wire_shape_deserializes() {
        let raw = serde_json::json!({
            "metadata": {
                "request_id": "8b1bd1ab",
                "model_info": {"c0b00a": {"name": "general-nova-3"}},
                "duration": 17.4,
                "channels": 1
            },
            "results": {
                "channels": [{
                    "alternatives": [{
                        "transcript": "testing one two",
                        "confidence": 0.99,
                        "words": [
                            {"word": "testing", "start": 0.08, "end": 0.56, "confidence": 0.99, "punctuated_word": "Testing"}
                        ]
                    }]
                }]
            }
        });

        let response: DeepgramResponse = serde_json::from_value(raw).unwrap();
        let result = normalize(response, "nova-3").unwrap();

        assert_eq!(result.transcript, "testing one two");
        assert_eq!(result.words.len(), 1);
        assert_eq!(result.metadata.model_uuid.as_deref(), Some("c0b00a"));
    }
}
