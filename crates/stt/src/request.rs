use axum::body::Body;
use axum::response::IntoResponse as _;
use serde::Deserialize;

use crate::{
    error::SttError,
    features::TranscribeOptions,
    types::{AudioSource, TranscriptionRequest},
};

/// Raw transcription form fields, before validation
///
/// Collected identically from multipart and urlencoded bodies; the
/// urlencoded path simply can never carry a file.
#[derive(Debug, Default)]
pub struct TranscriptionForm {
    pub url: Option<String>,
    pub file: Option<FileUpload>,
    pub model: Option<String>,
    /// Deepgram tier name, passed through to the vendor as-is
    pub tier: Option<String>,
    /// JSON object string mapping flag name to value
    pub features: Option<String>,
}

/// An uploaded file with its declared content type
#[derive(Debug)]
pub struct FileUpload {
    pub bytes: Vec<u8>,
    pub mime_type: String,
}

impl TranscriptionForm {
    /// Validate the form into a dispatchable request
    ///
    /// A non-empty `url` wins even when a file was also uploaded. An
    /// empty upload counts as absent.
    ///
    /// # Errors
    ///
    /// `MissingInput` when neither source is usable, `InvalidFeatures`
    /// when the features field is not a JSON object, or the flag-level
    /// errors from [`TranscribeOptions`]
    pub fn into_request(self, default_model: &str) -> Result<TranscriptionRequest, SttError> {
        let source = match (self.url, self.file) {
            (Some(url), _) if !url.is_empty() => AudioSource::Url(url),
            (_, Some(upload)) if !upload.bytes.is_empty() => AudioSource::Upload {
                bytes: upload.bytes,
                mime_type: upload.mime_type,
            },
            _ => return Err(SttError::MissingInput),
        };

        let options = match self.features {
            Some(raw) if !raw.is_empty() => parse_features(&raw)?,
            _ => TranscribeOptions::default(),
        };

        let model = self.model.filter(|m| !m.is_empty()).unwrap_or_else(|| default_model.to_string());

        // Browsers submit the string "undefined" for an unset tier picker
        let tier = self.tier.filter(|t| !t.is_empty() && t != "undefined");

        Ok(TranscriptionRequest {
            source,
            model,
            tier,
            options,
        })
    }
}

/// Parse the `features` form field (a JSON object) into typed options
fn parse_features(raw: &str) -> Result<TranscribeOptions, SttError> {
    let map: serde_json::Map<String, serde_json::Value> =
        serde_json::from_str(raw).map_err(|e| SttError::InvalidFeatures(e.to_string()))?;

    let mut options = TranscribeOptions::default();
    for (key, value) in &map {
        let value = match value {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        options.apply(key, &value)?;
    }

    Ok(options)
}

/// Extractor for the transcription form body
///
/// Accepts `multipart/form-data` (fields `file`, `url`, `model`,
/// `features`) or `application/x-www-form-urlencoded` (same fields minus
/// `file`). Anything else is a validation failure.
pub struct ExtractForm(pub TranscriptionForm);

/// Body limit for audio uploads (32 MiB)
const BODY_LIMIT_BYTES: usize = 32 << 20;

#[derive(Debug, Deserialize)]
struct UrlencodedFields {
    url: Option<String>,
    model: Option<String>,
    tier: Option<String>,
    features: Option<String>,
}

impl<S> axum::extract::FromRequest<S> for ExtractForm
where
    S: Send + Sync,
{
    type Rejection = axum::response::Response;

    async fn from_request(request: http::Request<Body>, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = request
            .headers()
            .get(http::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();

        if content_type.starts_with("multipart/form-data") {
            return from_multipart(request, state).await.map(Self);
        }

        if content_type.starts_with("application/x-www-form-urlencoded") {
            let axum::Form(fields) = axum::Form::<UrlencodedFields>::from_request(request, state)
                .await
                .map_err(|e| SttError::MalformedForm(e.to_string()).into_response())?;

            return Ok(Self(TranscriptionForm {
                url: fields.url,
                file: None,
                model: fields.model,
                tier: fields.tier,
                features: fields.features,
            }));
        }

        Err(SttError::MalformedForm(format!(
            "expected multipart/form-data or application/x-www-form-urlencoded, got `{content_type}`"
        ))
        .into_response())
    }
}

async fn from_multipart<S>(
    request: http::Request<Body>,
    _state: &S,
) -> Result<TranscriptionForm, axum::response::Response>
where
    S: Send + Sync,
{
    use axum::extract::FromRequest as _;

    let (parts, body) = request.into_parts();

    let bytes = axum::body::to_bytes(body, BODY_LIMIT_BYTES)
        .await
        .map_err(|e| SttError::MalformedForm(format!("failed to read request body: {e}")).into_response())?;

    // Reassemble the request for multipart parsing
    let mut rebuilt = http::Request::builder().method(parts.method.clone()).uri(parts.uri.clone());
    for (key, value) in &parts.headers {
        rebuilt = rebuilt.header(key, value);
    }
    let rebuilt = rebuilt
        .body(Body::from(bytes))
        .map_err(|e| SttError::MalformedForm(e.to_string()).into_response())?;

    let mut multipart = axum::extract::Multipart::from_request(rebuilt, &())
        .await
        .map_err(|e| SttError::MalformedForm(format!("failed to parse multipart form: {e}")).into_response())?;

    let mut form = TranscriptionForm::default();

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                return Err(SttError::MalformedForm(format!("failed to parse multipart form: {e}")).into_response());
            }
        };

        let field_name = field.name().unwrap_or("").to_string();

        match field_name.as_str() {
            "file" => {
                let mime_type = field.content_type().unwrap_or("application/octet-stream").to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| SttError::MalformedForm(format!("failed to read file field: {e}")).into_response())?
                    .to_vec();
                form.file = Some(FileUpload { bytes, mime_type });
            }
            "url" => form.url = Some(read_text_field(field, "url").await?),
            "model" => form.model = Some(read_text_field(field, "model").await?),
            "tier" => form.tier = Some(read_text_field(field, "tier").await?),
            "features" => form.features = Some(read_text_field(field, "features").await?),
            _ => {
                // Skip unknown fields
            }
        }
    }

    Ok(form)
}

async fn read_text_field(
    field: axum::extract::multipart::Field<'_>,
    name: &str,
) -> Result<String, axum::response::Response> {
    field
        .text()
        .await
        .map_err(|e| SttError::MalformedForm(format!("failed to read {name} field: {e}")).into_response())
}
