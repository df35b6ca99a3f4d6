use strum::EnumString;

use crate::error::SttError;

/// Version tag the vendor expects for summarization
const SUMMARIZE_VERSION: &str = "v2";

/// The closed set of recognized transcription feature flags
///
/// Keys outside this set are logged and ignored rather than rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum FeatureFlag {
    SmartFormat,
    Punctuate,
    Paragraphs,
    Utterances,
    Numerals,
    ProfanityFilter,
    Diarize,
    DetectTopics,
    /// Value is ignored; always sent as the fixed tag `"v2"`
    Summarize,
}

/// Typed transcription options forwarded to the vendor
///
/// Unset fields are omitted from the outgoing request entirely, so the
/// vendor's own defaults apply.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TranscribeOptions {
    pub smart_format: Option<bool>,
    pub punctuate: Option<bool>,
    pub paragraphs: Option<bool>,
    pub utterances: Option<bool>,
    pub numerals: Option<bool>,
    pub profanity_filter: Option<bool>,
    pub diarize: Option<bool>,
    pub detect_topics: Option<bool>,
    pub summarize: Option<&'static str>,
}

impl TranscribeOptions {
    /// Build options from caller-supplied flag key/value pairs
    ///
    /// # Errors
    ///
    /// Returns `InvalidFlagValue` when a recognized boolean flag carries
    /// a value that is not `"true"`/`"false"`
    pub fn from_flags<'a, I>(flags: I) -> Result<Self, SttError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut options = Self::default();
        for (key, value) in flags {
            options.apply(key, value)?;
        }
        Ok(options)
    }

    /// Apply a single flag
    ///
    /// Unrecognized keys are diagnostics, not failures.
    pub fn apply(&mut self, key: &str, value: &str) -> Result<(), SttError> {
        let Ok(flag) = key.parse::<FeatureFlag>() else {
            tracing::warn!(flag = key, "feature not recognized, ignoring");
            return Ok(());
        };

        if matches!(flag, FeatureFlag::Summarize) {
            self.summarize = Some(SUMMARIZE_VERSION);
            return Ok(());
        }

        let parsed = value.parse::<bool>().map_err(|_| SttError::InvalidFlagValue {
            flag: key.to_string(),
            value: value.to_string(),
        })?;

        match flag {
            FeatureFlag::SmartFormat => self.smart_format = Some(parsed),
            FeatureFlag::Punctuate => self.punctuate = Some(parsed),
            FeatureFlag::Paragraphs => self.paragraphs = Some(parsed),
            FeatureFlag::Utterances => self.utterances = Some(parsed),
            FeatureFlag::Numerals => self.numerals = Some(parsed),
            FeatureFlag::ProfanityFilter => self.profanity_filter = Some(parsed),
            FeatureFlag::Diarize => self.diarize = Some(parsed),
            FeatureFlag::DetectTopics => self.detect_topics = Some(parsed),
            FeatureFlag::Summarize => unreachable!("handled above"),
        }

        Ok(())
    }

    /// Render the set options as vendor query parameters
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();

        let bools = [
            ("smart_format", self.smart_format),
            ("punctuate", self.punctuate),
            ("paragraphs", self.paragraphs),
            ("utterances", self.utterances),
            ("numerals", self.numerals),
            ("profanity_filter", self.profanity_filter),
            ("diarize", self.diarize),
            ("detect_topics", self.detect_topics),
        ];

        for (name, value) in bools {
            if let Some(value) = value {
                pairs.push((name, value.to_string()));
            }
        }

        if let Some(version) = self.summarize {
            pairs.push(("summarize", version.to_string()));
        }

        pairs
    }
}
