use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Who produced a transcript line
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Speaker {
    User,
    System,
}

/// One turn of the conversation log
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TranscriptEntry {
    pub speaker: Speaker,
    pub text: String,
    pub at: DateTime<Utc>,
}

impl TranscriptEntry {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::User,
            text: text.into(),
            at: Utc::now(),
        }
    }

    pub fn system(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::System,
            text: text.into(),
            at: Utc::now(),
        }
    }
}
